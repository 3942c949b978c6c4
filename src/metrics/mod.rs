pub mod score_history;
pub mod training_stats;

pub use score_history::ScoreHistory;
pub use training_stats::TrainingStats;
