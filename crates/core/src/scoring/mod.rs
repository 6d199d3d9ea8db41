pub mod batch_executor;
pub mod infrastructure;
pub mod phrase_analysis;
pub mod phrase_scorer;
pub mod score_reporter;
pub mod scoring_config;
