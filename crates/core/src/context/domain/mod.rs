pub mod context_label;
pub mod context_preprocessor;
