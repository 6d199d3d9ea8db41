pub mod paragraph_highlighter;
pub mod passthrough_mapper;
pub mod phrase_analysis_mapper;
pub mod pronunciation_table_mapper;
