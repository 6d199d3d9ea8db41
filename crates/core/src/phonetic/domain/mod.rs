pub mod acoustic_model;
pub mod phonetic_code;
pub mod phonetic_encoder;
pub mod similarity_cache;
pub mod string_metrics;
