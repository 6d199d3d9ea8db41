pub mod lru_similarity_cache;
pub mod soundex_encoder;
pub mod speech_metaphone_encoder;
