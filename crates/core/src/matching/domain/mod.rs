pub mod compound_lexicon;
pub mod phonetic_comparator;
pub mod phrase_similarity;
pub mod pronunciation_patterns;
pub mod word_match;
pub mod word_matcher;
pub mod word_metrics;
pub mod word_order_scorer;
