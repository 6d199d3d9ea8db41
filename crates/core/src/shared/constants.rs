/// Length of every non-empty phonetic code.
pub const PHONETIC_CODE_LENGTH: usize = 4;
pub const PHONETIC_PAD: char = '0';

/// Per-word gate thresholds.
pub const CONTENT_WORD_THRESHOLD: f64 = 0.5;
pub const LENIENT_STOP_WORD_THRESHOLD: f64 = 0.0;
pub const STRICT_STOP_WORD_THRESHOLD: f64 = 0.6;

/// Phrase-level verdict bands. Empirical values with no documented derivation;
/// recalibrate against labelled data before reusing in a new domain.
pub const ACCEPT_THRESHOLD: f64 = 0.90;
pub const CORRECTION_THRESHOLD: f64 = 0.93;
pub const EXCELLENT_THRESHOLD: f64 = 0.95;
pub const MODERATE_THRESHOLD: f64 = 0.70;
pub const WEAK_THRESHOLD: f64 = 0.50;

/// A phrase-level signal above this value overrides the weighted blend.
pub const DOMINANT_SIGNAL_THRESHOLD: f64 = 0.90;

pub const FUSION_METAPHONE_WEIGHT: f64 = 0.2;
pub const FUSION_ACOUSTIC_WEIGHT: f64 = 0.3;
pub const FUSION_ORDER_WEIGHT: f64 = 0.5;

/// Stop words count for this fraction of a content word in phrase averages.
pub const STOP_WORD_WEIGHT: f64 = 0.3;

pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Shown when a recognized utterance maps to nothing.
pub const SPEAK_CLEARLY_PROMPT: &str = "Please speak clearly and loudly in a silent environment.";

/// High-frequency grammatical words (articles, pronouns, auxiliary and modal verbs).
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is", "are",
    "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "can", "must", "shall", "this", "that", "these", "those",
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
    "his", "its", "our", "their",
];
