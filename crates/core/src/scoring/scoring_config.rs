use serde::Serialize;

use crate::matching::domain::word_matcher::WordThresholds;
use crate::shared::constants::{
    ACCEPT_THRESHOLD, CONTENT_WORD_THRESHOLD, CORRECTION_THRESHOLD, DEFAULT_CACHE_CAPACITY,
    EXCELLENT_THRESHOLD, LENIENT_STOP_WORD_THRESHOLD, STRICT_STOP_WORD_THRESHOLD,
};
use crate::shared::error::ConfigError;

/// Thresholds and switches for one scorer instance.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub content_word_threshold: f64,
    /// 0.0 is the lenient default; at most 0.6.
    pub stop_word_threshold: f64,
    pub accept_threshold: f64,
    pub correction_threshold: f64,
    pub excellent_threshold: f64,
    /// Similarity cache entries; 0 disables caching.
    pub cache_capacity: usize,
    pub direct_corrections: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            content_word_threshold: CONTENT_WORD_THRESHOLD,
            stop_word_threshold: LENIENT_STOP_WORD_THRESHOLD,
            accept_threshold: ACCEPT_THRESHOLD,
            correction_threshold: CORRECTION_THRESHOLD,
            excellent_threshold: EXCELLENT_THRESHOLD,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            direct_corrections: true,
        }
    }
}

impl ScoringConfig {
    /// Stop words must reach 0.6 instead of passing unconditionally.
    pub fn strict() -> Self {
        Self {
            stop_word_threshold: STRICT_STOP_WORD_THRESHOLD,
            ..Self::default()
        }
    }

    pub fn word_thresholds(&self) -> WordThresholds {
        WordThresholds {
            content_word: self.content_word_threshold,
            stop_word: self.stop_word_threshold,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        in_range("content word threshold", self.content_word_threshold, 0.0, 1.0)?;
        in_range(
            "stop word threshold",
            self.stop_word_threshold,
            0.0,
            STRICT_STOP_WORD_THRESHOLD,
        )?;
        in_range("accept threshold", self.accept_threshold, 0.0, 1.0)?;
        in_range("correction threshold", self.correction_threshold, 0.0, 1.0)?;
        in_range("excellent threshold", self.excellent_threshold, 0.0, 1.0)?;

        ordered(
            ("accept threshold", self.accept_threshold),
            ("correction threshold", self.correction_threshold),
        )?;
        ordered(
            ("correction threshold", self.correction_threshold),
            ("excellent threshold", self.excellent_threshold),
        )
    }
}

fn in_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons and is rejected here too.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

fn ordered(lower: (&'static str, f64), upper: (&'static str, f64)) -> Result<(), ConfigError> {
    if lower.1 <= upper.1 {
        Ok(())
    } else {
        Err(ConfigError::Misordered {
            lower: lower.0,
            lower_value: lower.1,
            upper: upper.0,
            upper_value: upper.1,
        })
    }
}
