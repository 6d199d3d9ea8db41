use crate::phonetic::domain::string_metrics::{edit_similarity, jaro_winkler};
use crate::shared::text::is_stop_word;

use super::phonetic_comparator::PhoneticComparator;
use super::pronunciation_patterns::PronunciationPatterns;

const STOP_WORD_CONFIDENCE_BOOST: f64 = 0.1;
const BOTH_SILENT_SIMILARITY: f64 = 0.8;
const ONE_SILENT_SIMILARITY: f64 = 0.3;
const SIMILAR_ONSET_BOOST: f64 = 0.05;
const SIMILAR_ONSET_THRESHOLD: f64 = 0.8;

/// Per-word reporting metrics for an expected word heard as a recognized one.
pub struct WordMetrics<'a> {
    comparator: &'a PhoneticComparator,
    patterns: &'a PronunciationPatterns,
}

impl<'a> WordMetrics<'a> {
    pub fn new(comparator: &'a PhoneticComparator, patterns: &'a PronunciationPatterns) -> Self {
        Self {
            comparator,
            patterns,
        }
    }

    /// Blend of phonetic match, acoustic, Jaro-Winkler and edit similarity.
    /// Exact (case-insensitive) matches are fully confident; stop words get
    /// a small boost since recognizers rarely miss them.
    pub fn confidence(&self, expected: &str, recognized: &str, phonetic_match: f64) -> f64 {
        if expected.eq_ignore_ascii_case(recognized) {
            return 1.0;
        }

        let exp = expected.to_lowercase();
        let rec = recognized.to_lowercase();
        let acoustic = self.comparator.word_acoustic_similarity(expected, recognized);

        let mut confidence = 0.35 * phonetic_match
            + 0.25 * acoustic
            + 0.25 * jaro_winkler(&exp, &rec)
            + 0.15 * edit_similarity(&exp, &rec);

        if is_stop_word(expected) || is_stop_word(recognized) {
            confidence = (confidence + STOP_WORD_CONFIDENCE_BOOST).min(1.0);
        }

        confidence.clamp(0.0, 1.0)
    }

    /// Pronunciation-only similarity, boosted by the confusion table.
    pub fn phonetic_content_similarity(&self, expected: &str, recognized: &str) -> f64 {
        if expected.eq_ignore_ascii_case(recognized) {
            return 1.0;
        }

        let exp_code = self.comparator.encode(expected);
        let rec_code = self.comparator.encode(recognized);
        match (exp_code.is_silent(), rec_code.is_silent()) {
            (true, true) => return BOTH_SILENT_SIMILARITY,
            (true, false) | (false, true) => return ONE_SILENT_SIMILARITY,
            (false, false) => {}
        }

        let pronunciation = self.comparator.combined_similarity(exp_code.primary(), rec_code.primary());
        let boost = self.patterns.boost(expected, recognized) + self.onset_boost(expected, recognized);

        (pronunciation + boost).min(1.0)
    }

    fn onset_boost(&self, expected: &str, recognized: &str) -> f64 {
        let onset = |word: &str| word.to_lowercase().chars().take(2).collect::<String>();
        let (exp, rec) = (onset(expected), onset(recognized));
        if exp.is_empty() || rec.is_empty() {
            return 0.0;
        }
        let exp_code = self.comparator.encode(&exp);
        let rec_code = self.comparator.encode(&rec);
        if self
            .comparator
            .phonetic_similarity(exp_code.primary(), rec_code.primary())
            >= SIMILAR_ONSET_THRESHOLD
        {
            SIMILAR_ONSET_BOOST
        } else {
            0.0
        }
    }
}
