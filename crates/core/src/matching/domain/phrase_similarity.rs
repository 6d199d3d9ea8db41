use std::collections::HashSet;

use crate::shared::constants::STOP_WORD_WEIGHT;
use crate::shared::text::is_stop_word;

use super::compound_lexicon::{syllable_count, CompoundLexicon};
use super::phonetic_comparator::PhoneticComparator;

const COMPOUND_SIMILARITY: f64 = 0.90;
const COMPOUND_LENGTH_RATIO: f64 = 0.7;
const COMPOUND_SYLLABLE_SLACK: usize = 1;
const COMPOUND_CHAR_OVERLAP: f64 = 0.4;

/// Minimum per-word score for a word to count toward a phrase signal.
#[derive(Clone, Copy)]
struct SignalThresholds {
    content: f64,
    stop: f64,
}

const METAPHONE_THRESHOLDS: SignalThresholds = SignalThresholds {
    content: 0.7,
    stop: 0.5,
};

const ACOUSTIC_THRESHOLDS: SignalThresholds = SignalThresholds {
    content: 0.6,
    stop: 0.4,
};

/// Phrase-level phonetic signals: greedy best-match averages where stop
/// words weigh a fraction of content words.
pub struct PhraseSimilarity<'a> {
    comparator: &'a PhoneticComparator,
    lexicon: &'a CompoundLexicon,
}

impl<'a> PhraseSimilarity<'a> {
    pub fn new(comparator: &'a PhoneticComparator, lexicon: &'a CompoundLexicon) -> Self {
        Self {
            comparator,
            lexicon,
        }
    }

    /// Phonetic-code agreement, letting two recognized tokens stand for one
    /// expected word only when they convincingly spell a compound.
    pub fn metaphone_similarity(&self, expected: &[String], recognized: &[String]) -> f64 {
        self.weighted_average(expected, recognized, METAPHONE_THRESHOLDS, |word, code, codes, used| {
            let mut best = (0.0, None, 1);
            for (j, candidate) in codes.iter().enumerate() {
                if used[j] {
                    continue;
                }
                let similarity = self.comparator.phonetic_similarity(code, candidate);
                if similarity > best.0 {
                    best = (similarity, Some(j), 1);
                }
            }

            for j in 0..recognized.len().saturating_sub(1) {
                if used[j] || used[j + 1] {
                    continue;
                }
                if let Some(score) = self.compound_score(word, code, &recognized[j], &recognized[j + 1], best.0) {
                    best = (score, Some(j), 2);
                }
            }
            best
        })
    }

    /// Acoustic code agreement, single tokens only.
    pub fn acoustic_similarity(&self, expected: &[String], recognized: &[String]) -> f64 {
        self.weighted_average(expected, recognized, ACOUSTIC_THRESHOLDS, |_, code, codes, used| {
            let mut best = (0.0, None, 1);
            for (j, candidate) in codes.iter().enumerate() {
                if used[j] {
                    continue;
                }
                let similarity = self.comparator.acoustic_code_similarity(code, candidate);
                if similarity > best.0 {
                    best = (similarity, Some(j), 1);
                }
            }
            best
        })
    }

    /// Bidirectional similarity of `single` against `first second`, if the
    /// pair passes every compound check and beats `to_beat`.
    fn compound_score(&self, single: &str, code: &str, first: &str, second: &str, to_beat: f64) -> Option<f64> {
        let joined = format!("{first}{second}");
        let joined_code = self.comparator.encode(&joined);
        let forward = self.comparator.phonetic_similarity(code, joined_code.primary());
        if forward <= to_beat {
            return None;
        }
        let reverse = self.comparator.phonetic_similarity(joined_code.primary(), code);
        let bidirectional = (forward + reverse) / 2.0;

        let single_len = single.chars().count();
        let joined_len = joined.chars().count();
        let length_ratio = single_len.min(joined_len) as f64 / single_len.max(joined_len).max(1) as f64;

        let syllable_diff =
            syllable_count(single).abs_diff(syllable_count(first) + syllable_count(second));

        let single_chars: HashSet<char> = single.to_lowercase().chars().collect();
        let joined_chars: HashSet<char> = joined.to_lowercase().chars().collect();
        let union = single_chars.union(&joined_chars).count().max(1);
        let overlap = single_chars.intersection(&joined_chars).count() as f64 / union as f64;

        let valid = bidirectional > COMPOUND_SIMILARITY
            && length_ratio > COMPOUND_LENGTH_RATIO
            && syllable_diff <= COMPOUND_SYLLABLE_SLACK
            && overlap > COMPOUND_CHAR_OVERLAP
            && self.lexicon.is_likely_compound(single, first, second);

        valid.then_some(bidirectional)
    }

    /// Shared skeleton: `pick` returns `(score, start, span)` for the best
    /// unused match of one expected word. A match above threshold consumes
    /// its tokens; an unmatched stop word still adds 0.3.
    fn weighted_average<F>(
        &self,
        expected: &[String],
        recognized: &[String],
        thresholds: SignalThresholds,
        pick: F,
    ) -> f64
    where
        F: Fn(&str, &str, &[String], &[bool]) -> (f64, Option<usize>, usize),
    {
        if expected.is_empty() && recognized.is_empty() {
            return 1.0;
        }
        if expected.is_empty() || recognized.is_empty() {
            return 0.0;
        }

        let codes: Vec<String> = recognized
            .iter()
            .map(|w| self.comparator.encode(w).primary().to_string())
            .collect();
        let mut used = vec![false; recognized.len()];
        let mut total = 0.0;
        let mut content_words = 0usize;
        let mut stop_words = 0usize;

        for word in expected {
            let stop = is_stop_word(word);
            if stop {
                stop_words += 1;
            } else {
                content_words += 1;
            }

            let code = self.comparator.encode(word);
            let (score, start, span) = pick(word, code.primary(), &codes, &used);
            let threshold = if stop { thresholds.stop } else { thresholds.content };

            match start {
                Some(start) if score > threshold => {
                    for flag in used.iter_mut().skip(start).take(span) {
                        *flag = true;
                    }
                    total += if stop { score * STOP_WORD_WEIGHT } else { score };
                }
                _ if stop => total += STOP_WORD_WEIGHT,
                _ => {}
            }
        }

        let weighted = content_words as f64 + stop_words as f64 * STOP_WORD_WEIGHT;
        if weighted > 0.0 {
            (total / weighted).min(1.0)
        } else {
            0.0
        }
    }
}
