use crate::shared::constants::{CONTENT_WORD_THRESHOLD, LENIENT_STOP_WORD_THRESHOLD};
use crate::shared::text::is_stop_word;

use super::phonetic_comparator::PhoneticComparator;
use super::pronunciation_patterns::PronunciationPatterns;
use super::word_match::{WordAnalysisResult, WordMatchResult};
use super::word_metrics::WordMetrics;

/// Longest run of recognized tokens that may stand in for one expected word.
const MAX_WINDOW: usize = 3;

const UNMATCHED_CONFIDENCE: f64 = 0.2;
const UNMATCHED_PHONETIC_SIMILARITY: f64 = 0.1;
const ORPHAN_CONFIDENCE: f64 = 0.3;
const ORPHAN_PHONETIC_SIMILARITY: f64 = 0.2;

/// Minimum best-window score each kind of expected word must reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WordThresholds {
    pub content_word: f64,
    pub stop_word: f64,
}

impl Default for WordThresholds {
    fn default() -> Self {
        Self {
            content_word: CONTENT_WORD_THRESHOLD,
            stop_word: LENIENT_STOP_WORD_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Window {
    start: usize,
    len: usize,
    score: f64,
}

/// Aligns expected words against 1-3 token windows of the recognized text.
///
/// Expected words are processed left to right; each claims its best window
/// of still-unused recognized tokens, so no token is matched twice.
pub struct WordMatcher<'a> {
    comparator: &'a PhoneticComparator,
    metrics: WordMetrics<'a>,
    thresholds: WordThresholds,
}

impl<'a> WordMatcher<'a> {
    pub fn new(
        comparator: &'a PhoneticComparator,
        patterns: &'a PronunciationPatterns,
        thresholds: WordThresholds,
    ) -> Self {
        Self {
            comparator,
            metrics: WordMetrics::new(comparator, patterns),
            thresholds,
        }
    }

    pub fn match_words(&self, expected: &[String], recognized: &[String]) -> Vec<WordMatchResult> {
        let recognized_codes: Vec<String> = recognized
            .iter()
            .map(|w| self.comparator.encode(w).primary().to_string())
            .collect();
        let mut used = vec![false; recognized.len()];
        let lone_word_side = lone_word_against_many(expected.len(), recognized.len());

        expected
            .iter()
            .map(|word| {
                let code = self.comparator.encode(word);
                let is_stop = is_stop_word(word);
                let is_metaphone_zero = code.is_silent();

                let window = self.best_window(code.primary(), recognized, &recognized_codes, &used);
                let matched_indices: Vec<usize> = window
                    .map(|w| (w.start..w.start + w.len).collect())
                    .unwrap_or_default();
                for &i in &matched_indices {
                    used[i] = true;
                }

                let best_score = window.map_or(0.0, |w| w.score);
                let threshold = if lone_word_side || is_metaphone_zero {
                    0.0
                } else if is_stop {
                    self.thresholds.stop_word
                } else {
                    self.thresholds.content_word
                };

                let best_match = window.map(|w| recognized[w.start..w.start + w.len].join(" "));
                let (confidence, phonetic_content_similarity) = match window {
                    Some(w) => {
                        let head = &recognized[w.start];
                        (
                            self.metrics.confidence(word, head, best_score),
                            self.metrics.phonetic_content_similarity(word, head),
                        )
                    }
                    None => (UNMATCHED_CONFIDENCE, UNMATCHED_PHONETIC_SIMILARITY),
                };

                log::trace!(
                    "word '{word}' [{code}] -> {:?} score {best_score:.3} threshold {threshold:.2}",
                    best_match
                );

                WordMatchResult {
                    word: word.clone(),
                    phonetic_code: code.primary().to_string(),
                    is_stop_word: is_stop,
                    is_metaphone_zero,
                    best_match,
                    matched_indices,
                    best_score,
                    threshold,
                    meets_threshold: best_score >= threshold,
                    confidence,
                    phonetic_content_similarity,
                }
            })
            .collect()
    }

    /// Re-projects expected-word matches onto the recognized tokens.
    ///
    /// Tokens claimed by an expected word are scored against it. A token no
    /// expected word claimed is scored against the phonetically closest
    /// expected word that itself claimed nothing.
    pub fn analyze_recognized(
        &self,
        expected: &[String],
        recognized: &[String],
        matches: &[WordMatchResult],
    ) -> Vec<WordAnalysisResult> {
        let mut owner: Vec<Option<usize>> = vec![None; recognized.len()];
        for (i, result) in matches.iter().enumerate() {
            for &j in &result.matched_indices {
                if let Some(slot) = owner.get_mut(j) {
                    slot.get_or_insert(i);
                }
            }
        }
        let unclaimed: Vec<usize> = matches
            .iter()
            .enumerate()
            .filter(|(_, m)| m.matched_indices.is_empty())
            .map(|(i, _)| i)
            .collect();

        recognized
            .iter()
            .zip(&owner)
            .map(|(token, owner)| {
                let (confidence, phonetic_content_similarity) = match owner {
                    Some(i) => {
                        let result = &matches[*i];
                        (
                            self.metrics.confidence(&result.word, token, result.best_score),
                            self.metrics.phonetic_content_similarity(&result.word, token),
                        )
                    }
                    None => self.score_orphan(token, expected, &unclaimed),
                };
                WordAnalysisResult {
                    recognized_word: token.clone(),
                    confidence,
                    phonetic_content_similarity,
                }
            })
            .collect()
    }

    fn score_orphan(&self, token: &str, expected: &[String], unclaimed: &[usize]) -> (f64, f64) {
        let token_code = self.comparator.encode(token);
        let mut best: Option<(&str, f64)> = None;
        let mut best_score = 0.0;
        for &k in unclaimed {
            let Some(candidate) = expected.get(k) else {
                continue;
            };
            let candidate_code = self.comparator.encode(candidate);
            let score = self
                .comparator
                .phonetic_similarity(token_code.primary(), candidate_code.primary());
            if score > best_score {
                best_score = score;
                best = Some((candidate, score));
            }
        }

        match best {
            Some((candidate, score)) => (
                self.metrics.confidence(candidate, token, score),
                self.metrics.phonetic_content_similarity(candidate, token),
            ),
            None => (ORPHAN_CONFIDENCE, ORPHAN_PHONETIC_SIMILARITY),
        }
    }

    /// Single tokens first, then 2- and 3-token windows; a later window only
    /// wins with a strictly higher score.
    fn best_window(
        &self,
        code: &str,
        recognized: &[String],
        recognized_codes: &[String],
        used: &[bool],
    ) -> Option<Window> {
        let mut best: Option<Window> = None;
        let mut best_score = 0.0;
        let mut consider = |start: usize, len: usize, score: f64| {
            if score > best_score {
                best_score = score;
                best = Some(Window { start, len, score });
            }
        };

        for (j, candidate) in recognized_codes.iter().enumerate() {
            if !used[j] {
                consider(j, 1, self.comparator.combined_similarity(code, candidate));
            }
        }

        for start in 0..recognized.len() {
            for len in 2..=MAX_WINDOW {
                let end = start + len;
                if end > recognized.len() || used[start..end].iter().any(|&u| u) {
                    continue;
                }
                let joined: String = recognized[start..end].concat();
                let window_code = self.comparator.encode(&joined);
                consider(
                    start,
                    len,
                    self.comparator.combined_similarity(code, window_code.primary()),
                );
            }
        }

        best
    }
}

/// Exactly one word on one side facing several on the other.
fn lone_word_against_many(expected_len: usize, recognized_len: usize) -> bool {
    (expected_len == 1 && recognized_len > 1) || (recognized_len == 1 && expected_len > 1)
}
