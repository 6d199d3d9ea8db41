use serde::Serialize;

use crate::shared::text::{clean_word, is_stop_word};

use super::phonetic_comparator::PhoneticComparator;

const POSITION_WEIGHT: f64 = 0.5;
const CONTENT_WEIGHT: f64 = 0.3;
const SEQUENCE_WEIGHT: f64 = 0.2;

/// How well the recognized word order follows the expected one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBreakdown {
    pub position: f64,
    pub content: f64,
    pub sequence: f64,
    pub combined: f64,
}

/// Scores word order three ways over cleaned tokens: positional windows,
/// content/stop-word partitions and a skip-tolerant sequence alignment.
pub struct WordOrderScorer<'a> {
    comparator: &'a PhoneticComparator,
}

impl<'a> WordOrderScorer<'a> {
    pub fn new(comparator: &'a PhoneticComparator) -> Self {
        Self { comparator }
    }

    pub fn score(&self, expected: &[String], recognized: &[String]) -> OrderBreakdown {
        let w1: Vec<String> = expected.iter().map(|w| clean_word(w)).filter(|w| !w.is_empty()).collect();
        let w2: Vec<String> = recognized.iter().map(|w| clean_word(w)).filter(|w| !w.is_empty()).collect();
        if w1.is_empty() || w2.is_empty() {
            return OrderBreakdown::default();
        }

        let position = self.position_similarity(&w1, &w2);
        let content = self.partitioned_similarity(&w1, &w2);
        let sequence = self.sequence_alignment(&w1, &w2);
        let combined = POSITION_WEIGHT * position + CONTENT_WEIGHT * content + SEQUENCE_WEIGHT * sequence;

        log::debug!(
            "order: position {position:.3} content {content:.3} sequence {sequence:.3} -> {combined:.3}"
        );

        OrderBreakdown {
            position,
            content,
            sequence,
            combined,
        }
    }

    fn word_similarity(&self, a: &str, b: &str) -> f64 {
        let code_a = self.comparator.encode(a);
        let code_b = self.comparator.encode(b);
        self.comparator
            .phonetic_similarity(code_a.primary(), code_b.primary())
    }

    /// Each expected word searches a window around its proportional position.
    /// Stop words search wider and are penalised less for drifting; a missing
    /// stop word still earns half credit, a missing content word none.
    fn position_similarity(&self, w1: &[String], w2: &[String]) -> f64 {
        let (len1, len2) = (w1.len(), w2.len());
        let shorter = len1.min(len2);
        let mut used = vec![false; len2];
        let mut total = 0.0;

        for (i, word) in w1.iter().enumerate() {
            let stop = is_stop_word(word);
            let expected_pos = (i as f64 / len1 as f64 * len2 as f64) as usize;
            let (window, max_penalty) = if stop {
                ((shorter / 2).max(3), 0.2)
            } else {
                ((shorter / 4).max(1), 0.4)
            };
            let start = expected_pos.saturating_sub(window);
            let end = (expected_pos + window).min(len2 - 1);

            let mut best = 0.0;
            let mut best_idx = None;
            for j in start..=end {
                if used[j] {
                    continue;
                }
                let mut similarity = if *word == w2[j] {
                    1.0
                } else {
                    match self.word_similarity(word, &w2[j]) {
                        s if s >= 0.8 => 0.9,
                        s if s >= 0.6 => 0.7,
                        _ => 0.0,
                    }
                };
                if similarity > 0.0 {
                    let drift = j.abs_diff(expected_pos) as f64 / window as f64;
                    similarity *= 1.0 - drift * max_penalty;
                }
                if similarity > best {
                    best = similarity;
                    best_idx = Some(j);
                }
            }

            match best_idx {
                Some(j) if best > 0.5 => {
                    used[j] = true;
                    total += best;
                }
                _ if stop => total += 0.5,
                _ => {}
            }
        }

        total / len1 as f64
    }

    fn partitioned_similarity(&self, w1: &[String], w2: &[String]) -> f64 {
        let codes = |words: &[String], want_stop: bool| -> Vec<String> {
            words
                .iter()
                .filter(|w| is_stop_word(w) == want_stop)
                .map(|w| self.comparator.encode(w))
                .filter(|code| !code.is_silent())
                .map(|code| code.primary().to_string())
                .collect()
        };

        let content1 = codes(w1, false);
        let content2 = codes(w2, false);
        let stop1 = codes(w1, true);
        let stop2 = codes(w2, true);

        let content = match (content1.is_empty(), content2.is_empty()) {
            (true, true) => 1.0,
            (false, false) => self.greedy_code_coverage(&content1, &content2),
            _ => 0.0,
        };
        let stop = match (stop1.is_empty(), stop2.is_empty()) {
            (true, true) => 1.0,
            (false, false) => self.greedy_code_coverage(&stop1, &stop2),
            _ => 0.7,
        };

        0.8 * content + 0.2 * stop
    }

    /// Mean of matched similarity over `codes1` and matched share of `codes2`.
    fn greedy_code_coverage(&self, codes1: &[String], codes2: &[String]) -> f64 {
        let mut used = vec![false; codes2.len()];
        let mut total = 0.0;
        let mut matched = 0usize;

        for code in codes1 {
            let mut best = 0.0;
            let mut best_idx = None;
            for (j, other) in codes2.iter().enumerate() {
                if used[j] {
                    continue;
                }
                let similarity = self.comparator.phonetic_similarity(code, other);
                if similarity > best {
                    best = similarity;
                    best_idx = Some(j);
                }
            }
            if let Some(j) = best_idx.filter(|_| best >= 0.6) {
                used[j] = true;
                matched += 1;
                total += best;
            }
        }

        (total / codes1.len() as f64 + matched as f64 / codes2.len() as f64) / 2.0
    }

    /// Alignment DP where skipping a stop word costs less than skipping a
    /// content word; normalised by the longer sequence.
    fn sequence_alignment(&self, w1: &[String], w2: &[String]) -> f64 {
        let (m, n) = (w1.len(), w2.len());
        let mut dp = vec![vec![0.0_f64; n + 1]; m + 1];
        let skip = |word: &str| if is_stop_word(word) { 0.8 } else { 0.3 };

        for i in 1..=m {
            for j in 1..=n {
                let (a, b) = (&w1[i - 1], &w2[j - 1]);
                let matched = if a == b {
                    1.0
                } else {
                    let similarity = self.word_similarity(a, b);
                    if similarity >= 0.7 {
                        similarity * 0.8
                    } else {
                        0.0
                    }
                };
                dp[i][j] = (dp[i - 1][j - 1] + matched)
                    .max(dp[i - 1][j] * skip(a))
                    .max(dp[i][j - 1] * skip(b));
            }
        }

        dp[m][n] / m.max(n) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetic::domain::similarity_cache::NoSimilarityCache;
    use crate::phonetic::infrastructure::speech_metaphone_encoder::SpeechMetaphoneEncoder;
    use approx::assert_relative_eq;

    fn comparator() -> PhoneticComparator {
        PhoneticComparator::new(Box::new(SpeechMetaphoneEncoder::new()), Box::new(NoSimilarityCache))
    }

    fn words(phrase: &str) -> Vec<String> {
        phrase.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_identical_order_scores_one() {
        let c = comparator();
        let scorer = WordOrderScorer::new(&c);
        let breakdown = scorer.score(&words("we ate lunch today"), &words("We ate lunch, today!"));
        assert_relative_eq!(breakdown.position, 1.0);
        assert_relative_eq!(breakdown.content, 1.0);
        assert_relative_eq!(breakdown.sequence, 1.0);
        assert_relative_eq!(breakdown.combined, 1.0);
    }

    #[test]
    fn test_empty_side_scores_zero() {
        let c = comparator();
        let scorer = WordOrderScorer::new(&c);
        assert_eq!(scorer.score(&words("banana"), &[]), OrderBreakdown::default());
        assert_eq!(scorer.score(&words("banana"), &words("42 !!")), OrderBreakdown::default());
    }

    #[test]
    fn test_skipped_stop_word_alignment() {
        let c = comparator();
        let scorer = WordOrderScorer::new(&c);
        let breakdown = scorer.score(&words("the cat"), &words("cat"));
        // "the" is skipped, "cat" aligns exactly: 1.0 over two words.
        assert_relative_eq!(breakdown.sequence, 0.5);
        // "the" encodes silent and drops out of the stop partition.
        assert_relative_eq!(breakdown.content, 1.0);
    }

    #[test]
    fn test_missing_content_word_lowers_score() {
        let c = comparator();
        let scorer = WordOrderScorer::new(&c);
        let full = scorer.score(&words("we ate lunch"), &words("we ate lunch"));
        let partial = scorer.score(&words("we ate lunch"), &words("we ate"));
        assert!(partial.combined < full.combined);
        assert!(partial.position < 1.0);
    }

    #[test]
    fn test_reordered_words_score_below_in_order() {
        let c = comparator();
        let scorer = WordOrderScorer::new(&c);
        let expected = words("monkeys climb tall green trees quickly");
        let in_order = scorer.score(&expected, &words("monkeys climb tall green trees quickly"));
        let reversed = scorer.score(&expected, &words("quickly trees green tall climb monkeys"));
        assert!(reversed.sequence < in_order.sequence);
        assert!(reversed.combined < in_order.combined);
    }
}
