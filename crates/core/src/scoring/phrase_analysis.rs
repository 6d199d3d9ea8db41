use serde::Serialize;

use crate::matching::domain::word_match::WordAnalysisResult;
use crate::matching::domain::word_order_scorer::OrderBreakdown;
use crate::shared::constants::{MODERATE_THRESHOLD, WEAK_THRESHOLD};

use super::scoring_config::ScoringConfig;

pub const NO_CANDIDATES_REASON: &str = "no recognized phrases provided";
pub const PERFECT_MATCH_REASON: &str = "perfect word match";
pub const SCORING_FAILED_REASON: &str = "scoring failed";

const STRONG_WORD_CONFIDENCE: f64 = 0.8;
const WEAK_WORD_CONFIDENCE: f64 = 0.6;

/// Verdict for an expected phrase against its best recognized candidate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseAnalysisResult {
    pub overall_similarity: f64,
    /// The expected phrase when the match is strong enough, else the best candidate.
    pub corrected_phrase: String,
    /// The expected phrase as given.
    pub original_phrase: String,
    pub word_analysis: Vec<WordAnalysisResult>,
    pub accepted: bool,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl PhraseAnalysisResult {
    pub fn no_candidates() -> Self {
        Self {
            overall_similarity: 0.0,
            corrected_phrase: String::new(),
            original_phrase: String::new(),
            word_analysis: Vec::new(),
            accepted: false,
            reason: NO_CANDIDATES_REASON.to_string(),
            breakdown: None,
        }
    }

    /// Rejection for a phrase whose scoring never completed.
    pub fn failed(expected: &str) -> Self {
        Self {
            original_phrase: expected.to_string(),
            reason: SCORING_FAILED_REASON.to_string(),
            ..Self::no_candidates()
        }
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary::from(self)
    }
}

/// The phrase-level signals behind a fused score.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub metaphone: f64,
    pub acoustic: f64,
    pub edit: f64,
    pub order: OrderBreakdown,
}

/// Reduced result form: the corrected phrase and its score.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResult {
    pub corrected_phrase: String,
    pub overall_similarity: f64,
}

impl From<&PhraseAnalysisResult> for CorrectionResult {
    fn from(result: &PhraseAnalysisResult) -> Self {
        Self {
            corrected_phrase: result.corrected_phrase.clone(),
            overall_similarity: result.overall_similarity,
        }
    }
}

/// Aggregate view over the recognized words of a result.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_words: usize,
    pub average_confidence: f64,
    pub average_phonetic_similarity: f64,
    pub strong_words: usize,
    pub weak_words: usize,
}

impl From<&PhraseAnalysisResult> for AnalysisSummary {
    fn from(result: &PhraseAnalysisResult) -> Self {
        let words = &result.word_analysis;
        if words.is_empty() {
            return Self::default();
        }
        let count = words.len() as f64;
        Self {
            total_words: words.len(),
            average_confidence: words.iter().map(|w| w.confidence).sum::<f64>() / count,
            average_phonetic_similarity: words
                .iter()
                .map(|w| w.phonetic_content_similarity)
                .sum::<f64>()
                / count,
            strong_words: words
                .iter()
                .filter(|w| w.confidence >= STRONG_WORD_CONFIDENCE)
                .count(),
            weak_words: words
                .iter()
                .filter(|w| w.confidence < WEAK_WORD_CONFIDENCE)
                .count(),
        }
    }
}

/// Human-readable band for a fused score.
pub fn reason_for(score: f64, config: &ScoringConfig) -> &'static str {
    if score >= config.excellent_threshold {
        "excellent phonetic match"
    } else if score >= config.accept_threshold {
        "good phonetic match"
    } else if score >= MODERATE_THRESHOLD {
        "moderate phonetic match below threshold"
    } else if score >= WEAK_THRESHOLD {
        "weak phonetic match"
    } else {
        "poor phonetic match"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn analysis(word: &str, confidence: f64, similarity: f64) -> WordAnalysisResult {
        WordAnalysisResult {
            recognized_word: word.into(),
            confidence,
            phonetic_content_similarity: similarity,
        }
    }

    #[rstest]
    #[case::excellent(0.97, "excellent phonetic match")]
    #[case::excellent_boundary(0.95, "excellent phonetic match")]
    #[case::good(0.91, "good phonetic match")]
    #[case::moderate(0.75, "moderate phonetic match below threshold")]
    #[case::weak(0.5, "weak phonetic match")]
    #[case::poor(0.0, "poor phonetic match")]
    fn test_reason_bands(#[case] score: f64, #[case] expected: &str) {
        assert_eq!(reason_for(score, &ScoringConfig::default()), expected);
    }

    #[test]
    fn test_no_candidates_result() {
        let result = PhraseAnalysisResult::no_candidates();
        assert_eq!(result.overall_similarity, 0.0);
        assert!(result.corrected_phrase.is_empty());
        assert!(!result.accepted);
        assert_eq!(result.reason, "no recognized phrases provided");
    }

    #[test]
    fn test_summary_counts_strong_and_weak_words() {
        let mut result = PhraseAnalysisResult::no_candidates();
        result.word_analysis = vec![
            analysis("we", 1.0, 1.0),
            analysis("ate", 0.7, 0.6),
            analysis("lunch", 0.4, 0.2),
        ];

        let summary = result.summary();
        assert_eq!(summary.total_words, 3);
        assert_eq!(summary.strong_words, 1);
        assert_eq!(summary.weak_words, 1);
        assert_relative_eq!(summary.average_confidence, 0.7, epsilon = 1e-12);
        assert_relative_eq!(summary.average_phonetic_similarity, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_summary_of_empty_analysis() {
        assert_eq!(
            AnalysisSummary::from(&PhraseAnalysisResult::no_candidates()),
            AnalysisSummary::default()
        );
    }

    #[test]
    fn test_correction_result_from_analysis() {
        let mut result = PhraseAnalysisResult::no_candidates();
        result.corrected_phrase = "we ate lunch".into();
        result.overall_similarity = 0.95;
        let reduced = CorrectionResult::from(&result);
        assert_eq!(reduced.corrected_phrase, "we ate lunch");
        assert_eq!(reduced.overall_similarity, 0.95);
    }

    #[test]
    fn test_serializes_wire_keys() {
        let json = serde_json::to_value(PhraseAnalysisResult::no_candidates()).unwrap();
        for key in [
            "overallSimilarity",
            "correctedPhrase",
            "originalPhrase",
            "wordAnalysis",
            "accepted",
            "reason",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json.get("breakdown").is_none());
    }
}
