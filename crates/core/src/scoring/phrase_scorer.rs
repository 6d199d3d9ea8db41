use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::context::domain::context_preprocessor::ContextPreprocessor;
use crate::matching::domain::compound_lexicon::CompoundLexicon;
use crate::matching::domain::phonetic_comparator::PhoneticComparator;
use crate::matching::domain::phrase_similarity::PhraseSimilarity;
use crate::matching::domain::pronunciation_patterns::PronunciationPatterns;
use crate::matching::domain::word_match::{WordAnalysisResult, WordMatchResult};
use crate::matching::domain::word_matcher::WordMatcher;
use crate::matching::domain::word_order_scorer::WordOrderScorer;
use crate::phonetic::domain::string_metrics::edit_similarity;
use crate::shared::constants::{
    DOMINANT_SIGNAL_THRESHOLD, FUSION_ACOUSTIC_WEIGHT, FUSION_METAPHONE_WEIGHT,
    FUSION_ORDER_WEIGHT,
};
use crate::shared::error::ConfigError;
use crate::shared::text::{clean_word, is_stop_word, tokenize};

use super::phrase_analysis::{
    reason_for, CorrectionResult, PhraseAnalysisResult, ScoreBreakdown, PERFECT_MATCH_REASON,
};
use super::score_reporter::{NullScoreReporter, ScoreReporter};
use super::scoring_config::ScoringConfig;

/// Everything computed for one recognized candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateScore {
    pub candidate: String,
    /// The candidate after context and direct-speech rewrites.
    pub preprocessed: String,
    pub score: f64,
    /// Every expected content word appeared verbatim.
    pub perfect: bool,
    pub word_matches: Vec<WordMatchResult>,
    pub word_analysis: Vec<WordAnalysisResult>,
    /// Present only when the fused signals decided the score.
    pub breakdown: Option<ScoreBreakdown>,
}

/// Scores recognized candidates against an expected phrase and picks the best.
///
/// One scorer owns its similarity cache; share it behind an `Arc` to reuse
/// the cache across threads.
pub struct PhraseScorer {
    comparator: PhoneticComparator,
    patterns: PronunciationPatterns,
    lexicon: CompoundLexicon,
    preprocessor: ContextPreprocessor,
    config: ScoringConfig,
    reporter: Mutex<Box<dyn ScoreReporter>>,
}

impl PhraseScorer {
    pub fn new(comparator: PhoneticComparator, config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            comparator,
            patterns: PronunciationPatterns::default(),
            lexicon: CompoundLexicon::default(),
            preprocessor: ContextPreprocessor::new(config.direct_corrections),
            config,
            reporter: Mutex::new(Box::new(NullScoreReporter)),
        })
    }

    pub fn with_reporter(mut self, reporter: Box<dyn ScoreReporter>) -> Self {
        self.reporter = Mutex::new(reporter);
        self
    }

    pub fn with_patterns(mut self, patterns: PronunciationPatterns) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_lexicon(mut self, lexicon: CompoundLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn with_preprocessor(mut self, preprocessor: ContextPreprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn comparator(&self) -> &PhoneticComparator {
        &self.comparator
    }

    /// Scores every candidate and reports on the best one. Ties keep the
    /// earliest candidate.
    pub fn analyze<S: AsRef<str>>(
        &self,
        expected: &str,
        candidates: &[S],
        context: Option<&str>,
    ) -> PhraseAnalysisResult {
        let mut best: Option<CandidateScore> = None;
        for candidate in candidates {
            let scored = self.score_candidate(expected, candidate.as_ref(), context);
            if best.as_ref().map_or(true, |current| scored.score > current.score) {
                best = Some(scored);
            }
        }

        let Some(best) = best else {
            self.report(|r| r.info(&format!("'{expected}': no recognized phrases provided")));
            return PhraseAnalysisResult::no_candidates();
        };

        let score = best.score;
        let accepted = score >= self.config.accept_threshold;
        let corrected_phrase = if score >= self.config.correction_threshold {
            expected.to_string()
        } else {
            best.candidate.clone()
        };
        let reason = if best.perfect {
            PERFECT_MATCH_REASON
        } else {
            reason_for(score, &self.config)
        };

        self.report(|r| {
            r.metric("best", score);
            r.info(&format!(
                "'{expected}' vs '{}': {score:.3} ({reason}, {})",
                best.candidate,
                if accepted { "accepted" } else { "rejected" }
            ));
        });

        PhraseAnalysisResult {
            overall_similarity: score,
            corrected_phrase,
            original_phrase: expected.to_string(),
            word_analysis: best.word_analysis,
            accepted,
            reason: reason.to_string(),
            breakdown: best.breakdown,
        }
    }

    /// Reduced form of [`PhraseScorer::analyze`].
    pub fn correct<S: AsRef<str>>(
        &self,
        expected: &str,
        candidates: &[S],
        context: Option<&str>,
    ) -> CorrectionResult {
        CorrectionResult::from(&self.analyze(expected, candidates, context))
    }

    /// Preprocess, match word by word, gate, then fuse the phrase signals.
    pub fn score_candidate(&self, expected: &str, candidate: &str, context: Option<&str>) -> CandidateScore {
        let preprocessed = self.preprocessor.preprocess(candidate, context);
        let expected_words = tokenize(expected);
        let recognized_words = tokenize(&preprocessed);

        let mut scored = CandidateScore {
            candidate: candidate.to_string(),
            preprocessed,
            score: 0.0,
            perfect: false,
            word_matches: Vec::new(),
            word_analysis: Vec::new(),
            breakdown: None,
        };

        if expected_words.is_empty() || recognized_words.is_empty() {
            if expected_words.is_empty() && recognized_words.is_empty() {
                scored.score = 1.0;
            }
            self.report(|r| r.metric("final", scored.score));
            return scored;
        }

        let matcher = WordMatcher::new(&self.comparator, &self.patterns, self.config.word_thresholds());
        let matches = matcher.match_words(&expected_words, &recognized_words);
        scored.word_analysis = matcher.analyze_recognized(&expected_words, &recognized_words, &matches);
        self.report(|r| matches.iter().for_each(|m| r.word(m)));
        scored.word_matches = matches;

        if is_perfect_match(&expected_words, &recognized_words) {
            for analysis in &mut scored.word_analysis {
                analysis.confidence = 1.0;
                analysis.phonetic_content_similarity = 1.0;
            }
            scored.score = 1.0;
            scored.perfect = true;
            self.report(|r| r.metric("final", 1.0));
            return scored;
        }

        if let Some(failed) = scored.word_matches.iter().find(|m| m.fails_gate()) {
            self.report(|r| {
                r.info(&format!(
                    "'{candidate}' rejected: '{}' scored {:.3} below {:.2}",
                    failed.word, failed.best_score, failed.threshold
                ));
                r.metric("final", 0.0);
            });
            return scored;
        }

        let signals = PhraseSimilarity::new(&self.comparator, &self.lexicon);
        let metaphone = signals.metaphone_similarity(&expected_words, &recognized_words);
        let acoustic = signals.acoustic_similarity(&expected_words, &recognized_words);
        let edit = edit_similarity(&expected.to_lowercase(), &scored.preprocessed.to_lowercase());
        let order = WordOrderScorer::new(&self.comparator).score(&expected_words, &recognized_words);

        scored.score = fuse(metaphone, acoustic, order.combined);
        self.report(|r| {
            r.metric("metaphone", metaphone);
            r.metric("acoustic", acoustic);
            r.metric("edit", edit);
            r.metric("order", order.combined);
            r.metric("final", scored.score);
        });
        scored.breakdown = Some(ScoreBreakdown {
            metaphone,
            acoustic,
            edit,
            order,
        });
        scored
    }

    /// Emits the reporter's summary.
    pub fn report_summary(&self) {
        let reporter = self.reporter.lock().unwrap_or_else(PoisonError::into_inner);
        reporter.summary();
    }

    fn report<F: FnOnce(&mut dyn ScoreReporter)>(&self, f: F) {
        let mut reporter = self.reporter.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut **reporter);
    }
}

/// A dominant signal wins outright; otherwise order carries half the weight.
fn fuse(metaphone: f64, acoustic: f64, order: f64) -> f64 {
    let fused = if acoustic > DOMINANT_SIGNAL_THRESHOLD {
        acoustic
    } else if metaphone > DOMINANT_SIGNAL_THRESHOLD {
        metaphone
    } else {
        FUSION_METAPHONE_WEIGHT * metaphone
            + FUSION_ACOUSTIC_WEIGHT * acoustic
            + FUSION_ORDER_WEIGHT * order
    };
    fused.clamp(0.0, 1.0)
}

/// Every expected content word (every word, if all are stop words) appears
/// among the recognized tokens after cleaning.
fn is_perfect_match(expected: &[String], recognized: &[String]) -> bool {
    let cleaned: Vec<String> = expected
        .iter()
        .map(|w| clean_word(w))
        .filter(|w| !w.is_empty())
        .collect();
    let content: Vec<&String> = cleaned.iter().filter(|w| !is_stop_word(w)).collect();
    let required: Vec<&String> = if content.is_empty() {
        cleaned.iter().collect()
    } else {
        content
    };
    if required.is_empty() {
        return false;
    }

    let available: HashSet<String> = recognized.iter().map(|w| clean_word(w)).collect();
    required.iter().all(|w| available.contains(*w))
}
