use std::sync::Arc;

use crate::context::domain::context_label::ContextDetector;
use crate::recognition::domain::result_mapper::{MappedResult, RecognizedText, ResultMapper};
use crate::scoring::phrase_scorer::PhraseScorer;

/// Scores every alternative against a fixed expected phrase.
pub struct PhraseAnalysisMapper {
    scorer: Arc<PhraseScorer>,
    expected: String,
    context: String,
}

impl PhraseAnalysisMapper {
    /// Without an explicit label the context is detected from `expected`.
    pub fn new(scorer: Arc<PhraseScorer>, expected: impl Into<String>, context: Option<String>) -> Self {
        let expected = expected.into();
        let context = context.unwrap_or_else(|| ContextDetector::new().detect(&expected).to_string());
        Self {
            scorer,
            expected,
            context,
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

impl ResultMapper for PhraseAnalysisMapper {
    fn map(&self, recognized: &RecognizedText) -> MappedResult {
        let candidates = recognized.texts();
        MappedResult::DetailedAnalysis(self.scorer.analyze(
            &self.expected,
            &candidates,
            Some(&self.context),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::domain::phonetic_comparator::PhoneticComparator;
    use crate::phonetic::domain::similarity_cache::NoSimilarityCache;
    use crate::phonetic::infrastructure::speech_metaphone_encoder::SpeechMetaphoneEncoder;
    use crate::scoring::scoring_config::ScoringConfig;
    use approx::assert_relative_eq;

    fn scorer() -> Arc<PhraseScorer> {
        let comparator =
            PhoneticComparator::new(Box::new(SpeechMetaphoneEncoder::new()), Box::new(NoSimilarityCache));
        Arc::new(PhraseScorer::new(comparator, ScoringConfig::default()).unwrap())
    }

    #[test]
    fn test_detects_context_and_corrects() {
        let mapper = PhraseAnalysisMapper::new(scorer(), "we ate lunch", None);
        assert_eq!(mapper.context(), "eating");

        let MappedResult::DetailedAnalysis(result) = mapper.map(&RecognizedText::single("V8 lunch")) else {
            panic!("expected a detailed analysis");
        };
        assert!(result.accepted);
        assert_eq!(result.corrected_phrase, "we ate lunch");
    }

    #[test]
    fn test_explicit_context_overrides_detection() {
        let mapper = PhraseAnalysisMapper::new(scorer(), "we ate lunch", Some("general".into()));
        assert_eq!(mapper.context(), "general");
    }

    #[test]
    fn test_considers_every_alternative() {
        let mapper = PhraseAnalysisMapper::new(scorer(), "I ate a banana", None);
        let recognized = RecognizedText::new(vec![
            ("I ate a pumpkin".into(), 0.9),
            ("I ate a banana".into(), 0.5),
        ]);
        let MappedResult::DetailedAnalysis(result) = mapper.map(&recognized) else {
            panic!("expected a detailed analysis");
        };
        assert_relative_eq!(result.overall_similarity, 1.0);
        assert!(result.accepted);
    }

    #[test]
    fn test_nothing_recognized() {
        let mapper = PhraseAnalysisMapper::new(scorer(), "we ate lunch", None);
        let MappedResult::DetailedAnalysis(result) = mapper.map(&RecognizedText::default()) else {
            panic!("expected a detailed analysis");
        };
        assert_eq!(result.reason, "no recognized phrases provided");
    }
}
