use crate::matching::domain::phonetic_comparator::PhoneticComparator;
use crate::phonetic::domain::phonetic_encoder::PhoneticEncoder;
use crate::phonetic::domain::similarity_cache::{NoSimilarityCache, SimilarityCache};
use crate::phonetic::infrastructure::lru_similarity_cache::LruSimilarityCache;
use crate::phonetic::infrastructure::soundex_encoder::SoundexEncoder;
use crate::phonetic::infrastructure::speech_metaphone_encoder::SpeechMetaphoneEncoder;
use crate::scoring::phrase_scorer::PhraseScorer;
use crate::scoring::scoring_config::ScoringConfig;
use crate::shared::error::ConfigError;

/// Phonetic encoding scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EncoderKind {
    #[default]
    Metaphone,
    Soundex,
}

pub fn create_encoder(kind: EncoderKind) -> Box<dyn PhoneticEncoder> {
    match kind {
        EncoderKind::Metaphone => Box::new(SpeechMetaphoneEncoder::new()),
        EncoderKind::Soundex => Box::new(SoundexEncoder::new()),
    }
}

pub fn create_cache(capacity: usize) -> Box<dyn SimilarityCache> {
    if capacity == 0 {
        Box::new(NoSimilarityCache)
    } else {
        Box::new(LruSimilarityCache::new(capacity))
    }
}

/// Builds a scorer with its own similarity cache sized from `config`.
pub fn create_scorer(kind: EncoderKind, config: ScoringConfig) -> Result<PhraseScorer, ConfigError> {
    log::info!(
        "Using {:?} encoder (cache_capacity={}, direct_corrections={})",
        kind,
        config.cache_capacity,
        config.direct_corrections
    );
    let comparator = PhoneticComparator::new(create_encoder(kind), create_cache(config.cache_capacity));
    PhraseScorer::new(comparator, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_encoder_by_kind() {
        assert_eq!(create_encoder(EncoderKind::Metaphone).name(), "metaphone");
        assert_eq!(create_encoder(EncoderKind::Soundex).name(), "soundex");
        assert_eq!(EncoderKind::default(), EncoderKind::Metaphone);
    }

    #[test]
    fn test_created_cache_memoizes() {
        let cache = create_cache(8);
        cache.insert("PNN0", "PN00", 0.75);
        assert_eq!(cache.get("PNN0", "PN00"), Some(0.75));
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let cache = create_cache(0);
        cache.insert("PNN0", "PN00", 0.75);
        assert_eq!(cache.get("PNN0", "PN00"), None);
    }

    #[test]
    fn test_created_scorer_works() {
        let scorer = create_scorer(EncoderKind::Metaphone, ScoringConfig::default()).unwrap();
        let result = scorer.analyze("we ate lunch", &["V8 lunch"], Some("eating"));
        assert!(result.accepted);
        assert_eq!(scorer.comparator().encoder_name(), "metaphone");
    }

    #[test]
    fn test_soundex_scorer_accepts_exact_phrase() {
        let scorer = create_scorer(EncoderKind::Soundex, ScoringConfig::default()).unwrap();
        let result = scorer.analyze("I ate a banana", &["I ate a banana"], None);
        assert!(result.accepted);
    }

    #[test]
    fn test_invalid_config_propagates() {
        let config = ScoringConfig {
            correction_threshold: 2.0,
            ..ScoringConfig::default()
        };
        assert!(create_scorer(EncoderKind::Metaphone, config).is_err());
    }
}
