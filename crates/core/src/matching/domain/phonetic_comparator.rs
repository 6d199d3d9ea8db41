use std::collections::HashSet;

use crate::phonetic::domain::acoustic_model::AcousticModel;
use crate::phonetic::domain::phonetic_code::PhoneticCode;
use crate::phonetic::domain::phonetic_encoder::PhoneticEncoder;
use crate::phonetic::domain::similarity_cache::SimilarityCache;

/// Suffix pairs that recognizers swap at word endings.
const ENDING_PATTERNS: &[(&str, &[&str])] = &[
    ("MS", &["MZ", "NS", "NZ"]),
    ("PS", &["S", "FS", "BS"]),
    ("MP", &["M", "NP", "MB"]),
    ("ST", &["S", "T", "SD"]),
    ("NT", &["N", "ND", "MT"]),
];

const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

const PHONETIC_WEIGHT: f64 = 0.7;
const ACOUSTIC_WEIGHT: f64 = 0.3;

/// Compares words and phonetic codes by how they sound.
///
/// Bundles the encoder, the acoustic confusion model and the memo of
/// code-pair similarities, so one instance can be shared by every scorer
/// that needs phonetic distance.
pub struct PhoneticComparator {
    encoder: Box<dyn PhoneticEncoder>,
    acoustic: AcousticModel,
    cache: Box<dyn SimilarityCache>,
}

impl PhoneticComparator {
    pub fn new(encoder: Box<dyn PhoneticEncoder>, cache: Box<dyn SimilarityCache>) -> Self {
        Self {
            encoder,
            acoustic: AcousticModel::new(),
            cache,
        }
    }

    pub fn encode(&self, word: &str) -> PhoneticCode {
        self.encoder.encode(word)
    }

    pub fn encoder_name(&self) -> &'static str {
        self.encoder.name()
    }

    pub fn acoustic_model(&self) -> &AcousticModel {
        &self.acoustic
    }

    /// Best bonus-adjusted edit similarity over all acoustic variants of
    /// both codes. Memoized by ordered code pair.
    pub fn phonetic_similarity(&self, code1: &str, code2: &str) -> f64 {
        if let Some(cached) = self.cache.get(code1, code2) {
            return cached;
        }
        if code1.is_empty() && code2.is_empty() {
            return 1.0;
        }
        if code1.is_empty() || code2.is_empty() {
            return 0.0;
        }
        if code1 == code2 {
            return 1.0;
        }

        let variants1 = self.acoustic.expand_variants(&code1.to_uppercase());
        let variants2 = self.acoustic.expand_variants(&code2.to_uppercase());

        let mut best = 0.0_f64;
        for v1 in &variants1 {
            for v2 in &variants2 {
                best = best.max(base_phonetic_score(v1, v2));
            }
        }

        self.cache.insert(code1, code2, best);
        best
    }

    /// Edit similarity plus credit for acoustically close symbols, swapped
    /// endings and shared vowels.
    pub fn acoustic_code_similarity(&self, code1: &str, code2: &str) -> f64 {
        if code1 == code2 {
            return 1.0;
        }
        if code1.is_empty() || code2.is_empty() {
            return 0.0;
        }

        let base = edit_ratio(code1, code2);

        let mut bonus = 0.0;
        let mut buf1 = [0u8; 4];
        let mut buf2 = [0u8; 4];
        for c1 in code1.chars() {
            let s1: &str = c1.encode_utf8(&mut buf1);
            for c2 in code2.chars() {
                if self.acoustic.are_similar(s1, c2.encode_utf8(&mut buf2)) {
                    bonus += 0.1;
                }
            }
        }
        bonus += pattern_bonus(code1, code2);

        (base + bonus * 0.3).min(1.0)
    }

    pub fn combined_similarity(&self, code1: &str, code2: &str) -> f64 {
        PHONETIC_WEIGHT * self.phonetic_similarity(code1, code2)
            + ACOUSTIC_WEIGHT * self.acoustic_code_similarity(code1, code2)
    }

    /// Acoustic code similarity between the encodings of two words.
    pub fn word_acoustic_similarity(&self, word1: &str, word2: &str) -> f64 {
        let code1 = self.encode(word1);
        let code2 = self.encode(word2);
        self.acoustic_code_similarity(code1.primary(), code2.primary())
    }
}

fn edit_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

fn base_phonetic_score(code1: &str, code2: &str) -> f64 {
    let base = edit_ratio(code1, code2);

    let start = if code1.chars().next() == code2.chars().next() { 0.15 } else { 0.0 };
    let end = if code1.chars().last() == code2.chars().last() { 0.1 } else { 0.0 };

    let (len1, len2) = (code1.chars().count(), code2.chars().count());
    let (longer, shorter, shorter_len) = if len1 > len2 {
        (code1, code2, len2)
    } else {
        (code2, code1, len1)
    };
    let containment = if shorter_len >= 2 && longer.contains(shorter) { 0.2 } else { 0.0 };

    let overlap = if len1.abs_diff(len2) <= 1 {
        let set1: HashSet<char> = code1.chars().collect();
        let set2: HashSet<char> = code2.chars().collect();
        let union = set1.union(&set2).count();
        if union == 0 {
            0.0
        } else {
            set1.intersection(&set2).count() as f64 / union as f64 * 0.1
        }
    } else {
        0.0
    };

    (base + start + end + containment + overlap).min(1.0)
}

fn pattern_bonus(code1: &str, code2: &str) -> f64 {
    let mut bonus = 0.0;
    for &(pattern, alternatives) in ENDING_PATTERNS {
        if code1.ends_with(pattern) && alternatives.iter().any(|alt| code2.ends_with(alt)) {
            bonus += 0.2;
        }
        if code2.ends_with(pattern) && alternatives.iter().any(|alt| code1.ends_with(alt)) {
            bonus += 0.2;
        }
    }
    for vowel in VOWELS {
        if code1.contains(vowel) && code2.contains(vowel) {
            bonus += 0.05;
        }
    }
    bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetic::domain::similarity_cache::NoSimilarityCache;
    use crate::phonetic::infrastructure::speech_metaphone_encoder::SpeechMetaphoneEncoder;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingCache {
        entries: Arc<Mutex<HashMap<(String, String), f64>>>,
    }

    impl SimilarityCache for RecordingCache {
        fn get(&self, a: &str, b: &str) -> Option<f64> {
            self.entries
                .lock()
                .unwrap()
                .get(&(a.to_string(), b.to_string()))
                .copied()
        }

        fn insert(&self, a: &str, b: &str, value: f64) {
            self.entries
                .lock()
                .unwrap()
                .insert((a.to_string(), b.to_string()), value);
        }
    }

    fn comparator() -> PhoneticComparator {
        PhoneticComparator::new(Box::new(SpeechMetaphoneEncoder::new()), Box::new(NoSimilarityCache))
    }

    #[rstest]
    #[case::both_empty("", "", 1.0)]
    #[case::left_empty("", "PN00", 0.0)]
    #[case::right_empty("PN00", "", 0.0)]
    #[case::equal("PNN0", "PNN0", 1.0)]
    #[case::one_symbol_apart("PNN0", "PN00", 1.0)]
    fn test_phonetic_similarity(#[case] a: &str, #[case] b: &str, #[case] expected: f64) {
        assert_relative_eq!(comparator().phonetic_similarity(a, b), expected);
    }

    #[rstest]
    #[case::both_empty("", "", 1.0)]
    #[case::one_edit("PNN0", "PN00", 0.75)]
    #[case::disjoint("KT", "PL", 0.0)]
    fn test_edit_ratio(#[case] a: &str, #[case] b: &str, #[case] expected: f64) {
        assert_relative_eq!(edit_ratio(a, b), expected);
    }

    #[test]
    fn test_phonetic_similarity_is_memoized() {
        let cache = RecordingCache::default();
        let comparator =
            PhoneticComparator::new(Box::new(SpeechMetaphoneEncoder::new()), Box::new(cache.clone()));

        let first = comparator.phonetic_similarity("KT00", "PT00");
        assert_eq!(cache.entries.lock().unwrap().len(), 1);

        cache
            .entries
            .lock()
            .unwrap()
            .insert(("KT00".to_string(), "PT00".to_string()), 0.42);
        assert_relative_eq!(comparator.phonetic_similarity("KT00", "PT00"), 0.42);
        assert!(first > 0.0);
    }

    #[test]
    fn test_dissimilar_codes_score_low() {
        let score = comparator().phonetic_similarity("PNN0", "APPL");
        assert!(score < 0.5, "score = {score}");
    }

    #[rstest]
    #[case::equal("PN00", "PN00", 1.0)]
    #[case::left_empty("", "PN00", 0.0)]
    #[case::right_empty("PN00", "", 0.0)]
    fn test_acoustic_code_similarity_edges(#[case] a: &str, #[case] b: &str, #[case] expected: f64) {
        assert_relative_eq!(comparator().acoustic_code_similarity(a, b), expected);
    }

    #[test]
    fn test_acoustic_code_similarity_rewards_confusable_symbols() {
        let c = comparator();
        // P/B are confusable, P/L are not.
        assert!(c.acoustic_code_similarity("PT", "BT") > c.acoustic_code_similarity("PT", "LT"));
    }

    #[test]
    fn test_pattern_bonus_for_swapped_ending() {
        assert_relative_eq!(pattern_bonus("TMS", "TNS"), 0.2);
    }

    #[test]
    fn test_pattern_bonus_counts_shared_vowels() {
        assert_relative_eq!(pattern_bonus("AMP", "AM"), 0.25);
    }

    #[test]
    fn test_base_score_containment_bonus() {
        // Two deletions out of four, no edge matches, "PN" contained
        assert_relative_eq!(base_phonetic_score("APNT", "PN"), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_combined_similarity_weights() {
        let c = comparator();
        let expected = 0.7 * c.phonetic_similarity("KT00", "PT00")
            + 0.3 * c.acoustic_code_similarity("KT00", "PT00");
        assert_relative_eq!(c.combined_similarity("KT00", "PT00"), expected);
    }

    #[test]
    fn test_word_acoustic_similarity_identical_words() {
        assert_relative_eq!(comparator().word_acoustic_similarity("banana", "banana"), 1.0);
    }

    proptest! {
        #[test]
        fn prop_similarities_stay_in_unit_range(a in "[A-Z0]{0,4}", b in "[A-Z0]{0,4}") {
            let c = comparator();
            let phonetic = c.phonetic_similarity(&a, &b);
            let acoustic = c.acoustic_code_similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&phonetic));
            prop_assert!((0.0..=1.0).contains(&acoustic));
        }
    }
}
