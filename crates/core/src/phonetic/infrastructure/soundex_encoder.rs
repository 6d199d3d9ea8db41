use rphonetic::{Encoder, Soundex};

use crate::phonetic::domain::phonetic_code::PhoneticCode;
use crate::phonetic::domain::phonetic_encoder::PhoneticEncoder;

/// Lowercase rewrites folding accent-driven swaps (`v`/`w`, `z`/`j`, aspirated stops).
const ACCENT_REWRITES: &[(&str, &str)] = &[
    ("ph", "f"),
    ("v", "b"),
    ("z", "j"),
    ("th", "t"),
    ("w", "v"),
    ("sh", "s"),
    ("kh", "k"),
    ("gh", "g"),
    ("ch", "c"),
];

/// American Soundex over accent-normalised words.
#[derive(Default)]
pub struct SoundexEncoder {
    soundex: Soundex,
}

impl SoundexEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhoneticEncoder for SoundexEncoder {
    fn encode(&self, word: &str) -> PhoneticCode {
        let mut normalized = word.to_lowercase();
        for &(from, to) in ACCENT_REWRITES {
            normalized = normalized.replace(from, to);
        }
        let letters: String = normalized
            .chars()
            .filter(char::is_ascii_alphabetic)
            .collect::<String>()
            .to_uppercase();

        if letters.is_empty() {
            return PhoneticCode::empty();
        }

        let code = self.soundex.encode(&letters);
        PhoneticCode::from_raw(&code, &code)
    }

    fn name(&self) -> &'static str {
        "soundex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn encode(word: &str) -> String {
        SoundexEncoder::new().encode(word).primary().to_string()
    }

    #[rstest]
    #[case::robert("robert", "R163")]
    #[case::short_word("lee", "L000")]
    #[case::repeated_codes("pfister", "P236")]
    #[case::ph_as_f("phone", "F500")]
    #[case::w_as_v("water", "V360")]
    #[case::v_as_b("very", "B600")]
    #[case::z_as_j("zoo", "J000")]
    #[case::th_as_t("think", "T520")]
    #[case::punctuation("o'neil", "O540")]
    #[case::z_as_j_inside("tymczak", "T522")]
    #[case::sh_as_s("ashcraft", "A261")]
    fn test_encode(#[case] word: &str, #[case] expected: &str) {
        assert_eq!(encode(word), expected);
    }

    #[test]
    fn test_empty_input() {
        assert!(SoundexEncoder::new().encode("").is_empty());
        assert!(SoundexEncoder::new().encode("123").is_empty());
    }

    #[test]
    fn test_vowel_separates_repeated_codes() {
        // T and D share a digit, the vowel between them keeps both
        assert_eq!(encode("tad"), "T300");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(encode("rébert"), "R163");
    }
}
