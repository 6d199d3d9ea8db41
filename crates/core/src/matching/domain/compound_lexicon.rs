/// Compound words and the two parts a recognizer tends to split them into.
const DEFAULT_COMPOUNDS: &[(&str, &str, &str)] = &[
    ("sunday", "sun", "day"),
    ("monday", "mon", "day"),
    ("tuesday", "tues", "day"),
    ("wednesday", "wed", "day"),
    ("thursday", "thurs", "day"),
    ("friday", "fri", "day"),
    ("saturday", "sat", "day"),
    ("something", "some", "thing"),
    ("everyone", "every", "one"),
    ("someone", "some", "one"),
    ("anybody", "any", "body"),
    ("classroom", "class", "room"),
    ("playground", "play", "ground"),
    ("newspaper", "news", "paper"),
    ("cannot", "can", "not"),
    ("will not", "will", "not"),
];

/// Words shorter than this are never treated as compounds by the generic rule.
const MIN_GENERIC_COMPOUND_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundEntry {
    pub compound: String,
    pub first: String,
    pub second: String,
}

/// Replaceable table of compound words, used to decide whether two
/// recognized tokens may stand in for one expected word.
#[derive(Debug, Clone)]
pub struct CompoundLexicon {
    entries: Vec<CompoundEntry>,
}

impl CompoundLexicon {
    pub fn new(entries: Vec<CompoundEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CompoundEntry] {
        &self.entries
    }

    /// True when `first` + `second` plausibly spell out `single`.
    ///
    /// A table entry matches when the compound and `single` contain one
    /// another and each part overlaps the corresponding token the same way.
    /// Otherwise falls back to a length and prefix-overlap heuristic.
    pub fn is_likely_compound(&self, single: &str, first: &str, second: &str) -> bool {
        let single = single.to_lowercase();
        let first = first.to_lowercase();
        let second = second.to_lowercase();

        let listed = self.entries.iter().any(|entry| {
            mutually_contains(&single, &entry.compound)
                && mutually_contains(&first, &entry.first)
                && mutually_contains(&second, &entry.second)
        });
        if listed {
            return true;
        }

        let single_len = single.chars().count();
        let combined_len = first.chars().count() + second.chars().count();
        shares_prefix(&single, &first)
            && shares_prefix(&single, &second)
            && single_len >= MIN_GENERIC_COMPOUND_LEN
            && combined_len as f64 >= single_len as f64 * 0.8
    }
}

impl Default for CompoundLexicon {
    fn default() -> Self {
        Self::new(
            DEFAULT_COMPOUNDS
                .iter()
                .map(|&(compound, first, second)| CompoundEntry {
                    compound: compound.to_string(),
                    first: first.to_string(),
                    second: second.to_string(),
                })
                .collect(),
        )
    }
}

fn mutually_contains(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Either word contains the other's first two characters.
fn shares_prefix(a: &str, b: &str) -> bool {
    let head = |s: &str| s.chars().take(2).collect::<String>();
    a.contains(&head(b)) || b.contains(&head(a))
}

/// Vowel-group count with a silent trailing `e`, never below one.
pub fn syllable_count(word: &str) -> usize {
    let mut count = 0;
    let mut previous_was_vowel = false;
    for c in word.chars() {
        let is_vowel = matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u');
        if is_vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = is_vowel;
    }
    if count > 1 && word.to_lowercase().ends_with('e') {
        count -= 1;
    }
    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::weekday("sunday", "sun", "day")]
    #[case::compound_noun("playground", "play", "ground")]
    #[case::partial_tokens("something", "some", "thin")]
    #[case::case_insensitive("Classroom", "CLASS", "room")]
    fn test_listed_compounds(#[case] single: &str, #[case] first: &str, #[case] second: &str) {
        assert!(CompoundLexicon::default().is_likely_compound(single, first, second));
    }

    #[test]
    fn test_generic_rule_accepts_unlisted_compound() {
        // "ra" and "bo" both appear in "rainbow"; 4 + 3 letters cover it
        assert!(CompoundLexicon::default().is_likely_compound("rainbow", "rain", "bow"));
    }

    #[rstest]
    #[case::too_short("cat", "ca", "at")]
    #[case::unrelated_parts("banana", "apple", "pie")]
    #[case::parts_too_short("sunflower", "su", "fl")]
    fn test_rejects_non_compounds(#[case] single: &str, #[case] first: &str, #[case] second: &str) {
        assert!(!CompoundLexicon::default().is_likely_compound(single, first, second));
    }

    #[test]
    fn test_empty_lexicon_uses_generic_rule_only() {
        let lexicon = CompoundLexicon::new(Vec::new());
        assert!(!lexicon.is_likely_compound("classroom", "cl", "room"));
        assert!(CompoundLexicon::default().is_likely_compound("classroom", "cl", "room"));
        assert!(lexicon.is_likely_compound("rainbow", "rain", "bow"));
    }

    #[rstest]
    #[case::single("cat", 1)]
    #[case::three("banana", 3)]
    #[case::silent_e("cake", 1)]
    #[case::lone_e("the", 1)]
    #[case::vowel_group("queue", 1)]
    #[case::no_vowels("rhythm", 1)]
    #[case::compound("playground", 2)]
    fn test_syllable_count(#[case] word: &str, #[case] expected: usize) {
        assert_eq!(syllable_count(word), expected);
    }
}
