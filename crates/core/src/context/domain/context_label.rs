use std::fmt;

use serde::Serialize;

use crate::shared::text::clean_tokens;

const EATING_WORDS: &[&str] = &[
    "ate", "eat", "food", "banana", "apple", "lunch", "dinner", "breakfast",
];
const MOVEMENT_WORDS: &[&str] = &["went", "go", "walk", "run"];
const GROUP_WORDS: &[&str] = &["we", "us", "our"];

/// Coarse topic of an expected phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextLabel {
    Eating,
    Movement,
    Group,
    General,
}

impl ContextLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextLabel::Eating => "eating",
            ContextLabel::Movement => "movement",
            ContextLabel::Group => "group",
            ContextLabel::General => "general",
        }
    }
}

impl fmt::Display for ContextLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword classifier over whole words; the first matching group wins
/// (eating, then movement, then group).
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextDetector;

impl ContextDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, sentence: &str) -> ContextLabel {
        let tokens = clean_tokens(sentence);
        let has_any = |keywords: &[&str]| tokens.iter().any(|t| keywords.contains(&t.as_str()));

        let label = if has_any(EATING_WORDS) {
            ContextLabel::Eating
        } else if has_any(MOVEMENT_WORDS) {
            ContextLabel::Movement
        } else if has_any(GROUP_WORDS) {
            ContextLabel::Group
        } else {
            ContextLabel::General
        };
        log::debug!("context for '{sentence}': {label}");
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::eating("I ate a banana", ContextLabel::Eating)]
    #[case::eating_beats_group("We ate lunch", ContextLabel::Eating)]
    #[case::movement("They went home", ContextLabel::Movement)]
    #[case::movement_beats_group("We walk to school", ContextLabel::Movement)]
    #[case::group("Our dog is big", ContextLabel::Group)]
    #[case::general("The sky is blue", ContextLabel::General)]
    #[case::punctuation_and_case("LUNCH!", ContextLabel::Eating)]
    #[case::whole_words_only("The weather is great", ContextLabel::General)]
    #[case::empty("", ContextLabel::General)]
    fn test_detect(#[case] sentence: &str, #[case] expected: ContextLabel) {
        assert_eq!(ContextDetector::new().detect(sentence), expected);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(ContextLabel::Eating.to_string(), "eating");
        assert_eq!(ContextLabel::General.as_str(), "general");
    }

    #[test]
    fn test_label_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ContextLabel::Movement).unwrap(), "\"movement\"");
    }
}
