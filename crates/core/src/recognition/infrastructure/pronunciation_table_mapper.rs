use std::collections::HashMap;

use crate::recognition::domain::result_mapper::{MappedResult, RecognizedText, ResultMapper};
use crate::shared::constants::SPEAK_CLEARLY_PROMPT;

/// What to return when an utterance matches no pronunciation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnmatchedPolicy {
    /// Ask the speaker to try again.
    #[default]
    Prompt,
    /// Echo the utterance uppercased.
    Uppercase,
}

/// Maps an utterance back to the table keys whose pronunciations it spells,
/// e.g. `"won"` to `"1"` for a table `{"1": ["one", "won"]}`.
#[derive(Clone, Debug, Default)]
pub struct PronunciationTableMapper {
    keys_by_pronunciation: HashMap<String, Vec<String>>,
    policy: UnmatchedPolicy,
}

impl PronunciationTableMapper {
    /// Keys keep the order the table lists them in.
    pub fn new<I, K, P, S>(table: I, policy: UnmatchedPolicy) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys_by_pronunciation: HashMap<String, Vec<String>> = HashMap::new();
        for (key, pronunciations) in table {
            let key = key.into();
            for pronunciation in pronunciations {
                let keys = keys_by_pronunciation
                    .entry(normalize(pronunciation.as_ref()))
                    .or_default();
                if !keys.contains(&key) {
                    keys.push(key.clone());
                }
            }
        }
        Self {
            keys_by_pronunciation,
            policy,
        }
    }

    pub fn lookup(&self, utterance: &str) -> Option<String> {
        self.keys_by_pronunciation
            .get(&normalize(utterance))
            .map(|keys| keys.join(", "))
    }

    pub fn map_text(&self, utterance: &str) -> String {
        if utterance.trim().is_empty() {
            return SPEAK_CLEARLY_PROMPT.to_string();
        }
        match (self.lookup(utterance), self.policy) {
            (Some(keys), _) => keys,
            (None, UnmatchedPolicy::Prompt) => SPEAK_CLEARLY_PROMPT.to_string(),
            (None, UnmatchedPolicy::Uppercase) => utterance.trim().to_uppercase(),
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl ResultMapper for PronunciationTableMapper {
    fn map(&self, recognized: &RecognizedText) -> MappedResult {
        MappedResult::PlainText(self.map_text(recognized.best().unwrap_or_default()))
    }
}
