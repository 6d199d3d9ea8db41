use super::constants::STOP_WORDS;

/// Splits a phrase on whitespace, keeping tokens verbatim.
pub fn tokenize(phrase: &str) -> Vec<String> {
    phrase.split_whitespace().map(str::to_string).collect()
}

/// Lowercases a word and drops every non-letter.
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Tokenizes and cleans a phrase, dropping tokens that clean to nothing.
pub fn clean_tokens(phrase: &str) -> Vec<String> {
    phrase
        .split_whitespace()
        .map(clean_word)
        .filter(|w| !w.is_empty())
        .collect()
}

pub fn is_stop_word(word: &str) -> bool {
    let cleaned = clean_word(word);
    STOP_WORDS.contains(&cleaned.as_str())
}
