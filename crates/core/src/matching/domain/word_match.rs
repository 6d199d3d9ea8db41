use serde::Serialize;

/// Match verdict for one expected word.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordMatchResult {
    pub word: String,
    pub phonetic_code: String,
    pub is_stop_word: bool,
    pub is_metaphone_zero: bool,
    /// Space-joined recognized tokens of the winning 1-3 token window.
    pub best_match: Option<String>,
    /// Recognized token indices consumed by `best_match`.
    #[serde(skip)]
    pub matched_indices: Vec<usize>,
    pub best_score: f64,
    pub threshold: f64,
    pub meets_threshold: bool,
    pub confidence: f64,
    pub phonetic_content_similarity: f64,
}

impl WordMatchResult {
    /// Content words must clear their threshold for the phrase to pass.
    pub fn is_gated(&self) -> bool {
        !self.is_stop_word && !self.is_metaphone_zero
    }

    pub fn fails_gate(&self) -> bool {
        self.is_gated() && !self.meets_threshold
    }
}

/// Reporting view of one recognized token.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordAnalysisResult {
    pub recognized_word: String,
    pub confidence: f64,
    pub phonetic_content_similarity: f64,
}
