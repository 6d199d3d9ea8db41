use serde::Serialize;

use crate::scoring::phrase_analysis::PhraseAnalysisResult;

/// Recognizer alternatives with their confidences, best first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognizedText {
    alternatives: Vec<(String, f64)>,
}

impl RecognizedText {
    pub fn new(alternatives: Vec<(String, f64)>) -> Self {
        Self { alternatives }
    }

    pub fn single(text: impl Into<String>) -> Self {
        Self::new(vec![(text.into(), 1.0)])
    }

    /// The top-ranked alternative.
    pub fn best(&self) -> Option<&str> {
        self.alternatives.first().map(|(text, _)| text.as_str())
    }

    pub fn texts(&self) -> Vec<&str> {
        self.alternatives.iter().map(|(text, _)| text.as_str()).collect()
    }

    pub fn alternatives(&self) -> &[(String, f64)] {
        &self.alternatives
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

/// A byte range of a paragraph to highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
}

/// Payload handed back to the caller for one recognition.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MappedResult {
    PlainText(String),
    DetailedAnalysis(PhraseAnalysisResult),
    Highlights { highlights: Vec<HighlightSpan> },
}

/// Turns raw recognizer alternatives into the payload a caller asked for.
///
/// This is a port; callers pick an implementation per recognition mode.
pub trait ResultMapper: Send + Sync {
    fn map(&self, recognized: &RecognizedText) -> MappedResult;
}
