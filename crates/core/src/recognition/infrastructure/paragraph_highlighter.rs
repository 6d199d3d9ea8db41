use std::collections::HashMap;

use crate::recognition::domain::result_mapper::{
    HighlightSpan, MappedResult, RecognizedText, ResultMapper,
};

/// Marks the words of a paragraph that a reader has spoken.
///
/// Paragraph words keep their punctuation; a spoken word highlights the next
/// occurrence of a case-insensitively equal paragraph word after the most
/// recent highlight.
#[derive(Clone, Debug)]
pub struct ParagraphHighlighter {
    paragraph: String,
    words: Vec<String>,
    positions: HashMap<String, Vec<usize>>,
}

impl ParagraphHighlighter {
    pub fn new(paragraph: impl Into<String>) -> Self {
        let paragraph = paragraph.into();
        let words: Vec<String> = paragraph.split_whitespace().map(str::to_string).collect();
        let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, word) in words.iter().enumerate() {
            positions.entry(word.to_lowercase()).or_default().push(i);
        }
        Self {
            paragraph,
            words,
            positions,
        }
    }

    pub fn paragraph(&self) -> &str {
        &self.paragraph
    }

    /// Byte spans into the paragraph, sorted by start.
    pub fn highlight(&self, spoken: &str) -> Vec<HighlightSpan> {
        let mut spans: Vec<HighlightSpan> = Vec::new();

        for spoken_word in spoken.to_lowercase().split_whitespace() {
            let Some(indices) = self.positions.get(spoken_word) else {
                continue;
            };
            let from = spans.last().map_or(0, |span| span.end);
            let rest = &self.paragraph[from..];

            for &i in indices {
                let word = &self.words[i];
                if let Some(offset) = rest.find(word.as_str()) {
                    let start = from + offset;
                    spans.push(HighlightSpan {
                        start,
                        end: start + word.len(),
                    });
                    break;
                }
            }
        }

        spans.sort_by_key(|span| span.start);
        spans
    }
}

impl ResultMapper for ParagraphHighlighter {
    fn map(&self, recognized: &RecognizedText) -> MappedResult {
        MappedResult::Highlights {
            highlights: self.highlight(recognized.best().unwrap_or_default()),
        }
    }
}
