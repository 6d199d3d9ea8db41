use crate::recognition::domain::result_mapper::{MappedResult, RecognizedText, ResultMapper};

/// Returns the top alternative unchanged.
pub struct PassthroughMapper;

impl ResultMapper for PassthroughMapper {
    fn map(&self, recognized: &RecognizedText) -> MappedResult {
        MappedResult::PlainText(recognized.best().unwrap_or_default().to_string())
    }
}
