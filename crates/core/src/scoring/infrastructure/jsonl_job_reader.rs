use std::path::Path;

use crate::scoring::batch_executor::ScoringJob;
use crate::shared::error::BatchError;

/// Reads scoring jobs stored one JSON object per line. Blank lines are
/// skipped; line numbers in errors are 1-based.
pub struct JsonlJobReader;

impl JsonlJobReader {
    pub fn read(path: &Path) -> Result<Vec<ScoringJob>, BatchError> {
        let text = std::fs::read_to_string(path).map_err(|source| BatchError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let jobs = Self::parse(&text)?;
        log::info!("Loaded {} jobs from {}", jobs.len(), path.display());
        Ok(jobs)
    }

    pub fn parse(text: &str) -> Result<Vec<ScoringJob>, BatchError> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|source| BatchError::Parse { line: i + 1, source })
            })
            .collect()
    }
}
