use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::domain::context_label::ContextDetector;

use super::phrase_analysis::{AnalysisSummary, PhraseAnalysisResult};
use super::phrase_scorer::PhraseScorer;

/// One expected phrase with its recognized candidates.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ScoringJob {
    #[serde(default)]
    pub id: Option<String>,
    pub expected: String,
    pub candidates: Vec<String>,
    /// Detected from `expected` when absent.
    #[serde(default)]
    pub context: Option<String>,
}

impl ScoringJob {
    pub fn new(expected: impl Into<String>, candidates: Vec<String>) -> Self {
        Self {
            id: None,
            expected: expected.into(),
            candidates,
            context: None,
        }
    }

    pub fn run(&self, scorer: &PhraseScorer) -> ScoringOutcome {
        let context = self.resolve_context();
        let result = scorer.analyze(&self.expected, &self.candidates, Some(&context));
        self.outcome(context, result)
    }

    /// Rejected outcome for a job that produced no result.
    pub fn failed_outcome(&self) -> ScoringOutcome {
        self.outcome(self.resolve_context(), PhraseAnalysisResult::failed(&self.expected))
    }

    /// `id` when present, else the job's position in its batch.
    pub fn label(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| format!("#{index}"))
    }

    fn resolve_context(&self) -> String {
        match &self.context {
            Some(label) => label.clone(),
            None => ContextDetector::new().detect(&self.expected).to_string(),
        }
    }

    fn outcome(&self, context: String, result: PhraseAnalysisResult) -> ScoringOutcome {
        ScoringOutcome {
            id: self.id.clone(),
            context,
            summary: result.summary(),
            result,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub context: String,
    #[serde(flatten)]
    pub result: PhraseAnalysisResult,
    pub summary: AnalysisSummary,
}

/// Abstracts how a batch of scoring jobs is executed.
///
/// This is a port. Infrastructure provides concrete implementations
/// (e.g. threaded); outcomes are returned in job order.
pub trait BatchExecutor: Send {
    fn execute(&self, scorer: Arc<PhraseScorer>, jobs: Vec<ScoringJob>) -> Vec<ScoringOutcome>;
}

/// Runs jobs one after another on the calling thread.
pub struct SequentialBatchExecutor;

impl BatchExecutor for SequentialBatchExecutor {
    fn execute(&self, scorer: Arc<PhraseScorer>, jobs: Vec<ScoringJob>) -> Vec<ScoringOutcome> {
        jobs.iter().map(|job| job.run(&scorer)).collect()
    }
}
