use std::collections::HashMap;

use crate::matching::domain::word_match::WordMatchResult;

/// Cross-cutting observer for scoring decisions.
///
/// The scorer narrates per-word matches, phrase-level signals and verdicts
/// through this port so callers can trace a decision without the scorer
/// choosing an output mechanism.
pub trait ScoreReporter: Send {
    /// Record the match verdict of one expected word.
    fn word(&mut self, result: &WordMatchResult);

    /// Record a named phrase-level signal (e.g. metaphone, order, final).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit a summary of everything recorded so far. Default: no-op.
    fn summary(&self) {}
}

/// Silent reporter; the scorer's default.
pub struct NullScoreReporter;

impl ScoreReporter for NullScoreReporter {
    fn word(&mut self, _result: &WordMatchResult) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Reporter that narrates through the `log` facade and keeps per-signal
/// statistics for an end-of-run summary.
#[derive(Default)]
pub struct LogScoreReporter {
    metrics: HashMap<String, Vec<f64>>,
    words_seen: usize,
    words_below_threshold: usize,
    messages: Vec<String>,
}

impl LogScoreReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the formatted summary string, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.metrics.is_empty() && self.words_seen == 0 {
            return None;
        }

        let mut lines = vec![format!(
            "Scoring summary ({} words, {} below threshold):",
            self.words_seen, self.words_below_threshold
        )];

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let values = &self.metrics[name];
            let avg = if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            };
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            lines.push(format!(
                "  {name:10}: avg {avg:.3}  min {min:.3}  max {max:.3}  (n={})",
                values.len()
            ));
        }

        Some(lines.join("\n"))
    }

    /// Returns the values recorded for a given signal.
    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl ScoreReporter for LogScoreReporter {
    fn word(&mut self, result: &WordMatchResult) {
        self.words_seen += 1;
        if result.fails_gate() {
            self.words_below_threshold += 1;
        }
        log::debug!(
            "word '{}' [{}] -> {:?} score {:.3} (threshold {:.2}, confidence {:.3})",
            result.word,
            result.phonetic_code,
            result.best_match,
            result.best_score,
            result.threshold,
            result.confidence
        );
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
