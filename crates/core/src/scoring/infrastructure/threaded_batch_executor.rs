use std::sync::Arc;
use std::thread::JoinHandle;

use crate::scoring::batch_executor::{BatchExecutor, ScoringJob, ScoringOutcome};
use crate::scoring::phrase_scorer::PhraseScorer;

/// Jobs waiting per worker before the feeder blocks.
const QUEUE_DEPTH_PER_WORKER: usize = 4;

/// Multi-threaded batch executor using crossbeam channels.
///
/// Spawns a feeder thread and `workers` scoring threads sharing one scorer
/// (and so one similarity cache). Outcomes are reassembled in job order.
/// A job lost to a panicking worker yields a failed outcome in its slot.
pub struct ThreadedBatchExecutor {
    workers: usize,
}

impl ThreadedBatchExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedBatchExecutor {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(workers)
    }
}

impl BatchExecutor for ThreadedBatchExecutor {
    fn execute(&self, scorer: Arc<PhraseScorer>, jobs: Vec<ScoringJob>) -> Vec<ScoringOutcome> {
        let total = jobs.len();
        if total == 0 {
            return Vec::new();
        }

        let jobs: Vec<Arc<ScoringJob>> = jobs.into_iter().map(Arc::new).collect();
        let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, Arc<ScoringJob>)>(
            self.workers * QUEUE_DEPTH_PER_WORKER,
        );
        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded::<(usize, ScoringOutcome)>();

        let feeder = spawn_feeder(jobs.clone(), job_tx);
        let workers: Vec<_> = (0..self.workers)
            .map(|_| spawn_worker(Arc::clone(&scorer), job_rx.clone(), outcome_tx.clone()))
            .collect();
        drop(job_rx);
        drop(outcome_tx);

        let mut slots: Vec<Option<ScoringOutcome>> = vec![None; total];
        for (index, outcome) in outcome_rx {
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(outcome);
            }
        }

        join_threads(feeder, workers);

        let mut missing: Vec<String> = Vec::new();
        let outcomes: Vec<ScoringOutcome> = slots
            .into_iter()
            .zip(&jobs)
            .enumerate()
            .map(|(index, (slot, job))| {
                slot.unwrap_or_else(|| {
                    missing.push(job.label(index));
                    job.failed_outcome()
                })
            })
            .collect();
        if !missing.is_empty() {
            log::error!(
                "{} of {total} jobs produced no outcome: {}",
                missing.len(),
                missing.join(", ")
            );
        }
        outcomes
    }
}

fn spawn_feeder(
    jobs: Vec<Arc<ScoringJob>>,
    job_tx: crossbeam_channel::Sender<(usize, Arc<ScoringJob>)>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for pair in jobs.into_iter().enumerate() {
            if job_tx.send(pair).is_err() {
                break;
            }
        }
    })
}

fn spawn_worker(
    scorer: Arc<PhraseScorer>,
    job_rx: crossbeam_channel::Receiver<(usize, Arc<ScoringJob>)>,
    outcome_tx: crossbeam_channel::Sender<(usize, ScoringOutcome)>,
) -> JoinHandle<usize> {
    std::thread::spawn(move || {
        let mut scored = 0;
        for (index, job) in job_rx {
            if outcome_tx.send((index, job.run(&scorer))).is_err() {
                break;
            }
            scored += 1;
        }
        scored
    })
}

fn join_threads(feeder: JoinHandle<()>, workers: Vec<JoinHandle<usize>>) {
    if feeder.join().is_err() {
        log::error!("Batch feeder thread panicked");
    }
    for (i, worker) in workers.into_iter().enumerate() {
        match worker.join() {
            Ok(scored) => log::debug!("worker {i} scored {scored} jobs"),
            Err(_) => log::error!("Batch worker {i} panicked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::domain::phonetic_comparator::PhoneticComparator;
    use crate::phonetic::infrastructure::lru_similarity_cache::LruSimilarityCache;
    use crate::phonetic::infrastructure::speech_metaphone_encoder::SpeechMetaphoneEncoder;
    use crate::matching::domain::word_match::WordMatchResult;
    use crate::scoring::batch_executor::SequentialBatchExecutor;
    use crate::scoring::phrase_analysis::{PERFECT_MATCH_REASON, SCORING_FAILED_REASON};
    use crate::scoring::score_reporter::ScoreReporter;
    use crate::scoring::scoring_config::ScoringConfig;
    use rstest::rstest;

    /// Panics while scoring any phrase containing `kaboom`.
    struct ExplodingReporter;

    impl ScoreReporter for ExplodingReporter {
        fn word(&mut self, result: &WordMatchResult) {
            if result.word == "kaboom" {
                panic!("reporter failed on '{}'", result.word);
            }
        }
        fn metric(&mut self, _name: &str, _value: f64) {}
        fn info(&mut self, _message: &str) {}
    }

    fn exploding_scorer() -> Arc<PhraseScorer> {
        let comparator = PhoneticComparator::new(
            Box::new(SpeechMetaphoneEncoder::new()),
            Box::new(LruSimilarityCache::new(256)),
        );
        let scorer = PhraseScorer::new(comparator, ScoringConfig::default())
            .unwrap()
            .with_reporter(Box::new(ExplodingReporter));
        Arc::new(scorer)
    }

    fn jobs_with_failure() -> Vec<ScoringJob> {
        ["banana", "kaboom", "apple"]
            .iter()
            .enumerate()
            .map(|(i, phrase)| ScoringJob {
                id: Some(i.to_string()),
                ..ScoringJob::new(*phrase, vec![phrase.to_string()])
            })
            .collect()
    }

    fn scorer() -> Arc<PhraseScorer> {
        let comparator = PhoneticComparator::new(
            Box::new(SpeechMetaphoneEncoder::new()),
            Box::new(LruSimilarityCache::new(256)),
        );
        Arc::new(PhraseScorer::new(comparator, ScoringConfig::default()).unwrap())
    }

    fn jobs() -> Vec<ScoringJob> {
        let phrases = [
            ("we ate lunch", "V8 lunch"),
            ("I ate a banana", "I ate a banana"),
            ("banana", "apple"),
            ("the dog runs", "the dog run"),
            ("she sees the sea", "ccs the sea"),
            ("monkeys climb trees", "monkey climb tree"),
        ];
        phrases
            .iter()
            .enumerate()
            .map(|(i, (expected, candidate))| ScoringJob {
                id: Some(i.to_string()),
                ..ScoringJob::new(*expected, vec![candidate.to_string()])
            })
            .collect()
    }

    #[rstest]
    #[case::one_worker(1)]
    #[case::two_workers(2)]
    #[case::more_workers_than_jobs(16)]
    fn test_matches_sequential_in_order(#[case] workers: usize) {
        let expected = SequentialBatchExecutor.execute(scorer(), jobs());
        let actual = ThreadedBatchExecutor::new(workers).execute(scorer(), jobs());
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_lost_jobs_get_failed_outcomes_in_order() {
        // The only worker dies on the second job, so the third is never scored
        let outcomes = ThreadedBatchExecutor::new(1).execute(exploding_scorer(), jobs_with_failure());

        let ids: Vec<Option<&str>> = outcomes.iter().map(|o| o.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("0"), Some("1"), Some("2")]);
        assert_eq!(outcomes[0].result.reason, PERFECT_MATCH_REASON);
        assert!(outcomes[0].result.accepted);
        for failed in &outcomes[1..] {
            assert_eq!(failed.result.reason, SCORING_FAILED_REASON);
            assert!(!failed.result.accepted);
        }
        assert_eq!(outcomes[1].result.original_phrase, "kaboom");
    }

    #[test]
    fn test_surviving_worker_scores_remaining_jobs() {
        let outcomes = ThreadedBatchExecutor::new(2).execute(exploding_scorer(), jobs_with_failure());

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.accepted);
        assert_eq!(outcomes[1].result.reason, SCORING_FAILED_REASON);
        assert!(outcomes[2].result.accepted);
    }

    #[test]
    fn test_empty_batch() {
        assert!(ThreadedBatchExecutor::new(4).execute(scorer(), Vec::new()).is_empty());
    }

    #[test]
    fn test_zero_workers_clamped() {
        assert_eq!(ThreadedBatchExecutor::new(0).workers(), 1);
        assert!(ThreadedBatchExecutor::default().workers() >= 1);
    }
}
