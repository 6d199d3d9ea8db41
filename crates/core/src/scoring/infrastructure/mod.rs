pub mod jsonl_job_reader;
pub mod scorer_factory;
pub mod threaded_batch_executor;
