use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use phrasecheck_core::context::domain::context_label::ContextDetector;
use phrasecheck_core::recognition::domain::result_mapper::{RecognizedText, ResultMapper};
use phrasecheck_core::recognition::infrastructure::paragraph_highlighter::ParagraphHighlighter;
use phrasecheck_core::recognition::infrastructure::pronunciation_table_mapper::{
    PronunciationTableMapper, UnmatchedPolicy,
};
use phrasecheck_core::scoring::batch_executor::{BatchExecutor, SequentialBatchExecutor};
use phrasecheck_core::scoring::infrastructure::jsonl_job_reader::JsonlJobReader;
use phrasecheck_core::scoring::infrastructure::scorer_factory::{
    create_encoder, create_scorer, EncoderKind,
};
use phrasecheck_core::scoring::infrastructure::threaded_batch_executor::ThreadedBatchExecutor;
use phrasecheck_core::scoring::phrase_analysis::CorrectionResult;
use phrasecheck_core::scoring::phrase_scorer::PhraseScorer;
use phrasecheck_core::scoring::score_reporter::LogScoreReporter;
use phrasecheck_core::scoring::scoring_config::ScoringConfig;
use phrasecheck_core::shared::constants::{
    CONTENT_WORD_THRESHOLD, DEFAULT_CACHE_CAPACITY, LENIENT_STOP_WORD_THRESHOLD,
};

/// Phonetic correction and scoring of speech transcripts.
#[derive(Parser)]
#[command(name = "phrasecheck")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score recognized candidates against an expected phrase.
    Score {
        /// The phrase the speaker was asked to say.
        expected: String,

        /// Recognizer alternatives, best first.
        #[arg(required = true)]
        candidates: Vec<String>,

        /// Context label (detected from the expected phrase if omitted).
        #[arg(long)]
        context: Option<String>,

        /// Print only the corrected phrase and its score.
        #[arg(long)]
        brief: bool,

        #[command(flatten)]
        scoring: ScoringArgs,
    },

    /// Print the phonetic code of each word.
    Encode {
        #[arg(required = true)]
        words: Vec<String>,

        /// Encoder: metaphone or soundex.
        #[arg(long, default_value = "metaphone")]
        encoder: String,
    },

    /// Print the detected context label of a sentence.
    Context { sentence: String },

    /// Score a JSON-lines file of jobs.
    Batch {
        /// Input file, one `{"expected", "candidates", "id"?, "context"?}` per line.
        input: PathBuf,

        /// Output file (stdout if omitted).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Worker threads (0 = one per CPU, 1 = sequential).
        #[arg(long, default_value = "0")]
        workers: usize,

        #[command(flatten)]
        scoring: ScoringArgs,
    },

    /// Highlight the spoken words of a paragraph.
    Highlight { paragraph: String, spoken: String },

    /// Map an utterance to keys of a pronunciation table.
    Map {
        /// JSON object of key -> list of pronunciations.
        #[arg(long)]
        table: PathBuf,

        utterance: String,

        /// Echo unmatched utterances uppercased instead of prompting.
        #[arg(long)]
        uppercase: bool,
    },
}

#[derive(Args)]
struct ScoringArgs {
    /// Encoder: metaphone or soundex.
    #[arg(long, default_value = "metaphone")]
    encoder: String,

    /// Minimum match score for content words (0.0-1.0).
    #[arg(long, default_value_t = CONTENT_WORD_THRESHOLD)]
    content_threshold: f64,

    /// Minimum match score for stop words (0.0-0.6).
    #[arg(long, default_value_t = LENIENT_STOP_WORD_THRESHOLD)]
    stop_threshold: f64,

    /// Similarity cache entries (0 disables the cache).
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,

    /// Disable the letter-name corrections ("ccs" -> "she sees").
    #[arg(long)]
    no_direct_corrections: bool,

    /// Log per-word decisions and a signal summary (use with RUST_LOG=info).
    #[arg(long)]
    report: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Score {
            expected,
            candidates,
            context,
            brief,
            scoring,
        } => run_score(&expected, &candidates, context, brief, &scoring),
        Command::Encode { words, encoder } => run_encode(&words, &encoder),
        Command::Context { sentence } => {
            println!("{}", ContextDetector::new().detect(&sentence));
            Ok(())
        }
        Command::Batch {
            input,
            output,
            workers,
            scoring,
        } => run_batch(&input, output.as_deref(), workers, &scoring),
        Command::Highlight { paragraph, spoken } => {
            let mapped = ParagraphHighlighter::new(paragraph).map(&RecognizedText::single(spoken));
            println!("{}", serde_json::to_string_pretty(&mapped)?);
            Ok(())
        }
        Command::Map {
            table,
            utterance,
            uppercase,
        } => run_map(&table, &utterance, uppercase),
    }
}

fn run_score(
    expected: &str,
    candidates: &[String],
    context: Option<String>,
    brief: bool,
    args: &ScoringArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let scorer = build_scorer(args)?;
    let context = context.unwrap_or_else(|| ContextDetector::new().detect(expected).to_string());
    log::info!("Context: {context}");

    let result = scorer.analyze(expected, candidates, Some(&context));
    scorer.report_summary();

    if brief {
        println!("{}", serde_json::to_string_pretty(&CorrectionResult::from(&result))?);
    } else {
        let summary = result.summary();
        let output = serde_json::json!({
            "context": context,
            "result": result,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

fn run_encode(words: &[String], encoder: &str) -> Result<(), Box<dyn std::error::Error>> {
    let encoder = create_encoder(parse_encoder(encoder)?);
    for word in words {
        let code = encoder.encode(word);
        println!("{word}\t{}\t{}", code.primary(), code.alternate());
    }
    Ok(())
}

fn run_batch(
    input: &Path,
    output: Option<&Path>,
    workers: usize,
    args: &ScoringArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let jobs = JsonlJobReader::read(input)?;
    let scorer = Arc::new(build_scorer(args)?);

    let executor: Box<dyn BatchExecutor> = match workers {
        0 => Box::new(ThreadedBatchExecutor::default()),
        1 => Box::new(SequentialBatchExecutor),
        n => Box::new(ThreadedBatchExecutor::new(n)),
    };
    let outcomes = executor.execute(Arc::clone(&scorer), jobs);
    scorer.report_summary();

    let accepted = outcomes.iter().filter(|o| o.result.accepted).count();
    log::info!("Scored {} jobs, {accepted} accepted", outcomes.len());

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    for outcome in &outcomes {
        writeln!(writer, "{}", serde_json::to_string(outcome)?)?;
    }
    writer.flush()?;

    if let Some(path) = output {
        log::info!("Output written to {}", path.display());
    }
    Ok(())
}

fn run_map(table: &Path, utterance: &str, uppercase: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(table)
        .map_err(|e| format!("Cannot read table {}: {e}", table.display()))?;
    let entries: Vec<(String, Vec<String>)> =
        serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&text)?
            .into_iter()
            .map(|(key, value)| Ok((key, serde_json::from_value(value)?)))
            .collect::<Result<_, serde_json::Error>>()?;

    let policy = if uppercase {
        UnmatchedPolicy::Uppercase
    } else {
        UnmatchedPolicy::Prompt
    };
    let mapper = PronunciationTableMapper::new(entries, policy);
    println!("{}", mapper.map_text(utterance));
    Ok(())
}

fn build_scorer(args: &ScoringArgs) -> Result<PhraseScorer, Box<dyn std::error::Error>> {
    let kind = parse_encoder(&args.encoder)?;
    let config = ScoringConfig {
        content_word_threshold: args.content_threshold,
        stop_word_threshold: args.stop_threshold,
        cache_capacity: args.cache_capacity,
        direct_corrections: !args.no_direct_corrections,
        ..ScoringConfig::default()
    };

    let scorer = create_scorer(kind, config)?;
    if args.report {
        Ok(scorer.with_reporter(Box::new(LogScoreReporter::new())))
    } else {
        Ok(scorer)
    }
}

fn parse_encoder(name: &str) -> Result<EncoderKind, Box<dyn std::error::Error>> {
    match name {
        "metaphone" => Ok(EncoderKind::Metaphone),
        "soundex" => Ok(EncoderKind::Soundex),
        other => Err(format!("Encoder must be 'metaphone' or 'soundex', got '{other}'").into()),
    }
}
