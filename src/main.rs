// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Patternbench - command line entrypoint.
//!
//! Loads the configuration, initializes logging and dispatches to the
//! search, trace, measurement and demo commands. Results go to stdout,
//! logs to stderr.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use patternbench_lib::config::{self, AppConfig, LogConfig};
use patternbench_lib::error::{AppError, ErrorContext, ErrorReporter, TracingErrorReporter};
use patternbench_lib::evaluator::{
    sample_scenarios, Evaluator, ExperimentParams, Report, SweepParameter, TextKind,
};
use patternbench_lib::memory::TrackingAllocator;
use patternbench_lib::runner::{
    Algorithm, AlgorithmChoice, AlgorithmOutcome, Operation, OperationRequest, Runner,
};

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator::new();

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(name = "patternbench", version, author, about)]
struct Cli {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[clap(long, global = true)]
    json: bool,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Where the text to search comes from.
#[derive(Args, Debug)]
struct TextSource {
    /// Text given inline
    #[clap(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// File holding the text
    #[clap(long, value_parser)]
    text_file: Option<PathBuf>,
}

impl TextSource {
    fn load(&self) -> anyhow::Result<String> {
        match (&self.text, &self.text_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read text file {}", path.display())),
            (None, None) => bail!("either --text or --text-file is required"),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OpKind {
    Search,
    Insert,
    Delete,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Search a text, optionally inserting after or deleting every match
    Search {
        #[clap(long)]
        pattern: String,
        #[clap(flatten)]
        source: TextSource,
        /// Algorithm name or "All"
        #[clap(long, default_value = "All")]
        algorithm: AlgorithmChoice,
        /// Fold case before matching
        #[clap(long)]
        ignore_case: bool,
        #[clap(long, value_enum, default_value = "search")]
        op: OpKind,
        /// Text inserted after each match with `--op insert`
        #[clap(long, default_value = "")]
        insert_text: String,
    },

    /// Replay one algorithm's scan step by step
    Trace {
        #[clap(long)]
        algorithm: Algorithm,
        #[clap(long)]
        pattern: String,
        #[clap(flatten)]
        source: TextSource,
    },

    /// Count matches of many patterns in one text
    Bulk {
        #[clap(long)]
        algorithm: Algorithm,
        /// File with one pattern per line
        #[clap(long, value_parser)]
        patterns_file: Option<PathBuf>,
        /// Pattern given inline, repeatable
        #[clap(long = "pattern")]
        patterns: Vec<String>,
        #[clap(flatten)]
        source: TextSource,
    },

    /// Time repeated searches with one algorithm
    Measure {
        #[clap(long)]
        algorithm: Algorithm,
        #[clap(long)]
        pattern: String,
        #[clap(flatten)]
        source: TextSource,
        /// Overrides evaluator.repeats
        #[clap(long)]
        repeats: Option<usize>,
    },

    /// Measure every configured algorithm while one parameter varies
    Sweep {
        /// text-length, pattern-length or alphabet-size
        #[clap(long)]
        parameter: SweepParameter,
        /// Comma-separated values of the parameter
        #[clap(long, value_delimiter = ',', required = true)]
        values: Vec<usize>,
        #[clap(long, default_value_t = 100_000)]
        text_len: usize,
        #[clap(long, default_value_t = 8)]
        pattern_len: usize,
        #[clap(long, default_value_t = 4)]
        alphabet_size: usize,
        /// uniform or repetitive
        #[clap(long, default_value = "uniform")]
        kind: TextKind,
        /// Save the metrics as JSON under this name in the output directory
        #[clap(long)]
        save: Option<String>,
        /// Write the text report to the output directory
        #[clap(long)]
        report: bool,
    },

    /// Time against text length on random DNA
    Benchmark {
        #[clap(long)]
        algorithm: Algorithm,
        #[clap(long)]
        pattern: String,
        #[clap(long)]
        max_length: usize,
        #[clap(long)]
        step: usize,
    },

    /// Run all algorithms on the built-in sample texts
    Demo,

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .context("Invalid log filter")?;
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default());

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location)
        .with_thread_names(true);

    if log.json {
        registry.with(layer.json()).try_init()?;
    } else {
        registry.with(layer).try_init()?;
    }
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn outcome_json(outcome: &AlgorithmOutcome) -> anyhow::Result<Value> {
    Ok(match &outcome.result {
        Ok(result) => serde_json::to_value(result)?,
        Err(err) => json!({ "algorithm": outcome.algorithm.name(), "error": err.to_string() }),
    })
}

fn print_outcomes(outcomes: &[AlgorithmOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => println!(
                "  {:20}: found {:4} matches in {:.4} ms ({} bytes peak)",
                outcome.algorithm.name(),
                result.match_count(),
                result.elapsed_secs * 1000.0,
                result.peak_memory
            ),
            Err(err) => println!("  {:20}: {err}", outcome.algorithm.name()),
        }
    }
}

fn run_demo(runner: &Runner, reporter: &dyn ErrorReporter, as_json: bool) -> anyhow::Result<()> {
    let mut rows = Vec::new();

    for scenario in sample_scenarios() {
        if !as_json {
            println!("\n{} ({} characters)", scenario.name, scenario.text.chars().count());
        }
        for pattern in &scenario.patterns {
            let outcomes = runner.run_all(&scenario.text, pattern);
            for outcome in &outcomes {
                if let Err(err) = &outcome.result {
                    reporter.report(
                        ErrorContext::capture(err.clone(), "demo").with_details(format!(
                            "{} on pattern {pattern:?} in {}",
                            outcome.algorithm, scenario.name
                        )),
                    );
                }
            }
            if as_json {
                let results = outcomes.iter().map(outcome_json).collect::<anyhow::Result<Vec<_>>>()?;
                rows.push(json!({ "scenario": scenario.name, "pattern": pattern, "results": results }));
            } else {
                println!("Pattern {pattern:?}");
                print_outcomes(&outcomes);
            }
        }
    }

    let check_text = "AABAACAADAABAABA";
    let outcomes = runner.run_all(check_text, "AABA");
    let positions: Vec<_> = outcomes.iter().map(|o| o.ok().map(|r| r.positions.clone())).collect();
    let agree = positions.windows(2).all(|w| w[0] == w[1]);

    if as_json {
        print_json(&json!({ "scenarios": rows, "verification": { "positions": positions[0], "agree": agree } }))
    } else {
        println!("\nVerification on {check_text:?}:");
        print_outcomes(&outcomes);
        println!("All algorithms agree: {agree}");
        Ok(())
    }
}

fn load_patterns(file: Option<&PathBuf>, inline: &[String]) -> anyhow::Result<Vec<String>> {
    let mut patterns = inline.to_vec();
    if let Some(path) = file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read patterns file {}", path.display()))?;
        patterns.extend(content.lines().map(str::to_string));
    }
    Ok(patterns)
}

/// Main entry point for the application.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::GenConfig { output } = &cli.command {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml = toml::to_string_pretty(&AppConfig::default())
            .context("Failed to serialize config")?;
        fs::write(output, toml)?;
        println!("Default configuration written to {}", output.display());
        return Ok(());
    }

    let app_config = config::load(cli.config.as_deref())?;
    init_logging(&app_config.log)?;
    let reporter = TracingErrorReporter::new();

    let runner = Runner::new(app_config.matching.clone());
    let evaluator = Evaluator::new(app_config.evaluator.clone(), app_config.matching.clone());

    match cli.command {
        Command::Search {
            pattern,
            source,
            algorithm,
            ignore_case,
            op,
            insert_text,
        } => {
            let operation = match op {
                OpKind::Search => Operation::Search,
                OpKind::Insert => Operation::Insert(insert_text),
                OpKind::Delete => Operation::Delete,
            };
            let request = OperationRequest {
                text: source.load()?,
                pattern,
                algorithm,
                case_sensitive: !ignore_case && app_config.matching.case_sensitive,
                operation,
            };
            let response = runner.execute(&request);

            if cli.json {
                let results = response.results.iter().map(outcome_json).collect::<anyhow::Result<Vec<_>>>()?;
                print_json(&json!({ "results": results, "updated_text": response.updated_text }))?;
            } else {
                print_outcomes(&response.results);
                if let Some(text) = response.updated_text {
                    println!("Updated text:\n{text}");
                }
            }
        }
        Command::Trace {
            algorithm,
            pattern,
            source,
        } => {
            let report = runner.run_trace(algorithm, &source.load()?, &pattern)?;
            if cli.json {
                print_json(&report)?;
            } else {
                for step in &report.steps {
                    let marker = if step.is_match { "*" } else { " " };
                    println!("{marker} {}", step.description);
                }
                if report.truncated {
                    println!(
                        "(trace limited to {} of {} characters)",
                        report.text.chars().count(),
                        report.original_length
                    );
                }
            }
        }
        Command::Bulk {
            algorithm,
            patterns_file,
            patterns,
            source,
        } => {
            let patterns = load_patterns(patterns_file.as_ref(), &patterns)?;
            let result = runner.run_bulk(algorithm, &source.load()?, &patterns);
            if cli.json {
                print_json(&result)?;
            } else {
                for entry in &result.per_pattern {
                    match &entry.error {
                        Some(err) => println!("  {:30} {err}", entry.pattern),
                        None => println!("  {:30} {}", entry.pattern, entry.count),
                    }
                }
                println!("Total matches: {} in {:.4} ms", result.total_matches, result.elapsed_secs * 1000.0);
            }
        }
        Command::Measure {
            algorithm,
            pattern,
            source,
            repeats,
        } => {
            let repeats = repeats.unwrap_or(app_config.evaluator.repeats);
            let metric = evaluator.measure(algorithm, &source.load()?, &pattern, repeats)?;
            if cli.json {
                print_json(&metric)?;
            } else {
                println!(
                    "{}: {} matches, preprocess {:.4} ms, search mean {:.4} ms (median {:.4}, std {:.4}), peak {:.0} bytes",
                    metric.algorithm,
                    metric.matches,
                    metric.preprocess_secs * 1000.0,
                    metric.time.mean * 1000.0,
                    metric.time.median * 1000.0,
                    metric.time.std_dev * 1000.0,
                    metric.memory.max
                );
            }
        }
        Command::Sweep {
            parameter,
            values,
            text_len,
            pattern_len,
            alphabet_size,
            kind,
            save,
            report,
        } => {
            let fixed = ExperimentParams {
                text_len,
                pattern_len,
                alphabet_size,
                kind,
            };
            let sweep = evaluator.sweep(parameter, &values, &fixed);
            for failure in &sweep.failures {
                reporter.report(
                    ErrorContext::capture(AppError::Custom(failure.error.clone()), "sweep")
                        .with_details(format!("{} at {parameter} = {}", failure.algorithm, failure.value)),
                );
            }
            if let Some(filename) = save {
                let path = evaluator.save_results(&sweep.metrics, &filename)?;
                info!(path = %path.display(), "Results saved");
            }
            if report {
                evaluator.write_report(&sweep.metrics)?;
            }

            if cli.json {
                print_json(&sweep)?;
            } else {
                print!("{}", Report::new(&sweep.metrics));
            }
        }
        Command::Benchmark {
            algorithm,
            pattern,
            max_length,
            step,
        } => {
            let points = evaluator.benchmark(algorithm, &pattern, max_length, step)?;
            if cli.json {
                print_json(&json!({ "algorithm": algorithm, "data": points }))?;
            } else {
                for point in &points {
                    println!(
                        "{:>10} chars: {:.4} ms, {} bytes",
                        point.length,
                        point.time_secs * 1000.0,
                        point.peak_memory
                    );
                }
            }
        }
        Command::Demo => run_demo(&runner, &reporter, cli.json)?,
        Command::Validate => {
            info!("Configuration validated successfully");
            if cli.json {
                print_json(&app_config)?;
            } else {
                println!("Configuration is valid");
            }
        }
        Command::GenConfig { .. } => {}
    }

    Ok(())
}
