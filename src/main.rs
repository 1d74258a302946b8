//! `data-sweeper` command-line shell.

use std::collections::HashSet;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;

use data_sweeper::ingestion::{IngestionOptions, SheetSelection, TracingObserver, ingest_bytes};
use data_sweeper::logging::{LogConfig, LogFormat, init_logging};
use data_sweeper::pipeline::{ChartOutcome, FileChoices, FileSession, Upload, run_batch};
use data_sweeper::processing::{CleaningOptions, ColumnSelection, preview};

mod cli;

use crate::cli::{Cli, Command, InputArgs, LogFormatArg, ProcessArgs};

fn main() {
    let cli = Cli::parse();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::Preview(args) => run_preview(args),
        Command::Process(args) => run_process(args),
    };
    let exit_code = match result {
        Ok(failures) if failures == 0 => 0,
        Ok(failures) => {
            eprintln!("{failures} file(s) failed");
            1
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: !cli.no_color && io::stderr().is_terminal(),
        ..LogConfig::default()
    }
}

fn ingestion_options(args: &InputArgs) -> IngestionOptions {
    IngestionOptions {
        sheet: args
            .sheet
            .clone()
            .map_or(SheetSelection::First, SheetSelection::Named),
        observer: Some(Arc::new(TracingObserver)),
        ..IngestionOptions::default()
    }
}

/// Print a preview per file. Returns the number of files that could not be read.
fn run_preview(args: &InputArgs) -> Result<usize> {
    let options = ingestion_options(args);
    let (uploads, mut failures) = read_uploads(&args.inputs)?;

    for upload in uploads {
        match ingest_bytes(&upload.name, &upload.bytes, &options) {
            Ok(doc) => {
                println!("== {} ({} columns) ==", upload.name, doc.column_count());
                println!("{}\n", preview(&doc));
            }
            Err(error) => {
                eprintln!("error: {}: {error}", upload.name);
                failures += 1;
            }
        }
    }
    Ok(failures)
}

/// Run the full session per file. Returns the number of files that failed.
fn run_process(args: &ProcessArgs) -> Result<usize> {
    let options = ingestion_options(&args.input);
    let (uploads, mut failures) = read_uploads(&args.input.inputs)?;

    let choices = FileChoices {
        cleaning: CleaningOptions {
            remove_duplicates: args.dedupe,
            fill_missing_numeric: args.fill_missing,
        },
        selection: args
            .columns
            .clone()
            .map_or(ColumnSelection::All, ColumnSelection::Named),
        show_chart: args.chart || args.chart_dir.is_some(),
        export: args.to.map(Into::into),
    };
    let sessions: Vec<FileSession> = uploads
        .into_iter()
        .map(|upload| FileSession::with_choices(upload, choices.clone()))
        .collect();

    let mut guard = OutputGuard::new(&sessions, args.force);

    if args.to.is_some() {
        ensure_dir(&args.output_dir)?;
    }
    if let Some(dir) = &args.chart_dir {
        ensure_dir(dir)?;
    }

    for outcome in run_batch(&sessions, &options) {
        let report = match outcome.result {
            Ok(report) => report,
            Err(error) => {
                eprintln!("error: {}: {error}", outcome.file_name);
                failures += 1;
                continue;
            }
        };

        if !args.no_preview {
            println!("== {} ==", report.file_name);
            println!("{}\n", report.preview);
        }

        match (&report.chart, &args.chart_dir) {
            (Some(ChartOutcome::NoNumericData), _) => {
                eprintln!("warning: {}: no numeric columns available for visualization", report.file_name);
            }
            (Some(ChartOutcome::Rendered(spec)), Some(dir)) => {
                let path = dir.join(chart_file_name(&report.file_name));
                if let Err(error) = guard.claim(&path) {
                    eprintln!("error: {}: {error}", report.file_name);
                    failures += 1;
                    continue;
                }
                let json = serde_json::to_vec_pretty(spec)?;
                std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
                println!("chart: {}", path.display());
            }
            (Some(ChartOutcome::Rendered(_)), None) => {
                println!("chart: {} metric points ready", chart_point_count(report.chart.as_ref()));
            }
            (None, _) => {}
        }

        if let Some(file) = &report.export {
            let path = args.output_dir.join(&file.file_name);
            if let Err(error) = guard.claim(&path) {
                eprintln!("error: {}: {error}", report.file_name);
                failures += 1;
                continue;
            }
            std::fs::write(&path, file.bytes()).with_context(|| format!("writing {}", path.display()))?;
            println!(
                "converted {} -> {} ({}, {} rows)",
                report.file_name,
                path.display(),
                file.mime_type,
                report.document.row_count()
            );
        }
    }
    Ok(failures)
}

/// Output paths written so far, checked against the batch's input files.
struct OutputGuard {
    inputs: HashSet<PathBuf>,
    written: HashSet<PathBuf>,
    force: bool,
}

impl OutputGuard {
    fn new(sessions: &[FileSession], force: bool) -> Self {
        let inputs = sessions
            .iter()
            .filter_map(|session| std::fs::canonicalize(&session.upload.name).ok())
            .collect();
        Self {
            inputs,
            written: HashSet::new(),
            force,
        }
    }

    /// Reserve `path` for writing. Fails if an earlier file in this run already wrote it, or if
    /// it is one of the inputs and `--force` was not given.
    fn claim(&mut self, path: &Path) -> Result<()> {
        let key = std::path::absolute(path).with_context(|| format!("resolving {}", path.display()))?;
        if self.written.contains(&key) {
            bail!("{} was already written by another input in this run", path.display());
        }
        let is_input = std::fs::canonicalize(path).is_ok_and(|p| self.inputs.contains(&p));
        if is_input && !self.force {
            bail!("refusing to overwrite input file {} (pass --force to allow)", path.display());
        }
        self.written.insert(key);
        Ok(())
    }
}

/// `<stem>.chart.json` for an input named `<stem>.<ext>`.
fn chart_file_name(source_name: &str) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("chart");
    format!("{stem}.chart.json")
}

fn chart_point_count(chart: Option<&ChartOutcome>) -> usize {
    match chart {
        Some(ChartOutcome::Rendered(spec)) => spec["data"]["values"].as_array().map_or(0, Vec::len),
        _ => 0,
    }
}

/// Expand inputs (plain paths or glob patterns) and read each file.
///
/// Unreadable files are reported and counted; a malformed pattern or a pattern that matches
/// nothing is an error.
fn read_uploads(inputs: &[String]) -> Result<(Vec<Upload>, usize)> {
    let mut uploads = Vec::new();
    let mut failures = 0;
    for path in expand_inputs(inputs)? {
        match std::fs::read(&path) {
            Ok(bytes) => uploads.push(Upload::new(path.display().to_string(), bytes)),
            Err(error) => {
                eprintln!("error: {}: {error}", path.display());
                failures += 1;
            }
        }
    }
    Ok((uploads, failures))
}

fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(input));
            continue;
        }
        let matched: Vec<PathBuf> = glob::glob(input)
            .with_context(|| format!("invalid glob pattern '{input}'"))?
            .filter_map(|entry| entry.ok())
            .collect();
        if matched.is_empty() {
            bail!("pattern '{input}' matched no files");
        }
        paths.extend(matched);
    }
    Ok(paths)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}
