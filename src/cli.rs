//! CLI argument definitions for `data-sweeper`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

use data_sweeper::types::TabularFormat;

#[derive(Parser)]
#[command(
    name = "data-sweeper",
    version,
    about = "Preview, clean and convert CSV/XLSX files",
    long_about = "Preview, clean and convert tabular files.\n\n\
                  Reads .csv and .xlsx files, optionally removes duplicate rows and mean-fills\n\
                  missing numeric values, keeps selected columns, and writes CSV or XLSX."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Disable ANSI colors in log output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the first rows and column types of each file.
    Preview(InputArgs),

    /// Clean, project and convert each file.
    Process(ProcessArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Input files or glob patterns (.csv, .xlsx).
    #[arg(value_name = "FILES", required = true)]
    pub inputs: Vec<String>,

    /// Worksheet to read from .xlsx inputs (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,
}

#[derive(Args)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Target format for the converted files.
    #[arg(long = "to", value_enum)]
    pub to: Option<FormatArg>,

    /// Directory for converted files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Remove rows identical to an earlier row.
    #[arg(long = "dedupe")]
    pub dedupe: bool,

    /// Replace missing numeric values with the column mean.
    #[arg(long = "fill-missing")]
    pub fill_missing: bool,

    /// Columns to keep, in output order (default: all columns).
    #[arg(long = "columns", value_name = "NAMES", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Build the bar-chart summary of the first two numeric columns.
    #[arg(long = "chart")]
    pub chart: bool,

    /// Write each chart as a Vega-Lite JSON spec into this directory (implies --chart).
    #[arg(long = "chart-dir", value_name = "DIR")]
    pub chart_dir: Option<PathBuf>,

    /// Overwrite input files when a converted file has the same path.
    #[arg(long = "force")]
    pub force: bool,

    /// Skip printing previews.
    #[arg(long = "no-preview")]
    pub no_preview: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for TabularFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => TabularFormat::Csv,
            FormatArg::Xlsx => TabularFormat::Spreadsheet,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
