//! Per-file sessions: the full ingest → clean → project → chart → export chain.
//!
//! An interactive shell keeps one [`FileSession`] per uploaded file, updates its choices as the
//! user clicks, and calls [`FileSession::run`] again after every change. Each run starts over
//! from the uploaded bytes; the only state carried between runs is the session's own choices.
//!
//! [`run_batch`] processes several sessions, isolating failures: a file that cannot be decoded
//! (for example an unsupported extension) is reported and the remaining files still run.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::export::{ExportedFile, export};
use crate::ingestion::{IngestionOptions, ingest_bytes};
use crate::processing::{
    ChartSummary, CleaningOptions, ColumnSelection, Preview, chart_summary, clean, preview, project_columns,
};
use crate::types::{TabularDocument, TabularFormat};

/// An uploaded file: its name and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name as uploaded; its extension selects the decoder.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Create an upload.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// The user's choices for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChoices {
    /// Cleaning steps to run.
    #[serde(default)]
    pub cleaning: CleaningOptions,
    /// Columns to keep.
    #[serde(default)]
    pub selection: ColumnSelection,
    /// Whether to build the chart summary.
    #[serde(default)]
    pub show_chart: bool,
    /// Target format, if the file should be converted.
    #[serde(default)]
    pub export: Option<TabularFormat>,
}

/// Outcome of the chart step.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    /// A Vega-Lite bar chart spec with the melted data inlined.
    Rendered(serde_json::Value),
    /// No numeric columns were left to chart.
    NoNumericData,
}

/// Everything one run produced for a file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// Name of the uploaded file.
    pub file_name: String,
    /// Preview of the document as ingested, before cleaning.
    pub preview: Preview,
    /// The cleaned and projected document.
    pub document: TabularDocument,
    /// Chart step outcome, when the chart was requested.
    pub chart: Option<ChartOutcome>,
    /// Exported file, when a target format was chosen.
    pub export: Option<ExportedFile>,
}

/// One uploaded file plus the user's current choices for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSession {
    /// The uploaded file.
    pub upload: Upload,
    /// Current choices; they persist across runs.
    pub choices: FileChoices,
}

impl FileSession {
    /// Start a session with default choices (no cleaning, all columns, no chart, no export).
    pub fn new(upload: Upload) -> Self {
        Self {
            upload,
            choices: FileChoices::default(),
        }
    }

    /// Start a session with the given choices.
    pub fn with_choices(upload: Upload, choices: FileChoices) -> Self {
        Self { upload, choices }
    }

    /// Narrow (or widen) the column selection used by later runs.
    pub fn select_columns(&mut self, selection: ColumnSelection) {
        self.choices.selection = selection;
    }

    /// Run the whole chain from the uploaded bytes.
    pub fn run(&self, ingestion: &IngestionOptions) -> PipelineResult<FileReport> {
        let span = tracing::info_span!("file", name = %self.upload.name);
        let _enter = span.enter();

        let ingested = ingest_bytes(&self.upload.name, &self.upload.bytes, ingestion)?;
        let head = preview(&ingested);

        let cleaned = clean(&ingested, &self.choices.cleaning);
        let document = project_columns(&cleaned, &self.choices.selection)?;

        let chart = self.choices.show_chart.then(|| match chart_summary(&document) {
            ChartSummary::Ready(series) => ChartOutcome::Rendered(series.to_vega_lite()),
            ChartSummary::NoNumericData => {
                tracing::warn!("no numeric columns available for visualization");
                ChartOutcome::NoNumericData
            }
        });

        let exported = self
            .choices
            .export
            .map(|format| export(&document, format, &self.upload.name))
            .transpose()?;

        tracing::info!(
            rows = document.row_count(),
            columns = document.column_count(),
            exported = exported.as_ref().map(|e| e.file_name.as_str()),
            "file processed"
        );

        Ok(FileReport {
            file_name: self.upload.name.clone(),
            preview: head,
            document,
            chart,
            export: exported,
        })
    }
}

/// Result of running one session inside a batch.
#[derive(Debug)]
pub struct FileOutcome {
    /// Name of the uploaded file.
    pub file_name: String,
    /// The report, or the error that stopped this file.
    pub result: Result<FileReport, PipelineError>,
}

impl FileOutcome {
    /// Whether this file failed.
    pub fn is_err(&self) -> bool {
        self.result.is_err()
    }
}

/// Run every session in order. A failing file does not stop the others.
pub fn run_batch(sessions: &[FileSession], ingestion: &IngestionOptions) -> Vec<FileOutcome> {
    sessions
        .iter()
        .map(|session| {
            let result = session.run(ingestion);
            if let Err(error) = &result {
                tracing::error!(file = %session.upload.name, %error, "file skipped");
            }
            FileOutcome {
                file_name: session.upload.name.clone(),
                result,
            }
        })
        .collect()
}
