//! In-memory document transformations.
//!
//! The processing layer operates on [`crate::types::TabularDocument`] values produced by
//! ingestion. Every operation takes the document by reference and returns a new value.
//!
//! - [`preview()`]: the first rows, rendered for display
//! - [`deduplicate()`]: drop rows identical to an earlier row
//! - [`fill_missing_numeric()`]: mean-fill missing numeric cells
//! - [`project_columns()`]: keep a selection of columns, in selection order
//! - [`chart_summary()`]: melt up to two numeric columns into long form for charting
//!
//! ## Example: clean → project → chart
//!
//! ```rust
//! use data_sweeper::processing::{chart_summary, clean, project_columns, ChartSummary, CleaningOptions, ColumnSelection};
//! use data_sweeper::types::{Field, Schema, SemanticType, TabularDocument, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("a", SemanticType::Numeric),
//!     Field::new("b", SemanticType::Numeric),
//! ]);
//! let doc = TabularDocument::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::Int64(2)],
//!         vec![Value::Int64(1), Value::Int64(2)],
//!         vec![Value::Int64(3), Value::Null],
//!     ],
//! );
//!
//! let cleaned = clean(&doc, &CleaningOptions { remove_duplicates: true, fill_missing_numeric: true });
//! assert_eq!(cleaned.row_count(), 2);
//! assert_eq!(cleaned.rows[1][1], Value::Float64(2.0));
//!
//! let only_b = project_columns(&cleaned, &ColumnSelection::named(["b"])).unwrap();
//! match chart_summary(&only_b) {
//!     ChartSummary::Ready(series) => assert_eq!(series.points().count(), 2),
//!     ChartSummary::NoNumericData => unreachable!(),
//! }
//! ```

pub mod chart;
pub mod dedupe;
pub mod fill;
pub mod preview;
pub mod project;

use serde::{Deserialize, Serialize};

use crate::types::TabularDocument;

pub use chart::{ChartPoint, ChartSummary, MAX_CHART_METRICS, MeltedSeries, chart_summary};
pub use dedupe::deduplicate;
pub use fill::{column_mean, fill_missing_numeric};
pub use preview::{PREVIEW_ROWS, Preview, preview, preview_rows};
pub use project::{ColumnSelection, project_columns};

/// Which cleaning steps to run. Both default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningOptions {
    /// Drop rows identical to an earlier row.
    #[serde(default)]
    pub remove_duplicates: bool,
    /// Mean-fill missing numeric cells.
    #[serde(default)]
    pub fill_missing_numeric: bool,
}

/// Apply the requested cleaning steps: deduplication first, then mean-fill.
pub fn clean(document: &TabularDocument, options: &CleaningOptions) -> TabularDocument {
    let deduped = if options.remove_duplicates {
        deduplicate(document)
    } else {
        document.clone()
    };
    if options.fill_missing_numeric {
        fill_missing_numeric(&deduped)
    } else {
        deduped
    }
}
