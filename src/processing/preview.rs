//! Read-only preview of the first rows of a document.

use std::fmt;

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, ContentArrangement, Table};

use crate::types::{SemanticType, TabularDocument, Value};

/// Number of rows shown by [`preview`].
pub const PREVIEW_ROWS: usize = 5;

/// Display text for a missing cell.
pub const MISSING_DISPLAY: &str = "<NA>";

/// The head of a document, rendered to display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Column names in order.
    pub columns: Vec<String>,
    /// Semantic type of each column.
    pub types: Vec<SemanticType>,
    /// Rendered cells of the leading rows.
    pub rows: Vec<Vec<String>>,
    /// Row count of the whole document.
    pub total_rows: usize,
}

/// Preview the first [`PREVIEW_ROWS`] rows of `document`.
pub fn preview(document: &TabularDocument) -> Preview {
    preview_rows(document, PREVIEW_ROWS)
}

/// Preview the first `limit` rows of `document`.
pub fn preview_rows(document: &TabularDocument, limit: usize) -> Preview {
    Preview {
        columns: document.column_names(),
        types: document.schema.fields.iter().map(|f| f.semantic_type).collect(),
        rows: document
            .rows
            .iter()
            .take(limit)
            .map(|row| row.iter().map(display_cell).collect())
            .collect(),
        total_rows: document.row_count(),
    }
}

fn display_cell(value: &Value) -> String {
    match value {
        Value::Null => MISSING_DISPLAY.to_string(),
        other => other.to_string(),
    }
}

impl Preview {
    /// Render the preview as a terminal table.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                self.columns
                    .iter()
                    .zip(&self.types)
                    .map(|(name, ty)| Cell::new(format!("{name}\n({ty})"))),
            );
        for row in &self.rows {
            table.add_row(row);
        }
        table
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.to_table())?;
        write!(f, "showing {} of {} rows", self.rows.len(), self.total_rows)
    }
}
