//! Column projection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, ProcessingResult};
use crate::types::{Schema, TabularDocument, Value};

/// Which columns to keep in the projected document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSelection {
    /// Keep every column in document order.
    #[default]
    All,
    /// Keep exactly these columns, in this order.
    Named(Vec<String>),
}

impl ColumnSelection {
    /// Build a named selection from any list of column names.
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Named(names.into_iter().map(Into::into).collect())
    }
}

/// Returns a new document containing only the selected columns, all rows preserved.
///
/// Errors:
///
/// - [`ProcessingError::EmptySelection`] if a named selection lists no columns
/// - [`ProcessingError::ColumnNotFound`] if a name is not a column of `document`
/// - [`ProcessingError::DuplicateSelection`] if a name is listed twice
pub fn project_columns(
    document: &TabularDocument,
    selection: &ColumnSelection,
) -> ProcessingResult<TabularDocument> {
    let names = match selection {
        ColumnSelection::All => return Ok(document.clone()),
        ColumnSelection::Named(names) => names,
    };
    if names.is_empty() {
        return Err(ProcessingError::EmptySelection);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(names.len());
    let mut idxs = Vec::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(ProcessingError::DuplicateSelection {
                column: name.clone(),
            });
        }
        let idx = document
            .schema
            .index_of(name)
            .ok_or_else(|| ProcessingError::ColumnNotFound {
                column: name.clone(),
                available: document.column_names(),
            })?;
        idxs.push(idx);
    }

    let schema = Schema::new(
        idxs.iter()
            .map(|&idx| document.schema.fields[idx].clone())
            .collect(),
    );
    let rows = document
        .rows
        .iter()
        .map(|row| {
            idxs.iter()
                .map(|&idx| row.get(idx).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Ok(TabularDocument::new(schema, rows))
}
