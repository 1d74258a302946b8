//! Duplicate row removal for [`crate::types::TabularDocument`].

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::types::{TabularDocument, Value};

/// Hashable identity of a cell. Floats compare by bit pattern, with `-0.0` folded into `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CellKey {
    Null,
    Int(i64),
    Float(u64),
    Bool(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl From<&Value> for CellKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Int64(v) => Self::Int(*v),
            Value::Float64(v) if *v == 0.0 => Self::Float(0.0_f64.to_bits()),
            Value::Float64(v) => Self::Float(v.to_bits()),
            Value::Bool(v) => Self::Bool(*v),
            Value::Utf8(s) => Self::Text(s.clone()),
            Value::DateTime(dt) => Self::DateTime(*dt),
        }
    }
}

/// Returns a new document without rows that are identical to an earlier row.
///
/// All columns are compared by value and missing cells are equal to each other. The first
/// occurrence of each row is kept and survivors stay in their original order, so applying this
/// twice gives the same result as applying it once.
pub fn deduplicate(document: &TabularDocument) -> TabularDocument {
    let mut seen: HashSet<Vec<CellKey>> = HashSet::with_capacity(document.row_count());
    let out = document.filter_rows(|row| seen.insert(row.iter().map(CellKey::from).collect()));

    tracing::debug!(
        rows_in = document.row_count(),
        rows_out = out.row_count(),
        "removed duplicate rows"
    );
    out
}
