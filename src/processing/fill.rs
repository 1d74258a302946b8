//! Mean-fill of missing numeric values.

use crate::types::{TabularDocument, Value};

/// Replace missing cells of every numeric column with that column's mean.
///
/// - The mean is taken over the present values of the input document, so run this after
///   [`super::deduplicate`] when both are wanted.
/// - A column that gets filled is stored as [`Value::Float64`] throughout; complete columns keep
///   their cells as they are.
/// - Non-numeric columns are returned unchanged.
/// - A numeric column with no present values has no mean and is left as is.
/// - Rows shorter than the schema are padded with missing cells before filling.
pub fn fill_missing_numeric(document: &TabularDocument) -> TabularDocument {
    let width = document.column_count();
    let means: Vec<(usize, f64)> = document
        .schema
        .numeric_indices()
        .filter_map(|idx| column_mean(document, idx).map(|mean| (idx, mean)))
        .filter(|&(idx, _)| has_gap(document, idx))
        .collect();

    if means.is_empty() {
        return document.clone();
    }

    let mut filled = 0usize;
    let out = document.map_rows(|row| {
        let mut out = row.to_vec();
        out.resize(width, Value::Null);
        for &(idx, mean) in &means {
            let promoted = match &out[idx] {
                Value::Null => {
                    filled += 1;
                    Value::Float64(mean)
                }
                present => present.as_f64().map_or(Value::Null, Value::Float64),
            };
            out[idx] = promoted;
        }
        out
    });

    tracing::debug!(columns = means.len(), cells = filled, "filled missing numeric values");
    out
}

/// Whether column `idx` has a missing (or absent) cell in any row.
fn has_gap(document: &TabularDocument, idx: usize) -> bool {
    document
        .rows
        .iter()
        .any(|row| row.get(idx).is_none_or(Value::is_null))
}

/// Arithmetic mean of the present values in column `idx`, or `None` if there are none.
pub fn column_mean(document: &TabularDocument, idx: usize) -> Option<f64> {
    let (sum, count) = document.reduce_rows((0.0_f64, 0usize), |(sum, count), row| {
        match row.get(idx).and_then(Value::as_f64) {
            Some(v) => (sum + v, count + 1),
            None => (sum, count),
        }
    });
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::{column_mean, fill_missing_numeric};
    use crate::types::{Field, Schema, SemanticType, TabularDocument, Value};

    fn document_with_gaps() -> TabularDocument {
        let schema = Schema::new(vec![
            Field::new("score", SemanticType::Numeric),
            Field::new("name", SemanticType::Text),
            Field::new("empty", SemanticType::Numeric),
        ]);
        let rows = vec![
            vec![Value::Int64(10), Value::Utf8("a".to_string()), Value::Null],
            vec![Value::Null, Value::Null, Value::Null],
            vec![Value::Float64(5.0), Value::Utf8("c".to_string()), Value::Null],
        ];
        TabularDocument::new(schema, rows)
    }

    #[test]
    fn fills_numeric_gaps_with_column_mean() {
        let out = fill_missing_numeric(&document_with_gaps());
        assert_eq!(out.rows[1][0], Value::Float64(7.5));
        // the filled column is promoted as a whole
        assert_eq!(out.rows[0][0], Value::Float64(10.0));
    }

    #[test]
    fn complete_columns_keep_their_integers() {
        let schema = Schema::new(vec![Field::new("n", SemanticType::Numeric)]);
        let ds = TabularDocument::new(schema, vec![vec![Value::Int64(1)], vec![Value::Int64(2)]]);
        assert_eq!(fill_missing_numeric(&ds), ds);
    }

    #[test]
    fn filled_then_deduplicated_rows_collapse() {
        let schema = Schema::new(vec![
            Field::new("a", SemanticType::Numeric),
            Field::new("b", SemanticType::Numeric),
        ]);
        let ds = TabularDocument::new(
            schema,
            vec![
                vec![Value::Int64(3), Value::Int64(2)],
                vec![Value::Int64(3), Value::Null],
            ],
        );
        let out = crate::processing::deduplicate(&fill_missing_numeric(&ds));
        assert_eq!(out.rows, vec![vec![Value::Int64(3), Value::Float64(2.0)]]);
    }

    #[test]
    fn short_rows_are_padded_before_filling() {
        let schema = Schema::new(vec![
            Field::new("a", SemanticType::Numeric),
            Field::new("b", SemanticType::Numeric),
        ]);
        let ds = TabularDocument::new(schema, vec![vec![Value::Int64(1), Value::Int64(4)], vec![Value::Int64(2)]]);
        let out = fill_missing_numeric(&ds);
        assert_eq!(out.rows[1], vec![Value::Int64(2), Value::Float64(4.0)]);
    }

    #[test]
    fn text_columns_keep_missing_values() {
        let ds = document_with_gaps();
        let out = fill_missing_numeric(&ds);
        assert_eq!(out.rows[1][1], Value::Null);
        for (before, after) in ds.rows.iter().zip(&out.rows) {
            assert_eq!(before[1], after[1]);
        }
    }

    #[test]
    fn all_missing_numeric_column_is_left_alone() {
        let out = fill_missing_numeric(&document_with_gaps());
        assert!(out.rows.iter().all(|row| row[2] == Value::Null));
    }

    #[test]
    fn shape_is_preserved() {
        let ds = document_with_gaps();
        let out = fill_missing_numeric(&ds);
        assert_eq!(out.schema, ds.schema);
        assert_eq!(out.row_count(), ds.row_count());
    }

    #[test]
    fn column_mean_ignores_nulls() {
        let ds = document_with_gaps();
        assert_eq!(column_mean(&ds, 0), Some(7.5));
        assert_eq!(column_mean(&ds, 2), None);
    }
}
