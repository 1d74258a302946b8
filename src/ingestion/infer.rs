//! Column type inference shared by the CSV and spreadsheet decoders.
//!
//! Decoders hand over raw cells per column; this module picks one [`SemanticType`] per column
//! and converts the cells into typed [`Value`]s.

use chrono::{NaiveDate, NaiveDateTime};

use crate::types::{Field, Schema, SemanticType, TabularDocument, Value};

/// Cell tokens treated as missing values.
pub const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "NULL", "null", "None", "<NA>", "#N/A",
];

/// A decoded cell before column typing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawCell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl RawCell {
    /// Build a cell from text, mapping missing tokens to [`RawCell::Empty`].
    pub(crate) fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_missing_token(trimmed) {
            Self::Empty
        } else {
            Self::Text(trimmed.to_owned())
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) if f.is_finite() => Some(*f),
            Self::Text(s) => s.parse::<f64>().ok().filter(|f| !f.is_nan()),
            _ => None,
        }
    }

    fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => Some(*f as i64),
            Self::Text(s) => s.parse::<i64>().ok(),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Self::Text(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            Self::Text(s) => parse_datetime(s),
            _ => None,
        }
    }

    fn into_text(self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s,
            Self::Int(i) => Value::Int64(i).to_string(),
            Self::Float(f) => Value::Float64(f).to_string(),
            Self::Bool(b) => Value::Bool(b).to_string(),
            Self::DateTime(dt) => Value::DateTime(dt).to_string(),
        }
    }
}

/// Whether `s` (already trimmed) denotes a missing value.
pub fn is_missing_token(s: &str) -> bool {
    MISSING_TOKENS.contains(&s)
}

/// Parse ISO-8601 style dates (`2024-01-31`) and date-times (`2024-01-31 08:00:00`,
/// `2024-01-31T08:00:00`, optional fractional seconds).
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Make header names unique and non-empty.
///
/// Empty headers become `Unnamed: <idx>`; repeats of `x` become `x.1`, `x.2`, ...
pub(crate) fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for (idx, header) in raw.into_iter().enumerate() {
        let trimmed = header.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            trimmed.to_owned()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while out.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        out.push(candidate);
    }
    out
}

/// Infer the semantic type of one column from its raw cells.
///
/// A column with no present cells is numeric, so mean-fill sees it (and leaves it untouched).
pub(crate) fn infer_semantic_type(cells: &[RawCell]) -> SemanticType {
    let mut present = cells.iter().filter(|c| !c.is_empty()).peekable();
    if present.peek().is_none() {
        return SemanticType::Numeric;
    }

    let present: Vec<&RawCell> = present.collect();
    if present.iter().all(|c| c.as_number().is_some()) {
        SemanticType::Numeric
    } else if present.iter().all(|c| c.as_bool().is_some()) {
        SemanticType::Boolean
    } else if present.iter().all(|c| c.as_datetime().is_some()) {
        SemanticType::Date
    } else {
        SemanticType::Text
    }
}

fn convert_column(cells: Vec<RawCell>, semantic_type: SemanticType) -> Vec<Value> {
    match semantic_type {
        SemanticType::Numeric => {
            let integral = cells.iter().all(|c| c.is_empty() || c.as_integer().is_some());
            cells
                .into_iter()
                .map(|c| match (&c, integral) {
                    (RawCell::Empty, _) => Value::Null,
                    (_, true) => c.as_integer().map(Value::Int64).unwrap_or(Value::Null),
                    (_, false) => c.as_number().map(Value::Float64).unwrap_or(Value::Null),
                })
                .collect()
        }
        SemanticType::Boolean => cells
            .into_iter()
            .map(|c| c.as_bool().map(Value::Bool).unwrap_or(Value::Null))
            .collect(),
        SemanticType::Date => cells
            .into_iter()
            .map(|c| c.as_datetime().map(Value::DateTime).unwrap_or(Value::Null))
            .collect(),
        SemanticType::Text => cells
            .into_iter()
            .map(|c| match c {
                RawCell::Empty => Value::Null,
                other => Value::Utf8(other.into_text()),
            })
            .collect(),
    }
}

/// Assemble a typed document from headers and column-major raw cells.
///
/// Every column in `columns` must have the same length.
pub(crate) fn build_document(headers: Vec<String>, columns: Vec<Vec<RawCell>>) -> TabularDocument {
    debug_assert_eq!(headers.len(), columns.len());
    let row_count = columns.first().map_or(0, Vec::len);

    let mut fields = Vec::with_capacity(headers.len());
    let mut typed_columns: Vec<std::vec::IntoIter<Value>> = Vec::with_capacity(columns.len());
    for (name, cells) in headers.into_iter().zip(columns) {
        let semantic_type = infer_semantic_type(&cells);
        fields.push(Field::new(name, semantic_type));
        typed_columns.push(convert_column(cells, semantic_type).into_iter());
    }

    let rows = (0..row_count)
        .map(|_| {
            typed_columns
                .iter_mut()
                .map(|col| col.next().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    TabularDocument::new(Schema::new(fields), rows)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{RawCell, build_document, infer_semantic_type, normalize_headers, parse_datetime};
    use crate::types::{SemanticType, Value};

    fn text(cells: &[&str]) -> Vec<RawCell> {
        cells.iter().map(|s| RawCell::from_text(s)).collect()
    }

    #[test]
    fn missing_tokens_become_empty() {
        assert_eq!(RawCell::from_text("  "), RawCell::Empty);
        assert_eq!(RawCell::from_text("NaN"), RawCell::Empty);
        assert_eq!(RawCell::from_text("#N/A"), RawCell::Empty);
        assert_eq!(RawCell::from_text(" x "), RawCell::Text("x".to_string()));
    }

    #[test]
    fn infers_numeric_boolean_date_and_text() {
        assert_eq!(infer_semantic_type(&text(&["1", "", "2.5"])), SemanticType::Numeric);
        assert_eq!(infer_semantic_type(&text(&["True", "false"])), SemanticType::Boolean);
        assert_eq!(
            infer_semantic_type(&text(&["2024-01-02", "2024-01-03 10:00:00"])),
            SemanticType::Date
        );
        assert_eq!(infer_semantic_type(&text(&["1", "two"])), SemanticType::Text);
    }

    #[test]
    fn all_missing_column_is_numeric() {
        assert_eq!(infer_semantic_type(&text(&["", "NA"])), SemanticType::Numeric);
        assert_eq!(infer_semantic_type(&[]), SemanticType::Numeric);
    }

    #[test]
    fn zero_and_one_stay_numeric() {
        assert_eq!(infer_semantic_type(&text(&["0", "1"])), SemanticType::Numeric);
    }

    #[test]
    fn integral_columns_keep_integers() {
        let doc = build_document(
            vec!["a".to_string(), "b".to_string()],
            vec![text(&["1", "3"]), text(&["1.5", ""])],
        );
        assert_eq!(doc.rows[0], vec![Value::Int64(1), Value::Float64(1.5)]);
        assert_eq!(doc.rows[1], vec![Value::Int64(3), Value::Null]);
    }

    #[test]
    fn text_columns_render_native_cells() {
        let doc = build_document(
            vec!["mixed".to_string()],
            vec![vec![
                RawCell::Int(7),
                RawCell::Text("seven".to_string()),
                RawCell::Empty,
            ]],
        );
        assert_eq!(doc.schema.fields[0].semantic_type, SemanticType::Text);
        assert_eq!(
            doc.rows.iter().map(|r| r[0].clone()).collect::<Vec<_>>(),
            vec![Value::Utf8("7".to_string()), Value::Utf8("seven".to_string()), Value::Null]
        );
    }

    #[test]
    fn headers_are_made_unique() {
        let out = normalize_headers(vec![
            "id".to_string(),
            "".to_string(),
            "id".to_string(),
            "id".to_string(),
        ]);
        assert_eq!(out, vec!["id", "Unnamed: 1", "id.1", "id.2"]);
    }

    #[test]
    fn parses_iso_dates_and_datetimes() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(parse_datetime("2024-01-31"), day.and_hms_opt(0, 0, 0));
        assert_eq!(parse_datetime("2024-01-31T08:30:00"), day.and_hms_opt(8, 30, 0));
        assert_eq!(parse_datetime("31/01/2024"), None);
    }
}
