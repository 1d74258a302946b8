use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};

use data_sweeper::IngestionError;
use data_sweeper::ingestion::excel::{ingest_excel_from_bytes, ingest_excel_from_path};
use data_sweeper::ingestion::{IngestionOptions, SheetSelection, ingest_bytes};
use data_sweeper::types::{SemanticType, TabularFormat, Value};

fn tmp_xlsx() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("data-sweeper-excel-{nanos}.xlsx"))
}

fn people_workbook() -> Workbook {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let sheet = workbook.add_worksheet();
    sheet.set_name("People").unwrap();
    sheet.write_string(0, 0, "id").unwrap();
    sheet.write_string(0, 1, "name").unwrap();
    sheet.write_string(0, 2, "score").unwrap();
    sheet.write_string(0, 3, "active").unwrap();
    sheet.write_string(0, 4, "joined").unwrap();

    sheet.write_number(1, 0, 1).unwrap();
    sheet.write_string(1, 1, "Ada").unwrap();
    sheet.write_number(1, 2, 98.5).unwrap();
    sheet.write_boolean(1, 3, true).unwrap();
    let joined = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    sheet.write_date_with_format(1, 4, &joined, &date_format).unwrap();

    sheet.write_number(2, 0, 2).unwrap();
    sheet.write_string(2, 1, "Grace").unwrap();
    // score left blank
    sheet.write_boolean(2, 3, false).unwrap();

    let other = workbook.add_worksheet();
    other.set_name("Totals").unwrap();
    other.write_string(0, 0, "total").unwrap();
    other.write_number(1, 0, 42.5).unwrap();

    workbook
}

#[test]
fn ingest_excel_reads_first_sheet_with_native_types() {
    let bytes = people_workbook().save_to_buffer().unwrap();
    let doc = ingest_excel_from_bytes(&bytes, None).unwrap();

    assert_eq!(doc.column_names(), vec!["id", "name", "score", "active", "joined"]);
    assert_eq!(doc.row_count(), 2);
    assert_eq!(
        doc.rows[0],
        vec![
            Value::Int64(1),
            Value::Utf8("Ada".to_string()),
            Value::Float64(98.5),
            Value::Bool(true),
            Value::DateTime(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(0, 0, 0).unwrap()),
        ]
    );
    assert_eq!(doc.rows[1][2], Value::Null);
    assert_eq!(doc.rows[1][4], Value::Null);

    let types: Vec<SemanticType> = doc.schema.fields.iter().map(|f| f.semantic_type).collect();
    assert_eq!(
        types,
        vec![
            SemanticType::Numeric,
            SemanticType::Text,
            SemanticType::Numeric,
            SemanticType::Boolean,
            SemanticType::Date,
        ]
    );
}

#[test]
fn ingest_excel_reads_named_sheet_from_path() {
    let path = tmp_xlsx();
    people_workbook().save(&path).unwrap();

    let doc = ingest_excel_from_path(&path, Some("Totals")).unwrap();
    assert_eq!(doc.column_names(), vec!["total"]);
    assert_eq!(doc.rows, vec![vec![Value::Float64(42.5)]]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn ingest_excel_errors_on_unknown_sheet() {
    let bytes = people_workbook().save_to_buffer().unwrap();
    let err = ingest_excel_from_bytes(&bytes, Some("Nope")).unwrap_err();
    assert!(matches!(err, IngestionError::Excel(_)));
}

#[test]
fn ingest_excel_uses_first_non_empty_row_as_header() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(2, 0, "city").unwrap();
    sheet.write_string(2, 1, "pop").unwrap();
    sheet.write_string(3, 0, "Lima").unwrap();
    sheet.write_number(3, 1, 9.7).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let doc = ingest_excel_from_bytes(&bytes, None).unwrap();
    assert_eq!(doc.column_names(), vec!["city", "pop"]);
    assert_eq!(doc.rows, vec![vec![Value::Utf8("Lima".to_string()), Value::Float64(9.7)]]);
}

#[test]
fn ingest_excel_errors_on_blank_sheet() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    let bytes = workbook.save_to_buffer().unwrap();

    let err = ingest_excel_from_bytes(&bytes, None).unwrap_err();
    assert!(matches!(err, IngestionError::EmptyInput { .. }));
}

#[test]
fn uppercase_extension_selects_spreadsheet_decoder() {
    let bytes = people_workbook().save_to_buffer().unwrap();

    let upper = ingest_bytes("report.XLSX", &bytes, &IngestionOptions::default()).unwrap();
    let lower = ingest_bytes("report.xlsx", &bytes, &IngestionOptions::default()).unwrap();
    assert_eq!(upper, lower);
    assert_eq!(upper.row_count(), 2);
}

#[test]
fn sheet_selection_flows_through_unified_options() {
    let bytes = people_workbook().save_to_buffer().unwrap();
    let opts = IngestionOptions {
        format: Some(TabularFormat::Spreadsheet),
        sheet: SheetSelection::Named("Totals".to_string()),
        ..Default::default()
    };
    let doc = ingest_bytes("upload.bin", &bytes, &opts).unwrap();
    assert_eq!(doc.column_names(), vec!["total"]);
}
