use data_sweeper::export::export;
use data_sweeper::ingestion::{IngestionOptions, ingest_bytes, ingest_from_path};
use data_sweeper::types::TabularFormat;

#[test]
fn csv_export_reingests_to_the_same_document() {
    let doc = ingest_from_path("tests/fixtures/people.csv", &IngestionOptions::default()).unwrap();
    let file = export(&doc, TabularFormat::Csv, "people.csv").unwrap();

    let again = ingest_bytes(&file.file_name, file.bytes(), &IngestionOptions::default()).unwrap();
    assert_eq!(again, doc);
}

#[test]
fn xlsx_export_reingests_to_the_same_document() {
    let doc = ingest_from_path("tests/fixtures/people.csv", &IngestionOptions::default()).unwrap();
    let file = export(&doc, TabularFormat::Spreadsheet, "people.csv").unwrap();
    assert_eq!(file.file_name, "people.xlsx");
    assert_eq!(
        file.mime_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let again = ingest_bytes(&file.file_name, file.bytes(), &IngestionOptions::default()).unwrap();
    assert_eq!(again, doc);
}

#[test]
fn exported_buffers_start_at_position_zero() {
    let doc = ingest_from_path("tests/fixtures/text_only.csv", &IngestionOptions::default()).unwrap();
    for format in [TabularFormat::Csv, TabularFormat::Spreadsheet] {
        let file = export(&doc, format, "text_only.csv").unwrap();
        assert_eq!(file.buffer.position(), 0);
        assert!(!file.bytes().is_empty());
    }
}

#[test]
fn fractional_seconds_survive_csv_and_xlsx() {
    let doc = ingest_bytes("t.csv", b"t\n2024-01-01 10:00:00.5\n2024-01-02\n", &IngestionOptions::default()).unwrap();

    let csv = export(&doc, TabularFormat::Csv, "t.csv").unwrap();
    assert_eq!(csv.bytes(), b"t\n2024-01-01 10:00:00.500\n2024-01-02\n");
    let again = ingest_bytes(&csv.file_name, csv.bytes(), &IngestionOptions::default()).unwrap();
    assert_eq!(again, doc);

    let xlsx = export(&doc, TabularFormat::Spreadsheet, "t.csv").unwrap();
    let again = ingest_bytes(&xlsx.file_name, xlsx.bytes(), &IngestionOptions::default()).unwrap();
    assert_eq!(again, doc);
}
