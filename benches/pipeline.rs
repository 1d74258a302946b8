use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use data_sweeper::export::export;
use data_sweeper::ingestion::{IngestionOptions, ingest_bytes};
use data_sweeper::processing::{CleaningOptions, ColumnSelection, chart_summary, clean, project_columns};
use data_sweeper::types::TabularFormat;

fn synthetic_csv(rows: usize) -> Vec<u8> {
    let mut out = String::from("id,name,score,weight,active\n");
    for i in 0..rows {
        // every 10th row repeats its predecessor, every 7th has a gap
        let id = if i % 10 == 9 { i - 1 } else { i };
        let score = if id % 7 == 0 { String::new() } else { format!("{}.5", id % 100) };
        out.push_str(&format!("{id},name{},{score},{},{}\n", id % 50, id % 13, id % 2 == 0));
    }
    out.into_bytes()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let cleaning = CleaningOptions {
        remove_duplicates: true,
        fill_missing_numeric: true,
    };
    let selection = ColumnSelection::named(["score", "id", "name"]);

    for rows in [1_000usize, 10_000] {
        let bytes = synthetic_csv(rows);
        group.throughput(Throughput::Elements(rows as u64));

        group.bench_with_input(BenchmarkId::new("ingest_csv", rows), &bytes, |b, bytes| {
            b.iter(|| ingest_bytes("bench.csv", black_box(bytes), &IngestionOptions::default()))
        });

        let doc = ingest_bytes("bench.csv", &bytes, &IngestionOptions::default()).expect("bench input");

        group.bench_with_input(BenchmarkId::new("clean_project", rows), &doc, |b, doc| {
            b.iter(|| project_columns(&clean(black_box(doc), &cleaning), &selection))
        });

        group.bench_with_input(BenchmarkId::new("chart_points", rows), &doc, |b, doc| {
            b.iter(|| match chart_summary(black_box(doc)) {
                data_sweeper::processing::ChartSummary::Ready(series) => series.points().count(),
                data_sweeper::processing::ChartSummary::NoNumericData => 0,
            })
        });

        for format in [TabularFormat::Csv, TabularFormat::Spreadsheet] {
            let id = format!("export_{}", format.extension());
            group.bench_with_input(BenchmarkId::new(id, rows), &doc, |b, doc| {
                b.iter(|| export(black_box(doc), format, "bench.csv"))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
