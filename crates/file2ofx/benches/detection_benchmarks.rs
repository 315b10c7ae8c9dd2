//! Column detection and conversion benchmarks.
//!
//! Measures header/data role detection, fixed-width segmentation and the
//! full parse-and-generate pipeline across input sizes.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use file2ofx::input::{DataTable, FixedWidthSegmenter};
use file2ofx::{ColumnDetector, Converter, FileParser, StatementConfig, StatementGenerator};
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};

const DESCRIPTIONS: [&str; 5] = [
    "Grocery store purchase",
    "ATM withdrawal",
    "Salary deposit",
    "Gas station",
    "Online payment",
];
const TYPES: [&str; 5] = ["debit", "debit", "credit", "debit", "payment"];

/// Generate rows of (date, description, amount, type).
fn generate_rows(rows: usize) -> Vec<[String; 4]> {
    (0..rows)
        .map(|row| {
            [
                format!("2023-{:02}-{:02}", (row % 12) + 1, (row % 28) + 1),
                DESCRIPTIONS[row % DESCRIPTIONS.len()].to_string(),
                format!("{:.2}", (row % 500) as f64 * 1.37),
                TYPES[row % TYPES.len()].to_string(),
            ]
        })
        .collect()
}

/// Generate a headed CSV export.
fn generate_csv(rows: usize) -> String {
    let mut data = String::from("Date,Description,Amount,Type\n");
    for row in generate_rows(rows) {
        data.push_str(&row.join(","));
        data.push('\n');
    }
    data
}

/// Generate fixed-width text with no header.
fn generate_fixed_width(rows: usize) -> String {
    generate_rows(rows)
        .iter()
        .map(|[d, t, a, k]| format!("{:<12}{:<30}{:<12}{:<10}\n", d, t, a, k))
        .collect()
}

fn headerless_table(rows: usize) -> DataTable {
    let rows = generate_rows(rows)
        .into_iter()
        .map(|row| row.to_vec())
        .collect();
    DataTable::with_positional_names("col_", rows)
}

/// Benchmark header-name role detection.
fn bench_detect_headers(c: &mut Criterion) {
    let detector = ColumnDetector::new();
    let headers = [
        "Transaction Date",
        "Payee",
        "Debit Amount",
        "Credit Amount",
        "Transaction Type",
        "Running Balance",
    ];

    c.bench_function("detect_from_headers", |b| {
        b.iter(|| black_box(detector.detect_from_headers(black_box(&headers))))
    });
}

/// Benchmark data-sampling role detection; sampling caps the work per column.
fn bench_detect_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_from_data");
    let detector = ColumnDetector::new();

    for rows in [10, 100, 10_000].iter() {
        let table = headerless_table(*rows);
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter(|| black_box(detector.detect_from_data(table)))
        });
    }

    group.finish();
}

/// Benchmark fixed-width span inference and segmentation.
fn bench_fixed_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_width_segment");
    let segmenter = FixedWidthSegmenter::new();

    for rows in [100, 1_000, 10_000].iter() {
        let text = generate_fixed_width(*rows);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &text, |b, text| {
            b.iter(|| black_box(segmenter.segment(text)))
        });
    }

    group.finish();
}

/// Benchmark parsing and statement rendering of CSV exports.
fn bench_parse_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_and_render");
    let config = StatementConfig::default();
    let generator = StatementGenerator::new();

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || {
                    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
                    temp.write_all(data.as_bytes()).unwrap();
                    temp
                },
                |temp| {
                    let parsed = FileParser::new().parse_file(temp.path()).unwrap();
                    black_box(generator.render(&parsed.transactions, &config).unwrap())
                },
            )
        });
    }

    group.finish();
}

/// Benchmark the full conversion including the output write.
fn bench_convert(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bench.csv");
    std::fs::write(&input, generate_csv(1_000)).unwrap();
    let output = dir.path().join("bench.ofx");
    let converter = Converter::new();

    c.bench_function("convert_1000_rows", |b| {
        b.iter(|| black_box(converter.convert(&input, Some(&output)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_detect_headers,
    bench_detect_data,
    bench_fixed_width,
    bench_parse_and_render,
    bench_convert,
);
criterion_main!(benches);
