//! Benchmarks for table recovery at varying word counts.
//!
//! Run with: `cargo bench --bench table_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docsift::content::table::{build_table, cluster_columns, group_lines, words_to_markdown};
use docsift::config::COLUMN_GAP_THRESHOLD_PX;
use docsift::Word;

/// Generate a `rows` x `cols` grid of OCR words with a little positional
/// jitter, laid out the way Tesseract reports a scanned spreadsheet.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn generate_grid(rows: usize, cols: usize) -> Vec<Word> {
    let mut words = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let jitter = ((row * 7 + col * 3) % 9) as i32;
            words.push(Word {
                text: format!("r{row}c{col}"),
                left: col as i32 * 180 + jitter,
                top: row as i32 * 40 + jitter / 3,
                block: 1,
                par: 1,
                line: row as u32 + 1,
            });
        }
    }
    words
}

fn bench_cluster_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_columns");

    let sizes: &[(usize, usize, &str)] = &[
        (10, 4, "40w"),
        (100, 6, "600w"),
        (1_000, 8, "8000w"),
    ];

    for &(rows, cols, label) in sizes {
        let words = generate_grid(rows, cols);

        group.throughput(Throughput::Elements(words.len() as u64));
        group.bench_with_input(BenchmarkId::new("cluster", label), &words, |b, words| {
            b.iter(|| black_box(cluster_columns(black_box(words), COLUMN_GAP_THRESHOLD_PX)));
        });
    }

    group.finish();
}

fn bench_build_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_table");

    for &(rows, cols, label) in &[(10, 4, "40w"), (100, 6, "600w"), (1_000, 8, "8000w")] {
        let words = generate_grid(rows, cols);
        let lines = group_lines(&words);
        let columns = cluster_columns(&words, COLUMN_GAP_THRESHOLD_PX);

        group.throughput(Throughput::Elements(words.len() as u64));
        group.bench_function(BenchmarkId::new("assign", label), |b| {
            b.iter(|| black_box(build_table(black_box(&lines), black_box(&columns))));
        });
        group.bench_function(BenchmarkId::new("words_to_markdown", label), |b| {
            b.iter(|| black_box(words_to_markdown(black_box(&words), COLUMN_GAP_THRESHOLD_PX)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cluster_columns, bench_build_table);
criterion_main!(benches);
