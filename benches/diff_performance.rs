use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scriptwatch::scan::fingerprint::ScriptExtractor;
use scriptwatch::snapshot::{ScanRow, Snapshot, SnapshotBuilder};
use scriptwatch::store::diff::compare_snapshots;

/// Synthetic scan rows: `records` rows per table, two script blocks each.
fn fixture_rows(records: usize, variant: &str) -> Vec<ScanRow> {
    let mut rows = Vec::with_capacity(records * 3);
    for table in ["core_config_data", "cms_block", "cms_page"] {
        for id in 0..records {
            rows.push(ScanRow {
                table: table.to_string(),
                record: id.to_string(),
                column: "content".to_string(),
                text: format!(
                    "<div>{id}</div><script>init({id});</script>\n<p>text</p><script src=\"/{variant}{}.js\"></script>",
                    id % 7
                ),
            });
        }
    }
    rows
}

fn build(rows: &[ScanRow], extractor: &ScriptExtractor) -> Snapshot {
    let mut builder = SnapshotBuilder::new(extractor);
    builder.extend(rows);
    builder.finish()
}

fn bench_build_snapshot(c: &mut Criterion) {
    let extractor = ScriptExtractor::new().unwrap();
    let mut group = c.benchmark_group("build_snapshot");

    for records in [100, 1_000, 10_000] {
        let rows = fixture_rows(records, "a");
        group.bench_with_input(BenchmarkId::new("records", records), &rows, |b, rows| {
            b.iter(|| build(black_box(rows), &extractor));
        });
    }

    group.finish();
}

fn bench_diff_unchanged(c: &mut Criterion) {
    let extractor = ScriptExtractor::new().unwrap();
    let mut group = c.benchmark_group("diff_unchanged");

    for records in [100, 1_000, 10_000] {
        let snapshot = build(&fixture_rows(records, "a"), &extractor);
        group.bench_with_input(BenchmarkId::new("records", records), &snapshot, |b, s| {
            b.iter(|| compare_snapshots(black_box(s), black_box(s)));
        });
    }

    group.finish();
}

fn bench_diff_all_modified(c: &mut Criterion) {
    let extractor = ScriptExtractor::new().unwrap();
    let baseline = build(&fixture_rows(1_000, "a"), &extractor);
    let current = build(&fixture_rows(1_000, "b"), &extractor);

    c.bench_function("diff_all_modified_1000", |b| {
        b.iter(|| compare_snapshots(black_box(&current), black_box(&baseline)));
    });
}

criterion_group!(
    benches,
    bench_build_snapshot,
    bench_diff_unchanged,
    bench_diff_all_modified
);
criterion_main!(benches);
