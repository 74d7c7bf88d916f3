#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for cross-tabulation and heatmap rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_eda::prelude::*;

fn dataset(rows: usize) -> Dataset {
    let regions: Vec<Option<String>> = (0..rows).map(|i| Some(format!("r{}", i % 8))).collect();
    let outcomes: Vec<Option<&str>> =
        (0..rows).map(|i| Some(if (i * 7) % 3 == 0 { "win" } else { "loss" })).collect();
    let regions: Vec<Option<&str>> = regions.iter().map(Option::as_deref).collect();

    Dataset::new()
        .with_column(Column::text("region", &regions))
        .expect("column should be added")
        .with_column(Column::text("outcome", &outcomes))
        .expect("column should be added")
}

fn crosstab_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("crosstab");

    for rows in [1_000, 10_000, 100_000] {
        let ds = dataset(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &ds, |b, ds| {
            b.iter(|| {
                let table = CrossTab::from_columns(black_box(ds), "region", "outcome")
                    .expect("crosstab should succeed");
                table.row_percentages()
            });
        });
    }

    group.finish();
}

fn heatmap_render_benchmark(c: &mut Criterion) {
    let ds = dataset(10_000);
    let table = CrossTab::from_columns(&ds, "region", "outcome").expect("crosstab should succeed");

    c.bench_function("heatmap_render_1000x600", |b| {
        b.iter(|| {
            Heatmap::from_crosstab(black_box(&table), CrossTabValues::Percentages)
                .dimensions(1000, 600)
                .build()
                .expect("heatmap should build")
                .to_figure(None)
                .expect("figure should render")
        });
    });
}

criterion_group!(benches, crosstab_benchmark, heatmap_render_benchmark);
criterion_main!(benches);
