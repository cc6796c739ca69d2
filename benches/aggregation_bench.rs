// ABOUTME: Criterion benchmarks for static table lookup and recipe aggregation
// ABOUTME: Measures tiered name matching and the per-100g composite over varied recipe sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the local fallback path of the nutrition pipeline.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nutrilabel_core::models::{AnalysisSource, IngredientLine};
use nutrilabel_intelligence::{aggregate, resolve_lines, ComplianceEvaluator, NutritionTable};
use tokio::runtime::Runtime;

const NAMES: &[&str] = &[
    "Basmati Rice",
    "chicken breast",
    "onions",
    "tomato puree",
    "ghee",
    "paneer",
    "green chillies",
    "coriander leaves",
    "unobtainium",
    "garam masala",
];

const UNITS: &[&str] = &["g", "kg", "cup", "tbsp", "tsp", "pcs", "ml"];

fn recipe(size: usize) -> Vec<IngredientLine> {
    (0..size)
        .map(|i| {
            IngredientLine::new(
                NAMES[i % NAMES.len()],
                f64::from(u32::try_from(i % 7).unwrap_or(0) + 1),
                UNITS[i % UNITS.len()],
            )
        })
        .collect()
}

fn bench_table_lookup(c: &mut Criterion) {
    let table = NutritionTable::builtin();
    let mut group = c.benchmark_group("table_lookup");

    for name in ["rice", "Basmati Rice", "fresh green chillies", "unobtainium"] {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            b.iter(|| table.lookup(black_box(name)));
        });
    }
    group.finish();
}

fn bench_static_table_aggregation(c: &mut Criterion) {
    let table = NutritionTable::builtin();
    let evaluator = ComplianceEvaluator::default();
    let Ok(runtime) = Runtime::new() else {
        return;
    };
    let mut group = c.benchmark_group("static_table_aggregation");

    for size in [3_usize, 10, 50] {
        let lines = recipe(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &lines, |b, lines| {
            let table = &table;
            let evaluator = &evaluator;
            b.to_async(&runtime).iter(|| async move {
                let Ok(resolved) = resolve_lines(table, black_box(lines)).await else {
                    return None;
                };
                Some(aggregate(&resolved).into_outcome(AnalysisSource::LocalFallback, evaluator))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_table_lookup, bench_static_table_aggregation);
criterion_main!(benches);
