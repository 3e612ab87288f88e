//! Splitting throughput benchmarks.

#![allow(missing_docs, clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use threadsplit::{SplitConfig, ThreadSplitter};

fn dialogue_paragraph(repeats: usize) -> String {
    "The people gathered by the river at dawn, and the elders spoke. \
     \"Listen now to the words spoken in this place; do not turn aside.\" "
        .repeat(repeats)
}

fn bench_split_paragraph(c: &mut Criterion) {
    let splitter = ThreadSplitter::new(SplitConfig::new()).expect("valid config");
    let mut group = c.benchmark_group("split_paragraph");

    for repeats in [1, 10, 100] {
        let paragraph = dialogue_paragraph(repeats);
        group.bench_with_input(
            BenchmarkId::from_parameter(repeats),
            &paragraph,
            |b, paragraph| b.iter(|| splitter.split_paragraph(black_box(paragraph))),
        );
    }

    group.finish();
}

fn bench_run_on_bisection(c: &mut Criterion) {
    let splitter = ThreadSplitter::new(SplitConfig::new()).expect("valid config");
    let paragraph = vec!["abcd"; 2_000].join(" ");

    c.bench_function("bisect_run_on", |b| {
        b.iter(|| splitter.split_paragraph(black_box(&paragraph)));
    });
}

fn bench_split_paragraphs_parallel(c: &mut Criterion) {
    let splitter = ThreadSplitter::new(SplitConfig::new()).expect("valid config");
    let paragraphs: Vec<String> = (0..64).map(|_| dialogue_paragraph(5)).collect();

    c.bench_function("split_paragraphs_64", |b| {
        b.iter(|| splitter.split_paragraphs(black_box(&paragraphs)));
    });
}

criterion_group!(
    benches,
    bench_split_paragraph,
    bench_run_on_bisection,
    bench_split_paragraphs_parallel
);
criterion_main!(benches);
