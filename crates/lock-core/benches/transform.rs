use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lock_core::{consonant_lock, Transformer};

const SHORT: &str = "こんにちは";
const SENTENCE: &str = "わたしは、おにぎりがたべたいです。ドラえもんはあおいロボットです。";

fn bench_consonant_lock(c: &mut Criterion) {
    let long = SENTENCE.repeat(50);

    c.bench_function("consonant_lock/short", |b| {
        b.iter(|| consonant_lock(black_box(SHORT), black_box("pa")))
    });
    c.bench_function("consonant_lock/sentence", |b| {
        b.iter(|| consonant_lock(black_box(SENTENCE), black_box("ma")))
    });
    c.bench_function("consonant_lock/long", |b| {
        b.iter(|| consonant_lock(black_box(&long), black_box("ga")))
    });
    c.bench_function("consonant_lock/unknown_row", |b| {
        b.iter(|| consonant_lock(black_box(&long), black_box("xx")))
    });
}

fn bench_explain(c: &mut Criterion) {
    let t = Transformer::new();
    c.bench_function("explain/sentence", |b| {
        b.iter(|| t.explain(black_box(SENTENCE), black_box("sa"), false))
    });
}

criterion_group!(benches, bench_consonant_lock, bench_explain);
criterion_main!(benches);
