//! Kernel benchmarks against their serial fallbacks.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use parseq::{addm, filter, pack, reduce, scan, sort_inplace, stable_sort_inplace, Flags};

const N: usize = 5_000_000;

fn input(n: usize) -> Vec<i64> {
    (0..n as i64).map(|i| (50021 * i + 61) % (1 << 20)).collect()
}

fn bench_reduce(c: &mut Criterion) {
    let a = input(N);
    let m = addm::<i64>();
    let mut group = c.benchmark_group("reduce");
    group.bench_function("parallel", |b| {
        b.iter(|| reduce(black_box(&a[..]), &m, Flags::NONE))
    });
    group.bench_function("sequential", |b| {
        b.iter(|| reduce(black_box(&a[..]), &m, Flags::SEQUENTIAL))
    });
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let a = input(N);
    let m = addm::<i64>();
    let mut group = c.benchmark_group("scan");
    group.bench_function("parallel", |b| {
        b.iter(|| scan(black_box(&a[..]), &m, Flags::NONE))
    });
    group.bench_function("sequential", |b| {
        b.iter(|| scan(black_box(&a[..]), &m, Flags::SEQUENTIAL))
    });
    group.finish();
}

fn bench_pack(c: &mut Criterion) {
    let a = input(N);
    let flags: Vec<bool> = (0..N).map(|i| i % 2 == 0).collect();
    let mut group = c.benchmark_group("pack");
    group.bench_function("parallel", |b| {
        b.iter(|| pack(black_box(&a[..]), &flags[..], Flags::NONE))
    });
    group.bench_function("sequential", |b| {
        b.iter(|| pack(black_box(&a[..]), &flags[..], Flags::SEQUENTIAL))
    });
    group.bench_function("filter parallel", |b| {
        b.iter(|| filter(black_box(&a[..]), |x| x % 2 == 0, Flags::NONE))
    });
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let a = input(N);
    let mut group = c.benchmark_group("sort");
    group.sample_size(10);
    group.bench_function("quicksort parallel", |b| {
        b.iter(|| {
            let mut v = a.clone();
            sort_inplace(&mut v[..], Flags::NONE);
            v
        })
    });
    group.bench_function("quicksort sequential", |b| {
        b.iter(|| {
            let mut v = a.clone();
            sort_inplace(&mut v[..], Flags::SEQUENTIAL);
            v
        })
    });
    group.bench_function("stable parallel", |b| {
        b.iter(|| {
            let mut v = a.clone();
            stable_sort_inplace(&mut v[..], Flags::NONE);
            v
        })
    });
    group.finish();
}

criterion_group!(benches, bench_reduce, bench_scan, bench_pack, bench_sort);
criterion_main!(benches);
