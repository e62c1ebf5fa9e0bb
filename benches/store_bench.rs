//! Benchmarks for persistkv store operations
//!
//! Put cost grows with the number of stored keys since every put rewrites
//! the whole file.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use persistkv::Store;
use tempfile::TempDir;

fn filled_store(dir: &TempDir, count: usize) -> Store {
    let mut store = Store::new(dir.path().join("bench.db"));
    store.open().unwrap();
    for i in 0..count {
        store.put(&format!("key{:06}", i), i as i64).unwrap();
    }
    store
}

fn put_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("put_rewrite");

    for &count in &[10usize, 100, 1_000] {
        let dir = TempDir::new().unwrap();
        let mut store = filled_store(&dir, count);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| store.put("hot", black_box("value")).unwrap());
        });
    }

    group.finish();
}

fn get_benchmarks(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let store = filled_store(&dir, 1_000);

    c.bench_function("get_memory", |b| {
        b.iter(|| store.get(black_box("key000500")).unwrap());
    });
}

fn open_benchmarks(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let mut store = filled_store(&dir, 1_000);
    store.close().unwrap();
    let path = store.path().to_path_buf();

    c.bench_function("open_1000_keys", |b| {
        b.iter(|| {
            let mut store = Store::new(&path);
            store.open().unwrap();
            store.close().unwrap();
        });
    });
}

criterion_group!(benches, put_benchmarks, get_benchmarks, open_benchmarks);
criterion_main!(benches);
