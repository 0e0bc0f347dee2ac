//! Benchmark the full write/read smoke roundtrip against a tempdir.

use criterion::{criterion_group, criterion_main, Criterion};
use sonda::smoke::{self, SmokeConfig};
use std::hint::black_box;
use tempfile::TempDir;

fn bench_roundtrip(c: &mut Criterion) {
    let tmp_dir = TempDir::new().unwrap();
    let config = SmokeConfig {
        path: tmp_dir.path().join("bench.txt"),
        payload: b"Hello, World!".to_vec(),
        skip_write: false,
        skip_read: false,
    };

    c.bench_function("smoke_roundtrip", |b| {
        b.iter(|| {
            let mut echoed = Vec::with_capacity(smoke::LINE_BUF_LEN);
            let report = smoke::run(&config, &mut echoed).unwrap();
            black_box((report, echoed));
        })
    });
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);
