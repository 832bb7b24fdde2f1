//! Performance benchmarks for the state store.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Map, Value};
use state_guardian::{normalize, normalize_by_field, Field, MiddlewareChain, Store};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// Benchmark dispatch cost with varying selector counts
fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for selectors in [0, 10, 100] {
        group.bench_with_input(
            BenchmarkId::new("selectors", selectors),
            &selectors,
            |b, &count| {
                let store = Store::new(object(json!({"count": 0, "user": "ada"})));
                let handles: Vec<_> = (0..count)
                    .map(|_| store.select(Field::key("count")))
                    .collect();

                b.iter(|| {
                    store.dispatch(|s| {
                        let next = s.get("count").and_then(Value::as_u64).unwrap_or(0) + 1;
                        object(json!({ "count": next }))
                    });
                    for handle in &handles {
                        black_box(handle.latest());
                    }
                });
            },
        );
    }

    group.finish();
}

/// Benchmark normalization of growing collections
fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for size in [100, 1000, 10000] {
        let rows: Vec<Value> = (0..size)
            .map(|i| json!({"id": format!("row-{}", i), "value": i}))
            .collect();

        group.bench_with_input(BenchmarkId::new("closure", size), &rows, |b, rows| {
            b.iter(|| normalize(black_box(rows), |r| r["id"].to_string()));
        });

        group.bench_with_input(BenchmarkId::new("by_field", size), &rows, |b, rows| {
            b.iter(|| normalize_by_field(black_box(rows), "id").unwrap());
        });
    }

    group.finish();
}

/// Benchmark middleware fan-out
fn bench_intercept(c: &mut Criterion) {
    let chain: MiddlewareChain = MiddlewareChain::new();
    for _ in 0..10 {
        chain.add_middleware(|_: &str, payload: &Value| -> Result<(), state_guardian::BoxError> {
            black_box(payload);
            Ok(())
        });
    }
    let payload = json!({"id": 1});

    c.bench_function("intercept_10", |b| {
        b.iter(|| chain.intercept("update", black_box(&payload)))
    });
}

criterion_group!(benches, bench_dispatch, bench_normalize, bench_intercept);
criterion_main!(benches);
