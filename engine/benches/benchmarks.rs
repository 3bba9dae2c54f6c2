//! Performance benchmarks for shelf-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use shelf_engine::{Collection, IdArg, JsonFields, LocalStore, MemoryStorage, Record};

fn fields(i: u64) -> JsonFields {
    json!({"name": format!("Dog {}", i), "breed": "Mutt"})
        .as_object()
        .cloned()
        .unwrap_or_default()
}

fn populated_store(size: u64) -> LocalStore<JsonFields, MemoryStorage> {
    let mut store = LocalStore::new(MemoryStorage::new(), "dogs");
    for i in 0..size {
        let _ = store.add(fields(i));
    }
    store
}

fn bench_store_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_operations");

    group.bench_function("add", |b| {
        let mut store = LocalStore::new(MemoryStorage::new(), "dogs");
        let mut i = 0u64;

        b.iter(|| {
            i += 1;
            store.add(black_box(fields(i)))
        })
    });

    group.bench_function("get_by_id", |b| {
        let mut store = populated_store(1000);
        b.iter(|| store.get_by_id(black_box(500)))
    });

    group.bench_function("get_by_string_id", |b| {
        let mut store = populated_store(1000);
        b.iter(|| store.get_by_id(black_box("500")))
    });

    group.bench_function("update", |b| {
        let mut store = populated_store(1000);
        b.iter(|| store.update(black_box(Record::new(500, fields(500)))))
    });

    group.bench_function("load_all", |b| {
        let mut store = populated_store(1000);
        b.iter(|| store.load_all())
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [10u64, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("load_all", size), &size, |b, &size| {
            let mut store = populated_store(size);
            b.iter(|| store.load_all())
        });

        group.bench_with_input(BenchmarkId::new("lookup_last", size), &size, |b, &size| {
            let collection = populated_store(size).load_all().unwrap_or_default();
            let id = IdArg::from(size);
            b.iter(|| collection.get(black_box(&id)).is_some())
        });
    }

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    let mut collection = Collection::new();
    for i in 0..1000 {
        let _ = collection.push(fields(i));
    }
    let text = serde_json::to_string(&collection).unwrap_or_default();

    group.bench_function("serialize_1000", |b| {
        b.iter(|| serde_json::to_string(black_box(&collection)))
    });

    group.bench_function("deserialize_1000", |b| {
        b.iter(|| serde_json::from_str::<Collection<JsonFields>>(black_box(&text)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_store_operations,
    bench_scaling,
    bench_serialization
);
criterion_main!(benches);
