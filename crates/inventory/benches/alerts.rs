use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Duration, TimeZone, Utc};
use stocktrack_core::ItemId;
use stocktrack_inventory::{
    InMemoryItemStore, InventoryItem, ItemStatus, compute_alerts, encode_identity,
    resolve_identity,
};

fn snapshot(size: usize) -> Vec<InventoryItem> {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    (0..size)
        .map(|i| {
            let item = InventoryItem::new(
                ItemId::parse(format!("item-{i}")).unwrap(),
                format!("Item {i}"),
                "Bench",
                (i % 12) as u32,
            )
            .unwrap()
            .with_reorder_threshold(4);
            match i % 4 {
                0 => item.with_expiry_date(base + Duration::days((i % 60) as i64)),
                1 => item.with_next_maintenance_date(base + Duration::days((i % 45) as i64)),
                2 => item.with_status(ItemStatus::LowStock),
                _ => item,
            }
        })
        .collect()
}

fn bench_compute_alerts(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let mut group = c.benchmark_group("compute_alerts");

    for size in [100usize, 1_000, 10_000] {
        let items = snapshot(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| compute_alerts(black_box(items), now, 30))
        });
    }

    group.finish();
}

fn bench_resolve_identity(c: &mut Criterion) {
    let items = snapshot(1_000);
    let payload = encode_identity(&items[777]);
    let store = InMemoryItemStore::with_items(items);

    c.bench_function("resolve_identity/raw_id", |b| {
        b.iter(|| resolve_identity(black_box(&payload), &store))
    });
    c.bench_function("resolve_identity/miss", |b| {
        b.iter(|| resolve_identity(black_box("not-a-known-item"), &store))
    });
}

criterion_group!(benches, bench_compute_alerts, bench_resolve_identity);
criterion_main!(benches);
