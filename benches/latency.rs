//! Per-event latency benchmarks.
//!
//! Measures the five maintenance operations in isolation plus a mixed
//! workload. There is no "place that matches" benchmark here - this engine
//! never crosses orders, so every `add` takes the same rest-only path.

use arena_lob::{BookId, Engine, EngineConfig, Event, Side};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const BOOK: BookId = 0;

fn engine_with_capacity(orders_per_book: u32) -> Engine {
    Engine::with_config(EngineConfig {
        book_capacity: 1,
        levels_per_book: 1024,
        orders_per_book,
        ..EngineConfig::default()
    })
    .unwrap()
}

fn random_event(rng: &mut ChaCha8Rng, external_id: u64) -> Event {
    let magnitude = rng.gen_range(9_900..10_100);
    let signed_price = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
    Event::Add { external_id, book_id: BOOK, signed_price, qty: rng.gen_range(1..1_000) }
}

/// `add` that always rests at a fresh, never-before-seen price - the
/// worst case for the price index (always an insert, never a find).
fn bench_add_new_price(c: &mut Criterion) {
    let mut engine = engine_with_capacity(1 << 20);
    let mut external_id = 0u64;
    let mut price = 0i32;

    c.bench_function("add_new_price", |b| {
        b.iter(|| {
            external_id += 1;
            price = (price + 1) % arena_lob::PRICE_INDEX_CAPACITY as i32;
            black_box(engine.apply(Event::Add { external_id, book_id: BOOK, signed_price: price, qty: 100 }))
        })
    });
}

/// `add` that always joins the same existing level - the price index is
/// never touched, only the level's aggregate and a fresh order slot.
fn bench_add_existing_price(c: &mut Criterion) {
    let mut engine = engine_with_capacity(1 << 20);
    engine.apply(Event::Add { external_id: 0, book_id: BOOK, signed_price: 10_000, qty: 100 }).unwrap();
    let mut external_id = 1u64;

    c.bench_function("add_existing_price", |b| {
        b.iter(|| {
            external_id += 1;
            black_box(engine.apply(Event::Add { external_id, book_id: BOOK, signed_price: 10_000, qty: 100 }))
        })
    });
}

/// `delete` at varying book depth - verifies cost stays flat as the level
/// count on a side grows, since lookup is through the directory, not a
/// scan of the book.
fn bench_delete_at_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_at_depth");

    for depth in [1usize, 64, 512].into_iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter_batched(
                || {
                    let mut engine = engine_with_capacity(1 << 16);
                    for i in 0..depth as u64 {
                        engine
                            .apply(Event::Add { external_id: i, book_id: BOOK, signed_price: i as i32, qty: 10 })
                            .unwrap();
                    }
                    engine
                },
                |mut engine| black_box(engine.apply(Event::Delete { external_id: 0 })),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// `execute` that partially fills a resting order, repeatedly, until it is
/// consumed - exercises both the partial (reduce-delegating) and full
/// (delete-delegating) paths.
fn bench_execute_partial_then_full(c: &mut Criterion) {
    c.bench_function("execute_partial_then_full", |b| {
        b.iter_batched(
            || {
                let mut engine = engine_with_capacity(1 << 12);
                engine.apply(Event::Add { external_id: 1, book_id: BOOK, signed_price: 10_000, qty: 1_000 }).unwrap();
                engine
            },
            |mut engine| {
                black_box(engine.apply(Event::Execute { external_id: 1, qty: 400 }).unwrap());
                black_box(engine.apply(Event::Execute { external_id: 1, qty: 600 }).unwrap());
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

/// `replace` moving an order to a brand new price on the same side.
fn bench_replace(c: &mut Criterion) {
    c.bench_function("replace", |b| {
        let mut engine = engine_with_capacity(1 << 16);
        let mut next_id = 0u64;
        engine.apply(Event::Add { external_id: next_id, book_id: BOOK, signed_price: 10_000, qty: 100 }).unwrap();

        b.iter(|| {
            let old_id = next_id;
            next_id += 1;
            let new_id = next_id;
            black_box(
                engine
                    .apply(Event::Replace { old_id, new_id, new_price_magnitude: 10_000 + (next_id as u32 % 500), new_qty: 100 })
                    .unwrap(),
            )
        })
    });
}

fn bench_top_of_book(c: &mut Criterion) {
    let mut engine = engine_with_capacity(1 << 16);
    for i in 0..256u64 {
        engine.apply(Event::Add { external_id: i, book_id: BOOK, signed_price: i as i32, qty: 10 }).unwrap();
    }

    c.bench_function("top_of_book", |b| b.iter(|| black_box(engine.top(BOOK, Side::Bid).unwrap())));
}

/// Mixed 70% add / 30% delete workload, matching the ratio used by the
/// determinism and fuzz test suites.
fn bench_mixed_workload(c: &mut Criterion) {
    c.bench_function("mixed_70_add_30_delete", |b| {
        let mut engine = engine_with_capacity(1 << 20);
        let mut rng = ChaCha8Rng::seed_from_u64(0xDEAD_BEEF);
        let mut next_id = 0u64;
        let mut live: Vec<u64> = Vec::new();

        for _ in 0..1_000 {
            let event = random_event(&mut rng, next_id);
            next_id += 1;
            if engine.apply(event).is_ok() {
                live.push(next_id - 1);
            }
        }

        b.iter(|| {
            if live.is_empty() || rng.gen_bool(0.7) {
                let event = random_event(&mut rng, next_id);
                next_id += 1;
                if engine.apply(event).is_ok() {
                    live.push(next_id - 1);
                }
            } else {
                let idx = rng.gen_range(0..live.len());
                let external_id = live.swap_remove(idx);
                black_box(engine.apply(Event::Delete { external_id }).unwrap());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_add_new_price,
    bench_add_existing_price,
    bench_delete_at_depth,
    bench_execute_partial_then_full,
    bench_replace,
    bench_top_of_book,
    bench_mixed_workload,
);

criterion_main!(benches);
