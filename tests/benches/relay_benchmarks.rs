//! # Beacon Relay Benchmarks
//!
//! | Path | Concern |
//! |------|---------|
//! | Observation store | upsert and drain under a cycle's worth of sightings |
//! | Batch assembly | 6000-record flood plus wire encoding |
//! | Heuristics | analysis of a flooded batch |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

use beacon_heuristics::HeuristicsEngine;
use shared_types::{Observation, SpoofMode};
use spoof_relay::{BatchAssembler, CycleScheduler, ObservationStore, ServiceIdStrategy};

fn sightings(devices: usize, repeats: usize) -> Vec<Observation> {
    (0..repeats)
        .flat_map(|r| {
            (0..devices).map(move |d| {
                let address = format!("AA:BB:CC:DD:{:02X}:{:02X}", d / 256, d % 256);
                Observation::new(address, -60, r as u64)
            })
        })
        .collect()
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("observation-store");

    for devices in [10usize, 100, 1000] {
        let input = sightings(devices, 10);
        group.throughput(Throughput::Elements(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("record_then_drain", devices), &input, |b, input| {
            b.iter(|| {
                let store = ObservationStore::new();
                for obs in input {
                    store.record(obs.clone());
                }
                black_box(store.drain_all())
            })
        });
    }

    group.finish();
}

fn flooded_batch() -> shared_types::Batch {
    let assembler = BatchAssembler::new(7, 6000, ServiceIdStrategy::Shared);
    let mut scheduler = CycleScheduler::new(SpoofMode::BeaconFlooding, 1);
    let tick = scheduler.advance();
    let mut rng = StdRng::seed_from_u64(1);
    assembler
        .assemble(sightings(20, 1), &tick, 1_700_000_000_000, &mut rng)
        .batch
}

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch-assembly");
    let assembler = BatchAssembler::new(7, 6000, ServiceIdStrategy::Shared);
    let genuine = sightings(20, 1);

    group.bench_function("beacon_flood_6000", |b| {
        let mut scheduler = CycleScheduler::new(SpoofMode::BeaconFlooding, 1);
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| {
            let tick = scheduler.advance();
            black_box(assembler.assemble(genuine.clone(), &tick, 1_700_000_000_000, &mut rng))
        })
    });

    let batch = flooded_batch();
    group.throughput(Throughput::Elements(batch.len() as u64));
    group.bench_function("encode_flooded_line", |b| {
        b.iter(|| black_box(batch.encode_line()))
    });

    group.finish();
}

fn bench_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("heuristics");
    let batch = flooded_batch();
    let engine = HeuristicsEngine::default();
    let trusted = HashSet::new();

    group.throughput(Throughput::Elements(batch.len() as u64));
    group.bench_function("analyze_flooded_batch", |b| {
        b.iter(|| black_box(engine.analyze(batch.observations(), &trusted)))
    });

    group.finish();
}

criterion_group!(benches, bench_store, bench_assembly, bench_heuristics);
criterion_main!(benches);
