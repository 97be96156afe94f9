//! Layered merge and write-routing performance benchmarks
//!
//! Benchmarks loading stacks of configuration files, rebuilding merged maps
//! and routing single writes through the merged view.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use inilayer_benchmarks::{criterion_config, write_layers};
use inilayer_config::{AggregateConfig, ConfigValue};

/// Benchmark opening a stack of files from disk
fn bench_open_layers(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_layers");
    group.measurement_time(std::time::Duration::from_secs(5));

    for layers in [1, 4, 16].iter() {
        let (_temp_dir, paths) = write_layers(*layers, 100);
        group.throughput(Throughput::Elements(*layers as u64));

        group.bench_with_input(BenchmarkId::new("layers", layers), &paths, |b, paths| {
            b.iter(|| black_box(AggregateConfig::open(&paths[0], &paths[1..]).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark rebuilding every merged map from already loaded sources
fn bench_remerge(c: &mut Criterion) {
    let mut group = c.benchmark_group("remerge");

    for layers in [2, 8, 32].iter() {
        let (_temp_dir, paths) = write_layers(*layers, 100);
        let config = AggregateConfig::open(&paths[0], &paths[1..]).unwrap().unwrap();
        let sources = config.sources().to_vec();

        group.bench_with_input(BenchmarkId::new("from_sources", layers), &sources, |b, sources| {
            b.iter_batched(
                || sources.clone(),
                |sources| black_box(AggregateConfig::from_sources(sources)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark a single routed write, which re-merges one kind
fn bench_set_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_value");

    for layers in [2, 8, 32].iter() {
        let (_temp_dir, paths) = write_layers(*layers, 100);
        let config = AggregateConfig::open(&paths[0], &paths[1..]).unwrap().unwrap();

        group.bench_with_input(BenchmarkId::new("by_key", layers), &config, |b, config| {
            b.iter_batched(
                || config.clone(),
                |mut config| {
                    config.set_value("PORT_42", ConfigValue::Int(9000), None).unwrap();
                    black_box(config)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_open_layers, bench_remerge, bench_set_value
}
criterion_main!(benches);
