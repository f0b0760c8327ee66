//! Benchmarks for simulation, rendering and definition loading.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use libdfa::prelude::*;
use libdfa::registry::EntryDefinition;

/// Input of `len` symbols that keeps automaton A out of its trap state
fn accepted_binary(len: usize) -> String {
    let mut input = String::from("111000");
    input.extend((6..len).map(|i| if i % 3 == 0 { '1' } else { '0' }));
    input
}

/// Input of `len` symbols cycling over B's alphabet
fn ab_input(len: usize) -> String {
    "aaabb".chars().chain("ab".chars().cycle()).take(len).collect()
}

// ============================================================================
// Simulation
// ============================================================================

/// Benchmark: Full runs with growing input length
fn bench_simulate_input_length(c: &mut Criterion) {
    let registry = Registry::builtin().unwrap();
    let a = registry.select("a").unwrap();
    let b = registry.select("b").unwrap();
    let mut group = c.benchmark_group("simulate_input_length");

    for len in [8, 64, 512, 4096].iter() {
        group.throughput(Throughput::Elements(*len as u64));

        let input = accepted_binary(*len);
        group.bench_with_input(BenchmarkId::new("a", len), &input, |bench, input| {
            bench.iter(|| black_box(simulate(&a.automaton, black_box(input))));
        });

        let input = ab_input(*len);
        group.bench_with_input(BenchmarkId::new("b", len), &input, |bench, input| {
            bench.iter(|| black_box(simulate(&b.automaton, black_box(input))));
        });
    }
    group.finish();
}

/// Benchmark: Early halt on a foreign symbol versus a complete run
fn bench_simulate_halt(c: &mut Criterion) {
    let registry = Registry::builtin().unwrap();
    let b = registry.select("b").unwrap();
    let mut group = c.benchmark_group("simulate_halt");

    let complete = ab_input(1024);
    let mut halting = ab_input(16);
    halting.push('c');
    halting.push_str(&ab_input(1007));

    group.bench_function("complete", |bench| {
        bench.iter(|| black_box(simulate(&b.automaton, black_box(&complete))));
    });
    group.bench_function("invalid_symbol", |bench| {
        bench.iter(|| black_box(simulate(&b.automaton, black_box(&halting))));
    });
    group.finish();
}

/// Benchmark: Stepping a simulator by hand
fn bench_simulator_feed(c: &mut Criterion) {
    let registry = Registry::builtin().unwrap();
    let a = registry.select("a").unwrap();
    let input = accepted_binary(512);

    c.bench_function("simulator_feed_512", |bench| {
        bench.iter(|| {
            let simulator = Simulator::new(&a.automaton);
            black_box(simulator.run(black_box(&input)))
        });
    });
}

// ============================================================================
// Rendering and loading
// ============================================================================

/// Benchmark: DOT output with and without a highlighted run
fn bench_render_dot(c: &mut Criterion) {
    let registry = Registry::builtin().unwrap();
    let b = registry.select("b").unwrap();
    let run = b.check(&ab_input(64));
    let mut group = c.benchmark_group("render_dot");

    group.bench_function("plain", |bench| {
        bench.iter(|| black_box(to_dot(&b.automaton, None)));
    });
    group.bench_function("highlighted", |bench| {
        bench.iter(|| black_box(to_dot(&b.automaton, Some(&run))));
    });
    group.bench_function("step_table", |bench| {
        bench.iter(|| black_box(step_table(&run.trace)));
    });
    group.finish();
}

/// Benchmark: Parsing and validating a JSON definition
fn bench_load_json(c: &mut Criterion) {
    let registry = Registry::builtin().unwrap();
    let json = serde_json::to_string(&EntryDefinition::from(registry.select("b").unwrap())).unwrap();

    c.bench_function("load_json_b", |bench| {
        bench.iter(|| {
            let mut loaded = Registry::new();
            black_box(loaded.load_json(black_box(&json)).unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_simulate_input_length,
    bench_simulate_halt,
    bench_simulator_feed,
    bench_render_dot,
    bench_load_json,
);
criterion_main!(benches);
