//! Benchmarks for bar assembly.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dwm_statusbar::engine::{assembler, BarId, Engine, MemoryLogSink, SegmentId};
use dwm_statusbar::types::StatusbarConfig;

fn filled_engine(top_capacity: usize) -> Engine {
    let mut config = StatusbarConfig::default();
    config.bars.top_capacity = top_capacity;
    let mut engine = Engine::from_config(&config, Box::new(MemoryLogSink::new()));
    for id in SegmentId::ALL {
        let text = format!("{} reading with some ünïcode padding", id);
        let _ = engine.apply_update(id, text);
    }
    engine
}

fn bench_assemble_fits(c: &mut Criterion) {
    let engine = filled_engine(4096);

    c.bench_function("assemble_fits", |b| {
        b.iter(|| assembler::assemble(engine.registry(), black_box(BarId::Top)))
    });
}

fn bench_assemble_truncated(c: &mut Criterion) {
    let engine = filled_engine(96);

    c.bench_function("assemble_truncated", |b| {
        b.iter(|| assembler::assemble(engine.registry(), black_box(BarId::Top)))
    });
}

criterion_group!(benches, bench_assemble_fits, bench_assemble_truncated);
criterion_main!(benches);
