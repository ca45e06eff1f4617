use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use lobviz_rs::config::RenderConfig;
use lobviz_rs::transform::types::TradeRow;
use lobviz_rs::transform::{latency, trades};

fn trade_rows(n: usize) -> Vec<TradeRow> {
    (0..n)
        .map(|i| TradeRow {
            trade_idx: i as u64,
            price: 10_000 + ((i as i64 * 31) % 400) - 200,
            qty: (i % 50) as u64 + 1,
        })
        .collect()
}

fn bench_transforms(c: &mut Criterion) {
    let cfg = RenderConfig::default();

    let rows = trade_rows(100_000);
    c.bench_function("reduce_100k_trades", |b| {
        b.iter(|| trades::reduce(black_box(&rows), &cfg))
    });

    let small = trade_rows(5_000);
    c.bench_function("reduce_5k_trades_raw", |b| {
        b.iter(|| trades::reduce(black_box(&small), &cfg))
    });

    let samples: Vec<u64> = (0..1_000_000u64).map(|i| (i * 2_654_435_761) % 5_000_000).collect();
    c.bench_function("summarize_1m_samples", |b| {
        b.iter(|| latency::summarize(black_box(&samples), cfg.clip_percentile))
    });
}

criterion_group!(benches, bench_transforms);
criterion_main!(benches);
