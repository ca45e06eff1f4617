//! Synthetic dataset generator, standing in for
//! `lob_engine --simulate N --dump-data <dir>` so the dashboard can be
//! exercised and benchmarked without the engine. Deterministic per seed.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::transform::types::{BookLevelRow, LatencySample, Side, TradeRow};

const MID_CENTS: i64 = 10_000; // $100.00

/// Write book.csv, latency.csv and trades.csv into `dir`.
pub fn write_sample_data(dir: &Path, trades: usize, seed: u64) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    let mut rng = StdRng::seed_from_u64(seed);

    write_book(&dir.join("book.csv"), &mut rng)?;
    write_latency(&dir.join("latency.csv"), &mut rng, trades.max(1) * 4)?;
    write_trades(&dir.join("trades.csv"), &mut rng, trades)?;

    info!(dir = %dir.display(), trades, seed, "wrote sample datasets");
    Ok(())
}

fn write_book(path: &Path, rng: &mut StdRng) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for lvl in 0..60i64 {
        writer.serialize(BookLevelRow {
            side: Side::BID,
            price: MID_CENTS - 1 - lvl,
            total_qty: rng.gen_range(10..400),
        })?;
        writer.serialize(BookLevelRow {
            side: Side::ASK,
            price: MID_CENTS + 1 + lvl,
            total_qty: rng.gen_range(10..400),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_latency(path: &Path, rng: &mut StdRng, samples: usize) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for _ in 0..samples {
        // Base cost plus a heavy right tail, so the display clip has work
        // to do. gen::<f64>() is in [0, 1), keeping the log finite.
        let tail = -(1.0 - rng.gen::<f64>()).ln() * 180.0;
        let sample_ns = 250 + (tail * tail) as u64;
        writer.serialize(LatencySample { sample_ns })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_trades(path: &Path, rng: &mut StdRng, trades: usize) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut price = MID_CENTS;
    for trade_idx in 0..trades as u64 {
        price = (price + rng.gen_range(-3..=3)).clamp(MID_CENTS - 500, MID_CENTS + 500);
        writer.serialize(TradeRow {
            trade_idx,
            price,
            qty: rng.gen_range(1..=50),
        })?;
    }
    writer.flush()?;
    Ok(())
}
