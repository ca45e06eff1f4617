//! Trade series reducer: raw scatter for small series, a centered moving
//! average (with the raw points kept for a faint overlay) past the
//! configured threshold.

use tracing::debug;

use crate::config::RenderConfig;
use crate::transform::types::{TradeRow, TradeSeries};

/// Reduce an ordered trade series to its drawable form. Empty input means
/// "no data". The threshold and sizing constants are policy from the
/// config, not constants baked into the math.
pub fn reduce(rows: &[TradeRow], cfg: &RenderConfig) -> Option<TradeSeries> {
    if rows.is_empty() {
        return None;
    }

    let n = rows.len();
    if n > cfg.smooth_threshold {
        // Window grows with the series but never exceeds it.
        let window = (n / cfg.window_divisor.max(1))
            .max(cfg.min_window)
            .clamp(1, n);
        debug!(n, window, "trade series above scatter threshold, smoothing");
        Some(smooth(rows, window))
    } else {
        debug!(n, "trade series within scatter threshold");
        Some(raw(rows, cfg))
    }
}

fn raw(rows: &[TradeRow], cfg: &RenderConfig) -> TradeSeries {
    let indices = rows.iter().map(|r| r.trade_idx as f64).collect();
    let prices = rows.iter().map(|r| r.price as f64 / 100.0).collect();
    let sizes = rows
        .iter()
        .map(|r| {
            (r.qty as f64 * cfg.point_size_scale).clamp(cfg.point_size_min, cfg.point_size_max)
        })
        .collect();
    let qtys = rows.iter().map(|r| r.qty).collect();
    TradeSeries::Raw {
        indices,
        prices,
        sizes,
        qtys,
    }
}

/// Uniform-kernel moving average, valid mode: only fully covered windows
/// contribute, so the output is `n - window + 1` points with no edge
/// padding. Each output is placed at `i + window / 2` so the average sits
/// under the middle of its window instead of left-aligned.
fn smooth(rows: &[TradeRow], window: usize) -> TradeSeries {
    let prices: Vec<f64> = rows.iter().map(|r| r.price as f64 / 100.0).collect();
    let n = prices.len();

    let mut ys = Vec::with_capacity(n - window + 1);
    let mut sum: f64 = prices[..window].iter().sum();
    ys.push(sum / window as f64);
    for i in window..n {
        sum += prices[i] - prices[i - window];
        ys.push(sum / window as f64);
    }

    let xs = (0..ys.len()).map(|i| (i + window / 2) as f64).collect();
    let raw_indices = rows.iter().map(|r| r.trade_idx as f64).collect();

    TradeSeries::Smoothed {
        xs,
        ys,
        window,
        raw_indices,
        raw_prices: prices,
    }
}
