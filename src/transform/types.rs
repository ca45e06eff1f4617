use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    BID,
    ASK,
}

// One aggregated price level from book.csv
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevelRow {
    pub side: Side,
    pub price: i64, // fixed-point cents
    pub total_qty: u64,
}

// One per-event latency measurement from latency.csv
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySample {
    pub sample_ns: u64,
}

// One executed trade from trades.csv; trade_idx is non-decreasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRow {
    pub trade_idx: u64,
    pub price: i64, // fixed-point cents
    pub qty: u64,
}

/// One side of the book as a drawable step curve. Prices are display units,
/// strictly descending for bids and strictly ascending for asks;
/// `cumulative` is the running total quantity in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepthCurve {
    pub prices: Vec<f64>,
    pub cumulative: Vec<f64>,
}

impl DepthCurve {
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepthView {
    pub bids: DepthCurve,
    pub asks: DepthCurve,
    /// Recommended x-axis range around the spread. None when the whole book
    /// is empty, in which case the panel shows a placeholder instead.
    pub window: Option<(f64, f64)>,
}

impl DepthView {
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// Summary of the full latency sample set plus a clipped subset for display.
/// Every scalar here is computed from the unclipped samples; `display` only
/// limits what the histogram shows.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencySummary {
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    /// Upper bound of the histogram range (the configured high percentile).
    pub clip_ns: f64,
    /// Samples at or below `clip_ns`, in input order.
    pub display: Vec<f64>,
}

/// Trade panel series, resolved once at transform time. The composer matches
/// on the variant; nothing downstream re-inspects the row count.
#[derive(Debug, Clone, PartialEq)]
pub enum TradeSeries {
    /// Small series: one scatter point per trade.
    Raw {
        indices: Vec<f64>,
        prices: Vec<f64>,
        /// Point sizes, already clamped to the configured range.
        sizes: Vec<f64>,
        /// Raw quantities, kept for color mapping.
        qtys: Vec<u64>,
    },
    /// Large series: centered moving average plus the raw points for a
    /// faint overlay.
    Smoothed {
        xs: Vec<f64>,
        ys: Vec<f64>,
        window: usize,
        raw_indices: Vec<f64>,
        raw_prices: Vec<f64>,
    },
}
