//! Pure conversions from book rows to drawable depth curves.
//!
//! No file or drawing calls live here; the render module owns presentation.

use itertools::{Itertools, MinMaxResult};
use tracing::debug;

use crate::transform::types::{BookLevelRow, DepthCurve, DepthView, Side};

const MARGIN_FRAC: f64 = 0.05;
/// Margin floor in display units, so a thin book still gets breathing room.
const MIN_MARGIN: f64 = 0.10;

/// Build both cumulative depth curves and the recommended x-axis window.
/// An empty side (one-sided book) yields an empty curve, not an error.
pub fn build_depth(rows: &[BookLevelRow]) -> DepthView {
    let mut bids: Vec<(i64, u64)> = Vec::new();
    let mut asks: Vec<(i64, u64)> = Vec::new();
    for row in rows {
        match row.side {
            Side::BID => bids.push((row.price, row.total_qty)),
            Side::ASK => asks.push((row.price, row.total_qty)),
        }
    }

    // Highest bid first, lowest ask first: the cumulative sum then reads as
    // "quantity available at or better than this price".
    bids.sort_unstable_by_key(|&(price, _)| std::cmp::Reverse(price));
    asks.sort_unstable_by_key(|&(price, _)| price);

    let bid_curve = accumulate(&bids);
    let ask_curve = accumulate(&asks);
    let window = axis_window(
        bid_curve
            .prices
            .iter()
            .chain(ask_curve.prices.iter())
            .copied(),
    );

    debug!(
        bid_levels = bids.len(),
        ask_levels = asks.len(),
        "built depth curves"
    );
    DepthView {
        bids: bid_curve,
        asks: ask_curve,
        window,
    }
}

fn accumulate(levels: &[(i64, u64)]) -> DepthCurve {
    let mut prices = Vec::with_capacity(levels.len());
    let mut cumulative = Vec::with_capacity(levels.len());
    let mut running = 0.0;
    for &(price, qty) in levels {
        running += qty as f64;
        prices.push(price as f64 / 100.0);
        cumulative.push(running);
    }
    DepthCurve { prices, cumulative }
}

/// Zoom window over the union of both sides' display prices:
/// [min - margin, max + margin] with margin = max(span * 0.05, 0.10).
fn axis_window(prices: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    match prices.minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(p) => Some((p - MIN_MARGIN, p + MIN_MARGIN)),
        MinMaxResult::MinMax(lo, hi) => {
            let margin = ((hi - lo) * MARGIN_FRAC).max(MIN_MARGIN);
            Some((lo - margin, hi + margin))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn level(side: Side, price: i64, qty: u64) -> BookLevelRow {
        BookLevelRow {
            side,
            price,
            total_qty: qty,
        }
    }

    #[test]
    fn worked_example() {
        let rows = vec![
            level(Side::BID, 10050, 100),
            level(Side::BID, 10025, 50),
            level(Side::ASK, 10075, 80),
        ];
        let view = build_depth(&rows);
        assert_eq!(view.bids.prices, vec![100.50, 100.25]);
        assert_eq!(view.bids.cumulative, vec![100.0, 150.0]);
        assert_eq!(view.asks.prices, vec![100.75]);
        assert_eq!(view.asks.cumulative, vec![80.0]);
        // span 0.50 -> margin max(0.025, 0.10) = 0.10
        let (lo, hi) = view.window.unwrap();
        assert!((lo - 100.15).abs() < 1e-9);
        assert!((hi - 100.85).abs() < 1e-9);
    }

    #[test]
    fn sorts_regardless_of_input_order() {
        let rows = vec![
            level(Side::ASK, 10090, 5),
            level(Side::BID, 10010, 1),
            level(Side::ASK, 10080, 7),
            level(Side::BID, 10040, 2),
        ];
        let view = build_depth(&rows);
        assert_eq!(view.bids.prices, vec![100.40, 100.10]);
        assert_eq!(view.bids.cumulative, vec![2.0, 3.0]);
        assert_eq!(view.asks.prices, vec![100.80, 100.90]);
        assert_eq!(view.asks.cumulative, vec![7.0, 12.0]);
    }

    #[test]
    fn one_sided_book_is_valid() {
        let view = build_depth(&[level(Side::BID, 9900, 10)]);
        assert!(view.asks.is_empty());
        assert_eq!(view.bids.prices, vec![99.0]);
        assert_eq!(view.bids.cumulative, vec![10.0]);
        let (lo, hi) = view.window.unwrap();
        assert!((lo - 98.90).abs() < 1e-9);
        assert!((hi - 99.10).abs() < 1e-9);
    }

    #[test]
    fn empty_book_has_no_window() {
        let view = build_depth(&[]);
        assert!(view.is_empty());
        assert!(view.window.is_none());
    }

    proptest! {
        #[test]
        fn cumulative_is_non_decreasing_and_bids_descend(
            levels in prop::collection::btree_map(0i64..20_000, 0u64..1_000, 0..64),
        ) {
            // btree_map keys give unique prices per side, per the caller contract
            let rows: Vec<BookLevelRow> = levels
                .iter()
                .map(|(&price, &qty)| level(Side::BID, price, qty))
                .collect();
            let view = build_depth(&rows);
            prop_assert_eq!(view.bids.prices.len(), rows.len());
            prop_assert_eq!(view.bids.cumulative.len(), rows.len());
            prop_assert!(view.bids.cumulative.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(view.bids.prices.windows(2).all(|w| w[0] > w[1]));
        }

        #[test]
        fn asks_ascend(
            levels in prop::collection::btree_map(0i64..20_000, 0u64..1_000, 1..64),
        ) {
            let rows: Vec<BookLevelRow> = levels
                .iter()
                .map(|(&price, &qty)| level(Side::ASK, price, qty))
                .collect();
            let view = build_depth(&rows);
            prop_assert!(view.asks.prices.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(view.window.is_some());
        }
    }
}
