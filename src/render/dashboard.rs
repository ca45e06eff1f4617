//! Dashboard composer: three panels, one PNG.
//!
//! Every number drawn here is precomputed by the transform module; only
//! layout and drawing calls live in this file. Each panel degrades to a
//! placeholder on its own when its dataset is empty.

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;
use tracing::info;

use crate::config::RenderConfig;
use crate::render::theme::Theme;
use crate::transform::types::{DepthView, LatencySummary, TradeSeries};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing failed: {0}")]
    Draw(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(e.to_string())
    }
}

/// Compose the three derived series into a single image at `out`.
pub fn render_dashboard(
    out: &Path,
    depth: &DepthView,
    latency: Option<&LatencySummary>,
    trades: Option<&TradeSeries>,
    cfg: &RenderConfig,
    theme: &Theme,
) -> Result<(), RenderError> {
    let root = BitMapBackend::new(out, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "Low-Latency Limit Order Book — Dashboard",
        ("sans-serif", 26),
    )?;

    let panels = root.split_evenly((1, 3));
    draw_depth_panel(&panels[0], depth, theme)?;
    draw_latency_panel(&panels[1], latency, cfg, theme)?;
    draw_trade_panel(&panels[2], trades, theme)?;

    root.present()?;
    info!(out = %out.display(), "dashboard written");
    Ok(())
}

fn draw_depth_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    depth: &DepthView,
    theme: &Theme,
) -> Result<(), RenderError> {
    // window is None exactly when the whole book is empty
    let Some((x_lo, x_hi)) = depth.window else {
        return placeholder(area, "No book data");
    };

    let y_top = depth
        .bids
        .cumulative
        .last()
        .copied()
        .unwrap_or(0.0)
        .max(depth.asks.cumulative.last().copied().unwrap_or(0.0));
    let y_top = if y_top > 0.0 { y_top * 1.05 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption("Order Book Depth", ("sans-serif", 20))
        .margin(8)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_desc("Price ($)")
        .y_desc("Cumulative Quantity")
        .x_labels(6)
        .x_label_formatter(&|p: &f64| format!("{p:.2}"))
        .draw()?;

    for (curve, fill, line, label) in [
        (&depth.bids, theme.bid_fill, theme.bid_line, "Bids"),
        (&depth.asks, theme.ask_fill, theme.ask_line, "Asks"),
    ] {
        if curve.is_empty() {
            continue;
        }
        let steps = step_points(&curve.prices, &curve.cumulative);
        chart.draw_series(AreaSeries::new(steps.iter().copied(), 0.0, fill.mix(0.4)))?;
        chart
            .draw_series(LineSeries::new(steps, line.stroke_width(2)))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], line.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperMiddle)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK.mix(0.4))
        .draw()?;
    Ok(())
}

fn draw_latency_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    latency: Option<&LatencySummary>,
    cfg: &RenderConfig,
    theme: &Theme,
) -> Result<(), RenderError> {
    let Some(summary) = latency else {
        return placeholder(area, "No latency data");
    };

    let bins = bin_counts(&summary.display, cfg.histogram_bins);
    let x_lo = bins.first().map(|b| b.lo).unwrap_or(0.0);
    let x_hi = bins.last().map(|b| b.hi).unwrap_or(1.0);
    let y_top = bins.iter().map(|b| b.count).max().unwrap_or(1).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Latency Distribution", ("sans-serif", 20))
        .margin(8)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_desc("Latency (ns)")
        .y_desc("Count")
        .draw()?;

    chart.draw_series(bins.iter().filter(|b| b.count > 0).map(|b| {
        Rectangle::new(
            [(b.lo, 0.0), (b.hi, b.count as f64)],
            theme.histogram.mix(0.75).filled(),
        )
    }))?;

    for (value, tag, color) in [
        (summary.p50, "p50", theme.p50),
        (summary.p90, "p90", theme.p90),
        (summary.p99, "p99", theme.p99),
    ] {
        // Markers come from the full set and can land past the clipped
        // histogram range; pin them to the visible edge.
        let x = value.min(x_hi);
        chart
            .draw_series(DashedLineSeries::new(
                [(x, 0.0), (x, y_top)],
                6,
                4,
                color.stroke_width(2),
            ))?
            .label(format!("{tag}={}ns", value as u64))
            .legend(move |(lx, ly)| {
                PathElement::new(vec![(lx, ly), (lx + 16, ly)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK.mix(0.4))
        .draw()?;

    let note = format!(
        "n={}  avg={}ns  min={}ns  max={}ns",
        summary.count, summary.mean as u64, summary.min as u64, summary.max as u64
    );
    corner_note(area, &note)
}

fn draw_trade_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    trades: Option<&TradeSeries>,
    theme: &Theme,
) -> Result<(), RenderError> {
    let Some(series) = trades else {
        return placeholder(area, "No trade data");
    };

    let (raw_x, raw_y) = match series {
        TradeSeries::Raw {
            indices, prices, ..
        } => (indices, prices),
        TradeSeries::Smoothed {
            raw_indices,
            raw_prices,
            ..
        } => (raw_indices, raw_prices),
    };

    // trade_idx is non-decreasing, so first/last bound the x range; the
    // smoothed x positions are zero-based and may sit outside it.
    let mut x_lo = raw_x.first().copied().unwrap_or(0.0);
    let mut x_hi = raw_x.last().copied().unwrap_or(1.0);
    if let TradeSeries::Smoothed { xs, .. } = series {
        if let (Some(&a), Some(&b)) = (xs.first(), xs.last()) {
            x_lo = x_lo.min(a);
            x_hi = x_hi.max(b);
        }
    }
    if x_hi <= x_lo {
        x_hi = x_lo + 1.0; // single trade
    }

    let p_min = raw_y.iter().copied().fold(f64::INFINITY, f64::min);
    let p_max = raw_y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = ((p_max - p_min) * 0.05).max(0.01);

    let mut chart = ChartBuilder::on(area)
        .caption("Trade Prices Over Time", ("sans-serif", 20))
        .margin(8)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d(x_lo..x_hi, (p_min - pad)..(p_max + pad))?;

    chart
        .configure_mesh()
        .x_desc("Trade Index")
        .y_desc("Price ($)")
        .y_label_formatter(&|p: &f64| format!("{p:.2}"))
        .draw()?;

    match series {
        TradeSeries::Raw {
            indices,
            prices,
            sizes,
            qtys,
        } => {
            let qty_top = qtys.iter().copied().max().unwrap_or(1).max(1) as f64;
            chart.draw_series(indices.iter().zip(prices).zip(sizes.iter().zip(qtys)).map(
                |((&x, &y), (&size, &qty))| {
                    let color = theme.qty_color(qty as f64 / qty_top);
                    Circle::new((x, y), (size / 2.0) as i32, color.mix(0.6).filled())
                },
            ))?;
        }
        TradeSeries::Smoothed {
            xs,
            ys,
            window,
            raw_indices,
            raw_prices,
        } => {
            chart.draw_series(raw_indices.iter().zip(raw_prices).map(|(&x, &y)| {
                Circle::new((x, y), 1, theme.faint_scatter.mix(0.08).filled())
            }))?;
            let line = theme.ma_line;
            chart
                .draw_series(LineSeries::new(
                    xs.iter().copied().zip(ys.iter().copied()),
                    line.stroke_width(2),
                ))?
                .label(format!("MA({window})"))
                .legend(move |(lx, ly)| {
                    PathElement::new(vec![(lx, ly), (lx + 16, ly)], line.stroke_width(2))
                });
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.9))
                .border_style(BLACK.mix(0.4))
                .draw()?;
        }
    }

    let note = format!(
        "{} trades  |  price range: ${p_min:.2} - ${p_max:.2}",
        raw_y.len()
    );
    corner_note(area, &note)
}

/// Duplicate corner points so the curve renders as a step function, with
/// the jump landing on each level's own price.
fn step_points(prices: &[f64], cumulative: &[f64]) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(prices.len() * 2);
    for (i, (&p, &c)) in prices.iter().zip(cumulative).enumerate() {
        if i > 0 {
            points.push((p, cumulative[i - 1]));
        }
        points.push((p, c));
    }
    points
}

struct Bin {
    lo: f64,
    hi: f64,
    count: u64,
}

/// Equal-width occupancy counts over [min, max] of the values.
fn bin_counts(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Identical samples still get one visible bar.
    let width = if hi > lo { (hi - lo) / bins as f64 } else { 1.0 };

    let mut counts = vec![0u64; bins];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| Bin {
            lo: lo + width * i as f64,
            hi: lo + width * (i + 1) as f64,
            count,
        })
        .collect()
}

fn corner_note<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
) -> Result<(), RenderError> {
    area.draw(&Text::new(
        text.to_string(),
        (60, 44),
        ("sans-serif", 13).into_font().color(&BLACK.mix(0.75)),
    ))?;
    Ok(())
}

fn placeholder<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    message: &str,
) -> Result<(), RenderError> {
    let (w, h) = area.dim_in_pixel();
    let style = ("sans-serif", 22)
        .into_font()
        .color(&BLACK.mix(0.5))
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        message.to_string(),
        (w as i32 / 2, h as i32 / 2),
        style,
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_the_range_and_count_everything() {
        let values = [0.0, 1.0, 2.0, 3.0, 10.0];
        let bins = bin_counts(&values, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 5);
        assert_eq!(bins.first().unwrap().lo, 0.0);
        assert_eq!(bins.last().unwrap().hi, 10.0);
    }

    #[test]
    fn identical_values_fall_into_one_visible_bin() {
        let bins = bin_counts(&[7.0; 20], 80);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 20);
        assert_eq!(bins[0].count, 20);
    }

    #[test]
    fn empty_values_produce_no_bins() {
        assert!(bin_counts(&[], 80).is_empty());
    }

    #[test]
    fn step_points_duplicate_corners() {
        let points = step_points(&[100.5, 100.25], &[100.0, 150.0]);
        assert_eq!(
            points,
            vec![(100.5, 100.0), (100.25, 100.0), (100.25, 150.0)]
        );
    }
}
