//! Latency statistics: percentile markers plus a display-safe subset.
//!
//! The clip threshold only bounds what the histogram shows; every reported
//! scalar comes from the full, unclipped sample set.

use tracing::debug;

use crate::transform::types::LatencySummary;

/// Summarize nanosecond samples. `clip_percentile` (99.5 in production)
/// bounds the display subset. Empty input means "no data", not zeros.
pub fn summarize(samples: &[u64], clip_percentile: f64) -> Option<LatencySummary> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = samples.iter().map(|&s| s as f64).collect();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    let p50 = percentile(&sorted, 50.0);
    let p90 = percentile(&sorted, 90.0);
    let p99 = percentile(&sorted, 99.0);
    let clip_ns = percentile(&sorted, clip_percentile);

    // Input order is preserved, mirroring a boolean-mask filter.
    let display: Vec<f64> = samples
        .iter()
        .map(|&s| s as f64)
        .filter(|&s| s <= clip_ns)
        .collect();

    let count = samples.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let min = sorted[0];
    let max = sorted[count - 1];

    let clipped = count - display.len();
    debug!(count, clipped, "summarized latency samples");
    Some(LatencySummary {
        p50,
        p90,
        p99,
        mean,
        min,
        max,
        count,
        clip_ns,
        display,
    })
}

/// Linear-interpolation percentile over a sorted, non-empty slice, endpoints
/// inclusive: rank = p/100 * (n-1), interpolated between the neighbouring
/// ranks. This matches the standard definition bit-for-bit.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0) * (n - 1) as f64;
    let lo = (rank.floor() as usize).min(n - 1);
    let hi = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CLIP: f64 = 99.5;

    #[test]
    fn empty_input_is_no_data() {
        assert!(summarize(&[], CLIP).is_none());
    }

    #[test]
    fn linear_interpolation_matches_definition() {
        // rank = p/100 * (n-1): two samples at p50 -> halfway
        assert_eq!(percentile(&[10.0, 20.0], 50.0), 15.0);
        // [1, 2, 3, 4] at p25 -> rank 0.75 -> 1.75
        assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 25.0), 1.75);

        // On a 0..=100 ramp, pXX lands on XX (up to fp rounding in rank)
        let ramp: Vec<f64> = (0..=100).map(|v| v as f64).collect();
        assert_eq!(percentile(&ramp, 50.0), 50.0);
        assert!((percentile(&ramp, 90.0) - 90.0).abs() < 1e-9);
        assert!((percentile(&ramp, 99.0) - 99.0).abs() < 1e-9);
        assert_eq!(percentile(&ramp, 0.0), 0.0);
        assert_eq!(percentile(&ramp, 100.0), 100.0);
    }

    #[test]
    fn ordering_and_clip_bound() {
        let samples: Vec<u64> = (0..2000).map(|i| (i * 7919) % 100_000).collect();
        let s = summarize(&samples, CLIP).unwrap();
        assert!(s.p50 <= s.p90 && s.p90 <= s.p99);
        let display_max = s.display.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(display_max <= s.clip_ns);
        // The tail actually got clipped from display
        assert!(s.display.len() < samples.len());
    }

    #[test]
    fn summary_comes_from_the_full_set() {
        // One huge outlier: dropped from display, still visible in max/mean.
        let mut samples = vec![100u64; 999];
        samples.push(1_000_000);
        let s = summarize(&samples, CLIP).unwrap();
        assert_eq!(s.count, 1000);
        assert_eq!(s.max, 1_000_000.0);
        assert_eq!(s.min, 100.0);
        assert!(s.mean > 100.0);
        assert_eq!(s.display.len(), 999);
    }

    #[test]
    fn identical_samples_do_not_degenerate() {
        let s = summarize(&[42u64; 512], CLIP).unwrap();
        assert_eq!(s.p50, 42.0);
        assert_eq!(s.p99, 42.0);
        assert_eq!(s.min, s.max);
        // Clip threshold equals every sample; nothing is dropped
        assert_eq!(s.display.len(), 512);
    }

    proptest! {
        #[test]
        fn percentiles_are_ordered(
            samples in prop::collection::vec(0u64..10_000_000, 1..500),
        ) {
            let s = summarize(&samples, 99.5).unwrap();
            prop_assert!(s.min <= s.p50);
            prop_assert!(s.p50 <= s.p90);
            prop_assert!(s.p90 <= s.p99);
            prop_assert!(s.p99 <= s.max);
            let display_max = s.display.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(display_max <= s.clip_ns);
            prop_assert!(!s.display.is_empty());
        }
    }
}
