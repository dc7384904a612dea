//! Relative Strength Index (RSI), Wilder smoothing.
//!
//! Bars up to and including the warm-up window report a flat neutral 50.
//! Averages are seeded from the first `period` diffs, then smoothed with
//! `avg = (avg * (period - 1) + current) / period` per subsequent bar.
//! A zero average loss is treated as 1 when forming the ratio, so the
//! output never divides by zero (and never quite pins to 100).

const NEUTRAL: f64 = 50.0;

/// Compute the RSI series. Output length equals input length.
pub fn compute(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    if n <= period {
        return vec![NEUTRAL; n];
    }

    let mut result = vec![NEUTRAL; period + 1];
    result.reserve(n - period - 1);

    // Seed averages from the first `period` diffs.
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let diff = closes[i] - closes[i - 1];
        if diff > 0.0 {
            avg_gain += diff;
        } else {
            avg_loss -= diff;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    for i in (period + 1)..n {
        let diff = closes[i] - closes[i - 1];
        let gain = if diff > 0.0 { diff } else { 0.0 };
        let loss = if diff < 0.0 { -diff } else { 0.0 };

        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;

        let rs = avg_gain / if avg_loss == 0.0 { 1.0 } else { avg_loss };
        result.push(100.0 - 100.0 / (1.0 + rs));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmup_is_flat_fifty() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 2.0).collect();
        let result = compute(&closes, 14);
        for (i, &v) in result.iter().take(15).enumerate() {
            assert_eq!(v, 50.0, "bar {i} not neutral");
        }
        assert_ne!(result[15], 50.0);
    }

    #[test]
    fn rsi_stays_in_range() {
        let closes = [
            100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0, 85.0, 125.0, 80.0,
        ];
        let result = compute(&closes, 3);
        for (i, &v) in result.iter().enumerate() {
            assert!((0.0..=100.0).contains(&v), "RSI out of range at bar {i}: {v}");
        }
    }

    #[test]
    fn steady_gains_push_rsi_high() {
        // With the zero-loss guard, rs equals the average gain itself:
        // +9 per bar gives rsi = 100 - 100/(1 + 9) = 90.
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64 * 9.0).collect();
        let result = compute(&closes, 3);
        assert!(*result.last().unwrap() > 70.0);
    }

    #[test]
    fn steady_losses_push_rsi_low() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let result = compute(&closes, 3);
        assert!(*result.last().unwrap() < 30.0);
    }

    #[test]
    fn zero_loss_does_not_divide_by_zero() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64 * 2.0).collect();
        let result = compute(&closes, 3);
        assert!(result.iter().all(|v| v.is_finite()));
        // With the zero-loss guard the ratio stays finite, below 100.
        assert!(*result.last().unwrap() < 100.0);
    }

    #[test]
    fn short_series_is_all_neutral() {
        let result = compute(&[100.0, 101.0, 102.0], 14);
        assert_eq!(result, vec![50.0, 50.0, 50.0]);
    }

    #[test]
    fn output_length_matches_input() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + (i % 5) as f64).collect();
        assert_eq!(compute(&closes, 14).len(), 25);
    }
}
