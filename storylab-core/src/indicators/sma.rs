//! Simple Moving Average (SMA).
//!
//! Rolling mean of closes over a trailing window. Bars before the window has
//! filled report the current close instead of NaN, so the plotted line hugs
//! price until the window is warm.

/// Compute the SMA series. Output length equals input length.
pub fn compute(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = Vec::with_capacity(n);
    let mut sum = 0.0;

    for i in 0..n {
        sum += closes[i];
        if i >= period {
            sum -= closes[i - period];
        }
        if i + 1 < period {
            result.push(closes[i]);
        } else {
            result.push(sum / period as f64);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_rolls_the_window() {
        let result = compute(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
        assert_approx(result[4], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn warmup_reports_current_close() {
        let result = compute(&[10.0, 20.0, 30.0, 40.0], 3);
        assert_eq!(result[0], 10.0);
        assert_eq!(result[1], 20.0);
    }

    #[test]
    fn sma_bounded_by_window_extremes() {
        let closes = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0];
        let period = 3;
        let result = compute(&closes, period);
        for i in (period - 1)..closes.len() {
            let window = &closes[i + 1 - period..=i];
            let min = window.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert!(result[i] >= min && result[i] <= max, "bar {i}: {}", result[i]);
        }
    }

    #[test]
    fn period_one_is_identity() {
        let closes = [4.0, 7.0, 2.0];
        assert_eq!(compute(&closes, 1), closes.to_vec());
    }

    #[test]
    fn output_length_matches_input() {
        assert_eq!(compute(&[1.0, 2.0], 5).len(), 2);
        assert!(compute(&[], 5).is_empty());
    }
}
