//! Bollinger upper band: trailing mean + 2 * population stddev.
//!
//! Only the upper band is produced. The window grows from one sample until
//! it reaches `period`, so early bars get a deviation over however many
//! samples exist instead of NaN padding.

const BAND_MULTIPLIER: f64 = 2.0;

/// Compute the upper-band series. Output length equals input length.
pub fn compute_upper(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = Vec::with_capacity(n);

    for i in 0..n {
        let start = (i + 1).saturating_sub(period);
        let window = &closes[start..=i];
        let len = window.len() as f64;

        let mean = window.iter().sum::<f64>() / len;
        let variance = window
            .iter()
            .map(|c| {
                let diff = c - mean;
                diff * diff
            })
            .sum::<f64>()
            / len;

        result.push(mean + BAND_MULTIPLIER * variance.sqrt());
    }

    result
}
