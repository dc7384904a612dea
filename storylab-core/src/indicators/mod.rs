//! Indicator calculator — derived series attached to the bars in place.
//!
//! Indicators are pure functions over the close series. They are computed
//! once after generation and written into each bar's indicator map under the
//! config's id; OHLCV fields and `time` are never touched. Duplicate ids
//! overwrite (last config wins).

pub mod bollinger;
pub mod rsi;
pub mod sma;

use crate::domain::Series;
use serde::{Deserialize, Serialize};

/// Supported indicator types.
///
/// `Ema` is accepted by the schema for input compatibility but the
/// calculator does not compute it: no field is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Sma,
    Ema,
    Rsi,
    Bollinger,
}

/// Declares one derived series to compute.
///
/// `source` and `color` are cosmetic passthroughs from the caller's config;
/// the calculator itself always reads closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    pub period: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl IndicatorConfig {
    pub fn new(id: impl Into<String>, kind: IndicatorKind, period: usize) -> Self {
        Self {
            id: id.into(),
            kind,
            period,
            source: None,
            color: None,
        }
    }
}

/// Compute every configured indicator and attach its values to the series.
pub fn calculate_indicators(series: &mut Series, configs: &[IndicatorConfig]) {
    if series.is_empty() {
        return;
    }

    let closes: Vec<f64> = series.iter().map(|p| p.close).collect();

    for config in configs {
        let values = match config.kind {
            IndicatorKind::Sma => sma::compute(&closes, config.period),
            IndicatorKind::Rsi => rsi::compute(&closes, config.period),
            IndicatorKind::Bollinger => bollinger::compute_upper(&closes, config.period),
            IndicatorKind::Ema => continue,
        };
        debug_assert_eq!(values.len(), series.len());

        for (point, value) in series.iter_mut().zip(values) {
            point.indicators.insert(config.id.clone(), value);
        }
    }
}

/// Build a series from close prices for testing: open = prev close,
/// high/low a fixed envelope, volume 1000.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> Series {
    use crate::domain::DataPoint;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            DataPoint {
                time: i,
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
                indicators: Default::default(),
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attaches_one_field_per_config() {
        let mut series = make_series(&[100.0, 101.0, 102.0, 103.0, 104.0]);
        let configs = vec![
            IndicatorConfig::new("sma3", IndicatorKind::Sma, 3),
            IndicatorConfig::new("rsi3", IndicatorKind::Rsi, 3),
        ];
        calculate_indicators(&mut series, &configs);

        for point in &series {
            assert!(point.indicator("sma3").is_some());
            assert!(point.indicator("rsi3").is_some());
        }
    }

    #[test]
    fn ema_is_recognized_but_not_attached() {
        let mut series = make_series(&[100.0, 101.0, 102.0]);
        let configs = vec![IndicatorConfig::new("ema5", IndicatorKind::Ema, 5)];
        calculate_indicators(&mut series, &configs);
        assert!(series.iter().all(|p| p.indicator("ema5").is_none()));
    }

    #[test]
    fn duplicate_id_last_config_wins() {
        let mut series = make_series(&[10.0, 20.0, 30.0, 40.0]);
        let configs = vec![
            IndicatorConfig::new("x", IndicatorKind::Sma, 2),
            IndicatorConfig::new("x", IndicatorKind::Rsi, 2),
        ];
        calculate_indicators(&mut series, &configs);
        // RSI values, not SMA: warm-up bars report 50.
        assert_eq!(series[0].indicator("x"), Some(50.0));
    }

    #[test]
    fn ohlcv_untouched_by_calculation() {
        let mut series = make_series(&[100.0, 101.0, 102.0, 103.0]);
        let before = series.clone();
        calculate_indicators(
            &mut series,
            &[IndicatorConfig::new("sma2", IndicatorKind::Sma, 2)],
        );
        for (a, b) in before.iter().zip(&series) {
            assert_eq!(a.time, b.time);
            assert_eq!(a.open, b.open);
            assert_eq!(a.high, b.high);
            assert_eq!(a.low, b.low);
            assert_eq!(a.close, b.close);
            assert_eq!(a.volume, b.volume);
        }
    }

    #[test]
    fn config_deserializes_from_toml() {
        let config: IndicatorConfig = toml::from_str(
            r##"
            id = "bb_upper"
            type = "bollinger"
            period = 20
            color = "#888"
            "##,
        )
        .unwrap();
        assert_eq!(config.kind, IndicatorKind::Bollinger);
        assert_eq!(config.period, 20);
    }

    #[test]
    fn empty_series_is_a_no_op() {
        let mut series = Series::new();
        calculate_indicators(
            &mut series,
            &[IndicatorConfig::new("sma2", IndicatorKind::Sma, 2)],
        );
        assert!(series.is_empty());
    }
}
