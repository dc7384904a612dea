//! DataPoint — one synthetic OHLCV bar plus attached indicator values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One synthetic bar.
///
/// The OHLCV fields and `time` are written once by the physics generator and
/// never altered afterwards. Indicator values are attached later by the
/// indicator calculator, keyed by the indicator's configured id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub time: usize,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub indicators: BTreeMap<String, f64>,
}

impl DataPoint {
    /// Look up an attached indicator value by id.
    pub fn indicator(&self, id: &str) -> Option<f64> {
        self.indicators.get(id).copied()
    }

    /// Resolve a named field: `close`, `volume`, or an indicator id.
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "close" => Some(self.close),
            "volume" => Some(self.volume),
            _ => self.indicator(name),
        }
    }

    /// Basic OHLC sanity check: high envelopes both open and close, low is
    /// below both.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}

/// The full ordered sequence of bars for one run, indexed 0..N-1 contiguously.
pub type Series = Vec<DataPoint>;
