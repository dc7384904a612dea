//! SimulatedEvent — a buy/sell/alert marker produced by the rule evaluator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of event emitted on a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Buy,
    Sell,
    Alert,
    Info,
}

impl EventKind {
    /// Uppercase marker label used on charts and for debounce bookkeeping.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Buy => "BUY",
            EventKind::Sell => "SELL",
            EventKind::Alert => "ALERT",
            EventKind::Info => "INFO",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One emitted event, positioned on a bar of the series.
///
/// `time` is the bar's percentage position in the series (0..100), which is
/// what the rendering layer keys its animation timeline on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedEvent {
    pub index: usize,
    pub time: f64,
    pub kind: EventKind,
    pub label: String,
    pub price: f64,
    pub reason: String,
}

impl SimulatedEvent {
    pub fn new(
        index: usize,
        series_len: usize,
        kind: EventKind,
        price: f64,
        reason: impl Into<String>,
    ) -> Self {
        let time = if series_len == 0 {
            0.0
        } else {
            index as f64 / series_len as f64 * 100.0
        };
        Self {
            index,
            time,
            kind,
            label: kind.label().to_string(),
            price,
            reason: reason.into(),
        }
    }
}
