//! Rule evaluator — scans the series against declarative trigger rules and
//! emits chronological buy/sell/alert events.
//!
//! Operands resolve per bar to `Option<f64>`; a missing value on either side
//! skips the rule for that bar rather than firing on a default. Two gates
//! throttle emission: a per-label debounce (the same BUY/SELL/ALERT label may
//! not re-fire within 5 bars of its own last emission) and a bounce-specific
//! global gate (no bounce within 10 bars of the most recent event of any
//! kind). A run that triggers nothing still yields one failsafe event so the
//! consumer always has something to render.

use crate::domain::{EventKind, Series, SimulatedEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Bars skipped at the start of every scan, letting indicators warm up.
pub const WARMUP_BARS: usize = 20;
/// Minimum bar distance between two events with the same label.
pub const LABEL_DEBOUNCE_BARS: usize = 5;
/// Minimum bar distance between any event and a subsequent bounce.
pub const BOUNCE_QUIET_BARS: usize = 10;
/// Fixed position of the failsafe event.
pub const FALLBACK_INDEX: usize = 50;

const SPIKE_DEFAULT_PERCENT: f64 = 10.0;
const BOUNCE_PROXIMITY: f64 = 0.015;

/// Trigger condition evaluated per bar.
///
/// `Above`/`Below` are transition-only and therefore behave exactly like the
/// cross triggers; both spellings are kept so existing configs parse.
/// `Drop` and `Every` are likewise accepted and never fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    CrossAbove,
    CrossBelow,
    Above,
    Below,
    Bounce,
    Spike,
    Drop,
    Every,
}

/// A rule operand: a numeric literal, or a field looked up per bar
/// (`close`, `volume`, or an indicator id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Literal(f64),
    Field(String),
}

impl Operand {
    pub fn field(name: impl Into<String>) -> Self {
        Operand::Field(name.into())
    }

    fn resolve(&self, point: &crate::domain::DataPoint) -> Option<f64> {
        match self {
            Operand::Literal(v) => Some(*v),
            Operand::Field(name) => point.field(name),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(v) => write!(f, "{v}"),
            Operand::Field(name) => f.write_str(name),
        }
    }
}

/// Optional per-rule parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

/// One declarative condition-action pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRule {
    pub trigger: Trigger,
    pub source: Operand,
    pub target: Operand,
    pub action: EventKind,
    #[serde(default)]
    pub params: RuleParams,
}

impl StrategyRule {
    pub fn new(trigger: Trigger, source: Operand, target: Operand, action: EventKind) -> Self {
        Self {
            trigger,
            source,
            target,
            action,
            params: RuleParams::default(),
        }
    }

    pub fn with_percent(mut self, percent: f64) -> Self {
        self.params.percent = Some(percent);
        self
    }
}

/// Scan the series against the rules and collect events in bar order.
pub fn evaluate_rules(series: &Series, rules: &[StrategyRule]) -> Vec<SimulatedEvent> {
    let mut events: Vec<SimulatedEvent> = Vec::new();
    // label -> bar index of its last emission
    let mut last_by_label: HashMap<&'static str, usize> = HashMap::new();
    let mut last_any: Option<usize> = None;

    for i in WARMUP_BARS..series.len() {
        let point = &series[i];
        let prev = &series[i - 1];

        for rule in rules {
            let (Some(src), Some(prev_src)) =
                (rule.source.resolve(point), rule.source.resolve(prev))
            else {
                continue;
            };
            let (Some(tgt), Some(prev_tgt)) =
                (rule.target.resolve(point), rule.target.resolve(prev))
            else {
                continue;
            };

            let fired = match rule.trigger {
                Trigger::CrossAbove | Trigger::Above => prev_src <= prev_tgt && src > tgt,
                Trigger::CrossBelow | Trigger::Below => prev_src >= prev_tgt && src < tgt,
                Trigger::Spike => {
                    // A zero prev_src divides to +/-inf (or NaN when src is
                    // also zero); the comparison then fires only for a move
                    // up off the zero line, which is the intended reading.
                    let percent = rule.params.percent.unwrap_or(SPIKE_DEFAULT_PERCENT);
                    (src - prev_src) / prev_src * 100.0 >= percent
                }
                Trigger::Bounce => {
                    let quiet = last_any.map_or(true, |last| i - last >= BOUNCE_QUIET_BARS);
                    quiet && (src - tgt).abs() < src * BOUNCE_PROXIMITY && src > prev_src
                }
                Trigger::Drop | Trigger::Every => false,
            };
            if !fired {
                continue;
            }

            let label = rule.action.label();
            if let Some(&last) = last_by_label.get(label) {
                if i - last < LABEL_DEBOUNCE_BARS {
                    continue;
                }
            }

            events.push(SimulatedEvent::new(
                i,
                series.len(),
                rule.action,
                point.close,
                describe(rule, src, prev_src),
            ));
            last_by_label.insert(label, i);
            last_any = Some(i);
        }
    }

    if events.is_empty() {
        if let Some(event) = fallback_event(series, rules) {
            events.push(event);
        }
    }

    events
}

fn describe(rule: &StrategyRule, src: f64, prev_src: f64) -> String {
    match rule.trigger {
        Trigger::CrossAbove | Trigger::Above => {
            format!("{} crossed above {}", rule.source, rule.target)
        }
        Trigger::CrossBelow | Trigger::Below => {
            format!("{} crossed below {}", rule.source, rule.target)
        }
        Trigger::Spike => {
            let pct = (src - prev_src) / prev_src * 100.0;
            format!("{} spiked {pct:.1}% in one bar", rule.source)
        }
        Trigger::Bounce => format!("{} bounced off {}", rule.source, rule.target),
        Trigger::Drop | Trigger::Every => String::new(),
    }
}

/// The failsafe: no natural trigger fired, so synthesize one event at a
/// fixed index using the first rule's action. The price comes from the
/// nearest in-range bar when the series is shorter than the fixed index.
fn fallback_event(series: &Series, rules: &[StrategyRule]) -> Option<SimulatedEvent> {
    let rule = rules.first()?;
    let price = series
        .get(FALLBACK_INDEX)
        .or_else(|| series.last())
        .map(|p| p.close)?;
    Some(SimulatedEvent::new(
        FALLBACK_INDEX,
        series.len(),
        rule.action,
        price,
        "failsafe: no rule triggered during the run",
    ))
}
