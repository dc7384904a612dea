//! StoryLab Core — synthetic market simulator.
//!
//! Turns a natural-language strategy description into an animated market
//! timeline:
//! - Story composer: text → three-scene script (context, action, resolution)
//! - Physics generator: scenes → continuous OHLCV random walk with trend,
//!   momentum, and noise terms
//! - Indicator calculator: SMA / RSI / Bollinger upper band attached in place
//! - Rule evaluator: declarative triggers → chronological buy/sell/alert
//!   events, with debounce gates and a guaranteed failsafe event
//!
//! One run is a pure function from `(SimulationConfig, master seed)` to
//! `(series, events)` — no shared mutable state, no I/O.

pub mod composer;
pub mod config;
pub mod domain;
pub mod indicators;
pub mod physics;
pub mod rng;
pub mod rules;
pub mod sim;

pub use composer::compose_story;
pub use config::{ConfigError, SimulationConfig};
pub use domain::{DataPoint, EventKind, MarketState, Scene, Series, SimulatedEvent, Story};
pub use indicators::{calculate_indicators, IndicatorConfig, IndicatorKind};
pub use physics::generate_series;
pub use rules::{evaluate_rules, Operand, StrategyRule, Trigger};
pub use sim::{run_simulation, simulate_text, SimulationRun};
