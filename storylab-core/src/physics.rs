//! Market physics — walks a story and produces the synthetic OHLCV series.
//!
//! A single `PathState` accumulator is folded across every tick of every
//! scene: scenes compose one continuous price path, not independent resets.
//! Randomness is injected so a seeded `StdRng` reproduces a run bit for bit.

use crate::domain::{DataPoint, MarketState, Series, Story};
use rand::Rng;
use std::collections::BTreeMap;

const SEED_PRICE: f64 = 100.0;
const TREND_SCALE: f64 = 0.2;
const MOMENTUM_SCALE: f64 = 0.1;
const WICK_SCALE: f64 = 0.5;
const BASE_VOLUME: f64 = 1000.0;

/// Price-path accumulator threaded across the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathState {
    pub price: f64,
    pub velocity: f64,
}

impl Default for PathState {
    fn default() -> Self {
        Self {
            price: SEED_PRICE,
            velocity: 0.0,
        }
    }
}

impl PathState {
    /// Advance one tick under the given market state, returning the bar and
    /// the updated accumulator.
    ///
    /// With positive momentum the velocity integrates the trend force every
    /// tick with no decay term, so it can grow without bound across long
    /// high-momentum scenes. That is the original behavior and it is kept:
    /// the runaway acceleration is what makes breakout stories look dramatic.
    fn step(self, time: usize, state: &MarketState, rng: &mut impl Rng) -> (DataPoint, PathState) {
        let trend_force = state.trend * TREND_SCALE;
        let velocity = if state.momentum > 0.0 {
            self.velocity + trend_force * state.momentum * MOMENTUM_SCALE
        } else {
            trend_force
        };

        let noise = (rng.gen::<f64>() - 0.5) * state.volatility;
        let open = self.price;
        let close = self.price + velocity + noise;

        let high = open.max(close) + rng.gen::<f64>() * state.volatility * WICK_SCALE;
        let low = open.min(close) - rng.gen::<f64>() * state.volatility * WICK_SCALE;
        let volume = BASE_VOLUME * state.volume * (1.0 + rng.gen::<f64>());

        let point = DataPoint {
            time,
            open,
            high,
            low,
            close,
            volume,
            indicators: BTreeMap::new(),
        };
        (
            point,
            PathState {
                price: close,
                velocity,
            },
        )
    }
}

/// Generate the OHLCV series for a story.
///
/// An empty story yields an empty series. `time` on each bar equals its
/// position in the returned vector.
pub fn generate_series(story: &Story, rng: &mut impl Rng) -> Series {
    let mut series = Series::with_capacity(story.total_ticks());
    let mut path = PathState::default();
    let mut time = 0;

    for scene in &story.scenes {
        for _ in 0..scene.duration {
            let (point, next) = path.step(time, &scene.state, rng);
            series.push(point);
            path = next;
            time += 1;
        }
    }

    series
}
