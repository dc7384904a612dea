//! Scene — a fixed-parameter segment of synthetic market behavior.
//!
//! A `Story` is an ordered sequence of scenes scripting one full simulation
//! run. Stories are constructed once per run and never mutated.

use serde::{Deserialize, Serialize};

/// Market parameters held constant for the duration of one scene.
///
/// - `trend`: directional bias in [-1, 1] (negative = bearish).
/// - `volatility`: noise amplitude, >= 0.
/// - `momentum`: velocity-compounding strength, >= 0. Zero means the path
///   moves at constant trend speed; positive values accelerate it.
/// - `volume`: volume multiplier, >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    pub trend: f64,
    pub volatility: f64,
    pub momentum: f64,
    pub volume: f64,
}

impl MarketState {
    pub fn new(trend: f64, volatility: f64, momentum: f64, volume: f64) -> Self {
        Self {
            trend,
            volatility,
            momentum,
            volume,
        }
    }

    /// True if every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.trend.is_finite()
            && self.volatility.is_finite()
            && self.momentum.is_finite()
            && self.volume.is_finite()
    }
}

/// One scene: a tick count plus the market state that governs it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub duration: usize,
    pub state: MarketState,
}

impl Scene {
    pub fn new(duration: usize, state: MarketState) -> Self {
        Self { duration, state }
    }
}

/// The full script for one simulation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Story {
    pub scenes: Vec<Scene>,
}

impl Story {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self { scenes }
    }

    /// Total tick count across all scenes. The generated series has exactly
    /// this many bars.
    pub fn total_ticks(&self) -> usize {
        self.scenes.iter().map(|s| s.duration).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_ticks_sums_durations() {
        let story = Story::new(vec![
            Scene::new(40, MarketState::new(0.3, 0.5, 0.0, 1.0)),
            Scene::new(15, MarketState::new(0.9, 1.5, 0.8, 2.0)),
            Scene::new(35, MarketState::new(0.5, 0.8, 0.3, 1.2)),
        ]);
        assert_eq!(story.total_ticks(), 90);
    }

    #[test]
    fn empty_story_has_zero_ticks() {
        assert_eq!(Story::default().total_ticks(), 0);
        assert!(Story::default().is_empty());
    }

    #[test]
    fn state_detects_non_finite() {
        let mut state = MarketState::new(0.3, 0.5, 0.0, 1.0);
        assert!(state.is_finite());
        state.volatility = f64::NAN;
        assert!(!state.is_finite());
    }

    #[test]
    fn story_serialization_roundtrip() {
        let story = Story::new(vec![Scene::new(10, MarketState::new(-0.4, 1.0, 0.2, 1.5))]);
        let json = serde_json::to_string(&story).unwrap();
        let deser: Story = serde_json::from_str(&json).unwrap();
        assert_eq!(story, deser);
    }
}
