//! Story composer — turns a free-text strategy description into a
//! three-scene story: context, action, resolution.
//!
//! Classification is case-insensitive substring matching. No randomness is
//! involved here: the same text always composes the same story.

use crate::domain::{MarketState, Scene, Story};

/// Broad shape of the strategy described by the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupKind {
    /// Price pushes through a level and keeps going. The trending default:
    /// unrecognized text falls through to this.
    Breakout,
    /// Price dips (or spikes) away from the prevailing trend, then reverts.
    Reversion,
}

/// What the composer read out of the text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoryIntent {
    pub setup: SetupKind,
    /// +1.0 bullish, -1.0 bearish.
    pub direction: f64,
    pub high_volatility: bool,
}

const BEARISH_KEYWORDS: &[&str] = &["short", "sell", "bear", "put", "down"];
const REVERSION_KEYWORDS: &[&str] = &[
    "dip",
    "bounce",
    "pullback",
    "support",
    "oversold",
    "overbought",
    "reversal",
    "revert",
];
const VOLATILITY_KEYWORDS: &[&str] = &["volatil", "choppy", "wild"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Classify a strategy description.
pub fn classify(text: &str) -> StoryIntent {
    let lower = text.to_lowercase();
    let direction = if contains_any(&lower, BEARISH_KEYWORDS) {
        -1.0
    } else {
        1.0
    };
    let setup = if contains_any(&lower, REVERSION_KEYWORDS) {
        SetupKind::Reversion
    } else {
        SetupKind::Breakout
    };
    StoryIntent {
        setup,
        direction,
        high_volatility: contains_any(&lower, VOLATILITY_KEYWORDS),
    }
}

/// Compose the three-scene story for a strategy description.
///
/// - **Context**: the setup. Modest trend in the strategy's direction,
///   low-to-moderate noise, no momentum.
/// - **Action**: the triggering move. Breakouts amplify the same direction;
///   reversion setups move against it (the dip/spike to revert from).
/// - **Resolution**: breakouts keep running; reversion setups swing back
///   toward the original trend.
pub fn compose_story(text: &str) -> Story {
    let intent = classify(text);
    let sign = intent.direction;
    let vol = if intent.high_volatility { 1.8 } else { 1.0 };

    let scenes = match intent.setup {
        SetupKind::Breakout => vec![
            Scene::new(40, MarketState::new(0.3 * sign, 0.6 * vol, 0.0, 1.0)),
            Scene::new(15, MarketState::new(0.9 * sign, 1.5 * vol, 0.8, 2.5)),
            Scene::new(35, MarketState::new(0.5 * sign, 0.9 * vol, 0.3, 1.4)),
        ],
        SetupKind::Reversion => vec![
            Scene::new(35, MarketState::new(0.3 * sign, 0.6 * vol, 0.0, 1.0)),
            Scene::new(20, MarketState::new(-0.7 * sign, 1.8 * vol, 0.6, 2.2)),
            Scene::new(35, MarketState::new(0.45 * sign, 0.9 * vol, 0.25, 1.3)),
        ],
    };

    Story::new(scenes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_text_is_bullish_breakout() {
        let intent = classify("just make the line go up");
        assert_eq!(intent.setup, SetupKind::Breakout);
        assert_eq!(intent.direction, 1.0);
        assert!(!intent.high_volatility);
    }

    #[test]
    fn short_breakout_is_bearish_and_amplified() {
        let story = compose_story("Short bollinger band breakout");
        assert_eq!(story.scenes.len(), 3);

        let trends: Vec<f64> = story.scenes.iter().map(|s| s.state.trend).collect();
        assert!(trends[0] < 0.0);
        assert!(trends[2] < 0.0);
        // Action scene pushes harder in the same (negative) direction.
        assert!(trends[1] < trends[0]);
        assert!(trends[1] < trends[2]);
    }

    #[test]
    fn dip_text_composes_counter_trend_action() {
        let story = compose_story("buy the dip on support");
        let trends: Vec<f64> = story.scenes.iter().map(|s| s.state.trend).collect();
        assert!(trends[0] > 0.0);
        assert!(trends[1] < 0.0);
        assert!(trends[2] > 0.0);
    }

    #[test]
    fn volatility_keywords_raise_noise() {
        let calm = compose_story("breakout");
        let wild = compose_story("volatile breakout");
        for (a, b) in calm.scenes.iter().zip(&wild.scenes) {
            assert!(b.state.volatility > a.state.volatility);
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("SELL THE BOUNCE").direction, -1.0);
        assert_eq!(classify("SELL THE BOUNCE").setup, SetupKind::Reversion);
    }

    #[test]
    fn durations_match_scene_script() {
        let breakout = compose_story("momentum breakout");
        assert_eq!(
            breakout.scenes.iter().map(|s| s.duration).collect::<Vec<_>>(),
            vec![40, 15, 35]
        );

        let reversion = compose_story("buy the dip");
        assert_eq!(
            reversion.scenes.iter().map(|s| s.duration).collect::<Vec<_>>(),
            vec![35, 20, 35]
        );
    }

    #[test]
    fn same_text_same_story() {
        let a = compose_story("RSI oversold bounce");
        let b = compose_story("RSI oversold bounce");
        assert_eq!(a, b);
    }
}
