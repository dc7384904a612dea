//! Top-level simulation run: validate → generate → indicators → rules.

use crate::composer::compose_story;
use crate::config::{ConfigError, SimulationConfig};
use crate::domain::{Series, SimulatedEvent};
use crate::indicators::{calculate_indicators, IndicatorConfig};
use crate::physics::generate_series;
use crate::rng::SimSeeds;
use crate::rules::{evaluate_rules, StrategyRule};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The output of one run: the bar series with indicators attached, the
/// emitted events, and the sub-seed the path was generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub series: Series,
    pub events: Vec<SimulatedEvent>,
    pub seed: u64,
}

/// Run one simulation.
///
/// Pure function of `(config, master_seed)`: it allocates its own series and
/// event list and touches no shared state, so independent call sites may
/// invoke it concurrently. The same inputs reproduce the same output.
pub fn run_simulation(
    config: &SimulationConfig,
    master_seed: u64,
) -> Result<SimulationRun, ConfigError> {
    config.validate()?;

    let hash = config.config_hash();
    let seeds = SimSeeds::new(master_seed);
    let seed = seeds.sub_seed(&hash);
    let mut rng = seeds.rng_for(&hash);

    let short_hash = &hash[..16];
    debug!(
        scenes = config.story.scenes.len(),
        ticks = config.story.total_ticks(),
        config = %short_hash,
        "generating series"
    );
    let mut series = generate_series(&config.story, &mut rng);

    calculate_indicators(&mut series, &config.indicators);
    let events = evaluate_rules(&series, &config.rules);
    debug!(
        bars = series.len(),
        events = events.len(),
        "simulation complete"
    );

    Ok(SimulationRun {
        series,
        events,
        seed,
    })
}

/// Compose a story from a strategy description and run it.
pub fn simulate_text(
    text: &str,
    indicators: Vec<IndicatorConfig>,
    rules: Vec<StrategyRule>,
    master_seed: u64,
) -> Result<SimulationRun, ConfigError> {
    let config = SimulationConfig::new(compose_story(text), indicators, rules);
    run_simulation(&config, master_seed)
}
