//! StoryLab CLI — compose and simulate commands.
//!
//! Commands:
//! - `compose` — turn a strategy description into a story script (TOML),
//!   ready to edit and feed back in via `simulate --config`
//! - `simulate` — run one simulation from a description or a config file,
//!   print the event timeline, and optionally write the result as JSON

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storylab_core::{
    compose_story, run_simulation, EventKind, IndicatorConfig, IndicatorKind, Operand,
    SimulationConfig, SimulationRun, StrategyRule, Trigger,
};

#[derive(Parser)]
#[command(
    name = "storylab",
    about = "StoryLab CLI — synthetic market simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a story script from a strategy description and print it as TOML.
    Compose {
        /// Strategy description, e.g. "short bollinger band breakout".
        text: String,
    },
    /// Run one simulation and print the event timeline.
    Simulate {
        /// Strategy description to compose a story from.
        #[arg(long)]
        text: Option<String>,

        /// Path to a TOML simulation config (story, indicators, rules).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Indicator preset (with --text): standard, oscillator, bands.
        #[arg(long)]
        indicators: Option<String>,

        /// Rule preset (with --text): sma-cross, bollinger-breakout, rsi-spike.
        #[arg(long)]
        rules: Option<String>,

        /// Master seed. Defaults to a random seed (printed for replay).
        #[arg(long)]
        seed: Option<u64>,

        /// Write the full result (series + events) as JSON.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compose { text } => run_compose(&text),
        Commands::Simulate {
            text,
            config,
            indicators,
            rules,
            seed,
            output,
        } => run_simulate(text, config, indicators, rules, seed, output),
    }
}

fn run_compose(text: &str) -> Result<()> {
    let config = SimulationConfig::new(
        compose_story(text),
        indicator_preset("standard")?,
        rule_preset("sma-cross")?,
    );
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn run_simulate(
    text: Option<String>,
    config_path: Option<PathBuf>,
    indicator_preset_name: Option<String>,
    rule_preset_name: Option<String>,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    if text.is_some() && config_path.is_some() {
        bail!("--text and --config are mutually exclusive");
    }
    if config_path.is_some() && (indicator_preset_name.is_some() || rule_preset_name.is_some()) {
        bail!("--indicators/--rules presets only apply with --text; the config file carries its own");
    }

    let config = match (text, config_path) {
        (Some(text), None) => SimulationConfig::new(
            compose_story(&text),
            indicator_preset(indicator_preset_name.as_deref().unwrap_or("standard"))?,
            rule_preset(rule_preset_name.as_deref().unwrap_or("sma-cross"))?,
        ),
        (None, Some(path)) => SimulationConfig::from_file(&path)?,
        _ => bail!("one of --text or --config is required"),
    };

    let master_seed = seed.unwrap_or_else(rand::random);
    let run = run_simulation(&config, master_seed)?;

    print_summary(&run, master_seed);

    if let Some(path) = output {
        std::fs::write(&path, serde_json::to_string_pretty(&run)?)?;
        println!("Result written to: {}", path.display());
    }

    Ok(())
}

/// Named indicator sets applied when simulating from plain text.
/// `standard` carries every series the rule presets reference.
fn indicator_preset(name: &str) -> Result<Vec<IndicatorConfig>> {
    let configs = match name {
        "standard" => vec![
            IndicatorConfig::new("sma20", IndicatorKind::Sma, 20),
            IndicatorConfig::new("rsi", IndicatorKind::Rsi, 14),
            IndicatorConfig::new("bb_upper", IndicatorKind::Bollinger, 20),
        ],
        "oscillator" => vec![IndicatorConfig::new("rsi", IndicatorKind::Rsi, 14)],
        "bands" => vec![
            IndicatorConfig::new("sma20", IndicatorKind::Sma, 20),
            IndicatorConfig::new("bb_upper", IndicatorKind::Bollinger, 20),
        ],
        _ => bail!("unknown indicator preset '{name}'. Valid: standard, oscillator, bands"),
    };
    Ok(configs)
}

/// Named rule sets applied when simulating from plain text.
fn rule_preset(name: &str) -> Result<Vec<StrategyRule>> {
    let rules = match name {
        "sma-cross" => vec![
            StrategyRule::new(
                Trigger::CrossAbove,
                Operand::field("close"),
                Operand::field("sma20"),
                EventKind::Buy,
            ),
            StrategyRule::new(
                Trigger::CrossBelow,
                Operand::field("close"),
                Operand::field("sma20"),
                EventKind::Sell,
            ),
            StrategyRule::new(
                Trigger::CrossAbove,
                Operand::field("close"),
                Operand::field("bb_upper"),
                EventKind::Alert,
            ),
        ],
        "bollinger-breakout" => vec![
            StrategyRule::new(
                Trigger::CrossAbove,
                Operand::field("close"),
                Operand::field("bb_upper"),
                EventKind::Buy,
            ),
            StrategyRule::new(
                Trigger::CrossBelow,
                Operand::field("close"),
                Operand::field("sma20"),
                EventKind::Sell,
            ),
        ],
        "rsi-spike" => vec![StrategyRule::new(
            Trigger::Spike,
            Operand::field("rsi"),
            Operand::Literal(0.0),
            EventKind::Buy,
        )
        .with_percent(10.0)],
        _ => bail!("unknown rule preset '{name}'. Valid: sma-cross, bollinger-breakout, rsi-spike"),
    };
    Ok(rules)
}

fn print_summary(run: &SimulationRun, master_seed: u64) {
    let first = run.series.first().map(|p| p.close).unwrap_or(0.0);
    let last = run.series.last().map(|p| p.close).unwrap_or(0.0);

    println!();
    println!("=== Simulation Result ===");
    println!("Seed:    {master_seed} (sub-seed {})", run.seed);
    println!("Bars:    {}", run.series.len());
    println!("Close:   {first:.2} -> {last:.2}");
    println!("Events:  {}", run.events.len());
    println!();
    if run.events.is_empty() {
        return;
    }
    println!("{:<6} {:<7} {:>9}  {}", "Bar", "Label", "Price", "Reason");
    println!("{}", "-".repeat(60));
    for event in &run.events {
        println!(
            "{:<6} {:<7} {:>9.2}  {}",
            event.index, event.label, event.price, event.reason
        );
    }
    println!();
}
