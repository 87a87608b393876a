//! Settlement Planner - Entry Point
//!
//! Loads the initial world from a config file, then reads commands from
//! stdin (or a script file) until `close`.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use settlement_planner::command::Session;
use settlement_planner::core::error::Result;
use settlement_planner::core::SimulationConfig;
use settlement_planner::simulation::Simulation;
use tracing_subscriber::EnvFilter;

/// Settlement Planner - grow settlements one construction plan at a time
#[derive(Parser, Debug)]
#[command(name = "settlement-planner")]
#[command(about = "Run a settlement construction simulation from a config file")]
struct Args {
    /// Initial world: `.toml`, or the line format for any other extension
    config: PathBuf,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print the final plan summaries as JSON after the session ends
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("settlement_planner=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = SimulationConfig::load(&args.config)?;
    let simulation = Simulation::from_config(&config)?;
    tracing::info!(
        settlements = simulation.settlements().len(),
        facilities = simulation.catalog().len(),
        plans = simulation.plans().len(),
        "Simulation ready"
    );

    let mut session = Session::new(simulation);
    let stdout = io::stdout();
    match &args.script {
        Some(path) => {
            let script = BufReader::new(File::open(path)?);
            session.run(script, stdout.lock(), false)?;
        }
        None => session.run(io::stdin().lock(), stdout.lock(), true)?,
    }

    if args.json {
        let summaries: Vec<_> = session
            .simulation()
            .plans()
            .iter()
            .map(|plan| plan.summary())
            .collect();
        match serde_json::to_string_pretty(&summaries) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "Could not serialize plan summaries"),
        }
    }

    Ok(())
}
