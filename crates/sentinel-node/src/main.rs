//! Sentinel node entry point.
//!
//! Loads configuration, initializes telemetry and replays a call script.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use sentinel_node::{Cli, NodeConfig, Runner, Script, DEMO_SCRIPT};
use sentinel_telemetry::{gather_metrics, init_telemetry};
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = NodeConfig::load(&cli).context("invalid configuration")?;
    let _telemetry = init_telemetry(&config.telemetry).context("failed to initialize telemetry")?;

    info!(
        version = sentinel_registry::VERSION,
        limits = ?config.limits,
        "Starting sentinel node"
    );

    let script = match &config.script {
        Some(path) => {
            Script::load(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Script::from_json(DEMO_SCRIPT).context("built-in demo script is invalid")?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut runner = Runner::new(config.service_config());
    let summary = runner.run(&script, &mut out)?;

    writeln!(
        out,
        "{} calls: {} accepted, {} rejected, {} events",
        summary.calls, summary.accepted, summary.rejected, summary.events
    )?;

    if config.print_metrics {
        let metrics = gather_metrics().context("failed to gather metrics")?;
        writeln!(out, "\n{metrics}")?;
    }
    Ok(())
}
