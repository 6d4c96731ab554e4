use clap::Parser;
use rw_sim::lifecycle::{setup_tracing, Simulation, SimulationConfig};
use rw_sim::loader::{load, FileSource};
use rw_sim::reporting::arrival_table;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

/// Simulate readers and writers sharing one resource.
#[derive(Debug, Parser)]
#[command(name = "rw-sim", version)]
struct Cli {
    /// Process list: `PID ARRIVAL BURST PRIORITY ROLE` per line.
    #[arg(short, long, default_value = "processes.txt")]
    input: PathBuf,

    /// Length of one simulated time unit in milliseconds.
    #[arg(short = 'u', long, env = "RW_SIM_TIME_UNIT_MS", default_value = "1000")]
    time_unit_ms: u64,

    /// Do not print the arrival table before the run.
    #[arg(long)]
    no_table: bool,

    /// Do not print event lines.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> SimulationConfig {
        let mut config =
            SimulationConfig::default().with_time_unit(Duration::from_millis(self.time_unit_ms));
        config.show_table = !self.no_table;
        config.echo_events = !self.quiet;
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();
    let config = cli.config();

    let loaded = match load(&FileSource::new(&cli.input)).await {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(error = %e, "Cannot load process list");
            return Err(e.to_string());
        }
    };
    for skipped in &loaded.skipped {
        warn!(
            line = skipped.line,
            text = %skipped.text,
            reason = %skipped.reason,
            "Skipped record"
        );
    }

    let simulation = Simulation::new(config, loaded.descriptors);
    if simulation.config().show_table {
        print!("{}", arrival_table(simulation.descriptors()));
    }

    let running = simulation.start();
    let cancel = running.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling processes");
            cancel.cancel();
        }
    });

    let report = running.wait().await;
    let timeline = report.timeline();
    if !timeline.is_exclusive() {
        for overlap in timeline.violations() {
            error!(?overlap, "Writer shared the resource");
        }
        return Err("mutual exclusion violated".to_string());
    }
    if !report.is_clean() {
        error!(stats = ?report.stats, "Resource lock not returned at end of run");
        return Err("resource lock leaked".to_string());
    }

    info!(
        peak_readers = timeline.peak_readers(),
        finished = report.finished_count(),
        cancelled = report.cancelled_count(),
        "All processes done"
    );
    Ok(())
}
