//! bridge — mirror a Sim-A driving session into Sim-B.
//!
//! Usage: `bridge [config.json]`
//!
//! Without an argument the built-in defaults are used (Sim-A gateway on
//! `localhost:2000`, Sim-B TraCI on `localhost:8813`, endless demo mode).
//! Log verbosity comes from `LOG_LEVEL` (default `info`).  Ctrl-C stops the
//! loop between ticks and closes both simulators.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cs_bridge::{Autopilot, EpisodeSettings, GatewayConnector};
use cs_core::{SessionConfig, SessionRng, load_calibration};
use cs_output::{BridgeOutputObserver, StatusLine};
use cs_sync::{NoopObserver, StopFlag, SyncError, SyncObserver, SyncResult, Termination, run_session};
use cs_traci::TraciBridge;

// ── Constants ─────────────────────────────────────────────────────────────────

// Child-RNG offsets; each consumer gets its own stream off the master seed.
const RNG_SIM_A: u64 = 1;
const RNG_SIM_B: u64 = 2;

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so they do not tear the status line on stdout.
    let fmt_layer = fmt::layer().with_writer(io::stderr);
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    SessionConfig::load(path).with_context(|| format!("loading config {}", path.display()))
}

// ── Session ───────────────────────────────────────────────────────────────────

fn run<O: SyncObserver>(
    config:   &SessionConfig,
    stop:     StopFlag,
    observer: &mut O,
) -> Result<SyncResult<Termination>> {
    let calibration = load_calibration(&config.maps_dir, config.map_name.as_deref())?;
    if calibration.is_identity() {
        tracing::warn!("no map calibration; poses are passed through unchanged");
    }

    let mut rng = SessionRng::new(config.seed);
    let mut connector = GatewayConnector::new(
        config.sim_a_addrs()?,
        EpisodeSettings::for_session(config),
        rng.child(RNG_SIM_A),
    );

    let sim_b_addrs = config.sim_b_addrs()?;
    let sim_b_rng = rng.child(RNG_SIM_B);
    let connect_sim_b = || {
        TraciBridge::connect(
            &sim_b_addrs,
            config.sumo_connect_retries,
            config.retry_backoff(),
            sim_b_rng,
            config.viewport.view_id.clone(),
        )
    };

    Ok(run_session(config, calibration, &mut connector, connect_sim_b, Autopilot, stop, observer))
}

fn run_with_output(config: &SessionConfig, stop: StopFlag, dir: &Path) -> Result<SyncResult<Termination>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    #[cfg(feature = "sqlite")]
    let writer = cs_output::SqliteWriter::new(dir)?;
    #[cfg(not(feature = "sqlite"))]
    let writer = cs_output::CsvWriter::new(dir)?;

    let mut obs = (StatusLine::new(io::stdout()), BridgeOutputObserver::new(writer));
    let outcome = run(config, stop, &mut obs)?;

    // A failed run never reaches on_sync_end.
    if outcome.is_err() {
        if let Err(e) = obs.1.finish() {
            tracing::error!(error = %e, "flushing output failed");
        }
    }
    if let Some(e) = obs.1.take_error() {
        eprintln!("output error: {e}");
    }
    tracing::info!(rows = obs.1.rows_written(), dir = %dir.display(), "tick summaries written");
    Ok(outcome)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    let stop = StopFlag::new();
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.raise()).context("installing Ctrl-C handler")?;
    }

    let outcome = match &config.output_dir {
        Some(dir) => run_with_output(&config, stop, dir)?,
        None => {
            let mut obs = (StatusLine::new(io::stdout()), NoopObserver);
            run(&config, stop, &mut obs)?
        }
    };

    match outcome {
        Ok(Termination::Completed { ticks }) => tracing::info!(ticks, "session complete"),
        Ok(Termination::Cancelled { .. }) | Err(SyncError::Cancelled) => {
            println!("\nCancelled by user. Bye!");
        }
        Err(e) => return Err(e).context("bridge session failed"),
    }

    println!("Done.");
    Ok(())
}
