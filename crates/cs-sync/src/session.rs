//! Session establishment: connect Sim-A with retry, then Sim-B, then run.

use std::thread;
use std::time::Duration;

use cs_bridge::{BridgeResult, ControlSource, SimABridge, SimAConnector, SimBBridge};
use cs_core::{CalibrationRecord, SessionConfig};

use crate::builder::validate_ego;
use crate::{StopFlag, SyncBuilder, SyncError, SyncObserver, SyncResult, Termination};

/// Connect to Sim-A, retrying transport failures with a fixed `backoff`
/// until it succeeds or `stop` is raised.
///
/// Non-transport failures (a protocol error from the gateway, say) are not
/// retried.
pub fn establish<C: SimAConnector>(
    connector: &mut C,
    backoff:   Duration,
    stop:      &StopFlag,
) -> SyncResult<C::Bridge> {
    let mut attempt: u32 = 0;
    loop {
        if stop.is_raised() {
            return Err(SyncError::Cancelled);
        }
        attempt += 1;
        match connector.connect() {
            Ok(bridge) => {
                tracing::info!(attempt, "Sim-A connected");
                return Ok(bridge);
            }
            Err(e) if e.is_transport() => {
                tracing::warn!(attempt, error = %e, ?backoff, "Sim-A not reachable, retrying");
                thread::sleep(backoff);
            }
            Err(e) => return Err(SyncError::SimA(e)),
        }
    }
}

/// Run one complete bridge session.
///
/// Sim-A is established first (with retry), then Sim-B via `connect_sim_b`.
/// If Sim-B cannot be reached, the Sim-A session is closed before the error
/// is returned.  From then on the [`SyncLoop`][crate::SyncLoop] owns both
/// connections and tears them down however the run ends.
pub fn run_session<C, B, F, S, O>(
    config:        &SessionConfig,
    calibration:   CalibrationRecord,
    connector:     &mut C,
    connect_sim_b: F,
    control:       S,
    stop:          StopFlag,
    observer:      &mut O,
) -> SyncResult<Termination>
where
    C: SimAConnector,
    B: SimBBridge,
    F: FnOnce() -> BridgeResult<B>,
    S: ControlSource,
    O: SyncObserver,
{
    validate_ego(&config.ego)?;

    let mut sim_a = establish(connector, config.retry_backoff(), &stop)?;
    let sim_b = match connect_sim_b() {
        Ok(sim_b) => sim_b,
        Err(e) => {
            if let Err(close) = sim_a.close() {
                tracing::error!(error = %close, "closing Sim-A failed");
            }
            return Err(SyncError::SimB(e));
        }
    };

    let mut sync = SyncBuilder::new(sim_a, sim_b, control)
        .session(config)
        .calibration(calibration)
        .stop_flag(stop)
        .build()?;
    sync.run(observer)
}
