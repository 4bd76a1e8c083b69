//! The `SyncLoop` struct and its tick loop.

use cs_bridge::{ControlSource, SimABridge, SimBBridge, SpawnRequest};
use cs_core::{CalibrationRecord, EgoConfig, MirrorConfig, RunMode, Tick, ViewportConfig};
use cs_registry::IdentityRegistry;

use crate::{
    LoopState, StopFlag, SyncError, SyncObserver, SyncResult, TeardownReport, Termination,
    TickReport,
};

/// The lockstep orchestrator.
///
/// `SyncLoop<A, B, C>` owns both simulator connections, the identity registry,
/// and the control source.  Every tick:
///
/// 1. **Read**: `A::step()` returns the next Sim-A frame.
/// 2. **Control**: `C` picks a directive; `A::send_control` forwards it.
/// 3. **Ego**: the ego pose is transformed with half its fixed length and
///    sent to Sim-B.
/// 4. **Agents**: in report order, each unseen vehicle is registered and
///    spawned (while capacity lasts); each registered vehicle is moved.
/// 5. **Advance**: `B::advance_step()`.
///
/// Non-vehicle agents are ignored, as is any agent whose key names the ego
/// entity.  Entity-scoped move failures are logged
/// and counted; any other bridge failure tears the loop down and is
/// returned.
///
/// Create via [`SyncBuilder`][crate::SyncBuilder].
pub struct SyncLoop<A: SimABridge, B: SimBBridge, C: ControlSource> {
    pub(crate) sim_a:       A,
    pub(crate) sim_b:       B,
    pub(crate) control:     C,
    pub(crate) registry:    IdentityRegistry,
    pub(crate) calibration: CalibrationRecord,
    pub(crate) ego:         EgoConfig,
    pub(crate) mirror:      MirrorConfig,
    pub(crate) viewport:    ViewportConfig,
    pub(crate) run_mode:    RunMode,
    pub(crate) stop:        StopFlag,
    pub(crate) state:       LoopState,
    /// Number of completed ticks; also the index of the next tick.
    pub(crate) tick:        Tick,
    pub(crate) torn_down:   bool,
}

impl<A: SimABridge, B: SimBBridge, C: ControlSource> SyncLoop<A, B, C> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    pub fn ticks_completed(&self) -> u64 {
        self.tick.0
    }

    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    /// A handle that stops the loop between ticks when raised.
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    pub fn sim_a(&self) -> &A {
        &self.sim_a
    }

    pub fn sim_b(&self) -> &B {
        &self.sim_b
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// `Uninitialized → Running`: create the ego entity in Sim-B and point
    /// the viewport at it.
    ///
    /// A no-op when already running.  Any failure tears the loop down.
    pub fn start<O: SyncObserver>(&mut self, observer: &mut O) -> SyncResult<()> {
        match self.state {
            LoopState::Running => return Ok(()),
            LoopState::Terminated => return Err(SyncError::Terminated),
            LoopState::Uninitialized => {}
        }

        if let Err(e) = self.spawn_ego() {
            self.teardown();
            return Err(e);
        }
        self.state = LoopState::Running;
        tracing::info!(
            ego = %self.ego.entity_id,
            capacity = self.registry.capacity(),
            run_mode = ?self.run_mode,
            "sync loop running"
        );
        observer.on_start(&self.ego.entity_id);
        Ok(())
    }

    fn spawn_ego(&mut self) -> SyncResult<()> {
        let request = SpawnRequest::new(self.ego.entity_id.clone(), self.ego.footprint(), &self.mirror);
        self.sim_b.spawn(&request).map_err(SyncError::SimB)?;
        self.sim_b.track(&self.ego.entity_id).map_err(SyncError::SimB)?;
        self.sim_b.set_zoom(self.viewport.zoom).map_err(SyncError::SimB)?;
        Ok(())
    }

    /// Run until the run mode's bound is reached or the stop flag is raised,
    /// then tear down.
    ///
    /// Starts the loop first if needed.  A failure at any point tears down
    /// and is returned.
    pub fn run<O: SyncObserver>(&mut self, observer: &mut O) -> SyncResult<Termination> {
        self.start(observer)?;

        let outcome = loop {
            if self.stop.is_raised() {
                tracing::info!(ticks = self.tick.0, "stop requested");
                break Termination::Cancelled { ticks: self.tick.0 };
            }
            if !self.run_mode.should_continue(self.tick.0) {
                break Termination::Completed { ticks: self.tick.0 };
            }
            self.step_once(observer)?;
        };

        self.teardown();
        observer.on_sync_end(self.tick);
        tracing::info!(?outcome, "sync loop finished");
        Ok(outcome)
    }

    /// Run exactly `n` ticks from the current position, ignoring the run
    /// mode and the stop flag.  Does not tear down on success.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SyncObserver>(&mut self, n: u64, observer: &mut O) -> SyncResult<()> {
        self.start(observer)?;
        for _ in 0..n {
            self.step_once(observer)?;
        }
        Ok(())
    }

    fn step_once<O: SyncObserver>(&mut self, observer: &mut O) -> SyncResult<()> {
        let now = self.tick;
        observer.on_tick_start(now);
        match self.process_tick(now) {
            Ok(report) => {
                observer.on_tick_end(&report);
                self.tick = now.next();
                Ok(())
            }
            Err(e) => {
                tracing::error!(tick = %now, error = %e, "tick failed; tearing down");
                self.teardown();
                Err(e)
            }
        }
    }

    /// Close Sim-B, then Sim-A.  Both closes are attempted; failures are
    /// logged and reported.  Idempotent.
    pub fn teardown(&mut self) -> TeardownReport {
        self.state = LoopState::Terminated;
        if self.torn_down {
            return TeardownReport::default();
        }
        self.torn_down = true;
        tracing::info!("closing connections");

        let sim_b = self.sim_b.close().err();
        if let Some(e) = &sim_b {
            tracing::error!(error = %e, "closing Sim-B failed");
        }
        let sim_a = self.sim_a.close().err();
        if let Some(e) = &sim_a {
            tracing::error!(error = %e, "closing Sim-A failed");
        }
        TeardownReport { performed: true, sim_b, sim_a }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SyncResult<TickReport> {
        // ── Read Sim-A and forward control ────────────────────────────────
        let snapshot = self.sim_a.step().map_err(SyncError::SimA)?;
        let directive = self.control.next_directive(&snapshot);
        self.sim_a.send_control(directive).map_err(SyncError::SimA)?;

        let mut move_failures = 0;

        // ── Ego ───────────────────────────────────────────────────────────
        let ego_pose_b = self
            .calibration
            .apply(snapshot.ego.pose, self.ego.footprint().half_length());
        match self.sim_b.move_to(&self.ego.entity_id, ego_pose_b) {
            Ok(()) => {}
            Err(e) if e.is_entity_scoped() => {
                tracing::warn!(tick = %now, entity = %self.ego.entity_id, error = %e, "ego move failed");
                move_failures += 1;
            }
            Err(e) => return Err(SyncError::SimB(e)),
        }

        // ── Mirrored agents ───────────────────────────────────────────────
        let mut vehicles_observed = 0;
        let mut spawned = 0;
        let mut moved = 0;
        let mut skipped = 0;

        for agent in snapshot.vehicles() {
            vehicles_observed += 1;

            // Mirrors share Sim-B's namespace with the ego.
            if agent.key.mirror_entity() == self.ego.entity_id {
                tracing::warn!(tick = %now, agent = %agent.key, "agent id collides with the ego; not mirrored");
                skipped += 1;
                continue;
            }

            if !self.registry.is_known(&agent.key) {
                let entry = self.registry.register(agent.key.clone())?;
                let request = SpawnRequest::new(entry.mirror, agent.extent.footprint(), &self.mirror);
                self.sim_b.spawn(&request).map_err(SyncError::SimB)?;
                spawned += 1;
                tracing::info!(
                    tick = %now,
                    agent = %agent.key,
                    slot = entry.slot,
                    length = request.footprint.length,
                    width = request.footprint.width,
                    "mirroring new vehicle"
                );
            }

            // Known only because the registry is full: leave it alone.
            let Some(entry) = self.registry.get(&agent.key) else {
                skipped += 1;
                continue;
            };

            let pose = self.calibration.apply(agent.pose, agent.extent.half_length());
            match self.sim_b.move_to(&entry.mirror, pose) {
                Ok(()) => moved += 1,
                Err(e) if e.is_entity_scoped() => {
                    tracing::warn!(tick = %now, entity = %entry.mirror, error = %e, "move failed; skipping");
                    move_failures += 1;
                }
                Err(e) => return Err(SyncError::SimB(e)),
            }
        }

        // ── Advance Sim-B ─────────────────────────────────────────────────
        self.sim_b.advance_step().map_err(SyncError::SimB)?;

        tracing::debug!(
            tick = %now,
            frame = snapshot.frame,
            ego = %ego_pose_b,
            vehicles = vehicles_observed,
            spawned,
            moved,
            skipped,
            "tick complete"
        );

        Ok(TickReport {
            tick: now,
            frame: snapshot.frame,
            game_timestamp_ms: snapshot.game_timestamp_ms,
            agents_observed: snapshot.agents.len(),
            vehicles_observed,
            mirrored_total: self.registry.len(),
            spawned,
            moved,
            skipped,
            move_failures,
            ego_pose_b,
            ego: snapshot.ego,
        })
    }
}
