//! Fluent builder for constructing a [`SyncLoop`].

use cs_bridge::{ControlSource, SimABridge, SimBBridge};
use cs_core::{
    CalibrationRecord, EgoConfig, MirrorConfig, RunMode, SessionConfig, Tick, ViewportConfig,
};
use cs_registry::IdentityRegistry;

use crate::{LoopState, StopFlag, SyncError, SyncLoop, SyncResult};

/// Default mirror capacity.
pub const DEFAULT_CAPACITY: usize = 5;

/// Fluent builder for [`SyncLoop<A, B, C>`].
///
/// # Required inputs
///
/// - `A: SimABridge`: a connected Sim-A session
/// - `B: SimBBridge`: a connected Sim-B session
/// - `C: ControlSource`: where ego control comes from
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                             |
/// |-------------------|-------------------------------------|
/// | `.capacity(n)`    | 5                                   |
/// | `.calibration(c)` | `CalibrationRecord::IDENTITY`       |
/// | `.ego(e)`         | `"p0"`, 4.68 m × 1.88 m             |
/// | `.mirror(m)`      | `platoon_route` / `vtypeauto`       |
/// | `.viewport(v)`    | `View #0`, zoom 1000                |
/// | `.run_mode(m)`    | `Demo`                              |
/// | `.stop_flag(f)`   | a fresh, lowered flag               |
///
/// `.session(&config)` sets capacity, ego, mirror, viewport, and run mode
/// from a [`SessionConfig`] in one call.
///
/// # Example
///
/// ```rust,ignore
/// let mut sync = SyncBuilder::new(sim_a, sim_b, Autopilot)
///     .session(&config)
///     .calibration(calibration)
///     .build()?;
/// sync.run(&mut NoopObserver)?;
/// ```
pub struct SyncBuilder<A: SimABridge, B: SimBBridge, C: ControlSource> {
    sim_a:       A,
    sim_b:       B,
    control:     C,
    capacity:    usize,
    calibration: CalibrationRecord,
    ego:         EgoConfig,
    mirror:      MirrorConfig,
    viewport:    ViewportConfig,
    run_mode:    RunMode,
    stop:        Option<StopFlag>,
}

impl<A: SimABridge, B: SimBBridge, C: ControlSource> SyncBuilder<A, B, C> {
    pub fn new(sim_a: A, sim_b: B, control: C) -> Self {
        Self {
            sim_a,
            sim_b,
            control,
            capacity:    DEFAULT_CAPACITY,
            calibration: CalibrationRecord::IDENTITY,
            ego:         EgoConfig::default(),
            mirror:      MirrorConfig::default(),
            viewport:    ViewportConfig::default(),
            run_mode:    RunMode::default(),
            stop:        None,
        }
    }

    /// Maximum number of mirrored agents.  Zero mirrors the ego only.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn calibration(mut self, calibration: CalibrationRecord) -> Self {
        self.calibration = calibration;
        self
    }

    pub fn ego(mut self, ego: EgoConfig) -> Self {
        self.ego = ego;
        self
    }

    pub fn mirror(mut self, mirror: MirrorConfig) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = run_mode;
        self
    }

    /// Share an existing stop flag, e.g. one raised by a signal handler.
    pub fn stop_flag(mut self, stop: StopFlag) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn session(self, config: &SessionConfig) -> Self {
        self.capacity(config.capacity)
            .ego(config.ego.clone())
            .mirror(config.mirror.clone())
            .viewport(config.viewport.clone())
            .run_mode(config.run_mode)
    }

    /// Validate inputs and return a loop in [`LoopState::Uninitialized`].
    pub fn build(self) -> SyncResult<SyncLoop<A, B, C>> {
        validate_ego(&self.ego)?;

        Ok(SyncLoop {
            sim_a:       self.sim_a,
            sim_b:       self.sim_b,
            control:     self.control,
            registry:    IdentityRegistry::new(self.capacity),
            calibration: self.calibration,
            ego:         self.ego,
            mirror:      self.mirror,
            viewport:    self.viewport,
            run_mode:    self.run_mode,
            stop:        self.stop.unwrap_or_default(),
            state:       LoopState::Uninitialized,
            tick:        Tick::ZERO,
            torn_down:   false,
        })
    }
}

pub(crate) fn validate_ego(ego: &EgoConfig) -> SyncResult<()> {
    ego.validate().map_err(|e| SyncError::Config(e.to_string()))
}
