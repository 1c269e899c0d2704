//! Production Line - a conveyor loop with workstations and circulating pallets
//!
//! Core modules:
//! - `sim`: Deterministic simulation (path sampling, pallet motion, station state)
//! - `board`: Station display state, driven only by simulation events
//! - `layout`: Static scene placement derived from the conveyor path
//! - `runner`: Fixed-step frame loop that drives the simulation
//! - `settings`: Line configuration (JSON, with defaults for the demo scene)
//! - `platform`: Browser binding (wasm32 only)

pub mod board;
pub mod error;
pub mod layout;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;

pub use board::{StationBoard, StationDisplay};
pub use error::{ConfigIssue, LineError};
pub use layout::SceneLayout;
pub use runner::FrameLoop;
pub use settings::{CurveKind, LineConfig, SpeedRange};
pub use sim::{LineEvent, LineSimulation, PathModel};

/// Line configuration constants
pub mod consts {
    /// Fixed simulation step (one original animation frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Progress scale applied per step; pallet speeds are in progress per frame
    pub const TICK_SCALE: f32 = 1.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the loop will account for (seconds)
    pub const MAX_FRAME_SECS: f32 = 0.1;

    /// Demo scene defaults
    pub const STATION_COUNT: usize = 10;
    pub const PALLET_COUNT: usize = 5;
    pub const PALLET_SPEED_MIN: f32 = 0.002;
    pub const PALLET_SPEED_MAX: f32 = 0.003;
    pub const DEFAULT_SEED: u64 = 20_240_601;

    /// Divisions used to approximate arc length along the curve
    pub const ARC_LENGTH_DIVISIONS: usize = 200;
    /// Divisions of the drawn conveyor polyline
    pub const CONVEYOR_DIVISIONS: usize = 100;
    /// Tension for the uniform Catmull-Rom variant
    pub const DEFAULT_TENSION: f32 = 0.5;

    /// Station furniture placement (scene units)
    pub const SCREEN_HEIGHT: f32 = 30.0;
    pub const LABEL_HEIGHT: f32 = 35.0;
    pub const ARM_HEIGHT: f32 = 5.0;
    pub const ARM_SETBACK: f32 = 30.0;
    pub const UPPER_ARM_OFFSET: f32 = 15.0;
    pub const LOWER_ARM_OFFSET: f32 = -12.5;
}

/// Wrap progress into [0, 1), keeping any overshoot past the end
///
/// Non-finite input (overflowed `speed * dt`) restarts at 0.
#[inline]
pub fn wrap_progress(progress: f32) -> f32 {
    if !progress.is_finite() {
        return 0.0;
    }
    if (0.0..1.0).contains(&progress) {
        return progress;
    }
    let wrapped = progress - progress.floor();
    // Tiny negatives round up to exactly 1.0
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Station bucket for a progress value, clamped to [0, station_count - 1]
#[inline]
pub fn station_bucket(progress: f32, station_count: usize) -> usize {
    let bucket = (progress * station_count as f32).floor() as usize;
    bucket.min(station_count.saturating_sub(1))
}
