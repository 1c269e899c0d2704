//! Deterministic simulation module
//!
//! Path sampling, pallet motion and station state. This module must stay
//! pure and deterministic:
//! - Randomness only at construction, from a seeded RNG
//! - Stable iteration order (pallet creation order, station index order)
//! - No rendering or platform dependencies

pub mod path;
pub mod spline;
pub mod state;
pub mod tick;

pub use path::PathModel;
pub use spline::CubicSegment;
pub use state::{
    LineEvent, LineSimulation, LineSnapshot, Pallet, PalletSnapshot, PalletSpec, Station,
    StationActivationEvent, StationSnapshot, StationStateChange,
};
pub use tick::tick;
