//! Error types for line configuration and loading
//!
//! Only construction can fail. Ticking, path sampling and the display
//! layers are total over a validated line.

use std::fmt;

/// Why a configuration was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    /// Fewer than two stations (station spacing divides by `count - 1`)
    TooFewStations { count: usize },
    /// No pallets to move
    NoPallets,
    /// Speed lower bound is zero, negative or not finite
    NonPositiveSpeed { min: f32 },
    /// Speed upper bound is below the lower bound (or not a number)
    InvertedSpeedRange { min: f32, max: f32 },
    /// The curve needs at least two control points
    TooFewControlPoints { count: usize },
    /// A control point has a NaN or infinite coordinate
    NonFiniteControlPoint { index: usize },
    /// Explicit pallet list does not match the configured pallet count
    PalletCountMismatch { expected: usize, found: usize },
    /// Explicit pallet start outside [0, 1)
    ProgressOutOfRange { pallet: usize, progress: f32 },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::TooFewStations { count } => {
                write!(f, "station count must be at least 2, got {count}")
            }
            ConfigIssue::NoPallets => write!(f, "pallet count must be at least 1"),
            ConfigIssue::NonPositiveSpeed { min } => {
                write!(f, "pallet speed lower bound must be positive, got {min}")
            }
            ConfigIssue::InvertedSpeedRange { min, max } => {
                write!(f, "pallet speed range is inverted: {min}..={max}")
            }
            ConfigIssue::TooFewControlPoints { count } => {
                write!(f, "path needs at least 2 control points, got {count}")
            }
            ConfigIssue::NonFiniteControlPoint { index } => {
                write!(f, "control point {index} is not finite")
            }
            ConfigIssue::PalletCountMismatch { expected, found } => {
                write!(f, "expected {expected} pallets, got {found}")
            }
            ConfigIssue::ProgressOutOfRange { pallet, progress } => {
                write!(f, "pallet {pallet} starts at {progress}, outside [0, 1)")
            }
        }
    }
}

/// Errors raised while building a line
#[derive(Debug)]
pub enum LineError {
    /// Configuration failed validation; the simulation does not start
    InvalidConfiguration(ConfigIssue),
    /// Configuration file could not be read
    Io(std::io::Error),
    /// Configuration file is not valid JSON for `LineConfig`
    Parse(serde_json::Error),
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::InvalidConfiguration(issue) => write!(f, "Invalid configuration: {issue}"),
            LineError::Io(e) => write!(f, "I/O error: {e}"),
            LineError::Parse(e) => write!(f, "Config parse error: {e}"),
        }
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LineError::Io(e) => Some(e),
            LineError::Parse(e) => Some(e),
            LineError::InvalidConfiguration(_) => None,
        }
    }
}

impl From<ConfigIssue> for LineError {
    fn from(issue: ConfigIssue) -> Self {
        LineError::InvalidConfiguration(issue)
    }
}

impl From<std::io::Error> for LineError {
    fn from(e: std::io::Error) -> Self {
        LineError::Io(e)
    }
}

impl From<serde_json::Error> for LineError {
    fn from(e: serde_json::Error) -> Self {
        LineError::Parse(e)
    }
}
