//! Line configuration
//!
//! Defaults reproduce the demo scene: an N-shaped conveyor through seven
//! control points, ten stations and five pallets. Native builds can load
//! overrides from a JSON file; any missing field keeps its default.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigIssue, LineError};

/// Spline flavour used to interpolate the control points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Knot spacing by sqrt of segment length (no cusps or self-loops)
    #[default]
    Centripetal,
    /// Knot spacing by segment length
    Chordal,
    /// Uniform Catmull-Rom with the given tension
    CatmullRom { tension: f32 },
}

impl CurveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveKind::Centripetal => "centripetal",
            CurveKind::Chordal => "chordal",
            CurveKind::CatmullRom { .. } => "catmullrom",
        }
    }

    /// Parse a curve name; the uniform variant gets the default tension
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "centripetal" => Some(CurveKind::Centripetal),
            "chordal" => Some(CurveKind::Chordal),
            "catmullrom" | "uniform" => Some(CurveKind::CatmullRom {
                tension: DEFAULT_TENSION,
            }),
            _ => None,
        }
    }
}

/// Inclusive range pallet speeds are drawn from (progress per tick unit)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check the range without looking at anything else
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if !self.min.is_finite() || self.min <= 0.0 {
            return Err(ConfigIssue::NonPositiveSpeed { min: self.min });
        }
        // NaN or infinite upper bounds are rejected here too
        if !(self.max.is_finite() && self.max >= self.min) {
            return Err(ConfigIssue::InvertedSpeedRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self::new(PALLET_SPEED_MIN, PALLET_SPEED_MAX)
    }
}

/// Everything needed to build a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Conveyor control points, in order (open curve)
    pub control_points: Vec<Vec3>,
    /// Interpolation flavour
    pub curve: CurveKind,
    /// Number of workstations spread evenly along the path
    pub station_count: usize,
    /// Number of pallets on the loop
    pub pallet_count: usize,
    /// Per-pallet speed is drawn uniformly from this range
    pub speed_range: SpeedRange,
    /// Seed for speed randomization
    pub seed: u64,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            control_points: default_control_points(),
            curve: CurveKind::default(),
            station_count: STATION_COUNT,
            pallet_count: PALLET_COUNT,
            speed_range: SpeedRange::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// N-shaped conveyor in the ground plane
pub fn default_control_points() -> Vec<Vec3> {
    vec![
        Vec3::new(-300.0, 0.0, 0.0),
        Vec3::new(-200.0, 0.0, 200.0),
        Vec3::new(-100.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 200.0),
        Vec3::new(100.0, 0.0, 0.0),
        Vec3::new(200.0, 0.0, 200.0),
        Vec3::new(300.0, 0.0, 0.0),
    ]
}

impl LineConfig {
    /// Default scene with a different seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), LineError> {
        if self.station_count < 2 {
            return Err(ConfigIssue::TooFewStations {
                count: self.station_count,
            }
            .into());
        }
        if self.pallet_count < 1 {
            return Err(ConfigIssue::NoPallets.into());
        }
        self.speed_range.validate()?;
        validate_control_points(&self.control_points)?;
        Ok(())
    }

    /// Parse a JSON document (missing fields take defaults)
    pub fn from_json_str(json: &str) -> Result<Self, LineError> {
        let config: LineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, LineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, LineError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "Loaded line config from {}: {} stations, {} pallets",
            path.display(),
            config.station_count,
            config.pallet_count
        );
        Ok(config)
    }
}

pub(crate) fn validate_control_points(points: &[Vec3]) -> Result<(), ConfigIssue> {
    if points.len() < 2 {
        return Err(ConfigIssue::TooFewControlPoints {
            count: points.len(),
        });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(ConfigIssue::NonFiniteControlPoint { index });
    }
    Ok(())
}
