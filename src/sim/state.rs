//! Line state: stations, pallets and the events a tick emits
//!
//! `LineSimulation` owns every mutable field. Readers get shared references
//! or a `LineSnapshot`; only `tick` mutates.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::path::PathModel;
use crate::error::{ConfigIssue, LineError};
use crate::settings::LineConfig;
use crate::{station_bucket, wrap_progress};

/// A workstation at a fixed point along the path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// 0-based, ordered along the path
    pub index: usize,
    /// `index / (station_count - 1)`, so the ends sit on the path ends
    pub path_parameter: f32,
    pub position: Vec3,
    /// True iff some pallet's current station is this one
    pub is_active: bool,
}

/// A pallet riding the loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pallet {
    /// Creation order; also the event iteration order
    pub id: u32,
    /// Position along the loop, always in [0, 1)
    pub progress: f32,
    /// Progress per unit of tick `dt`
    pub speed: f32,
    /// Last station bucket entered
    pub current_station: usize,
    /// `path.point_at(progress)` as of the last tick
    pub position: Vec3,
}

/// Explicit start state for one pallet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PalletSpec {
    pub progress: f32,
    pub speed: f32,
}

/// A pallet crossed into a different station bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationActivationEvent {
    pub pallet: u32,
    pub previous_station: usize,
    pub new_station: usize,
}

/// A station's active flag differs from its value before the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationStateChange {
    pub station: usize,
    pub active: bool,
}

/// Notifications emitted by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineEvent {
    PalletEntered(StationActivationEvent),
    StationChanged(StationStateChange),
}

/// Read-only copy of the line after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub tick: u64,
    pub pallets: Vec<PalletSnapshot>,
    pub stations: Vec<StationSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PalletSnapshot {
    pub id: u32,
    pub progress: f32,
    pub station: usize,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub index: usize,
    pub active: bool,
}

/// The production line: one path, N stations, M pallets
#[derive(Debug, Clone)]
pub struct LineSimulation {
    pub(crate) path: PathModel,
    pub(crate) stations: Vec<Station>,
    pub(crate) pallets: Vec<Pallet>,
    pub(crate) ticks: u64,
}

impl LineSimulation {
    /// Build from config, drawing speeds with a `Pcg32` seeded from `config.seed`
    pub fn initialize(config: &LineConfig) -> Result<Self, LineError> {
        let mut rng = Pcg32::seed_from_u64(config.seed);
        Self::initialize_with_rng(config, &mut rng)
    }

    /// Build from config, drawing speeds from the given RNG
    pub fn initialize_with_rng<R: Rng>(config: &LineConfig, rng: &mut R) -> Result<Self, LineError> {
        config.validate()?;
        let range = config.speed_range;
        let speeds: Vec<f32> = (0..config.pallet_count)
            .map(|_| rng.random_range(range.min..=range.max))
            .collect();
        Self::with_speeds(config, &speeds)
    }

    /// Build with explicit per-pallet speeds and staggered starts `i / station_count`
    ///
    /// With more pallets than stations the starts wrap around the loop.
    pub fn with_speeds(config: &LineConfig, speeds: &[f32]) -> Result<Self, LineError> {
        let specs: Vec<PalletSpec> = speeds
            .iter()
            .enumerate()
            .map(|(i, &speed)| PalletSpec {
                progress: wrap_progress(i as f32 / config.station_count as f32),
                speed,
            })
            .collect();
        Self::with_pallets(config, &specs)
    }

    /// Build with explicit pallet start states
    ///
    /// The config's speed range is not consulted; each speed only has to be
    /// positive.
    pub fn with_pallets(config: &LineConfig, specs: &[PalletSpec]) -> Result<Self, LineError> {
        config.validate()?;
        if specs.len() != config.pallet_count {
            return Err(ConfigIssue::PalletCountMismatch {
                expected: config.pallet_count,
                found: specs.len(),
            }
            .into());
        }

        let path = PathModel::new(config.control_points.clone(), config.curve)?;
        let station_count = config.station_count;

        let stations = (0..station_count)
            .map(|index| {
                let path_parameter = index as f32 / (station_count - 1) as f32;
                Station {
                    index,
                    path_parameter,
                    position: path.point_at(path_parameter),
                    is_active: false,
                }
            })
            .collect();

        let mut pallets = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            if !spec.speed.is_finite() || spec.speed <= 0.0 {
                return Err(ConfigIssue::NonPositiveSpeed { min: spec.speed }.into());
            }
            if !(0.0..1.0).contains(&spec.progress) {
                return Err(ConfigIssue::ProgressOutOfRange {
                    pallet: i,
                    progress: spec.progress,
                }
                .into());
            }
            pallets.push(Pallet {
                id: i as u32,
                progress: spec.progress,
                speed: spec.speed,
                current_station: station_bucket(spec.progress, station_count),
                position: path.point_at(spec.progress),
            });
        }

        log::info!(
            "Line initialized: {} stations, {} pallets, path length {:.1} ({})",
            station_count,
            pallets.len(),
            path.length(),
            config.curve.as_str()
        );

        Ok(Self {
            path,
            stations,
            pallets,
            ticks: 0,
        })
    }

    pub fn path(&self) -> &PathModel {
        &self.path
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn pallets(&self) -> &[Pallet] {
        &self.pallets
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Indices of stations currently active, ascending
    pub fn active_stations(&self) -> Vec<usize> {
        self.stations
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.index)
            .collect()
    }

    /// Copy positions and flags for readers outside the tick loop
    pub fn snapshot(&self) -> LineSnapshot {
        LineSnapshot {
            tick: self.ticks,
            pallets: self
                .pallets
                .iter()
                .map(|p| PalletSnapshot {
                    id: p.id,
                    progress: p.progress,
                    station: p.current_station,
                    position: p.position,
                })
                .collect(),
            stations: self
                .stations
                .iter()
                .map(|s| StationSnapshot {
                    index: s.index,
                    active: s.is_active,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SpeedRange;

    #[test]
    fn test_initialize_demo_line() {
        let line = LineSimulation::initialize(&LineConfig::default()).unwrap();
        assert_eq!(line.stations().len(), 10);
        assert_eq!(line.pallets().len(), 5);
        assert_eq!(line.ticks(), 0);
        assert!(line.stations().iter().all(|s| !s.is_active));

        for pallet in line.pallets() {
            assert!((0.002..=0.003).contains(&pallet.speed));
        }
    }

    #[test]
    fn test_station_parameters_span_path() {
        let line = LineSimulation::initialize(&LineConfig::default()).unwrap();
        let stations = line.stations();
        assert_eq!(stations[0].path_parameter, 0.0);
        assert_eq!(stations[9].path_parameter, 1.0);
        assert!((stations[3].path_parameter - 3.0 / 9.0).abs() < 1e-6);
        assert_eq!(stations[0].position, line.path().point_at(0.0));
        assert_eq!(stations[9].position, line.path().point_at(1.0));
    }

    #[test]
    fn test_pallets_start_staggered() {
        let line = LineSimulation::with_speeds(&LineConfig::default(), &[0.01; 5]).unwrap();
        for (i, pallet) in line.pallets().iter().enumerate() {
            assert_eq!(pallet.id, i as u32);
            assert!((pallet.progress - i as f32 / 10.0).abs() < 1e-6);
            assert_eq!(pallet.current_station, i);
            assert_eq!(pallet.position, line.path().point_at(pallet.progress));
        }
    }

    #[test]
    fn test_same_seed_same_speeds() {
        let config = LineConfig::with_seed(1234);
        let a = LineSimulation::initialize(&config).unwrap();
        let b = LineSimulation::initialize(&config).unwrap();
        let speeds_a: Vec<f32> = a.pallets().iter().map(|p| p.speed).collect();
        let speeds_b: Vec<f32> = b.pallets().iter().map(|p| p.speed).collect();
        assert_eq!(speeds_a, speeds_b);
    }

    #[test]
    fn test_fixed_speed_range() {
        let config = LineConfig {
            speed_range: SpeedRange::new(0.05, 0.05),
            ..Default::default()
        };
        let line = LineSimulation::initialize(&config).unwrap();
        assert!(line.pallets().iter().all(|p| p.speed == 0.05));
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let config = LineConfig {
            station_count: 1,
            ..Default::default()
        };
        assert!(LineSimulation::initialize(&config).is_err());

        let config = LineConfig {
            speed_range: SpeedRange::new(-1.0, 1.0),
            ..Default::default()
        };
        assert!(LineSimulation::initialize(&config).is_err());
    }

    #[test]
    fn test_explicit_pallet_checks() {
        let config = LineConfig {
            pallet_count: 2,
            ..Default::default()
        };

        let err = LineSimulation::with_speeds(&config, &[0.1]).unwrap_err();
        assert!(matches!(
            err,
            LineError::InvalidConfiguration(ConfigIssue::PalletCountMismatch { expected: 2, found: 1 })
        ));

        let err = LineSimulation::with_speeds(&config, &[0.1, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            LineError::InvalidConfiguration(ConfigIssue::NonPositiveSpeed { .. })
        ));

        let specs = [
            PalletSpec { progress: 0.0, speed: 0.1 },
            PalletSpec { progress: 1.0, speed: 0.1 },
        ];
        let err = LineSimulation::with_pallets(&config, &specs).unwrap_err();
        assert!(matches!(
            err,
            LineError::InvalidConfiguration(ConfigIssue::ProgressOutOfRange { pallet: 1, .. })
        ));
    }

    #[test]
    fn test_more_pallets_than_stations_wrap_starts() {
        let config = LineConfig {
            station_count: 3,
            pallet_count: 5,
            ..Default::default()
        };
        let line = LineSimulation::initialize(&config).unwrap();
        assert_eq!(line.pallets().len(), 5);
        for pallet in line.pallets() {
            assert!((0.0..1.0).contains(&pallet.progress));
        }
        // Pallet 3 lands back on the start, pallet 4 a third of the way round
        assert_eq!(line.pallets()[3].progress, 0.0);
        assert!((line.pallets()[4].progress - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(line.pallets()[4].current_station, 1);
    }

    #[test]
    fn test_initialize_from_partial_json() {
        let config = LineConfig::from_json_str(r#"{ "station_count": 4 }"#).unwrap();
        let mut line = LineSimulation::initialize(&config).unwrap();
        assert_eq!(line.pallets().len(), 5);
        line.tick(1.0);
        assert!(line.pallets().iter().all(|p| (0.0..1.0).contains(&p.progress)));
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let line = LineSimulation::initialize(&LineConfig::default()).unwrap();
        let snap = line.snapshot();
        assert_eq!(snap.tick, 0);
        assert_eq!(snap.pallets.len(), 5);
        assert_eq!(snap.stations.len(), 10);
        assert_eq!(snap.pallets[2].position, line.pallets()[2].position);
        assert!(snap.stations.iter().all(|s| !s.active));
    }

    #[test]
    fn test_event_json_shape() {
        let event = LineEvent::StationChanged(StationStateChange {
            station: 3,
            active: true,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"station_changed","station":3,"active":true}"#);
    }
}
