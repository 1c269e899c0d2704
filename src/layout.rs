//! Static scene placement
//!
//! Where a renderer should put the fixed furniture of the line: the
//! conveyor polyline and, per station, the pad, status screen, label anchor
//! and arm. Computed once from the path; nothing here changes per tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{LineSimulation, PathModel, Station};

/// Articulated arm beside a station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmFixture {
    /// Base cylinder centre (arm group origin)
    pub base: Vec3,
    /// Upper arm segment centre
    pub upper: Vec3,
    /// Lower arm segment centre
    pub lower: Vec3,
}

impl ArmFixture {
    pub fn at(base: Vec3) -> Self {
        Self {
            base,
            upper: base + Vec3::Y * UPPER_ARM_OFFSET,
            lower: base + Vec3::Y * LOWER_ARM_OFFSET,
        }
    }
}

/// Fixed placement for one station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationFixture {
    pub index: usize,
    /// Station pad, on the path
    pub pad: Vec3,
    /// Status screen, raised above the pad
    pub screen: Vec3,
    /// Label anchor, just above the screen
    pub label_anchor: Vec3,
    pub arm: ArmFixture,
}

impl StationFixture {
    pub fn for_station(station: &Station) -> Self {
        let pad = station.position;
        Self {
            index: station.index,
            pad,
            screen: Vec3::new(pad.x, SCREEN_HEIGHT, pad.z),
            label_anchor: Vec3::new(pad.x, LABEL_HEIGHT, pad.z),
            arm: ArmFixture::at(Vec3::new(pad.x, ARM_HEIGHT, pad.z - ARM_SETBACK)),
        }
    }
}

/// Everything static in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    /// Conveyor polyline, evenly spaced by arc length
    pub conveyor: Vec<Vec3>,
    pub stations: Vec<StationFixture>,
}

impl SceneLayout {
    pub fn build(path: &PathModel, stations: &[Station]) -> Self {
        Self {
            conveyor: path.sample(CONVEYOR_DIVISIONS),
            stations: stations.iter().map(StationFixture::for_station).collect(),
        }
    }

    pub fn for_line(line: &LineSimulation) -> Self {
        Self::build(line.path(), line.stations())
    }

    /// Axis-aligned bounds of all placed points (min, max)
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let points = self.conveyor.iter().copied().chain(self.stations.iter().flat_map(|s| {
            [s.pad, s.screen, s.label_anchor, s.arm.base, s.arm.upper, s.arm.lower]
        }));

        points.fold((Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)), |(lo, hi), p| {
            (lo.min(p), hi.max(p))
        })
    }
}
