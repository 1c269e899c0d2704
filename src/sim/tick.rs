//! Simulation tick
//!
//! Advances every pallet, detects station-bucket crossings and refreshes
//! station activation. Total: no errors, no I/O, no blocking.

use super::state::{LineEvent, LineSimulation, StationActivationEvent, StationStateChange};
use crate::{station_bucket, wrap_progress};

/// Advance the line by one step of `dt` (progress units scale with `speed * dt`)
///
/// Events come back in a stable order: pallet crossings in pallet order,
/// then station flag changes in station order.
pub fn tick(line: &mut LineSimulation, dt: f32) -> Vec<LineEvent> {
    // A non-finite step moves nothing
    let dt = if dt.is_finite() { dt } else { 0.0 };
    let station_count = line.stations.len();
    let was_active: Vec<bool> = line.stations.iter().map(|s| s.is_active).collect();
    let mut events = Vec::new();

    for pallet in &mut line.pallets {
        pallet.progress = wrap_progress(pallet.progress + pallet.speed * dt);

        let target = station_bucket(pallet.progress, station_count);
        if target != pallet.current_station {
            log::trace!(
                "Pallet {} entered station {} (from {})",
                pallet.id,
                target,
                pallet.current_station
            );
            events.push(LineEvent::PalletEntered(StationActivationEvent {
                pallet: pallet.id,
                previous_station: pallet.current_station,
                new_station: target,
            }));
            pallet.current_station = target;
        }

        pallet.position = line.path.point_at(pallet.progress);
    }

    refresh_activation(line);

    for (station, was) in line.stations.iter().zip(was_active) {
        if station.is_active != was {
            events.push(LineEvent::StationChanged(StationStateChange {
                station: station.index,
                active: station.is_active,
            }));
        }
    }

    line.ticks += 1;
    events
}

/// Active iff at least one pallet currently sits in the station's bucket
fn refresh_activation(line: &mut LineSimulation) {
    for station in &mut line.stations {
        station.is_active = false;
    }
    for pallet in &line.pallets {
        line.stations[pallet.current_station].is_active = true;
    }
}

impl LineSimulation {
    /// See [`tick`]
    pub fn tick(&mut self, dt: f32) -> Vec<LineEvent> {
        tick(self, dt)
    }
}
