//! Station status board
//!
//! Presentation-side state for each station's screen: the label lines and
//! whether the station is highlighted as running. Updated only from
//! `LineEvent`s (push) or by polling a `LineSimulation` (pull); it never
//! reaches into the simulation's mutable state.

use serde::{Deserialize, Serialize};

use crate::sim::{LineEvent, LineSimulation};

/// Model code shown on every station screen
pub const MODEL_CODE: &str = "ABC123";
/// Status colour for a running station
pub const ACTIVE_COLOR: &str = "#00ff00";
/// Status colour for an idle station
pub const IDLE_COLOR: &str = "#ffffff";

/// One station screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationDisplay {
    pub index: usize,
    pub active: bool,
}

impl StationDisplay {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            active: false,
        }
    }

    /// 1-based heading
    pub fn title(&self) -> String {
        format!("Station {}", self.index + 1)
    }

    pub fn serial(&self) -> String {
        format!("SN{:03}", self.index)
    }

    pub fn status_text(&self) -> &'static str {
        if self.active { "Running" } else { "Idle" }
    }

    pub fn status_color(&self) -> &'static str {
        if self.active { ACTIVE_COLOR } else { IDLE_COLOR }
    }

    /// Full label text, one line per field
    pub fn label(&self) -> String {
        format!(
            "{}\nModel: {}\nSerial: {}\n{}",
            self.title(),
            MODEL_CODE,
            self.serial(),
            self.status_text()
        )
    }
}

/// All station screens, in station order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationBoard {
    displays: Vec<StationDisplay>,
}

impl StationBoard {
    pub fn new(station_count: usize) -> Self {
        Self {
            displays: (0..station_count).map(StationDisplay::new).collect(),
        }
    }

    /// Board sized for a line, all screens idle
    pub fn for_line(line: &LineSimulation) -> Self {
        Self::new(line.station_count())
    }

    /// Apply a tick's events; returns how many screens changed
    ///
    /// Only station flag changes matter here, pallet crossings are ignored.
    pub fn apply(&mut self, events: &[LineEvent]) -> usize {
        let mut changed = 0;
        for event in events {
            if let LineEvent::StationChanged(change) = event {
                if let Some(display) = self.displays.get_mut(change.station) {
                    if display.active != change.active {
                        display.active = change.active;
                        changed += 1;
                    }
                }
            }
        }
        changed
    }

    /// Poll mode: copy every station flag from the line
    pub fn sync(&mut self, line: &LineSimulation) {
        if self.displays.len() != line.station_count() {
            *self = Self::for_line(line);
        }
        for (display, station) in self.displays.iter_mut().zip(line.stations()) {
            display.active = station.is_active;
        }
    }

    pub fn displays(&self) -> &[StationDisplay] {
        &self.displays
    }

    pub fn get(&self, index: usize) -> Option<&StationDisplay> {
        self.displays.get(index)
    }

    pub fn active_count(&self) -> usize {
        self.displays.iter().filter(|d| d.active).count()
    }
}
