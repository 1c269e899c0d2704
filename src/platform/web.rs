//! Browser binding
//!
//! JS owns the renderer and the `requestAnimationFrame` loop. Each frame it
//! calls `advance` with the elapsed seconds, then reads flat buffers of
//! pallet positions and station flags.

use js_sys::{Float32Array, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::board::StationBoard;
use crate::layout::SceneLayout;
use crate::runner::FrameLoop;
use crate::settings::LineConfig;
use crate::sim::LineSimulation;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) fails harmlessly
    let _ = console_log::init_with_level(log::Level::Info);
}

/// A running line, owned by JS
#[wasm_bindgen]
pub struct WebLine {
    line: LineSimulation,
    board: StationBoard,
    frames: FrameLoop,
    layout: SceneLayout,
}

impl WebLine {
    fn build(config: &LineConfig) -> Result<WebLine, JsError> {
        let line = LineSimulation::initialize(config).map_err(|e| JsError::new(&e.to_string()))?;
        log::info!("Line ready with seed {}", config.seed);
        Ok(WebLine {
            board: StationBoard::for_line(&line),
            layout: SceneLayout::for_line(&line),
            frames: FrameLoop::default(),
            line,
        })
    }
}

#[wasm_bindgen]
impl WebLine {
    /// Demo scene with the given seed
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<WebLine, JsError> {
        Self::build(&LineConfig::with_seed(seed))
    }

    /// Scene from a JSON `LineConfig`
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WebLine, JsError> {
        let config = LineConfig::from_json_str(json).map_err(|e| JsError::new(&e.to_string()))?;
        Self::build(&config)
    }

    /// Run the ticks covered by `frame_secs`; returns the number of screens that changed
    pub fn advance(&mut self, frame_secs: f32) -> u32 {
        let events = self.frames.advance(&mut self.line, frame_secs);
        self.board.apply(&events) as u32
    }

    /// Single tick with an explicit scale, bypassing the frame loop
    pub fn tick(&mut self, dt: f32) -> u32 {
        let events = self.line.tick(dt);
        self.board.apply(&events) as u32
    }

    #[wasm_bindgen(getter, js_name = palletCount)]
    pub fn pallet_count(&self) -> usize {
        self.line.pallets().len()
    }

    #[wasm_bindgen(getter, js_name = stationCount)]
    pub fn station_count(&self) -> usize {
        self.line.station_count()
    }

    /// xyz triples, one per pallet
    #[wasm_bindgen(js_name = palletPositions)]
    pub fn pallet_positions(&self) -> Float32Array {
        let flat: Vec<f32> = self
            .line
            .pallets()
            .iter()
            .flat_map(|p| p.position.to_array())
            .collect();
        Float32Array::from(flat.as_slice())
    }

    /// 1 for running, 0 for idle, one byte per station
    #[wasm_bindgen(js_name = stationFlags)]
    pub fn station_flags(&self) -> Uint8Array {
        let flags: Vec<u8> = self
            .board
            .displays()
            .iter()
            .map(|d| u8::from(d.active))
            .collect();
        Uint8Array::from(flags.as_slice())
    }

    #[wasm_bindgen(js_name = stationLabel)]
    pub fn station_label(&self, index: usize) -> Option<String> {
        self.board.get(index).map(|d| d.label())
    }

    #[wasm_bindgen(js_name = stationColor)]
    pub fn station_color(&self, index: usize) -> Option<String> {
        self.board.get(index).map(|d| d.status_color().to_string())
    }

    /// xyz triples along the conveyor
    #[wasm_bindgen(js_name = conveyorPoints)]
    pub fn conveyor_points(&self) -> Float32Array {
        let flat: Vec<f32> = self.layout.conveyor.iter().flat_map(|p| p.to_array()).collect();
        Float32Array::from(flat.as_slice())
    }

    /// Static fixtures as JSON (pads, screens, label anchors, arms)
    #[wasm_bindgen(js_name = layoutJson)]
    pub fn layout_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.layout).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Current snapshot as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.line.snapshot()).map_err(|e| JsError::new(&e.to_string()))
    }
}
