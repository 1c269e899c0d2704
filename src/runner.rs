//! Fixed-step frame loop
//!
//! Turns variable frame times into a whole number of simulation ticks so the
//! line moves at the same rate regardless of display refresh. Rendering is
//! the caller's job, after `advance` returns.

use crate::consts::*;
use crate::sim::{LineEvent, LineSimulation};

/// Accumulator-driven tick scheduler
#[derive(Debug, Clone)]
pub struct FrameLoop {
    step: f32,
    max_substeps: u32,
    max_frame: f32,
    /// Progress scale handed to each tick
    tick_scale: f32,
    accumulator: f32,
    steps_run: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS, MAX_FRAME_SECS)
    }
}

impl FrameLoop {
    pub fn new(step: f32, max_substeps: u32, max_frame: f32) -> Self {
        Self {
            step,
            max_substeps,
            max_frame,
            tick_scale: TICK_SCALE,
            accumulator: 0.0,
            steps_run: 0,
        }
    }

    /// Scale applied to every tick (1.0 means one original animation frame)
    pub fn with_tick_scale(mut self, tick_scale: f32) -> Self {
        self.tick_scale = tick_scale;
        self
    }

    /// Account for `frame_secs` of wall time and run the ticks it covers
    pub fn advance(&mut self, line: &mut LineSimulation, frame_secs: f32) -> Vec<LineEvent> {
        // A NaN would poison the accumulator for good
        let frame_secs = if frame_secs.is_finite() {
            frame_secs.clamp(0.0, self.max_frame)
        } else {
            0.0
        };
        self.accumulator += frame_secs;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            events.extend(line.tick(self.tick_scale));
            self.accumulator -= self.step;
            substeps += 1;
        }
        self.steps_run += u64::from(substeps);

        if substeps == self.max_substeps && self.accumulator >= self.step {
            log::debug!(
                "Frame loop behind by {:.3}s after {} substeps",
                self.accumulator,
                substeps
            );
        }

        events
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    pub fn steps_run(&self) -> u64 {
        self.steps_run
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::LineConfig;

    fn demo_line() -> LineSimulation {
        LineSimulation::initialize(&LineConfig::default()).unwrap()
    }

    #[test]
    fn test_whole_steps_only() {
        let mut line = demo_line();
        let mut frames = FrameLoop::new(0.25, 8, 10.0);

        frames.advance(&mut line, 1.0);
        assert_eq!(line.ticks(), 4);

        frames.advance(&mut line, 0.125);
        assert_eq!(line.ticks(), 4);
        assert_eq!(frames.alpha(), 0.5);

        frames.advance(&mut line, 0.125);
        assert_eq!(line.ticks(), 5);
        assert_eq!(frames.steps_run(), 5);
    }

    #[test]
    fn test_substep_cap_keeps_backlog() {
        let mut line = demo_line();
        let mut frames = FrameLoop::new(0.25, 2, 10.0);

        frames.advance(&mut line, 1.0);
        assert_eq!(line.ticks(), 2);

        // Backlog drains on the following frames
        frames.advance(&mut line, 0.0);
        assert_eq!(line.ticks(), 4);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut line = demo_line();
        let mut frames = FrameLoop::new(0.25, 100, 0.5);
        frames.advance(&mut line, 60.0);
        assert_eq!(line.ticks(), 2);
    }

    #[test]
    fn test_events_match_direct_ticks() {
        let mut looped = demo_line();
        let mut direct = demo_line();
        let mut frames = FrameLoop::new(0.25, 16, 10.0).with_tick_scale(2.0);

        let from_loop = frames.advance(&mut looped, 2.5);
        let mut from_ticks = Vec::new();
        for _ in 0..10 {
            from_ticks.extend(direct.tick(2.0));
        }
        assert_eq!(from_loop, from_ticks);
        assert_eq!(looped.snapshot(), direct.snapshot());
    }

    #[test]
    fn test_non_finite_frame_times_are_skipped() {
        let mut line = demo_line();
        let mut frames = FrameLoop::new(0.25, 8, 10.0);

        assert!(frames.advance(&mut line, f32::NAN).is_empty());
        frames.advance(&mut line, f32::INFINITY);
        assert_eq!(line.ticks(), 0);

        frames.advance(&mut line, 0.5);
        assert_eq!(line.ticks(), 2);
        assert_eq!(frames.alpha(), 0.0);
    }

    #[test]
    fn test_default_runs_at_sixty_hz() {
        let mut line = demo_line();
        let mut frames = FrameLoop::default();
        frames.advance(&mut line, SIM_DT);
        assert_eq!(line.ticks(), 1);
        frames.reset();
        assert_eq!(frames.alpha(), 0.0);
    }
}
