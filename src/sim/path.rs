//! Conveyor path: an open Catmull-Rom curve through fixed control points
//!
//! Two parameterizations:
//! - `point(t)`: raw spline parameter, segments evenly spaced in `t`
//! - `point_at(u)`: arc-length parameter, equal steps in `u` cover equal
//!   distances along the curve (what pallets and stations use)
//!
//! The curve is open. When progress wraps from just below 1 back to 0 the
//! sampled position jumps from the last control point to the first.

use glam::Vec3;

use super::spline::CubicSegment;
use crate::consts::ARC_LENGTH_DIVISIONS;
use crate::error::LineError;
use crate::settings::{CurveKind, validate_control_points};

/// Immutable parametric curve over 3D space
#[derive(Debug, Clone)]
pub struct PathModel {
    points: Vec<Vec3>,
    kind: CurveKind,
    /// Cumulative length at `t = i / ARC_LENGTH_DIVISIONS`
    arc_lengths: Vec<f32>,
}

impl PathModel {
    pub fn new(points: Vec<Vec3>, kind: CurveKind) -> Result<Self, LineError> {
        validate_control_points(&points)?;

        let mut path = Self {
            points,
            kind,
            arc_lengths: Vec::new(),
        };
        path.arc_lengths = path.compute_arc_lengths(ARC_LENGTH_DIVISIONS);
        Ok(path)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Approximate total arc length
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Sample by raw spline parameter `t` in [0, 1]
    pub fn point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let p = (n - 1) as f32 * t;

        // Negative t saturates to segment 0 and extrapolates backwards
        let mut seg = p.floor() as usize;
        if seg > n - 2 {
            // t == 1 lands on the end of the last segment
            seg = n - 2;
        }
        let weight = p - seg as f32;

        self.segment(seg).eval(weight)
    }

    /// Sample by arc-length parameter `u` in [0, 1]
    ///
    /// Callers normalize `u`; values outside [0, 1] extrapolate the end
    /// segments and are not meaningful.
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Map an arc-length fraction to the spline parameter
    pub fn u_to_t(&self, u: f32) -> f32 {
        let lengths = &self.arc_lengths;
        let last = lengths.len() - 1;
        let target = u * lengths[last];

        // Last division whose start is not past the target
        let i = lengths
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(last - 1);

        let before = lengths[i];
        if before == target {
            return i as f32 / last as f32;
        }

        let span = lengths[i + 1] - before;
        if span <= 0.0 {
            return i as f32 / last as f32;
        }

        (i as f32 + (target - before) / span) / last as f32
    }

    /// `divisions + 1` points evenly spaced by arc length, ends included
    pub fn sample(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }

    /// Whether the control points close on themselves (no seam at wrap)
    pub fn is_closed_loop(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.distance_squared(*last) < 1e-6,
            _ => false,
        }
    }

    /// Cubic for the span between control points `seg` and `seg + 1`
    fn segment(&self, seg: usize) -> CubicSegment {
        let pts = &self.points;
        let n = pts.len();

        let p1 = pts[seg];
        let p2 = pts[seg + 1];
        // Open ends: mirror the neighbour through the endpoint
        let p0 = if seg > 0 { pts[seg - 1] } else { 2.0 * p1 - p2 };
        let p3 = if seg + 2 < n { pts[seg + 2] } else { 2.0 * p2 - p1 };

        match self.kind {
            CurveKind::Centripetal => CubicSegment::with_knot_exponent(p0, p1, p2, p3, 0.25),
            CurveKind::Chordal => CubicSegment::with_knot_exponent(p0, p1, p2, p3, 0.5),
            CurveKind::CatmullRom { tension } => CubicSegment::uniform(p0, p1, p2, p3, tension),
        }
    }

    fn compute_arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        lengths.push(0.0);

        let mut last = self.point(0.0);
        let mut sum = 0.0;
        for i in 1..=divisions {
            let current = self.point(i as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }
}
