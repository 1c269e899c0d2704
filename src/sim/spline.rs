//! Cubic Hermite segments for Catmull-Rom interpolation
//!
//! A segment runs from `p1` to `p2`; `p0` and `p3` only shape the tangents.
//! All arithmetic is component-wise on `Vec3`.

use glam::Vec3;

/// Squared-distance weights below this are treated as coincident points
const MIN_KNOT_WEIGHT: f32 = 1e-4;

/// c0 + c1*t + c2*t^2 + c3*t^3
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicSegment {
    /// Hermite form: endpoints and endpoint tangents
    pub fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// Uniform Catmull-Rom with tangents `tension * (next - prev)`
    pub fn uniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, tension: f32) -> Self {
        Self::hermite(p1, p2, tension * (p2 - p0), tension * (p3 - p1))
    }

    /// Non-uniform Catmull-Rom with knot intervals `dt0`, `dt1`, `dt2`
    pub fn non_uniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, dt0: f32, dt1: f32, dt2: f32) -> Self {
        let t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
        let t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
        // Rescale tangents to the [0, 1] parameter of the middle interval
        Self::hermite(p1, p2, t1 * dt1, t2 * dt1)
    }

    /// Non-uniform segment with knot intervals `|pi - pj|^(2 * exponent)`
    ///
    /// `exponent` is 0.25 for centripetal and 0.5 for chordal spacing.
    pub fn with_knot_exponent(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, exponent: f32) -> Self {
        let mut dt0 = p0.distance_squared(p1).powf(exponent);
        let mut dt1 = p1.distance_squared(p2).powf(exponent);
        let mut dt2 = p2.distance_squared(p3).powf(exponent);

        if dt1 < MIN_KNOT_WEIGHT {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_WEIGHT {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_WEIGHT {
            dt2 = dt1;
        }

        Self::non_uniform(p0, p1, p2, p3, dt0, dt1, dt2)
    }

    #[inline]
    pub fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn test_hermite_endpoints() {
        let seg = CubicSegment::hermite(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z);
        assert_eq!(seg.eval(0.0), Vec3::ZERO);
        assert!(approx(seg.eval(1.0), Vec3::X));
    }

    #[test]
    fn test_collinear_points_stay_on_line() {
        let p = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ];
        let uniform = CubicSegment::uniform(p[0], p[1], p[2], p[3], 0.5);
        let centripetal = CubicSegment::with_knot_exponent(p[0], p[1], p[2], p[3], 0.25);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let expected = Vec3::new(1.0 + t, 0.0, 0.0);
            assert!(approx(uniform.eval(t), expected));
            assert!(approx(centripetal.eval(t), expected));
        }
    }

    #[test]
    fn test_coincident_points_do_not_produce_nan() {
        let seg = CubicSegment::with_knot_exponent(Vec3::ONE, Vec3::ONE, Vec3::ONE, Vec3::ONE, 0.25);
        let mid = seg.eval(0.5);
        assert!(mid.is_finite());
        assert!(approx(mid, Vec3::ONE));
    }
}
