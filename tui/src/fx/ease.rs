//! Easing for entrance motion: the snappy decelerating bezier every
//! reveal on the page runs on.

/// Cubic bezier timing curve with endpoints pinned to (0,0) and (1,1),
/// the CSS `cubic-bezier(x1, y1, x2, y2)` convention.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

/// Fast start, long settle. Equivalent to `cubic-bezier(0.16, 1, 0.3, 1)`.
pub(crate) const SIGNATURE: CubicBezier = CubicBezier::new(0.16, 1.0, 0.3, 1.0);

const NEWTON_ITERATIONS: usize = 8;
const BISECT_ITERATIONS: usize = 24;
const SLOPE_EPSILON: f32 = 1e-5;

impl CubicBezier {
    pub(crate) const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Cubic Bernstein polynomial for one axis, endpoints 0 and 1.
    fn axis(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * p1 * u * u * t + 3.0 * p2 * u * t * t + t * t * t
    }

    fn axis_slope(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * p1 * (u * u - 2.0 * u * t) + 3.0 * p2 * (2.0 * u * t - t * t) + 3.0 * t * t
    }

    /// Progress at time fraction `x`, both in `0.0..=1.0`.
    pub(crate) fn eval(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        Self::axis(self.y1, self.y2, self.solve_t(x))
    }

    /// Inverts the x-axis polynomial: Newton first, bisection when the
    /// slope is too flat to trust.
    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = Self::axis(self.x1, self.x2, t) - x;
            if error.abs() < SLOPE_EPSILON {
                return t;
            }
            let slope = Self::axis_slope(self.x1, self.x2, t);
            if slope.abs() < SLOPE_EPSILON {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        for _ in 0..BISECT_ITERATIONS {
            t = (lo + hi) / 2.0;
            if Self::axis(self.x1, self.x2, t) < x {
                lo = t;
            } else {
                hi = t;
            }
        }
        t
    }
}
