use glam::Vec2;

const PRECISION: f32 = 1e-4;
const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;

/// Maps linear progress through a keyframe interval to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Timing curve from (0, 0) to (1, 1) shaped by two control points, the
    /// same family as CSS `cubic-bezier()`.
    CubicBezier { cp1: Vec2, cp2: Vec2 },
}

impl Easing {
    /// Control point x coordinates are clamped to the unit interval so the
    /// curve stays a function of time. y may overshoot.
    pub fn cubic_bezier(cp1: Vec2, cp2: Vec2) -> Self {
        Easing::CubicBezier {
            cp1: Vec2::new(cp1.x.clamp(0.0, 1.0), cp1.y),
            cp2: Vec2::new(cp2.x.clamp(0.0, 1.0), cp2.y),
        }
    }

    /// Builds the easing for a keyframe from its `o` and `i` handles.
    /// Both must be present; otherwise the interval is linear.
    pub fn from_handles(out_handle: Option<Vec2>, in_handle: Option<Vec2>) -> Self {
        match (out_handle, in_handle) {
            (Some(cp1), Some(cp2)) => Easing::cubic_bezier(cp1, cp2),
            _ => Easing::Linear,
        }
    }

    pub fn ease(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::CubicBezier { cp1, cp2 } => solve_cubic_bezier(*cp1, *cp2, fraction),
        }
    }
}

/// Solves the curve for the y value at time `x`.
pub fn solve_cubic_bezier(p1: Vec2, p2: Vec2, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let t = solve_curve_t(p1.x, p2.x, x);
    bezier_component(p1.y, p2.y, t)
}

fn bezier_component(c1: f32, c2: f32, t: f32) -> f32 {
    let one_minus_t = 1.0 - t;
    3.0 * one_minus_t * one_minus_t * t * c1 + 3.0 * one_minus_t * t * t * c2 + t * t * t
}

fn bezier_slope(c1: f32, c2: f32, t: f32) -> f32 {
    let one_minus_t = 1.0 - t;
    3.0 * one_minus_t * one_minus_t * c1
        + 6.0 * one_minus_t * t * (c2 - c1)
        + 3.0 * t * t * (1.0 - c2)
}

fn solve_curve_t(x1: f32, x2: f32, x: f32) -> f32 {
    // Newton-Raphson
    let mut t = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bezier_component(x1, x2, t) - x;
        if err.abs() < PRECISION {
            return t;
        }
        let dx_dt = bezier_slope(x1, x2, t);
        if dx_dt.abs() < 1e-6 {
            break;
        }
        t -= err / dx_dt;
        if !(0.0..=1.0).contains(&t) {
            break;
        }
    }

    // x(t) is monotonic for clamped control points, so bisection always converges.
    let mut lo = 0.0;
    let mut hi = 1.0;
    t = x;
    for _ in 0..BISECTION_ITERATIONS {
        let estimate = bezier_component(x1, x2, t);
        if (estimate - x).abs() < PRECISION {
            break;
        }
        if estimate < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    t
}
