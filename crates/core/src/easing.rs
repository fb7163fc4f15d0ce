//! Map the elapsed fraction of an animation to its progress.
//!
//! Every curve maps `0.0` to `0.0` and `1.0` to `1.0` exactly, so an
//! animation that reaches the end of its duration lands on its target.

/// An easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic acceleration from zero velocity.
    EaseInQuad,
    /// Quadratic deceleration to zero velocity.
    EaseOutQuad,
    /// Quadratic acceleration until halfway, then deceleration.
    EaseInOutQuad,
    /// Cubic acceleration from zero velocity.
    EaseInCubic,
    /// Cubic deceleration to zero velocity.
    EaseOutCubic,
    /// Cubic acceleration until halfway, then deceleration.
    EaseInOutCubic,
    /// A CSS-like cubic Bézier curve.
    CubicBezier(CubicBezier),
    /// The default scrolling curve, `cubic-bezier(0.42, 0, 0.58, 1)`.
    #[default]
    Standard,
}

impl Easing {
    /// Returns the progress at the given elapsed fraction.
    ///
    /// The fraction is clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }

        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::CubicBezier(curve) => curve.solve(t),
            Easing::Standard => CubicBezier::EASE_IN_OUT.solve(t),
        }
    }
}

/// A cubic Bézier curve going from `(0, 0)` to `(1, 1)` through the control
/// points `(x1, y1)` and `(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBezier {
    /// The X coordinate of the first control point. Must be in `[0, 1]`.
    pub x1: f32,
    /// The Y coordinate of the first control point.
    pub y1: f32,
    /// The X coordinate of the second control point. Must be in `[0, 1]`.
    pub x2: f32,
    /// The Y coordinate of the second control point.
    pub y2: f32,
}

const NEWTON_ITERATIONS: usize = 4;
const NEWTON_MIN_SLOPE: f32 = 0.001;
const SUBDIVISION_PRECISION: f32 = 0.000_000_1;
const SUBDIVISION_MAX_ITERATIONS: usize = 10;
const SPLINE_TABLE_SIZE: usize = 11;
const SAMPLE_STEP_SIZE: f32 = 1.0 / (SPLINE_TABLE_SIZE as f32 - 1.0);

impl CubicBezier {
    /// `cubic-bezier(0.25, 0.1, 0.25, 1)`
    pub const EASE: Self = Self::new(0.25, 0.1, 0.25, 1.0);

    /// `cubic-bezier(0.42, 0, 1, 1)`
    pub const EASE_IN: Self = Self::new(0.42, 0.0, 1.0, 1.0);

    /// `cubic-bezier(0, 0, 0.58, 1)`
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);

    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);

    /// Creates a new [`CubicBezier`] with the given control points.
    ///
    /// The X coordinates are clamped to `[0, 1]` so the curve stays a
    /// function of time.
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// Returns the Y coordinate of the curve at the given X coordinate.
    pub fn solve(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }

        if x >= 1.0 {
            return 1.0;
        }

        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x;
        }

        calc_bezier(self.t_for_x(x), self.y1, self.y2)
    }

    fn t_for_x(&self, x: f32) -> f32 {
        let samples: [f32; SPLINE_TABLE_SIZE] = std::array::from_fn(|i| {
            calc_bezier(i as f32 * SAMPLE_STEP_SIZE, self.x1, self.x2)
        });

        let mut interval_start = 0.0;
        let mut current = 1;

        while current != SPLINE_TABLE_SIZE - 1 && samples[current] <= x {
            interval_start += SAMPLE_STEP_SIZE;
            current += 1;
        }

        current -= 1;

        let dist = (x - samples[current]) / (samples[current + 1] - samples[current]);
        let guess = interval_start + dist * SAMPLE_STEP_SIZE;
        let slope = slope(guess, self.x1, self.x2);

        if slope >= NEWTON_MIN_SLOPE {
            newton_raphson(x, guess, self.x1, self.x2)
        } else if slope == 0.0 {
            guess
        } else {
            binary_subdivide(
                x,
                interval_start,
                interval_start + SAMPLE_STEP_SIZE,
                self.x1,
                self.x2,
            )
        }
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::EASE_IN_OUT
    }
}

impl From<CubicBezier> for Easing {
    fn from(curve: CubicBezier) -> Self {
        Easing::CubicBezier(curve)
    }
}

fn coefficients(a1: f32, a2: f32) -> (f32, f32, f32) {
    (1.0 - 3.0 * a2 + 3.0 * a1, 3.0 * a2 - 6.0 * a1, 3.0 * a1)
}

fn calc_bezier(t: f32, a1: f32, a2: f32) -> f32 {
    let (a, b, c) = coefficients(a1, a2);

    ((a * t + b) * t + c) * t
}

fn slope(t: f32, a1: f32, a2: f32) -> f32 {
    let (a, b, c) = coefficients(a1, a2);

    3.0 * a * t * t + 2.0 * b * t + c
}

fn newton_raphson(x: f32, mut guess: f32, x1: f32, x2: f32) -> f32 {
    for _ in 0..NEWTON_ITERATIONS {
        let current_slope = slope(guess, x1, x2);

        if current_slope == 0.0 {
            return guess;
        }

        let current_x = calc_bezier(guess, x1, x2) - x;
        guess -= current_x / current_slope;
    }

    guess
}

fn binary_subdivide(x: f32, mut a: f32, mut b: f32, x1: f32, x2: f32) -> f32 {
    let mut t = a;

    for _ in 0..SUBDIVISION_MAX_ITERATIONS {
        t = a + (b - a) / 2.0;
        let current_x = calc_bezier(t, x1, x2) - x;

        if current_x.abs() <= SUBDIVISION_PRECISION {
            break;
        }

        if current_x > 0.0 {
            b = t;
        } else {
            a = t;
        }
    }

    t
}

/// Linearly interpolates between `start` and `end` by `progress`.
pub fn interpolate(start: f32, end: f32, progress: f32) -> f32 {
    start + (end - start) * progress
}
