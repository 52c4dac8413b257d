use std::time::Duration;

/// Configuration for a single animated value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material "standard" curve: quick start, long settle.
    FastOutSlowIn,
    /// Cubic bezier through (0, 0), (x1, y1), (x2, y2), (1, 1).
    Cubic { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0). Input is clamped.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Easing::Cubic { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    fn evaluate(a: f32, b: f32, m: f32) -> f32 {
        3.0 * a * (1.0 - m) * (1.0 - m) * m + 3.0 * b * (1.0 - m) * m * m + m * m * m
    }

    // Bisect for the curve parameter whose x matches t.
    let mut start = 0.0f32;
    let mut end = 1.0f32;
    let mut midpoint = 0.5f32;
    for _ in 0..48 {
        midpoint = (start + end) / 2.0;
        let estimate = evaluate(x1, x2, midpoint);
        if (t - estimate).abs() < 0.0001 {
            break;
        }
        if estimate < t {
            start = midpoint;
        } else {
            end = midpoint;
        }
    }
    evaluate(y1, y2, midpoint)
}

/// An easing confined to a sub-range of the timeline.
///
/// Progress before `start` maps to 0, after `end` to 1, and the range in
/// between is stretched over the wrapped easing. A zero-width interval acts
/// as a step at `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f32,
    pub end: f32,
    pub easing: Easing,
}

impl Interval {
    pub fn new(start: f32, end: f32, easing: Easing) -> Self {
        Self { start, end, easing }
    }

    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if self.end <= self.start {
            let before = t < self.start || (t == self.start && self.start < 1.0);
            return if before { 0.0 } else { 1.0 };
        }
        let local = ((t - self.start) / (self.end - self.start)).clamp(0.0, 1.0);
        self.easing.apply(local)
    }
}
