use std::f32::consts::TAU;

use crate::coords::Vec2;

use super::Color;

/// Gradient spread behavior outside [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

impl SpreadMode {
    #[inline]
    fn apply(self, t: f32) -> f32 {
        match self {
            SpreadMode::Pad => t.clamp(0.0, 1.0),
            SpreadMode::Repeat => t - t.floor(),
            SpreadMode::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }
}

/// A single gradient stop.
///
/// `t` is expected in [0, 1] and non-decreasing across a stop list.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Builds a stop list from parallel color/position arrays.
///
/// Without positions (or with a length mismatch) the colors are spread
/// evenly over [0, 1].
pub fn stops_from(colors: &[Color], positions: Option<&[f32]>) -> Vec<ColorStop> {
    match positions {
        Some(pos) if pos.len() == colors.len() => colors
            .iter()
            .zip(pos)
            .map(|(&c, &t)| ColorStop::new(t, c))
            .collect(),
        _ => {
            let last = colors.len().saturating_sub(1).max(1) as f32;
            colors
                .iter()
                .enumerate()
                .map(|(i, &c)| ColorStop::new(i as f32 / last, c))
                .collect()
        }
    }
}

/// Samples a stop list at `t` (already mapped into [0, 1]).
pub fn sample_stops(stops: &[ColorStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.t {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.t {
            let span = b.t - a.t;
            if span <= f32::EPSILON {
                return b.color;
            }
            return a.color.lerp(b.color, (t - a.t) / span);
        }
    }
    stops[stops.len() - 1].color
}

/// Linear gradient definition in logical pixel space.
///
/// Semantics:
/// - `start` and `end` are positions in the same coordinate space as geometry.
/// - Stops define premultiplied linear colors.
/// - `spread` defines out-of-range behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        Self {
            start,
            end,
            stops,
            spread,
        }
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && (self.end.x != self.start.x || self.end.y != self.start.y)
    }

    fn eval(&self, p: Vec2) -> Color {
        let d = self.end - self.start;
        let len2 = d.dot(d);
        let t = if len2 <= f32::EPSILON { 0.0 } else { (p - self.start).dot(d) / len2 };
        sample_stops(&self.stops, self.spread.apply(t))
    }
}

/// Radial gradient centered at `center`, reaching the last stop at `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl RadialGradient {
    pub fn new(center: Vec2, radius: f32, stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        Self { center, radius, stops, spread }
    }

    fn eval(&self, p: Vec2) -> Color {
        let t = (p - self.center).length() / self.radius.max(f32::EPSILON);
        sample_stops(&self.stops, self.spread.apply(t))
    }
}

/// Angular gradient around `center`.
///
/// `t = 0` points along +X and grows clockwise (screen space, +Y down).
#[derive(Debug, Clone, PartialEq)]
pub struct SweepGradient {
    pub center: Vec2,
    pub stops: Vec<ColorStop>,
}

impl SweepGradient {
    pub fn new(center: Vec2, stops: Vec<ColorStop>) -> Self {
        Self { center, stops }
    }

    fn eval(&self, p: Vec2) -> Color {
        let d = p - self.center;
        let t = (d.y.atan2(d.x) / TAU).rem_euclid(1.0);
        sample_stops(&self.stops, t)
    }
}

/// Gradient shader applied to glyph coverage in place of the solid paint color.
#[derive(Debug, Clone, PartialEq)]
pub enum Shader {
    Linear(LinearGradient),
    Radial(RadialGradient),
    Sweep(SweepGradient),
}

impl Shader {
    /// Evaluates the shader at a point in logical pixels.
    pub fn eval(&self, p: Vec2) -> Color {
        match self {
            Shader::Linear(g) => g.eval(p),
            Shader::Radial(g) => g.eval(p),
            Shader::Sweep(g) => g.eval(p),
        }
    }

    pub fn stops(&self) -> &[ColorStop] {
        match self {
            Shader::Linear(g) => &g.stops,
            Shader::Radial(g) => &g.stops,
            Shader::Sweep(g) => &g.stops,
        }
    }
}
