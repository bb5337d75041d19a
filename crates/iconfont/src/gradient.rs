//! Gradient shader geometry derived from bounds, orientation and level.

use std::rc::Rc;

use iconfont_engine::coords::{Rect, Vec2};
use iconfont_engine::paint::gradient::stops_from;
use iconfont_engine::paint::{
    Color, LinearGradient, RadialGradient, Shader, SpreadMode, SweepGradient,
};

use crate::state::{GradientKind, GradientState, Orientation};

/// Upper bound of the drawable level range.
pub const MAX_LEVEL: u16 = 10_000;

/// Smallest radius handed to a radial shader.
pub const MIN_RADIUS: f32 = 0.001;

/// Result of one geometry pass.
#[derive(Debug, Clone, Default)]
pub struct GradientGeometry {
    pub shader: Option<Rc<Shader>>,
    /// Radial radius after level scaling, before clamping. Zero for other kinds.
    pub radius: f32,
}

#[inline]
fn level_fraction(level: u16) -> f32 {
    level.min(MAX_LEVEL) as f32 / MAX_LEVEL as f32
}

/// Start and end points of a linear gradient spanning `r` in `orientation`.
pub fn linear_endpoints(r: Rect, orientation: Orientation) -> (Vec2, Vec2) {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    let (start, end) = match orientation {
        Orientation::TopBottom => ((l, t), (l, b)),
        Orientation::TrBl => ((rt, t), (l, b)),
        Orientation::RightLeft => ((rt, t), (l, t)),
        Orientation::BrTl => ((rt, b), (l, t)),
        Orientation::BottomTop => ((l, b), (l, t)),
        Orientation::BlTr => ((l, b), (rt, t)),
        Orientation::LeftRight => ((l, t), (rt, t)),
        Orientation::TlBr => ((l, t), (rt, b)),
    };
    (Vec2::new(start.0, start.1), Vec2::new(end.0, end.1))
}

/// Computes the shader for `gradient` inside `rect` at `level` (0..=10000).
///
/// Returns no shader when the gradient has no colors.
pub fn compute(gradient: &GradientState, rect: Rect, level: u16) -> GradientGeometry {
    let Some(colors) = gradient.colors().filter(|c| !c.is_empty()) else {
        return GradientGeometry::default();
    };
    let level = if gradient.use_level { level_fraction(level) } else { 1.0 };

    match gradient.kind {
        GradientKind::Linear => {
            let (start, end) = linear_endpoints(rect, gradient.orientation());
            let end = start.lerp(end, level);
            let stops = stops_from(colors, gradient.positions());
            GradientGeometry {
                shader: Some(Rc::new(Shader::Linear(LinearGradient::new(
                    start,
                    end,
                    stops,
                    SpreadMode::Pad,
                )))),
                radius: 0.0,
            }
        }
        GradientKind::Radial => {
            let center = rect.point_at(gradient.center_x, gradient.center_y);
            let radius = gradient.radius * level;
            // A zero-radius shader is invalid.
            let shader_radius = if radius <= 0.0 { MIN_RADIUS } else { radius };
            GradientGeometry {
                shader: Some(Rc::new(Shader::Radial(RadialGradient::new(
                    center,
                    shader_radius,
                    stops_from(colors, None),
                    SpreadMode::Pad,
                )))),
                radius,
            }
        }
        GradientKind::Sweep => {
            let center = rect.point_at(gradient.center_x, gradient.center_y);
            let stops = if gradient.use_level {
                let (padded, positions) = sweep_level_stops(colors, level);
                stops_from(&padded, Some(positions.as_slice()))
            } else {
                stops_from(colors, None)
            };
            GradientGeometry {
                shader: Some(Rc::new(Shader::Sweep(SweepGradient::new(center, stops)))),
                radius: 0.0,
            }
        }
    }
}

/// Partial sweep for `level`: colors gain a trailing copy of the last one,
/// positions are compressed into `[0, level]` and the final one pinned to 1.
fn sweep_level_stops(colors: &[Color], level: f32) -> (Vec<Color>, Vec<f32>) {
    let n = colors.len();
    let mut padded = colors.to_vec();
    padded.push(colors[n - 1]);

    let fraction = if n > 1 { 1.0 / (n - 1) as f32 } else { 0.0 };
    let mut positions: Vec<f32> = (0..n).map(|i| i as f32 * fraction * level).collect();
    positions.push(1.0);
    (padded, positions)
}
