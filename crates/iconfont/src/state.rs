//! Mutable visual state of one glyph drawable.

use thiserror::Error;

use iconfont_engine::coords::Insets;
use iconfont_engine::paint::{BlendMode, Color, GlyphPaint, ShadowLayer};

use crate::tint::ColorStateList;

/// Intrinsic size value meaning "use the container bounds".
pub const UNSPECIFIED_SIZE: i32 = -1;

/// Normalizes degrees into `[0, 360)`.
#[inline]
pub fn normalize_angle(degrees: i32) -> i32 {
    ((degrees % 360) + 360) % 360
}

/// Geometry family of a gradient.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
    Sweep,
}

impl GradientKind {
    /// Maps the platform enum (`0` linear, `1` radial, `2` sweep).
    pub fn from_platform(value: i32) -> Option<Self> {
        match value {
            0 => Some(GradientKind::Linear),
            1 => Some(GradientKind::Radial),
            2 => Some(GradientKind::Sweep),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(GradientKind::Linear),
            "radial" => Some(GradientKind::Radial),
            "sweep" => Some(GradientKind::Sweep),
            _ => None,
        }
    }
}

/// Direction of a linear gradient, from start to end.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Orientation {
    TopBottom,
    TrBl,
    RightLeft,
    BrTl,
    BottomTop,
    BlTr,
    #[default]
    LeftRight,
    TlBr,
}

impl Orientation {
    /// Orientation for a normalized angle, if it is one of the eight
    /// supported multiples of 45.
    pub fn from_angle(normalized: i32) -> Option<Self> {
        Some(match normalized {
            0 => Orientation::LeftRight,
            45 => Orientation::BlTr,
            90 => Orientation::BottomTop,
            135 => Orientation::BrTl,
            180 => Orientation::RightLeft,
            225 => Orientation::TrBl,
            270 => Orientation::TopBottom,
            315 => Orientation::TlBr,
            _ => return None,
        })
    }

    pub fn angle(self) -> i32 {
        match self {
            Orientation::LeftRight => 0,
            Orientation::BlTr => 45,
            Orientation::BottomTop => 90,
            Orientation::BrTl => 135,
            Orientation::RightLeft => 180,
            Orientation::TrBl => 225,
            Orientation::TopBottom => 270,
            Orientation::TlBr => 315,
        }
    }
}

/// Rejected gradient color configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradientError {
    #[error("a gradient takes 2 or 3 colors, got {0}")]
    ColorCount(usize),
    #[error("{positions} positions given for {colors} colors")]
    PositionCount { colors: usize, positions: usize },
    #[error("gradient positions must be finite and non-decreasing")]
    Unordered,
}

/// Optional color gradient drawn in place of the solid glyph color.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientState {
    pub kind: GradientKind,
    pub center_x: f32,
    pub center_y: f32,
    angle: i32,
    orientation: Orientation,
    /// Configured radius for radial gradients, in pixels.
    pub radius: f32,
    colors: Option<Vec<Color>>,
    positions: Option<Vec<f32>>,
    pub use_level: bool,
}

impl Default for GradientState {
    fn default() -> Self {
        Self {
            kind: GradientKind::Linear,
            center_x: 0.0,
            center_y: 0.0,
            angle: Orientation::LeftRight.angle(),
            orientation: Orientation::LeftRight,
            radius: 0.0,
            colors: None,
            positions: None,
            use_level: false,
        }
    }
}

impl GradientState {
    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Sets the angle in degrees.
    ///
    /// The angle is normalized into `[0, 360)`. Anything that is not one of
    /// the eight supported multiples of 45 falls back to top-to-bottom.
    pub fn set_angle(&mut self, degrees: i32) {
        let normalized = normalize_angle(degrees);
        match Orientation::from_angle(normalized) {
            Some(o) => self.set_orientation(o),
            None => {
                log::debug!("gradient angle {degrees} is not a multiple of 45, using top-to-bottom");
                self.set_orientation(Orientation::TopBottom);
            }
        }
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.angle = orientation.angle();
    }

    pub fn colors(&self) -> Option<&[Color]> {
        self.colors.as_deref()
    }

    pub fn positions(&self) -> Option<&[f32]> {
        self.positions.as_deref()
    }

    pub fn has_colors(&self) -> bool {
        self.colors.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Position of the center color when none is given explicitly.
    pub fn center_position(&self) -> f32 {
        let c = if self.center_x != 0.5 { self.center_x } else { self.center_y };
        c.clamp(0.0, 1.0)
    }

    /// Sets start/end or start/center/end colors.
    ///
    /// Two colors carry no positions. Three colors get `[0, center, 1]`,
    /// with the center taken from [`center_position`](Self::center_position).
    pub fn set_colors(&mut self, colors: &[Color]) -> Result<(), GradientError> {
        let positions = match colors.len() {
            2 => None,
            3 => Some(vec![0.0, self.center_position(), 1.0]),
            n => return Err(GradientError::ColorCount(n)),
        };
        self.colors = Some(colors.to_vec());
        self.positions = positions;
        Ok(())
    }

    /// Sets colors with explicit stop positions.
    pub fn set_colors_with_positions(
        &mut self,
        colors: &[Color],
        positions: &[f32],
    ) -> Result<(), GradientError> {
        if !(2..=3).contains(&colors.len()) {
            return Err(GradientError::ColorCount(colors.len()));
        }
        if positions.len() != colors.len() {
            return Err(GradientError::PositionCount {
                colors: colors.len(),
                positions: positions.len(),
            });
        }
        let ordered = positions.iter().all(|p| p.is_finite())
            && positions.windows(2).all(|w| w[0] <= w[1]);
        if !ordered {
            return Err(GradientError::Unordered);
        }
        self.colors = Some(colors.to_vec());
        self.positions = Some(positions.to_vec());
        Ok(())
    }

    pub fn clear_colors(&mut self) {
        self.colors = None;
        self.positions = None;
    }
}

/// Everything needed to paint one glyph.
///
/// Shared between drawables as `Rc<GlyphState>` and written copy-on-write.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphState {
    /// Intrinsic pixel size, or [`UNSPECIFIED_SIZE`].
    pub size: i32,
    pub code: Option<char>,
    pub paint: GlyphPaint,
    pub tint: Option<ColorStateList>,
    pub tint_mode: Option<BlendMode>,
    shadow: ShadowLayer,
    pub padding: Insets,
    pub gradient: GradientState,
}

impl Default for GlyphState {
    fn default() -> Self {
        Self {
            size: UNSPECIFIED_SIZE,
            code: None,
            paint: GlyphPaint::default(),
            tint: None,
            tint_mode: None,
            shadow: ShadowLayer::default(),
            padding: Insets::zero(),
            gradient: GradientState::default(),
        }
    }
}

impl GlyphState {
    pub fn shadow(&self) -> ShadowLayer {
        self.shadow
    }

    /// Replaces the shadow and mirrors it into the paint.
    pub fn set_shadow(&mut self, shadow: ShadowLayer) {
        self.shadow = shadow;
        self.paint.set_shadow_layer(shadow.radius, shadow.dx, shadow.dy, shadow.color);
    }

    pub fn set_shadow_dx(&mut self, dx: f32) {
        self.set_shadow(ShadowLayer { dx, ..self.shadow });
    }

    pub fn set_shadow_dy(&mut self, dy: f32) {
        self.set_shadow(ShadowLayer { dy, ..self.shadow });
    }

    pub fn set_shadow_radius(&mut self, radius: f32) {
        self.set_shadow(ShadowLayer { radius, ..self.shadow });
    }

    pub fn set_shadow_color(&mut self, color: Color) {
        self.set_shadow(ShadowLayer { color, ..self.shadow });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::from_premul(1.0, 0.0, 0.0, 1.0);
    const BLUE: Color = Color::from_premul(0.0, 0.0, 1.0, 1.0);

    // ── angles ────────────────────────────────────────────────────────────

    #[test]
    fn default_gradient_runs_left_to_right_from_origin() {
        let g = GradientState::default();
        assert_eq!(g.angle(), 0);
        assert_eq!(g.orientation(), Orientation::LeftRight);
        assert_eq!((g.center_x, g.center_y), (0.0, 0.0));
    }

    #[test]
    fn normalize_wraps_negative_angles() {
        assert_eq!(normalize_angle(-90), 270);
        assert_eq!(normalize_angle(720), 0);
        assert_eq!(normalize_angle(405), 45);
    }

    #[test]
    fn every_multiple_of_45_has_an_orientation() {
        for a in (-720..=720).step_by(45) {
            let n = normalize_angle(a);
            let o = Orientation::from_angle(n).unwrap();
            assert_eq!(o.angle(), n);
        }
    }

    #[test]
    fn negative_ninety_is_top_to_bottom() {
        let mut g = GradientState::default();
        g.set_angle(-90);
        assert_eq!(g.angle(), 270);
        assert_eq!(g.orientation(), Orientation::TopBottom);
    }

    #[test]
    fn ninety_is_bottom_to_top() {
        let mut g = GradientState::default();
        g.set_angle(90);
        assert_eq!(g.orientation(), Orientation::BottomTop);
    }

    #[test]
    fn unsupported_angle_falls_back_to_top_bottom() {
        let mut g = GradientState::default();
        g.set_angle(0);
        assert_eq!(g.orientation(), Orientation::LeftRight);
        g.set_angle(30);
        assert_eq!(g.orientation(), Orientation::TopBottom);
        assert_eq!(g.angle(), 270);
    }

    #[test]
    fn stored_angle_is_always_supported() {
        let mut g = GradientState::default();
        for a in -400..400 {
            g.set_angle(a);
            assert_eq!(g.angle() % 45, 0);
            assert!((0..360).contains(&g.angle()));
        }
    }

    // ── colors ────────────────────────────────────────────────────────────

    #[test]
    fn two_colors_have_no_positions() {
        let mut g = GradientState::default();
        g.set_colors(&[RED, BLUE]).unwrap();
        assert_eq!(g.colors(), Some(&[RED, BLUE][..]));
        assert!(g.positions().is_none());
    }

    #[test]
    fn three_colors_derive_center_position() {
        let mut g = GradientState::default();
        g.set_colors(&[RED, Color::WHITE, BLUE]).unwrap();
        assert_eq!(g.positions(), Some(&[0.0, 0.0, 1.0][..]));

        g.center_x = 0.5;
        g.center_y = 0.3;
        g.set_colors(&[RED, Color::WHITE, BLUE]).unwrap();
        assert_eq!(g.positions(), Some(&[0.0, 0.3, 1.0][..]));

        g.center_x = 0.7;
        g.set_colors(&[RED, Color::WHITE, BLUE]).unwrap();
        assert_eq!(g.positions(), Some(&[0.0, 0.7, 1.0][..]));
    }

    #[test]
    fn derived_positions_are_non_decreasing() {
        let mut g = GradientState::default();
        g.center_x = 4.0;
        g.set_colors(&[RED, Color::WHITE, BLUE]).unwrap();
        let p = g.positions().unwrap();
        assert_eq!(p.len(), 3);
        assert!(p.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn rejects_wrong_color_counts() {
        let mut g = GradientState::default();
        assert_eq!(g.set_colors(&[RED]), Err(GradientError::ColorCount(1)));
        assert_eq!(g.set_colors(&[RED; 4]), Err(GradientError::ColorCount(4)));
        assert!(!g.has_colors());
    }

    #[test]
    fn explicit_positions_are_validated() {
        let mut g = GradientState::default();
        assert_eq!(
            g.set_colors_with_positions(&[RED, BLUE], &[0.0]),
            Err(GradientError::PositionCount { colors: 2, positions: 1 })
        );
        assert_eq!(
            g.set_colors_with_positions(&[RED, BLUE], &[0.8, 0.2]),
            Err(GradientError::Unordered)
        );
        g.set_colors_with_positions(&[RED, BLUE], &[0.2, 0.8]).unwrap();
        assert_eq!(g.positions(), Some(&[0.2, 0.8][..]));
    }

    // ── shadow ────────────────────────────────────────────────────────────

    #[test]
    fn shadow_setters_keep_other_values() {
        let mut s = GlyphState::default();
        s.set_shadow_dx(2.0);
        s.set_shadow_dy(3.0);
        s.set_shadow_radius(4.0);
        s.set_shadow_color(RED);
        s.set_shadow_dx(5.0);

        let expected = ShadowLayer::new(4.0, 5.0, 3.0, RED);
        assert_eq!(s.shadow(), expected);
        assert_eq!(s.paint.shadow, expected);
    }
}
