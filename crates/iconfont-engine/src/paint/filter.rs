use super::Color;

/// Porter-Duff mode used by a [`ColorFilter`].
///
/// In filter terms the filter color is the source and the painted pixel is
/// the destination.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BlendMode {
    SrcOver,
    #[default]
    SrcIn,
    SrcAtop,
    Multiply,
    Screen,
    Add,
}

impl BlendMode {
    /// Maps a platform `tintMode` enum value to a blend mode.
    ///
    /// Unknown values fall back to [`BlendMode::SrcIn`].
    pub fn from_platform(value: i32) -> Self {
        match value {
            3 => BlendMode::SrcOver,
            5 => BlendMode::SrcIn,
            9 => BlendMode::SrcAtop,
            14 => BlendMode::Multiply,
            15 => BlendMode::Screen,
            16 => BlendMode::Add,
            _ => BlendMode::SrcIn,
        }
    }

    /// Parses a `snake_case` mode name (`src_in`, `multiply`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "src_over" => BlendMode::SrcOver,
            "src_in" => BlendMode::SrcIn,
            "src_atop" => BlendMode::SrcAtop,
            "multiply" => BlendMode::Multiply,
            "screen" => BlendMode::Screen,
            "add" => BlendMode::Add,
            _ => return None,
        })
    }

    /// Composites premultiplied `src` onto premultiplied `dst`.
    pub fn blend(self, src: Color, dst: Color) -> Color {
        let (sa, da) = (src.a, dst.a);
        let ch = |s: f32, d: f32| -> f32 {
            match self {
                BlendMode::SrcOver => s + d * (1.0 - sa),
                BlendMode::SrcIn => s * da,
                BlendMode::SrcAtop => s * da + d * (1.0 - sa),
                BlendMode::Multiply => s * d,
                BlendMode::Screen => s + d - s * d,
                BlendMode::Add => (s + d).min(1.0),
            }
        };
        let a = match self {
            BlendMode::SrcOver => sa + da * (1.0 - sa),
            BlendMode::SrcIn | BlendMode::SrcAtop => da,
            BlendMode::Multiply => sa * da,
            BlendMode::Screen => sa + da - sa * da,
            BlendMode::Add => (sa + da).min(1.0),
        };
        Color::from_premul(ch(src.r, dst.r), ch(src.g, dst.g), ch(src.b, dst.b), a).clamped()
    }
}

/// Color transform applied to every painted pixel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorFilter {
    pub color: Color,
    pub mode: BlendMode,
}

impl ColorFilter {
    #[inline]
    pub const fn new(color: Color, mode: BlendMode) -> Self {
        Self { color, mode }
    }

    #[inline]
    pub fn apply(&self, pixel: Color) -> Color {
        self.mode.blend(self.color, pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::from_premul(1.0, 0.0, 0.0, 1.0);

    #[test]
    fn platform_values_map_to_modes() {
        assert_eq!(BlendMode::from_platform(3), BlendMode::SrcOver);
        assert_eq!(BlendMode::from_platform(14), BlendMode::Multiply);
        assert_eq!(BlendMode::from_platform(99), BlendMode::SrcIn);
    }

    #[test]
    fn names_map_to_modes() {
        assert_eq!(BlendMode::from_name("src_atop"), Some(BlendMode::SrcAtop));
        assert_eq!(BlendMode::from_name("overlay"), None);
    }

    #[test]
    fn src_in_keeps_destination_coverage() {
        let half_white = Color::WHITE.scale_alpha(0.5);
        let out = ColorFilter::new(RED, BlendMode::SrcIn).apply(half_white);
        assert_eq!(out, Color::from_premul(0.5, 0.0, 0.0, 0.5));
    }

    #[test]
    fn src_in_on_transparent_stays_transparent() {
        let out = ColorFilter::new(RED, BlendMode::SrcIn).apply(Color::TRANSPARENT);
        assert!(out.is_transparent());
    }

    #[test]
    fn multiply_with_white_is_identity_for_opaque() {
        let out = ColorFilter::new(RED, BlendMode::Multiply).apply(Color::WHITE);
        assert_eq!(out, RED);
    }
}
