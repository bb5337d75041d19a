/// Color with premultiplied alpha: `r`, `g` and `b` never exceed `a`.
///
/// Glyph coverage, gradients and the Porter-Duff tint modes all blend in
/// this space; conversion to straight alpha happens only at the image edge.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_premul(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);

    /// Packed `0xAARRGGBB`, the layout of `#AARRGGBB` resource literals.
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_srgb_u8(r, g, b, a)
    }

    /// Straight 8-bit channels.
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let unit = |v: u8| f32::from(v) / 255.0;
        Self::from_straight(unit(r), unit(g), unit(b), unit(a))
    }

    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Straight-alpha channels in `[0, 1]`; out-of-range input is clamped.
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        let mul = |v: f32| v.clamp(0.0, 1.0) * a;
        Self { r: mul(r), g: mul(g), b: mul(b), a }
    }

    /// Undoes premultiplication. Fully transparent colors come back as zeros.
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            return (0.0, 0.0, 0.0, 0.0);
        }
        (self.r / self.a, self.g / self.a, self.b / self.a, self.a)
    }

    /// Straight-alpha RGBA bytes, as stored by 8-bit image buffers.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let (r, g, b, a) = self.clamped().to_straight();
        let q = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [q(r), q(g), q(b), q(a)]
    }

    /// Scales all channels by `factor`, i.e. multiplies opacity.
    #[inline]
    pub fn scale_alpha(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self { r: self.r * f, g: self.g * f, b: self.b * f, a: self.a * f }
    }

    /// Component-wise interpolation in premultiplied space.
    #[inline]
    pub fn lerp(self, to: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }

    pub fn is_finite(self) -> bool {
        [self.r, self.g, self.b, self.a].iter().all(|c| c.is_finite())
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// Brings alpha into `[0, 1]` and each color channel into `[0, a]`.
    pub fn clamped(self) -> Self {
        let a = self.a.clamp(0.0, 1.0);
        let fit = |v: f32| v.clamp(0.0, a);
        Self { r: fit(self.r), g: fit(self.g), b: fit(self.b), a }
    }
}
