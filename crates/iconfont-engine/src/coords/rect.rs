use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Builds a rectangle from its edges.
    #[inline]
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect::new(left, top, right - left, bottom - top)
    }

    #[inline]
    pub fn left(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    /// Exact horizontal center, not rounded to a pixel.
    #[inline]
    pub fn center_x(self) -> f32 {
        self.origin.x + self.size.x * 0.5
    }

    #[inline]
    pub fn center_y(self) -> f32 {
        self.origin.y + self.size.y * 0.5
    }

    /// Point at a fractional offset inside the rectangle.
    ///
    /// `(0, 0)` is the top-left corner, `(1, 1)` the bottom-right one.
    #[inline]
    pub fn point_at(self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * fx, self.origin.y + self.size.y * fy)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── edges ─────────────────────────────────────────────────────────────

    #[test]
    fn edges_follow_origin_and_size() {
        let rect = r(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
    }

    #[test]
    fn from_ltrb_matches_new() {
        assert_eq!(Rect::from_ltrb(1.0, 2.0, 11.0, 22.0), r(1.0, 2.0, 10.0, 20.0));
    }

    // ── centers ───────────────────────────────────────────────────────────

    #[test]
    fn center_is_exact() {
        let rect = r(0.0, 0.0, 5.0, 7.0);
        assert_eq!(rect.center_x(), 2.5);
        assert_eq!(rect.center_y(), 3.5);
    }

    #[test]
    fn point_at_fraction() {
        let rect = r(10.0, 10.0, 100.0, 50.0);
        assert_eq!(rect.point_at(0.5, 0.5), Vec2::new(60.0, 35.0));
        assert_eq!(rect.point_at(1.0, 0.0), Vec2::new(110.0, 10.0));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, 0.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, -1.0).is_empty());
    }

    #[test]
    fn is_empty_positive_size() {
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
