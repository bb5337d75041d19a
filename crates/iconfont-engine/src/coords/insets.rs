/// Integer insets on all four sides, in pixels.
///
/// Reported to layout as drawable padding.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    #[inline]
    pub const fn all(v: i32) -> Self {
        Self { left: v, top: v, right: v, bottom: v }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::all(0)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Self::zero()
    }
}
