/// Element bounding box in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Rectangle with only the horizontal extent known.
    #[inline]
    pub const fn horizontal(left: f32, width: f32, height: f32) -> Self {
        Self::new(left, 0.0, width, height)
    }

    /// Horizontal midpoint.
    #[inline]
    pub fn center_x(self) -> f32 {
        self.left + self.width / 2.0
    }

    /// True when the element has not been laid out yet (both extents zero).
    ///
    /// A zero-width but non-zero-height element is laid out and still colored.
    #[inline]
    pub fn is_unlaid(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        [self.left, self.top, self.width, self.height].iter().all(|v| v.is_finite())
    }
}
