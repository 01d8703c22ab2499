/// Viewport width in logical pixels.
///
/// The gradient background spans the full width, so horizontal positions are
/// normalized against it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32) -> Self {
        Self { width }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.width.is_finite()
    }

    /// `x / width`, clamped to `[0, 1]`.
    ///
    /// An invalid viewport or non-finite `x` maps to 0.
    #[inline]
    pub fn ratio(self, x: f32) -> f64 {
        if !self.is_valid() || !x.is_finite() {
            return 0.0;
        }
        (x as f64 / self.width as f64).clamp(0.0, 1.0)
    }
}
