use std::fmt;

/// Opaque sRGB color with 8-bit channels.
///
/// Invariant:
/// - there is no alpha channel. Any source alpha has already been composited
///   against black by the parser (see [`Rgb::over_black`]).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Composites a straight-alpha color over a black backdrop.
    ///
    /// Each channel is multiplied by `alpha` (clamped to `[0, 1]`) and rounded.
    #[inline]
    pub fn over_black(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        let a = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
        let scale = |c: u8| (c as f64 * a).round() as u8;
        Self::new(scale(r), scale(g), scale(b))
    }

    /// Channels as `[0, 1]` floats.
    #[inline]
    pub fn to_unit(self) -> [f64; 3] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        ]
    }

    /// Lower-case `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `rgba(r, g, b, a)` with the alpha printed in its shortest form.
    pub fn to_rgba_css(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha.clamp(0.0, 1.0))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
