//! WCAG relative luminance and foreground selection.

use crate::rgb::Rgb;

/// Luminance at or below which white text is chosen.
///
/// Deliberately above the symmetric 0.5 so mid-tone backgrounds get white text.
pub const WHITE_TEXT_MAX_LUMINANCE: f64 = 0.55;

/// Legible foreground for a background color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Contrast {
    White,
    Black,
}

impl Contrast {
    #[inline]
    pub const fn rgb(self) -> Rgb {
        match self {
            Contrast::White => Rgb::white(),
            Contrast::Black => Rgb::black(),
        }
    }
}

/// WCAG 2.x relative luminance in `[0, 1]`.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let [r, g, b] = rgb.to_unit().map(linearize);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

#[inline]
fn linearize(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// White for luminance <= [`WHITE_TEXT_MAX_LUMINANCE`], black above.
#[inline]
pub fn contrast_for_luminance(luminance: f64) -> Contrast {
    if luminance <= WHITE_TEXT_MAX_LUMINANCE {
        Contrast::White
    } else {
        Contrast::Black
    }
}

/// Foreground that stays legible on `background`.
#[inline]
pub fn contrasting_text_color(background: Rgb) -> Contrast {
    contrast_for_luminance(relative_luminance(background))
}

/// WCAG contrast ratio, lighter over darker, in `[1, 21]`.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let (la, lb) = (relative_luminance(a), relative_luminance(b));
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}
