//! Color math for **legible**: CSS color and `linear-gradient(...)` parsing,
//! gradient sampling, and WCAG luminance.
//!
//! This crate is intentionally dependency-free so the color pipeline can be
//! tested and reused without the controller, its trigger plumbing, or a
//! logging backend.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`rgb`] | `Rgb` opaque 8-bit color, CSS formatting |
//! | [`color`] | `parse_color` for hex, `rgb()`/`rgba()`, `hsl()`/`hsla()` |
//! | [`gradient`] | `ColorStop`, `parse_linear_gradient` |
//! | [`sample`] | `sample_at` interpolation along a stop list |
//! | [`luminance`] | `relative_luminance`, `contrasting_text_color` |
//! | [`error`] | `ColorParseError`, `GradientParseError` |
//!
//! # Quick start
//!
//! ```rust
//! use legible_paint::{contrasting_text_color, parse_linear_gradient, sample_at, Contrast, Rgb};
//!
//! let css = "linear-gradient(to right, #ff0000 0%, #0000ff 100%)";
//! let stops = parse_linear_gradient(css).unwrap();
//! let bg = sample_at(&stops, 0.5);
//! assert_eq!(bg, Rgb::new(128, 0, 128));
//! assert_eq!(contrasting_text_color(bg), Contrast::White);
//! ```

pub mod color;
pub mod error;
pub mod gradient;
pub mod luminance;
pub mod rgb;
pub mod sample;

pub use color::{parse_color, try_parse_color};
pub use error::{ColorParseError, GradientParseError};
pub use gradient::{parse_linear_gradient, try_parse_linear_gradient, ColorStop};
pub use luminance::{
    contrast_for_luminance, contrast_ratio, contrasting_text_color, relative_luminance, Contrast,
    WHITE_TEXT_MAX_LUMINANCE,
};
pub use rgb::Rgb;
pub use sample::{lerp_rgb, sample_at};

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    fn text_at(css: &str, t: f64) -> Option<Contrast> {
        parse_linear_gradient(css).map(|stops| contrasting_text_color(sample_at(&stops, t)))
    }

    #[test] fn dark_left_light_right() {
        let css = "linear-gradient(to right, #000 0%, #fff 100%)";
        assert_eq!(text_at(css, 0.0), Some(Contrast::White));
        assert_eq!(text_at(css, 1.0), Some(Contrast::Black));
    }
    #[test] fn translucent_stops_darken() {
        // Every stop composites over black, so a washed-out white reads as grey.
        let css = "linear-gradient(90deg, rgba(255, 255, 255, 0.3), rgba(255, 255, 255, 0.4))";
        assert_eq!(text_at(css, 0.5), Some(Contrast::White));
    }
    #[test] fn hsl_stops() {
        let css = "linear-gradient(to right, hsl(60, 100%, 50%), hsl(240, 100%, 25%))";
        assert_eq!(text_at(css, 0.0), Some(Contrast::Black));
        assert_eq!(text_at(css, 1.0), Some(Contrast::White));
    }
    #[test] fn unparseable_gradient() { assert_eq!(text_at("url(x.png)", 0.5), None); }
    #[test] fn single_stop_gradient() {
        assert_eq!(text_at("linear-gradient(#ffffff)", 0.9), Some(Contrast::Black));
    }
}
