//! Controller configuration.

use legible_paint::{Contrast, Rgb};

/// Colors assigned when the gradient cannot drive an element: dynamic coloring
/// disabled, gradient missing or unparseable, or the element opted out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackColors {
    pub text: String,
    pub border: String,
    pub hover_border: String,
}

impl Default for FallbackColors {
    fn default() -> Self {
        Self {
            text: "#1f2933".to_string(),
            border: "#cbd2d9".to_string(),
            hover_border: "#9aa5b1".to_string(),
        }
    }
}

/// Fixed high-contrast colors for one text color choice.
///
/// Borders are keyed off the chosen text color rather than sampled from the
/// gradient, so text and border always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContrastPalette {
    pub text: String,
    pub border: String,
    pub hover_border: String,
    pub hover_text: String,
}

impl ContrastPalette {
    /// Palette derived from a foreground: solid text, translucent border,
    /// solid border on hover.
    pub fn for_foreground(fg: Rgb) -> Self {
        Self {
            text: fg.to_hex(),
            border: fg.to_rgba_css(0.6),
            hover_border: fg.to_hex(),
            hover_text: fg.to_hex(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Master switch. When false every element gets [`FallbackColors`].
    pub dynamic_enabled: bool,
    pub fallback: FallbackColors,
    /// Used where white text was chosen (dark background).
    pub light_palette: ContrastPalette,
    /// Used where black text was chosen (light background).
    pub dark_palette: ContrastPalette,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            dynamic_enabled: true,
            fallback: FallbackColors::default(),
            light_palette: ContrastPalette::for_foreground(Rgb::white()),
            dark_palette: ContrastPalette::for_foreground(Rgb::black()),
        }
    }
}

impl ControllerConfig {
    pub fn with_dynamic_enabled(mut self, enabled: bool) -> Self {
        self.dynamic_enabled = enabled;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackColors) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_palettes(mut self, light: ContrastPalette, dark: ContrastPalette) -> Self {
        self.light_palette = light;
        self.dark_palette = dark;
        self
    }

    #[inline]
    pub fn palette(&self, contrast: Contrast) -> &ContrastPalette {
        match contrast {
            Contrast::White => &self.light_palette,
            Contrast::Black => &self.dark_palette,
        }
    }
}
