use std::fmt;

/// Why a CSS color literal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    /// Input was empty after trimming.
    Empty,
    /// Hex literal with a digit count other than 3, 4, 6 or 8.
    InvalidLength,
    /// Hex literal containing a non-hex character.
    InvalidHex,
    /// `rgb()` / `hsl()` family with malformed arguments.
    InvalidFunc,
    /// Neither a hex literal nor a supported color function.
    UnknownFormat,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ColorParseError::*;
        let msg = match self {
            Empty => "empty color string",
            InvalidLength => "invalid hex length",
            InvalidHex => "invalid hex digits",
            InvalidFunc => "invalid rgb()/hsl() function arguments",
            UnknownFormat => "unsupported color format",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ColorParseError {}

/// Why a `linear-gradient(...)` value produced no stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientParseError {
    /// No `linear-gradient(` in the value.
    MissingFunction,
    /// The argument list is never closed.
    Unbalanced,
    /// Every segment was a direction or had no parseable color.
    NoStops,
}

impl fmt::Display for GradientParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GradientParseError::*;
        let msg = match self {
            MissingFunction => "no linear-gradient() found",
            Unbalanced => "unbalanced parentheses in linear-gradient()",
            NoStops => "linear-gradient() has no parseable color stops",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for GradientParseError {}
