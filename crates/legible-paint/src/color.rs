//! CSS color literal parsing.
//!
//! Supported forms:
//! - `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - `rgb(r, g, b)`, `rgba(r, g, b, a)`
//! - `hsl(h, s%, l%)`, `hsla(h, s%, l%, a)`
//!
//! Every result is opaque: alpha is composited against black.

use crate::error::ColorParseError;
use crate::rgb::Rgb;

/// Parses a CSS color literal, returning `None` for anything unsupported.
#[inline]
pub fn parse_color(input: &str) -> Option<Rgb> {
    try_parse_color(input).ok()
}

/// Parses a CSS color literal, reporting why it was rejected.
pub fn try_parse_color(input: &str) -> Result<Rgb, ColorParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(args) = function_args(&lower, "rgba").or_else(|| function_args(&lower, "rgb")) {
        return parse_rgb_args(args);
    }
    if let Some(args) = function_args(&lower, "hsla").or_else(|| function_args(&lower, "hsl")) {
        return parse_hsl_args(args);
    }

    Err(ColorParseError::UnknownFormat)
}

/// Returns the text between `name(` and the final `)`.
fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

// ── hex ───────────────────────────────────────────────────────────────────

fn parse_hex(hex: &str) -> Result<Rgb, ColorParseError> {
    use ColorParseError::*;

    let nibble = |c: u8| -> Result<u8, ColorParseError> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(InvalidHex),
        }
    };
    let byte = |hi: u8, lo: u8| -> Result<u8, ColorParseError> {
        Ok(nibble(hi)? << 4 | nibble(lo)?)
    };

    let bytes = hex.as_bytes();
    let (r, g, b, a) = match bytes.len() {
        // #rgb / #rgba: each digit doubled, 0xf -> 0xff
        3 => (nibble(bytes[0])? * 17, nibble(bytes[1])? * 17, nibble(bytes[2])? * 17, 255),
        4 => (
            nibble(bytes[0])? * 17,
            nibble(bytes[1])? * 17,
            nibble(bytes[2])? * 17,
            nibble(bytes[3])? * 17,
        ),
        6 => (byte(bytes[0], bytes[1])?, byte(bytes[2], bytes[3])?, byte(bytes[4], bytes[5])?, 255),
        8 => (
            byte(bytes[0], bytes[1])?,
            byte(bytes[2], bytes[3])?,
            byte(bytes[4], bytes[5])?,
            byte(bytes[6], bytes[7])?,
        ),
        _ => return Err(InvalidLength),
    };

    if a == 255 {
        Ok(Rgb::new(r, g, b))
    } else {
        Ok(Rgb::over_black(r, g, b, a as f64 / 255.0))
    }
}

// ── functions ─────────────────────────────────────────────────────────────

/// Plain decimal number: optional sign, digits, at most one `.`.
///
/// `str::parse::<f64>` alone would also accept `inf`, `NaN` and exponents.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    let valid = !digits.is_empty()
        && digits.bytes().any(|b| b.is_ascii_digit())
        && digits.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    if !valid {
        return None;
    }
    let v: f64 = digits.parse().ok()?;
    Some(if s.starts_with('-') { -v } else { v })
}

/// Splits whitespace-stripped arguments into 3 or 4 components.
fn split_components(args: &str) -> Result<Vec<String>, ColorParseError> {
    let compact: String = args.chars().filter(|c| !c.is_whitespace()).collect();
    let parts: Vec<String> = compact.split(',').map(str::to_owned).collect();
    if parts.len() == 3 || parts.len() == 4 {
        Ok(parts)
    } else {
        Err(ColorParseError::InvalidFunc)
    }
}

fn parse_alpha(parts: &[String]) -> Result<f64, ColorParseError> {
    match parts.get(3) {
        None => Ok(1.0),
        Some(a) => parse_number(a)
            .map(|v| v.clamp(0.0, 1.0))
            .ok_or(ColorParseError::InvalidFunc),
    }
}

fn parse_rgb_args(args: &str) -> Result<Rgb, ColorParseError> {
    let parts = split_components(args)?;

    let channel = |s: &str| -> Result<u8, ColorParseError> {
        parse_number(s)
            .map(|v| v.round().clamp(0.0, 255.0) as u8)
            .ok_or(ColorParseError::InvalidFunc)
    };

    let r = channel(&parts[0])?;
    let g = channel(&parts[1])?;
    let b = channel(&parts[2])?;
    let a = parse_alpha(&parts)?;

    Ok(Rgb::over_black(r, g, b, a))
}

fn parse_hsl_args(args: &str) -> Result<Rgb, ColorParseError> {
    let parts = split_components(args)?;

    let hue = parse_number(parts[0].strip_suffix("deg").unwrap_or(&parts[0]))
        .ok_or(ColorParseError::InvalidFunc)?;
    let percent = |s: &str| -> Result<f64, ColorParseError> {
        parse_number(s.strip_suffix('%').unwrap_or(s))
            .map(|v| v.clamp(0.0, 100.0) / 100.0)
            .ok_or(ColorParseError::InvalidFunc)
    };
    let s = percent(&parts[1])?;
    let l = percent(&parts[2])?;
    let a = parse_alpha(&parts)?;

    let (r, g, b) = hsl_to_rgb(hue, s, l);
    Ok(Rgb::over_black(r, g, b, a))
}

/// `hue` in degrees (any value, wrapped); `s` and `l` in `[0, 1]`.
pub(crate) fn hsl_to_rgb(hue: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0) / 360.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    let to_byte = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
