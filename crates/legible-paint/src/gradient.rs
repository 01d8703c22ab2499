//! `linear-gradient(...)` parsing into positioned color stops.
//!
//! Only the stop list is extracted. The direction argument is recognized so it
//! can be skipped, but it is not interpreted: callers sample the gradient
//! along a single horizontal axis.

use crate::color::{parse_color, parse_number};
use crate::error::GradientParseError;
use crate::rgb::Rgb;

/// A single gradient stop.
///
/// `position` is in `[0, 1]`. Stop lists produced by this module are sorted by
/// position (stable, so equal positions keep source order).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub color: Rgb,
    pub position: f64,
}

impl ColorStop {
    #[inline]
    pub const fn new(color: Rgb, position: f64) -> Self {
        Self { color, position }
    }
}

/// Parses a CSS `linear-gradient(...)` value, returning `None` when it yields no stops.
#[inline]
pub fn parse_linear_gradient(css_value: &str) -> Option<Vec<ColorStop>> {
    try_parse_linear_gradient(css_value).ok()
}

/// Parses a CSS `linear-gradient(...)` value, reporting why it yielded no stops.
pub fn try_parse_linear_gradient(css_value: &str) -> Result<Vec<ColorStop>, GradientParseError> {
    // ASCII lowercasing keeps byte offsets intact.
    let lower = css_value.to_ascii_lowercase();
    let args = function_body(&lower)?;

    let mut segments = split_top_level(args);
    if segments.first().is_some_and(|s| is_direction(s)) {
        segments.remove(0);
    }

    let raw: Vec<(Rgb, Option<f64>)> = segments.iter().filter_map(|s| parse_stop(s)).collect();
    if raw.is_empty() {
        return Err(GradientParseError::NoStops);
    }

    let mut stops = resolve_positions(raw);
    // `sort_by` is stable.
    stops.sort_by(|a, b| a.position.total_cmp(&b.position));
    Ok(stops)
}

// ── tokenizing ────────────────────────────────────────────────────────────

/// Argument text of the first `linear-gradient(`, up to its matching `)`.
fn function_body(s: &str) -> Result<&str, GradientParseError> {
    const OPEN: &str = "linear-gradient(";

    let start = s.find(OPEN).ok_or(GradientParseError::MissingFunction)? + OPEN.len();
    let mut depth = 1usize;
    for (i, b) in s[start..].bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&s[start..start + i]);
                }
            }
            _ => {}
        }
    }
    Err(GradientParseError::Unbalanced)
}

/// Splits on commas that are not nested inside parentheses.
fn split_top_level(args: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, b) in args.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b',' if depth == 0 => {
                out.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(args[start..].trim());
    out
}

/// `to right`, `to top left`, `90deg`, `1.5rad`, `0.25turn`.
fn is_direction(segment: &str) -> bool {
    if segment.starts_with("to ") {
        return true;
    }
    ["deg", "rad", "turn"].iter().any(|unit| {
        segment
            .strip_suffix(unit)
            .is_some_and(|n| parse_number(n.trim_end()).is_some())
    })
}

// ── stops ─────────────────────────────────────────────────────────────────

/// Color and optional explicit position of one segment.
fn parse_stop(segment: &str) -> Option<(Rgb, Option<f64>)> {
    let (start, end) = find_color(segment)?;
    let color = parse_color(&segment[start..end])?;
    Some((color, trailing_percent(&segment[end..])))
}

/// Byte range of the first `rgb(..)`, `rgba(..)`, `hsl(..)`, `hsla(..)` or `#hex`.
fn find_color(segment: &str) -> Option<(usize, usize)> {
    const FUNCS: [&str; 4] = ["rgba(", "rgb(", "hsla(", "hsl("];

    for (i, ch) in segment.char_indices() {
        let rest = &segment[i..];
        if ch == '#' {
            let len = rest[1..].bytes().take_while(u8::is_ascii_hexdigit).count();
            return Some((i, i + 1 + len));
        }
        if FUNCS.iter().any(|f| rest.starts_with(f)) {
            let close = rest.find(')')?;
            return Some((i, i + close + 1));
        }
    }
    None
}

/// First whitespace-separated `N%` token, as a fraction in `[0, 1]`.
fn trailing_percent(rest: &str) -> Option<f64> {
    rest.split_whitespace()
        .filter_map(|tok| tok.strip_suffix('%'))
        .find_map(parse_number)
        .map(|p| (p / 100.0).clamp(0.0, 1.0))
}

/// Fills unresolved positions.
///
/// - runs between two resolved stops are spread evenly across the gap
/// - runs with a resolved stop on one side only take that stop's position
/// - with nothing resolved, stops are spread evenly over `[0, 1]`
fn resolve_positions(raw: Vec<(Rgb, Option<f64>)>) -> Vec<ColorStop> {
    let n = raw.len();
    let known: Vec<(usize, f64)> = raw
        .iter()
        .enumerate()
        .filter_map(|(i, (_, pos))| pos.map(|p| (i, p)))
        .collect();

    if known.is_empty() {
        let step = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };
        return raw
            .into_iter()
            .enumerate()
            .map(|(i, (color, _))| ColorStop::new(color, i as f64 * step))
            .collect();
    }

    raw.into_iter()
        .enumerate()
        .map(|(i, (color, pos))| {
            let position = pos.unwrap_or_else(|| {
                let prev = known.iter().rev().find(|(k, _)| *k < i).copied();
                let next = known.iter().find(|(k, _)| *k > i).copied();
                match (prev, next) {
                    (Some((p, a)), Some((q, b))) => a + (b - a) * (i - p) as f64 / (q - p) as f64,
                    (Some((_, a)), None) => a,
                    (None, Some((_, b))) => b,
                    // `known` is non-empty, so one side always exists.
                    (None, None) => 0.0,
                }
            });
            ColorStop::new(color, position)
        })
        .collect()
}
