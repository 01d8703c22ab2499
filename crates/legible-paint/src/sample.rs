use crate::gradient::ColorStop;
use crate::rgb::Rgb;

/// Samples the color at `t` along a position-sorted stop list.
///
/// Semantics:
/// - empty list -> black
/// - single stop -> that stop, for any `t`
/// - `t` is clamped to `[0, 1]` (NaN samples at 0)
/// - before the first stop or after the last, the edge stop's color is used
/// - a zero-width span resolves to the later stop
pub fn sample_at(stops: &[ColorStop], t: f64) -> Rgb {
    match stops {
        [] => return Rgb::black(),
        [only] => return only.color,
        _ => {}
    }

    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    let Some(i) = stops.iter().position(|s| s.position >= t) else {
        return stops[stops.len() - 1].color;
    };
    if i == 0 {
        return stops[0].color;
    }

    let (a, b) = (stops[i - 1], stops[i]);
    let span = b.position - a.position;
    if span <= 0.0 {
        return b.color;
    }

    lerp_rgb(a.color, b.color, (t - a.position) / span)
}

/// Channel-wise linear interpolation, rounded half away from zero.
#[inline]
pub fn lerp_rgb(a: Rgb, b: Rgb, f: f64) -> Rgb {
    let mix = |x: u8, y: u8| {
        let (x, y) = (x as f64, y as f64);
        (x + (y - x) * f).round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}
