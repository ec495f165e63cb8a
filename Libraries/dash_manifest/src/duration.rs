//! ISO-8601 style durations as they appear in MPD attributes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DurationError;

/// `PT[nH][nM]nS` or `P0DT[nH][nM]nS`; seconds may be fractional. Values are
/// read by `iso8601_duration`, this only narrows the accepted shapes.
static DURATION_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:0+D)?T(?:\d+H)?(?:\d+M)?\d+(?:\.\d+)?S$").expect("valid duration pattern")
});

/// The abbreviated segment-duration form, `[n]M<seconds>S`, e.g. `M10.000S`.
static ABBREVIATED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d*)M(\d+(?:\.\d+)?S)$").expect("valid segment duration pattern"));

/// Parses a presentation duration such as `PT1H2M10S` into seconds.
pub fn parse_duration(text: &str) -> Result<f64, DurationError> {
    let text = text.trim();
    let malformed = || DurationError::Malformed(text.to_string());
    if !DURATION_SHAPE.is_match(text) {
        return Err(malformed());
    }

    // the shape check already rules out years, months and non-zero days
    let seconds = iso8601_duration::Duration::parse(text)
        .map_err(|_| malformed())?
        .to_std()
        .ok_or_else(malformed)?
        .as_secs_f64();
    // f32 components underneath, millisecond precision is all a manifest carries
    Ok((seconds * 1000.0).round() / 1000.0)
}

/// Parses a segment duration attribute. An absent attribute falls back to
/// `fallback` (the manifest default); a present but malformed one is an error.
pub fn parse_segment_duration_seconds(text: Option<&str>, fallback: &str) -> Result<f64, DurationError> {
    let text = text.unwrap_or(fallback).trim();
    match ABBREVIATED.captures(text) {
        Some(caps) => {
            let minutes = match &caps[1] {
                "" => "0",
                digits => digits,
            };
            parse_duration(&format!("PT{}M{}", minutes, &caps[2]))
                .map_err(|_| DurationError::Malformed(text.to_string()))
        }
        None => parse_duration(text),
    }
}

/// Serializes seconds as `PT[nH][nM]nS`, leaving out zero hours and minutes.
/// Seconds carry at most millisecond precision.
pub fn format_duration(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let rest_ms = total_ms % 60_000;

    let mut out = String::from("PT");
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if rest_ms % 1000 == 0 {
        out.push_str(&format!("{}S", rest_ms / 1000));
    } else {
        out.push_str(&format!("{}.{:03}S", rest_ms / 1000, rest_ms % 1000));
    }
    out
}
