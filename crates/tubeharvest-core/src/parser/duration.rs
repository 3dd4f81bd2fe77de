//! Duration extractor for `contentDetails.duration`
//!
//! The API reports lengths as ISO-8601-like strings such as `PT1H5M30S`.
//! Only hours and minutes are used; seconds are dropped.

use regex::Regex;

const DURATION_PREFIX: &str = "PT";

/// Hours and minutes extracted from a duration string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoDuration {
    pub hours: u32,
    pub minutes: u32,
}

impl VideoDuration {
    /// `hours * 60 + minutes`
    pub fn total_minutes(&self) -> u32 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }
}

/// Parses a duration string into hours and minutes
///
/// # Returns
/// `None` when the string carries a day marker (day-scale videos and live
/// placeholders like `P0D` are rejected). Strings with neither an hour nor a
/// minute numeral parse as zero.
///
/// # Example
/// ```
/// use tubeharvest_core::parser::parse_duration;
/// assert_eq!(parse_duration("PT1H5M").map(|d| d.total_minutes()), Some(65));
/// assert_eq!(parse_duration("PT45M").map(|d| d.total_minutes()), Some(45));
/// assert_eq!(parse_duration("P1DT2H"), None);
/// ```
pub fn parse_duration(raw: &str) -> Option<VideoDuration> {
    let body = raw.trim();
    let body = body
        .strip_prefix(DURATION_PREFIX)
        .or_else(|| body.strip_prefix('P'))
        .unwrap_or(body);

    if body.contains('D') {
        return None;
    }

    let duration = match body.split_once('H') {
        Some((hours, rest)) => VideoDuration {
            hours: trailing_number(hours),
            minutes: capture_number(r"(\d+)M", rest),
        },
        None => VideoDuration {
            hours: 0,
            minutes: capture_number(r"(\d+)M", body),
        },
    };

    Some(duration)
}

/// Numeral immediately before the end of `text`, 0 if there is none
fn trailing_number(text: &str) -> u32 {
    capture_number(r"(\d+)$", text)
}

/// First capture group of `pattern` in `text` as a number, 0 if absent
///
/// Numerals too large for `u32` saturate to `u32::MAX`.
fn capture_number(pattern: &str, text: &str) -> u32 {
    let Ok(re) = Regex::new(pattern) else {
        return 0;
    };
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| saturating_number(m.as_str()))
        .unwrap_or(0)
}

fn saturating_number(digits: &str) -> u32 {
    match digits.parse() {
        Ok(n) => n,
        Err(_) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => u32::MAX,
        Err(_) => 0,
    }
}
