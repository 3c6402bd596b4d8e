//! Token extractors for free-text workout lines.
//!
//! Every function here is total: a missing token is reported as `None`, zero,
//! or a default, never as an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::workouts::types::DEFAULT_POWER;

const SECONDS_PER_MINUTE: u64 = 60;
const PERCENT: f64 = 100.0;

static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)(min|sec)").expect("valid duration regex"));
static POWER_FTP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)%\s*FTP").expect("valid power regex"));
static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)%").expect("valid percentage regex"));
static FROM_POWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)from\s+(\d+)").expect("valid ramp start regex"));
static TO_POWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)to\s+(\d+)%").expect("valid ramp end regex"));
static CADENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)rpm").expect("valid cadence regex"));
static REPEAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)x\s+").expect("valid repeat regex"));

fn first_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

// Digit runs too long for u64 saturate so callers can reject them by size.
fn count(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

/// Convert the first duration token (`3min`, `90sec`) to seconds.
///
/// Returns 0 when no duration is present.
pub fn parse_duration_to_seconds(text: &str) -> u64 {
    let Some(caps) = DURATION.captures(text) else {
        return 0;
    };
    let Some(value) = caps.get(1).map(|m| count(m.as_str())) else {
        return 0;
    };

    match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
        Some("min") => value.saturating_mul(SECONDS_PER_MINUTE),
        _ => value,
    }
}

/// First `<n>%` on the line as a fraction, if any.
pub fn find_power_fraction(text: &str) -> Option<f64> {
    first_number(&PERCENTAGE, text).map(|p| p as f64 / PERCENT)
}

/// First `<n>%` on the line as a fraction, or [`DEFAULT_POWER`].
pub fn parse_power_fraction(text: &str) -> f64 {
    find_power_fraction(text).unwrap_or(DEFAULT_POWER)
}

/// Whether the line names a power target (`<n>% FTP`).
pub fn has_ftp_power(text: &str) -> bool {
    POWER_FTP.is_match(text)
}

/// Cadence from `<n>rpm`. Zero is treated as absent.
pub fn parse_cadence(text: &str) -> Option<u32> {
    first_number(&CADENCE, text).filter(|rpm| *rpm > 0)
}

/// Ramp endpoints from `from <a>` and `to <b>%`, both required.
pub fn parse_ramp_bounds(text: &str) -> Option<(f64, f64)> {
    let from = first_number(&FROM_POWER, text)?;
    let to = first_number(&TO_POWER, text)?;
    Some((from as f64 / PERCENT, to as f64 / PERCENT))
}

/// Repeat count from `<n>x `.
pub fn parse_repeat(text: &str) -> Option<u64> {
    REPEAT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| count(m.as_str()))
}
