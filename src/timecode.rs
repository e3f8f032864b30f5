use std::time::Duration;
use anyhow::{Result, anyhow, Context};

// @module: Shared timestamp utilities

/// Parse an `HH:MM:SS,mmm` timestamp to a duration.
///
/// Accepts `.` as well as `,` before the millisecond field, so both SRT and
/// VTT literals can be fed through (the CLI `--at` flag uses this too).
pub fn parse_timestamp(timestamp: &str) -> Result<Duration> {
    let parts: Vec<&str> = timestamp.split(&[':', ',', '.'][..]).collect();

    if parts.len() != 4 {
        return Err(anyhow!("Invalid timestamp format: {}", timestamp));
    }

    let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
    let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
    let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
    let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

    // Validate time components
    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
    }

    Ok(from_units(hours, minutes, seconds, millis))
}

/// Format a duration as an SRT-style `HH:MM:SS,mmm` timestamp.
pub fn format_timestamp(time: Duration) -> String {
    let ms = time.as_millis() as u64;
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Build a duration from broken-out clock units.
pub(crate) fn from_units(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Duration {
    Duration::from_millis((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
}
