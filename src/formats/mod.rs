/*!
 * Format parsers for the supported subtitle dialects.
 *
 * Each dialect gets one pure parse function over the raw payload text:
 * - `srt`: SubRip blocks with comma-millisecond timecodes
 * - `vtt`: WebVTT with a header block and dot-millisecond timecodes
 * - `ssa`: SubStation Alpha / Advanced SubStation Alpha event sections
 *
 * Malformed individual entries are dropped, never fatal; a parse only fails
 * wholesale when the declared format has no parser at all.
 */

use std::time::Duration;
use regex::Captures;

use crate::errors::SubtitleError;
use crate::subtitle_model::{Cue, SubtitleFormat};
use crate::timecode;

pub mod srt;
pub mod ssa;
pub mod vtt;

/// Parse a raw subtitle payload in the declared format.
pub fn parse(content: &str, format: SubtitleFormat) -> Result<Vec<Cue>, SubtitleError> {
    match format {
        SubtitleFormat::Srt => Ok(srt::parse(content)),
        SubtitleFormat::Vtt => Ok(vtt::parse(content)),
        SubtitleFormat::Ssa | SubtitleFormat::Ass => Ok(ssa::parse(content)),
        other => Err(SubtitleError::UnsupportedFormat(other)),
    }
}

/// Split a payload into blocks of non-blank lines separated by blank lines,
/// tolerant of `\r\n` endings.
pub(crate) fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Read four consecutive capture groups as hours/minutes/seconds/millis.
pub(crate) fn capture_duration(caps: &Captures, start_idx: usize) -> Duration {
    let hours: u64 = caps
        .get(start_idx)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0));
    let minutes: u64 = caps
        .get(start_idx + 1)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0));
    let seconds: u64 = caps
        .get(start_idx + 2)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0));
    let millis: u64 = caps
        .get(start_idx + 3)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0));

    timecode::from_units(hours, minutes, seconds, millis)
}
