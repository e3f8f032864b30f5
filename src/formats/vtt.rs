use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitle_model::Cue;

use super::{capture_duration, split_blocks};

// @module: WebVTT (.vtt) parser

// @const: VTT timecode line regex (dot before the millisecond field)
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2})\.(\d{3})\s*-->\s*(\d{2}):(\d{2}):(\d{2})\.(\d{3})").unwrap()
});

/// Parse a WebVTT payload.
///
/// The leading `WEBVTT` header block is stripped. A cue block may open with
/// identifier lines; the first line containing `-->` is the timecode. Since
/// VTT identifiers are not guaranteed numeric, cue indices are assigned
/// sequentially starting at 1.
pub fn parse(content: &str) -> Vec<Cue> {
    let mut blocks = split_blocks(content);

    // Remove WEBVTT header block
    if blocks.first().is_some_and(|block| block[0].starts_with("WEBVTT")) {
        blocks.remove(0);
    }

    let mut cues = Vec::new();
    let mut index = 1;

    for block in blocks {
        if block.len() < 2 {
            continue;
        }

        // Skip cue identifier lines if present
        let Some(timecode_line) = block.iter().position(|line| line.contains("-->")) else {
            debug!("Skipping VTT block without a timecode line");
            continue;
        };

        let Some(caps) = TIMECODE_REGEX.captures(block[timecode_line]) else {
            debug!("Skipping VTT block with invalid timecode: {}", block[timecode_line]);
            continue;
        };
        let start_time = capture_duration(&caps, 1);
        let end_time = capture_duration(&caps, 5);
        if end_time < start_time {
            debug!("Skipping VTT block with end before start");
            continue;
        }

        let text = block[timecode_line + 1..].join("\n");
        cues.push(Cue::new(index, start_time, end_time, text));
        index += 1;
    }

    cues
}
