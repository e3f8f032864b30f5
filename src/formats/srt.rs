use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitle_model::Cue;

use super::{capture_duration, split_blocks};

// @module: SubRip (.srt) parser

// @const: SRT timecode line regex
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2}),(\d{3})\s*-->\s*(\d{2}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

/// Parse an SRT payload.
///
/// A block needs at least three non-blank lines: index, timecode, and text.
/// Blocks failing the index parse or the timecode match are skipped; the
/// parsed index is kept as-is rather than renumbered.
pub fn parse(content: &str) -> Vec<Cue> {
    let mut cues = Vec::new();

    for block in split_blocks(content) {
        if block.len() < 3 {
            continue;
        }

        // Parse index
        let Ok(index) = block[0].trim().parse::<usize>() else {
            debug!("Skipping SRT block with non-numeric index: {}", block[0]);
            continue;
        };

        // Parse timecode (e.g., "00:00:01,000 --> 00:00:04,000")
        let Some(caps) = TIMECODE_REGEX.captures(block[1]) else {
            debug!("Skipping SRT block {} with invalid timecode: {}", index, block[1]);
            continue;
        };
        let start_time = capture_duration(&caps, 1);
        let end_time = capture_duration(&caps, 5);
        if end_time < start_time {
            debug!("Skipping SRT block {} with end before start", index);
            continue;
        }

        // Everything after the timecode is text
        let text = block[2..].join("\n");
        cues.push(Cue::new(index, start_time, end_time, text));
    }

    cues
}
