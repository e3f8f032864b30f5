use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitle_model::{Cue, CueStyle};
use crate::timecode;

// @module: SubStation Alpha (.ssa/.ass) parser

// @const: SSA timestamp regex (H:MM:SS.cc, centiseconds)
static TIMESTAMP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+):(\d{2}):(\d{2})\.(\d{2})").unwrap());

// @const: Override block regex ({\b1} and friends)
static OVERRIDE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]*\}").unwrap());

const DIALOGUE_FIELD_COUNT: usize = 10;

/// Parse an SSA/ASS payload.
///
/// Only `Dialogue:` lines inside an `[Events]` section are candidates. The
/// line remainder is split into at most 10 comma-separated fields, the last
/// of which absorbs embedded commas since SSA text is always the final
/// field. Styles defined in a `[V4 Styles]`/`[V4+ Styles]` section are
/// attached to cues by name.
pub fn parse(content: &str) -> Vec<Cue> {
    let styles = parse_styles(content);

    let mut cues = Vec::new();
    let mut in_events = false;
    let mut index = 1;

    for line in content.lines().map(|line| line.trim_end_matches('\r')) {
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with("[Events]") {
            in_events = true;
            continue;
        }
        if line.starts_with('[') && in_events {
            in_events = false;
            continue;
        }
        if !in_events {
            continue;
        }
        let Some(rest) = line.strip_prefix("Dialogue:") else {
            continue;
        };

        // Format: Layer,Start,End,Style,Name,MarginL,MarginR,MarginV,Effect,Text
        let fields: Vec<&str> = rest.splitn(DIALOGUE_FIELD_COUNT, ',').collect();
        if fields.len() < DIALOGUE_FIELD_COUNT {
            debug!("Skipping dialogue line with {} fields", fields.len());
            continue;
        }

        let Some(start_time) = parse_ssa_time(fields[1].trim()) else {
            debug!("Skipping dialogue line with invalid start time: {}", fields[1]);
            continue;
        };
        let Some(end_time) = parse_ssa_time(fields[2].trim()) else {
            debug!("Skipping dialogue line with invalid end time: {}", fields[2]);
            continue;
        };
        if end_time < start_time {
            debug!("Skipping dialogue line with end before start");
            continue;
        }

        let text = clean_dialogue_text(fields[9].trim());
        let style = styles.get(fields[3].trim()).cloned();

        cues.push(Cue::new(index, start_time, end_time, text).with_style(style));
        index += 1;
    }

    cues
}

/// Parse an SSA time literal (`H:MM:SS.cc`, centiseconds).
fn parse_ssa_time(time: &str) -> Option<Duration> {
    let caps = TIMESTAMP_REGEX.captures(time)?;

    let hours: u64 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: u64 = caps.get(2)?.as_str().parse().ok()?;
    let seconds: u64 = caps.get(3)?.as_str().parse().ok()?;
    let centis: u64 = caps.get(4)?.as_str().parse().ok()?;

    Some(timecode::from_units(hours, minutes, seconds, centis * 10))
}

/// Strip override blocks and expand `\N`/`\n` escapes.
fn clean_dialogue_text(text: &str) -> String {
    OVERRIDE_REGEX
        .replace_all(text, "")
        .replace("\\N", "\n")
        .replace("\\n", "\n")
}

/// Collect named styles from `[V4 Styles]`/`[V4+ Styles]` sections.
///
/// The `Format:` line establishes field order for the `Style:` lines that
/// follow. Malformed style lines are skipped like malformed dialogue lines.
fn parse_styles(content: &str) -> HashMap<String, CueStyle> {
    let mut styles = HashMap::new();
    let mut in_styles = false;
    let mut field_order: Vec<String> = Vec::new();

    for line in content.lines().map(|line| line.trim_end_matches('\r')) {
        if line.starts_with("[V4") && line.contains("Styles]") {
            in_styles = true;
            field_order.clear();
            continue;
        }
        if line.starts_with('[') {
            in_styles = false;
            continue;
        }
        if !in_styles {
            continue;
        }

        if let Some(rest) = line.strip_prefix("Format:") {
            field_order = rest.split(',').map(|field| field.trim().to_string()).collect();
            continue;
        }
        let Some(rest) = line.strip_prefix("Style:") else {
            continue;
        };
        if field_order.is_empty() {
            debug!("Skipping style line before a Format: line");
            continue;
        }

        let values: Vec<&str> = rest.splitn(field_order.len(), ',').collect();
        let mut name = None;
        let mut style = CueStyle::default();

        for (field, value) in field_order.iter().zip(values) {
            let value = value.trim();
            match field.as_str() {
                "Name" => name = Some(value.to_string()),
                "Fontname" => style.font_name = Some(value.to_string()),
                "Fontsize" => style.font_size = value.parse().ok(),
                "PrimaryColour" => style.primary_color = Some(value.to_string()),
                "OutlineColour" => style.outline_color = Some(value.to_string()),
                "BackColour" => style.background_color = Some(value.to_string()),
                "Bold" => style.bold = value.parse::<i32>().map(|v| v != 0).unwrap_or(false),
                "Italic" => style.italic = value.parse::<i32>().map(|v| v != 0).unwrap_or(false),
                "Alignment" => {
                    // Legacy V4 alignments outside the numpad range fall
                    // back to the default
                    if let Ok(alignment) = value.parse::<u8>() {
                        if (1..=9).contains(&alignment) {
                            style.alignment = alignment;
                        }
                    }
                }
                _ => {}
            }
        }

        match name {
            Some(name) if !name.is_empty() => {
                styles.insert(name, style);
            }
            _ => debug!("Skipping style line without a name"),
        }
    }

    styles
}
