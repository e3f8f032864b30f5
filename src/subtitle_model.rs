use std::fmt;
use std::time::Duration;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::timecode;

// @module: Normalized subtitle data model

/// Single timed subtitle entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: Sequence number (not guaranteed contiguous for malformed input)
    pub index: usize,

    // @field: Start of the display interval
    pub start_time: Duration,

    // @field: End of the display interval, never before start_time
    pub end_time: Duration,

    // @field: Cue text, possibly multi-line
    pub text: String,

    // @field: Styling carried by SSA/ASS tracks
    pub style: Option<CueStyle>,
}

impl Cue {
    /// Create a new cue without styling.
    pub fn new(index: usize, start_time: Duration, end_time: Duration, text: String) -> Self {
        Cue {
            index,
            start_time,
            end_time,
            text,
            style: None,
        }
    }

    /// Attach styling information to the cue.
    pub fn with_style(mut self, style: Option<CueStyle>) -> Self {
        self.style = style;
        self
    }

    /// Whether the position falls inside the cue's inclusive display interval.
    pub fn contains(&self, position: Duration) -> bool {
        self.start_time <= position && position <= self.end_time
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(
            f,
            "{} --> {}",
            timecode::format_timestamp(self.start_time),
            timecode::format_timestamp(self.end_time)
        )?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Styling information for a cue, populated from SSA/ASS style sections.
///
/// Colors are kept as the raw strings found in the payload (`&HAABBGGRR`
/// style values included) so callers can decide how to interpret them.
#[derive(Debug, Clone, PartialEq)]
pub struct CueStyle {
    /// Font name
    pub font_name: Option<String>,

    /// Font size in points
    pub font_size: Option<u32>,

    /// Primary fill color
    pub primary_color: Option<String>,

    /// Outline color
    pub outline_color: Option<String>,

    /// Background/shadow color
    pub background_color: Option<String>,

    /// Bold flag
    pub bold: bool,

    /// Italic flag
    pub italic: bool,

    /// Numpad-style alignment, 1-9
    pub alignment: u8,
}

impl Default for CueStyle {
    fn default() -> Self {
        CueStyle {
            font_name: None,
            font_size: None,
            primary_color: None,
            outline_color: None,
            background_color: None,
            bold: false,
            italic: false,
            alignment: 2,
        }
    }
}

/// Subtitle markup dialect of a payload.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    /// SubRip (.srt)
    #[default]
    Srt,
    /// WebVTT (.vtt)
    Vtt,
    /// SubStation Alpha (.ssa)
    Ssa,
    /// Advanced SubStation Alpha (.ass)
    Ass,
    /// TTML (recognized but not parseable by this engine)
    Ttml,
}

impl SubtitleFormat {
    // @returns: Canonical uppercase tag
    pub fn display_name(&self) -> &str {
        match self {
            Self::Srt => "SRT",
            Self::Vtt => "VTT",
            Self::Ssa => "SSA",
            Self::Ass => "ASS",
            Self::Ttml => "TTML",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for SubtitleFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "srt" => Ok(Self::Srt),
            "vtt" => Ok(Self::Vtt),
            "ssa" => Ok(Self::Ssa),
            "ass" => Ok(Self::Ass),
            "ttml" => Ok(Self::Ttml),
            _ => Err(anyhow!("Invalid subtitle format: {}", s)),
        }
    }
}

/// How the subtitle text is delivered to the engine.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleProtocol {
    /// Direct text download over HTTP(S)
    #[default]
    Http,
    /// Embedded in the video stream
    Embedded,
    /// HLS embedded subtitles
    Hls,
}

impl fmt::Display for SubtitleProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Http => "http",
            Self::Embedded => "embedded",
            Self::Hls => "hls",
        };
        write!(f, "{}", name)
    }
}

/// Where a subtitle track comes from and how to interpret it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrackDescriptor {
    /// Track identifier
    pub id: String,

    /// ISO language code (e.g. "en", "es")
    pub language: String,

    /// Display label
    pub label: String,

    /// Source URL of the subtitle text
    pub url: String,

    /// Markup dialect
    pub format: SubtitleFormat,

    /// Delivery protocol
    pub protocol: SubtitleProtocol,
}

impl TrackDescriptor {
    /// Descriptor for a direct-text track, the only loadable protocol.
    pub fn direct(id: impl Into<String>, url: impl Into<String>, format: SubtitleFormat) -> Self {
        TrackDescriptor {
            id: id.into(),
            language: String::new(),
            label: String::new(),
            url: url.into(),
            format,
            protocol: SubtitleProtocol::Http,
        }
    }
}

/// A fully parsed subtitle track. Immutable once built; reloading a track
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// The descriptor the track was loaded from
    pub descriptor: TrackDescriptor,

    /// Cues in parse order
    pub cues: Vec<Cue>,
}

impl Track {
    pub fn new(descriptor: TrackDescriptor, cues: Vec<Cue>) -> Self {
        Track { descriptor, cues }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// First cue in parse order whose interval contains the position.
    ///
    /// Overlapping cues are a data-quality issue, not an error; the
    /// first-match rule keeps resolution deterministic.
    pub fn cue_at(&self, position: Duration) -> Option<&Cue> {
        self.cues.iter().find(|cue| cue.contains(position))
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Track")?;
        writeln!(f, "Source: {}", self.descriptor.url)?;
        writeln!(f, "Format: {}", self.descriptor.format)?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}
