use std::fmt;
use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::TransportError;

// @module: Media transport capability

/// Streaming protocol of a media source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamingProtocol {
    /// Direct video file URL
    #[default]
    Direct,
    /// HLS (.m3u8 manifest)
    Hls,
    /// MPEG-DASH
    Dash,
    /// Smooth Streaming
    SmoothStreaming,
}

impl fmt::Display for StreamingProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Direct => "direct",
            Self::Hls => "hls",
            Self::Dash => "dash",
            Self::SmoothStreaming => "smooth-streaming",
        };
        write!(f, "{}", name)
    }
}

/// The media a playback session is prepared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescriptor {
    /// Media source URL
    pub url: String,
    /// Streaming protocol of the source
    pub protocol: StreamingProtocol,
}

impl MediaDescriptor {
    pub fn new(url: impl Into<String>, protocol: StreamingProtocol) -> Self {
        MediaDescriptor {
            url: url.into(),
            protocol,
        }
    }

    /// Descriptor for a direct file URL.
    pub fn direct(url: impl Into<String>) -> Self {
        Self::new(url, StreamingProtocol::Direct)
    }
}

/// Unsolicited notifications from a transport.
///
/// These arrive on the channel handed to `VideoPlayer::new` and are
/// reconciled against caller intent; solicited completions (prepare
/// finishing, a play call returning) travel through the trait methods'
/// return values instead.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Playback reached the end of the media
    Completed,
    /// The transport failed asynchronously
    Error(String),
}

/// Capability to drive an underlying media session.
///
/// The transport is a reporter, not an owner: the player reconciles its
/// notifications against the canonical state it keeps itself.
#[async_trait]
pub trait MediaTransport: Send + Sync + Debug {
    /// Prepare a session for the given media.
    ///
    /// Resolves once the transport is ready to play, with the media
    /// duration.
    async fn prepare(&self, content: &MediaDescriptor) -> Result<Duration, TransportError>;

    /// Start or resume playback.
    async fn play(&self) -> Result<(), TransportError>;

    /// Pause playback.
    async fn pause(&self) -> Result<(), TransportError>;

    /// Stop playback.
    async fn stop(&self) -> Result<(), TransportError>;

    /// Seek to the given position.
    async fn seek(&self, position: Duration) -> Result<(), TransportError>;

    /// Set the playback volume. Input is already clamped to `[0.0, 1.0]`.
    async fn set_volume(&self, volume: f64) -> Result<(), TransportError>;

    /// Current playback position of the session clock.
    async fn position(&self) -> Duration;
}
