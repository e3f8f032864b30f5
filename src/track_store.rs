use std::time::Duration;

use crate::subtitle_model::{Cue, Track};

// @module: Active-track storage and cue lookup

/// Owner of the currently active subtitle track.
///
/// At most one track is held at a time; replacing or clearing discards the
/// previous one wholesale. The store itself is single-owner — callers that
/// share it wrap it in whatever mutual exclusion they need (the engine uses
/// a read/write lock).
#[derive(Debug, Default)]
pub struct TrackStore {
    current: Option<Track>,
}

impl TrackStore {
    pub fn new() -> Self {
        TrackStore { current: None }
    }

    /// Replace the active track, discarding any previous one.
    pub fn replace(&mut self, track: Track) {
        self.current = Some(track);
    }

    /// Discard the active track. Idempotent.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The active track, if one is loaded.
    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// The cue active at the position, or none if no track is loaded or no
    /// cue's interval contains it. Ties between overlapping cues resolve to
    /// the first in parse order.
    pub fn cue_at(&self, position: Duration) -> Option<&Cue> {
        self.current.as_ref()?.cue_at(position)
    }
}
