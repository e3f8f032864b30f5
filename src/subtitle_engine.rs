use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, info};
use parking_lot::RwLock;

use crate::errors::SubtitleError;
use crate::fetchers::SubtitleFetcher;
use crate::formats;
use crate::subtitle_model::{Cue, SubtitleProtocol, Track, TrackDescriptor};
use crate::track_store::TrackStore;

// @module: Subtitle loading and cue resolution

/// Orchestrates subtitle loading: protocol gate, fetch, format dispatch, and
/// wholesale replacement of the active track.
///
/// Loads are tagged with a monotonic generation so that a slow load
/// superseded by a newer `load` or a `clear` never clobbers current state;
/// the stale result is parsed and then discarded. Callers serialize mutating
/// calls; queries take owned clones so no reference into the store escapes.
#[derive(Debug)]
pub struct SubtitleEngine<F: SubtitleFetcher> {
    /// Fetch capability resolving URLs to raw payload text
    fetcher: F,
    /// Owner of the active track
    store: RwLock<TrackStore>,
    /// Monotonic load generation, bumped by load and clear
    generation: AtomicU64,
}

impl<F: SubtitleFetcher> SubtitleEngine<F> {
    pub fn new(fetcher: F) -> Self {
        SubtitleEngine {
            fetcher,
            store: RwLock::new(TrackStore::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Load the track behind the descriptor, replacing the active one.
    ///
    /// Fails with `UnsupportedProtocol` for non-direct-text delivery, with
    /// `FetchFailed` when the fetch collaborator errors, and with
    /// `UnsupportedFormat` when the declared format has no parser.
    /// Malformed individual entries inside the payload are dropped by the
    /// parsers, never surfaced here.
    ///
    /// # Returns
    /// * `Result<usize, SubtitleError>` - Number of cues parsed
    pub async fn load(&self, descriptor: &TrackDescriptor) -> Result<usize, SubtitleError> {
        if descriptor.protocol != SubtitleProtocol::Http {
            return Err(SubtitleError::UnsupportedProtocol(descriptor.protocol));
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Loading {} subtitle from {}", descriptor.format, descriptor.url);

        let content = self.fetcher.fetch(&descriptor.url).await?;
        let cues = formats::parse(&content, descriptor.format)?;
        let count = cues.len();

        let mut store = self.store.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding superseded subtitle load for {}", descriptor.url);
            return Ok(count);
        }
        store.replace(Track::new(descriptor.clone(), cues));
        info!("Loaded {} cues from {}", count, descriptor.url);

        Ok(count)
    }

    /// The cue active at the position, or none if no track is loaded or no
    /// cue matches. Overlaps resolve to the first cue in parse order.
    pub fn cue_at(&self, position: Duration) -> Option<Cue> {
        self.store.read().cue_at(position).cloned()
    }

    /// Discard the active track. Idempotent; also cancels any in-flight
    /// load by bumping the generation.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.store.write().clear();
    }

    /// Whether a track is currently loaded.
    pub fn has_track(&self) -> bool {
        self.store.read().is_loaded()
    }

    /// Descriptor of the active track, if any.
    pub fn current_descriptor(&self) -> Option<TrackDescriptor> {
        self.store.read().current().map(|track| track.descriptor.clone())
    }

    /// Number of cues in the active track, zero when none is loaded.
    pub fn cue_count(&self) -> usize {
        self.store.read().current().map_or(0, |track| track.len())
    }
}
