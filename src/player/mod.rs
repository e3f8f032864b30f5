/*!
 * Playback state machine.
 *
 * `VideoPlayer` sequences lifecycle intents (prepare, play, pause, stop,
 * seek) against a `MediaTransport` and keeps the canonical player state
 * consistent under asynchronous transport notifications. State and position
 * changes are broadcast to any number of observers; emission never blocks
 * on a slow observer.
 */

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::app_config::PlayerConfig;
use crate::errors::PlayerError;

pub mod mock;
pub mod transport;

pub use transport::{MediaDescriptor, MediaTransport, StreamingProtocol, TransportEvent};

/// Lifecycle state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Nothing prepared yet
    Idle,
    /// A prepare is in flight
    Preparing,
    /// Prepared and ready to play
    Ready,
    /// Actively playing
    Playing,
    /// Paused mid-playback
    Paused,
    /// Stopped; position reset to zero
    Stopped,
    /// The transport failed; exited by a fresh prepare
    Error,
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// Notifications broadcast to player observers.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The canonical state changed (deduplicated; old == new never emits)
    StateChanged(PlayerState),
    /// The playback position changed
    PositionChanged(Duration),
    /// The transport reported an error
    ErrorOccurred(String),
}

// @struct: Mutable player state behind the lock
#[derive(Debug)]
struct PlayerInner {
    state: PlayerState,
    position: Duration,
    duration: Duration,
    volume: f64,
    // Monotonic prepare generation; stale completions are discarded
    generation: u64,
    position_poller: Option<JoinHandle<()>>,
}

// @struct: State shared between the player, the reconciler, and the poller
#[derive(Debug)]
struct PlayerShared {
    inner: Mutex<PlayerInner>,
    events: broadcast::Sender<PlayerEvent>,
}

impl PlayerShared {
    /// Install a new canonical state, emitting exactly once per change.
    fn set_state(&self, new_state: PlayerState) {
        let stale_poller = {
            let mut inner = self.inner.lock();
            if inner.state == new_state {
                return;
            }
            let leaving_playing = inner.state == PlayerState::Playing;
            inner.state = new_state;
            if leaving_playing {
                inner.position_poller.take()
            } else {
                None
            }
        };
        // Position polling stops the instant state leaves Playing
        if let Some(poller) = stale_poller {
            poller.abort();
        }

        debug!("Player state changed to {}", new_state);
        let _ = self.events.send(PlayerEvent::StateChanged(new_state));
    }

    fn set_position(&self, position: Duration) {
        {
            let mut inner = self.inner.lock();
            if inner.position == position {
                return;
            }
            inner.position = position;
        }
        let _ = self.events.send(PlayerEvent::PositionChanged(position));
    }

    fn emit_error(&self, message: String) {
        error!("Playback error: {}", message);
        let _ = self.events.send(PlayerEvent::ErrorOccurred(message));
    }
}

/// Playback state machine over a media transport.
///
/// Operations must be serialized by the caller (one logical owner per
/// player); observers subscribe through [`VideoPlayer::subscribe`] and
/// receive events in emission order.
#[derive(Debug)]
pub struct VideoPlayer<T: MediaTransport + 'static> {
    transport: Arc<T>,
    shared: Arc<PlayerShared>,
    poll_interval: Duration,
    reconciler: JoinHandle<()>,
}

impl<T: MediaTransport + 'static> VideoPlayer<T> {
    /// Create a player over the transport and its notification channel.
    pub fn new(
        transport: Arc<T>,
        transport_events: mpsc::UnboundedReceiver<TransportEvent>,
        config: &PlayerConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer);
        let shared = Arc::new(PlayerShared {
            inner: Mutex::new(PlayerInner {
                state: PlayerState::Idle,
                position: Duration::ZERO,
                duration: Duration::ZERO,
                volume: 1.0,
                generation: 0,
                position_poller: None,
            }),
            events,
        });
        let reconciler = Self::spawn_reconciler(Arc::clone(&shared), transport_events);

        VideoPlayer {
            transport,
            shared,
            poll_interval: Duration::from_millis(config.position_poll_interval_ms),
            reconciler,
        }
    }

    /// Subscribe to state/position/error notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.shared.events.subscribe()
    }

    pub fn state(&self) -> PlayerState {
        self.shared.inner.lock().state
    }

    pub fn position(&self) -> Duration {
        self.shared.inner.lock().position
    }

    /// Media duration, zero until a prepare completed.
    pub fn duration(&self) -> Duration {
        self.shared.inner.lock().duration
    }

    pub fn volume(&self) -> f64 {
        self.shared.inner.lock().volume
    }

    /// Prepare a playback session for the given media.
    ///
    /// Legal from `Idle`, `Stopped`, and `Error`. The attempt is tagged
    /// with a monotonic generation; if a `stop` or a later `prepare`
    /// supersedes it before the transport reports ready, the stale
    /// completion is discarded without touching state.
    pub async fn prepare(&self, content: &MediaDescriptor) -> Result<(), PlayerError> {
        let generation = {
            let mut inner = self.shared.inner.lock();
            match inner.state {
                PlayerState::Idle | PlayerState::Stopped | PlayerState::Error => {}
                state => return Err(PlayerError::InvalidOperation { action: "prepare", state }),
            }
            inner.generation += 1;
            inner.generation
        };
        self.shared.set_state(PlayerState::Preparing);
        debug!("Preparing media session for {}", content.url);

        match self.transport.prepare(content).await {
            Ok(duration) => {
                {
                    let mut inner = self.shared.inner.lock();
                    if inner.generation != generation || inner.state != PlayerState::Preparing {
                        debug!("Discarding superseded prepare completion for {}", content.url);
                        return Ok(());
                    }
                    inner.duration = duration;
                }
                self.shared.set_state(PlayerState::Ready);
                Ok(())
            }
            Err(e) => {
                let still_current = {
                    let inner = self.shared.inner.lock();
                    inner.generation == generation && inner.state == PlayerState::Preparing
                };
                if still_current {
                    self.shared.set_state(PlayerState::Error);
                    self.shared.emit_error(e.to_string());
                }
                Err(PlayerError::TransportFailure(e))
            }
        }
    }

    /// Start or resume playback. Legal from `Ready`, `Paused`, `Stopped`.
    pub async fn play(&self) -> Result<(), PlayerError> {
        self.ensure_state(
            "play",
            &[PlayerState::Ready, PlayerState::Paused, PlayerState::Stopped],
        )?;

        match self.transport.play().await {
            Ok(()) => {
                self.shared.set_state(PlayerState::Playing);
                self.spawn_position_poller();
                Ok(())
            }
            Err(e) => {
                self.shared.set_state(PlayerState::Error);
                self.shared.emit_error(e.to_string());
                Err(PlayerError::TransportFailure(e))
            }
        }
    }

    /// Pause playback. Legal from `Playing`.
    pub async fn pause(&self) -> Result<(), PlayerError> {
        self.ensure_state("pause", &[PlayerState::Playing])?;

        match self.transport.pause().await {
            Ok(()) => {
                self.shared.set_state(PlayerState::Paused);
                Ok(())
            }
            Err(e) => {
                self.shared.emit_error(e.to_string());
                Err(PlayerError::TransportFailure(e))
            }
        }
    }

    /// Stop playback and reset the position to zero.
    ///
    /// Legal from `Playing` and `Paused`, and from `Preparing` — in which
    /// case the pending prepare is superseded and its completion discarded.
    pub async fn stop(&self) -> Result<(), PlayerError> {
        {
            let mut inner = self.shared.inner.lock();
            match inner.state {
                PlayerState::Playing | PlayerState::Paused => {}
                PlayerState::Preparing => {
                    inner.generation += 1;
                }
                state => return Err(PlayerError::InvalidOperation { action: "stop", state }),
            }
        }

        match self.transport.stop().await {
            Ok(()) => {
                self.shared.set_state(PlayerState::Stopped);
                self.shared.set_position(Duration::ZERO);
                Ok(())
            }
            Err(e) => {
                self.shared.emit_error(e.to_string());
                Err(PlayerError::TransportFailure(e))
            }
        }
    }

    /// Seek to a position without changing lifecycle state.
    ///
    /// Legal from `Ready`, `Playing`, `Paused`, `Stopped`.
    pub async fn seek(&self, position: Duration) -> Result<(), PlayerError> {
        self.ensure_state(
            "seek",
            &[
                PlayerState::Ready,
                PlayerState::Playing,
                PlayerState::Paused,
                PlayerState::Stopped,
            ],
        )?;

        match self.transport.seek(position).await {
            Ok(()) => {
                self.shared.set_position(position);
                Ok(())
            }
            Err(e) => {
                self.shared.emit_error(e.to_string());
                Err(PlayerError::TransportFailure(e))
            }
        }
    }

    /// Set the playback volume in any state. Out-of-range inputs are
    /// silently clamped to `[0.0, 1.0]`.
    pub async fn set_volume(&self, volume: f64) -> Result<(), PlayerError> {
        let clamped = volume.clamp(0.0, 1.0);
        self.shared.inner.lock().volume = clamped;

        self.transport
            .set_volume(clamped)
            .await
            .map_err(PlayerError::TransportFailure)
    }

    fn ensure_state(&self, action: &'static str, allowed: &[PlayerState]) -> Result<(), PlayerError> {
        let state = self.shared.inner.lock().state;
        if allowed.contains(&state) {
            Ok(())
        } else {
            Err(PlayerError::InvalidOperation { action, state })
        }
    }

    /// Poll the transport clock while the player is Playing.
    fn spawn_position_poller(&self) {
        let shared = Arc::clone(&self.shared);
        let transport = Arc::clone(&self.transport);
        let interval = self.poll_interval;

        let handle = tokio::spawn(async move {
            loop {
                if shared.inner.lock().state != PlayerState::Playing {
                    break;
                }
                let position = transport.position().await;
                shared.set_position(position);
                tokio::time::sleep(interval).await;
            }
        });

        let stale = self.shared.inner.lock().position_poller.replace(handle);
        if let Some(poller) = stale {
            poller.abort();
        }
    }

    /// Consume unsolicited transport notifications and reconcile them with
    /// the canonical state.
    fn spawn_reconciler(
        shared: Arc<PlayerShared>,
        mut transport_events: mpsc::UnboundedReceiver<TransportEvent>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = transport_events.recv().await {
                match event {
                    TransportEvent::Completed => {
                        debug!("Transport reported playback completed");
                        shared.set_state(PlayerState::Stopped);
                    }
                    TransportEvent::Error(message) => {
                        shared.set_state(PlayerState::Error);
                        shared.emit_error(message);
                    }
                }
            }
        })
    }
}

impl<T: MediaTransport + 'static> Drop for VideoPlayer<T> {
    fn drop(&mut self) {
        self.reconciler.abort();
        if let Some(poller) = self.shared.inner.lock().position_poller.take() {
            poller.abort();
        }
    }
}
