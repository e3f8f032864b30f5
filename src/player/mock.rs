/*!
 * Mock transport for testing playback behavior.
 *
 * Supports a few behavior modes:
 * - `MockTransport::working()` - every operation succeeds
 * - `MockTransport::failing()` - every operation fails
 * - `MockTransport::slow(delay_ms)` - prepare resolves after a delay
 *
 * The mock records every call so tests can assert that rejected intents
 * never reach the transport, and exposes handles to push unsolicited
 * events and move the session clock.
 */

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::errors::TransportError;
use crate::player::transport::{MediaDescriptor, MediaTransport, TransportEvent};

/// Behavior mode for the mock transport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockTransportBehavior {
    /// Every operation succeeds
    Working,
    /// Every operation fails
    Failing,
    /// Prepare resolves after a delay (for supersede testing)
    Slow { delay_ms: u64 },
}

/// Mock transport recording calls and serving a controllable clock
#[derive(Debug)]
pub struct MockTransport {
    /// Behavior mode, switchable mid-test
    behavior: Mutex<MockTransportBehavior>,
    /// Duration reported when prepare resolves
    media_duration: Mutex<Duration>,
    /// Controllable session clock
    clock: Mutex<Duration>,
    /// Last volume the transport was given
    volume: Mutex<f64>,
    /// Operations invoked, in order
    calls: Mutex<Vec<&'static str>>,
    /// Sender for unsolicited events
    events: mpsc::UnboundedSender<TransportEvent>,
}

impl MockTransport {
    /// Create a mock transport and the notification channel to hand to the
    /// player.
    pub fn new(behavior: MockTransportBehavior) -> (Arc<Self>, mpsc::UnboundedReceiver<TransportEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let transport = Arc::new(MockTransport {
            behavior: Mutex::new(behavior),
            media_duration: Mutex::new(Duration::from_secs(60)),
            clock: Mutex::new(Duration::ZERO),
            volume: Mutex::new(1.0),
            calls: Mutex::new(Vec::new()),
            events,
        });
        (transport, receiver)
    }

    /// Create a working mock transport
    pub fn working() -> (Arc<Self>, mpsc::UnboundedReceiver<TransportEvent>) {
        Self::new(MockTransportBehavior::Working)
    }

    /// Create a mock transport where every operation fails
    pub fn failing() -> (Arc<Self>, mpsc::UnboundedReceiver<TransportEvent>) {
        Self::new(MockTransportBehavior::Failing)
    }

    /// Create a mock transport whose prepare resolves after a delay
    pub fn slow(delay_ms: u64) -> (Arc<Self>, mpsc::UnboundedReceiver<TransportEvent>) {
        Self::new(MockTransportBehavior::Slow { delay_ms })
    }

    /// Switch the behavior mode, e.g. to make later operations fail
    pub fn set_behavior(&self, behavior: MockTransportBehavior) {
        *self.behavior.lock() = behavior;
    }

    /// Set the duration reported by the next prepare
    pub fn set_media_duration(&self, duration: Duration) {
        *self.media_duration.lock() = duration;
    }

    /// Move the session clock, as the underlying platform would
    pub fn set_position(&self, position: Duration) {
        *self.clock.lock() = position;
    }

    /// Last volume handed to the transport
    pub fn volume(&self) -> f64 {
        *self.volume.lock()
    }

    /// Operations invoked so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    /// Push an asynchronous error notification
    pub fn push_error(&self, message: impl Into<String>) {
        let _ = self.events.send(TransportEvent::Error(message.into()));
    }

    /// Push a playback-completed notification
    pub fn push_completed(&self) {
        let _ = self.events.send(TransportEvent::Completed);
    }

    fn record(&self, operation: &'static str) -> Result<(), TransportError> {
        self.calls.lock().push(operation);
        match *self.behavior.lock() {
            MockTransportBehavior::Failing => Err(TransportError::failed(
                operation,
                "mock transport configured to fail",
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl MediaTransport for MockTransport {
    async fn prepare(&self, _content: &MediaDescriptor) -> Result<Duration, TransportError> {
        self.record("prepare")?;
        let behavior = *self.behavior.lock();
        if let MockTransportBehavior::Slow { delay_ms } = behavior {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        Ok(*self.media_duration.lock())
    }

    async fn play(&self) -> Result<(), TransportError> {
        self.record("play")
    }

    async fn pause(&self) -> Result<(), TransportError> {
        self.record("pause")
    }

    async fn stop(&self) -> Result<(), TransportError> {
        self.record("stop")
    }

    async fn seek(&self, position: Duration) -> Result<(), TransportError> {
        self.record("seek")?;
        *self.clock.lock() = position;
        Ok(())
    }

    async fn set_volume(&self, volume: f64) -> Result<(), TransportError> {
        self.record("set_volume")?;
        *self.volume.lock() = volume;
        Ok(())
    }

    async fn position(&self) -> Duration {
        *self.clock.lock()
    }
}
