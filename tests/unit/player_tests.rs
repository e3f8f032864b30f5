/*!
 * Tests for the playback state machine
 */

use std::sync::Arc;
use std::time::Duration;

use cueplay::errors::PlayerError;
use cueplay::player::mock::{MockTransport, MockTransportBehavior};
use cueplay::player::{MediaDescriptor, PlayerEvent, PlayerState, VideoPlayer};

use crate::common;

fn media() -> MediaDescriptor {
    MediaDescriptor::direct("http://example.com/movie.mp4")
}

fn working_player() -> (Arc<MockTransport>, VideoPlayer<MockTransport>) {
    let (transport, events) = MockTransport::working();
    let player = VideoPlayer::new(Arc::clone(&transport), events, &common::fast_player_config());
    (transport, player)
}

/// Give the spawned reconciler/poller tasks a chance to run
async fn settle() {
    tokio::time::sleep(Duration::from_millis(60)).await;
}

/// Test the initial state of a fresh player
#[tokio::test]
async fn test_new_player_shouldStartIdleWithZeroedClock() {
    let (_transport, player) = working_player();

    assert_eq!(player.state(), PlayerState::Idle);
    assert_eq!(player.position(), Duration::ZERO);
    assert_eq!(player.duration(), Duration::ZERO);
    assert_eq!(player.volume(), 1.0);
}

/// Test that play in Idle is rejected without touching the transport
#[tokio::test]
async fn test_play_whileIdle_shouldRejectWithoutCallingTransport() {
    let (transport, player) = working_player();

    let result = player.play().await;

    assert!(matches!(
        result,
        Err(PlayerError::InvalidOperation { action: "play", state: PlayerState::Idle })
    ));
    assert_eq!(player.state(), PlayerState::Idle);
    assert!(transport.calls().is_empty());
}

/// Test that pause and seek are rejected before a session is prepared
#[tokio::test]
async fn test_pause_and_seek_whileIdle_shouldReject() {
    let (transport, player) = working_player();

    assert!(matches!(player.pause().await, Err(PlayerError::InvalidOperation { .. })));
    assert!(matches!(
        player.seek(Duration::from_secs(5)).await,
        Err(PlayerError::InvalidOperation { .. })
    ));
    assert!(transport.calls().is_empty());
}

/// Test the prepare happy path
#[tokio::test]
async fn test_prepare_withWorkingTransport_shouldReachReady() {
    let (transport, player) = working_player();
    transport.set_media_duration(Duration::from_secs(120));
    let mut events = player.subscribe();

    player.prepare(&media()).await.unwrap();

    assert_eq!(player.state(), PlayerState::Ready);
    assert_eq!(player.duration(), Duration::from_secs(120));

    let emitted = common::drain_events(&mut events);
    assert_eq!(
        emitted,
        vec![
            PlayerEvent::StateChanged(PlayerState::Preparing),
            PlayerEvent::StateChanged(PlayerState::Ready),
        ]
    );
}

/// Test that prepare is rejected once a session is live
#[tokio::test]
async fn test_prepare_whileReady_shouldReject() {
    let (_transport, player) = working_player();
    player.prepare(&media()).await.unwrap();

    let result = player.prepare(&media()).await;
    assert!(matches!(
        result,
        Err(PlayerError::InvalidOperation { action: "prepare", state: PlayerState::Ready })
    ));
}

/// Test the full play/pause/resume/stop lifecycle
#[tokio::test]
async fn test_lifecycle_withWorkingTransport_shouldWalkStates() {
    let (_transport, player) = working_player();

    player.prepare(&media()).await.unwrap();
    player.play().await.unwrap();
    assert_eq!(player.state(), PlayerState::Playing);

    player.pause().await.unwrap();
    assert_eq!(player.state(), PlayerState::Paused);

    player.play().await.unwrap();
    assert_eq!(player.state(), PlayerState::Playing);

    player.stop().await.unwrap();
    assert_eq!(player.state(), PlayerState::Stopped);
}

/// Test that stop always resets the position to zero
#[tokio::test]
async fn test_stop_afterSeek_shouldResetPositionToZero() {
    let (_transport, player) = working_player();
    player.prepare(&media()).await.unwrap();
    player.play().await.unwrap();
    player.seek(Duration::from_secs(42)).await.unwrap();
    assert_eq!(player.position(), Duration::from_secs(42));

    let mut events = player.subscribe();
    player.stop().await.unwrap();

    assert_eq!(player.position(), Duration::ZERO);
    let emitted = common::drain_events(&mut events);
    assert!(emitted.contains(&PlayerEvent::PositionChanged(Duration::ZERO)));
}

/// Test that stop outside Playing/Paused/Preparing is rejected
#[tokio::test]
async fn test_stop_whileStopped_shouldReject() {
    let (_transport, player) = working_player();
    player.prepare(&media()).await.unwrap();
    player.play().await.unwrap();
    player.stop().await.unwrap();

    let result = player.stop().await;
    assert!(matches!(
        result,
        Err(PlayerError::InvalidOperation { action: "stop", state: PlayerState::Stopped })
    ));
}

/// Test that seek leaves the lifecycle state unchanged
#[tokio::test]
async fn test_seek_whilePlayingOrPaused_shouldKeepState() {
    let (_transport, player) = working_player();
    player.prepare(&media()).await.unwrap();
    player.play().await.unwrap();

    player.seek(Duration::from_secs(10)).await.unwrap();
    assert_eq!(player.state(), PlayerState::Playing);

    player.pause().await.unwrap();
    player.seek(Duration::from_secs(20)).await.unwrap();
    assert_eq!(player.state(), PlayerState::Paused);
    assert_eq!(player.position(), Duration::from_secs(20));
}

/// Test that volume is clamped in both directions and settable in any state
#[tokio::test]
async fn test_set_volume_withOutOfRangeInput_shouldClampSilently() {
    let (transport, player) = working_player();

    player.set_volume(1.5).await.unwrap();
    assert_eq!(player.volume(), 1.0);
    assert_eq!(transport.volume(), 1.0);

    player.set_volume(-0.2).await.unwrap();
    assert_eq!(player.volume(), 0.0);
    assert_eq!(transport.volume(), 0.0);

    player.set_volume(0.4).await.unwrap();
    assert_eq!(player.volume(), 0.4);
}

/// Test that redundant transport notifications do not re-emit state
#[tokio::test]
async fn test_transport_completedTwice_shouldEmitStoppedOnce() {
    let (transport, player) = working_player();
    player.prepare(&media()).await.unwrap();
    player.play().await.unwrap();
    let mut events = player.subscribe();

    transport.push_completed();
    transport.push_completed();
    settle().await;

    assert_eq!(player.state(), PlayerState::Stopped);
    let stops = common::drain_events(&mut events)
        .into_iter()
        .filter(|event| *event == PlayerEvent::StateChanged(PlayerState::Stopped))
        .count();
    assert_eq!(stops, 1);
}

/// Test that an asynchronous transport error preempts any state
#[tokio::test]
async fn test_transport_errorEvent_shouldDriveErrorState() {
    let (transport, player) = working_player();
    player.prepare(&media()).await.unwrap();
    player.play().await.unwrap();
    let mut events = player.subscribe();

    transport.push_error("decoder blew up");
    settle().await;

    assert_eq!(player.state(), PlayerState::Error);
    let emitted = common::drain_events(&mut events);
    assert!(emitted.contains(&PlayerEvent::StateChanged(PlayerState::Error)));
    assert!(emitted.contains(&PlayerEvent::ErrorOccurred("decoder blew up".to_string())));
}

/// Test that a fresh prepare exits the Error state
#[tokio::test]
async fn test_prepare_afterError_shouldRecover() {
    let (transport, player) = working_player();
    player.prepare(&media()).await.unwrap();
    player.play().await.unwrap();
    transport.push_error("transient failure");
    settle().await;
    assert_eq!(player.state(), PlayerState::Error);

    player.prepare(&media()).await.unwrap();
    assert_eq!(player.state(), PlayerState::Ready);
}

/// Test that a failing prepare drives the Error state
#[tokio::test]
async fn test_prepare_withFailingTransport_shouldEnterErrorState() {
    let (transport, events) = MockTransport::failing();
    let player = VideoPlayer::new(Arc::clone(&transport), events, &common::fast_player_config());
    let mut subscription = player.subscribe();

    let result = player.prepare(&media()).await;

    assert!(matches!(result, Err(PlayerError::TransportFailure(_))));
    assert_eq!(player.state(), PlayerState::Error);
    let emitted = common::drain_events(&mut subscription);
    assert!(emitted.iter().any(|event| matches!(event, PlayerEvent::ErrorOccurred(_))));
}

/// Test that a failing play drives the Error state
#[tokio::test]
async fn test_play_withFailingTransport_shouldEnterErrorState() {
    let (transport, player) = working_player();
    player.prepare(&media()).await.unwrap();
    transport.set_behavior(MockTransportBehavior::Failing);

    let result = player.play().await;

    assert!(matches!(result, Err(PlayerError::TransportFailure(_))));
    assert_eq!(player.state(), PlayerState::Error);
}

/// Test that a failing pause surfaces the error without a state change
#[tokio::test]
async fn test_pause_withFailingTransport_shouldSurfaceErrorAndKeepState() {
    let (transport, player) = working_player();
    player.prepare(&media()).await.unwrap();
    player.play().await.unwrap();
    transport.set_behavior(MockTransportBehavior::Failing);

    let result = player.pause().await;

    assert!(matches!(result, Err(PlayerError::TransportFailure(_))));
    assert_eq!(player.state(), PlayerState::Playing);
}

/// Test that a stop issued during Preparing supersedes the pending prepare
#[tokio::test]
async fn test_stop_whilePreparing_shouldDiscardStaleReady() {
    let (transport, events) = MockTransport::slow(80);
    let player = VideoPlayer::new(Arc::clone(&transport), events, &common::fast_player_config());
    let mut subscription = player.subscribe();

    let prepare_media = media();
    let (prepare_result, stop_result) = tokio::join!(player.prepare(&prepare_media), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        player.stop().await
    });

    // The superseded prepare completes quietly; the stop won
    prepare_result.unwrap();
    stop_result.unwrap();
    assert_eq!(player.state(), PlayerState::Stopped);
    assert_eq!(player.duration(), Duration::ZERO);

    let emitted = common::drain_events(&mut subscription);
    assert!(!emitted.contains(&PlayerEvent::StateChanged(PlayerState::Ready)));
}

/// Test that position updates flow only while Playing
#[tokio::test]
async fn test_position_polling_shouldRunOnlyWhilePlaying() {
    let (transport, player) = working_player();
    player.prepare(&media()).await.unwrap();
    let mut events = player.subscribe();

    player.play().await.unwrap();
    transport.set_position(Duration::from_secs(1));
    settle().await;

    assert_eq!(player.position(), Duration::from_secs(1));
    let emitted = common::drain_events(&mut events);
    assert!(emitted.contains(&PlayerEvent::PositionChanged(Duration::from_secs(1))));

    // Once paused, the clock moving no longer produces updates
    player.pause().await.unwrap();
    let _ = common::drain_events(&mut events);
    transport.set_position(Duration::from_secs(2));
    settle().await;

    assert_eq!(player.position(), Duration::from_secs(1));
    let emitted = common::drain_events(&mut events);
    assert!(!emitted.contains(&PlayerEvent::PositionChanged(Duration::from_secs(2))));
}

/// Test that playback completion keeps the last position
#[tokio::test]
async fn test_transport_completed_shouldStopWithoutResettingPosition() {
    let (transport, player) = working_player();
    player.prepare(&media()).await.unwrap();
    player.play().await.unwrap();
    player.seek(Duration::from_secs(55)).await.unwrap();
    player.pause().await.unwrap();

    transport.push_completed();
    settle().await;

    assert_eq!(player.state(), PlayerState::Stopped);
    assert_eq!(player.position(), Duration::from_secs(55));
}
