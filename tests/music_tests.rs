//! Background Music Tests
//!
//! Tests for:
//! - Playlist wrap-around and selection
//! - MusicPlayer deferred play, autoplay rejection and gesture retry
//! - Fallback source tried exactly once per track
//! - Pause/resume without seeking, restart to the first track
//! - Progress persistence and restore from a previous session

use std::cell::Cell;
use std::rc::Rc;

use afterimage::audio::{AudioElement, HeadlessAudio, MusicPlayer, Playlist, SourceState, TrackSource};
use afterimage::config::MusicConfig;
use afterimage::session::{MemoryStore, SessionKey, SessionState};

const EPSILON: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn three_tracks() -> Playlist {
    Playlist::new((1..=3).map(|i| TrackSource::new(format!("music/{i}.mp3"))).collect())
}

fn session() -> SessionState {
    SessionState::new(Box::new(MemoryStore::new()))
}

fn started_player(audio: HeadlessAudio, session: &mut SessionState) -> MusicPlayer<HeadlessAudio> {
    let mut player = MusicPlayer::new(audio, three_tracks(), 0.5);
    player.start();
    player.tick(0.0, session);
    player
}

// ============================================================================
// Playlist
// ============================================================================

#[test]
fn playlist_wraps_after_last_track() {
    let mut playlist = three_tracks();
    assert_eq!(playlist.advance(), 1);
    assert_eq!(playlist.advance(), 2);
    assert_eq!(playlist.advance(), 0);
}

#[test]
fn playlist_select_rejects_out_of_range() {
    let mut playlist = three_tracks();
    assert!(playlist.select(2));
    assert!(!playlist.select(3));
    assert_eq!(playlist.current_index(), 2);
}

#[test]
fn empty_playlist_stays_put() {
    let mut playlist = Playlist::new(Vec::new());
    assert_eq!(playlist.advance(), 0);
    assert!(playlist.current().is_none());
}

// ============================================================================
// Starting & Autoplay
// ============================================================================

#[test]
fn player_waits_for_gesture_before_playing() {
    let mut session = session();
    let mut player = MusicPlayer::new(HeadlessAudio::new(), three_tracks(), 0.5);
    player.tick(1.0, &mut session);

    assert!(player.is_awaiting_gesture());
    assert!(!player.is_playing());
    assert_eq!(player.element().play_requests(), 0);
    assert_eq!(player.element().src(), "music/1.mp3");
}

#[test]
fn play_is_deferred_until_tick() {
    let mut session = session();
    let mut player = MusicPlayer::new(HeadlessAudio::new(), three_tracks(), 0.5);

    player.start();
    assert!(!player.is_playing(), "play() outcome arrives on the next tick");
    player.tick(0.0, &mut session);
    assert!(player.is_playing());
}

#[test]
fn autoplay_rejection_retries_on_next_gesture() {
    let mut session = session();
    let audio = HeadlessAudio::new().with_autoplay_blocked();
    let mut player = MusicPlayer::new(audio, three_tracks(), 0.5);

    player.start();
    player.tick(0.0, &mut session);
    assert!(!player.is_playing());
    assert!(player.is_awaiting_gesture());

    player.element_mut().unlock();
    player.on_user_gesture();
    player.tick(0.0, &mut session);
    assert!(player.is_playing());
    assert!(!player.is_awaiting_gesture());
    assert_eq!(player.element().play_requests(), 2);
}

#[test]
fn gesture_without_pending_playback_does_nothing() {
    let mut session = session();
    let mut player = started_player(HeadlessAudio::new(), &mut session);
    let requests = player.element().play_requests();

    player.on_user_gesture();
    assert_eq!(player.element().play_requests(), requests);
}

#[test]
fn pause_while_play_in_flight_stays_silent() {
    let mut session = session();
    let mut player = MusicPlayer::new(HeadlessAudio::new(), three_tracks(), 0.5);

    player.start();
    player.pause();
    player.tick(0.0, &mut session);
    assert!(!player.is_playing());
    assert!(!player.element().is_playing());
}

// ============================================================================
// Track Advance
// ============================================================================

#[test]
fn ended_track_advances_and_wraps() {
    let mut session = session();
    let audio = HeadlessAudio::new().with_default_duration(10.0);
    let mut player = started_player(audio, &mut session);

    let mut seen = vec![player.current_track_index()];
    for _ in 0..3 {
        player.element_mut().advance(10.0);
        player.tick(0.0, &mut session);
        seen.push(player.current_track_index());
        assert!(player.is_playing());
    }

    assert_eq!(seen, vec![0, 1, 2, 0]);
    assert_eq!(player.element().src(), "music/1.mp3");
}

// ============================================================================
// Fallback Sources
// ============================================================================

#[test]
fn broken_primary_switches_to_fallback() {
    let mut session = session();
    let playlist = Playlist::new(vec![TrackSource::new("music/1.mp3").with_fallback("/music/1.mp3")]);
    let audio = HeadlessAudio::new().with_broken("music/1.mp3");
    let mut player = MusicPlayer::new(audio, playlist, 0.5);

    player.start();
    player.tick(0.0, &mut session);

    assert_eq!(player.source_state(), SourceState::Fallback);
    assert_eq!(player.element().src(), "/music/1.mp3");
    assert!(player.is_playing());
}

#[test]
fn default_tracks_fall_back_to_absolute_paths() {
    let mut session = session();
    let config = MusicConfig::default();
    let audio = HeadlessAudio::new()
        .with_duration("music/1.mp3", 1.0)
        .with_broken("music/2.mp3");
    let mut player = MusicPlayer::new(audio, Playlist::new(config.tracks), config.persist_interval_secs);

    player.start();
    player.tick(0.0, &mut session);
    assert_eq!(player.element().src(), "music/1.mp3");

    player.element_mut().advance(2.0);
    player.tick(0.0, &mut session);
    player.tick(0.0, &mut session);

    assert_eq!(player.source_state(), SourceState::Fallback);
    assert_eq!(player.element().src(), "/music/2.mp3");
    assert!(player.is_playing());
}

#[test]
fn fallback_is_tried_only_once() {
    let mut session = session();
    let playlist = Playlist::new(vec![TrackSource::new("a.mp3").with_fallback("b.mp3")]);
    let audio = HeadlessAudio::new().with_broken("a.mp3").with_broken("b.mp3");
    let mut player = MusicPlayer::new(audio, playlist, 0.5);

    player.start();
    for _ in 0..5 {
        player.tick(0.1, &mut session);
    }

    assert_eq!(player.source_state(), SourceState::Failed);
    assert_eq!(player.element().src(), "b.mp3");
    assert!(!player.is_playing());
    // One play on the primary, one on the fallback, nothing after
    assert_eq!(player.element().play_requests(), 2);

    player.resume();
    assert_eq!(player.element().play_requests(), 2);
}

#[test]
fn broken_track_without_fallback_fails() {
    let mut session = session();
    let audio = HeadlessAudio::new().with_broken("music/1.mp3");
    let mut player = MusicPlayer::new(audio, three_tracks(), 0.5);

    player.start();
    player.tick(0.0, &mut session);
    assert_eq!(player.source_state(), SourceState::Failed);
}

// ============================================================================
// Transport
// ============================================================================

#[test]
fn pause_and_resume_keep_position() {
    let mut session = session();
    let mut player = started_player(HeadlessAudio::new(), &mut session);

    player.element_mut().advance(3.0);
    player.pause();
    assert!(!player.element().is_playing());

    player.resume();
    player.tick(0.0, &mut session);
    assert!(player.is_playing());
    assert!(approx(player.element().current_time(), 3.0));
}

#[test]
fn restart_goes_back_to_first_track_at_zero() {
    let mut session = session();
    let audio = HeadlessAudio::new().with_default_duration(10.0);
    let mut player = started_player(audio, &mut session);

    player.element_mut().advance(10.0);
    player.tick(0.0, &mut session);
    player.element_mut().advance(4.0);
    assert_eq!(player.current_track_index(), 1);

    player.restart();
    player.tick(0.0, &mut session);
    assert_eq!(player.current_track_index(), 0);
    assert_eq!(player.element().src(), "music/1.mp3");
    assert!(approx(player.element().current_time(), 0.0));
    assert!(player.is_playing());
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn progress_is_saved_twice_per_second() {
    let mut session = session();
    let mut player = started_player(HeadlessAudio::new(), &mut session);
    player.element_mut().advance(1.0);

    player.tick(0.25, &mut session);
    assert_eq!(session.music_track(), None);

    player.tick(0.25, &mut session);
    assert_eq!(session.music_track(), Some(0));
    assert!(approx(session.music_time().unwrap(), 1.0));
}

#[test]
fn save_cadence_carries_over_frame_overshoot() {
    let mut session = session();
    let saves = Rc::new(Cell::new(0));
    let counter = saves.clone();
    session.subscribe(move |change| {
        if change.key == SessionKey::MusicTime {
            counter.set(counter.get() + 1);
        }
    });

    let mut player = started_player(HeadlessAudio::new(), &mut session);
    // 0.375 s frames against a 0.5 s interval: saves land at 0.75, 1.125 and 1.5
    for _ in 0..4 {
        player.tick(0.375, &mut session);
    }
    assert_eq!(saves.get(), 3);
}

#[test]
fn long_stall_saves_once() {
    let mut session = session();
    let saves = Rc::new(Cell::new(0));
    let counter = saves.clone();
    session.subscribe(move |change| {
        if change.key == SessionKey::MusicTime {
            counter.set(counter.get() + 1);
        }
    });

    let mut player = started_player(HeadlessAudio::new(), &mut session);
    player.tick(5.0, &mut session);
    assert_eq!(saves.get(), 1);

    player.tick(0.25, &mut session);
    assert_eq!(saves.get(), 1);
}

#[test]
fn paused_player_does_not_save() {
    let mut session = session();
    let mut player = started_player(HeadlessAudio::new(), &mut session);
    player.pause();

    for _ in 0..10 {
        player.tick(0.25, &mut session);
    }
    assert_eq!(session.music_track(), None);
}

#[test]
fn restore_seeks_on_first_play_then_clears() {
    let mut session = session();
    session.save_music_progress(2, 42.5);

    let mut player = MusicPlayer::new(HeadlessAudio::new(), three_tracks(), 0.5);
    player.restore(&session);
    assert_eq!(player.current_track_index(), 2);
    assert_eq!(player.element().src(), "music/3.mp3");

    player.start();
    player.tick(0.0, &mut session);
    assert!(approx(player.element().current_time(), 42.5));
    assert_eq!(session.get::<String>(SessionKey::MusicTrack), None);
    assert_eq!(session.get::<String>(SessionKey::MusicTime), None);
}

#[test]
fn restore_ignores_out_of_range_track() {
    let mut session = session();
    session.save_music_progress(7, 12.0);

    let mut player = MusicPlayer::new(HeadlessAudio::new(), three_tracks(), 0.5);
    player.restore(&session);
    player.start();
    player.tick(0.0, &mut session);

    assert_eq!(player.current_track_index(), 0);
    assert!(approx(player.element().current_time(), 0.0));
}
