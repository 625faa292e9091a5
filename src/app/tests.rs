use super::*;
use crate::audio::PlaybackState;
use crate::controller::StateUpdate;
use crate::error::{ControllerError, PlaybackError};
use crate::library::TrackId;

fn titles() -> Vec<String> {
    vec!["Alpha".into(), "Beta".into(), "Gamma".into()]
}

fn update(state: PlaybackState, index: usize) -> StateUpdate {
    StateUpdate {
        state,
        index: Some(index),
        ..StateUpdate::default()
    }
}

#[test]
fn new_app_is_seeded_from_initial_update() {
    let app = App::new(titles(), &update(PlaybackState::Idle, 1));
    assert_eq!(app.selected, Some(1));
    assert_eq!(app.playback, PlaybackState::Idle);
    assert!(app.has_tracks());
    assert!(app.message.is_none());
}

#[test]
fn apply_tracks_state_and_now_playing() {
    let mut app = App::new(titles(), &update(PlaybackState::Idle, 0));
    let playing = StateUpdate {
        now_playing: Some(TrackId::from("a.mp3")),
        now_playing_title: Some("Alpha".into()),
        ..update(PlaybackState::Playing, 0)
    };
    app.apply(&playing);
    assert_eq!(app.playback, PlaybackState::Playing);
    assert_eq!(app.now_playing.as_deref(), Some("Alpha"));
    assert!(app.message.is_none());

    app.apply(&update(PlaybackState::Stopped, 2));
    assert_eq!(app.selected, Some(2));
    assert_eq!(app.now_playing, None);
    assert_eq!(app.message.as_deref(), Some("Playback stopped."));
}

#[test]
fn apply_shows_fault_message() {
    let mut app = App::new(titles(), &update(PlaybackState::Playing, 0));
    let failed = StateUpdate {
        fault: Some(PlaybackError::DecodeFailure {
            track: TrackId::from("a.mp3"),
            reason: "bad header".into(),
        }),
        ..update(PlaybackState::Stopped, 0)
    };
    app.apply(&failed);
    assert_eq!(
        app.message.as_deref(),
        Some("playback of a.mp3 failed: bad header")
    );
}

#[test]
fn report_maps_command_errors_to_messages() {
    let mut app = App::new(Vec::new(), &StateUpdate::default());
    assert!(!app.has_tracks());

    app.report(&ControllerError::EmptySelection);
    assert_eq!(app.message.as_deref(), Some("Select a track to play."));

    app.report(&ControllerError::Playback(PlaybackError::AlreadyPlaying));
    assert_eq!(app.message.as_deref(), Some("A track is already playing."));

    app.clear_message();
    assert!(app.message.is_none());
}

#[test]
fn artwork_follows_selected_index() {
    let art = vec!["p0.jpg".to_string(), "p1.jpg".to_string()];
    let mut app = App::new(titles(), &update(PlaybackState::Idle, 1));
    assert_eq!(app.artwork(&art), Some("p1.jpg"));

    app.apply(&update(PlaybackState::Idle, 2));
    assert_eq!(app.artwork(&art), None);
}
