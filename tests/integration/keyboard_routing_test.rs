//! Keyboard routing against a live session
//!
//! The unit tests pin the shortcut table; these check the full path from a
//! terminal key event through the focus shield, the command router, and
//! the simulated element.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use playdeck::session::focus::{FocusPolicy, Region};
use playdeck::session::input::{route_global_key, KeyRouting};
use playdeck::session::{CommandOutcome, MediaSource, Playback, SessionState, DEFAULT_HIDE_DELAY};
use playdeck::SimElement;

fn ready_session() -> (SessionState, SimElement) {
    let source = MediaSource::new("clip://keys").with_known_duration(60.0);
    let state = SessionState::new(source, DEFAULT_HIDE_DELAY);
    (state, SimElement::new(60.0))
}

fn press(
    state: &mut SessionState,
    sim: &mut SimElement,
    focus_path: &[Region],
    code: KeyCode,
) -> KeyRouting {
    let policy = FocusPolicy::standard();
    route_global_key(
        state,
        sim,
        &policy,
        focus_path,
        KeyEvent::new(code, KeyModifiers::NONE),
        Instant::now(),
    )
}

#[test]
fn space_starts_the_element_under_player_focus() {
    let (mut state, mut sim) = ready_session();
    let routing = press(
        &mut state,
        &mut sim,
        &[Region::PlayerSurface],
        KeyCode::Char(' '),
    );
    assert_eq!(routing, KeyRouting::Dispatched(CommandOutcome::Applied));
    assert_eq!(state.playback(), Playback::Playing);
    assert!(sim.is_playing());

    // A second press pauses again
    press(
        &mut state,
        &mut sim,
        &[Region::PlayerSurface],
        KeyCode::Char(' '),
    );
    assert_eq!(state.playback(), Playback::Paused);
    assert!(!sim.is_playing());
}

#[test]
fn arrow_seeks_move_state_and_element_together() {
    let (mut state, mut sim) = ready_session();
    press(&mut state, &mut sim, &[Region::PlayerSurface], KeyCode::Right);
    press(&mut state, &mut sim, &[Region::PlayerSurface], KeyCode::Right);
    assert_eq!(state.current_time_seconds(), 10.0);
    assert_eq!(sim.position(), 10.0);

    press(&mut state, &mut sim, &[Region::PlayerSurface], KeyCode::Left);
    assert_eq!(state.current_time_seconds(), 5.0);
    assert_eq!(sim.position(), 5.0);
}

#[test]
fn volume_keys_write_the_effective_volume_through() {
    let (mut state, mut sim) = ready_session();
    press(&mut state, &mut sim, &[Region::PlayerSurface], KeyCode::Down);
    press(&mut state, &mut sim, &[Region::PlayerSurface], KeyCode::Down);
    assert!((state.volume() - 0.8).abs() < 1e-9);
    assert!((sim.output_volume() - 0.8).abs() < 1e-9);

    // Mute silences the output while the stored volume survives
    press(
        &mut state,
        &mut sim,
        &[Region::PlayerSurface],
        KeyCode::Char('m'),
    );
    assert!(state.muted());
    assert_eq!(sim.output_volume(), 0.0);
    assert!((state.volume() - 0.8).abs() < 1e-9);
}

#[test]
fn fullscreen_key_requests_but_does_not_flip_the_mirror() {
    let (mut state, mut sim) = ready_session();
    let routing = press(
        &mut state,
        &mut sim,
        &[Region::PlayerSurface],
        KeyCode::Char('f'),
    );
    assert_eq!(routing, KeyRouting::Dispatched(CommandOutcome::Applied));
    // The grant is still sitting in the element's signal queue
    assert!(!state.fullscreen());
    assert!(matches!(
        sim.poll_signal(),
        Some(playdeck::ElementSignal::FullscreenChanged {
            is_player_container: true
        })
    ));
}

#[test]
fn notes_focus_shields_the_whole_shortcut_table() {
    let (mut state, mut sim) = ready_session();
    for code in [
        KeyCode::Char(' '),
        KeyCode::Char('k'),
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::Char('f'),
        KeyCode::Char('m'),
    ] {
        let routing = press(&mut state, &mut sim, &[Region::NotesEditor], code);
        assert_eq!(routing, KeyRouting::Passed, "{code:?} leaked past the shield");
    }
    assert_eq!(state.playback(), Playback::Paused);
    assert_eq!(state.current_time_seconds(), 0.0);
    assert!(!state.muted());
    assert!(sim.poll_signal().is_none());
}

#[test]
fn shortcut_is_swallowed_even_when_the_session_has_no_source() {
    let mut state = SessionState::without_source();
    let mut sim = SimElement::new(60.0);
    let routing = press(
        &mut state,
        &mut sim,
        &[Region::PlayerSurface],
        KeyCode::Char(' '),
    );
    assert_eq!(routing, KeyRouting::Dispatched(CommandOutcome::Ignored));
    assert!(!sim.is_playing());
}

#[test]
fn chords_and_releases_pass_to_the_widgets() {
    let (mut state, mut sim) = ready_session();
    let policy = FocusPolicy::standard();

    let chord = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL);
    let routing = route_global_key(
        &mut state,
        &mut sim,
        &policy,
        &[Region::PlayerSurface],
        chord,
        Instant::now(),
    );
    assert_eq!(routing, KeyRouting::Passed);

    let mut release = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    let routing = route_global_key(
        &mut state,
        &mut sim,
        &policy,
        &[Region::PlayerSurface],
        release,
        Instant::now(),
    );
    assert_eq!(routing, KeyRouting::Passed);
    assert_eq!(state.playback(), Playback::Paused);
    assert!(!state.muted());
}
