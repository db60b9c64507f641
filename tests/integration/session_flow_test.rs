//! End-to-end flows through the session engine
//!
//! These drive the engine exactly the way the terminal host does: commands
//! in through the router, element facts back through the bridge, one tick
//! at a time against the simulated element.

use std::time::Instant;

use playdeck::session::{
    apply_command, Command, CommandOutcome, MediaSource, Playback, SessionState,
    DEFAULT_HIDE_DELAY,
};
use playdeck::SimElement;

use super::helpers::{run_tick, TICK};

fn new_session(duration: f64) -> (SessionState, SimElement, Instant) {
    let state = SessionState::new(MediaSource::new("clip://flow"), DEFAULT_HIDE_DELAY);
    let sim = SimElement::new(duration);
    (state, sim, Instant::now())
}

#[test]
fn metadata_arrives_on_the_first_tick() {
    let (mut state, mut sim, t0) = new_session(60.0);
    assert_eq!(state.duration_seconds(), 0.0);

    run_tick(&mut state, &mut sim, t0);
    assert_eq!(state.duration_seconds(), 60.0);
    assert_eq!(state.playback(), Playback::Paused);
}

#[test]
fn toggle_starts_the_element_and_progress_flows_back() {
    let (mut state, mut sim, t0) = new_session(60.0);
    run_tick(&mut state, &mut sim, t0);

    let outcome = apply_command(&mut state, &mut sim, Command::TogglePlayPause, t0);
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(state.playback(), Playback::Playing);
    assert!(sim.is_playing());

    for i in 1..=4u32 {
        run_tick(&mut state, &mut sim, t0 + TICK * i);
    }
    assert!((state.current_time_seconds() - 1.0).abs() < 1e-9);
}

#[test]
fn progress_alone_never_starts_playback() {
    let (mut state, mut sim, t0) = new_session(60.0);
    run_tick(&mut state, &mut sim, t0);

    // A paused seek makes the element report a moved clock
    apply_command(&mut state, &mut sim, Command::SeekTo(10.0), t0);
    run_tick(&mut state, &mut sim, t0 + TICK);

    assert_eq!(state.current_time_seconds(), 10.0);
    assert_eq!(state.playback(), Playback::Paused);
    assert!(!sim.is_playing());
}

#[test]
fn scripted_stall_surfaces_as_buffering_and_recovers() {
    let mut state = SessionState::new(MediaSource::new("clip://stall"), DEFAULT_HIDE_DELAY);
    let mut sim = SimElement::new(60.0).with_stall(0.5, 0.5);
    let t0 = Instant::now();

    run_tick(&mut state, &mut sim, t0);
    apply_command(&mut state, &mut sim, Command::TogglePlayPause, t0);

    // Two moving ticks reach the stall mark, the third trips it
    for i in 1..=3u32 {
        run_tick(&mut state, &mut sim, t0 + TICK * i);
    }
    assert_eq!(state.playback(), Playback::Buffering);
    let frozen = state.current_time_seconds();

    // Held: the clock must not move while starved
    run_tick(&mut state, &mut sim, t0 + TICK * 4);
    assert_eq!(state.playback(), Playback::Buffering);
    assert_eq!(state.current_time_seconds(), frozen);

    // Recovery restores Playing without any new user command
    run_tick(&mut state, &mut sim, t0 + TICK * 5);
    assert_eq!(state.playback(), Playback::Playing);
    run_tick(&mut state, &mut sim, t0 + TICK * 6);
    assert!(state.current_time_seconds() > frozen);
}

#[test]
fn pause_lands_mid_stall() {
    let mut state = SessionState::new(MediaSource::new("clip://stall"), DEFAULT_HIDE_DELAY);
    let mut sim = SimElement::new(60.0).with_stall(0.5, 5.0);
    let t0 = Instant::now();

    run_tick(&mut state, &mut sim, t0);
    apply_command(&mut state, &mut sim, Command::TogglePlayPause, t0);
    for i in 1..=3u32 {
        run_tick(&mut state, &mut sim, t0 + TICK * i);
    }
    assert_eq!(state.playback(), Playback::Buffering);

    let outcome = apply_command(
        &mut state,
        &mut sim,
        Command::TogglePlayPause,
        t0 + TICK * 3,
    );
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(state.playback(), Playback::Paused);
    assert!(!sim.is_playing());
}

#[test]
fn volume_pipeline_reaches_the_element() {
    let (mut state, mut sim, t0) = new_session(60.0);

    apply_command(&mut state, &mut sim, Command::SetVolume(0.4), t0);
    assert_eq!(sim.output_volume(), 0.4);

    apply_command(&mut state, &mut sim, Command::ToggleMute, t0);
    assert!(state.muted());
    assert_eq!(sim.output_volume(), 0.0);
    // The stored volume survives the mute
    assert_eq!(state.volume(), 0.4);

    // Unmute restores full volume, not the stored 0.4
    apply_command(&mut state, &mut sim, Command::ToggleMute, t0);
    assert!(!state.muted());
    assert_eq!(state.volume(), 1.0);
    assert_eq!(sim.output_volume(), 1.0);
}

#[test]
fn zero_volume_drag_implies_mute() {
    let (mut state, mut sim, t0) = new_session(60.0);

    apply_command(&mut state, &mut sim, Command::SetVolume(0.0), t0);
    assert!(state.muted());
    assert_eq!(sim.output_volume(), 0.0);

    // Nudging up both raises the volume and unmutes
    apply_command(&mut state, &mut sim, Command::VolumeNudge(0.1), t0);
    assert!(!state.muted());
    assert!((state.volume() - 0.1).abs() < 1e-9);
    assert!((sim.output_volume() - 0.1).abs() < 1e-9);
}

#[test]
fn rate_outside_the_discrete_set_is_rejected() {
    let (mut state, mut sim, t0) = new_session(60.0);
    run_tick(&mut state, &mut sim, t0);
    apply_command(&mut state, &mut sim, Command::TogglePlayPause, t0);

    let outcome = apply_command(&mut state, &mut sim, Command::SetPlaybackRate(1.75), t0);
    assert_eq!(outcome, CommandOutcome::Ignored);
    assert_eq!(state.playback_rate(), 1.0);

    let outcome = apply_command(&mut state, &mut sim, Command::SetPlaybackRate(1.5), t0);
    assert_eq!(outcome, CommandOutcome::Applied);

    // Two ticks at 1.5x move the clock 0.75 seconds
    let before = state.current_time_seconds();
    run_tick(&mut state, &mut sim, t0 + TICK);
    run_tick(&mut state, &mut sim, t0 + TICK * 2);
    assert!((state.current_time_seconds() - before - 0.75).abs() < 1e-9);
}

#[test]
fn seek_commands_clamp_into_the_known_duration() {
    let (mut state, mut sim, t0) = new_session(60.0);
    run_tick(&mut state, &mut sim, t0);

    apply_command(&mut state, &mut sim, Command::SeekTo(500.0), t0);
    assert_eq!(state.current_time_seconds(), 60.0);
    assert_eq!(sim.position(), 60.0);

    apply_command(&mut state, &mut sim, Command::SeekBy(-500.0), t0);
    assert_eq!(state.current_time_seconds(), 0.0);
    assert_eq!(sim.position(), 0.0);
}

#[test]
fn playback_pins_at_the_end_of_media() {
    let (mut state, mut sim, t0) = new_session(1.0);
    run_tick(&mut state, &mut sim, t0);
    apply_command(&mut state, &mut sim, Command::TogglePlayPause, t0);

    for i in 1..=8u32 {
        run_tick(&mut state, &mut sim, t0 + TICK * i);
    }
    assert_eq!(state.current_time_seconds(), 1.0);
    // The session keeps its playing intent; the element is simply out of media
    assert_eq!(state.playback(), Playback::Playing);
}

#[test]
fn fullscreen_mirror_waits_for_the_platform_signal() {
    let (mut state, mut sim, t0) = new_session(60.0);
    run_tick(&mut state, &mut sim, t0);

    let outcome = apply_command(&mut state, &mut sim, Command::ToggleFullscreen, t0);
    assert_eq!(outcome, CommandOutcome::Applied);
    // Granted, but the confirmation has not been delivered yet
    assert!(!state.fullscreen());

    run_tick(&mut state, &mut sim, t0 + TICK);
    assert!(state.fullscreen());

    // The platform can take fullscreen away without a request from us
    sim.force_fullscreen_change(false);
    run_tick(&mut state, &mut sim, t0 + TICK * 2);
    assert!(!state.fullscreen());
}

#[test]
fn denied_fullscreen_is_refused_and_playback_continues() {
    let mut state = SessionState::new(MediaSource::new("clip://deny"), DEFAULT_HIDE_DELAY);
    let mut sim = SimElement::new(60.0).with_fullscreen_denied();
    let t0 = Instant::now();

    run_tick(&mut state, &mut sim, t0);
    apply_command(&mut state, &mut sim, Command::TogglePlayPause, t0);

    let outcome = apply_command(&mut state, &mut sim, Command::ToggleFullscreen, t0);
    assert_eq!(outcome, CommandOutcome::Refused);
    assert!(!state.fullscreen());

    // The refusal is not a session failure
    assert_eq!(state.playback(), Playback::Playing);
    run_tick(&mut state, &mut sim, t0 + TICK);
    assert!(state.current_time_seconds() > 0.0);
}

#[test]
fn commands_without_a_source_are_ignored() {
    let mut state = SessionState::without_source();
    let mut sim = SimElement::new(60.0);
    let t0 = Instant::now();

    let outcome = apply_command(&mut state, &mut sim, Command::TogglePlayPause, t0);
    assert_eq!(outcome, CommandOutcome::Ignored);
    assert_eq!(state.playback(), Playback::Idle);
    assert!(!sim.is_playing());
}

#[test]
fn identical_event_scripts_produce_identical_sessions() {
    fn run_script(base: Instant) -> (Playback, f64, f64, f64, bool, f64, bool, bool) {
        let mut state =
            SessionState::new(MediaSource::new("clip://determinism"), DEFAULT_HIDE_DELAY);
        let mut sim = SimElement::new(45.0).with_stall(1.0, 0.25);

        run_tick(&mut state, &mut sim, base);
        apply_command(&mut state, &mut sim, Command::TogglePlayPause, base);
        for i in 1..=6u32 {
            run_tick(&mut state, &mut sim, base + TICK * i);
        }
        apply_command(&mut state, &mut sim, Command::SeekBy(-2.0), base + TICK * 6);
        apply_command(&mut state, &mut sim, Command::SetVolume(0.3), base + TICK * 6);
        apply_command(&mut state, &mut sim, Command::ToggleMute, base + TICK * 6);
        apply_command(
            &mut state,
            &mut sim,
            Command::SetPlaybackRate(1.25),
            base + TICK * 6,
        );
        for i in 7..=20u32 {
            run_tick(&mut state, &mut sim, base + TICK * i);
        }

        (
            state.playback(),
            state.current_time_seconds(),
            state.duration_seconds(),
            state.volume(),
            state.muted(),
            state.playback_rate(),
            state.fullscreen(),
            state.controls_visible(),
        )
    }

    let base = Instant::now();
    assert_eq!(run_script(base), run_script(base));
}
