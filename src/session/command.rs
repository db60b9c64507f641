//! Input command router
//!
//! Commands are the only way user intent reaches the session. Each command
//! runs to completion: validate against current state, write the state
//! transition, then tell the element what to do. Rejections leave the state
//! untouched rather than raising errors - a seek past the end clamps, an
//! unknown rate is dropped, and a command against a sourceless session is a
//! no-op.

use std::time::Instant;

use tracing::{debug, warn};

use crate::session::element::MediaElement;
use crate::session::state::SessionState;
use crate::session::visibility;

/// User intent, already decoded from whatever surface produced it
/// (keyboard, pointer, or the host CLI).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlayPause,
    /// Seek to an absolute position in seconds
    SeekTo(f64),
    /// Seek relative to the current position
    SeekBy(f64),
    /// Set the stored volume; 0 implies mute
    SetVolume(f64),
    ToggleMute,
    /// Step the volume; positive deltas clear mute
    VolumeNudge(f64),
    /// Switch to a rate from the discrete allowed set
    SetPlaybackRate(f64),
    ToggleFullscreen,
}

/// What the router did with a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// State changed and the element was instructed
    Applied,
    /// Guard rejected it; nothing changed
    Ignored,
    /// The platform refused the request (fullscreen only)
    Refused,
}

/// Route one command through the session.
///
/// `now` anchors the visibility rule for commands that change the derived
/// playback state.
pub fn apply_command(
    state: &mut SessionState,
    element: &mut dyn MediaElement,
    command: Command,
    now: Instant,
) -> CommandOutcome {
    if !state.has_source() {
        debug!(?command, "ignoring command for sourceless session");
        return CommandOutcome::Ignored;
    }

    match command {
        Command::TogglePlayPause => {
            // Branch on the intent, not the derived state: pausing must
            // work mid-stall.
            if state.play_intent() {
                state.set_play_intent(false);
                element.pause();
            } else {
                state.set_play_intent(true);
                element.play();
            }
            visibility::sync_after_transition(state, now);
            CommandOutcome::Applied
        }
        Command::SeekTo(seconds) => {
            if !seconds.is_finite() {
                return CommandOutcome::Ignored;
            }
            let target = state.clamp_seek_target(seconds);
            element.seek(target);
            state.set_current_time(target);
            CommandOutcome::Applied
        }
        Command::SeekBy(delta) => {
            if !delta.is_finite() {
                return CommandOutcome::Ignored;
            }
            let target = state.clamp_seek_target(state.current_time_seconds() + delta);
            element.seek(target);
            state.set_current_time(target);
            CommandOutcome::Applied
        }
        Command::SetVolume(volume) => {
            if !volume.is_finite() {
                return CommandOutcome::Ignored;
            }
            state.set_volume(volume);
            element.set_output_volume(state.effective_volume());
            CommandOutcome::Applied
        }
        Command::ToggleMute => {
            state.toggle_mute();
            element.set_output_volume(state.effective_volume());
            CommandOutcome::Applied
        }
        Command::VolumeNudge(delta) => {
            if !delta.is_finite() {
                return CommandOutcome::Ignored;
            }
            state.nudge_volume(delta);
            element.set_output_volume(state.effective_volume());
            CommandOutcome::Applied
        }
        Command::SetPlaybackRate(rate) => {
            if state.set_playback_rate(rate) {
                element.set_rate(rate);
                CommandOutcome::Applied
            } else {
                debug!(rate, "rejecting rate outside the allowed set");
                CommandOutcome::Ignored
            }
        }
        Command::ToggleFullscreen => {
            // The mirror flag is written by the bridge when the platform
            // confirms; this only issues the request.
            if state.fullscreen() {
                element.exit_fullscreen();
                CommandOutcome::Applied
            } else {
                match element.request_fullscreen() {
                    Ok(()) => CommandOutcome::Applied,
                    Err(err) => {
                        warn!(%err, "fullscreen request refused");
                        CommandOutcome::Refused
                    }
                }
            }
        }
    }
}
