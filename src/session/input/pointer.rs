//! Pointer interaction
//!
//! Pointer traffic does double duty: any interaction with the player
//! surface counts as activity for the control-visibility rule, and
//! interactions that land on a control also carry a command. Both effects
//! are applied here so callers hand over raw events and nothing else.

use std::time::Instant;

use crate::session::command::{apply_command, Command, CommandOutcome};
use crate::session::element::MediaElement;
use crate::session::state::SessionState;
use crate::session::visibility;

/// A pointer event already hit-tested by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered the player surface
    Entered,
    /// Pointer moved within the player surface
    Moved,
    /// Pointer left the player surface
    Left,
    /// Scrub landed at `ratio` (0..=1) across the progress bar
    ScrubTo { ratio: f64 },
    /// Drag on the volume control
    VolumeTo { value: f64 },
    /// Click on a control that maps directly to a command
    Pressed(Command),
    /// Click on the rate chip opens or closes the speed menu
    SpeedMenuToggled,
    /// Click on one entry of the open speed menu
    RatePicked { rate: f64 },
}

/// Apply one pointer event; returns the command outcome when one was
/// carried.
pub fn handle_pointer_event(
    state: &mut SessionState,
    element: &mut dyn MediaElement,
    event: PointerEvent,
    now: Instant,
) -> Option<CommandOutcome> {
    match event {
        PointerEvent::Entered | PointerEvent::Moved => {
            visibility::pointer_activity(state, now);
            None
        }
        PointerEvent::Left => {
            visibility::pointer_left(state);
            None
        }
        PointerEvent::ScrubTo { ratio } => {
            visibility::pointer_activity(state, now);
            if !ratio.is_finite() {
                return Some(CommandOutcome::Ignored);
            }
            let target = ratio.clamp(0.0, 1.0) * state.duration_seconds();
            Some(apply_command(state, element, Command::SeekTo(target), now))
        }
        PointerEvent::VolumeTo { value } => {
            visibility::pointer_activity(state, now);
            Some(apply_command(state, element, Command::SetVolume(value), now))
        }
        PointerEvent::Pressed(command) => {
            visibility::pointer_activity(state, now);
            Some(apply_command(state, element, command, now))
        }
        PointerEvent::SpeedMenuToggled => {
            visibility::pointer_activity(state, now);
            if state.has_source() {
                state.toggle_speed_menu();
            }
            None
        }
        PointerEvent::RatePicked { rate } => {
            visibility::pointer_activity(state, now);
            Some(apply_command(
                state,
                element,
                Command::SetPlaybackRate(rate),
                now,
            ))
        }
    }
}
