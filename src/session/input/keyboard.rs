//! Global keyboard shortcuts
//!
//! One fixed shortcut table drives playback from anywhere in the app. The
//! routing order is the load-bearing part: the focus shield is consulted
//! BEFORE the key is looked up, so a space typed into the notes editor is
//! never interpreted as play/pause. Only a key that survives the shield and
//! matches the table is swallowed; everything else is passed back to the
//! caller for widget-local handling.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::session::command::{apply_command, Command, CommandOutcome};
use crate::session::element::MediaElement;
use crate::session::focus::{FocusPolicy, Region};
use crate::session::state::SessionState;

/// Seconds moved by one arrow-key seek.
pub const SEEK_STEP_SECONDS: f64 = 5.0;
/// Volume moved by one arrow-key nudge.
pub const VOLUME_NUDGE_STEP: f64 = 0.1;

/// What the router did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRouting {
    /// The key was swallowed as a global shortcut; the caller must not
    /// deliver it anywhere else
    Dispatched(CommandOutcome),
    /// Not a global shortcut here; deliver it to the focused widget
    Passed,
}

/// Look up a key in the global shortcut table.
///
/// Chorded keys (ctrl/alt/super) never match - those belong to the
/// terminal and the widgets.
pub fn map_global_key(key: KeyEvent) -> Option<Command> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('k') => Some(Command::TogglePlayPause),
        KeyCode::Left => Some(Command::SeekBy(-SEEK_STEP_SECONDS)),
        KeyCode::Right => Some(Command::SeekBy(SEEK_STEP_SECONDS)),
        KeyCode::Up => Some(Command::VolumeNudge(VOLUME_NUDGE_STEP)),
        KeyCode::Down => Some(Command::VolumeNudge(-VOLUME_NUDGE_STEP)),
        KeyCode::Char('f') => Some(Command::ToggleFullscreen),
        KeyCode::Char('m') => Some(Command::ToggleMute),
        _ => None,
    }
}

/// Route one key event: shield check, then table lookup, then dispatch.
///
/// A mapped key on an unshielded path is always `Dispatched`, even when the
/// command itself bounces off a guard (say, a sourceless session) - the key
/// belongs to the player either way and must not leak into a widget.
pub fn route_global_key(
    state: &mut SessionState,
    element: &mut dyn MediaElement,
    policy: &FocusPolicy,
    focus_path: &[Region],
    key: KeyEvent,
    now: Instant,
) -> KeyRouting {
    // Key-up events carry no intent
    if key.kind == KeyEventKind::Release {
        return KeyRouting::Passed;
    }

    if policy.is_shielded(focus_path) {
        if let Some(rule) = policy.shielding_rule(focus_path) {
            debug!(rule, code = ?key.code, "focus shield passed key to widget");
        }
        return KeyRouting::Passed;
    }

    match map_global_key(key) {
        Some(command) => KeyRouting::Dispatched(apply_command(state, element, command, now)),
        None => KeyRouting::Passed,
    }
}
