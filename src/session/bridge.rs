//! Native event bridge
//!
//! Folds [`ElementSignal`]s from the element into the session state. The
//! bridge records facts - positions, durations, stall edges, the platform's
//! fullscreen element - and deliberately has no way to write the play/pause
//! intent: a stall surfaces as `Buffering` over an unchanged intent, so the
//! user's last instruction survives flaky delivery.

use std::time::Instant;

use tracing::{debug, warn};

use crate::session::element::ElementSignal;
use crate::session::state::SessionState;
use crate::session::visibility;

/// Apply one element signal to the session.
///
/// Signals against a sourceless session are dropped. `now` feeds the
/// visibility rule for signals that change the derived playback state.
pub fn apply_signal(state: &mut SessionState, signal: ElementSignal, now: Instant) {
    if !state.has_source() {
        debug!(?signal, "dropping element signal for sourceless session");
        return;
    }

    match signal {
        ElementSignal::Progress { seconds } => {
            if !seconds.is_finite() {
                warn!(seconds, "ignoring non-finite progress position");
                return;
            }
            state.set_time_from_element(seconds);
        }
        ElementSignal::MetadataReady { duration_seconds } => {
            if !duration_seconds.is_finite() {
                warn!(duration_seconds, "ignoring non-finite duration");
                return;
            }
            debug!(duration_seconds, "metadata ready");
            state.set_duration(duration_seconds);
        }
        ElementSignal::Stalled => {
            state.set_buffering(true);
            visibility::sync_after_transition(state, now);
        }
        ElementSignal::Resumed => {
            state.set_buffering(false);
            visibility::sync_after_transition(state, now);
        }
        ElementSignal::FullscreenChanged {
            is_player_container,
        } => {
            debug!(is_player_container, "fullscreen element changed");
            state.set_fullscreen_mirror(is_player_container);
        }
    }
}
