//! Control-surface visibility
//!
//! One rule, three entry points: controls are pinned visible whenever the
//! session is not actively playing, and during playback they hide after a
//! quiet period with no pointer activity. The pending hide is a deadline
//! token on the state; re-arming replaces the token, so only the newest
//! deadline can ever fire (the debounce).
//!
//! All functions take `now` from the caller instead of reading the clock,
//! which keeps every timing rule testable without sleeping.

use std::time::Instant;

use crate::session::state::{Playback, SessionState};

/// Re-establish the visibility rule after a playback transition.
///
/// Not playing: controls visible, no pending hide. Playing with visible
/// controls: make sure a hide is scheduled (a fresh full delay when none is
/// pending). Playing with hidden controls: leave them hidden.
pub fn sync_after_transition(state: &mut SessionState, now: Instant) {
    if !state.has_source() {
        return;
    }
    if state.playback() != Playback::Playing {
        state.cancel_hide_timer();
        state.show_controls();
        return;
    }
    if state.controls_visible() && state.hide_deadline().is_none() {
        state.arm_hide_timer(now + state.hide_delay());
    }
}

/// Pointer moved over (or entered) the player surface.
///
/// Shows the controls and, while playing, restarts the quiet-period
/// countdown from `now`. While paused there is nothing to schedule.
pub fn pointer_activity(state: &mut SessionState, now: Instant) {
    if !state.has_source() {
        return;
    }
    state.show_controls();
    if state.playback() == Playback::Playing {
        state.arm_hide_timer(now + state.hide_delay());
    } else {
        state.cancel_hide_timer();
    }
}

/// Pointer left the player surface.
///
/// During playback this hides immediately, skipping the countdown. Paused
/// controls stay visible.
pub fn pointer_left(state: &mut SessionState) {
    if !state.has_source() {
        return;
    }
    if state.playback() == Playback::Playing {
        state.hide_controls();
        state.cancel_hide_timer();
    }
}

/// Fire a due hide deadline.
///
/// Called from the host tick. A deadline only hides the controls if the
/// session is still playing when it fires; any due token is consumed either
/// way.
pub fn tick(state: &mut SessionState, now: Instant) {
    let Some(deadline) = state.hide_deadline() else {
        return;
    };
    if now < deadline {
        return;
    }
    state.cancel_hide_timer();
    if state.playback() == Playback::Playing {
        state.hide_controls();
    }
}
