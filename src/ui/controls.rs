//! Control-surface rendering primitives
//!
//! Pure builders for the control bar shown over the player: the progress
//! bar with chapter markers, the control line with its click zones, and the
//! speed-menu entries. Everything here is plain data in, plain data out;
//! the app layer owns colors, positioning, and the terminal itself.

use std::ops::Range;

use crate::session::state::{Playback, PLAYBACK_RATES};
use crate::session::timefmt::format_time_readout;

/// Inner width of the volume gauge in characters.
const VOLUME_GAUGE_WIDTH: usize = 10;

/// Build the progress bar character array.
///
/// The track is `─` with the playhead `⏺` at the current position and `◆`
/// for each chapter marker. Returns the characters plus the filled count so
/// the renderer can color the elapsed part.
///
/// An unknown duration (0 or negative) renders an empty bar with the
/// playhead parked at the start.
pub fn build_progress_bar_chars(
    bar_width: usize,
    current_time: f64,
    total_duration: f64,
    chapter_times: &[f64],
) -> (Vec<char>, usize) {
    if bar_width == 0 {
        return (Vec::new(), 0);
    }

    let progress = if total_duration > 0.0 {
        (current_time / total_duration).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec!['─'; bar_width];

    if filled < bar_width {
        bar[filled] = '⏺';
    }

    for &time in chapter_times {
        if total_duration <= 0.0 {
            continue;
        }
        let pos = ((time / total_duration) * bar_width as f64) as usize;
        if pos < bar_width && bar[pos] != '⏺' {
            bar[pos] = '◆';
        }
    }

    (bar, filled)
}

/// Short label for a playback rate: `1x`, `0.75x`.
pub fn rate_label(rate: f64) -> String {
    format!("{rate}x")
}

/// A clickable zone on the control line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlHit {
    PlayToggle,
    MuteToggle,
    /// Click landed on the volume gauge at this value
    Volume(f64),
    RateChip,
    Fullscreen,
}

/// Column ranges of the control-line zones, relative to the line start.
#[derive(Debug, Clone, Default)]
pub struct ControlLineLayout {
    play: Range<usize>,
    mute_label: Range<usize>,
    volume_gauge: Range<usize>,
    rate_chip: Range<usize>,
    fullscreen: Range<usize>,
}

impl ControlLineLayout {
    /// Resolve a click at `col` (relative to the line start) to a zone.
    pub fn hit(&self, col: usize) -> Option<ControlHit> {
        if self.play.contains(&col) {
            return Some(ControlHit::PlayToggle);
        }
        if self.mute_label.contains(&col) {
            return Some(ControlHit::MuteToggle);
        }
        if self.volume_gauge.contains(&col) {
            let step = col - self.volume_gauge.start + 1;
            return Some(ControlHit::Volume(
                step as f64 / VOLUME_GAUGE_WIDTH as f64,
            ));
        }
        if self.rate_chip.contains(&col) {
            return Some(ControlHit::RateChip);
        }
        if self.fullscreen.contains(&col) {
            return Some(ControlHit::Fullscreen);
        }
        None
    }
}

/// Build the control line and its click zones.
///
/// Layout: `[⏸] 0:42 / 2:00  [vol ██████░░░░] [1x ▾] [⛶]`, padded to
/// `width`. Every glyph used is single-column, so char index equals column
/// offset and the returned ranges line up with the rendered string.
pub fn build_control_line(
    playback: Playback,
    position_seconds: f64,
    duration_seconds: f64,
    volume: f64,
    muted: bool,
    rate: f64,
    width: usize,
) -> (String, ControlLineLayout) {
    let mut line = String::new();
    let mut layout = ControlLineLayout::default();

    let glyph = match playback {
        Playback::Playing => '⏸',
        Playback::Buffering => '◌',
        Playback::Idle | Playback::Paused => '▶',
    };
    layout.play = push_segment(&mut line, &format!("[{glyph}]"));
    line.push(' ');

    line.push_str(&format_time_readout(position_seconds, duration_seconds));
    line.push_str("  ");

    let label = if muted { "mut" } else { "vol" };
    layout.mute_label = push_segment(&mut line, &format!("[{label} "));
    let gauge_start = line.chars().count();
    let filled = ((volume * VOLUME_GAUGE_WIDTH as f64).round() as usize).min(VOLUME_GAUGE_WIDTH);
    for i in 0..VOLUME_GAUGE_WIDTH {
        if muted {
            line.push('·');
        } else if i < filled {
            line.push('█');
        } else {
            line.push('░');
        }
    }
    layout.volume_gauge = gauge_start..gauge_start + VOLUME_GAUGE_WIDTH;
    line.push(']');
    line.push(' ');

    layout.rate_chip = push_segment(&mut line, &format!("[{} ▾]", rate_label(rate)));
    line.push(' ');

    layout.fullscreen = push_segment(&mut line, "[⛶]");

    let used = line.chars().count();
    for _ in used..width {
        line.push(' ');
    }

    (line, layout)
}

fn push_segment(line: &mut String, segment: &str) -> Range<usize> {
    let start = line.chars().count();
    line.push_str(segment);
    start..line.chars().count()
}

/// Build the speed-menu entries, one per allowed rate, current marked.
pub fn build_speed_menu_lines(current_rate: f64) -> Vec<String> {
    PLAYBACK_RATES
        .iter()
        .map(|&rate| {
            let marker = if rate == current_rate { '●' } else { ' ' };
            format!("{marker} {}", rate_label(rate))
        })
        .collect()
}

/// Rate behind a speed-menu row, top to bottom.
pub fn speed_menu_rate(row: usize) -> Option<f64> {
    PLAYBACK_RATES.get(row).copied()
}
