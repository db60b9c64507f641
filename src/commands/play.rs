//! Play command handler

use std::fs;

use anyhow::{bail, Context, Result};

use playdeck::cli::PlayArgs;
use playdeck::lesson::{self, Lesson};
use playdeck::session::{MediaSource, SessionState};
use playdeck::ui::PlayerApp;
use playdeck::{Config, SimElement};

/// Parse a `AT:SECS` stall script.
pub fn parse_stall(spec: &str) -> Result<(f64, f64)> {
    let Some((at, hold)) = spec.split_once(':') else {
        bail!("stall must be AT:SECS, got '{spec}'");
    };
    let at: f64 = at
        .parse()
        .with_context(|| format!("invalid stall position '{at}'"))?;
    let hold: f64 = hold
        .parse()
        .with_context(|| format!("invalid stall hold '{hold}'"))?;
    if !at.is_finite() || at < 0.0 || !hold.is_finite() || hold <= 0.0 {
        bail!("stall values must be non-negative seconds, got '{spec}'");
    }
    Ok((at, hold))
}

fn load_lesson(path: &std::path::Path) -> Result<Lesson> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read lesson file {}", path.display()))?;
    lesson::parse_reply(&raw)
        .with_context(|| format!("lesson file {} is not usable", path.display()))
}

/// Open the player.
#[cfg(not(tarpaulin_include))]
pub fn handle_play(args: &PlayArgs) -> Result<()> {
    if !args.duration.is_finite() || args.duration <= 0.0 {
        bail!("--duration must be a positive number of seconds");
    }

    let config = Config::load()?;

    let state = match &args.source {
        Some(url) => {
            let mut source = MediaSource::new(url);
            if let Some(poster) = &args.poster {
                source = source.with_poster(poster);
            }
            SessionState::new(source, config.hide_delay())
        }
        None => SessionState::without_source(),
    };

    let mut element = SimElement::new(args.duration);
    if args.deny_fullscreen {
        element = element.with_fullscreen_denied();
    }
    if let Some(spec) = &args.stall {
        let (at, hold) = parse_stall(spec)?;
        element = element.with_stall(at, hold);
    }

    let lesson = match &args.lesson {
        Some(path) => Some(load_lesson(path)?),
        None => None,
    };

    let mut app = PlayerApp::new(state, element, lesson, &config);
    app.run()?;

    // Hand any notes back to the shell after the terminal is restored
    let notes = app.notes_text();
    if !notes.trim().is_empty() {
        println!("{notes}");
    }
    Ok(())
}
