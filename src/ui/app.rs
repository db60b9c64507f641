//! Player application
//!
//! Owns the terminal, the session state, and the simulated element, and
//! runs the single-threaded event loop: drain input, advance the element by
//! the elapsed tick, fold its signals through the bridge, fire due timers,
//! draw. Every event is handled to completion before the next one is read.
//!
//! Two panes besides the player: a notes editor (text entry, shielded from
//! global shortcuts while focused) and a read-only lesson pane. Focus
//! cycles with Tab; the keyboard router sees the focus path on every key.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::config::Config;
use crate::lesson::Lesson;
use crate::session::bridge;
use crate::session::command::Command;
use crate::session::focus::{FocusPolicy, Region};
use crate::session::input::{
    handle_pointer_event, route_global_key, KeyRouting, PointerEvent,
};
use crate::session::state::{Playback, SessionState};
use crate::session::timefmt::format_time_readout;
use crate::session::visibility;
use crate::sim::SimElement;
use crate::ui::controls::{
    build_control_line, build_progress_bar_chars, build_speed_menu_lines, rate_label,
    ControlHit,
};
use crate::ui::editor::NotesEditor;
use crate::ui::theme::Theme;

/// Click targets recorded during the last draw.
#[derive(Debug, Default)]
struct HitMap {
    player: Rect,
    notes: Rect,
    progress: Option<Rect>,
    controls: Option<(Rect, crate::ui::controls::ControlLineLayout)>,
    menu: Option<Rect>,
}

/// The interactive player application.
pub struct PlayerApp {
    state: SessionState,
    element: SimElement,
    policy: FocusPolicy,
    focus: Region,
    editor: NotesEditor,
    lesson: Option<Lesson>,
    theme: Theme,
    tick: Duration,
    hit_map: HitMap,
    pointer_inside: bool,
    show_help: bool,
    should_quit: bool,
}

impl PlayerApp {
    /// Assemble the app around a prepared session and element.
    ///
    /// The configured initial volume is routed as a regular command, so the
    /// volume/mute coupling applies to it like to any other volume write.
    pub fn new(
        state: SessionState,
        element: SimElement,
        lesson: Option<Lesson>,
        config: &Config,
    ) -> Self {
        let mut app = Self {
            state,
            element,
            policy: FocusPolicy::standard(),
            focus: Region::PlayerSurface,
            editor: NotesEditor::new(),
            lesson,
            theme: Theme::by_name(&config.ui.theme),
            tick: config.tick(),
            hit_map: HitMap::default(),
            pointer_inside: false,
            show_help: false,
            should_quit: false,
        };
        crate::session::apply_command(
            &mut app.state,
            &mut app.element,
            Command::SetVolume(config.player.initial_volume),
            Instant::now(),
        );
        app
    }

    /// Notes typed during the run, for the host to print on exit.
    pub fn notes_text(&self) -> String {
        self.editor.text()
    }

    /// Run the app until quit. Sets up and restores the terminal.
    #[cfg(not(tarpaulin_include))]
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        result
    }

    #[cfg(not(tarpaulin_include))]
    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            let timeout = self.tick.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => self.on_key(key),
                    Event::Mouse(mouse) => self.on_mouse(mouse),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= self.tick {
                self.on_tick(last_tick.elapsed());
                last_tick = Instant::now();
            }
        }
        Ok(())
    }

    /// One host tick: element clock, signal drain, due timers.
    fn on_tick(&mut self, dt: Duration) {
        self.element.advance(dt);
        let now = Instant::now();
        while let Some(signal) = self.element.poll_signal() {
            bridge::apply_signal(&mut self.state, signal, now);
        }
        visibility::tick(&mut self.state, now);
    }

    fn focus_path(&self) -> [Region; 1] {
        [self.focus]
    }

    /// Route one key: global shortcuts first, then widget handling.
    fn on_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        let path = self.focus_path();
        let routing = route_global_key(
            &mut self.state,
            &mut self.element,
            &self.policy,
            &path,
            key,
            now,
        );
        if routing == KeyRouting::Passed {
            self.on_widget_key(key);
        }
    }

    /// Keys the global router passed back: app chrome, then the focused
    /// widget.
    fn on_widget_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Region::NotesEditor => Region::PlayerSurface,
                    _ => Region::NotesEditor,
                };
                debug!(focus = ?self.focus, "focus moved");
            }
            KeyCode::Esc => {
                // Nearest surface first: help, then menu, then the editor
                if self.show_help {
                    self.show_help = false;
                } else if self.state.speed_menu_open() {
                    self.state.close_speed_menu();
                } else if self.focus == Region::NotesEditor {
                    self.focus = Region::PlayerSurface;
                }
            }
            _ => {
                if self.focus == Region::NotesEditor {
                    self.editor.handle_key(key);
                } else {
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Char('?') => self.show_help = !self.show_help,
                        _ => {}
                    }
                }
            }
        }
    }

    /// Route one mouse event through hit-testing into pointer events.
    fn on_mouse(&mut self, mouse: MouseEvent) {
        let now = Instant::now();
        let pos = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let inside = self.hit_map.player.contains(pos);
                let pointer_event = match (self.pointer_inside, inside) {
                    (false, true) => Some(PointerEvent::Entered),
                    (true, true) => Some(PointerEvent::Moved),
                    (true, false) => Some(PointerEvent::Left),
                    (false, false) => None,
                };
                self.pointer_inside = inside;
                if let Some(event) = pointer_event {
                    handle_pointer_event(&mut self.state, &mut self.element, event, now);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(event) = self.click_target(pos) {
                    handle_pointer_event(&mut self.state, &mut self.element, event, now);
                } else if self.hit_map.notes.contains(pos) {
                    self.focus = Region::NotesEditor;
                }
            }
            _ => {}
        }
    }

    /// Resolve a click position to the pointer event it carries.
    fn click_target(&mut self, pos: Position) -> Option<PointerEvent> {
        if let Some(menu) = self.hit_map.menu {
            if menu.contains(pos) {
                let row = (pos.y.saturating_sub(menu.y + 1)) as usize;
                return crate::ui::controls::speed_menu_rate(row)
                    .map(|rate| PointerEvent::RatePicked { rate });
            }
            // A click outside the open menu just closes it
            if self.hit_map.player.contains(pos) {
                return Some(PointerEvent::SpeedMenuToggled);
            }
        }
        if let Some(bar) = self.hit_map.progress {
            if bar.contains(pos) && bar.width > 0 {
                let ratio = f64::from(pos.x - bar.x) / f64::from(bar.width);
                return Some(PointerEvent::ScrubTo { ratio });
            }
        }
        if let Some((rect, layout)) = &self.hit_map.controls {
            if rect.contains(pos) {
                let col = (pos.x - rect.x) as usize;
                return match layout.hit(col) {
                    Some(ControlHit::PlayToggle) => {
                        Some(PointerEvent::Pressed(Command::TogglePlayPause))
                    }
                    Some(ControlHit::MuteToggle) => {
                        Some(PointerEvent::Pressed(Command::ToggleMute))
                    }
                    Some(ControlHit::Volume(value)) => Some(PointerEvent::VolumeTo { value }),
                    Some(ControlHit::RateChip) => Some(PointerEvent::SpeedMenuToggled),
                    Some(ControlHit::Fullscreen) => {
                        Some(PointerEvent::Pressed(Command::ToggleFullscreen))
                    }
                    None => None,
                };
            }
        }
        if self.hit_map.player.contains(pos) {
            self.focus = Region::PlayerSurface;
            return Some(PointerEvent::Pressed(Command::TogglePlayPause));
        }
        None
    }

    // === Rendering ===

    #[cfg(not(tarpaulin_include))]
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.hit_map = HitMap::default();

        if self.state.fullscreen() {
            // Fullscreen: the player swallows the whole frame
            self.render_player(frame, area);
        } else {
            let rows = Layout::vertical([
                Constraint::Min(8),
                Constraint::Length(10),
                Constraint::Length(1),
            ])
            .split(area);
            self.render_player(frame, rows[0]);

            let panes = Layout::horizontal([
                Constraint::Percentage(55),
                Constraint::Percentage(45),
            ])
            .split(rows[1]);
            self.render_notes(frame, panes[0]);
            self.render_lesson(frame, panes[1]);
            self.render_footer(frame, rows[2]);
        }

        if self.show_help {
            render_help_modal(frame, area, &self.theme);
        }
    }

    #[cfg(not(tarpaulin_include))]
    fn render_player(&mut self, frame: &mut Frame, area: Rect) {
        // A loaded lesson names the session; the raw URL is the fallback
        let title = match (&self.lesson, self.state.source()) {
            (Some(lesson), Some(_)) => format!(" {} ", lesson.objective),
            (None, Some(source)) => format!(" {} ", source.url),
            (_, None) => " no media ".to_string(),
        };
        let border_style = if self.focus == Region::PlayerSurface {
            self.theme.accent_style()
        } else {
            self.theme.text_secondary_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.hit_map.player = inner;

        if !self.state.has_source() {
            let message = Paragraph::new(vec![
                Line::from(""),
                Line::styled("no media source attached", self.theme.text_style()),
                Line::styled(
                    "start with: playdeck play <source>",
                    self.theme.text_secondary_style(),
                ),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(message, inner);
            return;
        }

        self.render_surface(frame, inner);

        if self.state.controls_visible() && inner.height >= 2 {
            let bar_row = Rect::new(inner.x, inner.y + inner.height - 2, inner.width, 1);
            let control_row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
            self.render_progress(frame, bar_row);
            self.render_controls(frame, control_row);
            if self.state.speed_menu_open() {
                self.render_speed_menu(frame, control_row);
            }
        }
    }

    #[cfg(not(tarpaulin_include))]
    fn render_surface(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from("")];
        let status = match self.state.playback() {
            Playback::Playing => Line::styled(
                format!("▶ playing {}", rate_label(self.state.playback_rate())),
                self.theme.accent_bold_style(),
            ),
            Playback::Paused => Line::styled("⏸ paused", self.theme.text_style()),
            Playback::Buffering => Line::styled("◌ buffering…", self.theme.accent_style()),
            Playback::Idle => Line::from(""),
        };
        lines.push(status);
        lines.push(Line::styled(
            format_time_readout(
                self.state.current_time_seconds(),
                self.state.duration_seconds(),
            ),
            self.theme.text_style(),
        ));
        if self.state.muted() {
            lines.push(Line::styled("✕ muted", self.theme.text_secondary_style()));
        }
        if self.state.playback() == Playback::Paused && self.state.current_time_seconds() == 0.0 {
            if let Some(poster) = self.state.source().and_then(|s| s.poster_url.as_deref()) {
                lines.push(Line::styled(
                    format!("poster: {poster}"),
                    self.theme.text_secondary_style(),
                ));
            }
        }
        if let Some(entry) = self
            .lesson
            .as_ref()
            .and_then(|l| l.timeline_entry_at(self.state.current_time_seconds()))
        {
            lines.push(Line::from(""));
            lines.push(Line::styled(
                format!("chapter: {}", entry.label),
                self.theme.text_secondary_style(),
            ));
        }

        let surface = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(surface, area);
    }

    #[cfg(not(tarpaulin_include))]
    fn render_progress(&mut self, frame: &mut Frame, area: Rect) {
        let chapter_times: Vec<f64> = self
            .lesson
            .as_ref()
            .map(|l| l.timeline.iter().map(|e| e.time).collect())
            .unwrap_or_default();
        let (bar, filled) = build_progress_bar_chars(
            area.width as usize,
            self.state.current_time_seconds(),
            self.state.duration_seconds(),
            &chapter_times,
        );

        let spans: Vec<Span> = bar
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let style = if c == '◆' {
                    Style::default().fg(ratatui::style::Color::Yellow)
                } else if i < filled {
                    self.theme.accent_style()
                } else if c == '⏺' {
                    self.theme.text_style()
                } else {
                    self.theme.text_secondary_style()
                };
                let rendered = if i < filled && c == '─' { '━' } else { c };
                Span::styled(rendered.to_string(), style)
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        self.hit_map.progress = Some(area);
    }

    #[cfg(not(tarpaulin_include))]
    fn render_controls(&mut self, frame: &mut Frame, area: Rect) {
        let (line, layout) = build_control_line(
            self.state.playback(),
            self.state.current_time_seconds(),
            self.state.duration_seconds(),
            self.state.volume(),
            self.state.muted(),
            self.state.playback_rate(),
            area.width as usize,
        );
        frame.render_widget(
            Paragraph::new(Line::styled(line, self.theme.text_style())),
            area,
        );
        self.hit_map.controls = Some((area, layout));
    }

    #[cfg(not(tarpaulin_include))]
    fn render_speed_menu(&mut self, frame: &mut Frame, control_row: Rect) {
        let entries = build_speed_menu_lines(self.state.playback_rate());
        let height = entries.len() as u16 + 2;
        let width = 11u16;
        let x = (control_row.x + control_row.width).saturating_sub(width + 8);
        let y = control_row.y.saturating_sub(height);
        let menu_area = Rect::new(x, y.max(1), width, height);

        frame.render_widget(Clear, menu_area);
        let lines: Vec<Line> = entries
            .iter()
            .map(|entry| {
                if entry.starts_with('●') {
                    Line::styled(entry.clone(), self.theme.accent_bold_style())
                } else {
                    Line::styled(entry.clone(), self.theme.text_style())
                }
            })
            .collect();
        let menu = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.accent_style())
                .title(" speed "),
        );
        frame.render_widget(menu, menu_area);
        self.hit_map.menu = Some(menu_area);
    }

    #[cfg(not(tarpaulin_include))]
    fn render_notes(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Region::NotesEditor;
        let border_style = if focused {
            self.theme.accent_style()
        } else {
            self.theme.text_secondary_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" notes ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.hit_map.notes = area;

        let lines: Vec<Line> = self
            .editor
            .lines()
            .iter()
            .map(|l| Line::styled(l.clone(), self.theme.text_style()))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        if focused {
            let (row, _) = self.editor.cursor();
            let col = self.editor.cursor_display_col();
            let x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
            let y = inner.y + (row as u16).min(inner.height.saturating_sub(1));
            frame.set_cursor_position((x, y));
        }
    }

    #[cfg(not(tarpaulin_include))]
    fn render_lesson(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.text_secondary_style())
            .title(" lesson ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(lesson) = &self.lesson else {
            let hint = Paragraph::new(Line::styled(
                "no lesson loaded: pass --lesson <file>",
                self.theme.text_secondary_style(),
            ));
            frame.render_widget(hint, inner);
            return;
        };

        let current = lesson.timeline_entry_at(self.state.current_time_seconds());
        let mut lines = vec![
            Line::styled(lesson.objective.clone(), self.theme.accent_bold_style()),
            Line::from(""),
        ];
        for entry in &lesson.timeline {
            let is_current = current.map(|c| std::ptr::eq(c, entry)).unwrap_or(false);
            let marker = if is_current { "▸" } else { " " };
            let style = if is_current {
                self.theme.accent_style()
            } else {
                self.theme.text_style()
            };
            lines.push(Line::styled(
                format!("{marker} {}  {}", entry.formatted_time(), entry.label),
                style,
            ));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    #[cfg(not(tarpaulin_include))]
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints: Vec<(&str, &str)> = if self.focus == Region::NotesEditor {
            vec![("tab/esc", "back to player"), ("", "keys type into notes")]
        } else {
            vec![
                ("space", "play"),
                ("←/→", "seek"),
                ("↑/↓", "vol"),
                ("m", "mute"),
                ("f", "fullscreen"),
                ("tab", "notes"),
                ("?", "help"),
                ("q", "quit"),
            ]
        };
        let mut spans = Vec::new();
        for (key, action) in hints {
            if !key.is_empty() {
                spans.push(Span::styled(key, self.theme.accent_style()));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(action, self.theme.text_secondary_style()));
            spans.push(Span::raw("  "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Render the keybinding help overlay.
#[cfg(not(tarpaulin_include))]
fn render_help_modal(frame: &mut Frame, area: Rect, theme: &Theme) {
    let modal_width = 46.min(area.width.saturating_sub(4));
    let modal_height = 16.min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(modal_width)) / 2;
    let y = (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(x, y, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let bindings = [
        ("space / k", "toggle play/pause"),
        ("← / →", "seek 5 seconds"),
        ("↑ / ↓", "volume ±0.1"),
        ("m", "toggle mute"),
        ("f", "toggle fullscreen"),
        ("tab", "focus notes editor"),
        ("esc", "close menu / leave notes"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];
    let mut lines = vec![Line::from("")];
    for (key, action) in bindings {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{key:12}"), theme.accent_bold_style()),
            Span::styled(action, theme.text_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "  shortcuts pause while typing notes",
        theme.text_secondary_style(),
    ));

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.accent_style())
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(help, modal_area);
}

/// Put the terminal into raw mode with the alternate screen and mouse
/// capture.
#[cfg(not(tarpaulin_include))]
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("failed to create terminal")
}

/// Undo everything `setup_terminal` did.
#[cfg(not(tarpaulin_include))]
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to restore cursor")?;
    Ok(())
}
