//! Main TUI application state and logic

use crate::runner::engine::Runner;
use crate::runner::errors::RunError;
use crate::snapshot::LogKind;
use crate::ui::panes::{
    render_log_pane, render_slots_pane, render_source_pane, render_status_bar, SlotsScrollState,
    SourceScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Delay between steps in auto-play mode
const PLAY_INTERVAL: Duration = Duration::from_secs(1);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Log,
    Slots,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> log -> slots)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Slots,
            FocusedPane::Slots => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Slots,
            FocusedPane::Log => FocusedPane::Source,
            FocusedPane::Slots => FocusedPane::Log,
        }
    }
}

/// The main application state
pub struct App {
    /// Runner holding the full history of the script
    pub runner: Runner,

    /// The script text being visualized
    pub source_code: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub slots_scroll: SlotsScrollState,
    pub log_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app for a runner that has already run its script
    pub fn new(runner: Runner, source_code: String) -> Self {
        let past = Instant::now()
            .checked_sub(PLAY_INTERVAL)
            .unwrap_or_else(Instant::now);

        App {
            runner,
            source_code,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState {
                offset: 0,
                target_line_row: None,
            },
            slots_scroll: SlotsScrollState {
                offset: 0,
                prev_item_count: 0,
            },
            log_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: past,
            last_space_press: past,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.runner.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                    self.log_scroll = usize::MAX;
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Poll with a timeout so auto-play keeps ticking
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Script line to highlight; 0 before the first operation of an undeclared script
    pub fn current_line(&self) -> usize {
        if self.runner.current_statement().is_some() || self.runner.script().declaration.is_some()
        {
            self.runner.current_location().line
        } else {
            0
        }
    }

    /// Whether the operation that produced the current state was rejected
    pub fn is_error(&self) -> bool {
        self.runner.current_statement().is_some()
            && self.runner.log().lines.last().is_some_and(|line| {
                line.kind == LogKind::Error && line.location == self.runner.current_location()
            })
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Left column: Script (top) | Log (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        let current_line = self.current_line();
        let is_error = self.is_error();

        render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            current_line,
            is_error,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_log_pane(
            frame,
            left_rows[1],
            self.runner.log(),
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        render_slots_pane(
            frame,
            columns[1],
            self.runner.stack(),
            self.focused_pane == FocusedPane::Slots,
            &mut self.slots_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.runner.history_position(),
            self.runner.total_snapshots(),
            is_error,
            self.is_playing,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                while stepped < n && self.runner.step_forward().is_ok() {
                    stepped += 1;
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.log_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                let result = self.runner.step_backward();
                self.report_step(result, "Stepped backward", "Cannot step backward");
            }
            KeyCode::Right => {
                self.is_playing = false;
                let result = self.runner.step_forward();
                self.report_step(result, "Stepped forward", "Cannot step forward");
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up moves the current line down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Slots => {
                    self.slots_scroll.offset = self.slots_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Slots => {
                    self.slots_scroll.offset = self.slots_scroll.offset.saturating_add(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // 200ms debounce against key repeat
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(PLAY_INTERVAL)
                            .unwrap_or_else(Instant::now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                let result = self.runner.jump_to_end();
                self.report_step(result, "Jumped to end", "Cannot jump to end");
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                let result = self.runner.rewind_to_start();
                self.report_step(result, "Jumped to start", "Cannot jump to start");
            }
            _ => {}
        }
    }

    fn report_step(&mut self, result: Result<(), RunError>, done: &str, failed: &str) {
        match result {
            Ok(()) => {
                self.status_message = done.to_string();
                self.log_scroll = usize::MAX;
            }
            Err(RunError::History { message }) => {
                self.status_message = format!("{}: {}", failed, message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}
