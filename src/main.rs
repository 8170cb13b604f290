//! Command-line entry point and terminal main loop.
//!
//! This module is the thin integration layer between the sift library and
//! the terminal. It parses flags, starts the background reader, translates
//! crossterm events into library [`Event`]s, and carries out the returned
//! [`Action`]s.
//!
//! # Threads
//!
//! ```text
//! ┌────────────────────┐   lines (mpsc)   ┌──────────────────────────┐
//! │ reader thread      │ ───────────────▶ │ main thread              │
//! │ stdin → split '\n' │                  │ poll → handle → render   │
//! └────────────────────┘                  └──────────────────────────┘
//! ```
//!
//! # Main Loop
//!
//! Each tick:
//! 1. Drain whatever lines the reader has queued and hand them over as one
//!    `LinesReceived` event
//! 2. Redraw if anything changed (the whole screen after a relayout)
//! 3. Wait up to one tick for a terminal event and handle it
//!
//! # Keybindings
//!
//! - Printable characters: Append to the query
//! - `Backspace`/`Ctrl+h`: Delete one character
//! - `Ctrl+w`: Delete one word
//! - `Ctrl+u`: Clear the query
//! - `Up`/`Ctrl+p`/`Ctrl+k`: Move up
//! - `Down`/`Ctrl+n`/`Ctrl+j`: Move down
//! - `PageUp`/`PageDown`: Move one window
//! - `Home`/`End`: First/last row
//! - `Enter`: Print the selected line and exit
//! - `Esc`/`Ctrl+c`/`Ctrl+g`: Exit without output
//!
//! # Exit Status
//!
//! - `0`: A line was selected, or the selection was cancelled
//! - `1`: Input contained no usable lines
//! - `2`: An error occurred

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use sift::observability::init_tracing;
use sift::ui::{render, window_for, TerminalGuard};
use sift::worker::LineIngestor;
use sift::{handle_event, initialize, Action, AppState, Config, Event, SiftError};

/// Interactive fuzzy line selector.
///
/// Reads lines from stdin, lets you narrow them by typing, and prints the
/// chosen line to stdout.
#[derive(Debug, Parser)]
#[command(name = "sift", version, about)]
struct Cli {
    /// Config file (default: <config dir>/sift/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Rows shown at once
    #[arg(long, value_name = "N")]
    window_size: Option<usize>,

    /// Longest accepted line in bytes
    #[arg(long, value_name = "BYTES")]
    max_item_len: Option<usize>,

    /// Longest query in bytes
    #[arg(long, value_name = "BYTES")]
    max_query_len: Option<usize>,

    /// Text drawn before the query
    #[arg(long)]
    prompt: Option<String>,

    /// History file used for the recency boost
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,

    /// Neither read nor record selection history
    #[arg(long, conflicts_with_all = ["history", "history_size"])]
    no_history: bool,

    /// History entries kept
    #[arg(long, value_name = "N")]
    history_size: Option<usize>,

    /// Log filter, e.g. `debug` (RUST_LOG takes precedence)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    /// Overrides file settings with the flags that were given.
    fn apply(self, config: &mut Config) {
        if let Some(n) = self.window_size {
            config.window_size = n;
        }
        if let Some(n) = self.max_item_len {
            config.max_item_len = n;
        }
        if let Some(n) = self.max_query_len {
            config.max_query_len = n;
        }
        if let Some(prompt) = self.prompt {
            config.prompt = prompt;
        }
        if let Some(path) = self.history {
            config.history.path = Some(path);
        }
        if let Some(n) = self.history_size {
            config.history.max_entries = n;
        }
        if self.no_history {
            config.history.enabled = false;
        }
        if let Some(level) = self.log_level {
            config.trace_level = Some(level);
        }
    }
}

/// How the session ended.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Selected(Vec<u8>),
    Cancelled,
    NoItems,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(Outcome::Selected(bytes)) => match emit(&bytes) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("sift: failed to write selection: {e}");
                ExitCode::from(2)
            }
        },
        Ok(Outcome::Cancelled) => ExitCode::SUCCESS,
        Ok(Outcome::NoItems) => {
            eprintln!("sift: no items available");
            ExitCode::from(1)
        }
        Err(e) => {
            tracing::error!(error = %e, "exiting with error");
            eprintln!("sift: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> sift::Result<Outcome> {
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    init_tracing(&config);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(SiftError::Terminal(
            "stdin is a terminal; pipe the lines to choose from into sift".to_string(),
        ));
    }

    let mut state = initialize(&config);
    let mut ingestor = LineIngestor::spawn(stdin)?;

    let outcome = {
        let mut terminal = TerminalGuard::enter()?;
        event_loop(&mut state, &mut ingestor, &mut terminal, &config)
    };

    ingestor.shutdown();
    tracing::info!(outcome = ?outcome.as_ref().map(outcome_name), "finished");
    outcome
}

fn outcome_name(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Selected(_) => "selected",
        Outcome::Cancelled => "cancelled",
        Outcome::NoItems => "no items",
    }
}

/// Pending redraw work.
#[derive(Debug, Default)]
struct Frame {
    dirty: bool,
    full: bool,
}

fn event_loop(
    state: &mut AppState,
    ingestor: &mut LineIngestor,
    terminal: &mut TerminalGuard,
    config: &Config,
) -> sift::Result<Outcome> {
    let tick = Duration::from_millis(config.tick_ms);
    let (mut cols, rows) = TerminalGuard::size()?;
    state.set_window_size(window_for(config.window_size, rows));

    let mut frame = Frame {
        dirty: true,
        full: true,
    };
    let mut batch = Vec::new();

    loop {
        let eof = ingestor.poll_lines(&mut batch);
        if !batch.is_empty() || (eof && !state.ingestion().is_ready()) {
            let lines = std::mem::take(&mut batch);
            if let Some(outcome) = dispatch(state, &Event::LinesReceived { lines, eof }, &mut frame)? {
                return Ok(outcome);
            }
        }

        if frame.dirty {
            render(&state.compute_viewmodel(), &state.theme, terminal.writer(), cols, frame.full)?;
            frame = Frame::default();
        }

        if !event::poll(tick)? {
            continue;
        }

        let term_event = event::read()?;
        if let TermEvent::Resize(new_cols, _) = term_event {
            cols = new_cols;
        }
        if let Some(event) = translate(term_event, config.window_size) {
            if let Some(outcome) = dispatch(state, &event, &mut frame)? {
                return Ok(outcome);
            }
        }
    }
}

/// Handles one event and carries out its actions. Returns the outcome once
/// an action ends the session.
fn dispatch(state: &mut AppState, event: &Event, frame: &mut Frame) -> sift::Result<Option<Outcome>> {
    let (should_render, actions) = handle_event(state, event)?;
    frame.dirty |= should_render;

    for action in actions {
        match action {
            Action::Emit(bytes) => return Ok(Some(Outcome::Selected(bytes))),
            Action::Quit => return Ok(Some(Outcome::Cancelled)),
            Action::NoItems => return Ok(Some(Outcome::NoItems)),
            Action::Relayout => {
                frame.dirty = true;
                frame.full = true;
            }
        }
    }
    Ok(None)
}

/// Maps a terminal event to a library event, if it has a meaning.
fn translate(event: TermEvent, configured_window: usize) -> Option<Event> {
    match event {
        TermEvent::Key(key) => translate_key(key),
        TermEvent::Paste(text) => Some(Event::Paste(text)),
        TermEvent::Resize(_, rows) => Some(Event::Resize {
            window: window_for(configured_window, rows),
        }),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<Event> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'g') => Some(Event::Cancel),
            KeyCode::Char('h') => Some(Event::Backspace),
            KeyCode::Char('w') => Some(Event::DeleteWord),
            KeyCode::Char('u') => Some(Event::ClearQuery),
            KeyCode::Char('p' | 'k') => Some(Event::MoveUp),
            KeyCode::Char('n' | 'j') => Some(Event::MoveDown),
            _ => None,
        };
    }

    let event = match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => Event::Char(c),
        KeyCode::Backspace => Event::Backspace,
        KeyCode::Enter => Event::Confirm,
        KeyCode::Esc => Event::Cancel,
        KeyCode::Up => Event::MoveUp,
        KeyCode::Down => Event::MoveDown,
        KeyCode::PageUp => Event::PageUp,
        KeyCode::PageDown => Event::PageDown,
        KeyCode::Home => Event::First,
        KeyCode::End => Event::Last,
        _ => return None,
    };
    Some(event)
}

/// Writes the selected line to stdout.
fn emit(bytes: &[u8]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(bytes)?;
    out.write_all(b"\n")?;
    out.flush()
}
