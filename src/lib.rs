//! Sift: an interactive line selector.
//!
//! Pipe lines in, type to narrow them by fuzzy subsequence matching, pick
//! one, and get it back on stdout:
//!
//! ```text
//! git branch --format='%(refname:short)' | sift | xargs git switch
//! ```
//!
//! Sift provides:
//! - Non-blocking ingestion: the list is usable while input is still arriving
//! - UTF-8 safe query editing with byte-exact matching for non-ASCII text
//! - An ordered post-filter hook chain, with a recency boost built in
//! - A persistent selection history backing that boost

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Main Loop (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Filter engine
//! │  - Event handling                                   │
//! │  - Filter pipeline and hooks                        │
//! │  - Selection and ingestion state                    │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - History log │   │ - Line reader │
//! │ - Theming     │   │ - Recency hook│   │ - Channel     │
//! │ - Terminal    │   │ - Backend API │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Items, query buffer, matcher (domain/)           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber                               │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Filter engine state machine with event/action model
//! - [`domain`]: Core types (items, query buffer, matcher, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`storage`]: Selection history and the recency boost hook
//! - [`worker`]: Background line reader
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: Logging setup
//!
//! # Configuration
//!
//! Read from `~/.config/sift/config.toml` (or `--config PATH`); every key is
//! optional and command-line flags override it:
//!
//! ```toml
//! window_size = 15
//! prompt = "❯ "
//! trace_level = "debug"
//!
//! [history]
//! max_entries = 200
//!
//! [colors]
//! selection_bg = "#313244"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use sift::{handle_event, initialize, Action, Config, Event};
//!
//! let mut config = Config::default();
//! config.history.enabled = false;
//! let mut state = initialize(&config);
//!
//! let batch = vec![b"cargo build".to_vec(), b"cargo test".to_vec()];
//! handle_event(&mut state, &Event::LinesReceived { lines: batch, eof: false })?;
//! handle_event(&mut state, &Event::LinesReceived { lines: vec![], eof: true })?;
//!
//! handle_event(&mut state, &Event::Char('t'))?;
//! let (_, actions) = handle_event(&mut state, &Event::Confirm)?;
//! assert_eq!(actions, vec![Action::Emit(b"cargo test".to_vec())]);
//! # Ok::<(), sift::SiftError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, IngestionState};
pub use domain::{Item, Result, SiftError};
pub use ui::Theme;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use storage::{FileHistory, RecencyBoost};

/// Runtime configuration.
///
/// Loaded from TOML with [`Config::load`]; missing keys take their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Longest accepted item in bytes; longer lines are cut at a character
    /// boundary. Default: 4096
    pub max_item_len: usize,

    /// Longest query in bytes. Default: 256
    pub max_query_len: usize,

    /// Rows shown at once, further limited by the terminal height.
    /// Default: 10
    pub window_size: usize,

    /// Main loop tick in milliseconds. Default: 33
    pub tick_ms: u64,

    /// Text drawn before the query. Default: `"> "`
    pub prompt: String,

    /// Log level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any
    /// `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Selection history and recency boost.
    pub history: HistoryConfig,

    /// Color scheme. See [`ui::theme`] for format.
    pub colors: Theme,
}

/// `[history]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Boost previously selected items and record new selections.
    /// Default: `true`
    pub enabled: bool,

    /// Log file. Default: `<data_dir>/sift/history`
    pub path: Option<PathBuf>,

    /// Entries kept. Default: 100
    pub max_entries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_item_len: 4096,
            max_query_len: 256,
            window_size: 10,
            tick_ms: 33,
            prompt: "> ".to_string(),
            trace_level: None,
            history: HistoryConfig::default(),
            colors: Theme::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            max_entries: 100,
        }
    }
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Config`] on malformed TOML, wrong value types or
    /// values that fail [`Config::validate`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use sift::Config;
    ///
    /// let config = Config::from_toml("window_size = 5\n[history]\nenabled = false")?;
    /// assert_eq!(config.window_size, 5);
    /// assert!(!config.history.enabled);
    /// assert_eq!(config.max_query_len, 256);
    /// # Ok::<(), sift::SiftError>(())
    /// ```
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| SiftError::Config(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = ?path, "loading config");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SiftError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&contents)
    }

    /// Loads `explicit` if given, else the default config file if it exists,
    /// else the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Config`] if an explicit file is missing, or if
    /// the chosen file cannot be parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = infrastructure::default_config_path();
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Checks that every size is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Config`] naming the first zero size.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("max_item_len", self.max_item_len),
            ("max_query_len", self.max_query_len),
            ("window_size", self.window_size),
            ("history.max_entries", self.history.max_entries),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, value)| *value == 0) {
            return Err(SiftError::Config(format!("{name} must be positive")));
        }
        if self.tick_ms == 0 {
            return Err(SiftError::Config("tick_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// Where the selection history is kept.
    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.history
            .path
            .clone()
            .unwrap_or_else(infrastructure::default_history_path)
    }
}

/// Builds the application state for `config`.
///
/// Registers the recency boost when history is enabled. A history that
/// cannot be read is logged and skipped; the selector still starts.
///
/// # Example
///
/// ```rust
/// use sift::{initialize, Config, IngestionState};
///
/// let mut config = Config::default();
/// config.history.enabled = false;
///
/// let state = initialize(&config);
/// assert_eq!(state.ingestion(), IngestionState::Loading { items_loaded: 0 });
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing sift");

    let mut state = AppState::new(config);

    if config.history.enabled {
        let path = config.history_path();
        let backend = FileHistory::new(&path, config.history.max_entries);
        match RecencyBoost::from_backend(Box::new(backend), config.history.max_entries) {
            Ok(hook) => {
                tracing::debug!(path = ?path, entries = hook.len(), "recency boost enabled");
                state.register_hook(Box::new(hook));
            }
            Err(e) => {
                tracing::warn!(error = %e, "history unavailable, recency boost disabled");
            }
        }
    }

    state
}
