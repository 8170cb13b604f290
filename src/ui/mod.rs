//! User interface rendering layer.
//!
//! This module turns application state into terminal output. It owns no
//! state of its own: every frame is drawn from a freshly computed view
//! model.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → crossterm commands → stderr
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Frame drawing
//! - [`terminal`]: Raw mode and alternate screen guard, window sizing
//! - [`theme`]: Color scheme definitions

pub mod renderer;
pub mod terminal;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use terminal::{window_for, TerminalGuard};
pub use theme::Theme;
pub use viewmodel::{DisplayItem, PromptInfo, Segment, StatusInfo, UIViewModel};
