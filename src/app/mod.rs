//! Application layer coordinating state, events, and actions.
//!
//! This module is the filter engine proper: it sits between the main loop
//! (`main.rs`) and the domain, storage and worker layers.
//!
//! # Architecture
//!
//! ```text
//! Terminal Input / Reader Batches → Events → handle_event → State Mutations → Actions
//!                                                  │
//!                      recompute: filter → hooks → selection clamp
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filter`]: Full-rescan filter pipeline
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`hooks`]: Post-filter hook trait and ordered registry
//! - [`modes`]: Ingestion state machine
//! - [`selection`]: Selection and scroll invariants
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use sift::app::{handle_event, AppState, Event};
//! use sift::Config;
//!
//! let mut state = AppState::new(&Config::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::MoveDown)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod filter;
pub mod handler;
pub mod hooks;
pub mod modes;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use filter::FilterPipeline;
pub use handler::{handle_event, Event};
pub use hooks::{HookRegistry, PostFilterHook};
pub use modes::{IngestionState, IngestionTracker};
pub use selection::Selection;
pub use state::{Absorbed, AppState};
