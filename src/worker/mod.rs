//! Background input reading.
//!
//! Input is read on its own thread so a slow or endless producer never
//! blocks the interface. Lines cross to the main loop by value over a
//! channel; no state is shared.
//!
//! - `ingestor`: Reader thread, line splitting and non-blocking draining

pub mod ingestor;

pub use ingestor::LineIngestor;
