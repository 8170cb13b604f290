//! Domain layer for sift.
//!
//! This module holds the byte-level building blocks of the filter engine,
//! independent of threads, terminals or storage.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: The immutable input line and UTF-8 boundary computation
//! - [`query`]: The UTF-8 safe, capacity-limited query buffer
//! - [`matcher`]: The fuzzy subsequence predicate
//!
//! # Examples
//!
//! ```
//! use sift::domain::{fuzzy_match, Item, QueryBuffer};
//!
//! let item = Item::from_line(b"  src/app/state.rs  ", 256).unwrap();
//! let mut query = QueryBuffer::new(32);
//! query.append(b"sas");
//! assert!(fuzzy_match(item.as_bytes(), query.as_bytes()));
//! ```

pub mod error;
pub mod item;
pub mod matcher;
pub mod query;

pub use error::{Result, SiftError};
pub use item::{find_utf8_boundary, Item};
pub use matcher::{fuzzy_match, match_positions};
pub use query::QueryBuffer;
