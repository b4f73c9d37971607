//! Common utility functions shared across the domain and the engine.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **No dependencies** beyond std

pub mod markdown;
pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use markdown::{escape_markdown, keep_escaped, unescape_markdown};
pub use string::{names_match, some_if_not_blank};
