//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod character_store;
pub mod clock;
pub mod config;
pub mod ports;
