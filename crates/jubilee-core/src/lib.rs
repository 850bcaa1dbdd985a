//! Core types shared across the Jubilee birthday assistant.
//!
//! Defines the birthday record, recurring-occurrence date math,
//! configuration, and the top-level error type.

pub mod config;
pub mod error;
pub mod types;
