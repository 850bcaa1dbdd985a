//! Persistent birthday store.
//!
//! An in-memory map guarded by a reader/writer lock, flushed to a JSON file
//! on every successful insert. Readers always see complete snapshots.

pub mod store;

pub use store::{BirthdayStore, StoreError};
