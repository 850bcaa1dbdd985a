//! Intent routing and date extraction for the Jubilee assistant.
//!
//! The decision core of the system: free-form text comes in, an intent is
//! assigned by an ordered rule cascade, dates and names are pulled out by
//! layered patterns, and a user-facing message goes back out through a
//! protocol-shaped envelope. Everything else in the repository is plumbing
//! around this crate.

pub mod card;
pub mod envelope;
pub mod parser;
pub mod reminder;
pub mod responder;
pub mod types;
