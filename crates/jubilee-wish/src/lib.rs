//! Wish-generation capability.
//!
//! An opaque, fallible text generator behind the [`WishProvider`] trait.
//! The Gemini-backed client lives here together with the canned fallback
//! every caller drops to when the provider is absent or fails.

pub mod error;
pub mod fallback;
pub mod gemini;
pub mod provider;

pub use error::WishError;
pub use fallback::fallback_wish;
pub use gemini::GeminiClient;
pub use provider::WishProvider;
