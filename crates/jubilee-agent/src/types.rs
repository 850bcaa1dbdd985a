//! Transient types produced while routing a single message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The single classified purpose of an inbound text message.
///
/// Exists only for the duration of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// A remember request that carries a date-shaped substring.
    RememberWithDate,
    /// A request to generate a birthday wish.
    GenerateWish,
    /// Enumerate all stored birthdays.
    ListAll,
    /// Enumerate birthdays in the 30-day forward window.
    ListUpcoming,
    /// Enumerate birthdays falling on today's calendar day.
    ListToday,
    /// A remember request with no date to store.
    RememberNoDate,
    /// A bare date with no remember keyword.
    DateOnly,
    /// Nothing matched; answered with guidance.
    Unknown,
}

impl Intent {
    /// Returns a short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::RememberWithDate => "remember_with_date",
            Intent::GenerateWish => "generate_wish",
            Intent::ListAll => "list_all",
            Intent::ListUpcoming => "list_upcoming",
            Intent::ListToday => "list_today",
            Intent::RememberNoDate => "remember_no_date",
            Intent::DateOnly => "date_only",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parameters pulled out of the raw message text. Transient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedParams {
    /// ISO-like calendar string, e.g. "2005-01-01".
    pub date: Option<String>,
    /// Person name following a "for"/"to" token.
    pub name: Option<String>,
}

/// Where a wish's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WishSource {
    /// Produced by the wish-generation capability.
    Generated,
    /// Produced by the canned local template.
    Fallback,
}

impl WishSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WishSource::Generated => "generated",
            WishSource::Fallback => "fallback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_labels() {
        assert_eq!(Intent::RememberWithDate.label(), "remember_with_date");
        assert_eq!(Intent::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_intent_serde_snake_case() {
        let json = serde_json::to_string(&Intent::ListUpcoming).unwrap();
        assert_eq!(json, "\"list_upcoming\"");
    }

    #[test]
    fn test_wish_source_str() {
        assert_eq!(WishSource::Generated.as_str(), "generated");
        assert_eq!(WishSource::Fallback.as_str(), "fallback");
    }
}
