//! Intent classification and parameter extraction.
//!
//! Classification is a priority-ordered rule cascade over normalized text:
//! first match wins, no backtracking. Extraction runs against the
//! original-case text. No ML, no tokenization models; a small fixed rule
//! set, deliberately.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{ExtractedParams, Intent};

// Date-shaped substring check used by classification. Deliberately loose:
// it is a shape test, not calendar validation.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{1,2}-\d{1,2}").expect("Invalid date regex"));

// Word-bounded form used by extraction, so the match is already a bare date
// with any prefix ("- ", "birthday ") left behind.
static DATE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}-\d{1,2}-\d{1,2}\b").expect("Invalid date token regex"));

/// Trim and lower-case text ahead of classification.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn has_date(text: &str) -> bool {
    DATE_RE.is_match(text)
}

fn has_remember_keyword(text: &str) -> bool {
    text.contains("remember") || text.contains("my birthday")
}

fn has_wish_keyword(text: &str) -> bool {
    text.contains("birthday wish")
        || text.contains("wish")
        || text.contains("generate")
        || text.contains("random")
}

fn has_list_keyword(text: &str) -> bool {
    text.contains("list") || text.contains("show birthdays")
}

fn has_upcoming_keyword(text: &str) -> bool {
    text.contains("upcoming") || text.contains("coming up")
}

/// Classify normalized text into exactly one intent.
///
/// The cascade order is the contract: an explicit date+remember phrase must
/// never be swallowed by the wish branch even when "wish" also appears, and
/// "upcoming" alone is not a request to enumerate. Pure: same input, same
/// intent, every time.
pub fn classify(normalized: &str) -> Intent {
    let date = has_date(normalized);
    let remember = has_remember_keyword(normalized);

    if remember && date {
        Intent::RememberWithDate
    } else if has_wish_keyword(normalized) {
        Intent::GenerateWish
    } else if has_upcoming_keyword(normalized) && has_list_keyword(normalized) {
        Intent::ListUpcoming
    } else if has_list_keyword(normalized) {
        Intent::ListAll
    } else if remember {
        Intent::RememberNoDate
    } else if date {
        Intent::DateOnly
    } else {
        Intent::Unknown
    }
}

/// Pull the first date-shaped substring out of the original-case text.
///
/// Dash-prefixed ("- 2003-09-09") and "birthday"-prefixed dates both
/// contain a word-bounded bare date, so a single first-match-wins scan
/// covers every prefix form.
pub fn extract_date(raw_text: &str) -> Option<String> {
    DATE_TOKEN_RE
        .find(raw_text)
        .map(|m| m.as_str().to_string())
}

/// Pull a person name out of the text: the token after "for" or "to",
/// first character upper-cased, remainder lower-cased.
pub fn extract_name(raw_text: &str) -> Option<String> {
    let tokens: Vec<&str> = raw_text.split_whitespace().collect();
    for pair in tokens.windows(2) {
        if pair[0].eq_ignore_ascii_case("for") || pair[0].eq_ignore_ascii_case("to") {
            return Some(capitalize(pair[1]));
        }
    }
    None
}

/// Extract both parameters in one pass.
pub fn extract_params(raw_text: &str) -> ExtractedParams {
    ExtractedParams {
        date: extract_date(raw_text),
        name: extract_name(raw_text),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

// =============================================================================
// Tests
// =============================================================================
