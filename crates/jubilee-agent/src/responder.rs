//! Per-intent response composition.
//!
//! Every branch terminates in a user-visible message; there is no fatal
//! error path here. Store failures become plain-language apologies and
//! provider failures are recovered with the canned fallback wish.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use tracing::{info, warn};

use jubilee_core::types::{month_name, parse_birth_date, Birthday};
use jubilee_store::store::BirthdayStore;
use jubilee_wish::fallback::fallback_wish;
use jubilee_wish::provider::WishProvider;

use crate::parser::{classify, extract_date, extract_name, normalize};
use crate::types::{Intent, WishSource};

/// Routes one inbound text message to a reply.
///
/// Holds the two collaborators the composer may consult: the record store
/// and the (optional) wish-generation capability. An absent capability is a
/// valid configuration; every wish request then takes the fallback path.
pub struct Responder {
    store: Arc<BirthdayStore>,
    wish: Option<Arc<dyn WishProvider>>,
}

impl Responder {
    pub fn new(store: Arc<BirthdayStore>, wish: Option<Arc<dyn WishProvider>>) -> Self {
        Self { store, wish }
    }

    /// Classify, extract, handle, and compose a reply for one message.
    pub async fn handle_text(&self, raw_text: &str) -> String {
        self.handle_text_at(raw_text, Utc::now().naive_utc()).await
    }

    /// Same as `handle_text` with an explicit clock, so window behavior is
    /// testable.
    pub async fn handle_text_at(&self, raw_text: &str, now: NaiveDateTime) -> String {
        let intent = classify(&normalize(raw_text));
        info!(intent = %intent, "Message classified");

        match intent {
            Intent::RememberWithDate => self.remember(raw_text),
            Intent::GenerateWish => self.wish_reply(raw_text).await,
            Intent::ListUpcoming => self.list_upcoming(now),
            Intent::ListAll => self.list_all(),
            Intent::ListToday => self.list_today(now),
            Intent::RememberNoDate => {
                "I'd love to remember your birthday! Please tell me the date in \
                 YYYY-MM-DD format (like 2005-01-01) and I'll store it for you."
                    .to_string()
            }
            Intent::DateOnly => {
                // The classifier's date check is looser than extraction's
                // word-bounded one, so echo the raw text when no clean date
                // can be pulled out.
                let date =
                    extract_date(raw_text).unwrap_or_else(|| raw_text.trim().to_string());
                format!(
                    "I see you provided a date: {date}. To store this as a birthday, \
                     please also provide a name. For example: 'Remember Alice's \
                     birthday is {date}'"
                )
            }
            Intent::Unknown => {
                "Hello! I'm Jubilee, your birthday assistant. I can help you with:\n\
                 - Generate birthday wishes\n\
                 - Remember birthdays\n\
                 - List stored birthdays\n\
                 - Show upcoming birthdays\n\n\
                 Try asking me to 'remember my birthday 2005-01-01' or 'generate a \
                 birthday wish'!"
                    .to_string()
            }
        }
    }

    fn remember(&self, raw_text: &str) -> String {
        let date = match extract_date(raw_text) {
            Some(date) => date,
            None => {
                return "I'd love to remember your birthday! Please tell me the date in \
                        YYYY-MM-DD format (like 2005-01-01) and I'll store it for you."
                    .to_string()
            }
        };
        let name = extract_name(raw_text).unwrap_or_else(|| "User".to_string());

        match self.store.insert(&name, &date) {
            Ok(id) => {
                info!(%id, name, date, "Birthday stored from message");
                // The insert already validated the date, so this re-parse holds.
                match parse_birth_date(&date) {
                    Ok((month, day)) => format!(
                        "Perfect! I've remembered your birthday is on {} {}. I'll make \
                         sure to wish you a happy birthday!",
                        month_name(month),
                        day
                    ),
                    Err(_) => format!(
                        "Great! I've stored your birthday ({date}). I'll remember to \
                         celebrate with you!"
                    ),
                }
            }
            Err(err) => {
                warn!(error = %err, date, "Birthday insert failed");
                format!("Sorry, I couldn't store your birthday. Error: {err}")
            }
        }
    }

    async fn wish_reply(&self, raw_text: &str) -> String {
        let name = extract_name(raw_text);
        let (wish, source) = self.generate_wish(name.as_deref()).await;
        info!(source = source.as_str(), "Birthday wish composed");
        wish
    }

    /// Generate a wish, falling back to the canned template when the
    /// capability is absent or fails. Returns the text and its source tag.
    pub async fn generate_wish(&self, name: Option<&str>) -> (String, WishSource) {
        let provider = match &self.wish {
            Some(provider) => provider,
            None => return (fallback_wish(name), WishSource::Fallback),
        };

        // A nameless request still gets a personalised prompt.
        let prompt_name = name.unwrap_or("friend");
        match provider.generate(prompt_name).await {
            Ok(wish) => (wish, WishSource::Generated),
            Err(err) => {
                warn!(error = %err, "Wish provider failed; using fallback");
                (fallback_wish(name), WishSource::Fallback)
            }
        }
    }

    /// Age-aware variant of `generate_wish`.
    pub async fn generate_wish_with_age(&self, name: &str, age: u32) -> (String, WishSource) {
        let provider = match &self.wish {
            Some(provider) => provider,
            None => return (fallback_wish(Some(name)), WishSource::Fallback),
        };

        match provider.generate_with_age(name, age).await {
            Ok(wish) => (wish, WishSource::Generated),
            Err(err) => {
                warn!(error = %err, "Wish provider failed; using fallback");
                (fallback_wish(Some(name)), WishSource::Fallback)
            }
        }
    }

    fn list_all(&self) -> String {
        let mut records = self.store.list();
        if records.is_empty() {
            return "No birthdays stored yet! Ask me to 'remember your birthday' to \
                    get started."
                .to_string();
        }
        records.sort_by(|a, b| (a.month, a.day).cmp(&(b.month, b.day)));

        let mut reply = format!("Stored Birthdays ({} total):\n\n", records.len());
        for record in &records {
            reply.push_str(&format!("- {}\n", format_record(record)));
        }
        reply
    }

    fn list_upcoming(&self, now: NaiveDateTime) -> String {
        let mut upcoming = self.store.upcoming(now);
        if upcoming.is_empty() {
            return "No upcoming birthdays in the next 30 days! All your saved \
                    birthdays are further away or already passed this year."
                .to_string();
        }
        upcoming.sort_by_key(|b| b.days_until(now));

        let mut reply = String::from("Upcoming Birthdays (next 30 days):\n\n");
        for record in &upcoming {
            let days = record.days_until(now);
            if days == 1 {
                reply.push_str(&format!("- {} - tomorrow ({})\n", record.name, format_day(record)));
            } else {
                reply.push_str(&format!(
                    "- {} - in {} days ({})\n",
                    record.name,
                    days,
                    format_day(record)
                ));
            }
        }
        reply
    }

    fn list_today(&self, now: NaiveDateTime) -> String {
        let today = self.store.today(now.date());
        if today.is_empty() {
            return "No birthdays today.".to_string();
        }

        let mut reply = String::from("Birthdays today:\n\n");
        for record in &today {
            reply.push_str(&format!("- {} - TODAY! ({})\n", record.name, format_day(record)));
        }
        reply
    }
}

fn format_record(record: &Birthday) -> String {
    format!("{}: {}", record.name, format_day(record))
}

fn format_day(record: &Birthday) -> String {
    format!("{} {}", record.month_name(), record.day)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use jubilee_wish::error::WishError;

    struct CannedProvider(&'static str);

    #[async_trait]
    impl WishProvider for CannedProvider {
        async fn generate(&self, name: &str) -> Result<String, WishError> {
            Ok(format!("{} {}", self.0, name))
        }

        async fn generate_with_age(&self, name: &str, age: u32) -> Result<String, WishError> {
            Ok(format!("{} {} at {}", self.0, name, age))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl WishProvider for FailingProvider {
        async fn generate(&self, _name: &str) -> Result<String, WishError> {
            Err(WishError::EmptyResponse)
        }

        async fn generate_with_age(&self, _name: &str, _age: u32) -> Result<String, WishError> {
            Err(WishError::EmptyResponse)
        }
    }

    fn responder(wish: Option<Arc<dyn WishProvider>>) -> (tempfile::TempDir, Responder) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(BirthdayStore::open(dir.path().join("birthdays.json")));
        (dir, Responder::new(store, wish))
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    // ---- Remember ----

    #[tokio::test]
    async fn test_remember_confirms_month_and_day() {
        let (_dir, responder) = responder(None);
        let reply = responder.handle_text("remember my birthday 2005-01-01").await;
        assert!(reply.contains("January"));
        assert!(reply.contains("1"));
        assert!(reply.contains("remembered"));
    }

    #[tokio::test]
    async fn test_remember_invalid_calendar_date_apologises() {
        let (_dir, responder) = responder(None);
        let reply = responder.handle_text("remember my birthday 2005-13-45").await;
        assert!(reply.contains("Sorry"));
        assert!(reply.contains("couldn't store"));
    }

    #[tokio::test]
    async fn test_remember_uses_extracted_name() {
        let (_dir, responder) = responder(None);
        responder
            .handle_text("remember 2005-01-01 for alice")
            .await;
        let records = responder.store.list();
        assert_eq!(records[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_remember_defaults_name_to_user() {
        let (_dir, responder) = responder(None);
        responder.handle_text("remember my birthday 2005-01-01").await;
        assert_eq!(responder.store.list()[0].name, "User");
    }

    // ---- Wish ----

    #[tokio::test]
    async fn test_wish_without_provider_falls_back() {
        let (_dir, responder) = responder(None);
        let reply = responder.handle_text("generate a birthday wish").await;
        assert!(reply.starts_with("Happy Birthday!"));
    }

    #[tokio::test]
    async fn test_wish_with_provider_and_name() {
        let (_dir, responder) = responder(Some(Arc::new(CannedProvider("Cheers"))));
        let reply = responder.handle_text("birthday wish for alice").await;
        assert_eq!(reply, "Cheers Alice");
    }

    #[tokio::test]
    async fn test_wish_with_provider_no_name_uses_friend() {
        let (_dir, responder) = responder(Some(Arc::new(CannedProvider("Cheers"))));
        let reply = responder.handle_text("generate a birthday wish").await;
        assert_eq!(reply, "Cheers friend");
    }

    #[tokio::test]
    async fn test_wish_provider_failure_falls_back() {
        let (_dir, responder) = responder(Some(Arc::new(FailingProvider)));
        let reply = responder.handle_text("birthday wish for bob").await;
        assert!(reply.contains("Happy Birthday, Bob!"));
    }

    #[tokio::test]
    async fn test_generate_wish_source_tags() {
        let (_dir, fallback) = responder(None);
        let (_, source) = fallback.generate_wish(Some("Alice")).await;
        assert_eq!(source, WishSource::Fallback);

        let (_dir2, generated) = responder(Some(Arc::new(CannedProvider("Hey"))));
        let (_, source) = generated.generate_wish(Some("Alice")).await;
        assert_eq!(source, WishSource::Generated);
    }

    #[tokio::test]
    async fn test_generate_wish_with_age() {
        let (_dir, responder) = responder(Some(Arc::new(CannedProvider("Hey"))));
        let (wish, source) = responder.generate_wish_with_age("Bob", 30).await;
        assert_eq!(wish, "Hey Bob at 30");
        assert_eq!(source, WishSource::Generated);
    }

    // ---- Listings ----

    #[tokio::test]
    async fn test_list_all_empty() {
        let (_dir, responder) = responder(None);
        let reply = responder.handle_text("list my birthdays").await;
        assert!(reply.contains("No birthdays stored yet"));
    }

    #[tokio::test]
    async fn test_list_all_line_per_record() {
        let (_dir, responder) = responder(None);
        responder.store.insert("Alice", "2005-01-01").unwrap();
        responder.store.insert("Bob", "1995-12-25").unwrap();

        let reply = responder.handle_text("list my birthdays").await;
        assert!(reply.contains("2 total"));
        assert!(reply.contains("- Alice: January 1"));
        assert!(reply.contains("- Bob: December 25"));
    }

    #[tokio::test]
    async fn test_list_upcoming_window() {
        let (_dir, responder) = responder(None);
        responder.store.insert("Inside", "2000-06-15").unwrap();
        responder.store.insert("TooFar", "2000-08-15").unwrap();

        let reply = responder
            .handle_text_at("list upcoming birthdays", at(2024, 6, 1))
            .await;
        assert!(reply.contains("Inside - in 14 days (June 15)"));
        assert!(!reply.contains("TooFar"));
    }

    #[tokio::test]
    async fn test_list_upcoming_excludes_today() {
        let (_dir, responder) = responder(None);
        responder.store.insert("Today", "2000-06-01").unwrap();

        let reply = responder
            .handle_text_at("list upcoming birthdays", at(2024, 6, 1))
            .await;
        assert!(reply.contains("No upcoming birthdays"));
    }

    #[tokio::test]
    async fn test_list_upcoming_tomorrow_wording() {
        let (_dir, responder) = responder(None);
        responder.store.insert("Soon", "2000-06-02").unwrap();

        let reply = responder
            .handle_text_at("list upcoming birthdays", at(2024, 6, 1))
            .await;
        assert!(reply.contains("Soon - tomorrow (June 2)"));
    }

    #[tokio::test]
    async fn test_list_today() {
        let (_dir, responder) = responder(None);
        responder.store.insert("Alice", "2000-06-01").unwrap();

        let reply = responder.list_today(at(2024, 6, 1));
        assert!(reply.contains("Alice - TODAY! (June 1)"));
    }

    #[tokio::test]
    async fn test_list_today_empty() {
        let (_dir, responder) = responder(None);
        assert_eq!(responder.list_today(at(2024, 6, 1)), "No birthdays today.");
    }

    // ---- Guidance branches ----

    #[tokio::test]
    async fn test_remember_no_date_guidance() {
        let (_dir, responder) = responder(None);
        let reply = responder.handle_text("remember my birthday").await;
        assert!(reply.contains("YYYY-MM-DD"));
    }

    #[tokio::test]
    async fn test_date_only_guidance_echoes_date() {
        let (_dir, responder) = responder(None);
        let reply = responder.handle_text("2005-01-01").await;
        assert!(reply.contains("I see you provided a date: 2005-01-01"));
    }

    #[tokio::test]
    async fn test_date_only_without_clean_date_echoes_raw_text() {
        // No word boundary before the digits, so extraction finds nothing;
        // the guidance echoes the whole message instead of an empty date.
        let (_dir, responder) = responder(None);
        let reply = responder.handle_text("x2005-01-01").await;
        assert!(reply.contains("I see you provided a date: x2005-01-01"));
        assert!(!reply.contains("date: ."));
    }

    #[tokio::test]
    async fn test_unknown_lists_capabilities() {
        let (_dir, responder) = responder(None);
        let reply = responder.handle_text("hello there").await;
        assert!(reply.contains("Generate birthday wishes"));
        assert!(reply.contains("remember my birthday 2005-01-01"));
    }
}
