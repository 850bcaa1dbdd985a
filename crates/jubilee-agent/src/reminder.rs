//! Daily birthday check, triggered by the webhook endpoint.

use chrono::{Duration, NaiveDateTime};
use tracing::info;

use jubilee_core::types::Birthday;
use jubilee_store::store::BirthdayStore;

/// Outcome of one daily sweep over the store.
#[derive(Debug, Clone, Default)]
pub struct DailyCheck {
    pub today: Vec<Birthday>,
    pub tomorrow: Vec<Birthday>,
}

impl DailyCheck {
    pub fn is_quiet(&self) -> bool {
        self.today.is_empty() && self.tomorrow.is_empty()
    }
}

/// Sweep the store for birthdays falling today or tomorrow.
pub fn run_daily_check(store: &BirthdayStore, now: NaiveDateTime) -> DailyCheck {
    let today_date = now.date();
    let tomorrow_date = today_date + Duration::days(1);

    let check = DailyCheck {
        today: store.today(today_date),
        tomorrow: store.today(tomorrow_date),
    };

    for record in &check.today {
        info!(name = %record.name, "Birthday is today");
    }
    for record in &check.tomorrow {
        info!(name = %record.name, "Birthday is tomorrow");
    }
    if check.is_quiet() {
        info!("Daily check complete; no birthdays today or tomorrow");
    }

    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, BirthdayStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = BirthdayStore::open(dir.path().join("birthdays.json"));
        (dir, store)
    }

    #[test]
    fn test_daily_check_buckets() {
        let (_dir, store) = temp_store();
        store.insert("Today", "2000-06-01").unwrap();
        store.insert("Tomorrow", "2000-06-02").unwrap();
        store.insert("Later", "2000-07-01").unwrap();

        let check = run_daily_check(&store, at(2024, 6, 1));
        assert_eq!(check.today.len(), 1);
        assert_eq!(check.today[0].name, "Today");
        assert_eq!(check.tomorrow.len(), 1);
        assert_eq!(check.tomorrow[0].name, "Tomorrow");
    }

    #[test]
    fn test_daily_check_quiet() {
        let (_dir, store) = temp_store();
        store.insert("Later", "2000-07-01").unwrap();

        let check = run_daily_check(&store, at(2024, 6, 1));
        assert!(check.is_quiet());
    }

    #[test]
    fn test_daily_check_month_rollover() {
        let (_dir, store) = temp_store();
        store.insert("FirstOfJuly", "2000-07-01").unwrap();

        let check = run_daily_check(&store, at(2024, 6, 30));
        assert_eq!(check.tomorrow.len(), 1);
    }
}
