use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use jubilee_core::error::JubileeError;
use jubilee_core::types::{parse_birth_date, Birthday};

/// Errors from the birthday store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl From<StoreError> for JubileeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidDate(d) => JubileeError::InvalidDate(d),
            StoreError::Persistence(msg) => JubileeError::Store(msg),
        }
    }
}

/// Reader/writer-locked birthday collection with a JSON file behind it.
///
/// The store exclusively owns the record map; `list` and the query helpers
/// hand out copies, never references into the map.
pub struct BirthdayStore {
    inner: RwLock<HashMap<Uuid, Birthday>>,
    path: PathBuf,
}

impl BirthdayStore {
    /// Open a store backed by the given file, loading any existing records.
    ///
    /// A missing or unreadable file starts the store empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = load_records(&path);
        info!(path = %path.display(), count = records.len(), "Birthday store opened");
        Self {
            inner: RwLock::new(records),
            path,
        }
    }

    /// Validate the date, insert a new record, and persist synchronously.
    ///
    /// The file is written inside the write critical section, so a record is
    /// never acknowledged before it is durable.
    pub fn insert(&self, name: &str, date: &str) -> Result<Uuid, StoreError> {
        let (month, day) = parse_birth_date(date)
            .map_err(|_| StoreError::InvalidDate(date.to_string()))?;

        let record = Birthday::new(name, month, day);
        let id = record.id;

        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.insert(id, record);
        persist(&self.path, &map)?;
        drop(map);

        debug!(%id, name, month, day, "Birthday stored");
        Ok(id)
    }

    /// Snapshot of all records, unspecified order.
    pub fn list(&self) -> Vec<Birthday> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.values().cloned().collect()
    }

    /// Look up a single record by id.
    pub fn find(&self, id: Uuid) -> Option<Birthday> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(&id).cloned()
    }

    /// Records whose (month, day) equals the given calendar day.
    pub fn today(&self, date: NaiveDate) -> Vec<Birthday> {
        self.list()
            .into_iter()
            .filter(|b| b.matches_day(date))
            .collect()
    }

    /// Records inside the 30-day forward window (excluding today).
    pub fn upcoming(&self, now: NaiveDateTime) -> Vec<Birthday> {
        self.list()
            .into_iter()
            .filter(|b| b.is_upcoming(now))
            .collect()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn load_records(path: &Path) -> HashMap<Uuid, Birthday> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(_) => return HashMap::new(),
    };
    match serde_json::from_slice(&data) {
        Ok(records) => records,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not parse store file; starting empty");
            HashMap::new()
        }
    }
}

fn persist(path: &Path, records: &HashMap<Uuid, Birthday>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Persistence(e.to_string()))?;
        }
    }
    let data = serde_json::to_vec_pretty(records)
        .map_err(|e| StoreError::Persistence(e.to_string()))?;
    std::fs::write(path, data).map_err(|e| StoreError::Persistence(e.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
