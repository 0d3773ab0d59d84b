//! Durable storage boundary
//!
//! The pipeline never touches a concrete storage mechanism. Session state is
//! read and written through [`KeyValueStore`], one JSON document per
//! [`StoredKey`], via typed [`Repository`] handles.
//!
//! Cached data is best-effort: a missing key loads as the type's default and
//! a malformed document is logged and treated as missing.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::goals::Milestones;
use crate::import::ImportRecord;
use crate::models::{OtherIncomeEntry, RawRow, SpendBook};

/// String-keyed persistent storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Logical keys of the persisted session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoredKey {
    RawRows,
    OtherIncomes,
    Goals,
    SpendBySubId,
    TotalAdSpend,
    LastImport,
}

impl StoredKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoredKey::RawRows => "aff_raw_rows",
            StoredKey::OtherIncomes => "aff_other_incomes",
            StoredKey::Goals => "extracom_goals",
            StoredKey::SpendBySubId => "aff_spend_by_sub",
            StoredKey::TotalAdSpend => "aff_total_ad_spend",
            StoredKey::LastImport => "aff_last_import",
        }
    }

    pub fn all() -> &'static [StoredKey] {
        &[
            StoredKey::RawRows,
            StoredKey::OtherIncomes,
            StoredKey::Goals,
            StoredKey::SpendBySubId,
            StoredKey::TotalAdSpend,
            StoredKey::LastImport,
        ]
    }
}

impl fmt::Display for StoredKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed load/save/clear access to one key
pub struct Repository<'s, T> {
    store: &'s dyn KeyValueStore,
    key: StoredKey,
    _value: PhantomData<fn() -> T>,
}

impl<'s, T> Repository<'s, T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(store: &'s dyn KeyValueStore, key: StoredKey) -> Self {
        Self {
            store,
            key,
            _value: PhantomData,
        }
    }

    /// Absent ⇒ default; malformed JSON ⇒ warning and default
    ///
    /// Only failures of the store itself are returned as errors.
    pub fn load(&self) -> Result<T> {
        let Some(raw) = self.store.get(self.key.as_str())? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key = self.key.as_str(), error = %e, "Ignoring malformed stored value");
                Ok(T::default())
            }
        }
    }

    pub fn save(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(self.key.as_str(), &json)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(self.key.as_str())
    }
}

pub fn raw_rows(store: &dyn KeyValueStore) -> Repository<'_, Vec<RawRow>> {
    Repository::new(store, StoredKey::RawRows)
}

pub fn other_incomes(store: &dyn KeyValueStore) -> Repository<'_, Vec<OtherIncomeEntry>> {
    Repository::new(store, StoredKey::OtherIncomes)
}

pub fn goals(store: &dyn KeyValueStore) -> Repository<'_, Milestones> {
    Repository::new(store, StoredKey::Goals)
}

pub fn spend_by_subid(store: &dyn KeyValueStore) -> Repository<'_, SpendBook> {
    Repository::new(store, StoredKey::SpendBySubId)
}

pub fn total_ad_spend(store: &dyn KeyValueStore) -> Repository<'_, Option<String>> {
    Repository::new(store, StoredKey::TotalAdSpend)
}

pub fn last_import(store: &dyn KeyValueStore) -> Repository<'_, Option<ImportRecord>> {
    Repository::new(store, StoredKey::LastImport)
}
