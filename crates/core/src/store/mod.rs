//! In-memory data store backing the mock API
//!
//! All entity data lives in a [`DataStore`] value owned by the caller. Nothing
//! is global, so every test (or console session) gets an isolated store.

mod collection;
mod filter;
pub mod seed;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::StoreConfig;
use crate::models::{
    AccessKey, Adam, DashboardData, GuardReaderMapping, KeyAssignmentRow, Pass, Reader,
    SessionLogRow, User, Visitor, Zone,
};

pub use collection::{Collection, Record};
pub use filter::{Page, Pagination, VisitorFilter, DEFAULT_PAGE_SIZE};

impl Record for User {
    const ENTITY: &'static str = "User";

    fn id(&self) -> u64 {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_on = now;
    }
}

impl Record for Visitor {
    const ENTITY: &'static str = "Visitor";

    fn id(&self) -> u64 {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_on = now;
    }
}

impl Record for Zone {
    const ENTITY: &'static str = "Zone";

    fn id(&self) -> u64 {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_on = now;
    }
}

impl Record for AccessKey {
    const ENTITY: &'static str = "Key";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Pass {
    const ENTITY: &'static str = "Pass";

    fn id(&self) -> u64 {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_on = now;
    }
}

impl Record for GuardReaderMapping {
    const ENTITY: &'static str = "Guard reader mapping";

    fn id(&self) -> u64 {
        self.id
    }
}

/// Entity collections plus the fixed report datasets
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    pub(crate) users: Collection<User>,
    pub(crate) visitors: Collection<Visitor>,
    pub(crate) zones: Collection<Zone>,
    pub(crate) keys: Collection<AccessKey>,
    pub(crate) passes: Collection<Pass>,
    pub(crate) guard_reader_mappings: Collection<GuardReaderMapping>,
    pub(crate) readers: Vec<Reader>,
    pub(crate) adams: Vec<Adam>,
    pub(crate) dashboard: DashboardData,
    pub(crate) user_sessions: Vec<SessionLogRow>,
    pub(crate) zone_tracking: Vec<SessionLogRow>,
    pub(crate) key_assignments: Vec<KeyAssignmentRow>,
    pub(crate) page_size: usize,
}

impl DataStore {
    /// Store with no records at all
    pub fn empty() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            ..Self::default()
        }
    }

    /// Store loaded with the demo datasets
    pub fn seeded() -> Self {
        let store = Self {
            users: Collection::from_records(seed::users()),
            visitors: Collection::from_records(seed::visitors()),
            zones: Collection::from_records(seed::zones()),
            keys: Collection::from_records(seed::keys()),
            passes: Collection::from_records(seed::passes()),
            guard_reader_mappings: Collection::new(),
            readers: seed::readers(),
            adams: seed::adams(),
            dashboard: seed::dashboard(),
            user_sessions: seed::user_sessions(),
            zone_tracking: seed::zone_tracking(),
            key_assignments: seed::key_assignments(),
            page_size: DEFAULT_PAGE_SIZE,
        };
        info!(
            users = store.users.len(),
            visitors = store.visitors.len(),
            zones = store.zones.len(),
            keys = store.keys.len(),
            passes = store.passes.len(),
            "Loaded demo data"
        );
        store
    }

    /// Store shaped by configuration
    pub fn from_config(config: &StoreConfig) -> Self {
        let mut store = if config.seed {
            Self::seeded()
        } else {
            Self::empty()
        };
        store.page_size = Pagination::new(0, config.page_size).limit;
        store
    }

    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub fn visitors(&self) -> &Collection<Visitor> {
        &self.visitors
    }

    pub fn zones(&self) -> &Collection<Zone> {
        &self.zones
    }

    pub fn keys(&self) -> &Collection<AccessKey> {
        &self.keys
    }

    pub fn passes(&self) -> &Collection<Pass> {
        &self.passes
    }

    /// Default visitor page size
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = DataStore::empty();
        assert!(store.users().is_empty());
        assert!(store.readers.is_empty());
        assert_eq!(store.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_seeded_store_counters() {
        let store = DataStore::seeded();
        assert_eq!(store.users().next_id(), 13);
        assert_eq!(store.visitors().next_id(), 13);
        assert_eq!(store.zones().next_id(), 6);
    }

    #[test]
    fn test_from_config() {
        let config = StoreConfig {
            seed: false,
            page_size: 25,
        };
        let store = DataStore::from_config(&config);
        assert!(store.visitors().is_empty());
        assert_eq!(store.page_size(), 25);

        let config = StoreConfig {
            seed: true,
            page_size: 0,
        };
        let store = DataStore::from_config(&config);
        assert_eq!(store.users().len(), 12);
        assert_eq!(store.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_stores_are_isolated() {
        let mut a = DataStore::seeded();
        let b = DataStore::seeded();
        a.users.remove(1).unwrap();
        assert_eq!(a.users().len(), 11);
        assert_eq!(b.users().len(), 12);
    }
}
