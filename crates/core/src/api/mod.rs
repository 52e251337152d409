//! In-memory mock of the console backend API

mod auth;
mod devices;
mod keys;
mod passes;
mod reports;
mod traits;
mod users;
mod visitors;
mod zones;

use serde::{Deserialize, Serialize};

use crate::store::DataStore;

pub use traits::{
    Authenticator, ConsoleApi, DeviceRepository, KeyRepository, PassRepository,
    ReportRepository, UserRepository, VisitorRepository, ZoneRepository,
};

/// Acknowledgement returned by delete and reset operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Mock API over a borrowed [`DataStore`]
pub struct MockApi<'a> {
    store: &'a mut DataStore,
}

impl<'a> MockApi<'a> {
    pub fn new(store: &'a mut DataStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DataStore {
        &*self.store
    }

    /// Default visitor page size of the underlying store
    pub fn page_size(&self) -> usize {
        self.store.page_size()
    }
}
