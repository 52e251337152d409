//! Visitor Console Core Library
//!
//! Session management, the in-memory mock API, and the data models of the
//! visitor access console.

pub mod api;
pub mod config;
pub mod error;
pub mod invariants;
pub mod models;
pub mod session;
pub mod store;

pub use api::{
    Ack, Authenticator, ConsoleApi, DeviceRepository, KeyRepository, MockApi, PassRepository,
    ReportRepository, UserRepository, VisitorRepository, ZoneRepository,
};
pub use config::ConsoleConfig;
pub use error::{Error, Result};
pub use models::*;
pub use session::{
    LogoutOutcome, MemoryNotifier, MemoryStorage, Notifier, Route, SessionManager,
    SessionStorage, SqliteStorage, TracingNotifier,
};
pub use store::{DataStore, Page, Pagination, VisitorFilter};
