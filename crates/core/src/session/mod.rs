//! Session management
//!
//! Authentication state derived from persisted session data, plus the
//! storage backends that hold it.

mod manager;
mod migrations;
mod notify;
mod route;
mod sqlite;
mod storage;

pub use manager::{LogoutOutcome, SessionManager};
pub use notify::{MemoryNotifier, Notice, NoticeKind, Notifier, TracingNotifier};
pub use route::Route;
pub use sqlite::SqliteStorage;
pub use storage::*;
