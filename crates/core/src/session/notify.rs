//! User-facing notices
//!
//! The session manager reports outcomes through a [`Notifier`] rather than
//! drawing anything itself.

use std::cell::RefCell;

use tracing::{info, warn};

pub trait Notifier {
    fn show_success_message(&self, title: &str, body: &str);
    fn show_error_message(&self, title: &str, body: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn show_success_message(&self, title: &str, body: &str) {
        (**self).show_success_message(title, body)
    }

    fn show_error_message(&self, title: &str, body: &str) {
        (**self).show_error_message(title, body)
    }
}

/// Notifier that writes notices to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show_success_message(&self, title: &str, body: &str) {
        info!(title, body, "Notice");
    }

    fn show_error_message(&self, title: &str, body: &str) {
        warn!(title, body, "Error notice");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

/// Notifier that keeps every notice it receives
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    /// Drain recorded notices
    pub fn take(&self) -> Vec<Notice> {
        self.notices.take()
    }

    fn push(&self, kind: NoticeKind, title: &str, body: &str) {
        self.notices.borrow_mut().push(Notice {
            kind,
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

impl Notifier for MemoryNotifier {
    fn show_success_message(&self, title: &str, body: &str) {
        self.push(NoticeKind::Success, title, body);
    }

    fn show_error_message(&self, title: &str, body: &str) {
        self.push(NoticeKind::Error, title, body);
    }
}
