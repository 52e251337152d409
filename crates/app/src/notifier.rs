//! Terminal notices

use tracing::debug;
use visitor_core::Notifier;

/// Prints notices the way a toast would show them
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

pub fn format_notice(title: &str, body: &str) -> String {
    format!("[{}] {}", title, body)
}

impl Notifier for ConsoleNotifier {
    fn show_success_message(&self, title: &str, body: &str) {
        debug!(title, body, "Success notice");
        println!("{}", format_notice(title, body));
    }

    fn show_error_message(&self, title: &str, body: &str) {
        debug!(title, body, "Error notice");
        eprintln!("{}", format_notice(title, body));
    }
}
