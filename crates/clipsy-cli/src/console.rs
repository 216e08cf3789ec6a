//! Terminal rendering of user notices.

use clipsy_core::notification::{Notice, NoticeLevel, Notifier};

/// Prints notices to stdout, one line each.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        println!("{}", render(&notice));
    }
}

pub fn render(notice: &Notice) -> String {
    let marker = match notice.level {
        NoticeLevel::Info => "⏳",
        NoticeLevel::Success => "✅",
        NoticeLevel::Error => "❌",
    };
    format!("{} {}: {}", marker, notice.title, notice.message)
}
