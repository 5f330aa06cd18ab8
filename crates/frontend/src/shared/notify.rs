//! User notifications (toasts) as an injected capability.
//!
//! View models receive a `Notifier` instead of calling a global toast
//! function. `NoticeBoard` keeps posted notices in a signal for whatever
//! component renders them.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);

    fn success(&self, title: &str) {
        self.notify(Notice::success(title));
    }

    fn error(&self, title: &str, detail: &str) {
        self.notify(Notice::error(title).with_message(detail));
    }
}

/// Notifier that drops every notice
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notice: Notice) {}
}

/// Notice with the id assigned by the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedNotice {
    pub id: u64,
    pub notice: Notice,
}

const DEFAULT_MAX_VISIBLE: usize = 5;

/// Signal-backed list of visible notices
#[derive(Clone, Copy)]
pub struct NoticeBoard {
    notices: RwSignal<Vec<PostedNotice>>,
    next_id: RwSignal<u64>,
    auto_dismiss_ms: Option<u32>,
    max_visible: usize,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
            auto_dismiss_ms: None,
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }

    /// Remove each notice after `ms` milliseconds
    pub fn with_auto_dismiss(mut self, ms: u32) -> Self {
        self.auto_dismiss_ms = Some(ms);
        self
    }

    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible.max(1);
        self
    }

    pub fn notices(&self) -> ReadSignal<Vec<PostedNotice>> {
        self.notices.read_only()
    }

    pub fn len(&self) -> usize {
        self.notices.with(|n| n.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Post a notice and return its id
    pub fn push(&self, notice: Notice) -> u64 {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        let max_visible = self.max_visible;
        self.notices.update(|list| {
            list.push(PostedNotice { id, notice });
            if list.len() > max_visible {
                let excess = list.len() - max_visible;
                list.drain(..excess);
            }
        });

        if let Some(ms) = self.auto_dismiss_ms {
            let board = *self;
            wasm_bindgen_futures::spawn_local(async move {
                TimeoutFuture::new(ms).await;
                board.dismiss(id);
            });
        }
        id
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|list| list.retain(|n| n.id != id));
    }

    pub fn clear(&self) {
        self.notices.set(Vec::new());
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NoticeBoard {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => log::warn!(
                "{}: {}",
                notice.title,
                notice.message.as_deref().unwrap_or("")
            ),
            _ => log::debug!("notice: {}", notice.title),
        }
        self.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_assigns_increasing_ids() {
        let board = NoticeBoard::new();
        let a = board.push(Notice::info("first"));
        let b = board.push(Notice::success("second"));
        assert!(b > a);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_board_dismiss_and_clear() {
        let board = NoticeBoard::new();
        let a = board.push(Notice::info("a"));
        board.push(Notice::info("b"));
        board.dismiss(a);
        let titles: Vec<String> = board
            .notices()
            .get_untracked()
            .into_iter()
            .map(|n| n.notice.title)
            .collect();
        assert_eq!(titles, vec!["b".to_string()]);

        board.clear();
        assert!(board.is_empty());
    }

    #[test]
    fn test_board_drops_oldest_beyond_limit() {
        let board = NoticeBoard::new().with_max_visible(2);
        board.push(Notice::info("1"));
        board.push(Notice::info("2"));
        board.push(Notice::info("3"));
        let titles: Vec<String> = board
            .notices()
            .get_untracked()
            .into_iter()
            .map(|n| n.notice.title)
            .collect();
        assert_eq!(titles, vec!["2".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_notifier_helpers_set_level() {
        let board = NoticeBoard::new();
        board.error("Save failed", "HTTP 500");
        let posted = board.notices().get_untracked();
        assert_eq!(posted[0].notice.level, NoticeLevel::Error);
        assert_eq!(posted[0].notice.message.as_deref(), Some("HTTP 500"));
    }
}
