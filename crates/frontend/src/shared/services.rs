use std::rc::Rc;

use super::confirm::{AutoConfirm, BrowserConfirm, Confirmer};
use super::notify::{NoopNotifier, NoticeBoard, Notifier};

/// Capabilities passed into view models that need user interaction
#[derive(Clone)]
pub struct AppServices {
    pub notifier: Rc<dyn Notifier>,
    pub confirmer: Rc<dyn Confirmer>,
}

impl AppServices {
    pub fn new(notifier: impl Notifier + 'static, confirmer: impl Confirmer + 'static) -> Self {
        Self {
            notifier: Rc::new(notifier),
            confirmer: Rc::new(confirmer),
        }
    }

    /// No notifications; every confirmation is declined
    pub fn noop() -> Self {
        Self::new(NoopNotifier, AutoConfirm(false))
    }

    /// Notices on `board`, confirmations via `window.confirm`
    pub fn browser(board: NoticeBoard) -> Self {
        Self::new(board, BrowserConfirm)
    }
}
