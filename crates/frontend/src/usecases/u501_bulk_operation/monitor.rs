//! Start a bulk operation and follow its progress.
//!
//! Progress arrives over the server-sent stream. If the stream breaks
//! before the operation finishes, the monitor switches to polling
//! `get_progress` every [`POLL_INTERVAL_MS`].

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use contracts::usecases::u501_bulk_operation::{
    BulkOperationProgress, BulkOperationRequest, BulkOperationStatus,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::api;
use crate::shared::confirm::ConfirmRequest;
use crate::shared::date_utils::format_duration;
use crate::shared::notify::Notice;
use crate::shared::services::AppServices;
use crate::shared::sse::EventStream;

pub const POLL_INTERVAL_MS: u32 = 2000;

#[derive(Clone)]
pub struct BulkOperationMonitor {
    pub progress: RwSignal<Option<BulkOperationProgress>>,
    pub operation_id: RwSignal<Option<String>>,
    pub is_starting: RwSignal<bool>,
    /// Ждёт ответа на подтверждение разрушительного действия
    pub is_confirming: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    stream: Rc<RefCell<Option<EventStream>>>,
    services: AppServices,
}

impl BulkOperationMonitor {
    pub fn new(services: AppServices) -> Self {
        Self {
            progress: RwSignal::new(None),
            operation_id: RwSignal::new(None),
            is_starting: RwSignal::new(false),
            is_confirming: RwSignal::new(false),
            error: RwSignal::new(None),
            stream: Rc::new(RefCell::new(None)),
            services,
        }
    }

    /// Операция запущена и ещё не завершена
    pub fn is_active(&self) -> bool {
        self.operation_id.with(|id| id.is_some())
            && !self
                .progress
                .with(|p| p.as_ref().is_some_and(|p| p.is_finished()))
    }

    pub fn percent(&self) -> u8 {
        self.progress
            .with(|p| p.as_ref().map(|p| p.percent()).unwrap_or(0))
    }

    /// Время выполнения, например "2m 05s"
    pub fn elapsed(&self) -> Option<String> {
        self.progress.with(|p| {
            p.as_ref().map(|p| {
                let end = p.completed_at.unwrap_or_else(Utc::now);
                format_duration(&p.started_at, &end)
            })
        })
    }

    /// Запустить операцию; разрушительные действия требуют подтверждения
    pub fn start(&self, request: BulkOperationRequest) {
        if let Err(msg) = request.validate() {
            self.error.set(Some(msg));
            return;
        }
        let busy = self.is_starting.get_untracked() || self.is_confirming.get_untracked();
        if busy || self.is_active() {
            self.error
                .set(Some("Another bulk operation is still running".to_string()));
            return;
        }

        if !request.action.is_destructive() {
            self.launch(request);
            return;
        }

        let monitor = self.clone();
        let confirm = ConfirmRequest::new(
            request.action.label(),
            format!(
                "{} for {} collections? This cannot be undone.",
                request.action.label(),
                request.collection_ids.len()
            ),
        )
        .destructive()
        .with_confirm_label(request.action.label());

        self.is_confirming.set(true);
        self.services.confirmer.confirm(
            confirm,
            Box::new(move |confirmed: bool| {
                monitor.is_confirming.set(false);
                if confirmed {
                    monitor.launch(request);
                }
            }),
        );
    }

    fn launch(&self, request: BulkOperationRequest) {
        let monitor = self.clone();
        let total = request.collection_ids.len() as u32;
        self.reset();
        self.is_starting.set(true);

        spawn_local(async move {
            match api::start(&request).await {
                Ok(response) => {
                    log::info!(
                        "bulk operation {} started: {} x{}",
                        response.operation_id,
                        request.action.label(),
                        total
                    );
                    monitor.operation_id.set(Some(response.operation_id.clone()));
                    monitor.progress.set(Some(BulkOperationProgress::new(
                        response.operation_id.clone(),
                        total,
                    )));
                    monitor.watch(response.operation_id);
                }
                Err(e) => {
                    monitor.error.set(Some(e.to_string()));
                    monitor
                        .services
                        .notifier
                        .error("Failed to start bulk operation", &e.to_string());
                }
            }
            monitor.is_starting.set(false);
        });
    }

    fn watch(&self, operation_id: String) {
        let on_item = {
            let monitor = self.clone();
            move |progress: BulkOperationProgress| monitor.apply(progress)
        };
        let on_error = {
            let monitor = self.clone();
            let operation_id = operation_id.clone();
            move |reason: String| monitor.fall_back(&operation_id, &reason)
        };

        let url = api::stream_url(&operation_id);
        match EventStream::open::<BulkOperationProgress, _, _>(&url, on_item, on_error) {
            Ok(stream) => *self.stream.borrow_mut() = Some(stream),
            Err(e) => {
                log::warn!("bulk operation {}: {}", operation_id, e);
                self.poll(operation_id);
            }
        }
    }

    /// Принять очередной снимок прогресса
    fn apply(&self, progress: BulkOperationProgress) {
        let is_current = self
            .operation_id
            .with_untracked(|id| id.as_deref() == Some(progress.operation_id.as_str()));
        if !is_current {
            return;
        }
        let was_finished = self
            .progress
            .with_untracked(|p| p.as_ref().is_some_and(|p| p.is_finished()));

        let finished = progress.is_finished();
        let notice = completion_notice(&progress);
        self.progress.set(Some(progress));

        if finished {
            self.close_stream();
            if !was_finished {
                if let Some(notice) = notice {
                    self.services.notifier.notify(notice);
                }
            }
        }
    }

    fn fall_back(&self, operation_id: &str, reason: &str) {
        self.close_stream();
        let finished = self
            .progress
            .with_untracked(|p| p.as_ref().is_some_and(|p| p.is_finished()));
        if finished {
            return;
        }
        log::warn!("bulk operation {}: {}, polling instead", operation_id, reason);
        self.poll(operation_id.to_string());
    }

    fn poll(&self, operation_id: String) {
        let monitor = self.clone();
        spawn_local(async move {
            loop {
                let still_current = monitor
                    .operation_id
                    .with_untracked(|id| id.as_deref() == Some(operation_id.as_str()));
                if !still_current {
                    break;
                }
                match api::get_progress(&operation_id).await {
                    Ok(progress) => {
                        let finished = progress.is_finished();
                        monitor.apply(progress);
                        if finished {
                            break;
                        }
                    }
                    Err(e) => {
                        let message = if e.is_not_found() {
                            "Bulk operation not found on the server".to_string()
                        } else {
                            format!("Failed to get progress: {}", e)
                        };
                        monitor.error.set(Some(message));
                        break;
                    }
                }
                TimeoutFuture::new(POLL_INTERVAL_MS).await;
            }
        });
    }

    /// Запросить отмену текущей операции
    pub fn cancel(&self) {
        let Some(operation_id) = self.operation_id.get_untracked() else {
            return;
        };
        if !self.is_active() {
            return;
        }
        let monitor = self.clone();
        spawn_local(async move {
            match api::cancel(&operation_id).await {
                Ok(progress) => monitor.apply(progress),
                Err(e) => monitor
                    .services
                    .notifier
                    .error("Failed to cancel bulk operation", &e.to_string()),
            }
        });
    }

    /// Забыть текущую операцию (поток закрывается)
    pub fn reset(&self) {
        self.close_stream();
        self.operation_id.set(None);
        self.progress.set(None);
        self.error.set(None);
    }

    fn close_stream(&self) {
        let stream = self.stream.borrow_mut().take();
        if let Some(stream) = stream {
            stream.close();
            // may be called from the stream's own handler; release it afterwards
            spawn_local(async move { drop(stream) });
        }
    }
}

/// Notice for a finished operation; `None` while it is still running
pub fn completion_notice(progress: &BulkOperationProgress) -> Option<Notice> {
    let summary = format!(
        "{} of {} collections processed",
        progress.processed, progress.total
    );
    let notice = match progress.status {
        BulkOperationStatus::Pending | BulkOperationStatus::Running => return None,
        BulkOperationStatus::Completed => {
            Notice::success("Bulk operation completed").with_message(summary)
        }
        BulkOperationStatus::CompletedWithErrors => {
            Notice::warning("Bulk operation completed with errors").with_message(format!(
                "{} succeeded, {} failed",
                progress.succeeded, progress.failed
            ))
        }
        BulkOperationStatus::Failed => {
            let reason = progress
                .errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or(summary);
            Notice::error("Bulk operation failed").with_message(reason)
        }
        BulkOperationStatus::Cancelled => {
            Notice::info("Bulk operation cancelled").with_message(summary)
        }
    };
    Some(notice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::confirm::ConfirmQueue;
    use crate::shared::notify::{NoopNotifier, NoticeLevel};
    use contracts::domain::a001_collection::CollectionId;
    use contracts::usecases::u501_bulk_operation::{BulkAction, BulkItemError};

    fn progress(status: BulkOperationStatus) -> BulkOperationProgress {
        let mut p = BulkOperationProgress::new("op-1".into(), 4);
        p.status = status;
        p.processed = 3;
        p.succeeded = 2;
        p.failed = 1;
        p
    }

    #[test]
    fn test_no_notice_while_running() {
        assert!(completion_notice(&progress(BulkOperationStatus::Pending)).is_none());
        assert!(completion_notice(&progress(BulkOperationStatus::Running)).is_none());
    }

    #[test]
    fn test_completion_notices() {
        let n = completion_notice(&progress(BulkOperationStatus::Completed)).unwrap();
        assert_eq!(n.level, NoticeLevel::Success);
        assert_eq!(n.message.as_deref(), Some("3 of 4 collections processed"));

        let n = completion_notice(&progress(BulkOperationStatus::CompletedWithErrors)).unwrap();
        assert_eq!(n.level, NoticeLevel::Warning);
        assert_eq!(n.message.as_deref(), Some("2 succeeded, 1 failed"));

        let n = completion_notice(&progress(BulkOperationStatus::Cancelled)).unwrap();
        assert_eq!(n.level, NoticeLevel::Info);
    }

    #[test]
    fn test_failed_notice_uses_first_error() {
        let mut p = progress(BulkOperationStatus::Failed);
        p.errors.push(BulkItemError {
            collection_id: None,
            message: "Platform rejected the request".into(),
            occurred_at: p.started_at,
        });
        let n = completion_notice(&p).unwrap();
        assert_eq!(n.level, NoticeLevel::Error);
        assert_eq!(n.message.as_deref(), Some("Platform rejected the request"));
    }

    #[test]
    fn test_invalid_request_is_rejected_locally() {
        let monitor = BulkOperationMonitor::new(AppServices::noop());
        monitor.start(BulkOperationRequest::new(Vec::new(), BulkAction::Publish));
        assert_eq!(
            monitor.error.get_untracked().as_deref(),
            Some("Select at least one collection")
        );
        assert!(!monitor.is_starting.get_untracked());
    }

    #[test]
    fn test_declined_destructive_action_does_not_start() {
        // noop services decline every confirmation
        let monitor = BulkOperationMonitor::new(AppServices::noop());
        let request = BulkOperationRequest::new(vec![CollectionId::new_v4()], BulkAction::Delete);
        monitor.start(request);
        assert!(!monitor.is_starting.get_untracked());
        assert_eq!(monitor.operation_id.get_untracked(), None);
        assert_eq!(monitor.error.get_untracked(), None);
    }

    #[test]
    fn test_apply_ignores_other_operations() {
        let monitor = BulkOperationMonitor::new(AppServices::noop());
        monitor.operation_id.set(Some("op-2".into()));
        monitor.apply(progress(BulkOperationStatus::Running));
        assert_eq!(monitor.progress.get_untracked(), None);

        monitor.operation_id.set(Some("op-1".into()));
        monitor.apply(progress(BulkOperationStatus::Running));
        assert_eq!(monitor.percent(), 75);
        assert!(monitor.elapsed().is_some());
        assert!(monitor.is_active());
    }

    #[test]
    fn test_start_waits_for_pending_confirmation() {
        let queue = ConfirmQueue::new();
        let monitor = BulkOperationMonitor::new(AppServices::new(NoopNotifier, queue.clone()));
        let ids = vec![CollectionId::new_v4(), CollectionId::new_v4()];

        monitor.start(BulkOperationRequest::new(ids.clone(), BulkAction::Delete));
        assert!(monitor.is_confirming.get_untracked());
        assert_eq!(monitor.error.get_untracked(), None);

        monitor.start(BulkOperationRequest::new(ids.clone(), BulkAction::Delete));
        monitor.start(BulkOperationRequest::new(ids, BulkAction::Publish));
        assert_eq!(queue.pending().get_untracked().len(), 1);
        assert_eq!(
            monitor.error.get_untracked().as_deref(),
            Some("Another bulk operation is still running")
        );

        let (id, request) = queue.current().unwrap();
        assert!(request.destructive);
        assert!(queue.resolve(id, false));
        assert!(!monitor.is_confirming.get_untracked());
        assert!(!monitor.is_starting.get_untracked());
        assert_eq!(monitor.operation_id.get_untracked(), None);
    }
}
