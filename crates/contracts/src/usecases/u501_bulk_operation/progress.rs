use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Текущий прогресс массовой операции (для real-time мониторинга)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkOperationProgress {
    pub operation_id: String,
    pub status: BulkOperationStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,

    /// Обработано коллекций (успешно или с ошибкой)
    pub processed: u32,
    pub total: u32,
    pub succeeded: u32,
    pub failed: u32,

    #[serde(default)]
    pub errors: Vec<BulkItemError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkOperationStatus {
    /// Поставлена в очередь
    Pending,

    /// Выполняется
    Running,

    /// Завершена успешно
    Completed,

    /// Завершена с ошибками
    CompletedWithErrors,

    /// Провалена
    Failed,

    /// Отменена
    Cancelled,
}

impl BulkOperationStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::CompletedWithErrors => "Completed with errors",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Ошибка обработки одной коллекции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkItemError {
    pub collection_id: Option<String>,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl BulkOperationProgress {
    pub fn new(operation_id: String, total: u32) -> Self {
        Self {
            operation_id,
            status: BulkOperationStatus::Pending,
            started_at: Utc::now(),
            completed_at: None,
            processed: 0,
            total,
            succeeded: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Процент выполнения 0-100 (0, если total не известен)
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let processed = self.processed.min(self.total);
        ((u64::from(processed) * 100) / u64::from(self.total)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        let mut progress = BulkOperationProgress::new("op-1".into(), 0);
        assert_eq!(progress.percent(), 0);

        progress.total = 3;
        progress.processed = 1;
        assert_eq!(progress.percent(), 33);

        progress.processed = 5;
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_finished_statuses() {
        assert!(!BulkOperationStatus::Pending.is_finished());
        assert!(!BulkOperationStatus::Running.is_finished());
        assert!(BulkOperationStatus::Completed.is_finished());
        assert!(BulkOperationStatus::CompletedWithErrors.is_finished());
        assert!(BulkOperationStatus::Failed.is_finished());
        assert!(BulkOperationStatus::Cancelled.is_finished());
    }

    #[test]
    fn test_deserialize_stream_payload() {
        let json = r#"{
            "operation_id": "op-7",
            "status": "completed_with_errors",
            "started_at": "2024-03-15T14:02:26Z",
            "completed_at": null,
            "processed": 4,
            "total": 4,
            "succeeded": 3,
            "failed": 1
        }"#;
        let progress: BulkOperationProgress = serde_json::from_str(json).unwrap();
        assert_eq!(progress.status, BulkOperationStatus::CompletedWithErrors);
        assert!(progress.is_finished());
        assert!(progress.errors.is_empty());
    }
}
