use serde::{Deserialize, Serialize};

use crate::domain::a001_collection::CollectionId;

/// Действие массовой операции
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BulkAction {
    Publish,
    Unpublish,
    RecalculateSeo,
    Delete,
    AddKeywords { keywords: Vec<String> },
    RemoveKeywords { keywords: Vec<String> },
}

impl BulkAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Publish => "Publish",
            Self::Unpublish => "Unpublish",
            Self::RecalculateSeo => "Recalculate SEO score",
            Self::Delete => "Delete",
            Self::AddKeywords { .. } => "Add keywords",
            Self::RemoveKeywords { .. } => "Remove keywords",
        }
    }

    /// Действие нельзя отменить (нужно подтверждение пользователя)
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete | Self::RemoveKeywords { .. })
    }
}

/// Запрос на запуск массовой операции
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOperationRequest {
    pub collection_ids: Vec<CollectionId>,
    #[serde(flatten)]
    pub action: BulkAction,
}

impl BulkOperationRequest {
    pub fn new(collection_ids: Vec<CollectionId>, action: BulkAction) -> Self {
        Self {
            collection_ids,
            action,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.collection_ids.is_empty() {
            return Err("Select at least one collection".into());
        }
        if let BulkAction::AddKeywords { keywords } | BulkAction::RemoveKeywords { keywords } =
            &self.action
        {
            if keywords.iter().all(|w| w.trim().is_empty()) {
                return Err("Enter at least one keyword".into());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOperationResponse {
    pub operation_id: String,
}
