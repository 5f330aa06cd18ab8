use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a001_collection::{Collection, CollectionId};
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use crate::shared::seo::{SeoIssue, SeoReport, SeoStatus};

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeoAuditId(pub Uuid);

impl AggregateId for SeoAuditId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SeoAuditId)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Результат SEO-аудита одной коллекции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionAudit {
    pub collection_id: CollectionId,
    pub title: String,
    pub score: u8,
    pub status: SeoStatus,
    #[serde(default)]
    pub issues: Vec<SeoIssue>,
}

/// Сводка по аудиту
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AuditSummary {
    pub total: u32,
    pub optimized: u32,
    pub needs_work: u32,
    pub critical: u32,
    /// Средний score, округлённый вниз (0 для пустого аудита)
    pub average_score: u8,
}

impl AuditSummary {
    pub fn from_results(results: &[CollectionAudit]) -> Self {
        let mut summary = Self::default();
        let mut score_sum: u64 = 0;
        for r in results {
            summary.total += 1;
            score_sum += u64::from(r.score);
            match r.status {
                SeoStatus::Optimized => summary.optimized += 1,
                SeoStatus::NeedsWork => summary.needs_work += 1,
                SeoStatus::Critical => summary.critical += 1,
            }
        }
        if summary.total > 0 {
            summary.average_score = (score_sum / u64::from(summary.total)) as u8;
        }
        summary
    }

    pub fn count(&self, status: SeoStatus) -> u32 {
        match status {
            SeoStatus::Optimized => self.optimized,
            SeoStatus::NeedsWork => self.needs_work,
            SeoStatus::Critical => self.critical,
        }
    }
}

/// SEO-аудит (снимок состояния набора коллекций)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoAudit {
    pub id: SeoAuditId,
    #[serde(default)]
    pub results: Vec<CollectionAudit>,
    pub summary: AuditSummary,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl SeoAudit {
    /// Собрать аудит локально, без обращения к API
    pub fn from_collections(collections: &[Collection]) -> Self {
        let results = audit_collections(collections);
        Self {
            id: SeoAuditId(Uuid::new_v4()),
            summary: AuditSummary::from_results(&results),
            results,
            metadata: EntityMetadata::new(),
        }
    }

    /// Результаты, отсортированные от худшего score к лучшему
    pub fn worst_first(&self) -> Vec<&CollectionAudit> {
        let mut items: Vec<&CollectionAudit> = self.results.iter().collect();
        items.sort_by_key(|r| r.score);
        items
    }
}

impl AggregateRoot for SeoAudit {
    type Id = SeoAuditId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "seo_audits"
    }

    fn element_name() -> &'static str {
        "SEO audit"
    }

    fn list_name() -> &'static str {
        "SEO audits"
    }
}

pub fn audit_collection(collection: &Collection) -> CollectionAudit {
    let report = SeoReport::evaluate(&collection.content_record());
    CollectionAudit {
        collection_id: collection.id,
        title: collection.display_title().to_string(),
        score: report.score,
        status: report.status,
        issues: report.issues,
    }
}

pub fn audit_collections(collections: &[Collection]) -> Vec<CollectionAudit> {
    collections.iter().map(audit_collection).collect()
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Запуск аудита на сервере; пустой список означает все коллекции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RunAuditRequest {
    #[serde(default)]
    pub collection_ids: Vec<CollectionId>,
}
