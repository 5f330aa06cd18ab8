use contracts::domain::a002_seo_audit::{RunAuditRequest, SeoAudit};
use contracts::domain::common::AggregateRoot;

use crate::shared::http::{self, ApiError};

/// List stored audits, newest first as returned by the server
pub async fn fetch_audits() -> Result<Vec<SeoAudit>, ApiError> {
    http::get_json(&SeoAudit::api_path()).await
}

pub async fn fetch_audit(id: &str) -> Result<SeoAudit, ApiError> {
    http::get_json(&format!("{}/{}", SeoAudit::api_path(), urlencoding::encode(id))).await
}

/// Run an audit on the server; empty `collection_ids` audits every collection
pub async fn run_audit(request: &RunAuditRequest) -> Result<SeoAudit, ApiError> {
    http::post_json(&SeoAudit::api_path(), request).await
}
