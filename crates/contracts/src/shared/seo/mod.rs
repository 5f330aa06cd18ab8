//! SEO scoring rules shared by the frontend preview and the audit pages.
//!
//! The score is the sum of six independent sub-scores (title, description,
//! keywords, content, slug, published flag) and maps to a three-tier status.

pub mod issues;
pub mod record;
pub mod score;
pub mod status;

pub use issues::{collect_issues, IssueSeverity, SeoField, SeoIssue};
pub use record::ContentRecord;
pub use score::{compute_score, score_breakdown, Credit, ScoreBreakdown, SubScore, MAX_SCORE};
pub use status::{classify, SeoStatus};

use serde::{Deserialize, Serialize};

/// Score, status and issue list of one record, computed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoReport {
    pub score: u8,
    pub status: SeoStatus,
    pub breakdown: ScoreBreakdown,
    pub issues: Vec<SeoIssue>,
}

impl SeoReport {
    pub fn evaluate(record: &ContentRecord<'_>) -> Self {
        let breakdown = score_breakdown(record);
        let score = breakdown.total();
        Self {
            score,
            status: classify(score),
            issues: issues::issues_from_breakdown(&breakdown),
            breakdown,
        }
    }
}
