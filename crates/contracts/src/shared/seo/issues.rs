//! Human-readable findings for fields that did not get full credit.

use super::record::ContentRecord;
use super::score::{score_breakdown, Credit, ScoreBreakdown, SubScore};
use serde::{Deserialize, Serialize};

/// Scored field of a content record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoField {
    Title,
    Description,
    Keywords,
    Content,
    Slug,
    Published,
}

impl SeoField {
    pub const ALL: [SeoField; 6] = [
        SeoField::Title,
        SeoField::Description,
        SeoField::Keywords,
        SeoField::Content,
        SeoField::Slug,
        SeoField::Published,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SeoField::Title => "Title",
            SeoField::Description => "Meta description",
            SeoField::Keywords => "Keywords",
            SeoField::Content => "Content",
            SeoField::Slug => "URL slug",
            SeoField::Published => "Visibility",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// Field earned partial credit
    Warning,
    /// Field earned nothing
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoIssue {
    pub field: SeoField,
    pub severity: IssueSeverity,
    pub message: String,
}

/// One issue per field below full credit, in field order
pub fn collect_issues(record: &ContentRecord<'_>) -> Vec<SeoIssue> {
    issues_from_breakdown(&score_breakdown(record))
}

pub(crate) fn issues_from_breakdown(breakdown: &ScoreBreakdown) -> Vec<SeoIssue> {
    breakdown.items.iter().filter_map(issue_for).collect()
}

fn issue_for(sub: &SubScore) -> Option<SeoIssue> {
    let severity = match sub.credit {
        Credit::Full => return None,
        Credit::Partial => IssueSeverity::Warning,
        Credit::None => IssueSeverity::Error,
    };
    let n = sub.measured;
    let message = match (sub.field, sub.credit) {
        (SeoField::Title, Credit::None) => "Title is missing".to_string(),
        (SeoField::Title, _) => format!("Title should be 30-60 characters (currently {})", n),
        (SeoField::Description, Credit::None) => "Meta description is missing".to_string(),
        (SeoField::Description, _) => {
            format!("Meta description should be 120-160 characters (currently {})", n)
        }
        (SeoField::Keywords, Credit::None) => "No keywords assigned".to_string(),
        (SeoField::Keywords, _) => format!("Use 3-10 keywords (currently {})", n),
        (SeoField::Content, Credit::None) => "Page has no body content".to_string(),
        (SeoField::Content, _) => {
            format!("Body content should be at least 300 characters (currently {})", n)
        }
        (SeoField::Slug, Credit::None) => "URL slug is missing".to_string(),
        (SeoField::Slug, _) => {
            "URL slug should contain hyphens and be at most 50 characters".to_string()
        }
        (SeoField::Published, _) => "Collection is not published".to_string(),
    };
    Some(SeoIssue {
        field: sub.field,
        severity,
        message,
    })
}
