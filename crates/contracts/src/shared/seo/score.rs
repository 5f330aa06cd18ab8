//! SEO score calculator
//!
//! Score components (0-100 total):
//! - Title (0-25): 30-60 characters for full credit
//! - Description (0-25): 120-160 characters for full credit
//! - Keywords (0-20): 3-10 keywords for full credit
//! - Content (0-15): at least 300 characters for full credit
//! - Slug (0-10): hyphenated and at most 50 characters for full credit
//! - Published (0-5)

use super::issues::SeoField;
use super::record::ContentRecord;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const MAX_SCORE: u8 = 100;

const TITLE_MAX: u8 = 25;
const TITLE_PARTIAL: u8 = 15;
const TITLE_RANGE: RangeInclusive<usize> = 30..=60;

const DESCRIPTION_MAX: u8 = 25;
const DESCRIPTION_PARTIAL: u8 = 15;
const DESCRIPTION_RANGE: RangeInclusive<usize> = 120..=160;

const KEYWORDS_MAX: u8 = 20;
const KEYWORDS_PARTIAL: u8 = 10;
const KEYWORDS_RANGE: RangeInclusive<usize> = 3..=10;

const CONTENT_MAX: u8 = 15;
const CONTENT_MEDIUM: u8 = 10;
const CONTENT_SHORT: u8 = 5;
const CONTENT_FULL_LEN: usize = 300;
const CONTENT_MEDIUM_LEN: usize = 100;

const SLUG_MAX: u8 = 10;
const SLUG_PARTIAL: u8 = 5;
const SLUG_MAX_LEN: usize = 50;

const PUBLISHED_MAX: u8 = 5;

/// How much of a field's maximum was awarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credit {
    Full,
    Partial,
    None,
}

/// Contribution of one field to the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScore {
    pub field: SeoField,
    pub points: u8,
    pub max_points: u8,
    pub credit: Credit,
    /// Character length (or keyword count) the rule was evaluated on
    pub measured: usize,
}

impl SubScore {
    fn full(field: SeoField, max_points: u8, measured: usize) -> Self {
        Self {
            field,
            points: max_points,
            max_points,
            credit: Credit::Full,
            measured,
        }
    }

    fn partial(field: SeoField, points: u8, max_points: u8, measured: usize) -> Self {
        Self {
            field,
            points,
            max_points,
            credit: Credit::Partial,
            measured,
        }
    }

    fn zero(field: SeoField, max_points: u8, measured: usize) -> Self {
        Self {
            field,
            points: 0,
            max_points,
            credit: Credit::None,
            measured,
        }
    }
}

/// Per-field sub-scores, always in `SeoField::ALL` order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub items: Vec<SubScore>,
}

impl ScoreBreakdown {
    /// Sum of sub-scores, clamped to `MAX_SCORE`
    pub fn total(&self) -> u8 {
        let sum: u32 = self.items.iter().map(|s| u32::from(s.points)).sum();
        sum.min(u32::from(MAX_SCORE)) as u8
    }

    pub fn get(&self, field: SeoField) -> Option<&SubScore> {
        self.items.iter().find(|s| s.field == field)
    }
}

/// Calculate the SEO score (0-100) of a record
pub fn compute_score(record: &ContentRecord<'_>) -> u8 {
    score_breakdown(record).total()
}

/// Evaluate every field rule independently
pub fn score_breakdown(record: &ContentRecord<'_>) -> ScoreBreakdown {
    ScoreBreakdown {
        items: vec![
            score_title(record.title_len()),
            score_description(record.description_len()),
            score_keywords(record.keyword_count()),
            score_content(record.content_len()),
            score_slug(record.slug()),
            score_published(record.is_published),
        ],
    }
}

fn score_title(len: usize) -> SubScore {
    match len {
        0 => SubScore::zero(SeoField::Title, TITLE_MAX, len),
        l if TITLE_RANGE.contains(&l) => SubScore::full(SeoField::Title, TITLE_MAX, len),
        _ => SubScore::partial(SeoField::Title, TITLE_PARTIAL, TITLE_MAX, len),
    }
}

fn score_description(len: usize) -> SubScore {
    match len {
        0 => SubScore::zero(SeoField::Description, DESCRIPTION_MAX, len),
        l if DESCRIPTION_RANGE.contains(&l) => {
            SubScore::full(SeoField::Description, DESCRIPTION_MAX, len)
        }
        _ => SubScore::partial(SeoField::Description, DESCRIPTION_PARTIAL, DESCRIPTION_MAX, len),
    }
}

fn score_keywords(count: usize) -> SubScore {
    match count {
        0 => SubScore::zero(SeoField::Keywords, KEYWORDS_MAX, count),
        c if KEYWORDS_RANGE.contains(&c) => SubScore::full(SeoField::Keywords, KEYWORDS_MAX, count),
        _ => SubScore::partial(SeoField::Keywords, KEYWORDS_PARTIAL, KEYWORDS_MAX, count),
    }
}

fn score_content(len: usize) -> SubScore {
    match len {
        l if l >= CONTENT_FULL_LEN => SubScore::full(SeoField::Content, CONTENT_MAX, len),
        l if l >= CONTENT_MEDIUM_LEN => {
            SubScore::partial(SeoField::Content, CONTENT_MEDIUM, CONTENT_MAX, len)
        }
        l if l > 0 => SubScore::partial(SeoField::Content, CONTENT_SHORT, CONTENT_MAX, len),
        _ => SubScore::zero(SeoField::Content, CONTENT_MAX, len),
    }
}

fn score_slug(slug: &str) -> SubScore {
    let len = slug.chars().count();
    if len == 0 {
        SubScore::zero(SeoField::Slug, SLUG_MAX, len)
    } else if slug.contains('-') && len <= SLUG_MAX_LEN {
        SubScore::full(SeoField::Slug, SLUG_MAX, len)
    } else {
        SubScore::partial(SeoField::Slug, SLUG_PARTIAL, SLUG_MAX, len)
    }
}

fn score_published(is_published: bool) -> SubScore {
    if is_published {
        SubScore::full(SeoField::Published, PUBLISHED_MAX, 1)
    } else {
        SubScore::zero(SeoField::Published, PUBLISHED_MAX, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::seo::status::{classify, SeoStatus};

    fn text(len: usize) -> String {
        "a".repeat(len)
    }

    fn keywords(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("keyword{}", i)).collect()
    }

    #[test]
    fn test_empty_record_scores_zero() {
        let record = ContentRecord::default();
        assert_eq!(compute_score(&record), 0);
        assert_eq!(classify(compute_score(&record)), SeoStatus::Critical);
    }

    #[test]
    fn test_empty_strings_score_like_absent_fields() {
        let empty: Vec<String> = Vec::new();
        let record = ContentRecord {
            title: Some(""),
            description: Some(""),
            keywords: &empty,
            content: Some(""),
            slug: Some(""),
            is_published: false,
        };
        assert_eq!(compute_score(&record), 0);
    }

    #[test]
    fn test_full_credit_scores_hundred() {
        let title = text(45);
        let description = text(140);
        let kw = keywords(5);
        let content = text(300);
        let record = ContentRecord {
            title: Some(&title),
            description: Some(&description),
            keywords: &kw,
            content: Some(&content),
            slug: Some("summer-dresses"),
            is_published: true,
        };
        assert_eq!(compute_score(&record), 100);
        assert_eq!(classify(compute_score(&record)), SeoStatus::Optimized);
        assert_eq!(score_breakdown(&record).items.len(), 6);
    }

    #[test]
    fn test_sub_maxima_sum_to_max_score() {
        let sum =
            TITLE_MAX + DESCRIPTION_MAX + KEYWORDS_MAX + CONTENT_MAX + SLUG_MAX + PUBLISHED_MAX;
        assert_eq!(sum, MAX_SCORE);
    }

    #[test]
    fn test_documented_scenario() {
        // title 45 (+25), no description, 5 keywords (+20), body 50 (+5),
        // slug (+10), published (+5)
        let title = text(45);
        let kw = keywords(5);
        let content = text(50);
        let record = ContentRecord {
            title: Some(&title),
            description: None,
            keywords: &kw,
            content: Some(&content),
            slug: Some("best-shoes"),
            is_published: true,
        };
        assert_eq!(compute_score(&record), 65);
    }

    #[test]
    fn test_title_boundaries() {
        assert_eq!(score_title(0).points, 0);
        assert_eq!(score_title(29).points, 15);
        assert_eq!(score_title(30).points, 25);
        assert_eq!(score_title(60).points, 25);
        assert_eq!(score_title(61).points, 15);
    }

    #[test]
    fn test_description_boundaries() {
        assert_eq!(score_description(0).points, 0);
        assert_eq!(score_description(119).points, 15);
        assert_eq!(score_description(120).points, 25);
        assert_eq!(score_description(160).points, 25);
        assert_eq!(score_description(161).points, 15);
    }

    #[test]
    fn test_keyword_boundaries() {
        assert_eq!(score_keywords(0).points, 0);
        assert_eq!(score_keywords(2).points, 10);
        assert_eq!(score_keywords(3).points, 20);
        assert_eq!(score_keywords(10).points, 20);
        assert_eq!(score_keywords(11).points, 10);
    }

    #[test]
    fn test_content_tiers() {
        assert_eq!(score_content(0).points, 0);
        assert_eq!(score_content(1).points, 5);
        assert_eq!(score_content(99).points, 5);
        assert_eq!(score_content(100).points, 10);
        assert_eq!(score_content(299).points, 10);
        assert_eq!(score_content(300).points, 15);
    }

    #[test]
    fn test_slug_rules() {
        assert_eq!(score_slug("").points, 0);
        assert_eq!(score_slug("shoes").points, 5);
        assert_eq!(score_slug("best-shoes").points, 10);
        let long = format!("{}-{}", text(30), text(20));
        assert_eq!(long.len(), 51);
        assert_eq!(score_slug(&long).points, 5);
        let limit = format!("{}-{}", text(30), text(19));
        assert_eq!(score_slug(&limit).points, 10);
    }

    #[test]
    fn test_published_flag() {
        assert_eq!(score_published(true).points, 5);
        assert_eq!(score_published(false).points, 0);
    }

    fn assert_non_decreasing(scores: &[u8]) {
        for pair in scores.windows(2) {
            assert!(pair[1] >= pair[0], "score dropped: {:?}", scores);
        }
    }

    #[test]
    fn test_single_field_improvement_never_decreases_score() {
        let kw = keywords(1);
        let base_content = text(120);
        let base = ContentRecord {
            keywords: &kw,
            content: Some(&base_content),
            slug: Some("shoes"),
            ..Default::default()
        };

        // zero -> partial -> full for every field
        let titles = [String::new(), text(10), text(40)];
        let scores: Vec<u8> = titles
            .iter()
            .map(|t| compute_score(&ContentRecord { title: Some(t), ..base }))
            .collect();
        assert_non_decreasing(&scores);

        let descriptions = [String::new(), text(60), text(140)];
        let scores: Vec<u8> = descriptions
            .iter()
            .map(|d| compute_score(&ContentRecord { description: Some(d), ..base }))
            .collect();
        assert_non_decreasing(&scores);

        let keyword_sets = [keywords(0), keywords(1), keywords(4)];
        let scores: Vec<u8> = keyword_sets
            .iter()
            .map(|k| compute_score(&ContentRecord { keywords: k, ..base }))
            .collect();
        assert_non_decreasing(&scores);

        let bodies = [String::new(), text(20), text(150), text(400)];
        let scores: Vec<u8> = bodies
            .iter()
            .map(|c| compute_score(&ContentRecord { content: Some(c), ..base }))
            .collect();
        assert_non_decreasing(&scores);

        let slugs = ["", "shoes", "best-shoes"];
        let scores: Vec<u8> = slugs
            .iter()
            .map(|s| compute_score(&ContentRecord { slug: Some(*s), ..base }))
            .collect();
        assert_non_decreasing(&scores);

        let unpublished = compute_score(&base);
        let published = compute_score(&ContentRecord { is_published: true, ..base });
        assert_non_decreasing(&[unpublished, published]);
        assert_eq!(published, unpublished + PUBLISHED_MAX);
    }

    #[test]
    fn test_score_is_idempotent() {
        let title = text(33);
        let kw = keywords(12);
        let record = ContentRecord {
            title: Some(&title),
            keywords: &kw,
            slug: Some("x"),
            is_published: true,
            ..Default::default()
        };
        assert_eq!(compute_score(&record), compute_score(&record));
        assert_eq!(score_breakdown(&record), score_breakdown(&record));
    }

    #[test]
    fn test_breakdown_total_equals_score() {
        let title = text(12);
        let description = text(130);
        let record = ContentRecord {
            title: Some(&title),
            description: Some(&description),
            ..Default::default()
        };
        let breakdown = score_breakdown(&record);
        assert_eq!(breakdown.total(), 40);
        assert_eq!(breakdown.get(SeoField::Title).map(|s| s.credit), Some(Credit::Partial));
        assert_eq!(breakdown.get(SeoField::Description).map(|s| s.credit), Some(Credit::Full));
        assert_eq!(breakdown.get(SeoField::Published).map(|s| s.credit), Some(Credit::None));
    }
}
