use serde::{Deserialize, Serialize};

/// Lowest score classified as `Optimized`
pub const OPTIMIZED_MIN: u8 = 80;
/// Lowest score classified as `NeedsWork`
pub const NEEDS_WORK_MIN: u8 = 50;

/// Three-tier SEO status derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoStatus {
    Optimized,
    NeedsWork,
    Critical,
}

impl SeoStatus {
    pub const ALL: [SeoStatus; 3] = [
        SeoStatus::Optimized,
        SeoStatus::NeedsWork,
        SeoStatus::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeoStatus::Optimized => "optimized",
            SeoStatus::NeedsWork => "needs_work",
            SeoStatus::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeoStatus::Optimized => "Optimized",
            SeoStatus::NeedsWork => "Needs work",
            SeoStatus::Critical => "Critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "optimized" => Some(SeoStatus::Optimized),
            "needs_work" => Some(SeoStatus::NeedsWork),
            "critical" => Some(SeoStatus::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for SeoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a score to its status; lower bounds are inclusive
pub fn classify(score: u8) -> SeoStatus {
    if score >= OPTIMIZED_MIN {
        SeoStatus::Optimized
    } else if score >= NEEDS_WORK_MIN {
        SeoStatus::NeedsWork
    } else {
        SeoStatus::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(100), SeoStatus::Optimized);
        assert_eq!(classify(80), SeoStatus::Optimized);
        assert_eq!(classify(79), SeoStatus::NeedsWork);
        assert_eq!(classify(50), SeoStatus::NeedsWork);
        assert_eq!(classify(49), SeoStatus::Critical);
        assert_eq!(classify(0), SeoStatus::Critical);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&SeoStatus::NeedsWork).unwrap();
        assert_eq!(json, "\"needs_work\"");
        let parsed: SeoStatus = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(parsed, SeoStatus::Critical);
    }

    #[test]
    fn test_parse_round_trips_as_str() {
        for status in SeoStatus::ALL {
            assert_eq!(SeoStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SeoStatus::parse("unknown"), None);
    }
}
