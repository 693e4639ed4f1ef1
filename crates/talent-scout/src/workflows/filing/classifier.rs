use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Storage area a filed report is routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    StronglyShortlist,
    Shortlist,
    Reject,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::StronglyShortlist, Bucket::Shortlist, Bucket::Reject];

    /// Buckets whose reports make up the shortlist.
    pub const SHORTLISTED: [Bucket; 2] = [Bucket::Shortlist, Bucket::StronglyShortlist];

    pub fn dir_name(self) -> &'static str {
        match self {
            Bucket::StronglyShortlist => "strongly_shortlist",
            Bucket::Shortlist => "shortlist",
            Bucket::Reject => "reject",
        }
    }

    /// Routes a recommendation value. Anything that does not mention a
    /// shortlist lands in `reject`, including "Neutral" and unknown text.
    pub fn for_recommendation(recommendation: &str) -> Self {
        let lowered = recommendation.to_lowercase();
        if lowered.contains("strongly shortlist") {
            Bucket::StronglyShortlist
        } else if lowered.contains("shortlist") {
            Bucket::Shortlist
        } else {
            Bucket::Reject
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The five recommendation levels the engine is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecommendationTier {
    StronglyShortlist,
    Shortlist,
    Neutral,
    Reject,
    StronglyReject,
}

impl RecommendationTier {
    pub fn label(self) -> &'static str {
        match self {
            RecommendationTier::StronglyShortlist => "Strongly Shortlist",
            RecommendationTier::Shortlist => "Shortlist",
            RecommendationTier::Neutral => "Neutral",
            RecommendationTier::Reject => "Reject",
            RecommendationTier::StronglyReject => "Strongly Reject",
        }
    }

    /// Best-effort reading of free recommendation text. Longer tier names
    /// are checked before the names they contain.
    pub fn parse(recommendation: &str) -> Option<Self> {
        let lowered = recommendation.to_lowercase();
        [
            RecommendationTier::StronglyShortlist,
            RecommendationTier::Shortlist,
            RecommendationTier::StronglyReject,
            RecommendationTier::Reject,
            RecommendationTier::Neutral,
        ]
        .into_iter()
        .find(|tier| lowered.contains(&tier.label().to_lowercase()))
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Routing decision for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Recommendation value exactly as written in the report, trimmed.
    pub recommendation: String,
    pub tier: Option<RecommendationTier>,
    pub bucket: Bucket,
}

/// Classifies a report by its first `**Recommendation:**` line. Reports
/// without one are not classified.
pub fn classify(report: &str) -> Option<Classification> {
    let recommendation = ReportLabels::parse(report).recommendation?;
    Some(Classification {
        tier: RecommendationTier::parse(&recommendation),
        bucket: Bucket::for_recommendation(&recommendation),
        recommendation,
    })
}

/// Labelled header lines a report is expected to carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportLabels {
    pub name: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub recommendation: Option<String>,
}

struct LabelPatterns {
    name: Regex,
    location: Regex,
    linkedin: Regex,
    github: Regex,
    recommendation: Regex,
}

fn label_patterns() -> &'static LabelPatterns {
    static PATTERNS: OnceLock<LabelPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let label = |name: &str| {
            Regex::new(&format!(r"\*\*{name}:\*\*\s*([^\n]+)")).expect("label pattern compiles")
        };
        LabelPatterns {
            name: label("Name"),
            location: label("Location"),
            linkedin: label("LinkedIn"),
            github: label("GitHub"),
            recommendation: label("Recommendation"),
        }
    })
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

impl ReportLabels {
    pub fn parse(report: &str) -> Self {
        let patterns = label_patterns();
        Self {
            name: capture(&patterns.name, report),
            location: capture(&patterns.location, report),
            linkedin: capture(&patterns.linkedin, report),
            github: capture(&patterns.github, report),
            recommendation: capture(&patterns.recommendation, report),
        }
    }
}
