use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Normalized GitHub account fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub login: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub blog: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    /// Professional-network profile discovered from bio, links or README.
    pub linkedin_url: Option<String>,
}

/// A non-fork repository owned by the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationIndicators {
    pub has_organizations: bool,
    pub organization_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityEngagement {
    pub public_gists: u32,
    pub followers: u32,
    pub following: u32,
}

/// Aggregates derived from the profile and repository list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionStats {
    /// Repository count per primary language; repositories without a
    /// language are not counted.
    pub languages_used: BTreeMap<String, u32>,
    pub collaboration_indicators: CollaborationIndicators,
    pub community_engagement: CommunityEngagement,
}

impl ContributionStats {
    pub fn derive(
        profile: &ProfileRecord,
        repositories: &[RepositorySummary],
        organization_count: u32,
        public_gists: u32,
    ) -> Self {
        let mut languages_used = BTreeMap::new();
        for language in repositories
            .iter()
            .filter_map(|repo| repo.language.as_deref())
            .filter(|language| !language.is_empty())
        {
            *languages_used.entry(language.to_string()).or_insert(0) += 1;
        }

        Self {
            languages_used,
            collaboration_indicators: CollaborationIndicators {
                has_organizations: organization_count > 0,
                organization_count,
            },
            community_engagement: CommunityEngagement {
                public_gists,
                followers: profile.followers,
                following: profile.following,
            },
        }
    }
}

/// Everything the code-hosting adapter knows about one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeHostEvidence {
    pub profile: ProfileRecord,
    pub repositories: Vec<RepositorySummary>,
    pub contribution_stats: ContributionStats,
}

/// Best-effort structured LinkedIn fields. Values reported as
/// "Not available" by the extractor are stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalProfile {
    #[serde(rename = "Name", default, deserialize_with = "optional_text")]
    pub name: Option<String>,
    #[serde(rename = "Headline", default, deserialize_with = "optional_text")]
    pub headline: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "optional_text")]
    pub location: Option<String>,
    #[serde(rename = "Current Position", default, deserialize_with = "optional_text")]
    pub current_position: Option<String>,
    #[serde(rename = "Previous Experience", default, deserialize_with = "text_list")]
    pub previous_experience: Vec<String>,
    #[serde(rename = "Education", default, deserialize_with = "text_list")]
    pub education: Vec<String>,
    #[serde(rename = "Skills", default, deserialize_with = "text_list")]
    pub skills: Vec<String>,
    #[serde(rename = "About", default, deserialize_with = "optional_text")]
    pub about: Option<String>,
}

impl ProfessionalProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.headline.is_none()
            && self.location.is_none()
            && self.current_position.is_none()
            && self.previous_experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.about.is_none()
    }
}

/// Outcome of a successful professional-profile extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "extraction", rename_all = "snake_case")]
pub enum ProfessionalEvidence {
    /// The agent returned a JSON object that parsed into profile fields.
    Structured {
        profile_url: String,
        profile: ProfessionalProfile,
    },
    /// The agent produced output that was not structured; the profile is
    /// considered empty.
    RawText {
        profile_url: String,
        raw_result: String,
    },
}

impl ProfessionalEvidence {
    /// The structured profile when one was parsed and carries any field.
    pub fn usable_profile(&self) -> Option<&ProfessionalProfile> {
        match self {
            ProfessionalEvidence::Structured { profile, .. } if !profile.is_empty() => {
                Some(profile)
            }
            _ => None,
        }
    }
}

/// Inputs for one candidate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceBundle {
    pub job_requirements: String,
    pub code_host: Option<CodeHostEvidence>,
    pub professional: Option<ProfessionalEvidence>,
}

const NOT_AVAILABLE: &str = "not available";

fn value_to_text(value: Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(text) => text,
        Value::Array(items) => {
            let parts: Vec<String> = items.into_iter().filter_map(value_to_text).collect();
            if parts.is_empty() {
                return None;
            }
            parts.join("; ")
        }
        other => other.to_string(),
    };

    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_AVAILABLE) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value))
}

fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(value_to_text).collect(),
        other => value_to_text(other).into_iter().collect(),
    })
}
