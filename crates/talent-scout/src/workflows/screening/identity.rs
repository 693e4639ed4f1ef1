use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical short key for a candidate, taken from the last path segment of
/// their profile URL. Used as the report folder name and evidence-merge key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateIdentity(pub String);

impl CandidateIdentity {
    /// Returns `None` for empty input, which callers treat as "no identity".
    pub fn from_profile_url(url: &str) -> Option<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        let segment = trimmed.rsplit('/').next().unwrap_or_default();
        if segment.is_empty() {
            None
        } else {
            Some(Self(segment.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
