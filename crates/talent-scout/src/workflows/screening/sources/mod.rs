//! Evidence source adapters.
//!
//! Each source sits behind a trait so the pipeline can run against the live
//! GitHub API and browser agent, or against in-memory fakes in tests. The
//! collectors in this module absorb source failures and report absent
//! evidence instead of propagating errors.

pub mod browser;
pub mod code_host;
pub mod github;
pub mod links;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::discovery::ReferenceRepository;

pub use browser::{
    BrowseAgent, BrowseError, BrowseRequest, BrowseRun, BrowseStep, HttpBrowseAgent,
    ProfileExtractor,
};
pub use code_host::CodeHostCollector;
pub use github::GitHubClient;
pub use links::discover_linkedin_url;

/// Raw account fields as returned by the code host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub login: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub blog: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub public_gists: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
}

/// Raw repository fields as returned by the code host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    pub html_url: String,
    #[serde(default)]
    pub fork: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user who starred a reference repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stargazer {
    pub login: String,
    pub html_url: String,
}

/// Query surface of the code-hosting platform.
pub trait CodeHostGateway: Send + Sync {
    fn account(&self, login: &str) -> Result<AccountRecord, SourceError>;
    /// Owned repositories, most recently updated first. Forks included.
    fn repositories(&self, login: &str) -> Result<Vec<RepositoryRecord>, SourceError>;
    fn organization_count(&self, login: &str) -> Result<u32, SourceError>;
    /// URLs the user declared as social accounts on their profile.
    fn social_links(&self, login: &str) -> Result<Vec<String>, SourceError>;
    /// Text of the `<login>/<login>` profile README, if one exists.
    fn profile_readme(&self, login: &str) -> Result<Option<String>, SourceError>;
    /// One page (1-based) of stargazers. An empty page ends the population.
    fn stargazers(
        &self,
        repository: &ReferenceRepository,
        page: u32,
    ) -> Result<Vec<Stargazer>, SourceError>;
}

/// Failure talking to an evidence source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("credentials rejected by source")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rate limited by source")]
    RateLimited,
    #[error("source returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected payload: {0}")]
    Decode(String),
}
