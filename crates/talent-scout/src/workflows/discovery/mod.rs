//! Stargazer-driven candidate discovery.
//!
//! Walks the stargazers of each reference repository in order and pushes
//! every fresh, recently active account through screening and filing until
//! the shortlist holds the requested number of candidates.

pub mod recency;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::DiscoveryConfig;
use crate::workflows::filing::{FiledReport, FilingError, ReportDesk, ShortlistEntry};
use crate::workflows::screening::sources::{
    BrowseAgent, CodeHostGateway, SourceError, Stargazer,
};
use crate::workflows::screening::{CandidateScreeningService, CompletionEngine};

pub use recency::RecencyGate;

/// `owner/name` of a repository whose stargazers form the candidate pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceRepository {
    pub owner: String,
    pub name: String,
}

impl ReferenceRepository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses `owner/name`. Both parts must be non-empty and contain no
    /// further separators.
    pub fn parse(raw: &str) -> Option<Self> {
        let (owner, name) = raw.trim().split_once('/')?;
        let (owner, name) = (owner.trim(), name.trim());
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name))
    }
}

impl fmt::Display for ReferenceRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("failed to list stargazers of {repository}: {source}")]
    Stargazers {
        repository: String,
        source: SourceError,
    },
    #[error("failed to fetch account {login}: {source}")]
    Account { login: String, source: SourceError },
    #[error(transparent)]
    Filing(#[from] FilingError),
    #[error("no suitable candidates found")]
    NoSuitableCandidates,
}

/// Per-run switches chosen by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    pub force_reanalysis: bool,
    pub top_n: usize,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            force_reanalysis: false,
            top_n: 20,
        }
    }
}

/// What happened to a single stargazer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateDisposition {
    /// Already in the processed ledger; nothing was fetched.
    AlreadyProcessed,
    /// Account last updated before the recency cutoff.
    Stale { updated_at: DateTime<Utc> },
    /// The engine produced no report; the candidate stays unprocessed.
    NoReport,
    Filed(FiledReport),
}

/// Counters and final shortlist for one discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryOutcome {
    pub shortlist: Vec<ShortlistEntry>,
    pub visited: usize,
    pub already_processed: usize,
    pub stale: usize,
    pub unreported: usize,
    pub filed: usize,
}

pub struct DiscoveryDriver<G, B, E> {
    gateway: Arc<G>,
    screening: CandidateScreeningService<G, B, E>,
    config: DiscoveryConfig,
    job_requirements: String,
}

impl<G, B, E> DiscoveryDriver<G, B, E>
where
    G: CodeHostGateway,
    B: BrowseAgent,
    E: CompletionEngine,
{
    pub fn new(
        gateway: Arc<G>,
        screening: CandidateScreeningService<G, B, E>,
        config: DiscoveryConfig,
        job_requirements: String,
    ) -> Self {
        Self {
            gateway,
            screening,
            config,
            job_requirements,
        }
    }

    /// Screens one stargazer end to end: ledger check, account fetch,
    /// recency gate, evaluation and filing.
    pub fn screen(
        &self,
        desk: &mut ReportDesk,
        stargazer: &Stargazer,
        gate: &RecencyGate,
        force_reanalysis: bool,
    ) -> Result<CandidateDisposition, DiscoveryError> {
        if !force_reanalysis && desk.is_processed(&stargazer.html_url) {
            debug!(login = %stargazer.login, "already processed, skipping");
            return Ok(CandidateDisposition::AlreadyProcessed);
        }

        let account =
            self.gateway
                .account(&stargazer.login)
                .map_err(|source| DiscoveryError::Account {
                    login: stargazer.login.clone(),
                    source,
                })?;

        if !gate.admits(account.updated_at) {
            debug!(
                login = %stargazer.login,
                updated_at = %account.updated_at,
                cutoff = %gate.cutoff(),
                "inactive account, skipping"
            );
            return Ok(CandidateDisposition::Stale {
                updated_at: account.updated_at,
            });
        }

        info!(login = %stargazer.login, "screening candidate");
        match self
            .screening
            .evaluate(&stargazer.html_url, &self.job_requirements)
        {
            Some(report) => Ok(CandidateDisposition::Filed(desk.record(&report)?)),
            None => Ok(CandidateDisposition::NoReport),
        }
    }

    /// Runs discovery until the shortlist reaches `options.top_n` or every
    /// reference repository is exhausted. `now` fixes the recency cutoff
    /// for the whole run.
    pub fn run(
        &self,
        desk: &mut ReportDesk,
        options: DiscoveryOptions,
        now: DateTime<Utc>,
    ) -> Result<DiscoveryOutcome, DiscoveryError> {
        let gate = RecencyGate::new(now, self.config.recency_window_days);
        let mut outcome = DiscoveryOutcome {
            shortlist: desk.shortlist()?,
            ..DiscoveryOutcome::default()
        };
        let mut seen: HashSet<String> = outcome
            .shortlist
            .iter()
            .filter_map(ShortlistEntry::github_key)
            .map(normalize_profile_url)
            .collect();

        info!(
            target_size = options.top_n,
            shortlisted = outcome.shortlist.len(),
            cutoff = %gate.cutoff(),
            "discovery started"
        );

        'repositories: for repository in &self.config.reference_repos {
            let mut page = 1;
            loop {
                if outcome.shortlist.len() >= options.top_n {
                    break 'repositories;
                }

                let stargazers = self.gateway.stargazers(repository, page).map_err(|source| {
                    DiscoveryError::Stargazers {
                        repository: repository.to_string(),
                        source,
                    }
                })?;
                if stargazers.is_empty() {
                    debug!(%repository, pages = page - 1, "stargazers exhausted");
                    break;
                }

                for stargazer in &stargazers {
                    if outcome.shortlist.len() >= options.top_n {
                        break 'repositories;
                    }
                    let key = normalize_profile_url(&stargazer.html_url);
                    if seen.contains(&key) {
                        continue;
                    }

                    outcome.visited += 1;
                    match self.screen(desk, stargazer, &gate, options.force_reanalysis)? {
                        CandidateDisposition::AlreadyProcessed => outcome.already_processed += 1,
                        CandidateDisposition::Stale { .. } => outcome.stale += 1,
                        CandidateDisposition::NoReport => outcome.unreported += 1,
                        CandidateDisposition::Filed(_) => {
                            outcome.filed += 1;
                            seen.insert(key);
                            outcome.shortlist = desk.shortlist()?;
                        }
                    }
                }
                page += 1;
            }
        }

        info!(
            visited = outcome.visited,
            filed = outcome.filed,
            shortlisted = outcome.shortlist.len(),
            "discovery finished"
        );

        if outcome.shortlist.is_empty() {
            return Err(DiscoveryError::NoSuitableCandidates);
        }
        outcome.shortlist.truncate(options.top_n);
        Ok(outcome)
    }
}

fn normalize_profile_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_repository_parses_owner_and_name() {
        let repo = ReferenceRepository::parse(" Shubhamsaboo/awesome-llm-apps ").expect("parses");
        assert_eq!(repo, ReferenceRepository::new("Shubhamsaboo", "awesome-llm-apps"));
        assert_eq!(repo.to_string(), "Shubhamsaboo/awesome-llm-apps");
    }

    #[test]
    fn reference_repository_rejects_malformed_input() {
        for raw in ["", "awesome-llm-apps", "/repo", "owner/", "a/b/c"] {
            assert_eq!(ReferenceRepository::parse(raw), None, "{raw:?}");
        }
    }
}
