use std::sync::Arc;

use tracing::{debug, warn};

use super::links::{discover_linkedin_url, is_code_host_link};
use super::{AccountRecord, CodeHostGateway, RepositoryRecord, SourceError};
use crate::workflows::screening::domain::{
    CodeHostEvidence, ContributionStats, ProfileRecord, RepositorySummary,
};
use crate::workflows::screening::identity::CandidateIdentity;

/// Builds normalized code-hosting evidence for a candidate.
pub struct CodeHostCollector<G> {
    gateway: Arc<G>,
}

impl<G> CodeHostCollector<G>
where
    G: CodeHostGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Returns `None` when the account, repositories or organizations cannot
    /// be fetched. Failures while looking for a LinkedIn link only disable
    /// link discovery.
    pub fn collect(&self, identity: &CandidateIdentity) -> Option<CodeHostEvidence> {
        match self.try_collect(identity) {
            Ok(evidence) => Some(evidence),
            Err(err) => {
                warn!(candidate = %identity, error = %err, "github evidence unavailable");
                None
            }
        }
    }

    fn try_collect(&self, identity: &CandidateIdentity) -> Result<CodeHostEvidence, SourceError> {
        let login = identity.as_str();
        let account = self.gateway.account(login)?;
        let mut records = self.gateway.repositories(login)?;
        let organization_count = self.gateway.organization_count(login)?;

        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        let repositories: Vec<RepositorySummary> = records
            .into_iter()
            .filter(|record| !record.fork)
            .map(summarize_repository)
            .collect();

        let linkedin_url = self.discover_linkedin(&account);
        let profile = profile_record(&account, linkedin_url);
        let contribution_stats = ContributionStats::derive(
            &profile,
            &repositories,
            organization_count,
            account.public_gists,
        );

        debug!(
            candidate = %identity,
            repositories = repositories.len(),
            linkedin = profile.linkedin_url.is_some(),
            "github evidence collected"
        );

        Ok(CodeHostEvidence {
            profile,
            repositories,
            contribution_stats,
        })
    }

    fn discover_linkedin(&self, account: &AccountRecord) -> Option<String> {
        let mut text = String::new();

        if let Some(bio) = &account.bio {
            text.push_str(bio);
            text.push(' ');
        }
        if let Some(blog) = account.blog.as_deref().filter(|blog| !is_code_host_link(blog)) {
            text.push_str(blog);
            text.push(' ');
        }

        match self.gateway.social_links(&account.login) {
            Ok(links) => {
                for link in links
                    .iter()
                    .filter(|link| link.starts_with("http") && !is_code_host_link(link))
                {
                    text.push_str(link);
                    text.push(' ');
                }
            }
            Err(err) => debug!(login = %account.login, error = %err, "social links unavailable"),
        }

        match self.gateway.profile_readme(&account.login) {
            Ok(Some(readme)) => {
                text.push_str(&readme);
                text.push(' ');
            }
            Ok(None) => {}
            Err(err) => debug!(login = %account.login, error = %err, "profile readme unavailable"),
        }

        discover_linkedin_url(&text)
    }
}

fn profile_record(account: &AccountRecord, linkedin_url: Option<String>) -> ProfileRecord {
    ProfileRecord {
        login: account.login.clone(),
        name: account.name.clone(),
        location: account.location.clone(),
        bio: account.bio.clone(),
        blog: account.blog.clone().filter(|blog| !blog.is_empty()),
        company: account.company.clone(),
        email: account.email.clone(),
        public_repos: account.public_repos,
        followers: account.followers,
        following: account.following,
        created_at: account.created_at,
        updated_at: account.updated_at,
        html_url: account.html_url.clone(),
        linkedin_url,
    }
}

fn summarize_repository(record: RepositoryRecord) -> RepositorySummary {
    RepositorySummary {
        name: record.name,
        description: record.description,
        language: record.language,
        stars: record.stargazers_count,
        html_url: record.html_url,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
