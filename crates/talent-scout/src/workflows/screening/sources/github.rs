use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::runtime::Runtime;
use tracing::debug;

use super::{AccountRecord, CodeHostGateway, RepositoryRecord, SourceError, Stargazer};
use crate::config::GitHubConfig;
use crate::workflows::discovery::ReferenceRepository;

const USER_AGENT: &str = "talent-scout/0.1 (candidate screening)";
const API_VERSION: &str = "2022-11-28";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";
const PER_PAGE: usize = 100;

/// GitHub REST API client exposing the blocking [`CodeHostGateway`] surface.
///
/// Requests run on a shared tokio runtime so the screening pipeline can stay
/// synchronous.
pub struct GitHubClient {
    http: Client,
    api_url: String,
    runtime: Arc<Runtime>,
}

#[derive(Debug, Deserialize)]
struct SocialAccount {
    url: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig, runtime: Arc<Runtime>) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| SourceError::Transport(err.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| SourceError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            runtime,
        })
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    async fn send(
        &self,
        path: &str,
        query: &[(&str, String)],
        accept: &'static str,
    ) -> Result<Response, SourceError> {
        let url = format!("{}{}", self.api_url, path);
        debug!(%url, "querying github");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, accept)
            .query(query)
            .send()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let rate_limited = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|value| value.to_str().ok())
            == Some("0");

        match status {
            StatusCode::UNAUTHORIZED => Err(SourceError::Unauthorized),
            StatusCode::NOT_FOUND => Err(SourceError::NotFound(path.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(SourceError::RateLimited),
            StatusCode::FORBIDDEN if rate_limited => Err(SourceError::RateLimited),
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(SourceError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        self.send(path, query, JSON_MEDIA_TYPE)
            .await?
            .json::<T>()
            .await
            .map_err(|err| SourceError::Decode(err.to_string()))
    }

    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, SourceError> {
        let mut items = Vec::new();
        let mut page = 1u32;
        loop {
            let mut paged = query.to_vec();
            paged.push(("per_page", PER_PAGE.to_string()));
            paged.push(("page", page.to_string()));

            let batch: Vec<T> = self.get_json(path, &paged).await?;
            let exhausted = batch.len() < PER_PAGE;
            items.extend(batch);
            if exhausted {
                return Ok(items);
            }
            page += 1;
        }
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl CodeHostGateway for GitHubClient {
    fn account(&self, login: &str) -> Result<AccountRecord, SourceError> {
        self.block_on(self.get_json(&format!("/users/{login}"), &[]))
    }

    fn repositories(&self, login: &str) -> Result<Vec<RepositoryRecord>, SourceError> {
        let query = [
            ("type", "owner".to_string()),
            ("sort", "updated".to_string()),
            ("direction", "desc".to_string()),
        ];
        self.block_on(self.get_all_pages(&format!("/users/{login}/repos"), &query))
    }

    fn organization_count(&self, login: &str) -> Result<u32, SourceError> {
        let organizations: Vec<serde_json::Value> =
            self.block_on(self.get_all_pages(&format!("/users/{login}/orgs"), &[]))?;
        Ok(organizations.len() as u32)
    }

    fn social_links(&self, login: &str) -> Result<Vec<String>, SourceError> {
        let accounts: Vec<SocialAccount> =
            self.block_on(self.get_json(&format!("/users/{login}/social_accounts"), &[]))?;
        Ok(accounts.into_iter().map(|account| account.url).collect())
    }

    fn profile_readme(&self, login: &str) -> Result<Option<String>, SourceError> {
        let path = format!("/repos/{login}/{login}/readme");
        self.block_on(async {
            match self.send(&path, &[], RAW_MEDIA_TYPE).await {
                Ok(response) => response
                    .text()
                    .await
                    .map(Some)
                    .map_err(|err| SourceError::Decode(err.to_string())),
                Err(SourceError::NotFound(_)) => Ok(None),
                Err(err) => Err(err),
            }
        })
    }

    fn stargazers(
        &self,
        repository: &ReferenceRepository,
        page: u32,
    ) -> Result<Vec<Stargazer>, SourceError> {
        let path = format!(
            "/repos/{}/{}/stargazers",
            repository.owner, repository.name
        );
        let query = [
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ];
        self.block_on(self.get_json(&path, &query))
    }
}
