use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use crate::config::BrowserAgentConfig;
use crate::workflows::screening::domain::{ProfessionalEvidence, ProfessionalProfile};

/// Task handed to a browse-and-extract agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseRequest {
    pub task: String,
    pub start_url: String,
    pub max_steps: u32,
    pub max_actions_per_step: u32,
}

/// One recorded agent step: where the page was and what the step produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseStep {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

/// Full step history of a finished agent run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseRun {
    #[serde(default)]
    pub history: Vec<BrowseStep>,
}

impl BrowseRun {
    /// Address of the last page the agent reported being on.
    pub fn final_url(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .find_map(|step| step.url.as_deref())
    }

    fn results(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.history
            .iter()
            .filter_map(|step| step.result.as_deref())
            .filter(|result| !result.trim().is_empty())
    }
}

/// External browser automation capable of following a navigation task.
pub trait BrowseAgent: Send + Sync {
    fn run(&self, request: &BrowseRequest) -> Result<BrowseRun, BrowseError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    #[error("browser agent unreachable: {0}")]
    Transport(String),
    #[error("browser agent timed out")]
    Timeout,
    #[error("browser agent rejected the task (status {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("browser agent returned an unreadable run: {0}")]
    Decode(String),
}

impl BrowseError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            BrowseError::Transport(_) | BrowseError::Timeout => true,
            BrowseError::Rejected { status, .. } => *status == 429 || *status >= 500,
            BrowseError::Decode(_) => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ExtractionError {
    #[error("agent produced no result")]
    NoResult,
    #[error("agent ended on {resolved:?} instead of {requested}")]
    AddressMismatch {
        requested: String,
        resolved: Option<String>,
    },
    #[error(transparent)]
    Agent(#[from] BrowseError),
}

/// Drives a [`BrowseAgent`] to read a LinkedIn profile within a fixed
/// step and retry budget.
pub struct ProfileExtractor<B> {
    agent: Arc<B>,
    max_steps: u32,
    max_actions_per_step: u32,
    max_failures: u32,
    retry_delay: Duration,
}

impl<B> ProfileExtractor<B>
where
    B: BrowseAgent,
{
    pub fn new(agent: Arc<B>, config: &BrowserAgentConfig) -> Self {
        Self {
            agent,
            max_steps: config.max_steps,
            max_actions_per_step: config.max_actions_per_step,
            max_failures: config.max_failures.max(1),
            retry_delay: config.retry_delay,
        }
    }

    /// Returns `None` when the agent fails, produces nothing, or ends up on
    /// a page other than the requested profile.
    pub fn extract(&self, profile_url: &str) -> Option<ProfessionalEvidence> {
        match self.try_extract(profile_url) {
            Ok(evidence) => {
                info!(%profile_url, "linkedin profile extracted");
                Some(evidence)
            }
            Err(err) => {
                warn!(%profile_url, error = %err, "linkedin profile unavailable");
                None
            }
        }
    }

    fn try_extract(&self, profile_url: &str) -> Result<ProfessionalEvidence, ExtractionError> {
        let request = BrowseRequest {
            task: extraction_task(profile_url),
            start_url: profile_url.to_string(),
            max_steps: self.max_steps,
            max_actions_per_step: self.max_actions_per_step,
        };

        let run = self.run_with_retries(&request)?;

        if run.results().next().is_none() {
            return Err(ExtractionError::NoResult);
        }

        let resolved = run.final_url();
        if !resolved.is_some_and(|resolved| same_profile_address(resolved, profile_url)) {
            return Err(ExtractionError::AddressMismatch {
                requested: profile_url.to_string(),
                resolved: resolved.map(str::to_string),
            });
        }

        Ok(parse_run(&run, profile_url))
    }

    fn run_with_retries(&self, request: &BrowseRequest) -> Result<BrowseRun, BrowseError> {
        let mut attempt = 1;
        loop {
            match self.agent.run(request) {
                Ok(run) => return Ok(run),
                Err(err) if err.is_transient() && attempt < self.max_failures => {
                    warn!(
                        attempt,
                        max_failures = self.max_failures,
                        error = %err,
                        "browser agent attempt failed, retrying"
                    );
                    attempt += 1;
                    if !self.retry_delay.is_zero() {
                        std::thread::sleep(self.retry_delay);
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn extraction_task(profile_url: &str) -> String {
    format!(
        "Navigate directly to {profile_url} and extract the profile information.\n\
         Steps:\n\
         1. Go directly to {profile_url}\n\
         2. Extract: Name, Headline (job title and company), Location, Current Position details, \
         Previous Experience, Education, Skills, About/Summary.\n\
         Do not use Google or any other search engine. Only visit the provided URL.\n\
         Return the data as a JSON object with keys: Name, Headline, Location, Current Position, \
         Previous Experience, Education, Skills, About.\n\
         Mark any missing information as \"Not available\"."
    )
}

/// Newest JSON object result wins; otherwise fall back to the newest raw text.
fn parse_run(run: &BrowseRun, profile_url: &str) -> ProfessionalEvidence {
    for result in run.results().rev() {
        let candidate = strip_json_fences(result);
        if !candidate.starts_with('{') {
            continue;
        }
        match serde_json::from_str::<ProfessionalProfile>(candidate) {
            Ok(profile) => {
                return ProfessionalEvidence::Structured {
                    profile_url: profile_url.to_string(),
                    profile,
                }
            }
            Err(err) => debug!(%profile_url, error = %err, "agent result is not a profile object"),
        }
    }

    ProfessionalEvidence::RawText {
        profile_url: profile_url.to_string(),
        raw_result: run.results().last().unwrap_or_default().to_string(),
    }
}

/// Strips ```json ... ``` or ``` ... ``` fences that agents like to add.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}

fn profile_address(url: &str) -> String {
    let lowered = url.trim().to_ascii_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);
    let end = without_www.find(['?', '#']).unwrap_or(without_www.len());
    without_www[..end].trim_end_matches('/').to_string()
}

/// Compares two profile addresses ignoring scheme, `www.`, case, query,
/// fragment and trailing separators.
pub(crate) fn same_profile_address(resolved: &str, requested: &str) -> bool {
    profile_address(resolved) == profile_address(requested)
}

/// [`BrowseAgent`] backed by a browser-automation service reachable over HTTP.
/// Runs are submitted to `<endpoint>/runs` and the step history is returned
/// once the run finishes.
pub struct HttpBrowseAgent {
    http: Client,
    endpoint: String,
    runtime: Arc<Runtime>,
}

impl HttpBrowseAgent {
    pub fn new(config: &BrowserAgentConfig, runtime: Arc<Runtime>) -> Result<Self, BrowseError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|err| BrowseError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            runtime,
        })
    }

    async fn submit(&self, request: &BrowseRequest) -> Result<BrowseRun, BrowseError> {
        let response = self
            .http
            .post(format!("{}/runs", self.endpoint))
            .json(request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    BrowseError::Timeout
                } else {
                    BrowseError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BrowseError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<BrowseRun>()
            .await
            .map_err(|err| BrowseError::Decode(err.to_string()))
    }
}

impl std::fmt::Debug for HttpBrowseAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBrowseAgent")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl BrowseAgent for HttpBrowseAgent {
    fn run(&self, request: &BrowseRequest) -> Result<BrowseRun, BrowseError> {
        debug!(url = %request.start_url, max_steps = request.max_steps, "submitting browse task");
        self.runtime.block_on(self.submit(request))
    }
}
