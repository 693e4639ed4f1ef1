use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::config::BrowserAgentConfig;
use crate::workflows::discovery::ReferenceRepository;
use crate::workflows::screening::engine::{CompletionEngine, CompletionError};
use crate::workflows::screening::sources::{
    AccountRecord, BrowseAgent, BrowseError, BrowseRequest, BrowseRun, BrowseStep,
    CodeHostGateway, RepositoryRecord, SourceError, Stargazer,
};

pub(super) fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn account(login: &str) -> AccountRecord {
    AccountRecord {
        login: login.to_string(),
        name: Some("Steffen Roecker".to_string()),
        location: Some("Stuttgart".to_string()),
        bio: Some("Building LLM tooling in Python and Rust".to_string()),
        blog: None,
        company: None,
        email: None,
        public_repos: 3,
        public_gists: 2,
        followers: 40,
        following: 7,
        created_at: at(2014, 3, 1),
        updated_at: at(2025, 6, 1),
        html_url: format!("https://github.com/{login}"),
    }
}

pub(super) fn repository(
    name: &str,
    language: Option<&str>,
    fork: bool,
    updated_at: DateTime<Utc>,
) -> RepositoryRecord {
    RepositoryRecord {
        name: name.to_string(),
        description: Some(format!("{name} description")),
        language: language.map(str::to_string),
        stargazers_count: 5,
        html_url: format!("https://github.com/sroecker/{name}"),
        fork,
        created_at: at(2020, 1, 1),
        updated_at,
    }
}

pub(super) fn browser_config() -> BrowserAgentConfig {
    BrowserAgentConfig {
        endpoint: "http://127.0.0.1:9222".to_string(),
        max_steps: 10,
        max_actions_per_step: 3,
        max_failures: 3,
        retry_delay: Duration::ZERO,
    }
}

#[derive(Default)]
pub(super) struct FakeGateway {
    accounts: HashMap<String, AccountRecord>,
    repositories: HashMap<String, Vec<RepositoryRecord>>,
    organizations: HashMap<String, u32>,
    social_links: HashMap<String, Vec<String>>,
    readmes: HashMap<String, String>,
    failing_repositories: bool,
    failing_social_links: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub(super) fn with_account(mut self, account: AccountRecord) -> Self {
        self.accounts.insert(account.login.clone(), account);
        self
    }

    pub(super) fn with_repositories(mut self, login: &str, repos: Vec<RepositoryRecord>) -> Self {
        self.repositories.insert(login.to_string(), repos);
        self
    }

    pub(super) fn with_organizations(mut self, login: &str, count: u32) -> Self {
        self.organizations.insert(login.to_string(), count);
        self
    }

    pub(super) fn with_social_links(mut self, login: &str, links: &[&str]) -> Self {
        self.social_links.insert(
            login.to_string(),
            links.iter().map(|link| link.to_string()).collect(),
        );
        self
    }

    pub(super) fn with_readme(mut self, login: &str, readme: &str) -> Self {
        self.readmes.insert(login.to_string(), readme.to_string());
        self
    }

    pub(super) fn failing_repositories(mut self) -> Self {
        self.failing_repositories = true;
        self
    }

    pub(super) fn failing_social_links(mut self) -> Self {
        self.failing_social_links = true;
        self
    }

    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls mutex").push(call);
    }
}

impl CodeHostGateway for FakeGateway {
    fn account(&self, login: &str) -> Result<AccountRecord, SourceError> {
        self.record(format!("account:{login}"));
        self.accounts
            .get(login)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("/users/{login}")))
    }

    fn repositories(&self, login: &str) -> Result<Vec<RepositoryRecord>, SourceError> {
        self.record(format!("repositories:{login}"));
        if self.failing_repositories {
            return Err(SourceError::RateLimited);
        }
        Ok(self.repositories.get(login).cloned().unwrap_or_default())
    }

    fn organization_count(&self, login: &str) -> Result<u32, SourceError> {
        self.record(format!("organizations:{login}"));
        Ok(self.organizations.get(login).copied().unwrap_or_default())
    }

    fn social_links(&self, login: &str) -> Result<Vec<String>, SourceError> {
        self.record(format!("social:{login}"));
        if self.failing_social_links {
            return Err(SourceError::Transport("connection reset".to_string()));
        }
        Ok(self.social_links.get(login).cloned().unwrap_or_default())
    }

    fn profile_readme(&self, login: &str) -> Result<Option<String>, SourceError> {
        self.record(format!("readme:{login}"));
        Ok(self.readmes.get(login).cloned())
    }

    fn stargazers(
        &self,
        repository: &ReferenceRepository,
        page: u32,
    ) -> Result<Vec<Stargazer>, SourceError> {
        self.record(format!("stargazers:{repository}:{page}"));
        Ok(Vec::new())
    }
}

#[derive(Default)]
pub(super) struct FakeAgent {
    scripted: Mutex<VecDeque<Result<BrowseRun, BrowseError>>>,
    requests: Mutex<Vec<BrowseRequest>>,
}

impl FakeAgent {
    pub(super) fn scripted(runs: Vec<Result<BrowseRun, BrowseError>>) -> Self {
        Self {
            scripted: Mutex::new(runs.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn requests(&self) -> Vec<BrowseRequest> {
        self.requests.lock().expect("requests mutex").clone()
    }
}

impl BrowseAgent for FakeAgent {
    fn run(&self, request: &BrowseRequest) -> Result<BrowseRun, BrowseError> {
        self.requests
            .lock()
            .expect("requests mutex")
            .push(request.clone());
        self.scripted
            .lock()
            .expect("scripted mutex")
            .pop_front()
            .unwrap_or_else(|| Err(BrowseError::Decode("no scripted run".to_string())))
    }
}

pub(super) fn run_ending_on(url: &str, result: &str) -> BrowseRun {
    BrowseRun {
        history: vec![
            BrowseStep {
                url: Some("about:blank".to_string()),
                result: None,
            },
            BrowseStep {
                url: Some(url.to_string()),
                result: Some(result.to_string()),
            },
        ],
    }
}

pub(super) struct FakeEngine {
    reply: Option<String>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl FakeEngine {
    pub(super) fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().expect("prompts mutex").clone()
    }
}

impl CompletionEngine for FakeEngine {
    fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        self.prompts
            .lock()
            .expect("prompts mutex")
            .push((system.to_string(), user.to_string()));
        self.reply.clone().ok_or(CompletionError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        })
    }
}
