use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::workflows::discovery::ReferenceRepository;

const DEFAULT_REFERENCE_REPOS: &str =
    "Shubhamsaboo/awesome-llm-apps,aishwaryanr/awesome-generative-ai-guide";

/// Top-level configuration for the scouting pipeline.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github: GitHubConfig,
    pub llm: LlmConfig,
    pub browser: BrowserAgentConfig,
    pub discovery: DiscoveryConfig,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let github = GitHubConfig {
            token: optional_var("GITHUB_TOKEN"),
            api_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
        };

        let llm = LlmConfig {
            api_key: optional_var("OPENAI_API_KEY"),
            api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4.1".to_string()),
            max_output_tokens: parse_var("OPENAI_MAX_OUTPUT_TOKENS", 4000)?,
        };

        let browser = BrowserAgentConfig {
            endpoint: env::var("BROWSER_AGENT_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:9222".to_string()),
            max_steps: parse_var("BROWSER_AGENT_MAX_STEPS", 10)?,
            max_actions_per_step: parse_var("BROWSER_AGENT_MAX_ACTIONS_PER_STEP", 3)?,
            max_failures: parse_var("BROWSER_AGENT_MAX_FAILURES", 3)?,
            retry_delay: Duration::from_secs(parse_var("BROWSER_AGENT_RETRY_DELAY_SECS", 5)?),
        };

        let reference_repos = env::var("SCOUT_REFERENCE_REPOS")
            .unwrap_or_else(|_| DEFAULT_REFERENCE_REPOS.to_string());
        let discovery = DiscoveryConfig {
            recency_window_days: parse_var("SCOUT_RECENCY_DAYS", 90)?,
            reference_repos: parse_reference_repos(&reference_repos)?,
        };

        let storage = StorageConfig {
            candidates_dir: path_var("SCOUT_CANDIDATES_DIR", "candidates"),
            ledger_path: path_var("SCOUT_LEDGER_PATH", "processed_candidates.txt"),
            job_requirements_dir: path_var("SCOUT_JOB_REQUIREMENTS_DIR", "job_requirements"),
        };

        let log_level = env::var("SCOUT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            github,
            llm,
            browser,
            discovery,
            storage,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// GitHub REST API access.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub token: Option<String>,
    pub api_url: String,
}

/// Recommendation engine settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub max_output_tokens: u32,
}

/// Budgets for the browse-and-extract agent used on professional profiles.
#[derive(Debug, Clone)]
pub struct BrowserAgentConfig {
    pub endpoint: String,
    pub max_steps: u32,
    pub max_actions_per_step: u32,
    pub max_failures: u32,
    pub retry_delay: Duration,
}

/// Population and admission settings for the discovery driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Accounts not updated within this many days are skipped.
    pub recency_window_days: u32,
    /// Repositories whose stargazers are screened, in order.
    pub reference_repos: Vec<ReferenceRepository>,
}

/// On-disk locations for reports, the processed ledger and job requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub candidates_dir: PathBuf,
    pub ledger_path: PathBuf,
    pub job_requirements_dir: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    InvalidReferenceRepo { value: String },
    MissingVar { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative integer (got '{value}')")
            }
            ConfigError::InvalidReferenceRepo { value } => {
                write!(f, "SCOUT_REFERENCE_REPOS entry '{value}' is not owner/repo")
            }
            ConfigError::MissingVar { key } => {
                write!(f, "required environment variable {key} is not set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl GitHubConfig {
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token
            .as_deref()
            .ok_or(ConfigError::MissingVar { key: "GITHUB_TOKEN" })
    }
}

impl LlmConfig {
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingVar {
                key: "OPENAI_API_KEY",
            })
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn path_var(key: &str, default: &str) -> PathBuf {
    PathBuf::from(env::var(key).unwrap_or_else(|_| default.to_string()))
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        Err(_) => Ok(default),
    }
}

fn parse_reference_repos(raw: &str) -> Result<Vec<ReferenceRepository>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            ReferenceRepository::parse(entry).ok_or_else(|| ConfigError::InvalidReferenceRepo {
                value: entry.to_string(),
            })
        })
        .collect()
}
