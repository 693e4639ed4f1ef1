use std::sync::Arc;

use talent_scout::config::AppConfig;
use talent_scout::error::AppError;
use talent_scout::workflows::screening::sources::{GitHubClient, HttpBrowseAgent};
use talent_scout::workflows::screening::{CandidateScreeningService, OpenAiClient};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

pub(crate) type LiveScreeningService =
    CandidateScreeningService<GitHubClient, HttpBrowseAgent, OpenAiClient>;

/// Live adapters sharing one runtime.
pub(crate) struct Adapters {
    pub(crate) gateway: Arc<GitHubClient>,
    pub(crate) agent: Arc<HttpBrowseAgent>,
    pub(crate) engine: Arc<OpenAiClient>,
}

impl Adapters {
    pub(crate) fn connect(config: &AppConfig) -> Result<Self, AppError> {
        config.github.require_token()?;
        let api_key = config.llm.require_api_key()?;
        let runtime = build_runtime()?;

        let gateway = GitHubClient::new(&config.github, runtime.clone())?;
        let agent = HttpBrowseAgent::new(&config.browser, runtime.clone())?;
        let engine = OpenAiClient::new(&config.llm, api_key, runtime)?;
        debug!(
            github = %config.github.api_url,
            browser_agent = %config.browser.endpoint,
            model = %engine.model(),
            "adapters ready"
        );

        Ok(Self {
            gateway: Arc::new(gateway),
            agent: Arc::new(agent),
            engine: Arc::new(engine),
        })
    }

    pub(crate) fn screening_service(&self, config: &AppConfig) -> LiveScreeningService {
        CandidateScreeningService::new(
            self.gateway.clone(),
            self.agent.clone(),
            self.engine.clone(),
            &config.browser,
        )
    }
}

fn build_runtime() -> Result<Arc<Runtime>, AppError> {
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    Ok(Arc::new(runtime))
}
