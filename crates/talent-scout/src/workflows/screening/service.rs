use std::sync::Arc;

use tracing::{info, warn};

use super::composer::{compose_instructions, EVALUATION_REQUEST};
use super::domain::EvidenceBundle;
use super::engine::CompletionEngine;
use super::identity::CandidateIdentity;
use super::sources::{BrowseAgent, CodeHostCollector, CodeHostGateway, ProfileExtractor};
use crate::config::BrowserAgentConfig;

/// Report text produced for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateReport {
    pub identity: CandidateIdentity,
    pub profile_url: String,
    pub text: String,
}

/// Service composing the evidence collectors, instruction composer and
/// completion engine into a single candidate evaluation.
pub struct CandidateScreeningService<G, B, E> {
    code_host: CodeHostCollector<G>,
    extractor: ProfileExtractor<B>,
    engine: Arc<E>,
}

impl<G, B, E> CandidateScreeningService<G, B, E>
where
    G: CodeHostGateway,
    B: BrowseAgent,
    E: CompletionEngine,
{
    pub fn new(
        gateway: Arc<G>,
        agent: Arc<B>,
        engine: Arc<E>,
        browser: &BrowserAgentConfig,
    ) -> Self {
        Self {
            code_host: CodeHostCollector::new(gateway),
            extractor: ProfileExtractor::new(agent, browser),
            engine,
        }
    }

    /// Collects whatever evidence is reachable. Neither source failing
    /// prevents the other from contributing.
    pub fn gather_evidence(
        &self,
        identity: Option<&CandidateIdentity>,
        job_requirements: &str,
    ) -> EvidenceBundle {
        let code_host = identity.and_then(|identity| self.code_host.collect(identity));

        let professional = code_host
            .as_ref()
            .and_then(|evidence| evidence.profile.linkedin_url.as_deref())
            .and_then(|linkedin_url| {
                info!(%linkedin_url, "linkedin profile discovered");
                self.extractor.extract(linkedin_url)
            });

        EvidenceBundle {
            job_requirements: job_requirements.to_string(),
            code_host,
            professional,
        }
    }

    /// Evaluates the candidate behind `profile_url`. Returns `None` when the
    /// URL carries no identity or the completion engine fails; neither case
    /// is an error for the caller.
    pub fn evaluate(&self, profile_url: &str, job_requirements: &str) -> Option<CandidateReport> {
        let Some(identity) = CandidateIdentity::from_profile_url(profile_url) else {
            warn!(%profile_url, "profile url has no candidate identity");
            return None;
        };

        let bundle = self.gather_evidence(Some(&identity), job_requirements);
        let instructions = compose_instructions(&bundle);

        match self.engine.complete(&instructions, EVALUATION_REQUEST) {
            Ok(text) => {
                info!(candidate = %identity, "evaluation report produced");
                Some(CandidateReport {
                    identity,
                    profile_url: profile_url.to_string(),
                    text,
                })
            }
            Err(err) => {
                warn!(candidate = %identity, error = %err, "no evaluation report produced");
                None
            }
        }
    }
}
