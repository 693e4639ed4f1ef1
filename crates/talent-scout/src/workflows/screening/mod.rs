//! Candidate screening: identity resolution, evidence collection, instruction
//! composition and report generation for a single candidate.

pub mod composer;
pub mod domain;
pub mod engine;
pub mod identity;
pub mod requirements;
pub mod service;
pub mod sources;

#[cfg(test)]
mod tests;

pub use composer::{compose_instructions, EVALUATION_REQUEST, NOT_PROVIDED};
pub use domain::{
    CodeHostEvidence, CollaborationIndicators, CommunityEngagement, ContributionStats,
    EvidenceBundle, ProfessionalEvidence, ProfessionalProfile, ProfileRecord, RepositorySummary,
};
pub use engine::{CompletionEngine, CompletionError, OpenAiClient};
pub use identity::CandidateIdentity;
pub use requirements::{load_job_requirements, DEFAULT_JOB_PROFILE};
pub use service::{CandidateReport, CandidateScreeningService};
