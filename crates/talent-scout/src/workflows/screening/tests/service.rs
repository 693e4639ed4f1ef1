use std::sync::Arc;

use super::common::*;
use crate::workflows::screening::composer::EVALUATION_REQUEST;
use crate::workflows::screening::identity::CandidateIdentity;
use crate::workflows::screening::service::CandidateScreeningService;

type Service = CandidateScreeningService<FakeGateway, FakeAgent, FakeEngine>;

fn service(gateway: FakeGateway, agent: FakeAgent, engine: FakeEngine) -> (
    Service,
    Arc<FakeGateway>,
    Arc<FakeAgent>,
    Arc<FakeEngine>,
) {
    let gateway = Arc::new(gateway);
    let agent = Arc::new(agent);
    let engine = Arc::new(engine);
    let service = CandidateScreeningService::new(
        gateway.clone(),
        agent.clone(),
        engine.clone(),
        &browser_config(),
    );
    (service, gateway, agent, engine)
}

#[test]
fn candidate_without_linkedin_is_evaluated_on_github_alone() {
    let gateway = FakeGateway::default()
        .with_account(account("sroecker"))
        .with_repositories(
            "sroecker",
            vec![repository("llm-tools", Some("Python"), false, at(2025, 5, 1))],
        );
    let (service, _gateway, agent, engine) = service(
        gateway,
        FakeAgent::default(),
        FakeEngine::replying("**Recommendation:** Shortlist"),
    );

    let report = service
        .evaluate("https://github.com/sroecker", "Rust and Python")
        .expect("report produced");

    assert_eq!(report.identity, CandidateIdentity("sroecker".to_string()));
    assert_eq!(report.text, "**Recommendation:** Shortlist");
    assert!(agent.requests().is_empty(), "no linkedin link to extract");

    let prompts = engine.prompts();
    assert_eq!(prompts.len(), 1);
    let (system, user) = &prompts[0];
    assert_eq!(user, EVALUATION_REQUEST);
    assert!(system.contains("LinkedIn: Not provided"));
    assert!(!system.contains("LinkedIn: {}"));
    assert!(system.contains("Rust and Python"));
}

#[test]
fn discovered_linkedin_profile_is_extracted_and_embedded() {
    let mut profile = account("aosan");
    profile.bio = Some("AI engineer | linkedin.com/in/alosan".to_string());
    let gateway = FakeGateway::default().with_account(profile);
    let agent = FakeAgent::scripted(vec![Ok(run_ending_on(
        "https://www.linkedin.com/in/alosan/",
        r#"{"Name": "Alex Osan", "Location": "London, UK"}"#,
    ))]);
    let (service, _gateway, agent, engine) =
        service(gateway, agent, FakeEngine::replying("**Recommendation:** Neutral"));

    service
        .evaluate("https://github.com/aosan/", "")
        .expect("report produced");

    assert_eq!(agent.requests().len(), 1);
    assert_eq!(agent.requests()[0].start_url, "https://linkedin.com/in/alosan");
    let (system, _) = &engine.prompts()[0];
    assert!(system.contains("\"Location\": \"London, UK\""));
}

#[test]
fn linkedin_failure_does_not_block_evaluation() {
    let mut profile = account("aosan");
    profile.bio = Some("in/alosan".to_string());
    let gateway = FakeGateway::default().with_account(profile);
    let (service, _gateway, _agent, engine) = service(
        gateway,
        FakeAgent::default(),
        FakeEngine::replying("**Recommendation:** Reject"),
    );

    assert!(service.evaluate("https://github.com/aosan", "").is_some());
    let (system, _) = &engine.prompts()[0];
    assert!(system.contains("LinkedIn: Not provided"));
}

#[test]
fn github_failure_still_asks_the_engine() {
    let (service, _gateway, _agent, engine) = service(
        FakeGateway::default(),
        FakeAgent::default(),
        FakeEngine::replying("**Recommendation:** Strongly Reject"),
    );

    assert!(service.evaluate("https://github.com/ghost", "").is_some());
    let (system, _) = &engine.prompts()[0];
    assert!(system.contains("GitHub: Not provided"));
}

#[test]
fn engine_failure_produces_no_report() {
    let (service, _gateway, _agent, engine) = service(
        FakeGateway::default().with_account(account("sroecker")),
        FakeAgent::default(),
        FakeEngine::failing(),
    );

    assert!(service.evaluate("https://github.com/sroecker", "").is_none());
    assert_eq!(engine.prompts().len(), 1);
}

#[test]
fn url_without_identity_touches_no_source() {
    let (service, gateway, _agent, engine) = service(
        FakeGateway::default(),
        FakeAgent::default(),
        FakeEngine::replying("unused"),
    );

    assert!(service.evaluate("", "").is_none());
    assert!(gateway.calls().is_empty());
    assert!(engine.prompts().is_empty());
}
