use std::fs::{self, File};
use std::time::{Duration, SystemTime};

use talent_scout::config::StorageConfig;
use talent_scout::workflows::filing::{
    project_shortlist, write_csv, Bucket, RecommendationTier, ReportDesk, ReportStore,
};
use talent_scout::workflows::screening::{CandidateIdentity, CandidateReport};

fn storage(dir: &std::path::Path) -> StorageConfig {
    StorageConfig {
        candidates_dir: dir.join("candidates"),
        ledger_path: dir.join("processed_candidates.txt"),
        job_requirements_dir: dir.join("job_requirements"),
    }
}

fn report(login: &str, text: &str) -> CandidateReport {
    CandidateReport {
        identity: CandidateIdentity(login.to_string()),
        profile_url: format!("https://github.com/{login}"),
        text: text.to_string(),
    }
}

#[test]
fn recommendation_case_variants_route_to_expected_buckets() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut desk = ReportDesk::open(&storage(dir.path())).expect("desk opens");

    let cases = [
        ("one", "STRONGLY SHORTLIST", Bucket::StronglyShortlist, RecommendationTier::StronglyShortlist),
        ("two", "shortlist - solid Python record", Bucket::Shortlist, RecommendationTier::Shortlist),
        ("three", "neutral", Bucket::Reject, RecommendationTier::Neutral),
        ("four", "Reject", Bucket::Reject, RecommendationTier::Reject),
        ("five", "Strongly reject", Bucket::Reject, RecommendationTier::StronglyReject),
    ];

    for (login, value, bucket, tier) in cases {
        let filed = desk
            .record(&report(login, &format!("Analysis\n**Recommendation:** {value}\n")))
            .expect("recorded");
        let classification = filed.classification.expect("classified");
        assert_eq!(classification.bucket, bucket, "{value}");
        assert_eq!(classification.tier, Some(tier), "{value}");
        assert_eq!(classification.recommendation, value);
        assert_eq!(
            filed.path,
            dir.path()
                .join("candidates")
                .join(bucket.dir_name())
                .join(login)
                .join("report.md")
        );
    }

    assert_eq!(desk.ledger().len(), 5);
}

#[test]
fn recommendation_only_report_projects_placeholders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut desk = ReportDesk::open(&storage(dir.path())).expect("desk opens");
    desk.record(&report("quiet", "**Recommendation:** Strongly Shortlist"))
        .expect("recorded");

    let shortlist = desk.shortlist().expect("shortlist");
    assert_eq!(shortlist.len(), 1);
    let entry = &shortlist[0];
    assert_eq!(entry.name, "Unknown");
    assert_eq!(entry.location, "Unable to verify");
    assert_eq!(entry.linkedin, "Unable to verify");
    assert_eq!(entry.github, "Unknown");
    assert_eq!(entry.evaluation_status, "Strongly Shortlist");
}

#[test]
fn shortlist_ordering_follows_modification_time_across_buckets() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut desk = ReportDesk::open(&storage(dir.path())).expect("desk opens");
    let logins = [
        ("oldest", "Strongly Shortlist", 900),
        ("middle", "Shortlist", 600),
        ("newest", "Strongly Shortlist", 30),
    ];
    for (login, value, age) in logins {
        let filed = desk
            .record(&report(
                login,
                &format!("**Name:** {login}\n**GitHub:** https://github.com/{login}\n**Recommendation:** {value}"),
            ))
            .expect("recorded");
        File::options()
            .write(true)
            .open(&filed.path)
            .expect("report opens")
            .set_modified(SystemTime::now() - Duration::from_secs(age))
            .expect("mtime set");
    }

    let store = ReportStore::new(dir.path().join("candidates"));
    let names: Vec<String> = project_shortlist(&store)
        .expect("shortlist")
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["newest", "middle", "oldest"]);

    let mut csv = Vec::new();
    write_csv(&project_shortlist(&store).expect("shortlist"), &mut csv).expect("csv");
    let csv = String::from_utf8(csv).expect("utf8");
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.lines().nth(1).is_some_and(|row| row.starts_with("newest,")));
}

#[test]
fn unfiled_reports_stay_out_of_the_shortlist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut desk = ReportDesk::open(&storage(dir.path())).expect("desk opens");
    let filed = desk
        .record(&report("draft", "**Name:** Draft\nThe engine stopped early."))
        .expect("recorded");

    assert!(filed.classification.is_none());
    assert_eq!(
        fs::read_to_string(&filed.path).expect("unfiled report"),
        "**Name:** Draft\nThe engine stopped early."
    );
    assert!(desk.shortlist().expect("shortlist").is_empty());
    assert!(desk.is_processed("https://github.com/draft"));
}
