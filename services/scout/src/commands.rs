use crate::infra::Adapters;
use chrono::Utc;
use clap::{Args, ValueEnum};
use talent_scout::config::AppConfig;
use talent_scout::error::AppError;
use talent_scout::workflows::discovery::{DiscoveryDriver, DiscoveryError, DiscoveryOptions};
use talent_scout::workflows::filing::{
    project_shortlist, write_csv, ReportDesk, ReportStore, ShortlistEntry,
};
use talent_scout::workflows::screening::{load_job_requirements, DEFAULT_JOB_PROFILE};
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct DiscoverArgs {
    /// Re-evaluate candidates already recorded in the processed ledger
    #[arg(long)]
    pub(crate) force_reanalysis: bool,
    /// Stop once this many candidates are shortlisted
    #[arg(long, default_value_t = 20)]
    pub(crate) top_n: usize,
    /// Job requirements profile (file stem under the job requirements directory)
    #[arg(long, default_value = DEFAULT_JOB_PROFILE)]
    pub(crate) job_profile: String,
}

impl Default for DiscoverArgs {
    fn default() -> Self {
        Self {
            force_reanalysis: false,
            top_n: 20,
            job_profile: DEFAULT_JOB_PROFILE.to_string(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// GitHub profile URLs to evaluate
    #[arg(required = true)]
    pub(crate) github_urls: Vec<String>,
    /// Job requirements profile (file stem under the job requirements directory)
    #[arg(long, default_value = DEFAULT_JOB_PROFILE)]
    pub(crate) job_profile: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ShortlistFormat {
    Text,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct ShortlistArgs {
    /// Number of candidates to print
    #[arg(long, default_value_t = 20)]
    pub(crate) top_n: usize,
    /// Output format
    #[arg(long, value_enum, default_value_t = ShortlistFormat::Text)]
    pub(crate) format: ShortlistFormat,
}

pub(crate) fn run_discover(config: &AppConfig, args: DiscoverArgs) -> Result<(), AppError> {
    let DiscoverArgs {
        force_reanalysis,
        top_n,
        job_profile,
    } = args;

    let job_requirements = read_requirements(config, &job_profile)?;
    let mut desk = ReportDesk::open(&config.storage)?;
    let adapters = Adapters::connect(config)?;
    let driver = DiscoveryDriver::new(
        adapters.gateway.clone(),
        adapters.screening_service(config),
        config.discovery.clone(),
        job_requirements,
    );

    println!("Analyzing candidates until at least {top_n} are shortlisted...");
    let options = DiscoveryOptions {
        force_reanalysis,
        top_n,
    };
    let outcome = match driver.run(&mut desk, options, Utc::now()) {
        Ok(outcome) => outcome,
        Err(DiscoveryError::NoSuitableCandidates) => {
            println!("\nNo suitable candidates found!");
            return Err(DiscoveryError::NoSuitableCandidates.into());
        }
        Err(err) => return Err(err.into()),
    };

    println!(
        "Visited {} stargazers | {} filed | {} already processed | {} inactive | {} without report",
        outcome.visited, outcome.filed, outcome.already_processed, outcome.stale, outcome.unreported
    );
    println!("\nTop {top_n} Shortlisted Candidates ({job_profile}):");
    println!("{}", "=".repeat(50));
    render_shortlist(&outcome.shortlist);
    println!("\nReports filed under {}", desk.candidates_dir().display());
    Ok(())
}

pub(crate) fn run_analyze(config: &AppConfig, args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        github_urls,
        job_profile,
    } = args;

    let job_requirements = read_requirements(config, &job_profile)?;
    let adapters = Adapters::connect(config)?;
    let service = adapters.screening_service(config);

    println!("Starting candidate analysis...");
    let total = github_urls.len();
    for (index, url) in github_urls.iter().enumerate() {
        println!(
            "\n{rule}\nANALYZING CANDIDATE {}/{total}: {url}\n{rule}",
            index + 1,
            rule = "#".repeat(60)
        );
        match service.evaluate(url, &job_requirements) {
            Some(report) => println!("{}", report.text),
            None => println!("No report produced for {url}."),
        }
    }
    println!("\nAnalysis complete.");
    Ok(())
}

pub(crate) fn run_shortlist(config: &AppConfig, args: ShortlistArgs) -> Result<(), AppError> {
    let store = ReportStore::new(&config.storage.candidates_dir);
    let mut shortlist = project_shortlist(&store)?;
    shortlist.truncate(args.top_n);

    match args.format {
        ShortlistFormat::Csv => write_csv(&shortlist, std::io::stdout().lock())?,
        ShortlistFormat::Text if shortlist.is_empty() => {
            println!("No shortlisted candidates under {}.", store.root().display());
        }
        ShortlistFormat::Text => render_shortlist(&shortlist),
    }
    Ok(())
}

fn read_requirements(config: &AppConfig, job_profile: &str) -> Result<String, AppError> {
    let text = load_job_requirements(&config.storage.job_requirements_dir, job_profile)?;
    if text.trim().is_empty() {
        warn!(
            job_profile,
            dir = %config.storage.job_requirements_dir.display(),
            "no job requirements found, evaluating without them"
        );
    }
    Ok(text)
}

fn render_shortlist(entries: &[ShortlistEntry]) {
    for (index, entry) in entries.iter().enumerate() {
        println!("\n{}. {}", index + 1, entry.name);
        println!("   Location: {}", entry.location);
        println!("   LinkedIn: {}", entry.linkedin);
        println!("   GitHub: {}", entry.github);
        println!("   Evaluation Status: {}", entry.evaluation_status);
        println!("   Report: {}", entry.report_path.display());
        println!(
            "   Last Updated: {}",
            entry.last_updated.format("%Y-%m-%d %H:%M UTC")
        );
    }
}
