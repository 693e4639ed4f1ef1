use crate::commands::{
    run_analyze, run_discover, run_shortlist, AnalyzeArgs, DiscoverArgs, ShortlistArgs,
};
use clap::{Parser, Subcommand};
use talent_scout::config::AppConfig;
use talent_scout::error::AppError;
use talent_scout::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "talent-scout",
    about = "Discover, evaluate and shortlist engineering candidates from public GitHub and LinkedIn signals",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Screen stargazers of the reference repositories until the shortlist is full (default command)
    Discover(DiscoverArgs),
    /// Evaluate specific GitHub profiles and print the reports without filing them
    Analyze(AnalyzeArgs),
    /// Print the current shortlist from filed reports
    Shortlist(ShortlistArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Discover(DiscoverArgs::default()));

    match command {
        Command::Discover(args) => run_discover(&config, args),
        Command::Analyze(args) => run_analyze(&config, args),
        Command::Shortlist(args) => run_shortlist(&config, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ShortlistFormat;

    #[test]
    fn discover_flags_parse() {
        let cli = Cli::try_parse_from([
            "talent-scout",
            "discover",
            "--force-reanalysis",
            "--top-n",
            "5",
            "--job-profile",
            "ml_engineer",
        ])
        .expect("arguments parse");
        match cli.command {
            Some(Command::Discover(args)) => {
                assert!(args.force_reanalysis);
                assert_eq!(args.top_n, 5);
                assert_eq!(args.job_profile, "ml_engineer");
            }
            other => panic!("expected discover, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_discover_with_defaults() {
        let cli = Cli::try_parse_from(["talent-scout"]).expect("arguments parse");
        assert!(cli.command.is_none());
        let defaults = DiscoverArgs::default();
        assert_eq!(defaults.top_n, 20);
        assert_eq!(defaults.job_profile, "product_engineer");
        assert!(!defaults.force_reanalysis);
    }

    #[test]
    fn analyze_requires_at_least_one_url() {
        assert!(Cli::try_parse_from(["talent-scout", "analyze"]).is_err());
        let cli = Cli::try_parse_from([
            "talent-scout",
            "analyze",
            "https://github.com/sroecker",
            "https://github.com/aosan",
        ])
        .expect("arguments parse");
        match cli.command {
            Some(Command::Analyze(args)) => assert_eq!(args.github_urls.len(), 2),
            other => panic!("expected analyze, got {other:?}"),
        }
    }

    #[test]
    fn shortlist_accepts_csv_format() {
        let cli = Cli::try_parse_from(["talent-scout", "shortlist", "--format", "csv"])
            .expect("arguments parse");
        match cli.command {
            Some(Command::Shortlist(args)) => {
                assert_eq!(args.format, ShortlistFormat::Csv);
                assert_eq!(args.top_n, 20);
            }
            other => panic!("expected shortlist, got {other:?}"),
        }
    }
}
