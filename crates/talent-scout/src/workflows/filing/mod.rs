//! Report classification, filing and the processed ledger.
//!
//! A produced report is written unfiled, routed into a bucket by its
//! recommendation line and only then recorded in the ledger, so a ledger
//! entry always has a report on disk behind it.

pub mod classifier;
pub mod ledger;
pub mod shortlist;
pub mod store;

use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::StorageConfig;
use crate::workflows::screening::CandidateReport;

pub use classifier::{classify, Bucket, Classification, RecommendationTier, ReportLabels};
pub use ledger::ProcessedLedger;
pub use shortlist::{project_shortlist, write_csv, ShortlistEntry};
pub use store::ReportStore;

#[derive(Debug, thiserror::Error)]
pub enum FilingError {
    #[error("failed to store report at {}: {source}", .path.display())]
    Report { path: PathBuf, source: io::Error },
    #[error("failed to update processed ledger {}: {source}", .path.display())]
    Ledger { path: PathBuf, source: io::Error },
    #[error("failed to read shortlisted reports: {0}")]
    Shortlist(#[source] io::Error),
}

/// Where a report ended up and how it was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiledReport {
    pub path: PathBuf,
    pub classification: Option<Classification>,
}

/// Owner of the report store and processed ledger.
#[derive(Debug)]
pub struct ReportDesk {
    store: ReportStore,
    ledger: ProcessedLedger,
}

impl ReportDesk {
    pub fn new(store: ReportStore, ledger: ProcessedLedger) -> Self {
        Self { store, ledger }
    }

    pub fn open(storage: &StorageConfig) -> Result<Self, FilingError> {
        Ok(Self::new(
            ReportStore::new(&storage.candidates_dir),
            ProcessedLedger::open(&storage.ledger_path)?,
        ))
    }

    pub fn candidates_dir(&self) -> &Path {
        self.store.root()
    }

    pub fn ledger(&self) -> &ProcessedLedger {
        &self.ledger
    }

    pub fn is_processed(&self, profile_url: &str) -> bool {
        self.ledger.contains(profile_url)
    }

    /// Writes, routes and records one report. The ledger append happens
    /// last and only after the report is on disk.
    pub fn record(&mut self, report: &CandidateReport) -> Result<FiledReport, FilingError> {
        let unfiled = self
            .store
            .write(&report.identity, &report.text)
            .map_err(|source| FilingError::Report {
                path: self.store.unfiled_path(&report.identity),
                source,
            })?;

        let classification = classify(&report.text);
        let path = match &classification {
            Some(classification) => {
                let target = self
                    .store
                    .file(&report.identity, classification.bucket)
                    .map_err(|source| FilingError::Report {
                        path: self.store.filed_path(classification.bucket, &report.identity),
                        source,
                    })?;
                info!(
                    candidate = %report.identity,
                    bucket = %classification.bucket,
                    recommendation = %classification.recommendation,
                    tier = ?classification.tier,
                    "report filed"
                );
                target
            }
            None => {
                warn!(
                    candidate = %report.identity,
                    path = %unfiled.display(),
                    "report has no recommendation line, left unfiled"
                );
                unfiled
            }
        };

        self.ledger.append(&report.profile_url)?;
        info!(profile_url = %report.profile_url, "candidate marked processed");

        Ok(FiledReport {
            path,
            classification,
        })
    }

    pub fn shortlist(&self) -> Result<Vec<ShortlistEntry>, FilingError> {
        project_shortlist(&self.store).map_err(FilingError::Shortlist)
    }
}
