use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::classifier::{Bucket, ReportLabels};
use super::store::{ReportStore, REPORT_FILE};

const UNKNOWN: &str = "Unknown";
const UNVERIFIED: &str = "Unable to verify";
const LIMITED: &str = "Limited";

/// One shortlisted candidate as read back from a filed report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortlistEntry {
    pub name: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub evaluation_status: String,
    pub report_path: PathBuf,
    pub last_updated: DateTime<Utc>,
    #[serde(skip)]
    has_github: bool,
}

impl ShortlistEntry {
    /// Projects report labels onto the entry, falling back to fixed
    /// placeholders for every missing label.
    pub fn from_report(report: &str, report_path: PathBuf, last_updated: DateTime<Utc>) -> Self {
        let labels = ReportLabels::parse(report);
        Self {
            name: labels.name.unwrap_or_else(|| UNKNOWN.to_string()),
            location: labels.location.unwrap_or_else(|| UNVERIFIED.to_string()),
            linkedin: labels.linkedin.unwrap_or_else(|| UNVERIFIED.to_string()),
            has_github: labels.github.is_some(),
            github: labels.github.unwrap_or_else(|| UNKNOWN.to_string()),
            evaluation_status: labels
                .recommendation
                .unwrap_or_else(|| LIMITED.to_string()),
            report_path,
            last_updated,
        }
    }

    /// GitHub link used to deduplicate entries, when the report carried one.
    pub fn github_key(&self) -> Option<&str> {
        self.has_github.then_some(self.github.as_str())
    }
}

/// Reads every report in the shortlist buckets. Entries sharing a GitHub
/// link collapse to the most recently modified report; the result is
/// ordered newest first.
pub fn project_shortlist(store: &ReportStore) -> io::Result<Vec<ShortlistEntry>> {
    let mut by_github: HashMap<String, ShortlistEntry> = HashMap::new();
    let mut unkeyed = Vec::new();

    for bucket in Bucket::SHORTLISTED {
        for path in reports_in(&store.bucket_dir(bucket))? {
            let text = fs::read_to_string(&path)?;
            let modified: DateTime<Utc> = fs::metadata(&path)?.modified()?.into();
            let entry = ShortlistEntry::from_report(&text, path, modified);

            match entry.github_key().map(str::to_string) {
                Some(key) => {
                    let newer = by_github
                        .get(&key)
                        .map_or(true, |existing| entry.last_updated > existing.last_updated);
                    if newer {
                        by_github.insert(key, entry);
                    }
                }
                None => unkeyed.push(entry),
            }
        }
    }

    let mut entries: Vec<ShortlistEntry> = by_github.into_values().chain(unkeyed).collect();
    entries.sort_by(|a, b| {
        b.last_updated
            .cmp(&a.last_updated)
            .then_with(|| a.report_path.cmp(&b.report_path))
    });
    Ok(entries)
}

/// `<dir>/*/report.md`, skipping anything that is not a candidate folder.
fn reports_in(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let listing = match fs::read_dir(dir) {
        Ok(listing) => listing,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let mut reports = Vec::new();
    for entry in listing {
        let report = entry?.path().join(REPORT_FILE);
        if report.is_file() {
            reports.push(report);
        }
    }
    Ok(reports)
}

/// Writes the entries as CSV with a header row.
pub fn write_csv<W: io::Write>(entries: &[ShortlistEntry], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in entries {
        csv_writer.serialize(entry)?;
    }
    csv_writer.flush()?;
    Ok(())
}
