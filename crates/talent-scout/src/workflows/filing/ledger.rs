use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::debug;

use super::FilingError;

/// Append-only record of candidate profile URLs that already have a
/// durably written report.
#[derive(Debug)]
pub struct ProcessedLedger {
    path: PathBuf,
    entries: HashSet<String>,
}

impl ProcessedLedger {
    /// Loads the ledger at `path`. A missing file is an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FilingError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => contents
                .lines()
                .map(normalize)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashSet::new(),
            Err(source) => return Err(FilingError::Ledger { path, source }),
        };
        debug!(path = %path.display(), entries = entries.len(), "processed ledger loaded");
        Ok(Self { path, entries })
    }

    pub fn contains(&self, profile_url: &str) -> bool {
        self.entries.contains(normalize(profile_url))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends one line to the ledger file. A URL already recorded is not
    /// written twice.
    pub fn append(&mut self, profile_url: &str) -> Result<(), FilingError> {
        let key = normalize(profile_url);
        if key.is_empty() || self.entries.contains(key) {
            return Ok(());
        }

        self.write_line(key).map_err(|source| FilingError::Ledger {
            path: self.path.clone(),
            source,
        })?;
        self.entries.insert(key.to_string());
        Ok(())
    }

    fn write_line(&self, key: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{key}")?;
        file.sync_data()
    }
}

fn normalize(profile_url: &str) -> &str {
    profile_url.trim().trim_end_matches('/')
}
