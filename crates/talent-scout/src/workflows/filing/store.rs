use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::classifier::Bucket;
use crate::workflows::screening::CandidateIdentity;

pub const REPORT_FILE: &str = "report.md";

/// Directory tree holding one `report.md` per candidate, either unfiled at
/// `<root>/<identity>/` or filed at `<root>/<bucket>/<identity>/`.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn unfiled_path(&self, identity: &CandidateIdentity) -> PathBuf {
        self.root.join(identity.as_str()).join(REPORT_FILE)
    }

    pub fn bucket_dir(&self, bucket: Bucket) -> PathBuf {
        self.root.join(bucket.dir_name())
    }

    pub fn filed_path(&self, bucket: Bucket, identity: &CandidateIdentity) -> PathBuf {
        self.bucket_dir(bucket).join(identity.as_str()).join(REPORT_FILE)
    }

    /// Writes the report to the candidate's unfiled location, replacing any
    /// earlier unfiled report.
    pub fn write(&self, identity: &CandidateIdentity, text: &str) -> io::Result<PathBuf> {
        let path = self.unfiled_path(identity);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, text)?;
        Ok(path)
    }

    /// Moves the unfiled report into `bucket`. Copies of the same candidate
    /// in the other buckets are removed so a candidate is filed at most once.
    pub fn file(&self, identity: &CandidateIdentity, bucket: Bucket) -> io::Result<PathBuf> {
        let source = self.unfiled_path(identity);
        let target = self.filed_path(bucket, identity);

        for other in Bucket::ALL {
            let stale = self.bucket_dir(other).join(identity.as_str());
            if other != bucket && stale.is_dir() {
                fs::remove_dir_all(&stale)?;
            }
        }

        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::rename(&source, &target)?;

        if let Some(dir) = source.parent() {
            // Only succeeds when the unfiled folder is now empty.
            let _ = fs::remove_dir(dir);
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(login: &str) -> CandidateIdentity {
        CandidateIdentity(login.to_string())
    }

    #[test]
    fn filing_moves_the_report_into_its_bucket() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ReportStore::new(dir.path());
        let sroecker = identity("sroecker");

        let unfiled = store.write(&sroecker, "**Recommendation:** Shortlist").expect("write");
        assert_eq!(unfiled, dir.path().join("sroecker").join("report.md"));

        let filed = store.file(&sroecker, Bucket::Shortlist).expect("file");
        assert_eq!(filed, dir.path().join("shortlist").join("sroecker").join("report.md"));
        assert!(!unfiled.exists());
        assert!(!dir.path().join("sroecker").exists());
        assert_eq!(
            fs::read_to_string(filed).expect("filed report"),
            "**Recommendation:** Shortlist"
        );
    }

    #[test]
    fn refiling_removes_copies_from_other_buckets() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ReportStore::new(dir.path());
        let aosan = identity("aosan");

        store.write(&aosan, "**Recommendation:** Reject").expect("write");
        store.file(&aosan, Bucket::Reject).expect("file");
        store.write(&aosan, "**Recommendation:** Shortlist").expect("rewrite");
        store.file(&aosan, Bucket::Shortlist).expect("refile");

        assert!(!store.filed_path(Bucket::Reject, &aosan).exists());
        assert!(store.filed_path(Bucket::Shortlist, &aosan).exists());
    }
}
