use std::fs;
use std::io;
use std::path::Path;

/// Job profile used when none is named on the command line.
pub const DEFAULT_JOB_PROFILE: &str = "product_engineer";

/// Reads `<dir>/<profile>.txt`. A missing file yields empty requirements.
pub fn load_job_requirements(dir: &Path, profile: &str) -> io::Result<String> {
    match fs::read_to_string(dir.join(format!("{profile}.txt"))) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err),
    }
}
