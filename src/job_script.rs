use std::path::Path;

use regex::Regex;

use crate::error::{Result, SubmitterError};

lazy_static! {
    static ref JOB_SCRIPT_REGEX: Regex = Regex::new(r"^(\S+)/[^/\s]+\.(\d+)\.sh$").unwrap();
}

/// A job script generated by the workflow engine, named
/// `<tmpdir>/<prefix>.<jobid>.sh`.
#[derive(Debug, Clone, PartialEq)]
pub struct JobScript {
    pub path: String,
    pub tmpdir: String,
    pub jobid: u64,
}

impl JobScript {
    pub fn parse(path: &str) -> Result<JobScript> {
        let captures = JOB_SCRIPT_REGEX
            .captures(path)
            .ok_or_else(|| SubmitterError::MalformedJobScriptPath(path.to_string()))?;
        let jobid = captures[2]
            .parse::<u64>()
            .map_err(|_| SubmitterError::MalformedJobScriptPath(path.to_string()))?;
        let script = JobScript {
            path: path.to_string(),
            tmpdir: captures[1].to_string(),
            jobid,
        };
        debug!("Parsed job script path {:?}", script);
        Ok(script)
    }

    /// Marker file the job script writes on success, polled for by the
    /// workflow engine.
    pub fn completion_marker(&self) -> String {
        format!("{}/{}.jobfinished", self.tmpdir, self.jobid)
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.path)
    }
}
