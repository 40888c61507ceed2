use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{Result, SubmitterError};

const PROPERTIES_PREFIX: &str = "# properties = ";

/// Job metadata embedded by the workflow engine in each generated job script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobProperties {
    pub rule: String,
    pub jobid: u64,
    #[serde(default)]
    pub params: RuleParams,
}

/// The rule `params` recognised by the submitter. Any other keys are
/// workflow-specific and ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RuleParams {
    /// Rule-specific scheduler flags (queue, memory, runtime, ...).
    #[serde(rename = "LSF", default, deserialize_with = "string_like")]
    pub scheduler_flags: Option<String>,
    /// Human readable identifier used instead of the job id in job names.
    #[serde(default, deserialize_with = "string_like")]
    pub logid: Option<String>,
}

impl RuleParams {
    /// The logid, if set to something non-empty.
    pub fn non_empty_logid(&self) -> Option<&str> {
        self.logid.as_deref().filter(|l| !l.is_empty())
    }
}

// Snakemake params are arbitrary python values, so accept scalars and
// render them as text.
fn string_like<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or scalar, found {}",
            other
        ))),
    }
}

impl JobProperties {
    pub fn from_json(json: &str, path: &Path) -> Result<JobProperties> {
        serde_json::from_str(json).map_err(|e| SubmitterError::InvalidJobProperties {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Read the properties line from a job script.
    pub fn read_from_job_script<P: AsRef<Path>>(job_script: P) -> Result<JobProperties> {
        let path = job_script.as_ref();
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            if let Some(json) = line.strip_prefix(PROPERTIES_PREFIX) {
                let props = JobProperties::from_json(json, path)?;
                debug!("Read job properties {:?} from {}", props, path.display());
                return Ok(props);
            }
        }
        Err(SubmitterError::MissingJobProperties(path.to_path_buf()))
    }
}
