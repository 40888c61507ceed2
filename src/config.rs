use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SubmitterError};
use crate::{DEFAULT_LOG_PREFIX, DEFAULT_PROJECT, DEFAULT_SCHEDULER};

/// Site settings for building scheduler submissions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmitterConfig {
    /// Project/account passed to `-P`.
    pub project: String,
    /// Scheduler submission executable.
    pub scheduler: String,
    /// Flags used for rules that do not set their own.
    pub default_flags: Option<String>,
    /// Prefix of per-job log files in the log directory.
    pub log_prefix: String,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        SubmitterConfig {
            project: DEFAULT_PROJECT.to_string(),
            scheduler: DEFAULT_SCHEDULER.to_string(),
            default_flags: None,
            log_prefix: DEFAULT_LOG_PREFIX.to_string(),
        }
    }
}

impl SubmitterConfig {
    pub fn from_toml_str(toml_str: &str, path: &Path) -> Result<SubmitterConfig> {
        toml::from_str(toml_str).map_err(|e| SubmitterError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<SubmitterConfig> {
        let path = path.as_ref();
        info!("Reading submitter config from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|e| SubmitterError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        SubmitterConfig::from_toml_str(&contents, path)
    }

    pub fn with_project(mut self, project: Option<&str>) -> Self {
        if let Some(p) = project {
            self.project = p.to_string();
        }
        self
    }

    pub fn with_scheduler(mut self, scheduler: Option<&str>) -> Self {
        if let Some(s) = scheduler {
            self.scheduler = s.to_string();
        }
        self
    }

    pub fn with_default_flags(mut self, flags: Option<&str>) -> Self {
        if let Some(f) = flags {
            self.default_flags = Some(f.to_string());
        }
        self
    }
}
