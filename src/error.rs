use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SubmitterError>;

#[derive(Debug, Error)]
pub enum SubmitterError {
    #[error("Job script path '{0}' does not match <tmpdir>/<prefix>.<jobid>.sh")]
    MalformedJobScriptPath(String),

    #[error("No '# properties = ...' line found in job script {}", .0.display())]
    MissingJobProperties(PathBuf),

    #[error("Failed to parse job properties in {}: {source}", .path.display())]
    InvalidJobProperties {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read config file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Scheduler exited with status {status:?}: {stderr}")]
    SchedulerInvocationFailure { status: Option<i32>, stderr: String },

    #[error("Could not find a job id in scheduler response: {0:?}")]
    UnparsableSchedulerResponse(String),

    #[error("Could not find an available {0} executable")]
    ToolNotFound(String),

    #[error("Version check failed for {tool}: {message}")]
    ToolVersion { tool: String, message: String },

    #[error("{tool} exited with status {status:?}")]
    ToolFailure { tool: String, status: Option<i32> },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SubmitterError {
    /// Process exit status to report for this error. Scheduler failures pass
    /// the scheduler's own status through.
    pub fn exit_code(&self) -> i32 {
        match self {
            SubmitterError::SchedulerInvocationFailure {
                status: Some(code), ..
            } if *code != 0 => *code,
            SubmitterError::ToolFailure {
                status: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
