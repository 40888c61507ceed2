use crate::error::Result;
use crate::tools::{usage_version_command, SubcommandTool, Tool};

pub const BWA_MIN_VERSION: &str = "0.7.10";

pub struct Bwa {
    executable: String,
    // bwa has no --version flag, it prints "Version: x" in its usage.
    version_command: String,
}

impl Bwa {
    pub fn new() -> Bwa {
        Bwa::with_executable("bwa")
    }

    pub fn with_executable(executable: &str) -> Bwa {
        Bwa {
            executable: executable.to_string(),
            version_command: usage_version_command(executable),
        }
    }

    pub fn index(&self, fasta: &str) -> Result<()> {
        info!("Building bwa index of {} ..", fasta);
        self.execute_subcommand("index", &[fasta])
    }
}

impl Default for Bwa {
    fn default() -> Self {
        Bwa::new()
    }
}

impl Tool for Bwa {
    fn name(&self) -> &str {
        "bwa"
    }

    fn executable(&self) -> &str {
        &self.executable
    }

    fn min_version(&self) -> Option<&str> {
        Some(BWA_MIN_VERSION)
    }

    fn version_command(&self) -> Option<&str> {
        Some(self.version_command.as_str())
    }
}

impl SubcommandTool for Bwa {}
