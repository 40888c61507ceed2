use crate::error::Result;
use crate::tools::{usage_version_command, SubcommandTool, Tool};

pub const SAMTOOLS_MIN_VERSION: &str = "0.1.19";

pub struct Samtools {
    executable: String,
    // samtools 0.1.x has no --version, only "Version: x" in its usage.
    version_command: String,
}

impl Samtools {
    pub fn new() -> Samtools {
        Samtools::with_executable("samtools")
    }

    pub fn with_executable(executable: &str) -> Samtools {
        Samtools {
            executable: executable.to_string(),
            version_command: usage_version_command(executable),
        }
    }

    /// Index a FASTA file, writing `<fasta>.fai` next to it.
    pub fn faidx(&self, fasta: &str) -> Result<()> {
        info!("Indexing {} with samtools faidx ..", fasta);
        self.execute_subcommand("faidx", &[fasta])
    }
}

impl Default for Samtools {
    fn default() -> Self {
        Samtools::new()
    }
}

impl Tool for Samtools {
    fn name(&self) -> &str {
        "samtools"
    }

    fn executable(&self) -> &str {
        &self.executable
    }

    fn min_version(&self) -> Option<&str> {
        Some(SAMTOOLS_MIN_VERSION)
    }

    fn version_command(&self) -> Option<&str> {
        Some(self.version_command.as_str())
    }
}

impl SubcommandTool for Samtools {}
