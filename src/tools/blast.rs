//! Tools from the blast+ suite.

use crate::tools::Tool;

pub const BLAST_MIN_VERSION: &str = "2.2.29";

/// A member of the blast+ suite, e.g. `blastn`. Suite members share a
/// version and report it with `-version`, as in `blastn: 2.2.29+`.
pub struct BlastTool {
    subtool_name: &'static str,
    executable: String,
    version_command: String,
}

impl BlastTool {
    pub fn new(subtool_name: &'static str, executable: &str) -> BlastTool {
        BlastTool {
            subtool_name,
            executable: executable.to_string(),
            version_command: format!("{} -version", executable),
        }
    }

    pub fn blastn() -> BlastTool {
        BlastTool::new("blastn", "blastn")
    }

    pub fn blastn_at(executable: &str) -> BlastTool {
        BlastTool::new("blastn", executable)
    }
}

impl Tool for BlastTool {
    fn name(&self) -> &str {
        self.subtool_name
    }

    fn executable(&self) -> &str {
        &self.executable
    }

    fn min_version(&self) -> Option<&str> {
        Some(BLAST_MIN_VERSION)
    }

    fn version_command(&self) -> Option<&str> {
        Some(self.version_command.as_str())
    }
}
