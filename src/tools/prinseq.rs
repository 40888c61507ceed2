use crate::tools::Tool;

/// prinseq-lite is a single perl script, used from a pre-existing location.
pub struct Prinseq {
    executable: String,
}

impl Prinseq {
    pub fn new() -> Prinseq {
        Prinseq::with_executable("prinseq-lite.pl")
    }

    pub fn with_executable(executable: &str) -> Prinseq {
        Prinseq {
            executable: executable.to_string(),
        }
    }
}

impl Default for Prinseq {
    fn default() -> Self {
        Prinseq::new()
    }
}

impl Tool for Prinseq {
    fn name(&self) -> &str {
        "prinseq"
    }

    fn executable(&self) -> &str {
        &self.executable
    }
}
