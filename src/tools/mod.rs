//! Wrappers around the external command line tools used by the pipeline.
//! Tools are not installed here, only located and invoked.

pub mod blast;
pub mod bwa;
pub mod prinseq;
pub mod samtools;

use std::path::Path;
use std::process::{Command, Stdio};

use bird_tool_utils::external_command_checker::check_for_external_command_presence;
use regex::Regex;
use semver::Version;

use crate::error::{Result, SubmitterError};

pub use self::blast::BlastTool;
pub use self::bwa::Bwa;
pub use self::prinseq::Prinseq;
pub use self::samtools::Samtools;

lazy_static! {
    static ref VERSION_REGEX: Regex = Regex::new(r"\d+(\.\d+){0,2}").unwrap();
}

/// First version-like token in `output`, padded to major.minor.patch.
/// Suffixes such as `-r1188` or `+` are dropped.
pub fn parse_version(output: &str) -> Option<Version> {
    let found = VERSION_REGEX.find(output)?.as_str();
    let mut parts: Vec<&str> = found.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    Version::parse(&parts.join(".")).ok()
}

pub trait Tool {
    /// Display name, used in log and error messages.
    fn name(&self) -> &str;

    /// Program name to look up on PATH, or an explicit path.
    fn executable(&self) -> &str;

    fn min_version(&self) -> Option<&str> {
        None
    }

    /// Shell command printing the version, for tools without a `--version`
    /// flag. Defaults to `<executable> --version`.
    fn version_command(&self) -> Option<&str> {
        None
    }

    /// Version reported by the tool, or a ToolVersion error if its output
    /// holds none.
    fn version(&self) -> Result<Version> {
        let version_command = match self.version_command() {
            Some(c) => c.to_string(),
            None => format!("{} --version", self.executable()),
        };
        debug!("Running {} version command: {}", self.name(), version_command);
        let output = Command::new("sh")
            .arg("-c")
            .arg(&version_command)
            .stdin(Stdio::null())
            .output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_version(&stdout).ok_or_else(|| SubmitterError::ToolVersion {
            tool: self.name().to_string(),
            message: format!(
                "Unable to parse a version from the output of '{}': {:?}",
                version_command,
                stdout.trim()
            ),
        })
    }

    /// Check that the tool is present and recent enough.
    fn check(&self) -> Result<()> {
        let executable = self.executable();
        if executable.contains('/') {
            if !Path::new(executable).is_file() {
                error!("{} not found at {}", self.name(), executable);
                return Err(SubmitterError::ToolNotFound(self.name().to_string()));
            }
        } else {
            check_for_external_command_presence(self.name(), &format!("which {}", executable))
                .map_err(|_| SubmitterError::ToolNotFound(self.name().to_string()))?;
        }
        if let Some(min_version) = self.min_version() {
            let found = self.version()?;
            let required = parse_version(min_version).ok_or_else(|| SubmitterError::ToolVersion {
                tool: self.name().to_string(),
                message: format!("Invalid minimum version {}", min_version),
            })?;
            if found < required {
                error!(
                    "{} version {} is older than the required {}",
                    self.name(),
                    found,
                    required
                );
                return Err(SubmitterError::ToolVersion {
                    tool: self.name().to_string(),
                    message: format!("Found version {}, need at least {}", found, min_version),
                });
            }
            debug!("{} version {} is sufficient", self.name(), found);
        }
        debug!("Found {} at {}", self.name(), executable);
        Ok(())
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(self.executable());
        cmd.args(args);
        cmd
    }

    /// Run the tool with inherited stdio and wait for it.
    fn execute(&self, args: &[&str]) -> Result<()> {
        let mut cmd = self.command(args);
        debug!("Running {} command: {:?}", self.name(), &cmd);
        let status = cmd.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(SubmitterError::ToolFailure {
                tool: self.name().to_string(),
                status: status.code(),
            })
        }
    }

    /// Run the tool and return what it wrote to stdout.
    fn execute_with_output(&self, args: &[&str]) -> Result<String> {
        let mut cmd = self.command(args);
        cmd.stdin(Stdio::null());
        debug!("Running {} command: {:?}", self.name(), &cmd);
        let output = cmd.output()?;
        if !output.status.success() {
            error!(
                "{} failed with status {:?}: {}",
                self.name(),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(SubmitterError::ToolFailure {
                tool: self.name().to_string(),
                status: output.status.code(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Tools driven through subcommands, e.g. `samtools faidx`.
pub trait SubcommandTool: Tool {
    fn subcommand(&self, subcommand: &str, args: &[&str]) -> Command {
        self.command(&with_subcommand(subcommand, args))
    }

    fn execute_subcommand(&self, subcommand: &str, args: &[&str]) -> Result<()> {
        self.execute(&with_subcommand(subcommand, args))
    }
}

fn with_subcommand<'a>(subcommand: &'a str, args: &[&'a str]) -> Vec<&'a str> {
    let mut full = Vec::with_capacity(args.len() + 1);
    full.push(subcommand);
    full.extend_from_slice(args);
    full
}

/// Shell command printing the `Version: x` line of a tool's usage text,
/// for tools like bwa and old samtools which have no `--version`.
pub(crate) fn usage_version_command(executable: &str) -> String {
    format!(
        "{} 2>&1 | grep '^Version:' | sed 's/Version: //'",
        executable
    )
}

pub const TOOL_NAMES: &[&str] = &["samtools", "bwa", "blastn", "prinseq"];

/// Look up a tool by its name, optionally at an explicit path.
pub fn tool_by_name(name: &str, executable: Option<&str>) -> Option<Box<dyn Tool>> {
    match name {
        "samtools" => Some(Box::new(match executable {
            Some(e) => Samtools::with_executable(e),
            None => Samtools::new(),
        })),
        "bwa" => Some(Box::new(match executable {
            Some(e) => Bwa::with_executable(e),
            None => Bwa::new(),
        })),
        "blastn" => Some(Box::new(match executable {
            Some(e) => BlastTool::blastn_at(e),
            None => BlastTool::blastn(),
        })),
        "prinseq" => Some(Box::new(match executable {
            Some(e) => Prinseq::with_executable(e),
            None => Prinseq::new(),
        })),
        _ => None,
    }
}
