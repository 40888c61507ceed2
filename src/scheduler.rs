use std::process::{Command, Stdio};

use crate::error::{Result, SubmitterError};
use crate::submission::SubmissionRequest;

/// Captured result of running a scheduler command.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerOutput {
    /// None if the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl SchedulerOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Executes a shell command line and captures its output.
pub trait CommandRunner {
    fn run(&self, command_line: &str) -> Result<SchedulerOutput>;
}

/// Runs command lines through `sh -c`, so that rule flags are word-split
/// and quoted by the shell.
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command_line: &str) -> Result<SchedulerOutput> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        debug!("Running scheduler command: {:?}", &cmd);
        let output = cmd.output()?;
        Ok(SchedulerOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Pull the job id out of an acknowledgment such as
/// `Job <98765> is submitted to queue <normal>.`, looking only at the last
/// line.
pub fn extract_job_id(acknowledgment: &str) -> Option<&str> {
    let last_line = acknowledgment.lines().last()?;
    let after_open = &last_line[last_line.find('<')? + 1..];
    let id = &after_open[..after_open.find('>')?];
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        Some(id)
    } else {
        None
    }
}

/// Submit the request and return the scheduler-assigned job id.
pub fn submit<R: CommandRunner>(runner: &R, request: &SubmissionRequest) -> Result<String> {
    let command_line = request.scheduler_command();
    info!("Submitting {} ..", request.job_name);
    let output = runner.run(&command_line)?;
    if !output.success() {
        error!(
            "Submission of {} failed with status {:?}",
            request.job_name, output.status
        );
        return Err(SubmitterError::SchedulerInvocationFailure {
            status: output.status,
            stderr: output.stderr.trim().to_string(),
        });
    }
    if !output.stderr.is_empty() {
        debug!("Scheduler stderr: {}", output.stderr.trim());
    }
    match extract_job_id(&output.stdout) {
        Some(id) => {
            info!("Submitted {} as job {}", request.job_name, id);
            Ok(id.to_string())
        }
        None => Err(SubmitterError::UnparsableSchedulerResponse(
            output.stdout.clone(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    struct FakeRunner {
        output: SchedulerOutput,
        seen: RefCell<Vec<String>>,
    }

    impl FakeRunner {
        fn new(status: Option<i32>, stdout: &str, stderr: &str) -> FakeRunner {
            FakeRunner {
                output: SchedulerOutput {
                    status,
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                },
                seen: RefCell::new(vec![]),
            }
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, command_line: &str) -> Result<SchedulerOutput> {
            self.seen.borrow_mut().push(command_line.to_string());
            Ok(self.output.clone())
        }
    }

    fn request() -> SubmissionRequest {
        SubmissionRequest {
            scheduler: "bsub".to_string(),
            project: "viral_ngs".to_string(),
            job_name: "align-42".to_string(),
            log_path: None,
            scheduler_flags: Some("-q normal".to_string()),
            dependencies: vec![],
            job_script: "/tmp/run/snakejob.align.42.sh".to_string(),
            completion_marker: "/tmp/run/42.jobfinished".to_string(),
        }
    }

    #[test]
    fn test_extract_job_id() {
        init();
        assert_eq!(
            Some("98765"),
            extract_job_id("Job <98765> is submitted to queue <normal>.\n")
        );
        assert_eq!(
            Some("12"),
            extract_job_id("Warning: something <odd>\nJob <12> is submitted to default queue <normal>.")
        );
    }

    #[test]
    fn test_extract_job_id_failures() {
        init();
        assert_eq!(None, extract_job_id(""));
        assert_eq!(None, extract_job_id("Job <12> is submitted\nRequest aborted by esub."));
        assert_eq!(None, extract_job_id("Job <> is submitted"));
        assert_eq!(None, extract_job_id("Job <abc> is submitted"));
        assert_eq!(None, extract_job_id("Job <12 is submitted"));
    }

    #[test]
    fn test_submit_returns_id() {
        init();
        let runner = FakeRunner::new(Some(0), "Job <98765> is submitted to queue <normal>.\n", "");
        assert_eq!("98765", submit(&runner, &request()).unwrap());
        assert_eq!(
            vec!["bsub -P viral_ngs -J align-42 -q normal /tmp/run/snakejob.align.42.sh /tmp/run/42.jobfinished".to_string()],
            *runner.seen.borrow()
        );
    }

    #[test]
    fn test_submit_scheduler_failure() {
        init();
        let runner = FakeRunner::new(Some(255), "", "User permission denied.\n");
        match submit(&runner, &request()) {
            Err(SubmitterError::SchedulerInvocationFailure { status, stderr }) => {
                assert_eq!(Some(255), status);
                assert_eq!("User permission denied.", stderr);
            }
            other => panic!("Unexpected {:?}", other),
        }
    }

    #[test]
    fn test_submit_unparsable_acknowledgment() {
        init();
        let runner = FakeRunner::new(Some(0), "Submitted.\n", "");
        match submit(&runner, &request()) {
            Err(SubmitterError::UnparsableSchedulerResponse(out)) => assert_eq!("Submitted.\n", out),
            other => panic!("Unexpected {:?}", other),
        }
    }

    #[test]
    fn test_shell_runner_captures_output() {
        init();
        let out = ShellRunner
            .run("echo 'Job <7> is submitted to queue <q>.'; echo oops >&2; exit 3")
            .unwrap();
        assert_eq!(Some(3), out.status);
        assert_eq!("Job <7> is submitted to queue <q>.\n", out.stdout);
        assert_eq!("oops\n", out.stderr);
    }
}
