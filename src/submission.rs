use std::path::Path;

use crate::config::SubmitterConfig;
use crate::job_properties::JobProperties;
use crate::job_script::JobScript;

/// Flag with which a rule opts out of scheduler log capture.
const NO_LOG_FLAG: &str = "-N";

/// Reduces the scheduler's acknowledgment to the bare job id.
pub const JOB_ID_FILTER: &str = r"| tail -1 | cut -f 2 -d \< | cut -f 1 -d \>";

/// `<rule>-<logid>` when the rule sets a non-empty logid, else `<rule>-<jobid>`.
pub fn job_name(props: &JobProperties, jobid: u64) -> String {
    match props.params.non_empty_logid() {
        Some(logid) => format!("{}-{}", props.rule, logid),
        None => format!("{}-{}", props.rule, jobid),
    }
}

/// One fully assembled scheduler submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub scheduler: String,
    pub project: String,
    pub job_name: String,
    /// None when the rule's flags suppress log output.
    pub log_path: Option<String>,
    pub scheduler_flags: Option<String>,
    pub dependencies: Vec<String>,
    pub job_script: String,
    pub completion_marker: String,
}

impl SubmissionRequest {
    pub fn build(
        config: &SubmitterConfig,
        job_script: &JobScript,
        props: &JobProperties,
        log_directory: &str,
        dependencies: &[String],
    ) -> SubmissionRequest {
        if props.jobid != job_script.jobid {
            warn!(
                "Job id {} in properties of {} differs from the id in its file name, using {}",
                props.jobid, job_script.path, job_script.jobid
            );
        }
        let name = job_name(props, job_script.jobid);

        let scheduler_flags = props
            .params
            .scheduler_flags
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .or_else(|| config.default_flags.as_deref())
            .map(|f| f.to_string());

        let log_path = match &scheduler_flags {
            Some(flags) if flags.contains(NO_LOG_FLAG) => {
                debug!("Not redirecting scheduler output for {} since flags contain -N", name);
                None
            }
            _ => Some(
                Path::new(log_directory)
                    .join(format!("{}{}.txt", config.log_prefix, name))
                    .display()
                    .to_string(),
            ),
        };

        SubmissionRequest {
            scheduler: config.scheduler.clone(),
            project: config.project.clone(),
            job_name: name,
            log_path,
            scheduler_flags,
            dependencies: dependencies.to_vec(),
            job_script: job_script.path.clone(),
            completion_marker: job_script.completion_marker(),
        }
    }

    /// `-w '<d1> && <d2> ...'` clause, if there are any dependencies.
    pub fn dependency_clause(&self) -> Option<String> {
        if self.dependencies.is_empty() {
            None
        } else {
            Some(format!("-w '{}'", self.dependencies.join(" && ")))
        }
    }

    /// The scheduler invocation itself, without the id filter.
    pub fn scheduler_command(&self) -> String {
        let mut parts = vec![
            self.scheduler.clone(),
            "-P".to_string(),
            self.project.clone(),
            "-J".to_string(),
            self.job_name.clone(),
        ];
        if let Some(log_path) = &self.log_path {
            parts.push("-oo".to_string());
            parts.push(log_path.clone());
        }
        if let Some(flags) = &self.scheduler_flags {
            parts.push(flags.trim().to_string());
        }
        if let Some(clause) = self.dependency_clause() {
            parts.push(clause);
        }
        parts.push(self.job_script.clone());
        parts.push(self.completion_marker.clone());
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }

    /// Full shell command line, printing only the scheduler's job id.
    pub fn shell_command(&self) -> String {
        format!("{} {}", self.scheduler_command(), JOB_ID_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_properties::RuleParams;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn props(rule: &str, jobid: u64, lsf: Option<&str>, logid: Option<&str>) -> JobProperties {
        JobProperties {
            rule: rule.to_string(),
            jobid,
            params: RuleParams {
                scheduler_flags: lsf.map(|s| s.to_string()),
                logid: logid.map(|s| s.to_string()),
            },
        }
    }

    fn deps(d: &[&str]) -> Vec<String> {
        d.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_end_to_end_command() {
        init();
        let script = JobScript::parse("/tmp/run/snakejob.align.42.sh").unwrap();
        let request = SubmissionRequest::build(
            &SubmitterConfig::default(),
            &script,
            &props("align", 42, Some("-q normal -M 4000"), None),
            "/logs",
            &deps(&["111", "222"]),
        );
        assert_eq!(
            "bsub -P viral_ngs -J align-42 -oo /logs/LSF-align-42.txt -q normal -M 4000 \
             -w '111 && 222' /tmp/run/snakejob.align.42.sh /tmp/run/42.jobfinished \
             | tail -1 | cut -f 2 -d \\< | cut -f 1 -d \\>",
            request.shell_command()
        );
    }

    #[test]
    fn test_logid_names_job() {
        init();
        let p = props("assemble", 9, None, Some("sampleA"));
        assert_eq!("assemble-sampleA", job_name(&p, 9));
        let p = props("assemble", 9, None, Some(""));
        assert_eq!("assemble-9", job_name(&p, 9));
        let p = props("assemble", 9, None, None);
        assert_eq!("assemble-9", job_name(&p, 9));
    }

    #[test]
    fn test_no_log_flag_suppresses_redirect() {
        init();
        let script = JobScript::parse("/tmp/run/snakejob.r.1.sh").unwrap();
        let request = SubmissionRequest::build(
            &SubmitterConfig::default(),
            &script,
            &props("r", 1, Some("-N -q hour"), None),
            "/logs",
            &[],
        );
        assert_eq!(None, request.log_path);
        assert_eq!(
            "bsub -P viral_ngs -J r-1 -N -q hour /tmp/run/snakejob.r.1.sh /tmp/run/1.jobfinished",
            request.scheduler_command()
        );
        assert!(!request.shell_command().contains("-oo"));
    }

    #[test]
    fn test_no_flags_no_dependencies() {
        init();
        let script = JobScript::parse("/tmp/run/snakejob.r.1.sh").unwrap();
        let request = SubmissionRequest::build(
            &SubmitterConfig::default(),
            &script,
            &props("r", 1, None, None),
            "/logs/",
            &[],
        );
        assert_eq!(None, request.dependency_clause());
        assert_eq!(
            "bsub -P viral_ngs -J r-1 -oo /logs/LSF-r-1.txt /tmp/run/snakejob.r.1.sh /tmp/run/1.jobfinished",
            request.scheduler_command()
        );
    }

    #[test]
    fn test_dependencies_anded() {
        init();
        let script = JobScript::parse("/tmp/run/snakejob.r.1.sh").unwrap();
        let request = SubmissionRequest::build(
            &SubmitterConfig::default(),
            &script,
            &props("r", 1, None, None),
            "/logs",
            &deps(&["1", "2", "3"]),
        );
        assert_eq!(Some("-w '1 && 2 && 3'".to_string()), request.dependency_clause());
    }

    #[test]
    fn test_default_flags_apply_only_without_rule_flags() {
        init();
        let config = SubmitterConfig::default().with_default_flags(Some("-q week -N"));
        let script = JobScript::parse("/tmp/run/snakejob.r.1.sh").unwrap();

        let request =
            SubmissionRequest::build(&config, &script, &props("r", 1, None, None), "/logs", &[]);
        assert_eq!(Some("-q week -N".to_string()), request.scheduler_flags);
        assert_eq!(None, request.log_path);

        let request = SubmissionRequest::build(
            &config,
            &script,
            &props("r", 1, Some("-q hour"), None),
            "/logs",
            &[],
        );
        assert_eq!(Some("-q hour".to_string()), request.scheduler_flags);
        assert_eq!(Some("/logs/LSF-r-1.txt".to_string()), request.log_path);
    }

    #[test]
    fn test_command_ends_with_script_and_marker() {
        init();
        let config = SubmitterConfig {
            project: "p".to_string(),
            scheduler: "/opt/lsf/bin/bsub".to_string(),
            default_flags: None,
            log_prefix: "job-".to_string(),
        };
        let script = JobScript::parse("/scratch/t/snakejob.x.12.sh").unwrap();
        let request = SubmissionRequest::build(
            &config,
            &script,
            &props("x", 12, Some("-q normal"), Some("s1")),
            "/l",
            &deps(&["5"]),
        );
        assert!(request.scheduler_command().starts_with("/opt/lsf/bin/bsub -P p -J x-s1 -oo /l/job-x-s1.txt"));
        assert!(request
            .scheduler_command()
            .ends_with("/scratch/t/snakejob.x.12.sh /scratch/t/12.jobfinished"));
    }
}
