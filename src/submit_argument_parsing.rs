use clap::*;

use crate::config::SubmitterConfig;
use crate::error::{Result, SubmitterError};
use crate::job_properties::JobProperties;
use crate::job_script::JobScript;
use crate::scheduler::{submit, ShellRunner};
use crate::submission::SubmissionRequest;

/// Positional arguments as passed by the workflow engine:
/// `<dependency>... <log-directory> <job-script>`.
#[derive(Debug, PartialEq)]
pub struct SubmitArguments<'a> {
    pub dependencies: Vec<String>,
    pub log_directory: &'a str,
    pub job_script: &'a str,
}

pub fn split_positionals(values: &[String]) -> Result<SubmitArguments<'_>> {
    match values {
        [dependencies @ .., log_directory, job_script] => Ok(SubmitArguments {
            dependencies: dependencies.to_vec(),
            log_directory: log_directory.as_str(),
            job_script: job_script.as_str(),
        }),
        _ => Err(SubmitterError::MalformedJobScriptPath(values.join(" "))),
    }
}

fn config_from_matches(m: &ArgMatches) -> Result<SubmitterConfig> {
    let config = match m.get_one::<String>("config") {
        Some(path) => SubmitterConfig::from_toml_file(path)?,
        None => SubmitterConfig::default(),
    };
    Ok(config
        .with_project(m.get_one::<String>("project").map(|s| s.as_str()))
        .with_scheduler(m.get_one::<String>("scheduler").map(|s| s.as_str()))
        .with_default_flags(m.get_one::<String>("default-flags").map(|s| s.as_str())))
}

pub fn run_submit(m: &ArgMatches) -> Result<()> {
    let positionals: Vec<String> = m
        .get_many::<String>("args")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();
    let args = split_positionals(&positionals)?;
    let config = config_from_matches(m)?;
    debug!("Using config {:?}", config);

    let job_script = JobScript::parse(args.job_script)?;
    let props = JobProperties::read_from_job_script(job_script.as_path())?;
    let request = SubmissionRequest::build(
        &config,
        &job_script,
        &props,
        args.log_directory,
        &args.dependencies,
    );

    if m.get_flag("dry-run") {
        info!("Dry run, not submitting {}", request.job_name);
        println!("{}", request.shell_command());
        return Ok(());
    }

    let job_id = submit(&ShellRunner, &request)?;
    println!("{}", job_id);
    Ok(())
}

pub fn add_submit_arguments(app: Command) -> Command {
    app.arg(
        Arg::new("config")
            .long("config")
            .help("TOML file with project, scheduler, default_flags and log_prefix settings"),
    )
    .arg(
        Arg::new("project")
            .long("project")
            .short('P')
            .help("Project to charge jobs to [default: viral_ngs]"),
    )
    .arg(
        Arg::new("scheduler")
            .long("scheduler")
            .help("Scheduler submission command [default: bsub]"),
    )
    .arg(
        Arg::new("default-flags")
            .long("default-flags")
            .allow_hyphen_values(true)
            .help("Scheduler flags for rules that do not define params.LSF"),
    )
    .arg(
        Arg::new("dry-run")
            .long("dry-run")
            .action(ArgAction::SetTrue)
            .help("Print the submission command instead of running it"),
    )
    .arg(
        Arg::new("args")
            .num_args(2..)
            .required(true)
            .value_name("ARGS")
            .help("Job ids the job depends on, then the log directory, then the job script"),
    )
}
