extern crate cluster_submitter;

extern crate clap;
use clap::*;

#[macro_use]
extern crate log;

extern crate bird_tool_utils;
use bird_tool_utils::clap_utils::*;

use cluster_submitter::external_command_checker::{check_for_dependencies, check_tools};
use cluster_submitter::tools::{tool_by_name, Tool, TOOL_NAMES};

static PROGRAM_NAME: &str = "ngs-tools";

fn main() {
    let app = build_cli();
    let matches = app.clone().get_matches();
    set_log_level(&matches, false, PROGRAM_NAME, crate_version!());

    let result = match matches.subcommand() {
        Some(("check", m)) => {
            set_log_level(m, true, PROGRAM_NAME, crate_version!());
            match m.get_many::<String>("tool") {
                Some(names) => {
                    let tools: Vec<Box<dyn Tool>> = names
                        .filter_map(|name| tool_by_name(name, None))
                        .collect();
                    let refs: Vec<&dyn Tool> = tools.iter().map(|t| t.as_ref()).collect();
                    check_tools(&refs)
                }
                None => check_for_dependencies(),
            }
        }
        Some(("run", m)) => {
            set_log_level(m, true, PROGRAM_NAME, crate_version!());
            let name = m.get_one::<String>("tool").unwrap();
            let tool = tool_by_name(name, m.get_one::<String>("path").map(|s| s.as_str()))
                .unwrap_or_else(|| panic!("Programming error: unknown tool {}", name));
            let args: Vec<&str> = m
                .get_many::<String>("args")
                .map(|vals| vals.map(|s| s.as_str()).collect())
                .unwrap_or_default();
            tool.execute(&args)
        }
        _ => panic!("Programming error"),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn build_cli() -> Command {
    add_clap_verbosity_flags(Command::new("ngs-tools"))
        .version(crate_version!())
        .author(cluster_submitter::AUTHOR)
        .about("Check for and run the external tools used by the pipeline")
        .arg_required_else_help(true)
        .subcommand(add_clap_verbosity_flags(
            Command::new("check")
                .about("Check that tools are installed and recent enough")
                .arg(
                    Arg::new("tool")
                        .long("tool")
                        .action(ArgAction::Append)
                        .value_parser(TOOL_NAMES.to_vec())
                        .help("Tool to check, may be repeated [default: all]"),
                ),
        ))
        .subcommand(add_clap_verbosity_flags(
            Command::new("run")
                .about("Run a tool with the given arguments")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .help("Use the tool at this path rather than from PATH"),
                )
                .arg(
                    Arg::new("tool")
                        .required(true)
                        .value_parser(TOOL_NAMES.to_vec()),
                )
                .arg(
                    Arg::new("args")
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true),
                ),
        ))
}
