extern crate cluster_submitter;

extern crate clap;
use clap::*;

#[macro_use]
extern crate log;

extern crate bird_tool_utils;
use bird_tool_utils::clap_utils::*;

static PROGRAM_NAME: &str = "cluster-submitter";

fn main() {
    let app = build_cli();
    let matches = app.clone().get_matches();
    set_log_level(&matches, true, PROGRAM_NAME, crate_version!());

    if let Err(e) = cluster_submitter::submit_argument_parsing::run_submit(&matches) {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn build_cli() -> Command {
    let app = add_clap_verbosity_flags(Command::new("cluster-submitter"))
        .version(crate_version!())
        .author(cluster_submitter::AUTHOR)
        .about("Submit a Snakemake job script to LSF, printing the LSF job id")
        .arg_required_else_help(true);

    cluster_submitter::submit_argument_parsing::add_submit_arguments(app)
}
