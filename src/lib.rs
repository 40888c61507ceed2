pub mod config;
pub mod error;
pub mod external_command_checker;
pub mod job_properties;
pub mod job_script;
pub mod scheduler;
pub mod submission;
pub mod submit_argument_parsing;
pub mod tools;

#[macro_use]
extern crate log;
extern crate clap;
#[macro_use]
extern crate lazy_static;

pub use crate::error::{Result, SubmitterError};

pub const DEFAULT_PROJECT: &str = "viral_ngs";
pub const DEFAULT_SCHEDULER: &str = "bsub";
pub const DEFAULT_LOG_PREFIX: &str = "LSF-";

pub const AUTHOR: &str = "viral-ngs developers, Broad Institute";
