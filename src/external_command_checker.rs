use crate::error::Result;
use crate::tools::{BlastTool, Bwa, Prinseq, Samtools, Tool};

pub fn check_for_dependencies() -> Result<()> {
    check_tools(&[
        &Samtools::new(),
        &Bwa::new(),
        &BlastTool::blastn(),
        &Prinseq::new(),
    ])
}

/// Check each tool in turn, stopping at the first one missing or too old.
pub fn check_tools(tools: &[&dyn Tool]) -> Result<()> {
    for tool in tools {
        info!("Checking for {} ..", tool.name());
        tool.check()?;
    }
    info!("Found all {} required tools", tools.len());
    Ok(())
}
