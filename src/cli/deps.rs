//! `hotshade deps`: list the sources a program is built from.

use anyhow::{Result, anyhow};
use hotshade::config::PipelineConfig;

use super::common::oneshot_pipeline;

pub fn print_deps(config: PipelineConfig, program: &str) -> Result<()> {
    let mut pipeline = oneshot_pipeline(config);

    if pipeline.get_program(program).is_none() {
        return Err(anyhow!("program \"{program}\" could not be built"));
    }

    let entry = pipeline
        .entry(program)
        .ok_or_else(|| anyhow!("program \"{program}\" missing from cache"))?;
    for id in entry.sorted_dependencies() {
        println!("{id}");
    }

    Ok(())
}
