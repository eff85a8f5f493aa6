//! `hotshade build`: build programs once with the null backend.

use anyhow::{Result, bail};
use hotshade::config::PipelineConfig;
use hotshade::utils::plural_count;
use hotshade::{NullBackend, Pipeline, log};

use super::common::oneshot_pipeline;

pub fn build_programs(config: PipelineConfig, programs: &[String]) -> Result<()> {
    let mut pipeline = oneshot_pipeline(config);

    let failed = build_all(&mut pipeline, programs);
    if !failed.is_empty() {
        bail!(
            "{} failed: {}",
            plural_count(failed.len(), "program"),
            failed.join(", ")
        );
    }

    log!("build"; "built {}", plural_count(programs.len(), "program"));
    Ok(())
}

/// Request every program once. Returns the names that did not build.
fn build_all(pipeline: &mut Pipeline<NullBackend>, programs: &[String]) -> Vec<String> {
    programs
        .iter()
        .filter(|name| pipeline.get_program(name).is_none())
        .cloned()
        .collect()
}
