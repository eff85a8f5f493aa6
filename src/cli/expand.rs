//! `hotshade expand`: print preprocessed stage text.

use anyhow::Result;
use hotshade::config::PipelineConfig;
use hotshade::{StageKind, log};

use super::common::oneshot_pipeline;

pub fn expand_program(config: PipelineConfig, program: &str, stage: Option<StageKind>) -> Result<()> {
    let pipeline = oneshot_pipeline(config);
    let stages = match stage {
        Some(kind) => vec![kind],
        None => StageKind::ALL.to_vec(),
    };
    let print_headers = stages.len() > 1;

    for kind in stages {
        let name = pipeline.config().stages.stage_name(program, kind);
        let expansion = pipeline.expand(&name)?;

        for warning in &expansion.warnings {
            log!("include"; "{}", warning);
        }

        if print_headers {
            println!("// ---- {kind}: {name} ----");
        }
        print!("{}", expansion.text);
        if !expansion.text.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
