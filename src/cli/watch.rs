//! `hotshade watch`: keep programs built while their sources change.
//!
//! Runs the pipeline the way an application's frame loop would: one
//! `poll_and_invalidate` per tick, until Ctrl+C.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Result, anyhow};
use hotshade::config::PipelineConfig;
use hotshade::logger::{
    status_detach, status_error, status_success, status_unchanged, status_warning,
};
use hotshade::utils::plural_count;
use hotshade::{InvalidationReport, NullBackend, Pipeline, StageKind, log};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Setup the Ctrl+C handler. The watch loop exits on its next tick.
fn setup_shutdown_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);
    })
    .map_err(|e| anyhow!("failed to set Ctrl+C handler: {}", e))
}

fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

pub fn watch_programs(config: PipelineConfig, programs: &[String]) -> Result<()> {
    setup_shutdown_handler()?;

    let interval = config.watch.interval();
    let roots = config.search_roots().len();
    let mut pipeline = Pipeline::new(config, NullBackend::new());

    let mut pending: Vec<_> = programs.iter().map(|name| Pending::new(name)).collect();
    retry_pending(&mut pipeline, &mut pending);
    log!(
        "watch";
        "watching {} in {} (Ctrl+C to stop)",
        plural_count(programs.len(), "program"),
        plural_count(roots, "root")
    );
    if pending.is_empty() {
        status_unchanged("all programs built");
    } else {
        status_error("not built yet", &pending_names(&pending));
    }

    while !is_shutdown() {
        thread::sleep(interval);

        let report = pipeline.poll_and_invalidate();

        // A root that shows up with sources already in it produces no
        // events, so never-built programs are retried on every tick
        let logged = retry_pending(&mut pipeline, &mut pending);
        if report.is_quiet() && !logged {
            continue;
        }
        show_report(&pipeline, &report, &pending);
    }

    log!("watch"; "stopped after {} ticks", pipeline.tick());
    pipeline.shutdown();
    Ok(())
}

/// A program that has not built yet.
#[derive(Debug)]
struct Pending {
    name: String,
    /// Error of the last attempt, empty before the first one
    error: String,
}

impl Pending {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            error: String::new(),
        }
    }
}

fn pending_names(pending: &[Pending]) -> String {
    pending
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Try every pending program again and drop the ones that built.
///
/// A failure is only logged when its error differs from the previous attempt.
/// Returns whether anything was logged.
fn retry_pending(pipeline: &mut Pipeline<NullBackend>, pending: &mut Vec<Pending>) -> bool {
    let mut logged = false;

    pending.retain_mut(|program| match pipeline.try_program(&program.name) {
        Ok(_) => {
            log!("build"; "built \"{}\"", program.name);
            logged = true;
            false
        }
        Err(e) => {
            let error = e.to_string();
            if error != program.error {
                log!("build"; "program \"{}\" unavailable: {}", program.name, error);
                program.error = error;
                logged = true;
            }
            true
        }
    });

    logged
}

/// Directive warnings of the reloaded programs, one per line.
fn reload_warnings(pipeline: &Pipeline<NullBackend>, report: &InvalidationReport) -> Vec<String> {
    report
        .reloaded
        .iter()
        .filter_map(|name| pipeline.entry(name))
        .flat_map(|entry| {
            [StageKind::Vertex, StageKind::Fragment]
                .into_iter()
                .flat_map(move |kind| entry.stage(kind).warnings.iter())
                .map(move |warning| format!("{}: {}", entry.name(), warning))
        })
        .collect()
}

fn show_report(pipeline: &Pipeline<NullBackend>, report: &InvalidationReport, pending: &[Pending]) {
    // Log lines were printed above the previous status block
    status_detach();

    let warnings = reload_warnings(pipeline, report);

    if report.has_failures() {
        status_error(
            &format!("tick {}: kept old program", report.tick),
            &report.kept_old.join("\n"),
        );
    } else if !pending.is_empty() {
        status_error(
            &format!("tick {}: not built yet", report.tick),
            &pending_names(pending),
        );
    } else if !warnings.is_empty() {
        status_warning(&format!(
            "tick {}: reloaded {} with {}\n{}",
            report.tick,
            report.reloaded.join(", "),
            plural_count(warnings.len(), "warning"),
            warnings.join("\n")
        ));
    } else if report.attempted() > 0 {
        status_success(&format!(
            "tick {}: reloaded {}",
            report.tick,
            report.reloaded.join(", ")
        ));
    } else if report.is_quiet() {
        status_success(&format!("tick {}: all programs built", report.tick));
    } else {
        status_unchanged(&format!(
            "tick {}: {} changed, no program affected",
            report.tick,
            plural_count(report.changed.len(), "source")
        ));
    }
}
