//! Sweep orchestration: preflight, dispatch, aggregate, report.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

use fsw_config::{SweepConfig, validate_config};
use fsw_report::{ReportStore, SweepReport};
use tracing::{error, info, warn};

use crate::aggregate::aggregate;
use crate::dispatch::dispatch;
use crate::error::AppResult;

pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wall-clock breakdown of one sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepTimingSummary {
    pub dispatch_s: f64,
    pub aggregate_s: f64,
    pub save_s: f64,
    pub total_s: f64,
}

#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub report: SweepReport,
    pub report_path: PathBuf,
    pub summary_path: PathBuf,
    pub timing: SweepTimingSummary,
}

/// Check configuration values and the execution environment (tools on
/// PATH, base case skeleton) without running anything.
pub fn validate_environment(config: &SweepConfig) -> AppResult<()> {
    validate_config(config)?;
    fsw_runner::preflight(config)?;
    Ok(())
}

/// Execute the whole sweep: every configured Reynolds number gets an
/// isolated case, the cases run under the concurrency limit, and one
/// consolidated report is written from the resulting disk state.
///
/// Environment problems abort before any case directory is touched.
/// Per-case failures are isolated: they surface in the report, not here.
pub fn run_sweep(config: &SweepConfig) -> AppResult<SweepOutcome> {
    validate_config(config)?;
    fsw_runner::preflight(config)?;

    fs::create_dir_all(&config.results_dir)?;
    fs::create_dir_all(config.results_dir.join("logs"))?;

    info!(
        sweep = %config.name,
        cases = config.reynolds_numbers.len(),
        jobs = config.parallel_jobs,
        "starting sweep"
    );

    let started = Instant::now();
    let mut timing = SweepTimingSummary::default();

    dispatch(&config.reynolds_numbers, config.parallel_jobs, |reynolds| {
        run_one(config, reynolds)
    })?;
    timing.dispatch_s = started.elapsed().as_secs_f64();

    let aggregate_started = Instant::now();
    let report = aggregate(config, started.elapsed().as_secs_f64(), TOOL_VERSION);
    timing.aggregate_s = aggregate_started.elapsed().as_secs_f64();

    let save_started = Instant::now();
    let store = ReportStore::new(config.results_dir.clone())?;
    store.save_report(&report)?;
    store.save_summary(&report)?;
    timing.save_s = save_started.elapsed().as_secs_f64();

    run_plot_hook(config);

    timing.total_s = started.elapsed().as_secs_f64();
    info!(
        overall = report.overall.as_str(),
        total_s = timing.total_s,
        "sweep finished"
    );

    Ok(SweepOutcome {
        report,
        report_path: store.report_path(),
        summary_path: store.summary_path(),
        timing,
    })
}

/// Rebuild the report from whatever case artifacts are on disk, without
/// running anything.
pub fn rebuild_report(config: &SweepConfig) -> AppResult<SweepOutcome> {
    validate_config(config)?;

    let started = Instant::now();
    let report = aggregate(config, 0.0, TOOL_VERSION);

    let store = ReportStore::new(config.results_dir.clone())?;
    store.save_report(&report)?;
    store.save_summary(&report)?;

    let timing = SweepTimingSummary {
        total_s: started.elapsed().as_secs_f64(),
        ..Default::default()
    };

    Ok(SweepOutcome {
        report,
        report_path: store.report_path(),
        summary_path: store.summary_path(),
        timing,
    })
}

/// One unit of work: prepare the case, then run it. Failures are logged and
/// left for aggregation to pick up from the case artifacts; a broken case
/// must never take its siblings down.
fn run_one(config: &SweepConfig, reynolds: f64) {
    let case = match fsw_case::prepare(config, reynolds) {
        Ok(case) => case,
        Err(err) => {
            error!(reynolds, error = %err, "case preparation failed");
            return;
        }
    };

    if let Err(err) = fsw_runner::execute(&case, config) {
        error!(reynolds, error = %err, "case execution failed");
    }
}

fn run_plot_hook(config: &SweepConfig) {
    let Some(script) = &config.plot_script else {
        return;
    };

    match Command::new(script).arg(&config.results_dir).status() {
        Ok(status) if status.success() => {
            info!(script = %script.display(), "plot hook finished");
        }
        Ok(status) => {
            warn!(script = %script.display(), ?status, "plot hook failed");
        }
        Err(err) => {
            warn!(script = %script.display(), error = %err, "plot hook could not run");
        }
    }
}
