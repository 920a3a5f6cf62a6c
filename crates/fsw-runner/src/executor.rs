//! Staged execution of one prepared case.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use fsw_case::{CaseInstance, log_file_path};
use fsw_config::{SweepConfig, ValidationMode};
use fsw_report::{Marker, RunRecord, RunStatus, write_marker};
use tracing::{info, warn};

use crate::classify::{self, Classification};
use crate::tools;
use crate::RunnerResult;

/// Run the full stage pipeline for one case: mesh, mesh check, solve,
/// classify, sample. Mesh or solve failing ends the case as FAILED; the
/// mesh check and the sampling stage only ever warn.
///
/// Tool failures are part of the returned record, never an `Err`; errors
/// are reserved for the runner's own I/O going wrong.
pub fn execute(case: &CaseInstance, config: &SweepConfig) -> RunnerResult<RunRecord> {
    let started = Instant::now();

    let log_path = log_file_path(&config.results_dir, case.reynolds);
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }

    info!(reynolds = case.reynolds, "starting case");

    // (1) mesh generation
    let mesh = tools::run_stage(&config.tools.mesh, &[], &case.root, &log_path, None)?;
    if !mesh.succeeded() {
        warn!(
            reynolds = case.reynolds,
            exit_code = ?mesh.exit_code,
            "mesh generation failed"
        );
        write_marker(&case.root, Marker::Failed)?;
        return Ok(failed_record(case, &log_path, started.elapsed()));
    }

    // (2) mesh quality check, advisory only
    match tools::run_stage(&config.tools.mesh_check, &[], &case.root, &log_path, None) {
        Ok(check) if !check.succeeded() => {
            warn!(reynolds = case.reynolds, "mesh quality check reported problems");
        }
        Err(error) => {
            warn!(reynolds = case.reynolds, %error, "mesh quality check could not run");
        }
        Ok(_) => {}
    }

    // (3) flow solve under the wall-clock limit
    let timeout = Duration::from_secs(config.tools.solve_timeout_secs);
    let solve = tools::run_stage(
        &config.tools.solver,
        &[],
        &case.root,
        &log_path,
        Some(timeout),
    )?;
    if !solve.succeeded() {
        warn!(
            reynolds = case.reynolds,
            exit_code = ?solve.exit_code,
            timed_out = solve.timed_out,
            "solve failed"
        );
        write_marker(&case.root, Marker::Failed)?;
        return Ok(failed_record(case, &log_path, started.elapsed()));
    }

    // (4) convergence classification from the log tail
    let log_text = fs::read_to_string(&log_path).unwrap_or_default();
    let classification = classify::classify(&log_text, case.tolerance);
    let iterations = classify::final_time(&log_text);

    let status = terminal_status(case, config.validation.mode, &classification);
    let marker = match status {
        RunStatus::Success => Marker::Converged,
        _ => Marker::NotConverged,
    };
    write_marker(&case.root, marker)?;

    // (5) post-processing / sampling, advisory only
    match tools::run_stage(&config.tools.post, &[], &case.root, &log_path, None) {
        Ok(post) if !post.succeeded() => {
            warn!(reynolds = case.reynolds, "post-processing failed");
        }
        Err(error) => {
            warn!(reynolds = case.reynolds, %error, "post-processing could not run");
        }
        Ok(_) => {}
    }

    let record = RunRecord {
        reynolds: case.reynolds,
        status,
        converged: classification.converged,
        iterations,
        final_p_residual: classification.final_p_residual,
        final_u_residual: classification.final_u_residual,
        runtime_s: started.elapsed().as_secs_f64(),
        case_dir: case.root.clone(),
        log_path,
    };

    info!(
        reynolds = case.reynolds,
        status = record.status.as_str(),
        runtime_s = record.runtime_s,
        "case finished"
    );

    Ok(record)
}

fn terminal_status(
    case: &CaseInstance,
    mode: ValidationMode,
    classification: &Classification,
) -> RunStatus {
    match mode {
        ValidationMode::Residuals => {
            if classification.converged {
                RunStatus::Success
            } else {
                RunStatus::NoConvergence
            }
        }
        ValidationMode::OutputFiles => {
            if required_outputs_present(&case.root, case.max_iterations) {
                RunStatus::Success
            } else {
                RunStatus::Invalid
            }
        }
    }
}

/// In output-files mode a solve only counts when the final-time field files
/// actually landed on disk.
pub fn required_outputs_present(case_root: &Path, final_time: u64) -> bool {
    let final_time_dir = case_root.join(final_time.to_string());
    final_time_dir.join("p").is_file() && final_time_dir.join("U").is_file()
}

fn failed_record(case: &CaseInstance, log_path: &Path, elapsed: Duration) -> RunRecord {
    RunRecord {
        reynolds: case.reynolds,
        status: RunStatus::Failed,
        converged: false,
        iterations: None,
        final_p_residual: None,
        final_u_residual: None,
        runtime_s: elapsed.as_secs_f64(),
        case_dir: case.root.clone(),
        log_path: log_path.to_path_buf(),
    }
}
