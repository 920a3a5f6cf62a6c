//! Report aggregation from on-disk case artifacts.
//!
//! A deliberately separate pass over disk state: it never trusts in-memory
//! run results, so a report can be rebuilt even after the process that ran
//! the cases has exited.

use std::fs;

use fsw_case::{case_dir_name, log_file_path};
use fsw_config::{SweepConfig, ValidationMode};
use fsw_report::{
    Marker, RunRecord, RunStatus, SweepMeta, SweepReport, overall_status, read_marker,
};
use fsw_runner::classify::{classify, execution_time, final_time};
use fsw_runner::executor::required_outputs_present;

/// Build the consolidated report for the full parameter list. Total over its
/// input: a case that never ran, or whose directory vanished, contributes a
/// FAILED record instead of an error.
pub fn aggregate(config: &SweepConfig, total_runtime_s: f64, tool_version: &str) -> SweepReport {
    let results: Vec<RunRecord> = config
        .reynolds_numbers
        .iter()
        .map(|&reynolds| aggregate_case(config, reynolds))
        .collect();

    SweepReport {
        meta: SweepMeta {
            tool_version: tool_version.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            total_runtime_s,
            config: config.clone(),
        },
        overall: overall_status(&results),
        results,
    }
}

fn aggregate_case(config: &SweepConfig, reynolds: f64) -> RunRecord {
    let case_dir = config.results_dir.join(case_dir_name(reynolds));
    let log_path = log_file_path(&config.results_dir, reynolds);

    let log_text = fs::read_to_string(&log_path).unwrap_or_default();
    let classification = classify(&log_text, config.validation.tolerance);
    let iterations = final_time(&log_text);
    let runtime_s = execution_time(&log_text).unwrap_or(0.0);

    let status = if case_dir.is_dir() {
        status_from_artifacts(config, &case_dir)
    } else {
        RunStatus::Failed
    };

    RunRecord {
        reynolds,
        status,
        converged: classification.converged,
        iterations,
        final_p_residual: classification.final_p_residual,
        final_u_residual: classification.final_u_residual,
        runtime_s,
        case_dir,
        log_path,
    }
}

fn status_from_artifacts(config: &SweepConfig, case_dir: &std::path::Path) -> RunStatus {
    match read_marker(case_dir) {
        None | Some(Marker::Failed) => RunStatus::Failed,
        Some(Marker::Converged) => match config.validation.mode {
            ValidationMode::Residuals => RunStatus::Success,
            ValidationMode::OutputFiles => {
                if required_outputs_present(case_dir, config.max_iterations) {
                    RunStatus::Success
                } else {
                    RunStatus::Invalid
                }
            }
        },
        Some(Marker::NotConverged) => match config.validation.mode {
            ValidationMode::Residuals => RunStatus::NoConvergence,
            ValidationMode::OutputFiles => RunStatus::Invalid,
        },
    }
}
