//! Result data types.

use fsw_config::SweepConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Terminal status of one case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    /// Solve finished but the residuals never dropped below tolerance.
    #[serde(rename = "COMPLETED_NO_CONVERGENCE")]
    NoConvergence,
    /// Solve finished but the required output files are absent
    /// (output-files validation mode).
    #[serde(rename = "INVALID")]
    Invalid,
    #[serde(rename = "FAILED")]
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "SUCCESS",
            RunStatus::NoConvergence => "COMPLETED_NO_CONVERGENCE",
            RunStatus::Invalid => "INVALID",
            RunStatus::Failed => "FAILED",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Success)
    }
}

/// Status over the whole sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OverallStatus {
    #[serde(rename = "ALL_SUCCESS")]
    AllSuccess,
    #[serde(rename = "PARTIAL_SUCCESS")]
    PartialSuccess,
    #[serde(rename = "ALL_FAILED")]
    AllFailed,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::AllSuccess => "ALL_SUCCESS",
            OverallStatus::PartialSuccess => "PARTIAL_SUCCESS",
            OverallStatus::AllFailed => "ALL_FAILED",
        }
    }
}

/// ALL_SUCCESS when every case succeeded, ALL_FAILED when none did,
/// PARTIAL_SUCCESS otherwise.
pub fn overall_status(records: &[RunRecord]) -> OverallStatus {
    let successes = records.iter().filter(|r| r.status.is_success()).count();
    if successes == records.len() && !records.is_empty() {
        OverallStatus::AllSuccess
    } else if successes == 0 {
        OverallStatus::AllFailed
    } else {
        OverallStatus::PartialSuccess
    }
}

/// Outcome of one case, re-derivable from its on-disk artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunRecord {
    pub reynolds: f64,
    pub status: RunStatus,
    pub converged: bool,
    /// Last solver iteration reached, when the log shows one.
    pub iterations: Option<u64>,
    pub final_p_residual: Option<f64>,
    pub final_u_residual: Option<f64>,
    pub runtime_s: f64,
    pub case_dir: PathBuf,
    pub log_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepMeta {
    pub tool_version: String,
    pub generated_at: String,
    pub total_runtime_s: f64,
    /// Echo of the configuration the sweep ran with.
    pub config: SweepConfig,
}

/// The consolidated sweep report. Written exactly once, after every
/// dispatched case has finished; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepReport {
    pub meta: SweepMeta,
    pub overall: OverallStatus,
    pub results: Vec<RunRecord>,
}
