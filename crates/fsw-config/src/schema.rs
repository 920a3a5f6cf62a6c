//! Sweep configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Immutable configuration for one parametric sweep.
///
/// Built once at startup (YAML file plus CLI overrides) and passed by
/// reference into every component; nothing reads ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepConfig {
    pub name: String,
    /// Template case cloned for every Reynolds number.
    pub base_case: PathBuf,
    /// Root for case directories, logs, report and summary.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_reynolds_numbers")]
    pub reynolds_numbers: Vec<f64>,
    /// Solver iteration ceiling, written into the case control dictionary.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
    /// Upper bound on concurrently running cases.
    #[serde(default = "default_parallel_jobs")]
    pub parallel_jobs: usize,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Optional plotting hook invoked with the results dir after the report
    /// is written. Failures are warnings, never fatal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_script: Option<PathBuf>,
}

/// How a completed solve is judged acceptable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValidationConfig {
    #[serde(default)]
    pub mode: ValidationMode,
    /// Both final residuals must fall strictly below this in residual mode.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::default(),
            tolerance: default_tolerance(),
        }
    }
}

/// The two validation criteria inherited from the legacy pipeline. They are
/// deliberately distinct: residual mode reads the solver log, output-files
/// mode only checks that the expected result files exist.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    #[default]
    Residuals,
    OutputFiles,
}

/// Reference scales for deriving kinematic viscosity from a Reynolds number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PhysicsConfig {
    /// Lid velocity in m/s.
    #[serde(default = "default_reference_velocity")]
    pub reference_velocity: f64,
    /// Cavity dimension in m.
    #[serde(default = "default_reference_length")]
    pub reference_length: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            reference_velocity: default_reference_velocity(),
            reference_length: default_reference_length(),
        }
    }
}

/// External executables. Names are resolved on PATH; entries containing a
/// path separator are used verbatim, which is how tests substitute stubs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolsConfig {
    #[serde(default = "default_mesh_tool")]
    pub mesh: String,
    #[serde(default = "default_mesh_check_tool")]
    pub mesh_check: String,
    #[serde(default = "default_solver_tool")]
    pub solver: String,
    #[serde(default = "default_post_tool")]
    pub post: String,
    /// Hard wall-clock limit on the solve stage.
    #[serde(default = "default_solve_timeout_secs")]
    pub solve_timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            mesh: default_mesh_tool(),
            mesh_check: default_mesh_check_tool(),
            solver: default_solver_tool(),
            post: default_post_tool(),
            solve_timeout_secs: default_solve_timeout_secs(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_reynolds_numbers() -> Vec<f64> {
    vec![100.0, 500.0, 1000.0]
}

fn default_max_iterations() -> u64 {
    500
}

fn default_parallel_jobs() -> usize {
    1
}

fn default_tolerance() -> f64 {
    1.0e-3
}

fn default_reference_velocity() -> f64 {
    1.0
}

fn default_reference_length() -> f64 {
    0.1
}

fn default_mesh_tool() -> String {
    "blockMesh".to_string()
}

fn default_mesh_check_tool() -> String {
    "checkMesh".to_string()
}

fn default_solver_tool() -> String {
    "simpleFoam".to_string()
}

fn default_post_tool() -> String {
    "postProcess".to_string()
}

fn default_solve_timeout_secs() -> u64 {
    600
}
