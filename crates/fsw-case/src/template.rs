//! Clean-slate case preparation.

use std::fs;
use std::path::{Path, PathBuf};

use fsw_config::SweepConfig;
use tracing::info;

use crate::dict;
use crate::skeleton::{self, case_dir_name};
use crate::{CaseError, CaseResult};

/// One isolated copy of the base case, keyed by its Reynolds number. Owned
/// exclusively by the executor invocation processing it; persists on disk
/// after the run for inspection.
#[derive(Debug, Clone)]
pub struct CaseInstance {
    pub reynolds: f64,
    pub root: PathBuf,
    pub viscosity: f64,
    pub tolerance: f64,
    pub max_iterations: u64,
}

/// nu = U_ref * L_ref / Re.
pub fn kinematic_viscosity(
    reynolds: f64,
    physics: &fsw_config::PhysicsConfig,
) -> CaseResult<f64> {
    if reynolds == 0.0 {
        return Err(CaseError::ZeroReynolds);
    }
    Ok(physics.reference_velocity * physics.reference_length / reynolds)
}

/// Clone the base case for one Reynolds number and rewrite the
/// parameter-dependent values.
///
/// Any pre-existing directory of the same derived name is removed first:
/// repeated sweeps always start each case from a clean slate and never
/// accumulate stale state.
pub fn prepare(config: &SweepConfig, reynolds: f64) -> CaseResult<CaseInstance> {
    let viscosity = kinematic_viscosity(reynolds, &config.physics)?;
    let case_dir = config.results_dir.join(case_dir_name(reynolds));

    if case_dir.exists() {
        fs::remove_dir_all(&case_dir)?;
    }
    copy_tree(&config.base_case, &case_dir)?;

    rewrite_file(&case_dir, skeleton::TRANSPORT_PROPERTIES, "nu", |content| {
        dict::rewrite_value(content, "nu", &format!("{}", viscosity))
    })?;

    let iterations = config.max_iterations.to_string();
    rewrite_file(&case_dir, skeleton::CONTROL_DICT, "endTime", |content| {
        dict::rewrite_value(content, "endTime", &iterations)
    })?;
    // Write the final field state exactly at the iteration ceiling; a base
    // case without writeInterval keeps its own write policy.
    rewrite_file_opt(&case_dir, skeleton::CONTROL_DICT, |content| {
        dict::rewrite_value(content, "writeInterval", &iterations)
    })?;

    let tolerance = format!("{}", config.validation.tolerance);
    rewrite_file(&case_dir, skeleton::FV_SOLUTION, "residualControl.p", |content| {
        dict::rewrite_block_value(content, "residualControl", "p", &tolerance)
    })?;
    rewrite_file(&case_dir, skeleton::FV_SOLUTION, "residualControl.U", |content| {
        dict::rewrite_block_value(content, "residualControl", "U", &tolerance)
    })?;

    info!(
        reynolds,
        viscosity,
        case_dir = %case_dir.display(),
        "prepared case"
    );

    Ok(CaseInstance {
        reynolds,
        root: case_dir,
        viscosity,
        tolerance: config.validation.tolerance,
        max_iterations: config.max_iterations,
    })
}

fn rewrite_file<F>(case_dir: &Path, relative: &str, key: &str, rewrite: F) -> CaseResult<()>
where
    F: FnOnce(&str) -> Option<String>,
{
    let path = case_dir.join(relative);
    let content = fs::read_to_string(&path)?;
    let rewritten = rewrite(&content).ok_or_else(|| CaseError::MissingDictEntry {
        key: key.to_string(),
        path: path.clone(),
    })?;
    fs::write(&path, rewritten)?;
    Ok(())
}

fn rewrite_file_opt<F>(case_dir: &Path, relative: &str, rewrite: F) -> CaseResult<()>
where
    F: FnOnce(&str) -> Option<String>,
{
    let path = case_dir.join(relative);
    let content = fs::read_to_string(&path)?;
    if let Some(rewritten) = rewrite(&content) {
        fs::write(&path, rewritten)?;
    }
    Ok(())
}

fn copy_tree(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
