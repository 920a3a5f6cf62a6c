//! Case layout expected by the external tools, plus deterministic naming.

use std::path::{Path, PathBuf};

pub const TRANSPORT_PROPERTIES: &str = "constant/transportProperties";
pub const CONTROL_DICT: &str = "system/controlDict";
pub const FV_SCHEMES: &str = "system/fvSchemes";
pub const FV_SOLUTION: &str = "system/fvSolution";
pub const BLOCK_MESH_DICT: &str = "system/blockMeshDict";
pub const INITIAL_CONDITIONS_DIR: &str = "0";

/// Files the base case must contain before a sweep starts. The templater
/// rewrites values inside these files and never restructures the skeleton.
pub fn required_files() -> [&'static str; 5] {
    [
        TRANSPORT_PROPERTIES,
        CONTROL_DICT,
        FV_SCHEMES,
        FV_SOLUTION,
        BLOCK_MESH_DICT,
    ]
}

/// Canonical case directory name for a Reynolds number. Aggregation relies
/// on this being reproducible from the parameter value alone.
pub fn case_dir_name(reynolds: f64) -> String {
    format!("case_Re{}", format_reynolds(reynolds))
}

pub fn log_file_name(reynolds: f64) -> String {
    format!("case_Re{}.log", format_reynolds(reynolds))
}

/// Per-case log under the shared `<results>/logs` directory.
pub fn log_file_path(results_dir: &Path, reynolds: f64) -> PathBuf {
    results_dir.join("logs").join(log_file_name(reynolds))
}

fn format_reynolds(reynolds: f64) -> String {
    if reynolds.fract() == 0.0 && reynolds.abs() < 1.0e15 {
        format!("{}", reynolds as i64)
    } else {
        format!("{}", reynolds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_reynolds_drops_fraction() {
        assert_eq!(case_dir_name(100.0), "case_Re100");
        assert_eq!(case_dir_name(1000.0), "case_Re1000");
    }

    #[test]
    fn fractional_reynolds_keeps_decimal() {
        assert_eq!(case_dir_name(62.5), "case_Re62.5");
    }

    #[test]
    fn log_name_matches_case_name() {
        assert_eq!(log_file_name(500.0), "case_Re500.log");
        assert_eq!(
            log_file_path(Path::new("results"), 500.0),
            Path::new("results/logs/case_Re500.log")
        );
    }
}
