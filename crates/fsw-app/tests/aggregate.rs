use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use fsw_app::aggregate;
use fsw_case::case_dir_name;
use fsw_config::SweepConfig;
use fsw_report::{Marker, OverallStatus, ReportStore, RunStatus, overall_status, write_marker};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{}_{}", prefix, nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config(results_dir: &Path, reynolds: Vec<f64>) -> SweepConfig {
    SweepConfig {
        name: "aggregate-test".to_string(),
        base_case: PathBuf::from("unused"),
        results_dir: results_dir.to_path_buf(),
        reynolds_numbers: reynolds,
        max_iterations: 500,
        parallel_jobs: 1,
        validation: fsw_config::ValidationConfig {
            tolerance: 1.0e-6,
            ..Default::default()
        },
        physics: Default::default(),
        tools: Default::default(),
        plot_script: None,
    }
}

fn seed_case(results_dir: &Path, reynolds: f64, marker: Marker, log: &str) {
    let case_dir = results_dir.join(case_dir_name(reynolds));
    fs::create_dir_all(&case_dir).unwrap();
    write_marker(&case_dir, marker).unwrap();

    let logs_dir = results_dir.join("logs");
    fs::create_dir_all(&logs_dir).unwrap();
    fs::write(
        fsw_case::log_file_path(results_dir, reynolds),
        log,
    )
    .unwrap();
}

const CONVERGED_LOG: &str = "\
Time = 320
Solving for Ux, Initial residual = 0.01, Final residual = 2.1e-07, converged
Solving for p, Initial residual = 0.02, Final residual = 5.5e-07, converged
ExecutionTime = 1.25 s
";

const NO_PRESSURE_LOG: &str = "\
Time = 500
Solving for Ux, Initial residual = 0.01, Final residual = 2.1e-07, converged
ExecutionTime = 2.5 s
";

#[test]
fn aggregates_every_parameter_in_order() {
    let results_dir = unique_temp_dir("fsw_aggregate_order");
    let config = config(&results_dir, vec![100.0, 200.0, 800.0]);

    seed_case(&results_dir, 100.0, Marker::Converged, CONVERGED_LOG);
    seed_case(&results_dir, 200.0, Marker::NotConverged, NO_PRESSURE_LOG);
    // 800 never ran: no case directory at all.

    let report = aggregate(&config, 12.0, "0.1.0");

    assert_eq!(report.results.len(), 3);
    let reynolds: Vec<f64> = report.results.iter().map(|r| r.reynolds).collect();
    assert_eq!(reynolds, vec![100.0, 200.0, 800.0]);

    assert_eq!(report.results[0].status, RunStatus::Success);
    assert!(report.results[0].converged);
    assert_eq!(report.results[0].final_p_residual, Some(5.5e-7));
    assert_eq!(report.results[0].iterations, Some(320));
    assert!((report.results[0].runtime_s - 1.25).abs() < 1.0e-12);

    // Residual lines absent from the trailing window: fails open.
    assert_eq!(report.results[1].status, RunStatus::NoConvergence);
    assert!(!report.results[1].converged);
    assert_eq!(report.results[1].final_p_residual, None);
    assert_eq!(report.results[1].final_u_residual, Some(2.1e-7));

    assert_eq!(report.results[2].status, RunStatus::Failed);
    assert!(!report.results[2].converged);
    assert_eq!(report.results[2].final_p_residual, None);

    assert_eq!(report.overall, OverallStatus::PartialSuccess);
}

#[test]
fn missing_marker_is_failed() {
    let results_dir = unique_temp_dir("fsw_aggregate_no_marker");
    let config = config(&results_dir, vec![100.0]);

    let case_dir = results_dir.join(case_dir_name(100.0));
    fs::create_dir_all(&case_dir).unwrap();

    let report = aggregate(&config, 0.0, "0.1.0");
    assert_eq!(report.results[0].status, RunStatus::Failed);
    assert_eq!(report.overall, OverallStatus::AllFailed);
}

#[test]
fn saved_report_roundtrips_overall_status() {
    let results_dir = unique_temp_dir("fsw_aggregate_roundtrip");
    let config = config(&results_dir, vec![100.0, 500.0]);

    seed_case(&results_dir, 100.0, Marker::Converged, CONVERGED_LOG);
    seed_case(&results_dir, 500.0, Marker::Failed, "");

    let report = aggregate(&config, 3.0, "0.1.0");
    let store = ReportStore::new(results_dir).unwrap();
    store.save_report(&report).unwrap();

    let loaded = store.load_report().unwrap();
    assert_eq!(loaded.overall, overall_status(&loaded.results));
    assert_eq!(loaded.overall, OverallStatus::PartialSuccess);
    assert_eq!(loaded.results.len(), 2);
}

#[test]
fn all_failed_when_nothing_ran() {
    let results_dir = unique_temp_dir("fsw_aggregate_empty");
    let config = config(&results_dir, vec![100.0, 500.0, 1000.0]);

    let report = aggregate(&config, 0.0, "0.1.0");

    assert_eq!(report.results.len(), 3);
    assert!(report.results.iter().all(|r| r.status == RunStatus::Failed));
    assert_eq!(report.overall, OverallStatus::AllFailed);
}
