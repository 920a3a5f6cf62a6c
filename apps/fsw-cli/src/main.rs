use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use fsw_app::{AppResult, SweepOutcome, rebuild_report, run_sweep, validate_environment};
use fsw_config::SweepConfig;

#[derive(Parser)]
#[command(name = "fsw-cli")]
#[command(about = "FoamSweep CLI - parametric CFD sweep orchestrator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate sweep configuration and environment
    Validate {
        /// Path to the sweep YAML file
        config_path: PathBuf,
    },
    /// Run the full parametric sweep
    Run {
        /// Path to the sweep YAML file
        config_path: PathBuf,
        /// Reynolds numbers to sweep, overriding the config
        #[arg(long, value_delimiter = ',')]
        reynolds: Option<Vec<f64>>,
        /// Solver iteration ceiling
        #[arg(long)]
        max_iterations: Option<u64>,
        /// Concurrently running cases
        #[arg(long)]
        jobs: Option<usize>,
        /// Results root directory
        #[arg(long)]
        results_dir: Option<PathBuf>,
        /// Convergence tolerance on the final residuals
        #[arg(long)]
        tolerance: Option<f64>,
    },
    /// Rebuild the report from on-disk case artifacts without running
    Report {
        /// Path to the sweep YAML file
        config_path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            reynolds,
            max_iterations,
            jobs,
            results_dir,
            tolerance,
        } => cmd_run(
            &config_path,
            reynolds,
            max_iterations,
            jobs,
            results_dir,
            tolerance,
        ),
        Commands::Report { config_path } => cmd_report(&config_path),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating sweep: {}", config_path.display());
    let config = fsw_config::load_yaml(config_path)?;
    validate_environment(&config)?;
    println!("✓ Configuration is valid");
    println!(
        "  {} cases, {} parallel, tolerance {}",
        config.reynolds_numbers.len(),
        config.parallel_jobs,
        config.validation.tolerance
    );
    Ok(())
}

fn cmd_run(
    config_path: &Path,
    reynolds: Option<Vec<f64>>,
    max_iterations: Option<u64>,
    jobs: Option<usize>,
    results_dir: Option<PathBuf>,
    tolerance: Option<f64>,
) -> AppResult<()> {
    let mut config = fsw_config::load_yaml(config_path)?;
    apply_overrides(
        &mut config,
        reynolds,
        max_iterations,
        jobs,
        results_dir,
        tolerance,
    );

    println!("Running sweep: {}", config.name);
    println!(
        "  Reynolds numbers: {:?}",
        config.reynolds_numbers
    );
    println!("  Parallel jobs:    {}", config.parallel_jobs);

    let outcome = run_sweep(&config)?;
    println!("✓ Sweep completed: {}", outcome.report.overall.as_str());
    print_outcome(&outcome);

    Ok(())
}

fn cmd_report(config_path: &Path) -> AppResult<()> {
    let config = fsw_config::load_yaml(config_path)?;

    println!("Rebuilding report for: {}", config.name);
    let outcome = rebuild_report(&config)?;
    println!("✓ Report rebuilt: {}", outcome.report.overall.as_str());
    print_outcome(&outcome);

    Ok(())
}

fn apply_overrides(
    config: &mut SweepConfig,
    reynolds: Option<Vec<f64>>,
    max_iterations: Option<u64>,
    jobs: Option<usize>,
    results_dir: Option<PathBuf>,
    tolerance: Option<f64>,
) {
    if let Some(reynolds) = reynolds {
        config.reynolds_numbers = reynolds;
    }
    if let Some(max_iterations) = max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(jobs) = jobs {
        config.parallel_jobs = jobs;
    }
    if let Some(results_dir) = results_dir {
        config.results_dir = results_dir;
    }
    if let Some(tolerance) = tolerance {
        config.validation.tolerance = tolerance;
    }
}

fn print_outcome(outcome: &SweepOutcome) {
    println!("\nResults:");
    for record in &outcome.report.results {
        let residual = record
            .final_p_residual
            .map(|r| format!("{:.3e}", r))
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "  Re {:>8}  {:<26} runtime={:>7.1}s  p-residual={}",
            record.reynolds,
            record.status.as_str(),
            record.runtime_s,
            residual
        );
    }

    println!("\nTiming summary:");
    println!("  Dispatch:  {:.3}s", outcome.timing.dispatch_s);
    println!("  Aggregate: {:.3}s", outcome.timing.aggregate_s);
    println!("  Save:      {:.3}s", outcome.timing.save_s);
    println!("  Total:     {:.3}s", outcome.timing.total_s);

    println!("\nReport:  {}", outcome.report_path.display());
    println!("Summary: {}", outcome.summary_path.display());
}
