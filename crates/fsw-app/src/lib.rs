//! Shared application service layer for foamsweep.
//!
//! Centralizes the sweep lifecycle for the CLI frontend: configuration
//! validation, environment preflight, bounded-parallel case dispatch, and
//! aggregation of the consolidated report.

pub mod aggregate;
pub mod dispatch;
pub mod error;
pub mod sweep_service;

// Re-export key types for convenience
pub use aggregate::aggregate;
pub use dispatch::dispatch;
pub use error::{AppError, AppResult};
pub use sweep_service::{
    SweepOutcome, SweepTimingSummary, TOOL_VERSION, rebuild_report, run_sweep,
    validate_environment,
};
