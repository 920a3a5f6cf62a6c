//! fsw-runner: staged execution of one case against the external tools.
//!
//! Contains:
//! - tools (executable resolution, environment preflight, stage spawning)
//! - classify (residual extraction from the trailing log window)
//! - executor (the mesh/check/solve/classify/sample pipeline)

pub mod classify;
pub mod executor;
pub mod tools;

pub use classify::{Classification, classify, execution_time, final_time};
pub use executor::execute;
pub use tools::{preflight, resolve_tool};

use std::path::PathBuf;

pub type RunnerResult<T> = Result<T, RunnerError>;

#[derive(thiserror::Error, Debug)]
pub enum RunnerError {
    #[error("External tool not found: {name}")]
    ToolNotFound { name: String },

    #[error("Base case is missing {path}")]
    SkeletonMissing { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
