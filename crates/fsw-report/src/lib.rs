//! fsw-report: durable sweep results — markers, report store, summary.

pub mod marker;
pub mod store;
pub mod types;

pub use marker::{MARKER_FILE, Marker, read_marker, write_marker};
pub use store::ReportStore;
pub use types::*;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Report not found: {path}")]
    ReportNotFound { path: std::path::PathBuf },
}
