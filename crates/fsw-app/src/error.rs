//! Error types for the fsw-app service layer.

/// Application error that wraps errors from the backend crates and provides
/// a unified interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Case preparation error: {0}")]
    Case(String),

    #[error("Runner error: {0}")]
    Runner(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fsw-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<fsw_config::ConfigError> for AppError {
    fn from(err: fsw_config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<fsw_config::ValidationError> for AppError {
    fn from(err: fsw_config::ValidationError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<fsw_case::CaseError> for AppError {
    fn from(err: fsw_case::CaseError) -> Self {
        AppError::Case(err.to_string())
    }
}

impl From<fsw_runner::RunnerError> for AppError {
    fn from(err: fsw_runner::RunnerError) -> Self {
        AppError::Runner(err.to_string())
    }
}

impl From<fsw_report::ReportError> for AppError {
    fn from(err: fsw_report::ReportError) -> Self {
        AppError::Report(err.to_string())
    }
}
