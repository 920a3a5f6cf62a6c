//! fsw-case: isolated case directories cloned from a template.
//!
//! Contains:
//! - skeleton (expected case layout + deterministic naming)
//! - dict (value rewriting for OpenFOAM-style key-value files)
//! - template (clean-slate case preparation)

pub mod dict;
pub mod skeleton;
pub mod template;

pub use skeleton::{case_dir_name, log_file_name, log_file_path};
pub use template::{CaseInstance, kinematic_viscosity, prepare};

use std::path::PathBuf;

pub type CaseResult<T> = Result<T, CaseError>;

#[derive(thiserror::Error, Debug)]
pub enum CaseError {
    #[error("Reynolds number is zero: cannot derive a kinematic viscosity")]
    ZeroReynolds,

    #[error("Missing dictionary entry: {key} in {path}")]
    MissingDictEntry { key: String, path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
