//! External tool resolution and stage spawning.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use fsw_case::skeleton;
use fsw_config::SweepConfig;
use tracing::warn;

use crate::{RunnerError, RunnerResult};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Resolve a configured tool to an executable path. Entries containing a
/// path separator are taken verbatim; bare names are searched on PATH.
pub fn resolve_tool(name: &str) -> RunnerResult<PathBuf> {
    let not_found = || RunnerError::ToolNotFound {
        name: name.to_string(),
    };

    if name.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(name);
        return if path.is_file() { Ok(path) } else { Err(not_found()) };
    }

    let search_path = std::env::var_os("PATH").ok_or_else(not_found)?;
    for dir in std::env::split_paths(&search_path) {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(not_found())
}

/// Verify the environment before any destructive filesystem work: every
/// configured tool must resolve and the base case skeleton must be complete.
pub fn preflight(config: &SweepConfig) -> RunnerResult<()> {
    for tool in [
        config.tools.mesh.as_str(),
        config.tools.mesh_check.as_str(),
        config.tools.solver.as_str(),
        config.tools.post.as_str(),
    ] {
        resolve_tool(tool)?;
    }

    let initial = config.base_case.join(skeleton::INITIAL_CONDITIONS_DIR);
    if !initial.is_dir() {
        return Err(RunnerError::SkeletonMissing { path: initial });
    }
    for relative in skeleton::required_files() {
        let path = config.base_case.join(relative);
        if !path.is_file() {
            return Err(RunnerError::SkeletonMissing { path });
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct StageOutcome {
    pub exit_code: Option<i32>,
    pub timed_out: bool,
    pub elapsed: Duration,
}

impl StageOutcome {
    pub fn succeeded(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Run one tool in the case directory, appending its combined stdout/stderr
/// to the per-case log behind a stage delimiter. With a timeout, the child
/// is killed once the wall clock expires and the stage counts as failed.
pub fn run_stage(
    tool: &str,
    args: &[&str],
    case_dir: &Path,
    log_path: &Path,
    timeout: Option<Duration>,
) -> RunnerResult<StageOutcome> {
    let executable = resolve_tool(tool)?;
    let started = Instant::now();

    let mut log = OpenOptions::new().create(true).append(true).open(log_path)?;
    writeln!(log, "==== stage: {} ====", tool)?;
    log.flush()?;

    let stdout = log.try_clone()?;
    let stderr = log.try_clone()?;

    let mut child = Command::new(&executable)
        .args(args)
        .current_dir(case_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .spawn()?;

    let status = match timeout {
        None => {
            let status = child.wait()?;
            StageOutcome {
                exit_code: status.code(),
                timed_out: false,
                elapsed: started.elapsed(),
            }
        }
        Some(limit) => wait_with_timeout(&mut child, limit, started)?,
    };

    writeln!(
        log,
        "==== stage: {} finished (exit={:?}, timed_out={}) ====",
        tool, status.exit_code, status.timed_out
    )?;

    Ok(status)
}

fn wait_with_timeout(
    child: &mut std::process::Child,
    limit: Duration,
    started: Instant,
) -> RunnerResult<StageOutcome> {
    loop {
        match child.try_wait()? {
            Some(status) => {
                return Ok(StageOutcome {
                    exit_code: status.code(),
                    timed_out: false,
                    elapsed: started.elapsed(),
                });
            }
            None => {
                if started.elapsed() >= limit {
                    if let Err(error) = child.kill() {
                        warn!(%error, "failed to kill timed-out solver");
                    }
                    let status = child.wait()?;
                    return Ok(StageOutcome {
                        exit_code: status.code(),
                        timed_out: true,
                        elapsed: started.elapsed(),
                    });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_is_not_found() {
        let err = resolve_tool("fsw-definitely-not-a-real-tool").unwrap_err();
        assert!(matches!(err, RunnerError::ToolNotFound { .. }));
    }

    #[test]
    fn path_entries_are_taken_verbatim() {
        let missing = format!(
            "{}missing-tool",
            std::path::MAIN_SEPARATOR
        );
        assert!(resolve_tool(&missing).is_err());
    }
}
