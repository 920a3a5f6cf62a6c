//! Best-effort residual extraction from free-text solver logs.
//!
//! The solver's log format is not a contract, so every extraction failure
//! degrades to "value absent" and classification fails open to
//! not-converged. Callers never see an error from this module.

/// Only this many trailing lines are inspected; earlier iterations are
/// irrelevant to the final state.
const TAIL_LINES: usize = 100;

const PRESSURE_PATTERN: &str = "Solving for p,";
const VELOCITY_PATTERN: &str = "Solving for Ux,";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub converged: bool,
    pub final_p_residual: Option<f64>,
    pub final_u_residual: Option<f64>,
}

/// Scan the trailing window of `log_text` for the most recent pressure and
/// velocity solve lines and compare their residuals against `tolerance`.
/// Converged only when both residuals are present and strictly below it.
pub fn classify(log_text: &str, tolerance: f64) -> Classification {
    let tail = tail_window(log_text);

    let final_p_residual = last_residual(&tail, PRESSURE_PATTERN);
    let final_u_residual = last_residual(&tail, VELOCITY_PATTERN);

    let converged = match (final_p_residual, final_u_residual) {
        (Some(p), Some(u)) => p < tolerance && u < tolerance,
        _ => false,
    };

    Classification {
        converged,
        final_p_residual,
        final_u_residual,
    }
}

/// Last solver iteration reached: the value of the most recent `Time = <n>`
/// line in the trailing window.
pub fn final_time(log_text: &str) -> Option<u64> {
    tail_window(log_text)
        .iter()
        .rev()
        .find_map(|line| parse_assignment(line, "Time ="))
        .and_then(|value: f64| {
            (value.is_finite() && value >= 0.0).then_some(value as u64)
        })
}

/// Solver-reported execution time in seconds, from the most recent
/// `ExecutionTime = <t> s` line. Used by aggregation as the durable runtime
/// once the in-memory wall clock is gone.
pub fn execution_time(log_text: &str) -> Option<f64> {
    tail_window(log_text)
        .iter()
        .rev()
        .find_map(|line| parse_assignment(line, "ExecutionTime ="))
}

fn tail_window(log_text: &str) -> Vec<&str> {
    let lines: Vec<&str> = log_text.lines().collect();
    let start = lines.len().saturating_sub(TAIL_LINES);
    lines[start..].to_vec()
}

/// The residual is the second-to-last whitespace-separated token of the most
/// recent matching line, with trailing separators stripped.
fn last_residual(tail: &[&str], pattern: &str) -> Option<f64> {
    let line = tail.iter().rev().find(|line| line.contains(pattern))?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }
    let raw = tokens[tokens.len() - 2].trim_end_matches([',', ';']);
    raw.parse::<f64>().ok()
}

fn parse_assignment(line: &str, prefix: &str) -> Option<f64> {
    let rest = line.trim_start().strip_prefix(prefix)?;
    let token = rest.split_whitespace().next()?;
    token.trim_end_matches([',', ';']).parse::<f64>().ok()
}
