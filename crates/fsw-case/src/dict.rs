//! Value rewriting for OpenFOAM-style key-value dictionary files.
//!
//! Only the final value token of a `key ... value;` line is replaced, so the
//! structure the external tools parse (dimension vectors, alignment,
//! comments) survives untouched.

/// Rewrite the first top-level `key ... value;` line. Returns `None` when no
/// such line exists.
pub fn rewrite_value(content: &str, key: &str, new_value: &str) -> Option<String> {
    let mut rewritten = false;
    let mut out = String::with_capacity(content.len());

    for line in content.lines() {
        if !rewritten {
            if let Some(new_line) = rewrite_line(line, key, new_value) {
                out.push_str(&new_line);
                out.push('\n');
                rewritten = true;
                continue;
            }
        }
        out.push_str(line);
        out.push('\n');
    }

    rewritten.then_some(out)
}

/// Rewrite the first `key ... value;` line inside the braces of the named
/// block. Lines outside the block are never touched.
pub fn rewrite_block_value(
    content: &str,
    block: &str,
    key: &str,
    new_value: &str,
) -> Option<String> {
    let mut rewritten = false;
    let mut in_block = false;
    let mut entered = false;
    let mut depth = 0i32;
    let mut out = String::with_capacity(content.len());

    for line in content.lines() {
        if !entered && line.split_whitespace().next() == Some(block) {
            in_block = true;
        }

        if in_block && !rewritten && depth > 0 {
            if let Some(new_line) = rewrite_line(line, key, new_value) {
                out.push_str(&new_line);
                out.push('\n');
                rewritten = true;
                depth += brace_delta(line);
                continue;
            }
        }

        if in_block {
            depth += brace_delta(line);
            if depth > 0 {
                entered = true;
            }
            if entered && depth == 0 {
                in_block = false;
            }
        }

        out.push_str(line);
        out.push('\n');
    }

    rewritten.then_some(out)
}

fn rewrite_line(line: &str, key: &str, new_value: &str) -> Option<String> {
    let trimmed = line.trim_start();
    if trimmed.split_whitespace().next() != Some(key) {
        return None;
    }

    let stripped = line.trim_end();
    let body = stripped.strip_suffix(';')?;
    let cut = body.rfind(|c: char| c.is_whitespace())?;
    Some(format!("{}{};", &body[..=cut], new_value))
}

fn brace_delta(line: &str) -> i32 {
    let opens = line.matches('{').count() as i32;
    let closes = line.matches('}').count() as i32;
    opens - closes
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSPORT: &str = "\
FoamFile
{
    version     2.0;
    format      ascii;
    object      transportProperties;
}

nu              [0 2 -1 0 0 0 0] 0.01;
";

    const FV_SOLUTION: &str = "\
solvers
{
    p
    {
        solver          PCG;
        tolerance       1e-06;
        relTol          0.05;
    }
}

SIMPLE
{
    nNonOrthogonalCorrectors 0;
    residualControl
    {
        p               1e-4;
        U               1e-4;
    }
}
";

    #[test]
    fn rewrites_value_and_keeps_dimensions() {
        let out = rewrite_value(TRANSPORT, "nu", "0.001").unwrap();
        assert!(out.contains("nu              [0 2 -1 0 0 0 0] 0.001;"));
        assert!(out.contains("format      ascii;"));
    }

    #[test]
    fn missing_key_is_none() {
        assert!(rewrite_value(TRANSPORT, "endTime", "500").is_none());
    }

    #[test]
    fn block_rewrite_is_scoped() {
        let out = rewrite_block_value(FV_SOLUTION, "residualControl", "p", "1e-6").unwrap();
        assert!(out.contains("p               1e-6;"));
        // The p solver block outside residualControl is untouched.
        assert!(out.contains("solver          PCG;"));
        assert!(out.contains("tolerance       1e-06;"));
    }

    #[test]
    fn block_rewrite_both_fields() {
        let out = rewrite_block_value(FV_SOLUTION, "residualControl", "p", "1e-5").unwrap();
        let out = rewrite_block_value(&out, "residualControl", "U", "1e-5").unwrap();
        assert!(out.contains("p               1e-5;"));
        assert!(out.contains("U               1e-5;"));
    }

    #[test]
    fn missing_block_is_none() {
        assert!(rewrite_block_value(TRANSPORT, "residualControl", "p", "1e-6").is_none());
    }
}
