//! Bounded-parallel dispatch of case work.

use crate::error::{AppError, AppResult};

/// Run one unit of work per parameter value on a dedicated worker pool of
/// exactly `concurrency` threads.
///
/// Units are submitted in input order and at most `concurrency` execute at
/// once; completion order is unconstrained. The call returns only after
/// every unit has finished. Units communicate through the per-case
/// artifacts they write, never through return values, so a unit failing (or
/// the process dying between dispatch and aggregation) loses nothing
/// another unit produced.
pub fn dispatch<F>(values: &[f64], concurrency: usize, unit: F) -> AppResult<()>
where
    F: Fn(f64) + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(concurrency.max(1))
        .thread_name(|i| format!("fsw-worker-{}", i))
        .build()
        .map_err(|err| AppError::Dispatch(err.to_string()))?;

    pool.scope(|scope| {
        for &value in values {
            let unit = &unit;
            scope.spawn(move |_| unit(value));
        }
    });

    Ok(())
}
