//! Parallel fan-out over independent monitoring periods
//!
//! Each calculation is a pure function of its input, so the batch runs on
//! the rayon pool with no coordination. Results are keyed by the caller's id
//! and are identical to sequential [`calculate`] calls.

use std::hash::Hash;

use rayon::prelude::*;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::{debug, warn};

use super::orchestrator::{calculate, CalculationInput, CorcResult};
use crate::error::Result;

/// Calculate every input in parallel.
///
/// A failing entry does not affect the others. Duplicate ids keep the last
/// entry in slice order.
pub fn calculate_batch<K>(inputs: &[(K, CalculationInput)]) -> FxHashMap<K, Result<CorcResult>>
where
    K: Hash + Eq + Clone + Send + Sync,
{
    let computed: Vec<(K, Result<CorcResult>)> = inputs
        .par_iter()
        .map(|(id, input)| (id.clone(), calculate(input)))
        .collect();

    let mut results = FxHashMap::with_capacity_and_hasher(computed.len(), FxBuildHasher);
    let mut failures = 0usize;
    for (id, result) in computed {
        if result.is_err() {
            failures += 1;
        }
        results.insert(id, result);
    }

    if failures > 0 {
        warn!(failures, total = inputs.len(), "batch calculation had failures");
    }
    debug!(total = inputs.len(), distinct = results.len(), "batch calculation complete");

    results
}
