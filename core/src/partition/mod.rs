//! Partition of registered events into atomic cells.
//!
//! Computes the finest common refinement of the event regions by:
//! 1. Planning one run per event: the event as the start piece and every
//!    other event as a splitter, in registration order
//! 2. Cascading each run's start piece through its splitters
//! 3. Merging all runs' pieces, dropping geometric duplicates
//! 4. Numbering the surviving cells in first-seen order

mod cascade;
mod dedupe;
mod enumerate;
mod registry;

pub use cascade::cascade_split;
pub use dedupe::dedupe;
pub use enumerate::{plan_runs, SplitRun};
pub use registry::{Partition, PartitionCell};

use crate::geometry::{GeometryResult, Polygon, SplitKernel};
use tracing::{debug, info};

/// All distinct cells of the refinement, in first-seen order.
pub fn refine<K: SplitKernel + ?Sized>(regions: &[&Polygon], kernel: &K) -> GeometryResult<Vec<Polygon>> {
    let mut pieces = Vec::new();
    for run in plan_runs(regions.len()) {
        let splitters: Vec<&Polygon> = run.splitters.iter().map(|&i| regions[i]).collect();
        let produced = cascade_split(kernel, vec![regions[run.start].clone()], &splitters)?;
        debug!(start = run.start, splitters = splitters.len(), pieces = produced.len(), "cascade run");
        pieces.extend(produced);
    }

    let total = pieces.len();
    let cells = dedupe(kernel, pieces)?;
    info!(events = regions.len(), pieces = total, cells = cells.len(), "partition computed");
    Ok(cells)
}
