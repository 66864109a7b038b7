/// One cascade run: a start event and the events that cut it, as indices
/// into the registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRun {
    pub start: usize,
    pub splitters: Vec<usize>,
}

/// Runs for `n` events.
///
/// Start events are taken in reverse registration order; each run's
/// splitters are all other events, in registration order.
pub fn plan_runs(n: usize) -> Vec<SplitRun> {
    (0..n)
        .rev()
        .map(|start| SplitRun {
            start,
            splitters: (0..n).filter(|&i| i != start).collect(),
        })
        .collect()
}
