//! First-Come-First-Served dispatch.
//!
//! # Algorithm
//!
//! 1. Order tasks by `(arrival, id)` — lowest id breaks arrival ties.
//! 2. Run each to completion on a single clock, idling forward when the
//!    next task has not yet arrived.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the pass.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.1

use crate::error::{SimError, SimResult};
use crate::models::{Metrics, TaskBatch};
use crate::policies::{SchedulingPolicy, run_to_completion};

/// Non-preemptive first-come-first-served dispatch.
///
/// # Example
///
/// ```
/// use dispatch_sim::models::{Task, TaskBatch};
/// use dispatch_sim::policies::{Fcfs, SchedulingPolicy};
///
/// let batch = TaskBatch::from_tasks(vec![
///     Task::new(0, 0, 3, 2, 3.0),
///     Task::new(1, 0, 2, 1, 2.0),
/// ]).unwrap();
/// let metrics = Fcfs.evaluate(&batch).unwrap();
/// assert_eq!(metrics.throughput, 2.0 / 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, batch: &TaskBatch) -> SimResult<Metrics> {
        if batch.is_empty() {
            return Err(SimError::empty_batch(self.name()));
        }

        let order = batch.arrival_order();
        let (completions, finish) = run_to_completion(batch, &order);
        Ok(Metrics::from_completions(
            batch.tasks(),
            &completions,
            finish,
            batch.total_energy(),
        ))
    }

    fn description(&self) -> &'static str {
        "First-Come-First-Served"
    }
}
