//! Non-preemptive priority dispatch.
//!
//! # Algorithm
//!
//! Time-stepped admission identical to round-robin's, but the ready set is
//! a min-heap keyed `(priority, id)`: lower priority value runs first, and
//! the id is a pure deterministic discriminator on ties, not a proxy for
//! arrival order. Each popped task runs its full burst.
//!
//! # Complexity
//! O(n log n): each task is pushed and popped once.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.4

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{SimError, SimResult};
use crate::models::{Metrics, TaskBatch};
use crate::policies::{ArrivalCursor, SchedulingPolicy};

/// Non-preemptive priority dispatch, lower `priority` value first.
///
/// # Example
///
/// ```
/// use dispatch_sim::models::{Task, TaskBatch};
/// use dispatch_sim::policies::{Priority, SchedulingPolicy};
///
/// let batch = TaskBatch::from_tasks(vec![
///     Task::new(0, 0, 3, 2, 3.0),
///     Task::new(1, 0, 2, 1, 2.0),
/// ]).unwrap();
/// let metrics = Priority.evaluate(&batch).unwrap();
/// // id1 (priority 1) runs first despite equal arrival.
/// assert_eq!(metrics.waiting_mean, 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Priority;

impl SchedulingPolicy for Priority {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn evaluate(&self, batch: &TaskBatch) -> SimResult<Metrics> {
        let n = batch.len();
        if n == 0 {
            return Err(SimError::empty_batch(self.name()));
        }

        let mut ready: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::with_capacity(n);
        let mut completions = vec![0.0; n];
        let mut completed = 0usize;
        let mut cursor = ArrivalCursor::new(batch);
        let mut time: u64 = 0;

        while completed < n {
            cursor.admit_up_to(time as f64, |id| {
                ready.push(Reverse((batch.tasks()[id].priority, id)));
            });

            let Some(Reverse((_, id))) = ready.pop() else {
                if let Some(arrival) = cursor.next_arrival() {
                    time = time.max(arrival);
                }
                continue;
            };

            let task = &batch.tasks()[id];
            // Admission already guarantees arrival <= time.
            time = time.max(task.arrival);
            time += task.burst;
            completions[id] = time as f64;
            completed += 1;
        }

        Ok(Metrics::from_completions(
            batch.tasks(),
            &completions,
            time as f64,
            batch.total_energy(),
        ))
    }

    fn description(&self) -> &'static str {
        "Non-preemptive priority, lowest value first"
    }
}
