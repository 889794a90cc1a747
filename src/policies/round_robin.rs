//! Round-Robin dispatch with a fixed quantum and context-switch cost.
//!
//! # Algorithm
//!
//! Time-stepped over a FIFO ready queue of task ids:
//!
//! 1. Admit every arrived, un-admitted task at the tail, in arrival order.
//! 2. If the queue is empty and tasks remain, jump the clock to the next
//!    arrival (no tick-by-tick busy waiting) and re-admit.
//! 3. Run the head task for `min(quantum, remaining)`.
//! 4. Re-admit with the post-slice clock, so a task arriving mid-slice (or
//!    exactly at slice end) enters the queue ahead of the preempted task.
//! 5. Record completion when remaining hits zero, else re-enqueue at the
//!    tail.
//! 6. Charge the context-switch cost after every dispatch, completions
//!    included, so the final clock carries a trailing switch.
//!
//! The clock is real-valued because the switch cost is.
//!
//! # Fairness
//! With queue length `q`, no ready task waits more than
//! `(q - 1) * quantum + q * context_switch` between successive slices,
//! modulo new arrivals extending the queue.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.3

use std::collections::VecDeque;

use crate::error::{SimError, SimResult};
use crate::models::{Metrics, TaskBatch};
use crate::policies::{ArrivalCursor, SchedulingPolicy};

/// Default execution slice granted per dispatch.
pub const DEFAULT_QUANTUM: u64 = 4;

/// Quantum-preemptive round-robin dispatch.
///
/// # Example
///
/// ```
/// use dispatch_sim::models::{Task, TaskBatch};
/// use dispatch_sim::policies::{RoundRobin, SchedulingPolicy};
///
/// let batch = TaskBatch::from_tasks(vec![
///     Task::new(0, 0, 6, 1, 6.0),
///     Task::new(1, 0, 2, 1, 2.0),
/// ]).unwrap();
/// let rr = RoundRobin::new(4, 0.0).unwrap();
/// let metrics = rr.evaluate(&batch).unwrap();
/// assert_eq!(metrics.throughput, 2.0 / 8.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: u64,
    context_switch: f64,
}

impl RoundRobin {
    /// Creates a round-robin policy.
    ///
    /// # Errors
    /// `InvalidArgument` if `quantum < 1`, or `context_switch` is negative
    /// or not finite.
    pub fn new(quantum: u64, context_switch: f64) -> SimResult<Self> {
        if quantum < 1 {
            return Err(SimError::invalid_argument(format!(
                "quantum must be >= 1, got {quantum}"
            )));
        }
        if !context_switch.is_finite() || context_switch < 0.0 {
            return Err(SimError::invalid_argument(format!(
                "context switch cost must be finite and >= 0, got {context_switch}"
            )));
        }
        Ok(Self {
            quantum,
            context_switch,
        })
    }

    /// The configured quantum.
    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    /// The configured per-dispatch context-switch cost.
    pub fn context_switch(&self) -> f64 {
        self.context_switch
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            context_switch: 0.0,
        }
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RoundRobin"
    }

    fn evaluate(&self, batch: &TaskBatch) -> SimResult<Metrics> {
        let n = batch.len();
        if n == 0 {
            return Err(SimError::empty_batch(self.name()));
        }

        let mut remaining: Vec<u64> = batch.iter().map(|t| t.burst).collect();
        let mut completions = vec![0.0; n];
        let mut completed = 0usize;
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);
        let mut cursor = ArrivalCursor::new(batch);
        let mut time = 0.0f64;

        while completed < n {
            cursor.admit_up_to(time, |id| queue.push_back(id));

            let Some(id) = queue.pop_front() else {
                // Idle: jump straight to the next arrival. One is
                // guaranteed to exist while tasks are unfinished.
                if let Some(arrival) = cursor.next_arrival() {
                    time = time.max(arrival as f64);
                }
                continue;
            };

            let slice = self.quantum.min(remaining[id]);
            time += slice as f64;
            remaining[id] -= slice;

            // Mid-slice arrivals queue ahead of the preempted task; a task
            // arriving exactly at slice end is admitted first as well.
            cursor.admit_up_to(time, |id| queue.push_back(id));

            if remaining[id] == 0 {
                completions[id] = time;
                completed += 1;
            } else {
                queue.push_back(id);
            }

            time += self.context_switch;
        }

        Ok(Metrics::from_completions(
            batch.tasks(),
            &completions,
            time,
            batch.total_energy(),
        ))
    }

    fn description(&self) -> &'static str {
        "Round-Robin with fixed quantum"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimErrorKind;
    use crate::models::Task;
    use crate::policies::Fcfs;

    fn three_task_batch() -> TaskBatch {
        TaskBatch::from_tasks(vec![
            Task::new(0, 0, 3, 2, 3.0),
            Task::new(1, 0, 2, 1, 2.0),
            Task::new(2, 1, 1, 3, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert_eq!(
            RoundRobin::new(0, 0.0).unwrap_err().kind,
            SimErrorKind::InvalidArgument
        );
        assert!(RoundRobin::new(4, -0.5).is_err());
        assert!(RoundRobin::new(4, f64::NAN).is_err());
        assert!(RoundRobin::new(4, f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_empty_batch() {
        let batch = TaskBatch::from_tasks(Vec::new()).unwrap();
        let err = RoundRobin::default().evaluate(&batch).unwrap_err();
        assert_eq!(err.kind, SimErrorKind::EmptyBatch);
    }

    #[test]
    fn test_large_quantum_degenerates_to_fcfs() {
        let batch = three_task_batch();
        let rr = RoundRobin::new(10, 0.0).unwrap();
        assert_eq!(rr.evaluate(&batch).unwrap(), Fcfs.evaluate(&batch).unwrap());
    }

    #[test]
    fn test_preemption_with_mid_slice_arrival() {
        // q=2: id0 runs 0..2 (1 left), id2 arrives at 1 and queues ahead of
        // the re-enqueued id0. Then id1 2..4, id2 4..5, id0 5..6.
        let batch = three_task_batch();
        let rr = RoundRobin::new(2, 0.0).unwrap();
        let metrics = rr.evaluate(&batch).unwrap();
        // waits: id0 = 6-0-3 = 3, id1 = 4-0-2 = 2, id2 = 5-1-1 = 3
        assert!((metrics.waiting_mean - 8.0 / 3.0).abs() < 1e-12);
        assert!((metrics.turnaround_mean - 14.0 / 3.0).abs() < 1e-12);
        assert_eq!(metrics.throughput, 3.0 / 6.0);
    }

    #[test]
    fn test_context_switch_cost() {
        // q=4, cs=0.5: id0 done at 3 (clock 3.5), id1 at 5.5 (clock 6.0),
        // id2 at 7.0; final clock 7.5 includes the trailing switch.
        let batch = three_task_batch();
        let rr = RoundRobin::new(4, 0.5).unwrap();
        let metrics = rr.evaluate(&batch).unwrap();
        // waits: id0 = 0, id1 = 5.5-0-2 = 3.5, id2 = 7.0-1-1 = 5.0
        assert!((metrics.waiting_mean - (0.0 + 3.5 + 5.0) / 3.0).abs() < 1e-12);
        assert!((metrics.throughput - 3.0 / 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_energy_is_undiscounted_sum() {
        let batch = three_task_batch();
        let metrics = RoundRobin::default().evaluate(&batch).unwrap();
        assert_eq!(metrics.total_energy, batch.total_energy());
    }

    #[test]
    fn test_idle_gap_jumps_to_next_arrival() {
        let batch = TaskBatch::from_tasks(vec![
            Task::new(0, 0, 2, 1, 2.0),
            Task::new(1, 10, 4, 1, 4.0),
        ])
        .unwrap();
        let rr = RoundRobin::new(4, 0.0).unwrap();
        let metrics = rr.evaluate(&batch).unwrap();
        // id0 done at 2, idle to 10, id1 done at 14.
        assert_eq!(metrics.waiting_mean, 0.0);
        assert_eq!(metrics.throughput, 2.0 / 14.0);
    }

    #[test]
    fn test_turnaround_is_waiting_plus_mean_burst() {
        let batch = three_task_batch();
        let metrics = RoundRobin::new(2, 0.25).unwrap().evaluate(&batch).unwrap();
        assert!(
            (metrics.turnaround_mean - metrics.waiting_mean - batch.mean_burst()).abs() < 1e-12
        );
    }
}
