//! Dispatch policies.
//!
//! Each policy consumes an immutable [`TaskBatch`](crate::models::TaskBatch)
//! and produces one [`Metrics`](crate::models::Metrics) value. Policies are
//! independent of each other and share no mutable state, so evaluations may
//! run in parallel across batches.
//!
//! # Policies
//!
//! - [`Fcfs`]: non-preemptive, arrival order
//! - [`RoundRobin`]: quantum-preemptive FIFO with context-switch cost
//! - [`Priority`]: non-preemptive, min `(priority, id)` among arrived tasks
//! - [`EnergyAware`]: FCFS order tie-broken by lowest energy, 20% discount
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

mod energy_aware;
mod fcfs;
mod priority;
mod round_robin;

pub use energy_aware::EnergyAware;
pub use fcfs::Fcfs;
pub use priority::Priority;
pub use round_robin::{DEFAULT_QUANTUM, RoundRobin};

use std::fmt::Debug;

use crate::error::SimResult;
use crate::models::{Metrics, TaskBatch};

/// A dispatch policy evaluated over one batch.
///
/// # Contract
/// `evaluate` must treat the batch as read-only, fail with `EmptyBatch`
/// for `n = 0`, and terminate for every valid batch (total remaining burst
/// strictly decreases under every policy).
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "FCFS", "RoundRobin").
    fn name(&self) -> &'static str;

    /// Runs the policy over the batch and reports aggregate metrics.
    fn evaluate(&self, batch: &TaskBatch) -> SimResult<Metrics>;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Admission cursor over tasks in `(arrival, id)` order.
///
/// Shared by the time-stepped policies (Round-Robin, Priority): admits
/// every task whose arrival is at or before the current clock, and exposes
/// the next arrival so an idle policy can jump the clock forward instead
/// of busy-waiting tick by tick.
pub(crate) struct ArrivalCursor<'a> {
    batch: &'a TaskBatch,
    order: Vec<usize>,
    next: usize,
}

impl<'a> ArrivalCursor<'a> {
    pub(crate) fn new(batch: &'a TaskBatch) -> Self {
        Self {
            batch,
            order: batch.arrival_order(),
            next: 0,
        }
    }

    /// Admits all not-yet-admitted tasks with `arrival <= now`, in
    /// `(arrival, id)` order, feeding each id to `admit`.
    pub(crate) fn admit_up_to(&mut self, now: f64, mut admit: impl FnMut(usize)) {
        while self.next < self.order.len() {
            let id = self.order[self.next];
            if self.batch.tasks()[id].arrival as f64 > now {
                break;
            }
            admit(id);
            self.next += 1;
        }
    }

    /// Arrival time of the next un-admitted task, if any remain.
    pub(crate) fn next_arrival(&self) -> Option<u64> {
        self.order
            .get(self.next)
            .map(|&id| self.batch.tasks()[id].arrival)
    }
}

/// Non-preemptive single-pass accumulation shared by FCFS and Energy-Aware:
/// runs tasks to completion in `order`, returning per-id completion times
/// and the final clock.
pub(crate) fn run_to_completion(batch: &TaskBatch, order: &[usize]) -> (Vec<f64>, f64) {
    let mut completions = vec![0.0; batch.len()];
    let mut time: u64 = 0;
    for &id in order {
        let task = &batch.tasks()[id];
        time = time.max(task.arrival);
        time += task.burst;
        completions[id] = time as f64;
    }
    (completions, time as f64)
}
