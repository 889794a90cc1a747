//! Energy-aware dispatch.
//!
//! FCFS admission order, but tasks sharing an arrival time run in order of
//! lowest energy cost first. The charged energy is discounted by a fixed
//! factor, modeling the saving of an energy-optimized dispatch path; the
//! discount is a policy constant, not derived from any task field.

use crate::error::{SimError, SimResult};
use crate::models::{Metrics, TaskBatch};
use crate::policies::{SchedulingPolicy, run_to_completion};

/// Fraction of nominal energy actually charged per task.
pub const ENERGY_DISCOUNT: f64 = 0.8;

/// Non-preemptive dispatch ordered by `(arrival, energy, id)`, charging
/// [`ENERGY_DISCOUNT`] of each task's nominal energy.
///
/// Timing metrics are computed exactly as in FCFS.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyAware;

impl SchedulingPolicy for EnergyAware {
    fn name(&self) -> &'static str {
        "EnergyAware"
    }

    fn evaluate(&self, batch: &TaskBatch) -> SimResult<Metrics> {
        if batch.is_empty() {
            return Err(SimError::empty_batch(self.name()));
        }

        let tasks = batch.tasks();
        let mut order: Vec<usize> = (0..tasks.len()).collect();
        order.sort_by(|&a, &b| {
            tasks[a]
                .arrival
                .cmp(&tasks[b].arrival)
                .then(tasks[a].energy.total_cmp(&tasks[b].energy))
                .then(a.cmp(&b))
        });

        let (completions, finish) = run_to_completion(batch, &order);
        Ok(Metrics::from_completions(
            tasks,
            &completions,
            finish,
            batch.total_energy() * ENERGY_DISCOUNT,
        ))
    }

    fn description(&self) -> &'static str {
        "FCFS order tie-broken by lowest energy, discounted charge"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimErrorKind;
    use crate::models::Task;

    fn three_task_batch() -> TaskBatch {
        TaskBatch::from_tasks(vec![
            Task::new(0, 0, 3, 2, 3.0),
            Task::new(1, 0, 2, 1, 2.0),
            Task::new(2, 1, 1, 3, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_empty_batch() {
        let batch = TaskBatch::from_tasks(Vec::new()).unwrap();
        let err = EnergyAware.evaluate(&batch).unwrap_err();
        assert_eq!(err.kind, SimErrorKind::EmptyBatch);
    }

    #[test]
    fn test_reference_scenario() {
        // Equal arrivals 0: id1 (energy 2.0) before id0 (3.0); then id2.
        // id1 0..2, id0 2..5, id2 5..6.
        let metrics = EnergyAware.evaluate(&three_task_batch()).unwrap();
        assert!((metrics.waiting_mean - 2.0).abs() < 1e-12);
        assert!((metrics.turnaround_mean - 4.0).abs() < 1e-12);
        assert_eq!(metrics.throughput, 3.0 / 6.0);
    }

    #[test]
    fn test_energy_is_exactly_discounted_sum() {
        let batch = three_task_batch();
        let metrics = EnergyAware.evaluate(&batch).unwrap();
        assert_eq!(metrics.total_energy, ENERGY_DISCOUNT * batch.total_energy());
    }

    #[test]
    fn test_arrival_still_dominates_energy() {
        // The cheapest task arrives last and must not jump the queue.
        let batch = TaskBatch::from_tasks(vec![
            Task::new(0, 0, 4, 1, 9.0),
            Task::new(1, 6, 1, 1, 0.9),
        ])
        .unwrap();
        let metrics = EnergyAware.evaluate(&batch).unwrap();
        // id0 0..4, idle, id1 6..7 → both waits 0.
        assert_eq!(metrics.waiting_mean, 0.0);
        assert_eq!(metrics.throughput, 2.0 / 7.0);
    }

    #[test]
    fn test_equal_arrival_and_energy_tie_breaks_by_id() {
        let batch = TaskBatch::from_tasks(vec![
            Task::new(0, 0, 2, 1, 2.0),
            Task::new(1, 0, 3, 1, 2.0),
        ])
        .unwrap();
        let metrics = EnergyAware.evaluate(&batch).unwrap();
        // id0 0..2, id1 2..5 → waits 0 and 2.
        assert_eq!(metrics.waiting_mean, 1.0);
    }

    #[test]
    fn test_turnaround_is_waiting_plus_mean_burst() {
        let batch = three_task_batch();
        let metrics = EnergyAware.evaluate(&batch).unwrap();
        assert!(
            (metrics.turnaround_mean - metrics.waiting_mean - batch.mean_burst()).abs() < 1e-12
        );
    }
}
