//! Task and batch models.
//!
//! A task is the unit of work dispatched by a policy. Tasks are immutable
//! after generation: policies keep their own bookkeeping (remaining burst,
//! completion times) in dense vectors indexed by task id and never write
//! back into the batch.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.1

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// A schedulable unit of work.
///
/// # Invariants
/// Within one batch, `id` values are dense `0..n-1`; `burst >= 1`;
/// `priority` is in `[1, 5]` with lower meaning more urgent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Dense index within the owning batch.
    pub id: usize,
    /// Simulated time at which the task becomes eligible to run.
    pub arrival: u64,
    /// Total CPU time required to finish, uninterrupted.
    pub burst: u64,
    /// Scheduling priority, 1 (most urgent) to 5.
    pub priority: u32,
    /// Nominal energy cost of running the task to completion.
    pub energy: f64,
}

impl Task {
    /// Creates a task. Field validity is checked when the task joins a
    /// [`TaskBatch`], not here.
    pub fn new(id: usize, arrival: u64, burst: u64, priority: u32, energy: f64) -> Self {
        Self {
            id,
            arrival,
            burst,
            priority,
            energy,
        }
    }
}

/// An immutable, fixed-size batch of tasks with dense ids.
///
/// Generated once per trial, consumed read-only by exactly one policy
/// invocation, then discarded. Dense ids let policies address their
/// bookkeeping by index instead of by reference.
///
/// # Example
///
/// ```
/// use dispatch_sim::models::{Task, TaskBatch};
///
/// let batch = TaskBatch::from_tasks(vec![
///     Task::new(0, 0, 3, 2, 3.0),
///     Task::new(1, 1, 2, 1, 2.0),
/// ]).unwrap();
/// assert_eq!(batch.len(), 2);
/// assert_eq!(batch.mean_burst(), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskBatch {
    tasks: Vec<Task>,
}

impl TaskBatch {
    /// Builds a batch, validating the batch invariants.
    ///
    /// # Errors
    /// `InvalidArgument` if ids are not exactly `0..n-1` in positional
    /// order, or any `burst < 1`, or any `priority` is outside `[1, 5]`,
    /// or any `energy` is not a positive finite number.
    pub fn from_tasks(tasks: Vec<Task>) -> SimResult<Self> {
        for (index, task) in tasks.iter().enumerate() {
            if task.id != index {
                return Err(SimError::invalid_argument(format!(
                    "task at position {index} has id {}, ids must be dense 0..n-1",
                    task.id
                )));
            }
            if task.burst < 1 {
                return Err(SimError::invalid_argument(format!(
                    "task {} has burst 0, burst must be >= 1",
                    task.id
                )));
            }
            if !(1..=5).contains(&task.priority) {
                return Err(SimError::invalid_argument(format!(
                    "task {} has priority {}, expected 1..=5",
                    task.id, task.priority
                )));
            }
            if !(task.energy.is_finite() && task.energy > 0.0) {
                return Err(SimError::invalid_argument(format!(
                    "task {} has energy {}, expected a positive finite value",
                    task.id, task.energy
                )));
            }
        }
        Ok(Self { tasks })
    }

    /// Number of tasks in the batch.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the batch holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The tasks, in id order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task by id.
    pub fn get(&self, id: usize) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Iterator over the tasks in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Sum of undiscounted per-task energies.
    pub fn total_energy(&self) -> f64 {
        self.tasks.iter().map(|t| t.energy).sum()
    }

    /// Arithmetic mean of bursts. Zero for an empty batch.
    pub fn mean_burst(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        let total: u64 = self.tasks.iter().map(|t| t.burst).sum();
        total as f64 / self.tasks.len() as f64
    }

    /// Task ids sorted by `(arrival, id)` — the canonical admission order
    /// shared by every policy.
    pub fn arrival_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.tasks.len()).collect();
        order.sort_by_key(|&id| (self.tasks[id].arrival, id));
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimErrorKind;

    fn valid_tasks() -> Vec<Task> {
        vec![
            Task::new(0, 5, 3, 2, 3.0),
            Task::new(1, 0, 2, 1, 2.0),
            Task::new(2, 5, 1, 3, 1.0),
        ]
    }

    #[test]
    fn test_batch_accepts_valid_tasks() {
        let batch = TaskBatch::from_tasks(valid_tasks()).unwrap();
        assert_eq!(batch.len(), 3);
        assert!(!batch.is_empty());
        assert_eq!(batch.get(1).unwrap().burst, 2);
        assert_eq!(batch.total_energy(), 6.0);
        assert_eq!(batch.mean_burst(), 2.0);
    }

    #[test]
    fn test_batch_rejects_non_dense_ids() {
        let mut tasks = valid_tasks();
        tasks[2].id = 7;
        let err = TaskBatch::from_tasks(tasks).unwrap_err();
        assert_eq!(err.kind, SimErrorKind::InvalidArgument);
    }

    #[test]
    fn test_batch_rejects_zero_burst() {
        let mut tasks = valid_tasks();
        tasks[0].burst = 0;
        let err = TaskBatch::from_tasks(tasks).unwrap_err();
        assert_eq!(err.kind, SimErrorKind::InvalidArgument);
    }

    #[test]
    fn test_batch_rejects_priority_out_of_range() {
        let mut tasks = valid_tasks();
        tasks[1].priority = 0;
        assert!(TaskBatch::from_tasks(tasks).is_err());

        let mut tasks = valid_tasks();
        tasks[1].priority = 6;
        assert!(TaskBatch::from_tasks(tasks).is_err());
    }

    #[test]
    fn test_batch_rejects_non_positive_energy() {
        let mut tasks = valid_tasks();
        tasks[0].energy = 0.0;
        assert!(TaskBatch::from_tasks(tasks).is_err());

        let mut tasks = valid_tasks();
        tasks[0].energy = f64::NAN;
        assert!(TaskBatch::from_tasks(tasks).is_err());
    }

    #[test]
    fn test_empty_batch_is_constructible() {
        // Construction succeeds; policies reject it at evaluation time.
        let batch = TaskBatch::from_tasks(Vec::new()).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.mean_burst(), 0.0);
    }

    #[test]
    fn test_arrival_order_breaks_ties_by_id() {
        let batch = TaskBatch::from_tasks(valid_tasks()).unwrap();
        // arrivals: id0=5, id1=0, id2=5 → order id1, id0, id2
        assert_eq!(batch.arrival_order(), vec![1, 0, 2]);
    }
}
