//! Random workload generation.
//!
//! Produces task batches with fields drawn from the distributions the
//! experiments assume: `arrival` uniform in `[0, 10]`, `burst` uniform in
//! `[1, 10]`, `priority` uniform in `[1, 5]`, and
//! `energy = burst * uniform(0.8, 1.5)`.
//!
//! The randomness source is threaded explicitly so trials are reproducible
//! (seed the `Rng` once before the full experiment) and parallel-safe
//! (give each parallel unit its own stream).

use rand::Rng;

use crate::error::{SimError, SimResult};
use crate::models::{Task, TaskBatch};

/// Generates a batch of `n` tasks with ids `0..n-1` in generation order.
///
/// # Errors
/// `InvalidArgument` if `n < 1`.
///
/// # Example
///
/// ```
/// use dispatch_sim::workload::generate_batch;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let batch = generate_batch(10, &mut rng).unwrap();
/// assert_eq!(batch.len(), 10);
/// ```
pub fn generate_batch<R: Rng>(n: usize, rng: &mut R) -> SimResult<TaskBatch> {
    if n < 1 {
        return Err(SimError::invalid_argument(format!(
            "batch size must be >= 1, got {n}"
        )));
    }

    let mut tasks = Vec::with_capacity(n);
    for id in 0..n {
        let arrival: u64 = rng.random_range(0..=10);
        let burst: u64 = rng.random_range(1..=10);
        let priority: u32 = rng.random_range(1..=5);
        let energy = burst as f64 * rng.random_range(0.8..1.5);
        tasks.push(Task::new(id, arrival, burst, priority, energy));
    }

    TaskBatch::from_tasks(tasks)
}
