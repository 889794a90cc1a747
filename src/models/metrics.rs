//! Policy performance metrics.
//!
//! One [`Metrics`] value summarizes a single policy invocation over a
//! single batch. The experiment runner averages them across trials.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting mean | mean(completion − arrival − burst) |
//! | Turnaround mean | mean(completion − arrival) |
//! | Throughput | n / finish time |
//! | Total energy | Σ per-task energy (policy may discount) |

use serde::{Deserialize, Serialize};

/// Aggregate performance figures for one (policy, batch) evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean time tasks spent ready but not executing.
    pub waiting_mean: f64,
    /// Mean time from arrival to completion.
    pub turnaround_mean: f64,
    /// Completed tasks per unit of simulated time.
    pub throughput: f64,
    /// Total energy charged for the batch.
    pub total_energy: f64,
}

impl Metrics {
    /// Derives metrics from per-task completion times.
    ///
    /// `completions[id]` is the simulated clock at which task `id`
    /// finished; `final_clock` is the clock when the policy stopped
    /// (it may trail the last completion by a context-switch cost).
    pub(crate) fn from_completions(
        tasks: &[crate::models::Task],
        completions: &[f64],
        final_clock: f64,
        total_energy: f64,
    ) -> Self {
        let n = tasks.len() as f64;
        let mut waiting = 0.0;
        let mut turnaround = 0.0;
        for task in tasks {
            let done = completions[task.id];
            turnaround += done - task.arrival as f64;
            waiting += done - task.arrival as f64 - task.burst as f64;
        }
        Self {
            waiting_mean: waiting / n,
            turnaround_mean: turnaround / n,
            throughput: n / final_clock,
            total_energy,
        }
    }

    /// Arithmetic mean of each field across trials.
    ///
    /// Returns `None` for an empty slice.
    pub fn mean_of(samples: &[Metrics]) -> Option<Metrics> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        Some(Metrics {
            waiting_mean: samples.iter().map(|m| m.waiting_mean).sum::<f64>() / n,
            turnaround_mean: samples.iter().map(|m| m.turnaround_mean).sum::<f64>() / n,
            throughput: samples.iter().map(|m| m.throughput).sum::<f64>() / n,
            total_energy: samples.iter().map(|m| m.total_energy).sum::<f64>() / n,
        })
    }
}
