//! Experiment orchestration.
//!
//! For every workload size and every registered policy, runs a number of
//! independent trials — each trial generates a fresh batch and evaluates
//! exactly one policy on it — and averages the four metrics across trials.
//! Records are emitted in (size order, policy-registration order) for the
//! host's reporting layer to format or chart.
//!
//! Reproducibility: seed the `Rng` once before the full experiment. A
//! failed trial aborts the whole run; there are no partial results.

use std::sync::Arc;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::models::Metrics;
use crate::policies::{EnergyAware, Fcfs, Priority, RoundRobin, SchedulingPolicy};
use crate::workload::generate_batch;

/// Experiment parameters.
///
/// # Example
///
/// ```
/// use dispatch_sim::runner::ExperimentConfig;
///
/// let config = ExperimentConfig::default()
///     .with_workload_sizes(vec![5, 20])
///     .with_trials(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Batch sizes to sweep, in output order.
    pub workload_sizes: Vec<usize>,
    /// Independent trials per (size, policy) pair.
    pub trials: usize,
    /// Round-robin quantum.
    pub quantum: u64,
    /// Round-robin per-dispatch context-switch cost.
    pub context_switch: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            workload_sizes: vec![10, 30, 50, 100],
            trials: 10,
            quantum: crate::policies::DEFAULT_QUANTUM,
            context_switch: 0.0,
        }
    }
}

impl ExperimentConfig {
    /// Sets the workload sizes.
    pub fn with_workload_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.workload_sizes = sizes;
        self
    }

    /// Sets the trial count.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, quantum: u64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Sets the round-robin context-switch cost.
    pub fn with_context_switch(mut self, context_switch: f64) -> Self {
        self.context_switch = context_switch;
        self
    }

    /// Checks all parameters.
    ///
    /// # Errors
    /// `InvalidArgument` if there are no workload sizes, any size is zero,
    /// `trials < 1`, `quantum < 1`, or the context-switch cost is negative
    /// or non-finite.
    pub fn validate(&self) -> SimResult<()> {
        if self.workload_sizes.is_empty() {
            return Err(SimError::invalid_argument(
                "at least one workload size is required",
            ));
        }
        if let Some(&size) = self.workload_sizes.iter().find(|&&s| s < 1) {
            return Err(SimError::invalid_argument(format!(
                "workload sizes must be >= 1, got {size}"
            )));
        }
        if self.trials < 1 {
            return Err(SimError::invalid_argument(format!(
                "trial count must be >= 1, got {}",
                self.trials
            )));
        }
        // Delegates quantum / context-switch checks.
        RoundRobin::new(self.quantum, self.context_switch).map(|_| ())
    }
}

/// One aggregated result: a (size, policy) pair averaged over trials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentRecord {
    /// Workload size the record was measured at.
    pub size: usize,
    /// Policy name, as reported by [`SchedulingPolicy::name`].
    pub policy: String,
    /// Trials averaged into `metrics`.
    pub trials: usize,
    /// Trial-averaged metrics.
    pub metrics: Metrics,
}

/// Ordered collection of aggregated results.
///
/// Records appear in input size order, then policy-registration order —
/// the order the reporting layer should present them in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperimentReport {
    records: Vec<ExperimentRecord>,
}

impl ExperimentReport {
    /// All records, in emission order.
    pub fn records(&self) -> &[ExperimentRecord] {
        &self.records
    }

    /// Records for one policy, across all sizes.
    pub fn for_policy<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ExperimentRecord> {
        self.records.iter().filter(move |r| r.policy == name)
    }
}

/// Runs trials for a set of registered policies.
///
/// Policies are evaluated in registration order for every workload size.
///
/// # Example
///
/// ```
/// use dispatch_sim::runner::{ExperimentConfig, ExperimentRunner};
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let runner = ExperimentRunner::standard(4, 0.0).unwrap();
/// let config = ExperimentConfig::default()
///     .with_workload_sizes(vec![10])
///     .with_trials(2);
/// let mut rng = SmallRng::seed_from_u64(42);
/// let report = runner.run(&config, &mut rng).unwrap();
/// assert_eq!(report.records().len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExperimentRunner {
    policies: Vec<Arc<dyn SchedulingPolicy>>,
}

impl ExperimentRunner {
    /// Creates a runner with no registered policies.
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    /// Registers a policy. Registration order is emission order.
    pub fn with_policy<P: SchedulingPolicy + 'static>(mut self, policy: P) -> Self {
        self.policies.push(Arc::new(policy));
        self
    }

    /// Creates a runner with the four standard policies registered in
    /// canonical order: FCFS, RoundRobin, Priority, EnergyAware.
    ///
    /// # Errors
    /// `InvalidArgument` for a bad quantum or context-switch cost.
    pub fn standard(quantum: u64, context_switch: f64) -> SimResult<Self> {
        Ok(Self::new()
            .with_policy(Fcfs)
            .with_policy(RoundRobin::new(quantum, context_switch)?)
            .with_policy(Priority)
            .with_policy(EnergyAware))
    }

    /// Registered policy names, in registration order.
    pub fn policy_names(&self) -> Vec<&'static str> {
        self.policies.iter().map(|p| p.name()).collect()
    }

    /// Runs the full experiment.
    ///
    /// Every trial draws a fresh batch from `rng` and evaluates exactly one
    /// policy on it. Metrics are averaged arithmetically over trials.
    ///
    /// # Errors
    /// `InvalidArgument` for a bad config or an empty policy set; any
    /// failing trial aborts the run and propagates its error.
    pub fn run<R: Rng>(&self, config: &ExperimentConfig, rng: &mut R) -> SimResult<ExperimentReport> {
        config.validate()?;
        if self.policies.is_empty() {
            return Err(SimError::invalid_argument(
                "at least one policy must be registered",
            ));
        }

        let mut records =
            Vec::with_capacity(config.workload_sizes.len() * self.policies.len());

        for &size in &config.workload_sizes {
            for policy in &self.policies {
                let mut samples = Vec::with_capacity(config.trials);
                for trial in 0..config.trials {
                    let batch = generate_batch(size, rng)?;
                    let metrics = policy.evaluate(&batch)?;
                    debug!(
                        "size={size} policy={} trial={trial} waiting={:.3} turnaround={:.3}",
                        policy.name(),
                        metrics.waiting_mean,
                        metrics.turnaround_mean
                    );
                    samples.push(metrics);
                }
                // validate() guarantees trials >= 1, so the mean exists.
                let metrics = Metrics::mean_of(&samples).ok_or_else(|| {
                    SimError::invalid_argument("trial count must be >= 1, got 0")
                })?;
                records.push(ExperimentRecord {
                    size,
                    policy: policy.name().to_string(),
                    trials: config.trials,
                    metrics,
                });
            }
        }

        Ok(ExperimentReport { records })
    }
}
