//! Single-core CPU dispatch policy simulator.
//!
//! Compares four dispatch policies — FCFS, Round-Robin, Priority, and an
//! energy-aware variant — over randomly generated task workloads, reporting
//! mean waiting time, mean turnaround time, throughput, and energy use per
//! policy as workload size scales.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `TaskBatch`, `Metrics`
//! - **`workload`**: Random batch generation from an explicit `Rng`
//! - **`policies`**: The four dispatch policies behind [`SchedulingPolicy`]
//! - **`runner`**: Trial repetition and metric aggregation per workload size
//! - **`error`**: `SimError` for invalid arguments and empty batches
//!
//! # Architecture
//!
//! The crate is a pure simulation engine: policies consume an immutable
//! [`TaskBatch`] and produce [`Metrics`]; the [`runner`] averages metrics
//! over independent trials. Presentation (console tables, charts) belongs
//! to the host program, which consumes the runner's `ExperimentReport`.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod error;
pub mod models;
pub mod policies;
pub mod runner;
pub mod workload;

pub use error::{SimError, SimErrorKind, SimResult};
pub use models::{Metrics, Task, TaskBatch};
pub use policies::{EnergyAware, Fcfs, Priority, RoundRobin, SchedulingPolicy};
pub use runner::{ExperimentConfig, ExperimentRecord, ExperimentReport, ExperimentRunner};
pub use workload::generate_batch;
