//! Domain models for the dispatch simulation.
//!
//! - [`Task`]: one schedulable unit, immutable once generated
//! - [`TaskBatch`]: a fixed-size, dense-id collection of tasks
//! - [`Metrics`]: the four performance figures a policy reports

mod metrics;
mod task;

pub use metrics::Metrics;
pub use task::{Task, TaskBatch};
