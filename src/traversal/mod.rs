#![forbid(unsafe_code)]

//! Compiled traversals and the pre-execution strategy pipeline.
//!
//! A traversal is an ordered step sequence destined for execution. Before a
//! distributed job launches, [`pipeline::StrategyPipeline`] runs every
//! registered pass exactly once over the traversal; the partition-aware pass
//! records its safety decision in the traversal's execution configuration.

/// Execution configuration attached to a traversal's plan.
pub mod config;

/// The ordered pass registry applied once per traversal.
pub mod pipeline;

/// The partition-metadata safety analysis pass.
pub mod partition;

/// The compiled traversal representation.
pub mod plan;

/// Step vocabulary for compiled traversals.
pub mod step;

pub use config::{ConfigValue, ExecutionConfig};
pub use partition::{PartitionAwareOptimizer, SKIP_PARTITIONER_KEY};
pub use pipeline::{StrategyPipeline, TraversalPass};
pub use plan::Traversal;
pub use step::{Direction, Step, StepKind};
