//! The ordered pass registry applied once per traversal.

use std::sync::Arc;

use tracing::trace;

use crate::traversal::plan::Traversal;

/// A pure transformation over a compiled traversal.
///
/// Passes may mutate steps or attach metadata but must never remove a step
/// required for correctness: the pipeline performs optimization and
/// annotation, not semantic rewriting.
pub trait TraversalPass: Send + Sync {
    /// Name of the pass, for diagnostics.
    fn name(&self) -> &'static str;

    /// Applies the pass to a traversal.
    fn apply(&self, traversal: &mut Traversal);
}

/// Ordered registry of traversal passes.
///
/// Immutable once built; safe to share across many traversal executions.
#[derive(Clone, Default)]
pub struct StrategyPipeline {
    passes: Vec<Arc<dyn TraversalPass>>,
}

impl StrategyPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline with the passes registered for distributed execution.
    pub fn distributed_defaults() -> Self {
        Self::new().with_pass(Arc::new(
            crate::traversal::partition::PartitionAwareOptimizer::new(),
        ))
    }

    /// Appends a pass, returning the pipeline for chaining.
    pub fn with_pass(mut self, pass: Arc<dyn TraversalPass>) -> Self {
        self.passes.push(pass);
        self
    }

    /// Names of the registered passes, in application order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Whether a pass with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.passes.iter().any(|p| p.name() == name)
    }

    /// Runs every registered pass exactly once over `traversal`.
    ///
    /// A traversal that has already been processed is left untouched.
    pub fn apply(&self, traversal: &mut Traversal) {
        if traversal.strategies_applied() {
            trace!("strategies already applied, skipping");
            return;
        }
        for pass in &self.passes {
            trace!(pass = pass.name(), "applying traversal pass");
            pass.apply(traversal);
        }
        traversal.mark_strategies_applied();
    }
}
