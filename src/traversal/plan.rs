//! The compiled traversal representation.

use crate::traversal::config::ExecutionConfig;
use crate::traversal::step::{Step, StepKind};

/// A compiled traversal: an ordered, mutable step sequence plus the execution
/// configuration its optimizer passes write into.
///
/// The step sequence is mutable only until the strategy pipeline has run;
/// the `strategies_applied` marker makes re-application a no-op.
#[derive(Clone, Debug)]
pub struct Traversal {
    steps: Vec<Step>,
    config: ExecutionConfig,
    strategies_applied: bool,
}

impl Traversal {
    /// Creates a traversal from a compiled step sequence.
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            config: ExecutionConfig::new(),
            strategies_applied: false,
        }
    }

    /// A traversal rooted at a vertex-program entry step followed by `steps`.
    pub fn vertex_program(steps: Vec<Step>) -> Self {
        let mut all = Vec::with_capacity(steps.len() + 1);
        all.push(Step::vertex_program());
        all.extend(steps);
        Self::new(all)
    }

    /// The compiled step sequence.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Mutable access to the step sequence for optimizer passes.
    pub fn steps_mut(&mut self) -> &mut Vec<Step> {
        &mut self.steps
    }

    /// Position of the first step matching `predicate`.
    pub fn find_step(&self, predicate: impl Fn(&StepKind) -> bool) -> Option<usize> {
        self.steps.iter().position(|s| predicate(s.kind()))
    }

    /// The execution configuration.
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Mutable access to the execution configuration.
    pub fn config_mut(&mut self) -> &mut ExecutionConfig {
        &mut self.config
    }

    /// Whether the strategy pipeline has already processed this traversal.
    pub fn strategies_applied(&self) -> bool {
        self.strategies_applied
    }

    pub(crate) fn mark_strategies_applied(&mut self) {
        self.strategies_applied = true;
    }
}
