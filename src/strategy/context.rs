//! Per-call interception context.

use crate::model::Graph;
use crate::strategy::edge::WrappedEdge;
use crate::strategy::property::WrappedProperty;
use crate::strategy::vertex::WrappedVertex;

/// The wrapped subject currently being operated on.
#[derive(Clone, Copy)]
pub enum Subject<'a> {
    /// A property operation.
    Property(&'a WrappedProperty),
    /// A vertex operation.
    Vertex(&'a WrappedVertex),
    /// An edge operation.
    Edge(&'a WrappedEdge),
}

impl Subject<'_> {
    /// Short label for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Subject::Property(_) => "property",
            Subject::Vertex(_) => "vertex",
            Subject::Edge(_) => "edge",
        }
    }
}

/// Immutable per-call value handed to every policy hook.
///
/// Built fresh for each intercepted call and never persisted beyond it.
#[derive(Clone, Copy)]
pub struct StrategyContext<'a> {
    graph: &'a Graph,
    subject: Subject<'a>,
}

impl<'a> StrategyContext<'a> {
    /// Creates a context for one intercepted call.
    pub fn new(graph: &'a Graph, subject: Subject<'a>) -> Self {
        Self { graph, subject }
    }

    /// The root base graph.
    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// The wrapped subject of the call.
    pub fn subject(&self) -> Subject<'a> {
        self.subject
    }
}
