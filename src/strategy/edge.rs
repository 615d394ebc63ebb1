//! Wrapped edge decorator.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::model::{Edge, EdgeId};
use crate::strategy::context::{StrategyContext, Subject};
use crate::strategy::graph::PolicyGraph;
use crate::strategy::property::WrappedProperty;
use crate::strategy::vertex::WrappedVertex;
use crate::types::{Result, UmbraError};

/// An edge argument that is either a base edge or already wrapped.
pub enum AnyEdge {
    /// A base edge handle.
    Base(Edge),
    /// An already-wrapped edge.
    Wrapped(WrappedEdge),
}

impl From<Edge> for AnyEdge {
    fn from(edge: Edge) -> Self {
        AnyEdge::Base(edge)
    }
}

impl From<WrappedEdge> for AnyEdge {
    fn from(edge: WrappedEdge) -> Self {
        AnyEdge::Wrapped(edge)
    }
}

/// Decorator presenting the base edge surface; properties obtained through it
/// come back wrapped, and removal routes through the policy chain.
#[derive(Clone)]
pub struct WrappedEdge {
    base: Edge,
    source: PolicyGraph,
}

impl WrappedEdge {
    /// Wraps a base edge for the given decorated graph.
    ///
    /// Fails fast when the edge is already wrapped.
    pub fn wrap(edge: impl Into<AnyEdge>, source: &PolicyGraph) -> Result<Self> {
        match edge.into() {
            AnyEdge::Base(base) => Ok(Self {
                base,
                source: source.clone(),
            }),
            AnyEdge::Wrapped(wrapped) => Err(UmbraError::InvalidArgument(format!(
                "edge {} is already policy wrapped and must be a base edge",
                wrapped.id()
            ))),
        }
    }

    /// The edge id.
    pub fn id(&self) -> EdgeId {
        self.base.id()
    }

    /// The edge label.
    pub fn label(&self) -> Result<String> {
        self.base.label()
    }

    /// The source vertex, wrapped.
    pub fn source_vertex(&self) -> Result<WrappedVertex> {
        WrappedVertex::wrap(self.base.source()?, &self.source)
    }

    /// The target vertex, wrapped.
    pub fn target_vertex(&self) -> Result<WrappedVertex> {
        WrappedVertex::wrap(self.base.target()?, &self.source)
    }

    /// Returns the property under `key`, wrapped. A fresh wrapper per call.
    pub fn property(&self, key: impl Into<String>) -> Result<WrappedProperty> {
        WrappedProperty::wrap(self.base.property(key), &self.source)
    }

    /// Lists the non-hidden property keys.
    pub fn keys(&self) -> Vec<String> {
        self.base.keys()
    }

    /// Removes this edge, folding the chain's element-removal hooks around
    /// the base removal.
    pub fn remove(&self) -> Result<()> {
        let ctx = StrategyContext::new(self.source.base_graph(), Subject::Edge(self));
        let base = &self.base;
        self.source
            .chain()
            .element_remove(&ctx, &mut || base.remove())
    }

    /// The base edge handle.
    pub fn base(&self) -> &Edge {
        &self.base
    }
}

impl PartialEq for WrappedEdge {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl Eq for WrappedEdge {}

impl Hash for WrappedEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
    }
}

impl fmt::Display for WrappedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]",
            self.source.chain().head_name().unwrap_or("policychain"),
            self.base
        )
    }
}

impl fmt::Debug for WrappedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedEdge")
            .field("base", &self.base)
            .field("chain", &self.source.chain().names())
            .finish()
    }
}
