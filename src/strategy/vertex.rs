//! Wrapped vertex decorator.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::model::{Vertex, VertexId};
use crate::strategy::context::{StrategyContext, Subject};
use crate::strategy::graph::PolicyGraph;
use crate::strategy::property::WrappedProperty;
use crate::types::{Result, UmbraError};

/// A vertex argument that is either a base vertex or already wrapped.
pub enum AnyVertex {
    /// A base vertex handle.
    Base(Vertex),
    /// An already-wrapped vertex.
    Wrapped(WrappedVertex),
}

impl From<Vertex> for AnyVertex {
    fn from(vertex: Vertex) -> Self {
        AnyVertex::Base(vertex)
    }
}

impl From<WrappedVertex> for AnyVertex {
    fn from(vertex: WrappedVertex) -> Self {
        AnyVertex::Wrapped(vertex)
    }
}

/// Decorator presenting the base vertex surface; properties obtained through
/// it come back wrapped, and removal routes through the policy chain.
#[derive(Clone)]
pub struct WrappedVertex {
    base: Vertex,
    source: PolicyGraph,
}

impl WrappedVertex {
    /// Wraps a base vertex for the given decorated graph.
    ///
    /// Fails fast when the vertex is already wrapped.
    pub fn wrap(vertex: impl Into<AnyVertex>, source: &PolicyGraph) -> Result<Self> {
        match vertex.into() {
            AnyVertex::Base(base) => Ok(Self {
                base,
                source: source.clone(),
            }),
            AnyVertex::Wrapped(wrapped) => Err(UmbraError::InvalidArgument(format!(
                "vertex {} is already policy wrapped and must be a base vertex",
                wrapped.id()
            ))),
        }
    }

    /// The vertex id.
    pub fn id(&self) -> VertexId {
        self.base.id()
    }

    /// The vertex label.
    pub fn label(&self) -> Result<String> {
        self.base.label()
    }

    /// Returns the property under `key`, wrapped. A fresh wrapper per call.
    pub fn property(&self, key: impl Into<String>) -> Result<WrappedProperty> {
        WrappedProperty::wrap(self.base.property(key), &self.source)
    }

    /// Lists the non-hidden property keys.
    pub fn keys(&self) -> Vec<String> {
        self.base.keys()
    }

    /// Removes this vertex, folding the chain's element-removal hooks around
    /// the base removal.
    pub fn remove(&self) -> Result<()> {
        let ctx = StrategyContext::new(self.source.base_graph(), Subject::Vertex(self));
        let base = &self.base;
        self.source
            .chain()
            .element_remove(&ctx, &mut || base.remove())
    }

    /// The base vertex handle.
    pub fn base(&self) -> &Vertex {
        &self.base
    }
}

impl PartialEq for WrappedVertex {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl Eq for WrappedVertex {}

impl Hash for WrappedVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
    }
}

impl fmt::Display for WrappedVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]",
            self.source.chain().head_name().unwrap_or("policychain"),
            self.base
        )
    }
}

impl fmt::Debug for WrappedVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedVertex")
            .field("base", &self.base)
            .field("chain", &self.source.chain().names())
            .finish()
    }
}
