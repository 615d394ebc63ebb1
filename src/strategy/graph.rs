//! The decorated graph handle.

use std::sync::Arc;

use crate::model::{EdgeId, Graph, VertexId};
use crate::strategy::chain::PolicyChain;
use crate::strategy::edge::WrappedEdge;
use crate::strategy::policy::GraphPolicy;
use crate::strategy::vertex::WrappedVertex;
use crate::types::Result;

/// A graph decorated with a resolved policy chain.
///
/// Every element obtained through this handle comes back wrapped; the chain
/// is resolved exactly once here, so a precedence cycle surfaces before any
/// operation runs. Clones are cheap and share the same chain.
#[derive(Clone, Debug)]
pub struct PolicyGraph {
    base: Graph,
    chain: Arc<PolicyChain>,
}

impl PolicyGraph {
    /// Decorates `base` with the given policies.
    ///
    /// Fails when the declared precedence constraints contain a cycle or a
    /// duplicate policy name; no partially-resolved chain is ever installed.
    pub fn new(base: Graph, policies: Vec<Arc<dyn GraphPolicy>>) -> Result<Self> {
        let chain = PolicyChain::resolve(policies)?;
        Ok(Self {
            base,
            chain: Arc::new(chain),
        })
    }

    /// Decorates `base` with no policies; every operation falls through.
    pub fn undecorated(base: Graph) -> Self {
        Self {
            base,
            chain: Arc::new(PolicyChain::empty()),
        }
    }

    /// The underlying base graph.
    pub fn base_graph(&self) -> &Graph {
        &self.base
    }

    /// The resolved policy chain.
    pub fn chain(&self) -> &PolicyChain {
        &self.chain
    }

    /// Looks up a vertex and returns it wrapped.
    pub fn vertex(&self, id: VertexId) -> Result<WrappedVertex> {
        WrappedVertex::wrap(self.base.vertex(id)?, self)
    }

    /// Looks up an edge and returns it wrapped.
    pub fn edge(&self, id: EdgeId) -> Result<WrappedEdge> {
        WrappedEdge::wrap(self.base.edge(id)?, self)
    }
}
