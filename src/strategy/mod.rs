#![forbid(unsafe_code)]

//! Strategy interception layer.
//!
//! Cross-cutting policies decorate graph-element operations without modifying
//! the base graph. A [`graph::PolicyGraph`] resolves an ordered
//! [`chain::PolicyChain`] once at construction; every element it hands out is
//! wrapped, and selected operations on wrapped elements fold the chain's hooks
//! around the base operation in middleware style.

/// Per-call interception context.
///
/// Pairs the root graph identity with the wrapped subject being operated on.
pub mod context;

/// The policy contract: named hooks with passthrough defaults plus declared
/// precedence constraints.
pub mod policy;

/// Chain resolution (topological ordering) and the nested hook composer.
pub mod chain;

/// The decorated graph handle.
pub mod graph;

/// Wrapped property decorator.
pub mod property;

/// Wrapped vertex decorator.
pub mod vertex;

/// Wrapped edge decorator.
pub mod edge;

pub use chain::PolicyChain;
pub use context::{StrategyContext, Subject};
pub use edge::{AnyEdge, WrappedEdge};
pub use graph::PolicyGraph;
pub use policy::{Continuation, GraphPolicy};
pub use property::{AnyProperty, WrappedProperty};
pub use vertex::{AnyVertex, WrappedVertex};

use crate::model::ElementKind;

/// Sum of the wrapped element variants produced at the decoration boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WrappedElement {
    /// A wrapped vertex.
    Vertex(WrappedVertex),
    /// A wrapped edge.
    Edge(WrappedEdge),
}

impl WrappedElement {
    /// The underlying element id.
    pub fn id(&self) -> u64 {
        match self {
            WrappedElement::Vertex(v) => v.id(),
            WrappedElement::Edge(e) => e.id(),
        }
    }

    /// The variant tag of the underlying element.
    pub fn kind(&self) -> ElementKind {
        match self {
            WrappedElement::Vertex(_) => ElementKind::Vertex,
            WrappedElement::Edge(_) => ElementKind::Edge,
        }
    }
}
