//! Wrapped property decorator.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::model::{Element, Property, PropertyValue};
use crate::strategy::context::{StrategyContext, Subject};
use crate::strategy::edge::WrappedEdge;
use crate::strategy::graph::PolicyGraph;
use crate::strategy::vertex::WrappedVertex;
use crate::strategy::WrappedElement;
use crate::types::{Result, UmbraError};

/// A property argument that is either a base property or already wrapped.
///
/// The `Wrapped` variant is the "is-wrapped" marker: wrapper construction
/// rejects it, which makes double wrapping impossible.
pub enum AnyProperty {
    /// A base property handle.
    Base(Property),
    /// An already-wrapped property.
    Wrapped(WrappedProperty),
}

impl From<Property> for AnyProperty {
    fn from(property: Property) -> Self {
        AnyProperty::Base(property)
    }
}

impl From<WrappedProperty> for AnyProperty {
    fn from(property: WrappedProperty) -> Self {
        AnyProperty::Wrapped(property)
    }
}

/// Decorator presenting the base property surface while routing value reads
/// and removal through the owning graph's policy chain.
///
/// Presence checks and the `or_else` family are not interception points and
/// delegate straight to the base property.
#[derive(Clone)]
pub struct WrappedProperty {
    base: Property,
    source: PolicyGraph,
}

impl WrappedProperty {
    /// Wraps a base property for the given decorated graph.
    ///
    /// Fails fast with an invalid-argument error when the property is already
    /// wrapped; no state is stored in that case.
    pub fn wrap(property: impl Into<AnyProperty>, source: &PolicyGraph) -> Result<Self> {
        match property.into() {
            AnyProperty::Base(base) => Ok(Self {
                base,
                source: source.clone(),
            }),
            AnyProperty::Wrapped(wrapped) => Err(UmbraError::InvalidArgument(format!(
                "property '{}' is already policy wrapped and must be a base property",
                wrapped.key()
            ))),
        }
    }

    /// The property key.
    pub fn key(&self) -> &str {
        self.base.key()
    }

    /// Whether the key uses the hidden-key prefix.
    pub fn is_hidden(&self) -> bool {
        self.base.is_hidden()
    }

    /// The effective value after folding the chain's value-read hooks around
    /// the base accessor.
    ///
    /// Without an overriding policy this is the base value, or
    /// [`UmbraError::NoSuchValue`] when absent; check [`Self::is_present`]
    /// first for unconditional reads.
    pub fn value(&self) -> Result<PropertyValue> {
        let ctx = StrategyContext::new(self.source.base_graph(), Subject::Property(self));
        let base = &self.base;
        self.source
            .chain()
            .property_value(&ctx, &mut || base.value())
    }

    /// Whether a base value is present. Not an interception point.
    pub fn is_present(&self) -> bool {
        self.base.is_present()
    }

    /// The base value, or `other` when absent. Not an interception point.
    pub fn or_else(&self, other: PropertyValue) -> PropertyValue {
        self.base.or_else(other)
    }

    /// The base value, or the supplier's result when absent. Not an
    /// interception point.
    pub fn or_else_get(&self, supplier: impl FnOnce() -> PropertyValue) -> PropertyValue {
        self.base.or_else_get(supplier)
    }

    /// The base value, or the supplied error when absent. Not an interception
    /// point.
    pub fn or_else_throw(&self, error: impl FnOnce() -> UmbraError) -> Result<PropertyValue> {
        self.base.or_else_throw(error)
    }

    /// Runs `consumer` with the base value when present. Not an interception
    /// point.
    pub fn if_present(&self, consumer: impl FnOnce(PropertyValue)) {
        self.base.if_present(consumer)
    }

    /// The owning element, wrapped in the variant matching the base element's
    /// tag.
    ///
    /// A fresh wrapper is built on every call; instances are distinct but
    /// compare equal through base identity.
    pub fn element(&self) -> Result<WrappedElement> {
        match self.base.element()? {
            Element::Vertex(vertex) => {
                WrappedVertex::wrap(vertex, &self.source).map(WrappedElement::Vertex)
            }
            Element::Edge(edge) => WrappedEdge::wrap(edge, &self.source).map(WrappedElement::Edge),
        }
    }

    /// Removes the property, folding the chain's removal hooks around the
    /// base removal.
    pub fn remove(&self) -> Result<()> {
        let ctx = StrategyContext::new(self.source.base_graph(), Subject::Property(self));
        let base = &self.base;
        self.source
            .chain()
            .property_remove(&ctx, &mut || base.remove())
    }

    /// The base property handle.
    pub fn base(&self) -> &Property {
        &self.base
    }
}

impl PartialEq for WrappedProperty {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl PartialEq<Property> for WrappedProperty {
    fn eq(&self, other: &Property) -> bool {
        &self.base == other
    }
}

impl Hash for WrappedProperty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
    }
}

impl fmt::Display for WrappedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]",
            self.source.chain().head_name().unwrap_or("policychain"),
            self.base
        )
    }
}

impl fmt::Debug for WrappedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedProperty")
            .field("base", &self.base)
            .field("chain", &self.source.chain().names())
            .finish()
    }
}
