#![forbid(unsafe_code)]

//! In-memory base graph model.
//!
//! This is the collaborator surface the strategy layer decorates: vertices,
//! edges, and properties with key/value access, presence checks,
//! owning-element navigation, and removal. Element types are cheap handles
//! into a shared graph core; the graph owns all element data.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::types::{Result, UmbraError};

/// Vertex identifier.
pub type VertexId = u64;
/// Edge identifier.
pub type EdgeId = u64;

/// Prefix marking a property key as hidden from ordinary key listings.
pub const HIDDEN_KEY_PREFIX: &str = "%&%";

/// Property value supported by the base graph.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{v}"),
            PropertyValue::Int(v) => write!(f, "{v}"),
            PropertyValue::Float(v) => write!(f, "{v}"),
            PropertyValue::String(v) => write!(f, "{v}"),
            PropertyValue::Bytes(v) => write!(f, "{} bytes", v.len()),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_owned())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

#[derive(Debug)]
struct VertexData {
    label: String,
    properties: BTreeMap<String, PropertyValue>,
}

#[derive(Debug)]
struct EdgeData {
    label: String,
    source: VertexId,
    target: VertexId,
    properties: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Default)]
struct GraphCore {
    vertices: FxHashMap<VertexId, VertexData>,
    edges: FxHashMap<EdgeId, EdgeData>,
    next_id: u64,
}

impl GraphCore {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn properties_of(&self, kind: ElementKind, id: u64) -> Option<&BTreeMap<String, PropertyValue>> {
        match kind {
            ElementKind::Vertex => self.vertices.get(&id).map(|v| &v.properties),
            ElementKind::Edge => self.edges.get(&id).map(|e| &e.properties),
        }
    }

    fn properties_of_mut(
        &mut self,
        kind: ElementKind,
        id: u64,
    ) -> Option<&mut BTreeMap<String, PropertyValue>> {
        match kind {
            ElementKind::Vertex => self.vertices.get_mut(&id).map(|v| &mut v.properties),
            ElementKind::Edge => self.edges.get_mut(&id).map(|e| &mut e.properties),
        }
    }
}

/// Shared handle to an in-memory graph.
///
/// Clones are cheap and refer to the same underlying core.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    core: Arc<RwLock<GraphCore>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when both handles refer to the same underlying graph.
    pub fn same_graph(&self, other: &Graph) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }

    /// Adds a vertex with the given label and returns its handle.
    pub fn add_vertex(&self, label: impl Into<String>) -> Vertex {
        let mut core = self.core.write();
        let id = core.allocate_id();
        core.vertices.insert(
            id,
            VertexData {
                label: label.into(),
                properties: BTreeMap::new(),
            },
        );
        Vertex {
            graph: self.clone(),
            id,
        }
    }

    /// Adds an edge between two vertices and returns its handle.
    pub fn add_edge(&self, label: impl Into<String>, source: &Vertex, target: &Vertex) -> Edge {
        let mut core = self.core.write();
        let id = core.allocate_id();
        core.edges.insert(
            id,
            EdgeData {
                label: label.into(),
                source: source.id,
                target: target.id,
                properties: BTreeMap::new(),
            },
        );
        Edge {
            graph: self.clone(),
            id,
        }
    }

    /// Looks up a vertex handle by id.
    pub fn vertex(&self, id: VertexId) -> Result<Vertex> {
        let core = self.core.read();
        if core.vertices.contains_key(&id) {
            Ok(Vertex {
                graph: self.clone(),
                id,
            })
        } else {
            Err(UmbraError::NotFound("vertex"))
        }
    }

    /// Looks up an edge handle by id.
    pub fn edge(&self, id: EdgeId) -> Result<Edge> {
        let core = self.core.read();
        if core.edges.contains_key(&id) {
            Ok(Edge {
                graph: self.clone(),
                id,
            })
        } else {
            Err(UmbraError::NotFound("edge"))
        }
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.core.read().vertices.len()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.core.read().edges.len()
    }
}

/// Variant tag distinguishing vertex-like from edge-like elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A vertex.
    Vertex,
    /// An edge.
    Edge,
}

/// Handle to a vertex owned by a [`Graph`].
#[derive(Clone, Debug)]
pub struct Vertex {
    graph: Graph,
    id: VertexId,
}

impl Vertex {
    /// The vertex id.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// The owning graph handle.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The vertex label.
    pub fn label(&self) -> Result<String> {
        let core = self.graph.core.read();
        core.vertices
            .get(&self.id)
            .map(|v| v.label.clone())
            .ok_or(UmbraError::NotFound("vertex"))
    }

    /// Sets a property, replacing any previous value under the same key.
    pub fn set_property(&self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Result<()> {
        set_property(&self.graph, ElementKind::Vertex, self.id, key.into(), value.into())
    }

    /// Returns a property handle for `key`. The handle may be absent.
    pub fn property(&self, key: impl Into<String>) -> Property {
        Property {
            graph: self.graph.clone(),
            owner_kind: ElementKind::Vertex,
            owner_id: self.id,
            key: key.into(),
        }
    }

    /// Lists the non-hidden property keys of this vertex.
    pub fn keys(&self) -> Vec<String> {
        keys_of(&self.graph, ElementKind::Vertex, self.id)
    }

    /// Removes this vertex from the graph.
    pub fn remove(&self) -> Result<()> {
        let mut core = self.graph.core.write();
        core.vertices
            .remove(&self.id)
            .map(|_| ())
            .ok_or(UmbraError::NotFound("vertex"))
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.graph.same_graph(&other.graph)
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v[{}]", self.id)
    }
}

/// Handle to an edge owned by a [`Graph`].
#[derive(Clone, Debug)]
pub struct Edge {
    graph: Graph,
    id: EdgeId,
}

impl Edge {
    /// The edge id.
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// The owning graph handle.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The edge label.
    pub fn label(&self) -> Result<String> {
        let core = self.graph.core.read();
        core.edges
            .get(&self.id)
            .map(|e| e.label.clone())
            .ok_or(UmbraError::NotFound("edge"))
    }

    /// The source vertex of this edge.
    pub fn source(&self) -> Result<Vertex> {
        let source = {
            let core = self.graph.core.read();
            core.edges
                .get(&self.id)
                .map(|e| e.source)
                .ok_or(UmbraError::NotFound("edge"))?
        };
        self.graph.vertex(source)
    }

    /// The target vertex of this edge.
    pub fn target(&self) -> Result<Vertex> {
        let target = {
            let core = self.graph.core.read();
            core.edges
                .get(&self.id)
                .map(|e| e.target)
                .ok_or(UmbraError::NotFound("edge"))?
        };
        self.graph.vertex(target)
    }

    /// Sets a property, replacing any previous value under the same key.
    pub fn set_property(&self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Result<()> {
        set_property(&self.graph, ElementKind::Edge, self.id, key.into(), value.into())
    }

    /// Returns a property handle for `key`. The handle may be absent.
    pub fn property(&self, key: impl Into<String>) -> Property {
        Property {
            graph: self.graph.clone(),
            owner_kind: ElementKind::Edge,
            owner_id: self.id,
            key: key.into(),
        }
    }

    /// Lists the non-hidden property keys of this edge.
    pub fn keys(&self) -> Vec<String> {
        keys_of(&self.graph, ElementKind::Edge, self.id)
    }

    /// Removes this edge from the graph.
    pub fn remove(&self) -> Result<()> {
        let mut core = self.graph.core.write();
        core.edges
            .remove(&self.id)
            .map(|_| ())
            .ok_or(UmbraError::NotFound("edge"))
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.graph.same_graph(&other.graph)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e[{}]", self.id)
    }
}

/// Sum of the two element variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    /// A vertex element.
    Vertex(Vertex),
    /// An edge element.
    Edge(Edge),
}

impl Element {
    /// The element id.
    pub fn id(&self) -> u64 {
        match self {
            Element::Vertex(v) => v.id(),
            Element::Edge(e) => e.id(),
        }
    }

    /// The variant tag of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Vertex(_) => ElementKind::Vertex,
            Element::Edge(_) => ElementKind::Edge,
        }
    }
}

/// Handle to one property slot of an element.
///
/// The handle itself is always constructible; whether a value is present is
/// answered by [`Property::is_present`]. Reading the value of an absent
/// property is an error.
#[derive(Clone, Debug)]
pub struct Property {
    graph: Graph,
    owner_kind: ElementKind,
    owner_id: u64,
    key: String,
}

impl Property {
    /// The property key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the key uses the hidden-key prefix.
    pub fn is_hidden(&self) -> bool {
        self.key.starts_with(HIDDEN_KEY_PREFIX)
    }

    /// The current value, or [`UmbraError::NoSuchValue`] when absent.
    pub fn value(&self) -> Result<PropertyValue> {
        self.raw()
            .ok_or_else(|| UmbraError::NoSuchValue(self.key.clone()))
    }

    /// Whether a value is currently present under this key.
    pub fn is_present(&self) -> bool {
        self.raw().is_some()
    }

    /// The current value, or `other` when absent.
    pub fn or_else(&self, other: PropertyValue) -> PropertyValue {
        self.raw().unwrap_or(other)
    }

    /// The current value, or the supplier's result when absent.
    pub fn or_else_get(&self, supplier: impl FnOnce() -> PropertyValue) -> PropertyValue {
        self.raw().unwrap_or_else(supplier)
    }

    /// The current value, or the supplied error when absent.
    pub fn or_else_throw(&self, error: impl FnOnce() -> UmbraError) -> Result<PropertyValue> {
        self.raw().ok_or_else(error)
    }

    /// Runs `consumer` with the value when present.
    pub fn if_present(&self, consumer: impl FnOnce(PropertyValue)) {
        if let Some(value) = self.raw() {
            consumer(value);
        }
    }

    /// The element owning this property slot.
    pub fn element(&self) -> Result<Element> {
        match self.owner_kind {
            ElementKind::Vertex => self.graph.vertex(self.owner_id).map(Element::Vertex),
            ElementKind::Edge => self.graph.edge(self.owner_id).map(Element::Edge),
        }
    }

    /// Removes the value under this key. Removing an absent property is a
    /// no-op, matching map semantics.
    pub fn remove(&self) -> Result<()> {
        let mut core = self.graph.core.write();
        let properties = core
            .properties_of_mut(self.owner_kind, self.owner_id)
            .ok_or(UmbraError::NotFound("element"))?;
        properties.remove(&self.key);
        Ok(())
    }

    fn raw(&self) -> Option<PropertyValue> {
        let core = self.graph.core.read();
        core.properties_of(self.owner_kind, self.owner_id)
            .and_then(|props| props.get(&self.key))
            .cloned()
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.owner_kind == other.owner_kind
            && self.owner_id == other.owner_id
            && self.key == other.key
            && self.graph.same_graph(&other.graph)
    }
}

impl Hash for Property {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner_kind.hash(state);
        self.owner_id.hash(state);
        self.key.hash(state);
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.raw() {
            Some(value) => write!(f, "p[{}->{}]", self.key, value),
            None => write!(f, "p[{}]", self.key),
        }
    }
}

fn set_property(
    graph: &Graph,
    kind: ElementKind,
    id: u64,
    key: String,
    value: PropertyValue,
) -> Result<()> {
    let mut core = graph.core.write();
    let properties = core
        .properties_of_mut(kind, id)
        .ok_or(UmbraError::NotFound("element"))?;
    properties.insert(key, value);
    Ok(())
}

fn keys_of(graph: &Graph, kind: ElementKind, id: u64) -> Vec<String> {
    let core = graph.core.read();
    core.properties_of(kind, id)
        .map(|props| {
            props
                .keys()
                .filter(|k| !k.starts_with(HIDDEN_KEY_PREFIX))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}
