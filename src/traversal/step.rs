//! Step vocabulary for compiled traversals.

/// Direction of an adjacency traversal relative to the current element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow outgoing edges.
    Out,
    /// Follow incoming edges.
    In,
    /// Follow edges in both directions.
    Both,
}

/// Kind tag of a compiled step.
///
/// The vocabulary is open-ended in principle; the partition analysis
/// classifies every kind explicitly and treats anything it cannot prove safe
/// conservatively.
#[derive(Clone, Debug, PartialEq)]
pub enum StepKind {
    /// Entry step rooting a distributed vertex-program execution.
    VertexProgram,
    /// Terminal aggregation collapsing records into a count.
    Count,
    /// Bounds the number of records.
    Limit(u64),
    /// Reads the named property value of the current element.
    PropertyValues(String),
    /// Aggregates records into per-key counts, optionally keyed by a
    /// sub-traversal.
    GroupCount {
        /// Optional keying sub-traversal (`by(...)` modulator).
        by: Option<Vec<Step>>,
    },
    /// Moves to adjacent vertices.
    VertexStep(Direction),
    /// Moves to incident edges.
    EdgeStep(Direction),
    /// Moves from an edge to one of its endpoint vertices.
    EdgeVertexStep(Direction),
    /// Evaluates a sub-traversal locally per incoming record.
    Local(Vec<Step>),
    /// Materializes the identity of the current element.
    Id,
}

/// A node in a compiled traversal.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    kind: StepKind,
}

impl Step {
    /// Creates a step of the given kind.
    pub fn new(kind: StepKind) -> Self {
        Self { kind }
    }

    /// The step's kind tag.
    pub fn kind(&self) -> &StepKind {
        &self.kind
    }

    /// Entry step for distributed execution.
    pub fn vertex_program() -> Self {
        Self::new(StepKind::VertexProgram)
    }

    /// `count()`
    pub fn count() -> Self {
        Self::new(StepKind::Count)
    }

    /// `limit(n)`
    pub fn limit(n: u64) -> Self {
        Self::new(StepKind::Limit(n))
    }

    /// `values(key)`
    pub fn values(key: impl Into<String>) -> Self {
        Self::new(StepKind::PropertyValues(key.into()))
    }

    /// `groupCount()`
    pub fn group_count() -> Self {
        Self::new(StepKind::GroupCount { by: None })
    }

    /// `groupCount().by(sub)`
    pub fn group_count_by(by: Vec<Step>) -> Self {
        Self::new(StepKind::GroupCount { by: Some(by) })
    }

    /// `out()`
    pub fn out() -> Self {
        Self::new(StepKind::VertexStep(Direction::Out))
    }

    /// `in()`
    pub fn in_vertices() -> Self {
        Self::new(StepKind::VertexStep(Direction::In))
    }

    /// `both()`
    pub fn both() -> Self {
        Self::new(StepKind::VertexStep(Direction::Both))
    }

    /// `outE()`
    pub fn out_edges() -> Self {
        Self::new(StepKind::EdgeStep(Direction::Out))
    }

    /// `inE()`
    pub fn in_edges() -> Self {
        Self::new(StepKind::EdgeStep(Direction::In))
    }

    /// `bothE()`
    pub fn both_edges() -> Self {
        Self::new(StepKind::EdgeStep(Direction::Both))
    }

    /// `inV()`
    pub fn in_vertex() -> Self {
        Self::new(StepKind::EdgeVertexStep(Direction::In))
    }

    /// `outV()`
    pub fn out_vertex() -> Self {
        Self::new(StepKind::EdgeVertexStep(Direction::Out))
    }

    /// `local(sub)`
    pub fn local(sub: Vec<Step>) -> Self {
        Self::new(StepKind::Local(sub))
    }

    /// `id()`
    pub fn id() -> Self {
        Self::new(StepKind::Id)
    }
}
