//! The partition-metadata safety analysis pass.
//!
//! For a traversal rooted at a vertex-program entry step, decide whether the
//! distributed runtime may omit per-record partition-origin metadata. The
//! decision assumes the storage layout co-locates outgoing edges with their
//! source vertex; incoming adjacency, bidirectional adjacency, multi-hop
//! traversals, and materialization of remote identities all force the
//! conservative outcome. Anything the classifier cannot prove safe keeps the
//! partitioner.

use tracing::debug;

use crate::traversal::pipeline::TraversalPass;
use crate::traversal::plan::Traversal;
use crate::traversal::step::{Direction, Step, StepKind};

/// Configuration key the runtime reads when launching a distributed job.
pub const SKIP_PARTITIONER_KEY: &str = "skip-partitioner";

/// Traversal pass that writes the skip-partitioner decision into the
/// traversal's execution configuration.
///
/// A traversal without a vertex-program entry step is not destined for
/// distributed execution and is left untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct PartitionAwareOptimizer;

impl PartitionAwareOptimizer {
    /// Creates the pass.
    pub fn new() -> Self {
        Self
    }
}

impl TraversalPass for PartitionAwareOptimizer {
    fn name(&self) -> &'static str {
        "PartitionAwareOptimizer"
    }

    fn apply(&self, traversal: &mut Traversal) {
        let Some(entry) = traversal.find_step(|kind| matches!(kind, StepKind::VertexProgram))
        else {
            return;
        };
        let skip = skip_partitioner(&traversal.steps()[entry + 1..]);
        debug!(skip, "partition-aware classification");
        traversal.config_mut().set_bool(SKIP_PARTITIONER_KEY, skip);
    }
}

/// Safety category of a single step kind.
///
/// The mapping in [`classify`] is exhaustive on purpose: a new step kind does
/// not compile until it receives an explicit classification here.
enum StepClass<'a> {
    /// Terminal aggregation collapsing records into a bare count.
    Aggregate,
    /// Aggregation keyed on record identity, optionally through a
    /// sub-traversal that must itself be safe.
    KeyedAggregate { nested: Option<&'a [Step]> },
    /// Bounds the number of records without moving them.
    Bound,
    /// Reads a property value of the local element.
    LocalValue,
    /// Evaluates a sub-traversal against each element's locally-stored
    /// neighborhood.
    LocalScope(&'a [Step]),
    /// Moves across an adjacency.
    Adjacency {
        direction: Direction,
        target: AdjacencyTarget,
    },
    /// Materializes the identity of the current element.
    Materialize,
    /// A nested distributed entry step; never expected mid-sequence.
    Entry,
}

enum AdjacencyTarget {
    Vertex,
    Edge,
    EdgeVertex,
}

fn classify(kind: &StepKind) -> StepClass<'_> {
    match kind {
        StepKind::VertexProgram => StepClass::Entry,
        StepKind::Count => StepClass::Aggregate,
        StepKind::GroupCount { by } => StepClass::KeyedAggregate {
            nested: by.as_deref(),
        },
        StepKind::Limit(_) => StepClass::Bound,
        StepKind::PropertyValues(_) => StepClass::LocalValue,
        StepKind::Local(sub) => StepClass::LocalScope(sub),
        StepKind::VertexStep(direction) => StepClass::Adjacency {
            direction: *direction,
            target: AdjacencyTarget::Vertex,
        },
        StepKind::EdgeStep(direction) => StepClass::Adjacency {
            direction: *direction,
            target: AdjacencyTarget::Edge,
        },
        StepKind::EdgeVertexStep(direction) => StepClass::Adjacency {
            direction: *direction,
            target: AdjacencyTarget::EdgeVertex,
        },
        StepKind::Id => StepClass::Materialize,
    }
}

/// Where the traversal's records currently live relative to the partition
/// that produced them.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Frontier {
    /// Still the partition-local source vertices.
    Origin,
    /// Edges stored alongside their source vertex.
    LocalEdge,
    /// Property values read from the local vertex.
    LocalValue,
    /// A reference to an adjacent entity: existence is known locally, the
    /// entity itself is not.
    AdjacentRef,
    /// Collapsed by a terminal aggregation.
    Aggregated,
}

/// Folds the classification table over a step sequence.
///
/// Returns true only when every transition stays provably partition-local and
/// the sequence ends in a state that needs no cross-partition resolution.
/// Unknown or unproven shapes resolve to false.
fn skip_partitioner(steps: &[Step]) -> bool {
    use Frontier::*;

    let mut frontier = Origin;
    for step in steps {
        frontier = match (classify(step.kind()), frontier) {
            // A bare count needs only local existence, wherever the frontier
            // stands.
            (StepClass::Aggregate, _) => Aggregated,
            // A keyed aggregation groups on record identity: fine for local
            // records, but identities reached through a hop need
            // partition-correct resolution. A keying sub-traversal must be
            // safe in its own right.
            (StepClass::KeyedAggregate { nested }, frontier) => {
                if let Some(sub) = nested {
                    if !skip_partitioner(sub) {
                        return false;
                    }
                }
                if frontier == AdjacentRef {
                    return false;
                }
                Aggregated
            }
            // Bounding is harmless while records are still the local vertices.
            (StepClass::Bound, Origin) => Origin,
            (StepClass::Bound, _) => return false,
            // Property reads stay local on the origin vertex only.
            (StepClass::LocalValue, Origin) => LocalValue,
            (StepClass::LocalValue, _) => return false,
            // A local scope over pure adjacency reads the vertex's own edge
            // list, regardless of direction: incoming edges of the star
            // neighborhood are stored with the vertex.
            (StepClass::LocalScope(sub), Origin) if is_pure_adjacency(sub) => LocalEdge,
            (StepClass::LocalScope(_), _) => return false,
            // Global in- or both-direction adjacency always needs partition
            // resolution; later aggregation cannot repair it. Endpoint
            // resolution on an edge (inV/outV) is judged separately below.
            (
                StepClass::Adjacency {
                    direction: Direction::In | Direction::Both,
                    target: AdjacencyTarget::Vertex | AdjacencyTarget::Edge,
                },
                _,
            ) => return false,
            // One outgoing hop: the adjacent vertex is referenced, not owned.
            (
                StepClass::Adjacency {
                    direction: Direction::Out,
                    target: AdjacencyTarget::Vertex,
                },
                Origin,
            ) => AdjacentRef,
            // Outgoing edges are co-located with the source vertex.
            (
                StepClass::Adjacency {
                    direction: Direction::Out,
                    target: AdjacencyTarget::Edge,
                },
                Origin,
            ) => LocalEdge,
            // Either endpoint of a locally-stored edge is a mere reference.
            (
                StepClass::Adjacency {
                    direction: Direction::Out | Direction::In,
                    target: AdjacencyTarget::EdgeVertex,
                },
                LocalEdge,
            ) => AdjacentRef,
            // Any other adjacency shape is a second hop or otherwise unproven.
            (StepClass::Adjacency { .. }, _) => return false,
            // Identity of a local vertex is local; identity of anything
            // reached by a hop needs partition-correct resolution.
            (StepClass::Materialize, Origin) => Origin,
            (StepClass::Materialize, _) => return false,
            (StepClass::Entry, _) => return false,
        };
    }

    matches!(frontier, Origin | LocalEdge | Aggregated)
}

/// Whether a sub-traversal consists solely of adjacency steps.
fn is_pure_adjacency(steps: &[Step]) -> bool {
    !steps.is_empty()
        && steps
            .iter()
            .all(|s| matches!(classify(s.kind()), StepClass::Adjacency { .. }))
}
