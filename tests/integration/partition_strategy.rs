#![allow(clippy::all)]

use std::sync::Arc;

use proptest::prelude::*;
use umbra::traversal::{
    PartitionAwareOptimizer, Step, StrategyPipeline, Traversal, SKIP_PARTITIONER_KEY,
};

fn pipeline() -> StrategyPipeline {
    StrategyPipeline::new().with_pass(Arc::new(PartitionAwareOptimizer::new()))
}

fn skip_partitioner(steps: Vec<Step>) -> bool {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("off")
        .try_init();
    let mut traversal = Traversal::vertex_program(steps);
    pipeline().apply(&mut traversal);
    traversal.config().bool_or(SKIP_PARTITIONER_KEY, false)
}

#[test]
fn count_alone_skips_the_partitioner() {
    assert!(skip_partitioner(vec![Step::count()]));
}

#[test]
fn limit_alone_skips_the_partitioner() {
    assert!(skip_partitioner(vec![Step::limit(10)]));
}

#[test]
fn property_values_group_count_skips_the_partitioner() {
    assert!(skip_partitioner(vec![
        Step::values("age"),
        Step::group_count()
    ]));
}

#[test]
fn group_count_keyed_by_an_out_count_skips_the_partitioner() {
    assert!(skip_partitioner(vec![Step::group_count_by(vec![
        Step::out(),
        Step::count()
    ])]));
}

#[test]
fn outgoing_edges_skip_the_partitioner() {
    assert!(skip_partitioner(vec![Step::out_edges()]));
}

#[test]
fn one_hop_out_count_skips_the_partitioner() {
    assert!(skip_partitioner(vec![Step::out(), Step::count()]));
}

#[test]
fn local_incoming_edge_count_skips_the_partitioner() {
    assert!(skip_partitioner(vec![
        Step::local(vec![Step::in_edges()]),
        Step::count()
    ]));
}

#[test]
fn counted_edge_head_vertices_skip_the_partitioner() {
    assert!(skip_partitioner(vec![
        Step::out_edges(),
        Step::in_vertex(),
        Step::count()
    ]));
}

#[test]
fn materialized_edge_head_vertices_keep_the_partitioner() {
    assert!(!skip_partitioner(vec![Step::out_edges(), Step::in_vertex()]));
}

#[test]
fn both_direction_adjacency_keeps_the_partitioner() {
    assert!(!skip_partitioner(vec![Step::both()]));
    assert!(!skip_partitioner(vec![Step::both(), Step::count()]));
}

#[test]
fn materialized_adjacent_ids_keep_the_partitioner() {
    assert!(!skip_partitioner(vec![Step::out(), Step::id()]));
}

#[test]
fn two_hop_count_keeps_the_partitioner() {
    assert!(!skip_partitioner(vec![
        Step::out(),
        Step::out(),
        Step::count()
    ]));
}

#[test]
fn group_count_over_adjacent_vertices_keeps_the_partitioner() {
    assert!(!skip_partitioner(vec![Step::out(), Step::group_count()]));
    assert!(!skip_partitioner(vec![
        Step::out_edges(),
        Step::in_vertex(),
        Step::group_count()
    ]));
}

#[test]
fn incoming_counts_keep_the_partitioner() {
    assert!(!skip_partitioner(vec![Step::in_vertices(), Step::count()]));
    assert!(!skip_partitioner(vec![Step::in_edges(), Step::count()]));
}

#[test]
fn reapplying_the_pipeline_is_a_no_op() {
    let pipeline = StrategyPipeline::distributed_defaults();
    assert!(pipeline.contains("PartitionAwareOptimizer"));
    let mut traversal = Traversal::vertex_program(vec![Step::out(), Step::count()]);

    pipeline.apply(&mut traversal);
    let once = traversal.config().clone();
    pipeline.apply(&mut traversal);

    assert!(traversal.strategies_applied());
    assert_eq!(traversal.config(), &once);
    assert_eq!(traversal.config().get_bool(SKIP_PARTITIONER_KEY), Some(true));
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::count()),
        (1u64..100).prop_map(Step::limit),
        Just(Step::values("age")),
        Just(Step::group_count()),
        Just(Step::out()),
        Just(Step::in_vertices()),
        Just(Step::both()),
        Just(Step::out_edges()),
        Just(Step::in_edges()),
        Just(Step::in_vertex()),
        Just(Step::id()),
        Just(Step::local(vec![Step::in_edges()])),
        Just(Step::group_count_by(vec![Step::out(), Step::count()])),
    ]
}

proptest! {
    // The outcome is a pure function of the step-kind sequence.
    #[test]
    fn decision_is_deterministic(steps in proptest::collection::vec(arb_step(), 0..6)) {
        let first = skip_partitioner(steps.clone());
        let second = skip_partitioner(steps);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn pipeline_is_idempotent(steps in proptest::collection::vec(arb_step(), 0..6)) {
        let pipeline = pipeline();
        let mut traversal = Traversal::vertex_program(steps);
        pipeline.apply(&mut traversal);
        let once = traversal.config().clone();
        pipeline.apply(&mut traversal);
        prop_assert_eq!(traversal.config(), &once);
    }
}
