#![allow(clippy::all)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use umbra::model::{Graph, PropertyValue, Vertex};
use umbra::strategy::{
    Continuation, GraphPolicy, PolicyGraph, StrategyContext, WrappedElement, WrappedProperty,
    WrappedVertex,
};
use umbra::types::{Result, UmbraError};

/// Appends its own name to string values produced by the rest of the chain.
struct Suffixing {
    name: &'static str,
    after: &'static [&'static str],
}

impl GraphPolicy for Suffixing {
    fn name(&self) -> &'static str {
        self.name
    }

    fn runs_after(&self) -> &'static [&'static str] {
        self.after
    }

    fn overrides_property_value(&self) -> bool {
        true
    }

    fn on_property_value(
        &self,
        _ctx: &StrategyContext<'_>,
        next: Continuation<'_, PropertyValue>,
    ) -> Result<PropertyValue> {
        match next()? {
            PropertyValue::String(s) => Ok(PropertyValue::String(format!("{s}|{}", self.name))),
            other => Ok(other),
        }
    }
}

/// Hides every value without consulting the rest of the chain.
struct Masking;

impl GraphPolicy for Masking {
    fn name(&self) -> &'static str {
        "masking"
    }

    fn overrides_property_value(&self) -> bool {
        true
    }

    fn on_property_value(
        &self,
        _ctx: &StrategyContext<'_>,
        _next: Continuation<'_, PropertyValue>,
    ) -> Result<PropertyValue> {
        Ok(PropertyValue::String("***".to_owned()))
    }
}

/// Rejects every mutation.
struct ReadOnly;

impl GraphPolicy for ReadOnly {
    fn name(&self) -> &'static str {
        "readonly"
    }

    fn overrides_property_remove(&self) -> bool {
        true
    }

    fn on_property_remove(
        &self,
        _ctx: &StrategyContext<'_>,
        _next: Continuation<'_, ()>,
    ) -> Result<()> {
        Err(UmbraError::InvalidArgument("graph is read-only".to_owned()))
    }

    fn overrides_element_remove(&self) -> bool {
        true
    }

    fn on_element_remove(
        &self,
        _ctx: &StrategyContext<'_>,
        _next: Continuation<'_, ()>,
    ) -> Result<()> {
        Err(UmbraError::InvalidArgument("graph is read-only".to_owned()))
    }
}

/// Calls the continuation twice, returning the second result.
struct Retrying;

impl GraphPolicy for Retrying {
    fn name(&self) -> &'static str {
        "retrying"
    }

    fn overrides_property_value(&self) -> bool {
        true
    }

    fn on_property_value(
        &self,
        _ctx: &StrategyContext<'_>,
        next: Continuation<'_, PropertyValue>,
    ) -> Result<PropertyValue> {
        let _ = next()?;
        next()
    }
}

/// Counts how often its value hook runs.
struct Counting {
    calls: Arc<AtomicUsize>,
}

impl GraphPolicy for Counting {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn overrides_property_value(&self) -> bool {
        true
    }

    fn on_property_value(
        &self,
        ctx: &StrategyContext<'_>,
        next: Continuation<'_, PropertyValue>,
    ) -> Result<PropertyValue> {
        assert_eq!(ctx.subject().kind_name(), "property");
        assert!(ctx.graph().vertex_count() >= 1);
        self.calls.fetch_add(1, Ordering::SeqCst);
        next()
    }
}

fn person_with_name(graph: &Graph) -> Vertex {
    let v = graph.add_vertex("person");
    v.set_property("name", "ada").expect("set succeeds");
    v
}

#[test]
fn undecorated_wrapping_is_transparent() -> Result<()> {
    let graph = Graph::new();
    let v = person_with_name(&graph);
    let decorated = PolicyGraph::undecorated(graph);

    let base = v.property("name");
    let wrapped = WrappedProperty::wrap(base.clone(), &decorated)?;

    assert_eq!(wrapped.key(), base.key());
    assert_eq!(wrapped.is_present(), base.is_present());
    assert_eq!(wrapped.value()?, PropertyValue::from("ada"));

    let absent = WrappedProperty::wrap(v.property("age"), &decorated)?;
    assert!(!absent.is_present());
    assert_eq!(
        absent.value(),
        Err(UmbraError::NoSuchValue("age".to_owned()))
    );
    assert_eq!(absent.or_else(PropertyValue::Int(0)), PropertyValue::Int(0));
    Ok(())
}

#[test]
fn wrapping_an_already_wrapped_property_fails() -> Result<()> {
    let graph = Graph::new();
    let v = person_with_name(&graph);
    let decorated = PolicyGraph::undecorated(graph);

    let wrapped = WrappedProperty::wrap(v.property("name"), &decorated)?;
    let err = WrappedProperty::wrap(wrapped, &decorated).expect_err("double wrap must fail");
    assert!(matches!(err, UmbraError::InvalidArgument(_)));

    let wrapped_vertex = WrappedVertex::wrap(v, &decorated)?;
    let err = WrappedVertex::wrap(wrapped_vertex, &decorated).expect_err("double wrap must fail");
    assert!(matches!(err, UmbraError::InvalidArgument(_)));
    Ok(())
}

#[test]
fn element_returns_fresh_but_equal_wrappers() -> Result<()> {
    let graph = Graph::new();
    let a = graph.add_vertex("person");
    let b = graph.add_vertex("person");
    let e = graph.add_edge("knows", &a, &b);
    e.set_property("weight", 4_i64)?;
    let decorated = PolicyGraph::undecorated(graph);

    let wrapped = WrappedProperty::wrap(e.property("weight"), &decorated)?;
    let first = wrapped.element()?;
    let second = wrapped.element()?;
    assert_eq!(first, second);
    match first {
        WrappedElement::Edge(owner) => assert_eq!(owner.id(), e.id()),
        WrappedElement::Vertex(_) => panic!("edge property resolved to a vertex"),
    }

    let vertex_prop = WrappedProperty::wrap(a.property("name"), &decorated)?;
    let owner = vertex_prop.element()?;
    assert!(matches!(owner, WrappedElement::Vertex(_)));
    Ok(())
}

#[test]
fn two_wrappers_around_the_same_base_compare_equal() -> Result<()> {
    let graph = Graph::new();
    let v = person_with_name(&graph);
    let decorated = PolicyGraph::undecorated(graph);

    let first = WrappedProperty::wrap(v.property("name"), &decorated)?;
    let second = WrappedProperty::wrap(v.property("name"), &decorated)?;
    assert_eq!(first, second);
    assert_eq!(first, *second.base());
    Ok(())
}

#[test]
fn value_hooks_nest_in_resolved_order() -> Result<()> {
    let graph = Graph::new();
    let v = person_with_name(&graph);

    // No constraints: registration order, outermost first.
    let decorated = PolicyGraph::new(
        graph.clone(),
        vec![
            Arc::new(Suffixing {
                name: "outer",
                after: &[],
            }),
            Arc::new(Suffixing {
                name: "inner",
                after: &[],
            }),
        ],
    )?;
    let wrapped = WrappedProperty::wrap(v.property("name"), &decorated)?;
    assert_eq!(wrapped.value()?, PropertyValue::from("ada|inner|outer"));

    // A runs_after constraint flips the nesting.
    let decorated = PolicyGraph::new(
        graph,
        vec![
            Arc::new(Suffixing {
                name: "outer",
                after: &["inner"],
            }),
            Arc::new(Suffixing {
                name: "inner",
                after: &[],
            }),
        ],
    )?;
    let wrapped = WrappedProperty::wrap(v.property("name"), &decorated)?;
    assert_eq!(wrapped.value()?, PropertyValue::from("ada|outer|inner"));
    Ok(())
}

#[test]
fn a_policy_may_short_circuit_the_chain() -> Result<()> {
    let graph = Graph::new();
    let v = person_with_name(&graph);
    let calls = Arc::new(AtomicUsize::new(0));

    let decorated = PolicyGraph::new(
        graph,
        vec![
            Arc::new(Masking),
            Arc::new(Counting {
                calls: calls.clone(),
            }),
        ],
    )?;
    let wrapped = WrappedProperty::wrap(v.property("name"), &decorated)?;

    assert_eq!(wrapped.value()?, PropertyValue::from("***"));
    // Masking never called its continuation, so the later policy never ran.
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn a_policy_may_invoke_the_continuation_repeatedly() -> Result<()> {
    let graph = Graph::new();
    let v = person_with_name(&graph);
    let calls = Arc::new(AtomicUsize::new(0));

    let decorated = PolicyGraph::new(
        graph,
        vec![
            Arc::new(Retrying),
            Arc::new(Counting {
                calls: calls.clone(),
            }),
        ],
    )?;
    let wrapped = WrappedProperty::wrap(v.property("name"), &decorated)?;

    assert_eq!(wrapped.value()?, PropertyValue::from("ada"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn removal_hooks_can_reject_mutations() -> Result<()> {
    let graph = Graph::new();
    let v = person_with_name(&graph);
    let decorated = PolicyGraph::new(graph.clone(), vec![Arc::new(ReadOnly)])?;

    let wrapped = WrappedProperty::wrap(v.property("name"), &decorated)?;
    let err = wrapped.remove().expect_err("read-only graph rejects removal");
    assert!(matches!(err, UmbraError::InvalidArgument(_)));
    assert!(v.property("name").is_present());

    let wrapped_vertex = decorated.vertex(v.id())?;
    let err = wrapped_vertex
        .remove()
        .expect_err("read-only graph rejects removal");
    assert!(matches!(err, UmbraError::InvalidArgument(_)));
    assert_eq!(graph.vertex_count(), 1);
    Ok(())
}

#[test]
fn removal_passes_through_an_empty_chain() -> Result<()> {
    let graph = Graph::new();
    let v = person_with_name(&graph);
    let decorated = PolicyGraph::undecorated(graph);

    let wrapped = WrappedProperty::wrap(v.property("name"), &decorated)?;
    wrapped.remove()?;
    assert!(!v.property("name").is_present());
    Ok(())
}

#[test]
fn precedence_cycles_fail_at_graph_decoration_time() {
    let graph = Graph::new();
    let err = PolicyGraph::new(
        graph,
        vec![
            Arc::new(Suffixing {
                name: "a",
                after: &["b"],
            }),
            Arc::new(Suffixing {
                name: "b",
                after: &["a"],
            }),
        ],
    )
    .expect_err("cycle must fail");
    assert!(matches!(err, UmbraError::PolicyCycle(_)));
}

#[test]
fn diagnostics_name_the_head_policy_and_the_base_element() -> Result<()> {
    let graph = Graph::new();
    let v = person_with_name(&graph);
    let decorated = PolicyGraph::new(graph, vec![Arc::new(Masking)])?;

    let wrapped = WrappedProperty::wrap(v.property("name"), &decorated)?;
    let rendered = wrapped.to_string();
    assert!(rendered.contains("masking"), "got {rendered}");
    assert!(rendered.contains("name"), "got {rendered}");
    Ok(())
}
