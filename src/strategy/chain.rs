//! Ordered policy chains and the nested hook composer.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::model::PropertyValue;
use crate::strategy::context::StrategyContext;
use crate::strategy::policy::{Continuation, GraphPolicy};
use crate::types::{Result, UmbraError};

/// Immutable, totally-ordered sequence of policies.
///
/// Resolved once per decorated graph from the declared partial-order
/// constraints and reused for every intercepted call afterwards.
pub struct PolicyChain {
    policies: Vec<Arc<dyn GraphPolicy>>,
}

impl fmt::Debug for PolicyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyChain")
            .field("policies", &self.names())
            .finish()
    }
}

impl PolicyChain {
    /// Resolves a chain from the given policies.
    ///
    /// The resulting order is a deterministic total order consistent with
    /// every `runs_before`/`runs_after` declaration; ties break by
    /// registration order. A constraint cycle or a duplicate policy name is a
    /// construction-time error.
    pub fn resolve(policies: Vec<Arc<dyn GraphPolicy>>) -> Result<Self> {
        let ordered = sort_by_precedence(policies)?;
        trace!(
            order = ?ordered.iter().map(|p| p.name()).collect::<Vec<_>>(),
            "resolved policy chain"
        );
        Ok(Self { policies: ordered })
    }

    /// An empty chain; every operation falls through to the base.
    pub fn empty() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    /// Number of policies in the chain.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether the chain holds no policies.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Name of the first policy in resolved order, for diagnostics.
    pub fn head_name(&self) -> Option<&'static str> {
        self.policies.first().map(|p| p.name())
    }

    /// Names of all policies in resolved order.
    pub fn names(&self) -> Vec<&'static str> {
        self.policies.iter().map(|p| p.name()).collect()
    }

    /// Folds the property-value hooks around `base` and runs the result.
    pub fn property_value(
        &self,
        ctx: &StrategyContext<'_>,
        base: Continuation<'_, PropertyValue>,
    ) -> Result<PropertyValue> {
        trace!(subject = ctx.subject().kind_name(), "composing value chain");
        compose(
            &self.policies,
            ctx,
            &|p| p.overrides_property_value(),
            &|p, ctx, next| p.on_property_value(ctx, next),
            base,
        )
    }

    /// Folds the property-removal hooks around `base` and runs the result.
    pub fn property_remove(
        &self,
        ctx: &StrategyContext<'_>,
        base: Continuation<'_, ()>,
    ) -> Result<()> {
        trace!(subject = ctx.subject().kind_name(), "composing removal chain");
        compose(
            &self.policies,
            ctx,
            &|p| p.overrides_property_remove(),
            &|p, ctx, next| p.on_property_remove(ctx, next),
            base,
        )
    }

    /// Folds the element-removal hooks around `base` and runs the result.
    pub fn element_remove(
        &self,
        ctx: &StrategyContext<'_>,
        base: Continuation<'_, ()>,
    ) -> Result<()> {
        trace!(subject = ctx.subject().kind_name(), "composing removal chain");
        compose(
            &self.policies,
            ctx,
            &|p| p.overrides_element_remove(),
            &|p, ctx, next| p.on_element_remove(ctx, next),
            base,
        )
    }
}

/// Nested middleware composition.
///
/// Each participating policy receives a continuation over the remainder of
/// the chain, terminating in `base`. Composition is nested rather than
/// first-match-wins: a hook may short-circuit without calling the
/// continuation, post-process its result, or invoke it repeatedly.
fn compose<T>(
    policies: &[Arc<dyn GraphPolicy>],
    ctx: &StrategyContext<'_>,
    participates: &dyn Fn(&dyn GraphPolicy) -> bool,
    invoke: &dyn Fn(&dyn GraphPolicy, &StrategyContext<'_>, Continuation<'_, T>) -> Result<T>,
    base: Continuation<'_, T>,
) -> Result<T> {
    match policies.split_first() {
        None => base(),
        Some((head, rest)) => {
            if participates(head.as_ref()) {
                let mut next = || compose(rest, ctx, participates, invoke, &mut *base);
                invoke(head.as_ref(), ctx, &mut next)
            } else {
                compose(rest, ctx, participates, invoke, base)
            }
        }
    }
}

/// Stable topological sort over the declared precedence constraints.
///
/// Constraints naming unknown policies are ignored; among ready policies the
/// lowest registration index always wins, which keeps the order deterministic.
fn sort_by_precedence(policies: Vec<Arc<dyn GraphPolicy>>) -> Result<Vec<Arc<dyn GraphPolicy>>> {
    let mut index_by_name: FxHashMap<&'static str, usize> = FxHashMap::default();
    for (idx, policy) in policies.iter().enumerate() {
        if index_by_name.insert(policy.name(), idx).is_some() {
            return Err(UmbraError::InvalidArgument(format!(
                "duplicate policy name '{}'",
                policy.name()
            )));
        }
    }

    // successors[i] holds the policies that must run after i.
    let mut successors: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); policies.len()];
    let mut indegree = vec![0usize; policies.len()];
    for (idx, policy) in policies.iter().enumerate() {
        for before in policy.runs_before() {
            if let Some(&target) = index_by_name.get(before) {
                successors[idx].push(target);
                indegree[target] += 1;
            }
        }
        for after in policy.runs_after() {
            if let Some(&source) = index_by_name.get(after) {
                successors[source].push(idx);
                indegree[idx] += 1;
            }
        }
    }

    let mut placed = vec![false; policies.len()];
    let mut order = Vec::with_capacity(policies.len());
    while order.len() < policies.len() {
        let next = (0..policies.len()).find(|&i| !placed[i] && indegree[i] == 0);
        let Some(next) = next else {
            let stuck = (0..policies.len())
                .find(|&i| !placed[i])
                .map(|i| policies[i].name())
                .unwrap_or("unknown");
            return Err(UmbraError::PolicyCycle(stuck.to_owned()));
        };
        placed[next] = true;
        for &succ in &successors[next] {
            indegree[succ] -= 1;
        }
        order.push(next);
    }

    Ok(order.into_iter().map(|i| policies[i].clone()).collect())
}
