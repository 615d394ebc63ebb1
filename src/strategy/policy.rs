//! The policy contract.

use crate::model::PropertyValue;
use crate::strategy::context::StrategyContext;
use crate::types::Result;

/// Continuation representing the rest of the chain for one operation,
/// terminating in the base operation. A hook may call it zero or more times.
pub type Continuation<'a, T> = &'a mut dyn FnMut() -> Result<T>;

/// A cross-cutting policy over graph-element operations.
///
/// Every hook defaults to passthrough; a policy participates in an operation
/// only when the matching `overrides_*` flag reports `true`. The composer
/// skips non-participating policies entirely, so a hook body is only reached
/// when its flag is set.
///
/// Precedence among policies is declared, not positional: `runs_before` and
/// `runs_after` name other policies, and the chain resolves a deterministic
/// total order from those constraints at construction time.
pub trait GraphPolicy: Send + Sync {
    /// Unique name of this policy, used for precedence constraints and
    /// diagnostics.
    fn name(&self) -> &'static str;

    /// Names of policies this one must precede.
    fn runs_before(&self) -> &'static [&'static str] {
        &[]
    }

    /// Names of policies this one must follow.
    fn runs_after(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether this policy intercepts property-value reads.
    fn overrides_property_value(&self) -> bool {
        false
    }

    /// Intercepts a property-value read.
    fn on_property_value(
        &self,
        _ctx: &StrategyContext<'_>,
        next: Continuation<'_, PropertyValue>,
    ) -> Result<PropertyValue> {
        next()
    }

    /// Whether this policy intercepts property removal.
    fn overrides_property_remove(&self) -> bool {
        false
    }

    /// Intercepts a property removal.
    fn on_property_remove(
        &self,
        _ctx: &StrategyContext<'_>,
        next: Continuation<'_, ()>,
    ) -> Result<()> {
        next()
    }

    /// Whether this policy intercepts element removal.
    fn overrides_element_remove(&self) -> bool {
        false
    }

    /// Intercepts a vertex or edge removal.
    fn on_element_remove(
        &self,
        _ctx: &StrategyContext<'_>,
        next: Continuation<'_, ()>,
    ) -> Result<()> {
        next()
    }
}
