//! Core value types and collaborator traits for the layout resolver.
//!
//! Three traits define the contract between the generic resolver engine and
//! the surrounding infrastructure: [`TargetBuilder`] derives targets from the
//! request context, [`RuleLoader`] fetches candidate rules from storage, and
//! [`ConditionMatcher`] evaluates stored condition predicates.

use std::sync::Arc;

use crate::value::Value;

/// A resolved request-derived key used to look up layout rules.
///
/// The identifier names the matching strategy (e.g. `"route"`,
/// `"request_uri_prefix"`); the values carry whatever that strategy
/// extracted from the request. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    identifier: String,
    values: Vec<Value>,
}

impl Target {
    /// Creates a new target with the given identifier and values.
    pub fn new(identifier: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            identifier: identifier.into(),
            values,
        }
    }

    /// Returns the identifier of the matching strategy that produced this target.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the values extracted from the request, in order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Error returned when a condition matcher cannot evaluate.
///
/// A matcher that cannot evaluate signals a configuration or data bug, fatal
/// to the resolution attempt. The resolver propagates this unchanged; it
/// never retries or swallows.
#[derive(Debug, Clone, thiserror::Error)]
#[error("condition matcher '{identifier}' failed to evaluate: {message}")]
pub struct ConditionError {
    /// Identifier of the matcher that failed.
    pub identifier: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ConditionError {
    /// Creates a new condition error.
    pub fn new(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            message: message.into(),
        }
    }
}

/// A stateless predicate strategy evaluated against a target.
///
/// Implementations are registered by identifier and shared between all
/// conditions referencing them; per-condition state lives in the condition's
/// parameter values, not in the matcher.
pub trait ConditionMatcher: Send + Sync {
    /// Returns the identifier this matcher is registered under.
    fn identifier(&self) -> &str;

    /// Evaluates the predicate against the target.
    ///
    /// Returns `Ok(true)` when the condition holds. A matcher that cannot
    /// evaluate (malformed parameters, unreachable backing data) returns
    /// `Err`; the resolver propagates it to the caller.
    fn matches(&self, target: &Target, parameter_values: &[Value]) -> Result<bool, ConditionError>;
}

/// A condition guarding a rule: a matcher plus its stored parameters.
#[derive(Clone)]
pub struct Condition {
    matcher: Arc<dyn ConditionMatcher>,
    parameter_values: Vec<Value>,
}

impl Condition {
    /// Creates a condition from a shared matcher and its parameter values.
    pub fn new(matcher: Arc<dyn ConditionMatcher>, parameter_values: Vec<Value>) -> Self {
        Self {
            matcher,
            parameter_values,
        }
    }

    /// Returns the identifier of the underlying matcher.
    pub fn identifier(&self) -> &str {
        self.matcher.identifier()
    }

    /// Returns the stored parameter values, in order.
    pub fn parameter_values(&self) -> &[Value] {
        &self.parameter_values
    }

    /// Evaluates this condition against the target.
    pub fn matches(&self, target: &Target) -> Result<bool, ConditionError> {
        self.matcher.matches(target, &self.parameter_values)
    }
}

impl std::fmt::Debug for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Condition")
            .field("identifier", &self.identifier())
            .field("parameter_values", &self.parameter_values)
            .finish()
    }
}

/// A priority-ordered binding from a target match to a layout, guarded by
/// conditions.
///
/// Generic over the layout payload `L` — the engine never inspects it, so a
/// bare id or a fully loaded layout both work.
#[derive(Debug, Clone)]
pub struct Rule<L> {
    /// The layout this rule maps to, if any.
    pub layout: Option<L>,

    /// Rule priority. Higher priorities are matched first.
    pub priority: i32,

    /// Disabled rules are skipped during matching.
    pub enabled: bool,

    /// Conditions that must all hold for this rule to match.
    pub conditions: Vec<Condition>,
}

impl<L> Rule<L> {
    /// Creates an enabled rule with no conditions and priority 0.
    pub fn new(layout: L) -> Self {
        Self {
            layout: Some(layout),
            priority: 0,
            enabled: true,
            conditions: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}

/// Derives a [`Target`] from the current request context.
///
/// # Type Parameters
///
/// * `Ctx` - The request context type (an HTTP request wrapper, a test stub)
///
/// Returning `None` means "this strategy cannot build a target here" — an
/// expected, silent outcome, distinct from a failure. Builders do not return
/// errors; a strategy either applies to the request or it does not.
pub trait TargetBuilder<Ctx>: Send + Sync {
    /// Returns the identifier of the targets this builder produces.
    fn identifier(&self) -> &str;

    /// Attempts to build a target from the request context.
    fn build(&self, ctx: &Ctx) -> Option<Target>;
}

/// Loads candidate rules for a target from storage.
///
/// The contract requires candidates already filtered for the target and
/// sorted by descending priority, with source order as the tie-break among
/// equal priorities (e.g. `ORDER BY priority DESC, id ASC`). The resolver
/// additionally re-sorts defensively; see
/// [`LayoutResolver`](crate::resolver::LayoutResolver).
pub trait RuleLoader: Send + Sync {
    /// The layout payload carried by loaded rules.
    type Layout;

    /// Returns candidate rules for the target, best first.
    fn load_rules(&self, target: &Target) -> Vec<Rule<Self::Layout>>;
}
