//! Registries for target builders and condition matchers.
//!
//! Both are plain structs built once at startup and injected into the
//! resolver; there is no global state. Target builders are ordered — the
//! registration order is the order the resolver tries them in.

use std::collections::HashMap;
use std::sync::Arc;

use super::types::{Condition, ConditionMatcher, TargetBuilder};
use crate::value::Value;

/// An ordered set of target builders.
///
/// The resolver walks builders in registration order, so registration order
/// encodes strategy precedence (e.g. exact route match before URI prefix).
pub struct TargetBuilderRegistry<Ctx> {
    builders: Vec<Box<dyn TargetBuilder<Ctx>>>,
}

impl<Ctx> TargetBuilderRegistry<Ctx> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            builders: Vec::new(),
        }
    }

    /// Appends a builder. Earlier registrations take precedence.
    pub fn with_builder<B: TargetBuilder<Ctx> + 'static>(mut self, builder: B) -> Self {
        self.builders.push(Box::new(builder));
        self
    }

    /// Returns the number of registered builders.
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// Returns `true` when no builders are registered.
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Returns the registered builder identifiers, in precedence order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.builders.iter().map(|b| b.identifier()).collect()
    }

    /// Iterates builders in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn TargetBuilder<Ctx>> {
        self.builders.iter().map(|b| b.as_ref())
    }
}

impl<Ctx> Default for TargetBuilderRegistry<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps condition identifiers to shared matcher instances.
///
/// Surrounding layers use this to hydrate stored conditions: the persisted
/// model keeps only the matcher identifier plus parameter values, and
/// [`condition`](ConditionMatcherRegistry::condition) reattaches the matcher.
pub struct ConditionMatcherRegistry {
    matchers: HashMap<String, Arc<dyn ConditionMatcher>>,
}

impl ConditionMatcherRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            matchers: HashMap::new(),
        }
    }

    /// Registers a matcher under its own identifier.
    pub fn with_matcher<M: ConditionMatcher + 'static>(mut self, matcher: M) -> Self {
        self.matchers
            .insert(matcher.identifier().to_string(), Arc::new(matcher));
        self
    }

    /// Returns the matcher registered under the identifier, if any.
    pub fn matcher(&self, identifier: &str) -> Option<Arc<dyn ConditionMatcher>> {
        self.matchers.get(identifier).cloned()
    }

    /// Builds a [`Condition`] from a stored identifier and parameter values.
    ///
    /// Returns `None` when no matcher is registered under the identifier;
    /// what to do about such orphaned conditions is the caller's policy.
    pub fn condition(&self, identifier: &str, parameter_values: Vec<Value>) -> Option<Condition> {
        self.matcher(identifier)
            .map(|matcher| Condition::new(matcher, parameter_values))
    }
}

impl Default for ConditionMatcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::types::{ConditionError, Target};

    struct StubBuilder {
        identifier: &'static str,
    }

    impl TargetBuilder<()> for StubBuilder {
        fn identifier(&self) -> &str {
            self.identifier
        }
        fn build(&self, _ctx: &()) -> Option<Target> {
            Some(Target::new(self.identifier, vec![]))
        }
    }

    struct StubMatcher {
        identifier: &'static str,
    }

    impl ConditionMatcher for StubMatcher {
        fn identifier(&self) -> &str {
            self.identifier
        }
        fn matches(&self, _target: &Target, _params: &[Value]) -> Result<bool, ConditionError> {
            Ok(true)
        }
    }

    #[test]
    fn test_builder_registration_order() {
        let registry = TargetBuilderRegistry::new()
            .with_builder(StubBuilder { identifier: "route" })
            .with_builder(StubBuilder {
                identifier: "request_uri",
            });

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.identifiers(), vec!["route", "request_uri"]);
    }

    #[test]
    fn test_empty_builder_registry() {
        let registry = TargetBuilderRegistry::<()>::new();
        assert!(registry.is_empty());
        assert!(registry.identifiers().is_empty());
    }

    #[test]
    fn test_matcher_lookup() {
        let registry = ConditionMatcherRegistry::new()
            .with_matcher(StubMatcher {
                identifier: "site_access",
            })
            .with_matcher(StubMatcher {
                identifier: "time_range",
            });

        assert!(registry.matcher("site_access").is_some());
        assert!(registry.matcher("unknown").is_none());
    }

    #[test]
    fn test_condition_hydration() {
        let registry = ConditionMatcherRegistry::new().with_matcher(StubMatcher {
            identifier: "site_access",
        });

        let condition = registry
            .condition("site_access", vec!["intranet".into()])
            .unwrap();
        assert_eq!(condition.identifier(), "site_access");
        assert_eq!(
            condition.parameter_values(),
            &[Value::Str("intranet".into())]
        );

        assert!(registry.condition("unknown", vec![]).is_none());
    }
}
