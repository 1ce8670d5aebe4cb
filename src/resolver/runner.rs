//! Layout resolution engine.

use log::{debug, trace};

use super::registry::TargetBuilderRegistry;
use super::types::{ConditionError, Rule, RuleLoader, Target};

/// Matches prioritized rules against targets derived from the request.
///
/// Resolution walks the target builders in registry order. The first target
/// that both builds successfully and yields a matching rule wins; a target
/// whose rules all fail to match does not stop the walk. "No layout
/// resolves" is a normal business outcome, reported as `Ok(None)` — callers
/// typically fall back to a default layout.
///
/// Condition matcher failures are configuration bugs and propagate as
/// [`ConditionError`]; the engine never swallows them.
///
/// # Examples
///
/// ```ignore
/// let resolver = LayoutResolver::new(
///     TargetBuilderRegistry::new()
///         .with_builder(RouteTargetBuilder)
///         .with_builder(RequestUriTargetBuilder),
///     doctrine_rule_loader,
/// );
///
/// match resolver.resolve_layout(&request)? {
///     Some(rule) => render(rule.layout),
///     None => render_default(),
/// }
/// ```
pub struct LayoutResolver<Ctx, R: RuleLoader> {
    target_builders: TargetBuilderRegistry<Ctx>,
    rule_loader: R,
}

impl<Ctx, R: RuleLoader> LayoutResolver<Ctx, R> {
    /// Creates a resolver over the given builder registry and rule loader.
    pub fn new(target_builders: TargetBuilderRegistry<Ctx>, rule_loader: R) -> Self {
        Self {
            target_builders,
            rule_loader,
        }
    }

    /// Resolves the layout rule applying to the request context.
    ///
    /// Returns the highest-priority fully-matching rule across all buildable
    /// targets, or `Ok(None)` when no target builds or no rule matches.
    pub fn resolve_layout(&self, ctx: &Ctx) -> Result<Option<Rule<R::Layout>>, ConditionError> {
        for builder in self.target_builders.iter() {
            let Some(target) = builder.build(ctx) else {
                trace!("target builder '{}' yielded no target", builder.identifier());
                continue;
            };

            debug!("built target '{}', resolving rules", target.identifier());

            if let Some(rule) = self.resolve_layout_for_target(&target)? {
                return Ok(Some(rule));
            }
        }

        debug!("no layout rule resolved for request");
        Ok(None)
    }

    /// Resolves the layout rule applying to a single target.
    ///
    /// Candidates come from the rule loader, which supplies them sorted
    /// descending by priority with source order as the tie-break. The engine
    /// re-sorts defensively (stable, so a well-behaved loader is untouched)
    /// and returns the first enabled rule whose conditions all hold.
    pub fn resolve_layout_for_target(
        &self,
        target: &Target,
    ) -> Result<Option<Rule<R::Layout>>, ConditionError> {
        let mut rules = self.rule_loader.load_rules(target);

        // Stable: equal priorities keep loader source order.
        rules.sort_by_key(|rule| std::cmp::Reverse(rule.priority));

        for rule in rules {
            if !rule.enabled {
                trace!("skipping disabled rule (priority {})", rule.priority);
                continue;
            }

            if self.match_conditions(&rule, target)? {
                debug!(
                    "rule matched for target '{}' (priority {})",
                    target.identifier(),
                    rule.priority
                );
                return Ok(Some(rule));
            }
        }

        Ok(None)
    }

    /// Returns `true` iff every condition on the rule holds for the target.
    ///
    /// Short-circuits on the first false condition. A rule with no
    /// conditions trivially matches.
    fn match_conditions(
        &self,
        rule: &Rule<R::Layout>,
        target: &Target,
    ) -> Result<bool, ConditionError> {
        for condition in &rule.conditions {
            if !condition.matches(target)? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
