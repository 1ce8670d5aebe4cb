//! Layout resolution: rule matching against request-derived targets.
//!
//! # Key Components
//!
//! - **Targets**: [`Target`] — request-derived lookup keys, produced by
//!   [`TargetBuilder`] strategies
//! - **Rules**: [`Rule`] — priority-ordered bindings to layouts, guarded by
//!   [`Condition`]s
//! - **Registries**: [`TargetBuilderRegistry`], [`ConditionMatcherRegistry`]
//!   — explicit configuration structs, built once and injected
//! - **Engine**: [`LayoutResolver`] — walks builders in registry order and
//!   returns the first fully-matching rule
//!
//! # Design
//!
//! Storage access lives behind the [`RuleLoader`] trait; this module never
//! queries anything itself. "No rule matches" is an expected outcome
//! (`Ok(None)`), while a condition matcher that cannot evaluate is a fatal
//! [`ConditionError`] propagated to the caller.

mod registry;
mod runner;
mod types;

pub use registry::{ConditionMatcherRegistry, TargetBuilderRegistry};
pub use runner::LayoutResolver;
pub use types::{Condition, ConditionError, ConditionMatcher, Rule, RuleLoader, Target, TargetBuilder};
