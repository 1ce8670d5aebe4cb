//! Framework-agnostic page layout engine.
//!
//! Provides the two computational cores of a content-management
//! page-building system:
//!
//! - **Layout resolution**: match a prioritized rule set against targets
//!   derived from the current request, returning the first fully-matching
//!   rule. Target building, rule storage and condition predicates are
//!   pluggable collaborator traits.
//! - **Collection results**: merge manually placed items, override items
//!   and a lazily streamed query into one position-ordered result sequence,
//!   with query windowing that never over- or under-fetches.
//!
//! # Architecture
//!
//! This crate contains no HTTP, persistence or templating concepts — those
//! live in consuming layers behind the collaborator traits
//! ([`resolver::TargetBuilder`], [`resolver::RuleLoader`],
//! [`resolver::ConditionMatcher`], [`collection::QueryRunner`],
//! [`collection::ValueLoader`]). Both engines are synchronous, deterministic
//! computations over read-only snapshots: expected non-matches are `None`
//! or empty sequences, while collaborator contract violations propagate as
//! errors, untouched.

pub mod collection;
pub mod resolver;
pub mod value;
