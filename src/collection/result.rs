//! Result values produced by running a collection.

use super::types::Item;

/// Which layer produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultKind {
    /// Generated from a manual collection item.
    Manual,

    /// Generated from an override collection item.
    Override,

    /// Generated from a value streamed out of the collection query.
    Dynamic,
}

/// The resolved value for one slot of a collection's output.
///
/// Produced on demand while iterating, never mutated afterwards and never
/// persisted. `value` is `None` when an invalid item reference is surfaced
/// directly (the null placeholder); `backup_value` retains a secondary
/// payload some renderers consume — the dynamic value an override covered,
/// never interpreted by the engine itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotResult<V> {
    /// Zero-based position of this slot within the collection output.
    pub position: usize,

    /// The layer that produced this result.
    pub kind: ResultKind,

    /// The resolved external value, or `None` for the null placeholder.
    pub value: Option<V>,

    /// The collection item behind this slot, if any. Present for manual and
    /// override results, and for dynamic results that replaced an invalid
    /// item.
    pub collection_item: Option<Item>,

    /// Retained secondary payload (e.g. the query value a valid override
    /// covered).
    pub backup_value: Option<V>,
}

impl<V> SlotResult<V> {
    /// Creates a dynamic result with no backing collection item.
    pub fn dynamic(position: usize, value: V) -> Self {
        Self {
            position,
            kind: ResultKind::Dynamic,
            value: Some(value),
            collection_item: None,
            backup_value: None,
        }
    }
}

/// A materialized window of collection results.
///
/// `total_count` is the collection's full length, independent of the
/// requested window — pagination needs it even when the window is small.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet<V> {
    /// The results for the requested window, ascending by position.
    pub results: Vec<SlotResult<V>>,

    /// Total number of results the collection can produce.
    pub total_count: usize,

    /// The requested window offset.
    pub offset: usize,

    /// The requested window limit.
    pub limit: usize,
}
