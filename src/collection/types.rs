//! Core value types and collaborator traits for collection results.
//!
//! A [`Collection`] is a read-only snapshot of a curated item set: manual
//! and override items keyed by position, plus an optional dynamic query.
//! The two collaborator traits — [`QueryRunner`] and [`ValueLoader`] — are
//! the boundary to the surrounding infrastructure (search backends, CMS
//! content repositories).

use std::collections::BTreeMap;

use crate::value::Value;

/// How a collection sources its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollectionKind {
    /// Results come only from manually placed items.
    Manual,

    /// Results come from a dynamic query, with manual and override items
    /// merged in by position.
    Dynamic,
}

/// How an item participates in the positional merge.
///
/// Ordered so that manual items sort before override items at the same
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Inserted into the dynamic stream at its position, consuming no
    /// dynamic slot.
    Manual,

    /// Covers whatever the dynamic query would place at its position.
    Override,
}

/// An explicitly placed content reference at a fixed position.
///
/// Validity is derived, never stored: an item is valid iff its referenced
/// value can be loaded and is visible, which only the [`ValueLoader`]
/// collaborator can tell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Zero-based slot this item occupies. Positions need not be contiguous.
    pub position: usize,

    /// Whether this item inserts into or overrides the dynamic stream.
    pub kind: ItemKind,

    /// Opaque id of the referenced external value.
    pub value_id: Value,

    /// Type of the referenced external value (e.g. `"article"`).
    pub value_type: String,
}

impl Item {
    /// Creates a manual item.
    pub fn manual(position: usize, value_id: impl Into<Value>, value_type: impl Into<String>) -> Self {
        Self {
            position,
            kind: ItemKind::Manual,
            value_id: value_id.into(),
            value_type: value_type.into(),
        }
    }

    /// Creates an override item.
    pub fn overriding(
        position: usize,
        value_id: impl Into<Value>,
        value_type: impl Into<String>,
    ) -> Self {
        Self {
            position,
            kind: ItemKind::Override,
            value_id: value_id.into(),
            value_type: value_type.into(),
        }
    }
}

/// A read-only snapshot of an ordered set of content references.
///
/// Generic over the query type `Q`, which stays opaque to the engine — only
/// the [`QueryRunner`] collaborator interprets it.
#[derive(Debug, Clone)]
pub struct Collection<Q> {
    kind: CollectionKind,
    manual_items: BTreeMap<usize, Item>,
    override_items: BTreeMap<usize, Item>,
    query: Option<Q>,
}

impl<Q> Collection<Q> {
    /// Creates a manual collection from its items.
    ///
    /// Items are keyed by position; a later item at an already occupied
    /// position replaces the earlier one.
    pub fn manual(items: impl IntoIterator<Item = Item>) -> Self {
        let mut collection = Self {
            kind: CollectionKind::Manual,
            manual_items: BTreeMap::new(),
            override_items: BTreeMap::new(),
            query: None,
        };
        for item in items {
            collection.manual_items.insert(item.position, item);
        }
        collection
    }

    /// Creates a dynamic collection from a query and its items.
    ///
    /// [`ItemKind::Manual`] items land in the manual set and
    /// [`ItemKind::Override`] items in the override set; the same position
    /// may appear in both.
    pub fn dynamic(query: Q, items: impl IntoIterator<Item = Item>) -> Self {
        let mut collection = Self {
            kind: CollectionKind::Dynamic,
            manual_items: BTreeMap::new(),
            override_items: BTreeMap::new(),
            query: Some(query),
        };
        for item in items {
            match item.kind {
                ItemKind::Manual => collection.manual_items.insert(item.position, item),
                ItemKind::Override => collection.override_items.insert(item.position, item),
            };
        }
        collection
    }

    /// Returns whether this collection is manual or dynamic.
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Returns the dynamic query, if any.
    pub fn query(&self) -> Option<&Q> {
        self.query.as_ref()
    }

    /// Returns the manual item at the position, if any.
    pub fn manual_item(&self, position: usize) -> Option<&Item> {
        self.manual_items.get(&position)
    }

    /// Returns the override item at the position, if any.
    pub fn override_item(&self, position: usize) -> Option<&Item> {
        self.override_items.get(&position)
    }

    /// Iterates manual items in ascending position order.
    pub fn manual_items(&self) -> impl Iterator<Item = &Item> {
        self.manual_items.values()
    }

    /// Returns all items sorted by position, manual before override at the
    /// same position.
    pub fn items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self
            .manual_items
            .values()
            .chain(self.override_items.values())
            .collect();
        items.sort_by_key(|item| (item.position, item.kind));
        items
    }

    /// Returns the number of manual items.
    pub fn manual_item_count(&self) -> usize {
        self.manual_items.len()
    }
}

/// Executes a collection's dynamic query.
///
/// `run` is called once per result window with an already adjusted
/// offset/limit; it returns the window's values in the query's own order.
/// A fresh call re-executes the query from scratch — the engine never
/// assumes the stream is restartable.
pub trait QueryRunner<Q>: Send + Sync {
    /// The external value type the query yields (a CMS item handle).
    type Value;

    /// Runs the query for one window and returns its values, lazily.
    fn run<'a>(
        &'a self,
        query: &'a Q,
        offset: usize,
        limit: usize,
    ) -> Box<dyn Iterator<Item = Self::Value> + 'a>;

    /// Returns the total number of values the query can produce.
    fn count(&self, query: &Q) -> usize;
}

/// Loads the external value an item references.
///
/// The single `load` call doubles as the validity check: `None` means the
/// reference is missing or invisible, and the item is treated as invalid.
pub trait ValueLoader: Send + Sync {
    /// The external value type (shared with the query runner's values).
    type Value;

    /// Loads a visible value by id and type, or `None`.
    fn load(&self, value_id: &Value, value_type: &str) -> Option<Self::Value>;
}
