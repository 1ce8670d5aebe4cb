//! Pull-based iterators over collection results.
//!
//! The merge iterator is the heart of the dynamic runner: it walks the
//! window position by position, layering override items, manual items and
//! the query stream. It is an explicit [`Iterator`] implementation — the
//! caller drives by pulling, and simply dropping the iterator releases the
//! stream.

use log::trace;

use super::result::{ResultKind, SlotResult};
use super::types::{Collection, Item, ValueLoader};

/// Merges override items, manual items and the dynamic query stream into a
/// position-ordered result sequence.
///
/// Precedence per position: override item, then manual item, then the query
/// stream. Iteration stops — not merely skips — once the stream is dry and
/// no item covers the current position, since that signals the end of
/// available data. Results come out strictly ascending by position.
pub struct ResultIterator<'a, Q, V, I: Iterator<Item = V>> {
    collection: &'a Collection<Q>,
    loader: &'a dyn ValueLoader<Value = V>,
    query_iter: I,
    position: usize,
    end: usize,
    done: bool,
}

impl<'a, Q, V, I: Iterator<Item = V>> ResultIterator<'a, Q, V, I> {
    pub(super) fn new(
        collection: &'a Collection<Q>,
        loader: &'a dyn ValueLoader<Value = V>,
        query_iter: I,
        offset: usize,
        limit: usize,
    ) -> Self {
        Self {
            collection,
            loader,
            query_iter,
            position: offset,
            end: offset + limit,
            done: false,
        }
    }

    fn load(&self, item: &Item) -> Option<V> {
        self.loader.load(&item.value_id, &item.value_type)
    }

    /// Override items always cover the dynamic slot at their position: one
    /// stream value is consumed whether or not the override is valid. A
    /// valid override retains the covered value as backup; an invalid one
    /// falls through to it.
    fn override_result(&mut self, item: Item) -> Option<SlotResult<V>> {
        let position = item.position;
        let loaded = self.load(&item);
        let query_value = self.query_iter.next();

        match loaded {
            Some(value) => Some(SlotResult {
                position,
                kind: ResultKind::Override,
                value: Some(value),
                collection_item: Some(item),
                backup_value: query_value,
            }),
            None => query_value.map(|value| SlotResult {
                position,
                kind: ResultKind::Dynamic,
                value: Some(value),
                collection_item: Some(item),
                backup_value: None,
            }),
        }
    }

    /// Manual items consume no dynamic slot — the query window already
    /// excluded them. Only an invalid manual item falls through to the
    /// stream, and that replacement does advance it.
    fn manual_result(&mut self, item: Item) -> Option<SlotResult<V>> {
        let position = item.position;

        match self.load(&item) {
            Some(value) => Some(SlotResult {
                position,
                kind: ResultKind::Manual,
                value: Some(value),
                collection_item: Some(item),
                backup_value: None,
            }),
            None => self.query_iter.next().map(|value| SlotResult {
                position,
                kind: ResultKind::Dynamic,
                value: Some(value),
                collection_item: Some(item),
                backup_value: None,
            }),
        }
    }
}

impl<Q, V, I: Iterator<Item = V>> Iterator for ResultIterator<'_, Q, V, I> {
    type Item = SlotResult<V>;

    fn next(&mut self) -> Option<SlotResult<V>> {
        if self.done || self.position >= self.end {
            return None;
        }

        let position = self.position;
        self.position += 1;

        let result = if let Some(item) = self.collection.override_item(position) {
            self.override_result(item.clone())
        } else if let Some(item) = self.collection.manual_item(position) {
            self.manual_result(item.clone())
        } else {
            self.query_iter.next().map(|value| SlotResult::dynamic(position, value))
        };

        if result.is_none() {
            trace!("query stream exhausted at position {position}, stopping");
            self.done = true;
        }

        result
    }
}

/// Iterates a purely manual collection's items within a window.
///
/// Each in-window item yields exactly one result of kind
/// [`ResultKind::Manual`]; an invalid item surfaces as a null placeholder
/// (`value: None`) rather than vanishing, so slots stay stable while the
/// referenced content is missing.
pub struct ManualResultIterator<'a, V> {
    items: std::vec::IntoIter<&'a Item>,
    loader: &'a dyn ValueLoader<Value = V>,
}

impl<'a, V> ManualResultIterator<'a, V> {
    pub(super) fn new<Q>(
        collection: &'a Collection<Q>,
        loader: &'a dyn ValueLoader<Value = V>,
        offset: usize,
        limit: usize,
    ) -> Self {
        let end = offset + limit;
        let items: Vec<&Item> = collection
            .manual_items()
            .filter(|item| item.position >= offset && item.position < end)
            .collect();

        Self {
            items: items.into_iter(),
            loader,
        }
    }
}

impl<V> Iterator for ManualResultIterator<'_, V> {
    type Item = SlotResult<V>;

    fn next(&mut self) -> Option<SlotResult<V>> {
        let item = self.items.next()?;

        Some(SlotResult {
            position: item.position,
            kind: ResultKind::Manual,
            value: self.loader.load(&item.value_id, &item.value_type),
            collection_item: Some(item.clone()),
            backup_value: None,
        })
    }
}
