//! Collection execution engines.

use log::debug;

use super::iterator::{ManualResultIterator, ResultIterator};
use super::result::ResultSet;
use super::types::{Collection, CollectionKind, ItemKind, QueryRunner, ValueLoader};

/// Runs dynamic collections: merges manual items, override items and the
/// query stream into one positionally addressed result sequence.
///
/// The query is dispatched once per window with an adjusted offset/limit
/// that excludes positions satisfied by valid manual items — those consume
/// no dynamic slot, they are inserted into the stream's ordering by
/// position. Override items are not excluded: an override covers (and
/// spends) the dynamic slot at its position.
pub struct DynamicCollectionRunner<R, L> {
    query_runner: R,
    loader: L,
}

impl<R, L: ValueLoader> DynamicCollectionRunner<R, L> {
    /// Creates a runner over the given query runner and value loader.
    pub fn new(query_runner: R, loader: L) -> Self {
        Self {
            query_runner,
            loader,
        }
    }

    /// Runs the collection for the window `[offset, offset + limit)`.
    ///
    /// The returned iterator is lazy but finite, and not restartable — a
    /// fresh call re-executes the query from scratch. Results come out
    /// strictly ascending by position; iteration ends early when the query
    /// stream dries up with no item covering the current position.
    pub fn run<'a, Q>(
        &'a self,
        collection: &'a Collection<Q>,
        offset: usize,
        limit: usize,
    ) -> ResultIterator<'a, Q, L::Value, Box<dyn Iterator<Item = L::Value> + 'a>>
    where
        R: QueryRunner<Q, Value = L::Value>,
    {
        let query_iter = self.query_iterator(collection, offset, limit);
        ResultIterator::new(collection, &self.loader, query_iter, offset, limit)
    }

    /// Returns the total number of results the collection can produce.
    ///
    /// The base is the query's native count. Valid manual items positioned
    /// at or before the running total each extend it by one — items placed
    /// past the running end of the set contribute nothing. Override items do
    /// not extend the count (they cover an existing dynamic slot), except
    /// when positioned exactly at the running total, which is an
    /// append-at-tail and does extend the set.
    pub fn count<Q>(&self, collection: &Collection<Q>) -> usize
    where
        R: QueryRunner<Q, Value = L::Value>,
    {
        let mut total_count = collection
            .query()
            .map(|query| self.query_runner.count(query))
            .unwrap_or(0);

        for item in collection.items() {
            if item.position > total_count {
                break;
            }

            if item.kind != ItemKind::Override || item.position == total_count {
                if self.loader.load(&item.value_id, &item.value_type).is_some() {
                    total_count += 1;
                }
            }
        }

        total_count
    }

    /// Dispatches the single windowed query call for a run.
    ///
    /// The request is issued even when the adjusted limit is zero, matching
    /// the one-batched-call contract of [`QueryRunner::run`].
    fn query_iterator<'a, Q>(
        &'a self,
        collection: &'a Collection<Q>,
        offset: usize,
        limit: usize,
    ) -> Box<dyn Iterator<Item = L::Value> + 'a>
    where
        R: QueryRunner<Q, Value = L::Value>,
    {
        let Some(query) = collection.query() else {
            return Box::new(std::iter::empty());
        };

        let query_offset = offset - self.valid_manual_items_in(collection, 0, offset);
        let query_limit = limit - self.valid_manual_items_in(collection, offset, offset + limit);

        debug!(
            "running collection query with offset {query_offset}, limit {query_limit} \
             (window {offset}+{limit})"
        );

        self.query_runner.run(query, query_offset, query_limit)
    }

    /// Counts valid manual items with positions in `[start, end)`.
    fn valid_manual_items_in<Q>(
        &self,
        collection: &Collection<Q>,
        start: usize,
        end: usize,
    ) -> usize {
        collection
            .manual_items()
            .filter(|item| item.position >= start && item.position < end)
            .filter(|item| self.loader.load(&item.value_id, &item.value_type).is_some())
            .count()
    }
}

/// Runs manual collections: every result comes from a manually placed item.
pub struct ManualCollectionRunner<L> {
    loader: L,
}

impl<L: ValueLoader> ManualCollectionRunner<L> {
    /// Creates a runner over the given value loader.
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Runs the collection for the window `[offset, offset + limit)`.
    ///
    /// Yields one result per in-window item in ascending position order.
    /// Invalid items surface as null placeholders instead of vanishing.
    pub fn run<'a, Q>(
        &'a self,
        collection: &'a Collection<Q>,
        offset: usize,
        limit: usize,
    ) -> ManualResultIterator<'a, L::Value> {
        ManualResultIterator::new(collection, &self.loader, offset, limit)
    }

    /// Returns the total number of results the collection can produce.
    pub fn count<Q>(&self, collection: &Collection<Q>) -> usize {
        collection.manual_item_count()
    }
}

/// Builds materialized result sets, dispatching on the collection kind.
///
/// This is the convenience surface for callers that want a whole window at
/// once plus the total count; callers that want laziness use the runners
/// directly.
pub struct ResultBuilder<R, L> {
    dynamic: DynamicCollectionRunner<R, L>,
    manual: ManualCollectionRunner<L>,
}

impl<R, L: ValueLoader + Clone> ResultBuilder<R, L> {
    /// Creates a builder over the given collaborators.
    pub fn new(query_runner: R, loader: L) -> Self {
        Self {
            dynamic: DynamicCollectionRunner::new(query_runner, loader.clone()),
            manual: ManualCollectionRunner::new(loader),
        }
    }

    /// Materializes the window `[offset, offset + limit)` of the collection.
    pub fn build<Q>(
        &self,
        collection: &Collection<Q>,
        offset: usize,
        limit: usize,
    ) -> ResultSet<L::Value>
    where
        R: QueryRunner<Q, Value = L::Value>,
    {
        let (results, total_count) = match collection.kind() {
            CollectionKind::Manual => (
                self.manual.run(collection, offset, limit).collect(),
                self.manual.count(collection),
            ),
            CollectionKind::Dynamic => (
                self.dynamic.run(collection, offset, limit).collect(),
                self.dynamic.count(collection),
            ),
        };

        ResultSet {
            results,
            total_count,
            offset,
            limit,
        }
    }
}
