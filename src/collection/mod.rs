//! Collection results: positional merge of manual, override and queried items.
//!
//! # Key Components
//!
//! - **Model**: [`Collection`], [`Item`] — read-only snapshots of curated
//!   item sets, keyed by position
//! - **Collaborators**: [`QueryRunner`] (executes the dynamic query),
//!   [`ValueLoader`] (loads and validity-checks referenced values)
//! - **Engines**: [`DynamicCollectionRunner`] (windowed positional merge),
//!   [`ManualCollectionRunner`], [`ResultBuilder`] (materialized windows)
//! - **Output**: [`SlotResult`], [`ResultSet`] — immutable, created on
//!   demand, never persisted
//!
//! # Design
//!
//! The dynamic runner dispatches a single windowed query per run, with the
//! offset/limit adjusted so that positions held by valid manual items
//! consume no dynamic slot. Iteration is pull-based and lazy; dropping the
//! iterator is the only cleanup.

mod iterator;
mod result;
mod runner;
mod types;

pub use iterator::{ManualResultIterator, ResultIterator};
pub use result::{ResultKind, ResultSet, SlotResult};
pub use runner::{DynamicCollectionRunner, ManualCollectionRunner, ResultBuilder};
pub use types::{Collection, CollectionKind, Item, ItemKind, QueryRunner, ValueLoader};
