//! Typed column stores for an in-memory relational table.
//!
//! Every store implements [`ColumnStore`]. There are two families, which
//! differ only in how a null is represented:
//!
//! - [`BitmapColumn`] (dense-bitmap family) keeps a primitive `Vec<T>` plus a
//!   [`NullBitmap`]. The native zero doubles as a "maybe null" marker: a
//!   non-zero slot is never null, so the bitmap is only read for zero slots.
//! - [`SentinelColumn`] (nullable-sentinel family) keeps a `Vec` of a native
//!   type that carries its own null, such as [`SqlInt64`] or [`SqlDecimal`].
//!
//! [`ColumnStorage`] wraps one store of each supported type behind a single
//! enum chosen from a [`NativeType`] tag, and [`ColumnSnapshot`] captures and
//! reinstalls a store's backing state for row versioning.
//!
//! Stores do no internal locking. Mutation (`set`, `copy`, `set_capacity`,
//! `set_storage`) needs `&mut self`; readers may share `&self` only while no
//! mutation is in flight.
//!
//! [`SqlInt64`]: colstore_types::SqlInt64
//! [`SqlDecimal`]: colstore_types::SqlDecimal

#![forbid(unsafe_code)]

pub mod bitmap;
pub mod config;
pub mod dense;
pub mod sentinel;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use bitmap::NullBitmap;
pub use colstore_aggregate::{AggregateKind, AggregateOutcome};
pub use colstore_result::{Error, Result};
pub use colstore_types::{NativeType, Value};
pub use config::ColumnStoreConfig;
pub use dense::{BitmapColumn, BooleanColumn, DenseNative, Int32Column, Int64Column};
pub use sentinel::{SentinelColumn, SentinelNative, SqlDecimalColumn, SqlInt64Column};
pub use snapshot::ColumnSnapshot;
pub use storage::ColumnStorage;
pub use store::ColumnStore;
