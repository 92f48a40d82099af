//! colstore: typed in-memory column stores
//!
//! This crate is the entrypoint for the colstore workspace. It re-exports the
//! column stores, the aggregate engine and the value types from the underlying
//! `colstore-*` crates behind one API surface.
//!
//! # Quick Start
//!
//! Build an `Int32` column, fill it, and aggregate over a row set:
//!
//! ```rust
//! use colstore::{AggregateKind, AggregateOutcome, ColumnStore, Int32Column, Value};
//!
//! let mut column = Int32Column::new();
//! column.set_capacity(3);
//! column.set(0, &Value::Int32(5)).unwrap();
//! column.set(2, &Value::Int32(10)).unwrap();
//!
//! let sum = column.aggregate(&[0, 1, 2], AggregateKind::Sum).unwrap();
//! assert_eq!(sum, AggregateOutcome::Value(Value::Int32(15)));
//! ```
//!
//! # Architecture
//!
//! - **Values** (`colstore-types`): native types, the SQL nullable types,
//!   decimals, the external [`Value`] boundary, coercion and XML text.
//! - **Aggregates** (`colstore-aggregate`): [`AggregateKind`] and the
//!   widened, overflow-checked accumulators.
//! - **Stores** (`colstore-column-map`): the [`ColumnStore`] contract, the
//!   dense-bitmap and nullable-sentinel families, runtime-typed
//!   [`ColumnStorage`] and [`ColumnSnapshot`].
//! - **Errors** (`colstore-result`): the shared [`Error`] and [`Result`].

pub use colstore_column_map::{
    BitmapColumn, BooleanColumn, ColumnSnapshot, ColumnStorage, ColumnStore, ColumnStoreConfig,
    DenseNative, Int32Column, Int64Column, NullBitmap, SentinelColumn, SentinelNative,
    SqlDecimalColumn, SqlInt64Column,
};

pub use colstore_aggregate::{AggregateKind, AggregateOutcome};

pub use colstore_types::{Decimal, NativeType, SqlDecimal, SqlInt64, Value, XML_NIL};

// Re-export result types for error handling
pub use colstore_result::{Error, Result};
