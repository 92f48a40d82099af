//! Runtime-typed column storage.
//!
//! [`ColumnStorage`] picks the concrete store for a [`NativeType`] chosen at
//! run time and forwards the value-level operations to it. Buffer-level
//! operations (`copy_value`, `set_storage`) need the concrete native type and
//! go through the typed accessors instead.

use std::cmp::Ordering;

use colstore_aggregate::{AggregateKind, AggregateOutcome};
use colstore_result::Result;
use colstore_types::{NativeType, Value};

use crate::config::ColumnStoreConfig;
use crate::dense::{BooleanColumn, Int32Column, Int64Column};
use crate::sentinel::{SqlDecimalColumn, SqlInt64Column};
use crate::store::ColumnStore;

#[derive(Debug, Clone)]
pub enum ColumnStorage {
    Boolean(BooleanColumn),
    Int32(Int32Column),
    Int64(Int64Column),
    SqlInt64(SqlInt64Column),
    SqlDecimal(SqlDecimalColumn),
}

macro_rules! dispatch {
    ($self:expr, $column:ident => $body:expr) => {
        match $self {
            ColumnStorage::Boolean($column) => $body,
            ColumnStorage::Int32($column) => $body,
            ColumnStorage::Int64($column) => $body,
            ColumnStorage::SqlInt64($column) => $body,
            ColumnStorage::SqlDecimal($column) => $body,
        }
    };
}

impl ColumnStorage {
    /// Empty store (capacity 0) for `native_type`. The configuration only
    /// affects the dense-bitmap family.
    pub fn for_type(native_type: NativeType, config: &ColumnStoreConfig) -> Self {
        match native_type {
            NativeType::Boolean => ColumnStorage::Boolean(BooleanColumn::with_config(*config)),
            NativeType::Int32 => ColumnStorage::Int32(Int32Column::with_config(*config)),
            NativeType::Int64 => ColumnStorage::Int64(Int64Column::with_config(*config)),
            NativeType::SqlInt64 => ColumnStorage::SqlInt64(SqlInt64Column::new()),
            NativeType::SqlDecimal => ColumnStorage::SqlDecimal(SqlDecimalColumn::new()),
        }
    }

    pub fn native_type(&self) -> NativeType {
        dispatch!(self, c => c.native_type())
    }

    pub fn capacity(&self) -> usize {
        dispatch!(self, c => c.capacity())
    }

    pub fn is_null(&self, row: usize) -> Result<bool> {
        dispatch!(self, c => c.is_null(row))
    }

    pub fn get(&self, row: usize) -> Result<Value> {
        dispatch!(self, c => c.get(row))
    }

    pub fn set(&mut self, row: usize, value: &Value) -> Result<()> {
        dispatch!(self, c => c.set(row, value))
    }

    pub fn compare(&self, row_a: usize, row_b: usize) -> Result<Ordering> {
        dispatch!(self, c => c.compare(row_a, row_b))
    }

    pub fn compare_value_to(&self, row: usize, value: &Value) -> Result<Ordering> {
        dispatch!(self, c => c.compare_value_to(row, value))
    }

    pub fn convert_value(&self, value: &Value) -> Result<Value> {
        dispatch!(self, c => c.convert_value(value))
    }

    pub fn copy(&mut self, src_row: usize, dst_row: usize) -> Result<()> {
        dispatch!(self, c => c.copy(src_row, dst_row))
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        dispatch!(self, c => c.set_capacity(capacity))
    }

    pub fn aggregate(&self, rows: &[usize], kind: AggregateKind) -> Result<AggregateOutcome> {
        dispatch!(self, c => c.aggregate(rows, kind))
    }

    pub fn convert_xml_to_object(&self, text: &str) -> Result<Value> {
        dispatch!(self, c => c.convert_xml_to_object(text))
    }

    pub fn convert_object_to_xml(&self, value: &Value) -> Result<String> {
        dispatch!(self, c => c.convert_object_to_xml(value))
    }

    pub fn as_int32(&self) -> Option<&Int32Column> {
        match self {
            ColumnStorage::Int32(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_int32_mut(&mut self) -> Option<&mut Int32Column> {
        match self {
            ColumnStorage::Int32(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_int64(&self) -> Option<&Int64Column> {
        match self {
            ColumnStorage::Int64(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_int64_mut(&mut self) -> Option<&mut Int64Column> {
        match self {
            ColumnStorage::Int64(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<&BooleanColumn> {
        match self {
            ColumnStorage::Boolean(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_boolean_mut(&mut self) -> Option<&mut BooleanColumn> {
        match self {
            ColumnStorage::Boolean(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_sql_int64(&self) -> Option<&SqlInt64Column> {
        match self {
            ColumnStorage::SqlInt64(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_sql_int64_mut(&mut self) -> Option<&mut SqlInt64Column> {
        match self {
            ColumnStorage::SqlInt64(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_sql_decimal(&self) -> Option<&SqlDecimalColumn> {
        match self {
            ColumnStorage::SqlDecimal(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_sql_decimal_mut(&mut self) -> Option<&mut SqlDecimalColumn> {
        match self {
            ColumnStorage::SqlDecimal(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Int32Column> for ColumnStorage {
    fn from(column: Int32Column) -> Self {
        ColumnStorage::Int32(column)
    }
}

impl From<Int64Column> for ColumnStorage {
    fn from(column: Int64Column) -> Self {
        ColumnStorage::Int64(column)
    }
}

impl From<BooleanColumn> for ColumnStorage {
    fn from(column: BooleanColumn) -> Self {
        ColumnStorage::Boolean(column)
    }
}

impl From<SqlInt64Column> for ColumnStorage {
    fn from(column: SqlInt64Column) -> Self {
        ColumnStorage::SqlInt64(column)
    }
}

impl From<SqlDecimalColumn> for ColumnStorage {
    fn from(column: SqlDecimalColumn) -> Self {
        ColumnStorage::SqlDecimal(column)
    }
}

#[cfg(test)]
mod tests {
    use colstore_types::SqlInt64;

    use super::*;
    use crate::snapshot::ColumnSnapshot;

    #[test]
    fn for_type_builds_every_native_type() {
        let config = ColumnStoreConfig::default();
        for native_type in NativeType::ALL {
            let mut storage = ColumnStorage::for_type(native_type, &config);
            assert_eq!(storage.native_type(), native_type);
            assert_eq!(storage.capacity(), 0);
            storage.set_capacity(3);
            assert_eq!(storage.capacity(), 3);
            assert_eq!(storage.get(2).unwrap(), Value::Null);
        }
    }

    #[test]
    fn typed_accessors_match_variant() {
        let storage = ColumnStorage::for_type(NativeType::Int64, &ColumnStoreConfig::default());
        assert!(storage.as_int64().is_some());
        assert!(storage.as_int32().is_none());
        assert!(storage.as_sql_decimal().is_none());
    }

    fn matching_accessors(storage: &mut ColumnStorage) -> (usize, usize) {
        let shared = [
            storage.as_boolean().is_some(),
            storage.as_int32().is_some(),
            storage.as_int64().is_some(),
            storage.as_sql_int64().is_some(),
            storage.as_sql_decimal().is_some(),
        ];
        let exclusive = [
            storage.as_boolean_mut().is_some(),
            storage.as_int32_mut().is_some(),
            storage.as_int64_mut().is_some(),
            storage.as_sql_int64_mut().is_some(),
            storage.as_sql_decimal_mut().is_some(),
        ];
        (
            shared.iter().filter(|&&m| m).count(),
            exclusive.iter().filter(|&&m| m).count(),
        )
    }

    #[test]
    fn exactly_one_accessor_matches_each_variant() {
        let config = ColumnStoreConfig::default();
        for native_type in NativeType::ALL {
            let mut storage = ColumnStorage::for_type(native_type, &config);
            assert_eq!(matching_accessors(&mut storage), (1, 1), "{native_type}");
        }
    }

    #[test]
    fn from_wraps_typed_columns() {
        let wrapped = [
            ColumnStorage::from(BooleanColumn::new()),
            ColumnStorage::from(Int32Column::new()),
            ColumnStorage::from(Int64Column::new()),
            ColumnStorage::from(SqlInt64Column::new()),
            ColumnStorage::from(SqlDecimalColumn::new()),
        ];
        let types: Vec<NativeType> = wrapped.iter().map(ColumnStorage::native_type).collect();
        assert_eq!(types, NativeType::ALL);
    }

    #[test]
    fn snapshot_round_trips_through_typed_accessors() {
        let mut storage = ColumnStorage::for_type(NativeType::SqlInt64, &ColumnStoreConfig::default());
        storage.set_capacity(2);
        storage.set(1, &Value::Int32(6)).unwrap();

        let column = storage.as_sql_int64().unwrap();
        let snapshot = ColumnSnapshot::capture(column, &[1, 0]).unwrap();
        let column = storage.as_sql_int64_mut().unwrap();
        snapshot.restore(column).unwrap();

        assert_eq!(storage.get(0).unwrap(), Value::SqlInt64(SqlInt64::new(6)));
        assert_eq!(storage.get(1).unwrap(), Value::Null);
    }

    #[test]
    fn forwards_copy_and_compare_value_to() {
        let mut storage = ColumnStorage::for_type(NativeType::Int64, &ColumnStoreConfig::default());
        storage.set_capacity(3);
        storage.set(0, &Value::Int64(-9)).unwrap();

        storage.copy(0, 2).unwrap();
        storage.copy(1, 0).unwrap();
        assert_eq!(storage.get(0).unwrap(), Value::Null);
        assert_eq!(storage.get(2).unwrap(), Value::Int64(-9));

        assert_eq!(storage.compare_value_to(0, &Value::Int64(i64::MIN)).unwrap(), Ordering::Less);
        assert_eq!(storage.compare_value_to(2, &Value::Int32(-9)).unwrap(), Ordering::Equal);
        assert_eq!(storage.compare_value_to(2, &Value::Null).unwrap(), Ordering::Greater);
        assert!(storage.is_null(1).unwrap());
    }

    #[test]
    fn forwards_aggregates() {
        let mut storage = ColumnStorage::for_type(NativeType::Int32, &ColumnStoreConfig::default());
        storage.set_capacity(3);
        storage.set(0, &Value::Int32(5)).unwrap();
        storage.set(2, &Value::Int32(10)).unwrap();
        assert_eq!(
            storage.aggregate(&[0, 1, 2], AggregateKind::Sum).unwrap(),
            AggregateOutcome::Value(Value::Int32(15))
        );
    }
}
