//! Nullable-sentinel store family.
//!
//! The native type carries its own null, so the store is a single buffer and
//! ordering is the native type's `Ord`, which already sorts null lowest.

use std::cmp::Ordering;
use std::fmt;

use colstore_aggregate::{AggregateKind, AggregateNative, AggregateOutcome};
use colstore_result::Result;
use colstore_types::{Coerce, NativeType, SqlDecimal, SqlInt64, Value, XmlText};

use crate::bitmap::NullBitmap;
use crate::store::{ColumnStore, check_dest, check_row};

pub trait SentinelNative: AggregateNative + Coerce + XmlText + fmt::Debug {
    const NULL: Self;

    fn is_null(self) -> bool;
}

impl SentinelNative for SqlInt64 {
    const NULL: Self = SqlInt64::NULL;

    #[inline]
    fn is_null(self) -> bool {
        SqlInt64::is_null(self)
    }
}

impl SentinelNative for SqlDecimal {
    const NULL: Self = SqlDecimal::NULL;

    #[inline]
    fn is_null(self) -> bool {
        SqlDecimal::is_null(self)
    }
}

pub type SqlInt64Column = SentinelColumn<SqlInt64>;
pub type SqlDecimalColumn = SentinelColumn<SqlDecimal>;

#[derive(Debug, Clone)]
pub struct SentinelColumn<T: SentinelNative> {
    values: Vec<T>,
}

impl<T: SentinelNative> Default for SentinelColumn<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SentinelNative> SentinelColumn<T> {
    const NATIVE: NativeType = <T as AggregateNative>::NATIVE_TYPE;

    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    #[inline]
    fn read(&self, row: usize) -> Option<T> {
        let value = self.values[row];
        (!value.is_null()).then_some(value)
    }

    fn coerce(value: &Value) -> Result<T> {
        Ok(T::coerce(value)?.unwrap_or(T::NULL))
    }
}

impl<T: SentinelNative> ColumnStore for SentinelColumn<T> {
    type Native = T;

    fn native_type(&self) -> NativeType {
        Self::NATIVE
    }

    fn capacity(&self) -> usize {
        self.values.len()
    }

    fn is_null(&self, row: usize) -> Result<bool> {
        check_row(row, self.capacity())?;
        Ok(self.values[row].is_null())
    }

    fn get(&self, row: usize) -> Result<Value> {
        check_row(row, self.capacity())?;
        Ok(self.read(row).map_or(Value::Null, Into::into))
    }

    fn set(&mut self, row: usize, value: &Value) -> Result<()> {
        check_row(row, self.capacity())?;
        self.values[row] = Self::coerce(value)?;
        Ok(())
    }

    fn compare(&self, row_a: usize, row_b: usize) -> Result<Ordering> {
        check_row(row_a, self.capacity())?;
        check_row(row_b, self.capacity())?;
        Ok(self.values[row_a].cmp(&self.values[row_b]))
    }

    fn compare_value_to(&self, row: usize, value: &Value) -> Result<Ordering> {
        check_row(row, self.capacity())?;
        let other = Self::coerce(value)?;
        Ok(self.values[row].cmp(&other))
    }

    fn convert_value(&self, value: &Value) -> Result<Value> {
        Self::coerce(value).map(Into::into)
    }

    fn copy(&mut self, src_row: usize, dst_row: usize) -> Result<()> {
        check_row(src_row, self.capacity())?;
        check_row(dst_row, self.capacity())?;
        self.values[dst_row] = self.values[src_row];
        Ok(())
    }

    fn set_capacity(&mut self, capacity: usize) {
        tracing::trace!(
            native_type = %Self::NATIVE,
            old = self.values.len(),
            new = capacity,
            "resizing sentinel column"
        );
        self.values.resize(capacity, T::NULL);
    }

    fn aggregate(&self, rows: &[usize], kind: AggregateKind) -> Result<AggregateOutcome> {
        for &row in rows {
            check_row(row, self.capacity())?;
        }
        T::aggregate(kind, rows.iter().map(|&row| self.read(row)))
    }

    fn convert_xml_to_object(&self, text: &str) -> Result<Value> {
        T::from_xml_text(text).map(Into::into)
    }

    fn convert_object_to_xml(&self, value: &Value) -> Result<String> {
        Ok(Self::coerce(value)?.to_xml_text())
    }

    fn empty_storage(&self, len: usize) -> (Vec<T>, NullBitmap) {
        (vec![T::NULL; len], NullBitmap::new_null(len))
    }

    fn copy_value(
        &self,
        row: usize,
        dest: &mut [T],
        dest_nulls: &mut NullBitmap,
        dest_index: usize,
    ) -> Result<()> {
        check_row(row, self.capacity())?;
        check_dest(dest, dest_nulls, dest_index)?;
        let value = self.values[row];
        dest[dest_index] = value;
        dest_nulls.set(dest_index, value.is_null());
        Ok(())
    }

    /// The bitmap is ignored; each value already knows whether it is null.
    fn set_storage(&mut self, values: Vec<T>, _nulls: NullBitmap) -> Result<()> {
        tracing::debug!(
            native_type = %Self::NATIVE,
            len = values.len(),
            "installing sentinel column storage"
        );
        self.values = values;
        Ok(())
    }
}
