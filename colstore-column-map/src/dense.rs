//! Dense-bitmap store family.
//!
//! A primitive buffer plus a [`NullBitmap`]. Writing a null stores the native
//! zero and sets the row's bit, so a non-zero slot is always non-null and the
//! bitmap only has to be consulted when the slot holds zero.

use std::cmp::Ordering;
use std::fmt;

use colstore_aggregate::{AggregateKind, AggregateNative, AggregateOutcome};
use colstore_result::{Error, Result};
use colstore_types::{Coerce, NativeType, Value, XmlText};

use crate::bitmap::NullBitmap;
use crate::config::ColumnStoreConfig;
use crate::store::{ColumnStore, check_dest, check_row};

/// Native types stored with a separate null bitmap.
///
/// `Default::default()` must be the type's zero, the value written for a null.
pub trait DenseNative: AggregateNative + Coerce + XmlText + Default + fmt::Debug {
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::default()
    }
}

impl DenseNative for bool {}
impl DenseNative for i32 {}
impl DenseNative for i64 {}

pub type BooleanColumn = BitmapColumn<bool>;
pub type Int32Column = BitmapColumn<i32>;
pub type Int64Column = BitmapColumn<i64>;

#[derive(Debug, Clone)]
pub struct BitmapColumn<T: DenseNative> {
    values: Vec<T>,
    nulls: NullBitmap,
    config: ColumnStoreConfig,
}

impl<T: DenseNative> Default for BitmapColumn<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DenseNative> BitmapColumn<T> {
    const NATIVE: NativeType = <T as AggregateNative>::NATIVE_TYPE;

    /// Empty store (capacity 0) with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ColumnStoreConfig::default())
    }

    pub fn with_config(config: ColumnStoreConfig) -> Self {
        Self {
            values: Vec::new(),
            nulls: NullBitmap::default(),
            config,
        }
    }

    /// The shared null bitmap.
    pub fn nulls(&self) -> &NullBitmap {
        &self.nulls
    }

    /// Null test for an in-range row.
    #[inline]
    fn is_null_at(&self, row: usize) -> bool {
        if self.config.zero_sentinel_fast_path && !self.values[row].is_zero() {
            return false;
        }
        self.nulls.is_null(row)
    }

    #[inline]
    fn read(&self, row: usize) -> Option<T> {
        if self.is_null_at(row) {
            None
        } else {
            Some(self.values[row])
        }
    }

    #[inline]
    fn write(&mut self, row: usize, value: Option<T>) {
        match value {
            Some(v) => {
                self.values[row] = v;
                self.nulls.set(row, false);
            }
            None => {
                self.values[row] = T::default();
                self.nulls.set(row, true);
            }
        }
    }
}

impl<T: DenseNative> ColumnStore for BitmapColumn<T> {
    type Native = T;

    fn native_type(&self) -> NativeType {
        Self::NATIVE
    }

    fn capacity(&self) -> usize {
        self.values.len()
    }

    fn is_null(&self, row: usize) -> Result<bool> {
        check_row(row, self.capacity())?;
        Ok(self.is_null_at(row))
    }

    fn get(&self, row: usize) -> Result<Value> {
        check_row(row, self.capacity())?;
        Ok(self.read(row).map_or(Value::Null, Into::into))
    }

    fn set(&mut self, row: usize, value: &Value) -> Result<()> {
        check_row(row, self.capacity())?;
        let value = T::coerce(value)?;
        self.write(row, value);
        Ok(())
    }

    fn compare(&self, row_a: usize, row_b: usize) -> Result<Ordering> {
        check_row(row_a, self.capacity())?;
        check_row(row_b, self.capacity())?;
        let (a, b) = (self.values[row_a], self.values[row_b]);
        // Only a zero slot can be null.
        if !self.config.zero_sentinel_fast_path || a.is_zero() || b.is_zero() {
            let by_nullness = self.nulls.compare(row_a, row_b);
            if by_nullness != Ordering::Equal {
                return Ok(by_nullness);
            }
        }
        Ok(a.cmp(&b))
    }

    fn compare_value_to(&self, row: usize, value: &Value) -> Result<Ordering> {
        check_row(row, self.capacity())?;
        let other = T::coerce(value)?;
        Ok(match (self.read(row), other) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(&b),
        })
    }

    fn convert_value(&self, value: &Value) -> Result<Value> {
        Ok(T::coerce(value)?.map_or(Value::Null, Into::into))
    }

    fn copy(&mut self, src_row: usize, dst_row: usize) -> Result<()> {
        check_row(src_row, self.capacity())?;
        check_row(dst_row, self.capacity())?;
        let value = self.read(src_row);
        self.write(dst_row, value);
        Ok(())
    }

    fn set_capacity(&mut self, capacity: usize) {
        tracing::trace!(
            native_type = %Self::NATIVE,
            old = self.values.len(),
            new = capacity,
            "resizing dense column"
        );
        self.values.resize(capacity, T::default());
        self.nulls.resize(capacity);
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
        T::coerce(value)?
            .map(|v| v.to_xml_text())
            .ok_or_else(|| Error::type_conversion(value.type_name(), Self::NATIVE.name()))
    }

    fn empty_storage(&self, len: usize) -> (Vec<T>, NullBitmap) {
        (vec![T::default(); len], NullBitmap::new_null(len))
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
        dest[dest_index] = self.values[row];
        dest_nulls.set(dest_index, self.is_null_at(row));
        Ok(())
    }

    fn set_storage(&mut self, mut values: Vec<T>, nulls: NullBitmap) -> Result<()> {
        if values.len() != nulls.len() {
            return Err(Error::invalid_argument(format!(
                "null bitmap length {} does not match buffer length {}",
                nulls.len(),
                values.len()
            )));
        }
        // A null slot must hold zero or the fast path would report it non-null.
        for (row, value) in values.iter_mut().enumerate() {
            if nulls.is_null(row) {
                *value = T::default();
            }
        }
        tracing::debug!(
            native_type = %Self::NATIVE,
            len = values.len(),
            null_count = nulls.null_count(),
            "installing dense column storage"
        );
        self.values = values;
        self.nulls = nulls;
        Ok(())
    }
}
