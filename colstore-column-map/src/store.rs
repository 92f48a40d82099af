use std::cmp::Ordering;

use colstore_aggregate::{AggregateKind, AggregateOutcome};
use colstore_result::{Error, Result};
use colstore_types::{NativeType, Value};

use crate::bitmap::NullBitmap;

/// Contract shared by every concrete column store.
///
/// Row indices are zero-based and valid while `row < capacity()`; an index at
/// or past the capacity fails with [`Error::IndexOutOfRange`]. Ordering is
/// total with null sorting lowest.
///
/// `get` reports a null row as [`Value::Null`]. Stores whose native type
/// carries its own null hand that null back from `convert_value` and
/// `convert_xml_to_object` as the native variant (for example
/// `Value::SqlInt64(SqlInt64::NULL)`); [`Value::is_null`] is true for both.
pub trait ColumnStore {
    /// Element type of the backing buffer exchanged by
    /// [`copy_value`](Self::copy_value) and [`set_storage`](Self::set_storage).
    type Native: Copy;

    fn native_type(&self) -> NativeType;

    /// Allocated row count. The backing buffer (and bitmap, if any) always
    /// has exactly this length.
    fn capacity(&self) -> usize;

    fn is_null(&self, row: usize) -> Result<bool>;

    fn get(&self, row: usize) -> Result<Value>;

    /// Coerce `value` and store it at `row`, replacing whatever was there.
    /// On a conversion error the row is left untouched.
    fn set(&mut self, row: usize, value: &Value) -> Result<()>;

    fn compare(&self, row_a: usize, row_b: usize) -> Result<Ordering>;

    /// Compare the value at `row` with an external value, using the same
    /// order as [`compare`](Self::compare).
    fn compare_value_to(&self, row: usize, value: &Value) -> Result<Ordering>;

    /// Coerce an arbitrary external value to the native type.
    fn convert_value(&self, value: &Value) -> Result<Value>;

    /// Copy value and nullness from `src_row` to `dst_row`.
    fn copy(&mut self, src_row: usize, dst_row: usize) -> Result<()>;

    /// Resize to `capacity` rows. Rows below `min(old, new)` are preserved,
    /// rows past the new capacity are discarded, new rows start out null.
    fn set_capacity(&mut self, capacity: usize);

    /// Fold the values at `rows` (any order, duplicates allowed).
    fn aggregate(&self, rows: &[usize], kind: AggregateKind) -> Result<AggregateOutcome>;

    fn convert_xml_to_object(&self, text: &str) -> Result<Value>;

    fn convert_object_to_xml(&self, value: &Value) -> Result<String>;

    /// A zeroed buffer and an all-null bitmap of `len` rows, shaped for
    /// [`copy_value`](Self::copy_value) targets.
    fn empty_storage(&self, len: usize) -> (Vec<Self::Native>, NullBitmap);

    /// Write the native value at `row` into `dest[dest_index]` and its
    /// nullness into `dest_nulls`.
    fn copy_value(
        &self,
        row: usize,
        dest: &mut [Self::Native],
        dest_nulls: &mut NullBitmap,
        dest_index: usize,
    ) -> Result<()>;

    /// Install `values` as the entire backing buffer. The capacity becomes
    /// `values.len()`.
    fn set_storage(&mut self, values: Vec<Self::Native>, nulls: NullBitmap) -> Result<()>;
}

#[inline]
pub(crate) fn check_row(row: usize, capacity: usize) -> Result<()> {
    if row < capacity {
        Ok(())
    } else {
        Err(Error::index_out_of_range(row, capacity))
    }
}

/// Bounds check for a `copy_value` destination slot.
#[inline]
pub(crate) fn check_dest<T>(dest: &[T], dest_nulls: &NullBitmap, dest_index: usize) -> Result<()> {
    check_row(dest_index, dest.len().min(dest_nulls.len()))
}
