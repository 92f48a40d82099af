//! Captured backing state of a column store.
//!
//! A snapshot copies selected rows out through
//! [`ColumnStore::copy_value`] into a fresh [`ColumnStore::empty_storage`]
//! buffer, and reinstalls them wholesale with [`ColumnStore::set_storage`].
//! Row versioning layers keep these around to roll a column back.

use colstore_result::Result;

use crate::bitmap::NullBitmap;
use crate::store::ColumnStore;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSnapshot<T> {
    values: Vec<T>,
    nulls: NullBitmap,
}

impl<T: Copy> ColumnSnapshot<T> {
    /// Copy `rows` (in the given order) into a new snapshot. Snapshot row `i`
    /// holds store row `rows[i]`.
    pub fn capture<S>(store: &S, rows: &[usize]) -> Result<Self>
    where
        S: ColumnStore<Native = T>,
    {
        let (mut values, mut nulls) = store.empty_storage(rows.len());
        for (dest_index, &row) in rows.iter().enumerate() {
            store.copy_value(row, &mut values, &mut nulls, dest_index)?;
        }
        Ok(Self { values, nulls })
    }

    /// Snapshot every row of `store`.
    pub fn capture_all<S>(store: &S) -> Result<Self>
    where
        S: ColumnStore<Native = T>,
    {
        let rows: Vec<usize> = (0..store.capacity()).collect();
        Self::capture(store, &rows)
    }

    /// Replace the whole backing state of `store` with this snapshot. The
    /// store's capacity becomes the snapshot's length.
    pub fn restore<S>(self, store: &mut S) -> Result<()>
    where
        S: ColumnStore<Native = T>,
    {
        store.set_storage(self.values, self.nulls)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn nulls(&self) -> &NullBitmap {
        &self.nulls
    }
}

#[cfg(test)]
mod tests {
    use colstore_result::Error;
    use colstore_types::{SqlInt64, Value};

    use super::*;
    use crate::dense::Int32Column;
    use crate::sentinel::SqlInt64Column;

    #[test]
    fn capture_and_restore_dense() {
        let mut column = Int32Column::new();
        column.set_capacity(3);
        column.set(0, &Value::Int32(4)).unwrap();
        column.set(2, &Value::Int32(0)).unwrap();

        let snapshot = ColumnSnapshot::capture_all(&column).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.values(), &[4, 0, 0]);
        assert!(snapshot.nulls().is_null(1));
        assert!(!snapshot.nulls().is_null(2));

        column.set(0, &Value::Null).unwrap();
        column.set_capacity(10);
        snapshot.restore(&mut column).unwrap();
        assert_eq!(column.capacity(), 3);
        assert_eq!(column.get(0).unwrap(), Value::Int32(4));
        assert_eq!(column.get(1).unwrap(), Value::Null);
        assert_eq!(column.get(2).unwrap(), Value::Int32(0));
    }

    #[test]
    fn capture_selected_rows_in_order() {
        let mut column = SqlInt64Column::new();
        column.set_capacity(3);
        column.set(0, &Value::Int64(10)).unwrap();
        column.set(2, &Value::Int64(30)).unwrap();

        let snapshot = ColumnSnapshot::capture(&column, &[2, 1, 0, 2]).unwrap();
        assert_eq!(
            snapshot.values(),
            &[
                SqlInt64::new(30),
                SqlInt64::NULL,
                SqlInt64::new(10),
                SqlInt64::new(30)
            ]
        );
        assert_eq!(snapshot.nulls().null_count(), 1);

        let nothing = ColumnSnapshot::capture(&column, &[]).unwrap();
        assert!(nothing.is_empty());
    }

    #[test]
    fn capture_out_of_range_row_fails() {
        let mut column = Int32Column::new();
        column.set_capacity(2);
        assert_eq!(
            ColumnSnapshot::capture(&column, &[0, 2]).unwrap_err(),
            Error::index_out_of_range(2, 2)
        );
    }
}
