//! Packed one-bit-per-row null bitmap. A set bit means the row is null.

use std::cmp::Ordering;

use arrow_buffer::bit_util;

#[derive(Debug, Clone, Default)]
pub struct NullBitmap {
    bits: Vec<u8>,
    len: usize,
}

impl NullBitmap {
    /// Bitmap of `len` rows, all null.
    pub fn new_null(len: usize) -> Self {
        let mut bitmap = Self::default();
        bitmap.resize(len);
        bitmap
    }

    /// Bitmap of `len` rows, none null.
    pub fn new_valid(len: usize) -> Self {
        Self {
            bits: vec![0; bit_util::ceil(len, 8)],
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Callers guarantee `row < len()`.
    #[inline]
    pub fn is_null(&self, row: usize) -> bool {
        debug_assert!(row < self.len, "row {row} beyond bitmap length {}", self.len);
        bit_util::get_bit(&self.bits, row)
    }

    /// Callers guarantee `row < len()`.
    #[inline]
    pub fn set(&mut self, row: usize, null: bool) {
        debug_assert!(row < self.len, "row {row} beyond bitmap length {}", self.len);
        if null {
            bit_util::set_bit(&mut self.bits, row);
        } else {
            bit_util::unset_bit(&mut self.bits, row);
        }
    }

    /// Grow or shrink to `len` rows. Surviving rows keep their bits; new rows
    /// start out null.
    pub fn resize(&mut self, len: usize) {
        let old = self.len;
        self.bits.resize(bit_util::ceil(len, 8), 0);
        // Bytes kept from a previous shrink may hold stale bits past `old`.
        for row in old..len {
            bit_util::set_bit(&mut self.bits, row);
        }
        self.len = len;
    }

    pub fn null_count(&self) -> usize {
        (0..self.len).filter(|&row| self.is_null(row)).count()
    }

    /// Order two rows by nullness alone: null before non-null, and two rows
    /// with the same nullness compare equal.
    #[inline]
    pub fn compare(&self, a: usize, b: usize) -> Ordering {
        // `false < true`, and a null row must sort first.
        self.is_null(b).cmp(&self.is_null(a))
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|row| self.is_null(row))
    }
}

impl PartialEq for NullBitmap {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for NullBitmap {}

impl FromIterator<bool> for NullBitmap {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bitmap = NullBitmap::default();
        for (row, null) in iter.into_iter().enumerate() {
            bitmap.resize(row + 1);
            bitmap.set(row, null);
        }
        bitmap
    }
}
