//! Nullable-sentinel native types.
//!
//! Each value self-reports whether it is null, so a column of these needs no
//! separate null bitmap. The total order is the type's own: null sorts lowest
//! and two nulls compare equal.

use std::fmt;

use crate::decimal::Decimal;

/// A 64-bit integer that may be SQL-null.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SqlInt64(Option<i64>);

impl SqlInt64 {
    pub const NULL: SqlInt64 = SqlInt64(None);
    pub const MIN_VALUE: SqlInt64 = SqlInt64(Some(i64::MIN));
    pub const MAX_VALUE: SqlInt64 = SqlInt64(Some(i64::MAX));

    #[inline]
    pub const fn new(value: i64) -> Self {
        SqlInt64(Some(value))
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0.is_none()
    }

    /// The payload, or `None` for the null sentinel.
    #[inline]
    pub const fn value(self) -> Option<i64> {
        self.0
    }
}

impl From<i64> for SqlInt64 {
    fn from(value: i64) -> Self {
        SqlInt64::new(value)
    }
}

impl From<Option<i64>> for SqlInt64 {
    fn from(value: Option<i64>) -> Self {
        SqlInt64(value)
    }
}

impl fmt::Display for SqlInt64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("Null"),
        }
    }
}

/// A 38-digit decimal that may be SQL-null.
///
/// Equality is numeric: `2.5 == 2.50`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SqlDecimal(Option<Decimal>);

impl SqlDecimal {
    pub const NULL: SqlDecimal = SqlDecimal(None);
    pub const MIN_VALUE: SqlDecimal = SqlDecimal(Some(Decimal::MIN));
    pub const MAX_VALUE: SqlDecimal = SqlDecimal(Some(Decimal::MAX));

    #[inline]
    pub const fn new(value: Decimal) -> Self {
        SqlDecimal(Some(value))
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0.is_none()
    }

    #[inline]
    pub const fn value(self) -> Option<Decimal> {
        self.0
    }
}

impl From<Decimal> for SqlDecimal {
    fn from(value: Decimal) -> Self {
        SqlDecimal::new(value)
    }
}

impl From<Option<Decimal>> for SqlDecimal {
    fn from(value: Option<Decimal>) -> Self {
        SqlDecimal(value)
    }
}

impl fmt::Display for SqlDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("Null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn null_sorts_lowest() {
        assert!(SqlInt64::NULL < SqlInt64::MIN_VALUE);
        assert_eq!(SqlInt64::NULL.cmp(&SqlInt64::NULL), Ordering::Equal);
        assert!(SqlDecimal::NULL < SqlDecimal::MIN_VALUE);
        assert!(SqlDecimal::MIN_VALUE < SqlDecimal::new(Decimal::ZERO));
    }

    #[test]
    fn decimal_payload_compares_numerically() {
        let a = SqlDecimal::new("2.5".parse().unwrap());
        let b = SqlDecimal::new("2.50".parse().unwrap());
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn default_is_null() {
        assert!(SqlInt64::default().is_null());
        assert!(SqlDecimal::default().is_null());
        assert_eq!(SqlInt64::new(7).value(), Some(7));
    }
}
