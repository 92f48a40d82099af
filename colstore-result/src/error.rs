use std::fmt;
use thiserror::Error;

/// Unified error type for all colstore operations.
///
/// Native types and aggregate kinds are carried as their static display names
/// (`"Int32"`, `"SqlDecimal"`, `"StDev"`, ...) so this crate stays at the bottom
/// of the dependency graph.
///
/// # Thread Safety
///
/// `Error` implements `Send` and `Sync`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Numeric overflow while accumulating a Sum or Mean.
    ///
    /// Raised by checked arithmetic, either while adding into the widened
    /// accumulator or when narrowing the final total back to the column's
    /// native type. Values never wrap silently.
    #[error("arithmetic overflow: aggregate result does not fit in {native_type}")]
    Overflow { native_type: &'static str },

    /// A value handed to `set`/`convert_value` cannot be represented in the
    /// store's native type.
    ///
    /// `from` names the source value's type and `to` the store's native type.
    #[error("cannot convert value of type {from} to {to}")]
    TypeConversion { from: &'static str, to: &'static str },

    /// The store does not know how to compute the requested aggregate.
    ///
    /// For example `Sum` over a `Boolean` column.
    #[error("aggregate {kind} is not supported for {native_type} columns")]
    UnsupportedAggregate {
        kind: &'static str,
        native_type: &'static str,
    },

    /// Row index at or beyond the store's capacity.
    ///
    /// This is a caller bug; the store performs no recovery.
    #[error("row index {index} out of range for capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    /// XML text that is not a valid rendering of the native type.
    #[error("invalid XML text {text:?} for {native_type}")]
    InvalidXml {
        text: String,
        native_type: &'static str,
    },

    /// Invalid caller input, such as a snapshot whose null bitmap does not
    /// match its value buffer.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// Internal error indicating a bug or unexpected state.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create an overflow error naming the column's native type.
    ///
    /// # Examples
    ///
    /// ```
    /// use colstore_result::Error;
    ///
    /// let err = Error::overflow("Int32");
    /// assert!(err.to_string().contains("Int32"));
    /// ```
    #[inline]
    pub fn overflow(native_type: &'static str) -> Self {
        Error::Overflow { native_type }
    }

    /// Create a type conversion error from the source and target type names.
    ///
    /// # Examples
    ///
    /// ```
    /// use colstore_result::Error;
    ///
    /// let err = Error::type_conversion("Utf8", "Int64");
    /// assert!(matches!(err, Error::TypeConversion { from: "Utf8", to: "Int64" }));
    /// ```
    #[inline]
    pub fn type_conversion(from: &'static str, to: &'static str) -> Self {
        Error::TypeConversion { from, to }
    }

    /// Create an unsupported aggregate error.
    #[inline]
    pub fn unsupported_aggregate(kind: &'static str, native_type: &'static str) -> Self {
        Error::UnsupportedAggregate { kind, native_type }
    }

    /// Create an index error for `index` against the store's `capacity`.
    #[inline]
    pub fn index_out_of_range(index: usize, capacity: usize) -> Self {
        Error::IndexOutOfRange { index, capacity }
    }

    /// Create an XML parse error, keeping the offending text.
    #[inline]
    pub fn invalid_xml(text: impl Into<String>, native_type: &'static str) -> Self {
        Error::InvalidXml {
            text: text.into(),
            native_type,
        }
    }

    /// Create an invalid argument error from any displayable value.
    ///
    /// # Examples
    ///
    /// ```
    /// use colstore_result::Error;
    ///
    /// let err = Error::invalid_argument("bitmap length 3 does not match buffer length 4");
    /// assert!(matches!(err, Error::InvalidArgumentError(msg) if msg.contains("bitmap")));
    /// ```
    #[inline]
    pub fn invalid_argument<E: fmt::Display>(err: E) -> Self {
        Error::InvalidArgumentError(err.to_string())
    }
}
