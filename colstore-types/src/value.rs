use crate::decimal::Decimal;
use crate::sql::{SqlDecimal, SqlInt64};

/// A generic value crossing the store boundary.
///
/// Stores accept any variant in `set`/`convert_value` and coerce it to their
/// native type; `get` hands back the variant matching the native type, or
/// [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Utf8(String),
    SqlInt64(SqlInt64),
    SqlDecimal(SqlDecimal),
}

impl Value {
    /// Name of the variant, used as the source type in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Int8(_) => "Int8",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::UInt8(_) => "UInt8",
            Value::UInt16(_) => "UInt16",
            Value::UInt32(_) => "UInt32",
            Value::UInt64(_) => "UInt64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::Decimal(_) => "Decimal",
            Value::Utf8(_) => "Utf8",
            Value::SqlInt64(_) => "SqlInt64",
            Value::SqlDecimal(_) => "SqlDecimal",
        }
    }

    /// True for [`Value::Null`] and for `Sql*` payloads holding their null.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::SqlInt64(v) => v.is_null(),
            Value::SqlDecimal(v) => v.is_null(),
            _ => false,
        }
    }

    /// Integral payload widened to `i128`, if the variant is an integer.
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Value::Int8(v) => Some(v.into()),
            Value::Int16(v) => Some(v.into()),
            Value::Int32(v) => Some(v.into()),
            Value::Int64(v) => Some(v.into()),
            Value::UInt8(v) => Some(v.into()),
            Value::UInt16(v) => Some(v.into()),
            Value::UInt32(v) => Some(v.into()),
            Value::UInt64(v) => Some(v.into()),
            Value::SqlInt64(v) => v.value().map(i128::from),
            _ => None,
        }
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_value_from!(
    bool => Boolean,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    Decimal => Decimal,
    String => Utf8,
    SqlInt64 => SqlInt64,
    SqlDecimal => SqlDecimal,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
