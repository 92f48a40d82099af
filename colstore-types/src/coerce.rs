//! Coercion from the external [`Value`] boundary into each native type.
//!
//! Two rule sets exist. Dense-bitmap natives (`bool`, `i32`, `i64`) follow
//! general convertible semantics: text is parsed, floats and decimals are
//! rounded half-to-even, and every numeric is range checked. Nullable-sentinel
//! natives follow SQL conversion semantics: only numeric variants the SQL type
//! can hold exactly are accepted, and `Null` maps to the type's own null.
//!
//! Every rule returns `Ok(None)` for a null input and
//! [`Error::TypeConversion`] for anything the native type cannot represent.

use colstore_result::{Error, Result};

use crate::decimal::Decimal;
use crate::native::NativeType;
use crate::sql::{SqlDecimal, SqlInt64};
use crate::value::Value;

/// Conversion from an external [`Value`] to `Self`.
pub trait Coerce: Sized {
    const NATIVE_TYPE: NativeType;

    /// `Ok(None)` means the input was null.
    fn coerce(value: &Value) -> Result<Option<Self>>;
}

#[inline]
fn conversion_error(value: &Value, to: NativeType) -> Error {
    Error::type_conversion(value.type_name(), to.name())
}

fn float_to_i128(value: f64) -> Option<i128> {
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round_ties_even();
    // i128::MAX as f64 rounds up to 2^127, which is itself out of range.
    if rounded >= i128::MIN as f64 && rounded < i128::MAX as f64 {
        Some(rounded as i128)
    } else {
        None
    }
}

/// Convertible-integer rules shared by the dense integer natives.
fn convertible_integer(value: &Value, to: NativeType) -> Result<Option<i128>> {
    if value.is_null() {
        return Ok(None);
    }
    let widened = match value {
        Value::Boolean(b) => Some(i128::from(*b)),
        Value::Float32(f) => float_to_i128(f64::from(*f)),
        Value::Float64(f) => float_to_i128(*f),
        Value::Decimal(d) => Some(d.round_half_even()),
        Value::SqlDecimal(d) => d.value().map(Decimal::round_half_even),
        Value::Utf8(s) => s.trim().parse::<i128>().ok(),
        other => other.as_i128(),
    };
    widened
        .map(Some)
        .ok_or_else(|| conversion_error(value, to))
}

impl Coerce for i32 {
    const NATIVE_TYPE: NativeType = NativeType::Int32;

    fn coerce(value: &Value) -> Result<Option<Self>> {
        convertible_integer(value, Self::NATIVE_TYPE)?
            .map(|v| i32::try_from(v).map_err(|_| conversion_error(value, Self::NATIVE_TYPE)))
            .transpose()
    }
}

impl Coerce for i64 {
    const NATIVE_TYPE: NativeType = NativeType::Int64;

    fn coerce(value: &Value) -> Result<Option<Self>> {
        convertible_integer(value, Self::NATIVE_TYPE)?
            .map(|v| i64::try_from(v).map_err(|_| conversion_error(value, Self::NATIVE_TYPE)))
            .transpose()
    }
}

impl Coerce for bool {
    const NATIVE_TYPE: NativeType = NativeType::Boolean;

    fn coerce(value: &Value) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }
        let converted = match value {
            Value::Boolean(b) => Some(*b),
            // NaN is "not zero", hence true.
            Value::Float32(f) => Some(*f != 0.0),
            Value::Float64(f) => Some(*f != 0.0),
            Value::Decimal(d) => Some(!d.is_zero()),
            Value::SqlDecimal(d) => d.value().map(|d| !d.is_zero()),
            Value::Utf8(s) => parse_bool(s),
            other => other.as_i128().map(|v| v != 0),
        };
        converted
            .map(Some)
            .ok_or_else(|| conversion_error(value, Self::NATIVE_TYPE))
    }
}

/// Accepts `true`/`false` in any case plus `1`/`0`, ignoring surrounding
/// whitespace.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Some(false)
    } else {
        None
    }
}

impl Coerce for SqlInt64 {
    const NATIVE_TYPE: NativeType = NativeType::SqlInt64;

    fn coerce(value: &Value) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }
        let converted = match value {
            Value::Boolean(b) => Some(i64::from(*b)),
            Value::Float32(_)
            | Value::Float64(_)
            | Value::Decimal(_)
            | Value::SqlDecimal(_)
            | Value::Utf8(_) => None,
            other => other.as_i128().and_then(|v| i64::try_from(v).ok()),
        };
        converted
            .map(|v| Some(SqlInt64::new(v)))
            .ok_or_else(|| conversion_error(value, Self::NATIVE_TYPE))
    }
}

impl Coerce for SqlDecimal {
    const NATIVE_TYPE: NativeType = NativeType::SqlDecimal;

    fn coerce(value: &Value) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }
        let converted = match value {
            Value::SqlDecimal(d) => d.value(),
            Value::Decimal(d) => Some(*d),
            Value::Boolean(b) => Some(Decimal::from_i64(i64::from(*b))),
            Value::Float32(f) => Decimal::from_f32(*f).ok(),
            Value::Float64(f) => Decimal::from_f64(*f).ok(),
            Value::Utf8(_) => None,
            // Every 64-bit integer has at most 20 digits.
            other => other.as_i128().and_then(|v| Decimal::new(v, 0).ok()),
        };
        converted
            .map(|d| Some(SqlDecimal::new(d)))
            .ok_or_else(|| conversion_error(value, Self::NATIVE_TYPE))
    }
}
