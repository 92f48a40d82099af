//! Value types shared by every colstore column store.
//!
//! - [`NativeType`]: the tag naming a store's physical value type.
//! - [`Value`]: the generic external value handed to `set`/`convert_value`.
//! - [`Decimal`], [`SqlDecimal`], [`SqlInt64`]: the native numeric types. The
//!   `Sql*` types carry their own null, which is how the nullable-sentinel
//!   store family encodes nullness without a bitmap.
//! - [`Coerce`] and [`XmlText`]: per-native-type coercion from [`Value`] and the
//!   per-value XML text round trip.

#![forbid(unsafe_code)]

pub mod coerce;
pub mod decimal;
pub mod native;
pub mod sql;
pub mod value;
pub mod xml;

pub use coerce::Coerce;
pub use decimal::{Decimal, DecimalError, MAX_DECIMAL_PRECISION, WideDecimal};
pub use native::NativeType;
pub use sql::{SqlDecimal, SqlInt64};
pub use value::Value;
pub use xml::{XML_NIL, XmlText};
