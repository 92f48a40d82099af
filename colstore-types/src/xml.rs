//! Per-value XML text.
//!
//! `to_xml_text` and `from_xml_text` are exact inverses for every value the
//! native type can represent. Sentinel-carrying types render their own null
//! as [`XML_NIL`].

use colstore_result::{Error, Result};

use crate::coerce::parse_bool;
use crate::decimal::Decimal;
use crate::native::NativeType;
use crate::sql::{SqlDecimal, SqlInt64};

/// Text standing in for the null of a sentinel-carrying type.
pub const XML_NIL: &str = "xsi:nil=\"true\"";

/// Round trip between a native value and its XML text.
pub trait XmlText: Sized {
    fn to_xml_text(&self) -> String;
    fn from_xml_text(text: &str) -> Result<Self>;
}

/// XML whitespace is space, tab, CR and LF only.
fn trim_xml(text: &str) -> &str {
    text.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// `-?digits(.digits)?` with ASCII digits only, matching what `Decimal`
/// renders.
fn is_xml_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    digits(int_part) && frac_part.is_none_or(digits)
}

macro_rules! impl_xml_text_integer {
    ($($ty:ty => $native:expr),* $(,)?) => {
        $(
            impl XmlText for $ty {
                fn to_xml_text(&self) -> String {
                    self.to_string()
                }

                fn from_xml_text(text: &str) -> Result<Self> {
                    let trimmed = trim_xml(text);
                    // Integer text never carries a leading '+'.
                    if trimmed.starts_with('+') {
                        return Err(Error::invalid_xml(text, $native.name()));
                    }
                    trimmed
                        .parse::<$ty>()
                        .map_err(|_| Error::invalid_xml(text, $native.name()))
                }
            }
        )*
    };
}

impl_xml_text_integer!(i32 => NativeType::Int32, i64 => NativeType::Int64);

impl XmlText for bool {
    fn to_xml_text(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_owned()
    }

    fn from_xml_text(text: &str) -> Result<Self> {
        let trimmed = trim_xml(text);
        // XML booleans are case sensitive.
        match trimmed {
            "true" | "false" | "1" | "0" => Ok(parse_bool(trimmed) == Some(true)),
            _ => Err(Error::invalid_xml(text, NativeType::Boolean.name())),
        }
    }
}

impl XmlText for SqlInt64 {
    fn to_xml_text(&self) -> String {
        match self.value() {
            Some(v) => v.to_xml_text(),
            None => XML_NIL.to_owned(),
        }
    }

    fn from_xml_text(text: &str) -> Result<Self> {
        if trim_xml(text) == XML_NIL {
            return Ok(SqlInt64::NULL);
        }
        i64::from_xml_text(text)
            .map(SqlInt64::new)
            .map_err(|_| Error::invalid_xml(text, NativeType::SqlInt64.name()))
    }
}

impl XmlText for SqlDecimal {
    fn to_xml_text(&self) -> String {
        match self.value() {
            Some(v) => v.to_string(),
            None => XML_NIL.to_owned(),
        }
    }

    fn from_xml_text(text: &str) -> Result<Self> {
        let trimmed = trim_xml(text);
        if trimmed == XML_NIL {
            return Ok(SqlDecimal::NULL);
        }
        if !is_xml_decimal(trimmed) {
            return Err(Error::invalid_xml(text, NativeType::SqlDecimal.name()));
        }
        trimmed
            .parse::<Decimal>()
            .map(SqlDecimal::new)
            .map_err(|_| Error::invalid_xml(text, NativeType::SqlDecimal.name()))
    }
}
