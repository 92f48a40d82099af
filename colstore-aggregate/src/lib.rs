//! Aggregate computation over a sequence of nullable native values.
//!
//! A column store hands the engine one `Option<T>` per requested row (`None`
//! for a null row, duplicates and any order allowed) together with an
//! [`AggregateKind`]. Each native type decides, through its
//! [`AggregateNative`] implementation, which kinds it supports; a kind it
//! does not cover fails with [`Error::UnsupportedAggregate`].

use std::fmt;
use std::str::FromStr;

use colstore_result::Error;
use colstore_types::Value;

pub mod accumulator;
pub mod native;

pub use accumulator::{
    CANCELLATION_THRESHOLD, DECIMAL_MEAN_MIN_SCALE, Dispersion, ExtremeAccumulator,
    SumAccumulator, VarianceAccumulator,
};
pub use native::{AggregateNative, Summable};

pub type AggregateResult<T> = Result<T, Error>;

/// Type of aggregate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Sum,
    Mean,
    Var,
    StDev,
    Min,
    Max,
    First,
    Count,
}

impl AggregateKind {
    pub const ALL: [AggregateKind; 8] = [
        AggregateKind::Sum,
        AggregateKind::Mean,
        AggregateKind::Var,
        AggregateKind::StDev,
        AggregateKind::Min,
        AggregateKind::Max,
        AggregateKind::First,
        AggregateKind::Count,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            AggregateKind::Sum => "Sum",
            AggregateKind::Mean => "Mean",
            AggregateKind::Var => "Var",
            AggregateKind::StDev => "StDev",
            AggregateKind::Min => "Min",
            AggregateKind::Max => "Max",
            AggregateKind::First => "First",
            AggregateKind::Count => "Count",
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AggregateKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_argument(format!("unknown aggregate kind {s:?}")))
    }
}

/// Result of an aggregate.
///
/// `NoRows` is only produced by `First` over an empty row set and is distinct
/// from `Null`, which means the aggregate ran but had nothing to report (or,
/// for `First`, that the first row holds a null).
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateOutcome {
    NoRows,
    Null,
    /// Never holds a null value.
    Value(Value),
}

impl AggregateOutcome {
    /// Wrap `value`, mapping any null representation to [`AggregateOutcome::Null`].
    pub fn from_value(value: impl Into<Value>) -> Self {
        let value = value.into();
        if value.is_null() {
            AggregateOutcome::Null
        } else {
            AggregateOutcome::Value(value)
        }
    }

    /// Collapse to a plain [`Value`], mapping both `NoRows` and `Null` to
    /// [`Value::Null`].
    pub fn into_value(self) -> Value {
        match self {
            AggregateOutcome::Value(v) => v,
            AggregateOutcome::NoRows | AggregateOutcome::Null => Value::Null,
        }
    }
}
