//! Per-native-type aggregate support.
//!
//! [`Summable`] describes a type's widened arithmetic. [`AggregateNative`]
//! maps every [`AggregateKind`] onto an accumulator for that type; the match
//! in each implementation is exhaustive, so a kind a type cannot compute is
//! spelled out as an [`Error::UnsupportedAggregate`] arm.

use colstore_result::Error;
use colstore_types::{MAX_DECIMAL_PRECISION, NativeType, SqlDecimal, SqlInt64, Value, WideDecimal};

use crate::accumulator::{
    DECIMAL_MEAN_MIN_SCALE, Dispersion, ExtremeAccumulator, SumAccumulator, VarianceAccumulator,
};
use crate::{AggregateKind, AggregateOutcome, AggregateResult};

/// Widened, overflow-checked arithmetic for Sum and Mean.
pub trait Summable: Copy {
    /// Accumulator with strictly more range than `Self`.
    type Accumulator: Copy;

    const ZERO: Self::Accumulator;

    /// `None` on accumulator overflow.
    fn checked_accumulate(total: Self::Accumulator, value: Self) -> Option<Self::Accumulator>;

    /// `None` if the total does not fit back into `Self`.
    fn checked_narrow(total: Self::Accumulator) -> Option<Self>;

    /// `total / count` with the type's own division semantics. `count > 0`.
    fn checked_mean(total: Self::Accumulator, count: u64) -> Option<Self>;

    fn to_f64(self) -> f64;
}

impl Summable for i32 {
    type Accumulator = i64;
    const ZERO: i64 = 0;

    fn checked_accumulate(total: i64, value: i32) -> Option<i64> {
        total.checked_add(i64::from(value))
    }

    fn checked_narrow(total: i64) -> Option<i32> {
        i32::try_from(total).ok()
    }

    fn checked_mean(total: i64, count: u64) -> Option<i32> {
        let count = i64::try_from(count).ok()?;
        i32::try_from(total.checked_div(count)?).ok()
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Summable for i64 {
    type Accumulator = i128;
    const ZERO: i128 = 0;

    fn checked_accumulate(total: i128, value: i64) -> Option<i128> {
        total.checked_add(i128::from(value))
    }

    fn checked_narrow(total: i128) -> Option<i64> {
        i64::try_from(total).ok()
    }

    fn checked_mean(total: i128, count: u64) -> Option<i64> {
        i64::try_from(total.checked_div(i128::from(count))?).ok()
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Summable for SqlInt64 {
    type Accumulator = i128;
    const ZERO: i128 = 0;

    fn checked_accumulate(total: i128, value: SqlInt64) -> Option<i128> {
        match value.value() {
            Some(v) => total.checked_add(i128::from(v)),
            None => Some(total),
        }
    }

    fn checked_narrow(total: i128) -> Option<SqlInt64> {
        i64::try_from(total).ok().map(SqlInt64::new)
    }

    fn checked_mean(total: i128, count: u64) -> Option<SqlInt64> {
        <i64 as Summable>::checked_mean(total, count).map(SqlInt64::new)
    }

    fn to_f64(self) -> f64 {
        self.value().map_or(0.0, |v| v as f64)
    }
}

impl Summable for SqlDecimal {
    type Accumulator = WideDecimal;
    const ZERO: WideDecimal = WideDecimal::ZERO;

    fn checked_accumulate(total: WideDecimal, value: SqlDecimal) -> Option<WideDecimal> {
        match value.value() {
            Some(v) => total.checked_add(v).ok(),
            None => Some(total),
        }
    }

    /// Fraction digits are rounded away until the total fits; only an
    /// integral part past 38 digits overflows.
    fn checked_narrow(total: WideDecimal) -> Option<SqlDecimal> {
        total.narrow_rounded().ok().map(SqlDecimal::new)
    }

    /// Quotient scale is `max(sum scale, 6)`, shrunk one digit at a time
    /// (down to 0) until the result fits in 38 digits.
    fn checked_mean(total: WideDecimal, count: u64) -> Option<SqlDecimal> {
        let target = total
            .scale()
            .max(DECIMAL_MEAN_MIN_SCALE)
            .min(MAX_DECIMAL_PRECISION);
        (0..=target)
            .rev()
            .find_map(|scale| total.checked_div_count(count, scale).ok())
            .map(SqlDecimal::new)
    }

    fn to_f64(self) -> f64 {
        self.value().map_or(0.0, |v| v.to_f64())
    }
}

/// A native type the aggregate engine can fold.
pub trait AggregateNative: Copy + Ord + Into<Value> {
    const NATIVE_TYPE: NativeType;
    const MIN_VALUE: Self;
    const MAX_VALUE: Self;

    /// Fold `values` (one entry per requested row, `None` for null rows).
    fn aggregate<I>(kind: AggregateKind, values: I) -> AggregateResult<AggregateOutcome>
    where
        I: Iterator<Item = Option<Self>>;
}

/// Value of the first row, which may itself be null.
pub fn first<T, I>(mut values: I) -> AggregateOutcome
where
    T: Into<Value>,
    I: Iterator<Item = Option<T>>,
{
    match values.next() {
        None => AggregateOutcome::NoRows,
        Some(None) => AggregateOutcome::Null,
        Some(Some(v)) => AggregateOutcome::from_value(v),
    }
}

/// Number of non-null rows.
pub fn count<T, I>(values: I) -> AggregateOutcome
where
    I: Iterator<Item = Option<T>>,
{
    let non_null = values.flatten().count();
    AggregateOutcome::Value(Value::Int64(i64::try_from(non_null).unwrap_or(i64::MAX)))
}

pub fn min<T: AggregateNative, I: Iterator<Item = Option<T>>>(values: I) -> AggregateOutcome {
    let mut acc = ExtremeAccumulator::min(T::MAX_VALUE);
    values.flatten().for_each(|v| acc.update(v));
    acc.finalize()
        .map_or(AggregateOutcome::Null, AggregateOutcome::from_value)
}

pub fn max<T: AggregateNative, I: Iterator<Item = Option<T>>>(values: I) -> AggregateOutcome {
    let mut acc = ExtremeAccumulator::max(T::MIN_VALUE);
    values.flatten().for_each(|v| acc.update(v));
    acc.finalize()
        .map_or(AggregateOutcome::Null, AggregateOutcome::from_value)
}

pub fn sum<T, I>(values: I) -> AggregateResult<AggregateOutcome>
where
    T: AggregateNative + Summable,
    I: Iterator<Item = Option<T>>,
{
    let mut acc = SumAccumulator::<T>::new(T::NATIVE_TYPE);
    for v in values.flatten() {
        acc.update(v)?;
    }
    Ok(acc
        .finalize_sum()?
        .map_or(AggregateOutcome::Null, AggregateOutcome::from_value))
}

pub fn mean<T, I>(values: I) -> AggregateResult<AggregateOutcome>
where
    T: AggregateNative + Summable,
    I: Iterator<Item = Option<T>>,
{
    let mut acc = SumAccumulator::<T>::new(T::NATIVE_TYPE);
    for v in values.flatten() {
        acc.update(v)?;
    }
    Ok(acc
        .finalize_mean()?
        .map_or(AggregateOutcome::Null, AggregateOutcome::from_value))
}

pub fn dispersion<T, I>(values: I, statistic: Dispersion) -> AggregateOutcome
where
    T: Summable,
    I: Iterator<Item = Option<T>>,
{
    let mut acc = VarianceAccumulator::new();
    values.flatten().for_each(|v| acc.update(v.to_f64()));
    acc.finalize(statistic)
        .map_or(AggregateOutcome::Null, |v| {
            AggregateOutcome::Value(Value::Float64(v))
        })
}

macro_rules! impl_numeric_aggregate {
    ($($ty:ty => $native:expr, $min:expr, $max:expr);* $(;)?) => {
        $(
            impl AggregateNative for $ty {
                const NATIVE_TYPE: NativeType = $native;
                const MIN_VALUE: Self = $min;
                const MAX_VALUE: Self = $max;

                fn aggregate<I>(kind: AggregateKind, values: I) -> AggregateResult<AggregateOutcome>
                where
                    I: Iterator<Item = Option<Self>>,
                {
                    match kind {
                        AggregateKind::Sum => sum(values),
                        AggregateKind::Mean => mean(values),
                        AggregateKind::Var => Ok(dispersion(values, Dispersion::Variance)),
                        AggregateKind::StDev => {
                            Ok(dispersion(values, Dispersion::StandardDeviation))
                        }
                        AggregateKind::Min => Ok(min(values)),
                        AggregateKind::Max => Ok(max(values)),
                        AggregateKind::First => Ok(first(values)),
                        AggregateKind::Count => Ok(count(values)),
                    }
                }
            }
        )*
    };
}

impl_numeric_aggregate!(
    i32 => NativeType::Int32, i32::MIN, i32::MAX;
    i64 => NativeType::Int64, i64::MIN, i64::MAX;
    SqlInt64 => NativeType::SqlInt64, SqlInt64::MIN_VALUE, SqlInt64::MAX_VALUE;
    SqlDecimal => NativeType::SqlDecimal, SqlDecimal::MIN_VALUE, SqlDecimal::MAX_VALUE;
);

/// Booleans order `false < true`, so Min is a logical AND and Max a logical
/// OR over the contributing rows. Arithmetic kinds are not defined.
impl AggregateNative for bool {
    const NATIVE_TYPE: NativeType = NativeType::Boolean;
    const MIN_VALUE: Self = false;
    const MAX_VALUE: Self = true;

    fn aggregate<I>(kind: AggregateKind, values: I) -> AggregateResult<AggregateOutcome>
    where
        I: Iterator<Item = Option<Self>>,
    {
        match kind {
            AggregateKind::Min => Ok(min(values)),
            AggregateKind::Max => Ok(max(values)),
            AggregateKind::First => Ok(first(values)),
            AggregateKind::Count => Ok(count(values)),
            AggregateKind::Sum | AggregateKind::Mean | AggregateKind::Var | AggregateKind::StDev => {
                Err(Error::unsupported_aggregate(
                    kind.name(),
                    Self::NATIVE_TYPE.name(),
                ))
            }
        }
    }
}
