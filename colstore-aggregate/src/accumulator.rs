//! Incremental accumulators behind each aggregate kind.
//!
//! Callers feed only contributing (non-null) values through `update`, then
//! call one of the `finalize_*` methods. A finalize that saw no values yields
//! `None`, which the caller reports as a null aggregate.

use colstore_result::Error;
use colstore_types::NativeType;

use crate::AggregateResult;
use crate::native::Summable;

/// Relative size below which `n·Σx² − (Σx)²` is treated as cancellation noise.
///
/// A double carries roughly 15 significant decimal digits.
pub const CANCELLATION_THRESHOLD: f64 = 1e-15;

/// Preferred fractional digits of a decimal mean.
pub const DECIMAL_MEAN_MIN_SCALE: u8 = 6;

/// Checked sum with a widened accumulator; also drives `Mean`.
pub struct SumAccumulator<T: Summable> {
    native_type: NativeType,
    total: T::Accumulator,
    count: u64,
}

impl<T: Summable> SumAccumulator<T> {
    pub fn new(native_type: NativeType) -> Self {
        Self {
            native_type,
            total: T::ZERO,
            count: 0,
        }
    }

    pub fn update(&mut self, value: T) -> AggregateResult<()> {
        self.total = T::checked_accumulate(self.total, value).ok_or_else(|| {
            tracing::debug!(native_type = %self.native_type, "sum accumulator overflowed");
            Error::overflow(self.native_type.name())
        })?;
        self.count += 1;
        Ok(())
    }

    /// Narrow the total back to the native type.
    pub fn finalize_sum(self) -> AggregateResult<Option<T>> {
        if self.count == 0 {
            return Ok(None);
        }
        T::checked_narrow(self.total)
            .map(Some)
            .ok_or_else(|| self.overflow("sum"))
    }

    /// Divide the total by the contributing row count using the native
    /// type's own division.
    pub fn finalize_mean(self) -> AggregateResult<Option<T>> {
        if self.count == 0 {
            return Ok(None);
        }
        T::checked_mean(self.total, self.count)
            .map(Some)
            .ok_or_else(|| self.overflow("mean"))
    }

    fn overflow(&self, what: &str) -> Error {
        tracing::debug!(native_type = %self.native_type, count = self.count, "{what} does not fit the native type");
        Error::overflow(self.native_type.name())
    }
}

/// Which dispersion statistic a [`VarianceAccumulator`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispersion {
    Variance,
    StandardDeviation,
}

/// Single-pass sample variance over `n`, `Σx` and `Σx²` in double precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct VarianceAccumulator {
    count: u64,
    sum: f64,
    sum_of_squares: f64,
}

impl VarianceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_of_squares += value * value;
    }

    /// `None` unless more than one value contributed.
    pub fn finalize(self, dispersion: Dispersion) -> Option<f64> {
        if self.count <= 1 {
            return None;
        }
        let n = self.count as f64;
        let raw = n * self.sum_of_squares - self.sum * self.sum;
        let relative = raw / (self.sum * self.sum);
        let variance = if relative < CANCELLATION_THRESHOLD || raw < 0.0 {
            0.0
        } else {
            raw / (n * (n - 1.0))
        };
        Some(match dispersion {
            Dispersion::Variance => variance,
            Dispersion::StandardDeviation => variance.sqrt(),
        })
    }
}

/// Running minimum or maximum seeded from the opposite bound of the type.
pub struct ExtremeAccumulator<T> {
    value: T,
    seen: bool,
    keep_lower: bool,
}

impl<T: Copy + Ord> ExtremeAccumulator<T> {
    /// Minimum tracker, seeded with the type's maximum value.
    pub fn min(type_max: T) -> Self {
        Self {
            value: type_max,
            seen: false,
            keep_lower: true,
        }
    }

    /// Maximum tracker, seeded with the type's minimum value.
    pub fn max(type_min: T) -> Self {
        Self {
            value: type_min,
            seen: false,
            keep_lower: false,
        }
    }

    pub fn update(&mut self, value: T) {
        self.seen = true;
        if (self.keep_lower && value < self.value) || (!self.keep_lower && value > self.value) {
            self.value = value;
        }
    }

    pub fn finalize(self) -> Option<T> {
        self.seen.then_some(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variance_of(values: &[f64], dispersion: Dispersion) -> Option<f64> {
        let mut acc = VarianceAccumulator::new();
        values.iter().for_each(|v| acc.update(*v));
        acc.finalize(dispersion)
    }

    #[test]
    fn variance_needs_two_values() {
        assert_eq!(variance_of(&[], Dispersion::Variance), None);
        assert_eq!(variance_of(&[4.0], Dispersion::Variance), None);
        assert_eq!(variance_of(&[4.0, 4.0], Dispersion::Variance), Some(0.0));
    }

    #[test]
    fn variance_matches_sample_formula() {
        let var = variance_of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], Dispersion::Variance)
            .unwrap();
        assert!((var - 32.0 / 7.0).abs() < 1e-12);
        let sd = variance_of(&[-1.0, 1.0], Dispersion::StandardDeviation).unwrap();
        assert!((sd - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn cancellation_guard_clamps_to_zero() {
        // Large equal values: n·Σx² and (Σx)² agree to the last bit or nearly so.
        let big = 1.0e9 + 0.1;
        assert_eq!(variance_of(&[big, big, big], Dispersion::Variance), Some(0.0));
    }

    #[test]
    fn extremes_skip_nothing_and_report_none_when_empty() {
        let mut min = ExtremeAccumulator::min(i32::MAX);
        let mut max = ExtremeAccumulator::max(i32::MIN);
        for v in [3, -7, 12] {
            min.update(v);
            max.update(v);
        }
        assert_eq!(min.finalize(), Some(-7));
        assert_eq!(max.finalize(), Some(12));
        assert_eq!(ExtremeAccumulator::min(i32::MAX).finalize(), None);

        // A lone value equal to the seed still counts as seen.
        let mut only = ExtremeAccumulator::min(i32::MAX);
        only.update(i32::MAX);
        assert_eq!(only.finalize(), Some(i32::MAX));
    }

    #[test]
    fn sum_reports_overflow_on_narrowing() {
        let mut acc = SumAccumulator::<i32>::new(NativeType::Int32);
        acc.update(i32::MAX).unwrap();
        acc.update(1).unwrap();
        assert_eq!(acc.finalize_sum().unwrap_err(), Error::overflow("Int32"));

        let mut back = SumAccumulator::<i32>::new(NativeType::Int32);
        for v in [i32::MAX, 1, -1] {
            back.update(v).unwrap();
        }
        assert_eq!(back.finalize_sum().unwrap(), Some(i32::MAX));
    }

    #[test]
    fn mean_truncates_integral_division() {
        let mut acc = SumAccumulator::<i32>::new(NativeType::Int32);
        acc.update(5).unwrap();
        acc.update(10).unwrap();
        assert_eq!(acc.finalize_mean().unwrap(), Some(7));

        let mut neg = SumAccumulator::<i64>::new(NativeType::Int64);
        neg.update(-5).unwrap();
        neg.update(-10).unwrap();
        assert_eq!(neg.finalize_mean().unwrap(), Some(-7));
    }
}
