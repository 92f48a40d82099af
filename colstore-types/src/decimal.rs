//! Fixed-point decimal backing the `SqlDecimal` column type.
//!
//! A [`Decimal`] is a scaled `i128` holding at most
//! [`MAX_DECIMAL_PRECISION`] significant digits with a non-negative scale of
//! at most the same bound. Equality and ordering are numeric, so `2.5` and
//! `2.50` compare equal even though they render differently.
//!
//! [`WideDecimal`] is the 256-bit accumulator used while summing decimals; it
//! only narrows back to a [`Decimal`] once the total is known.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use arrow_buffer::i256;

/// Maximum precision (and scale) supported by [`Decimal`].
pub const MAX_DECIMAL_PRECISION: u8 = 38;

const POW10_BASE: i256 = i256::from_i128(10);

// 10^38 - 1, the largest 38-digit magnitude.
const MAX_RAW: i128 = 99_999_999_999_999_999_999_999_999_999_999_999_999;

/// Errors that can occur while manipulating decimal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecimalError {
    /// Requested scale falls outside `0..=38`.
    ScaleOutOfRange { scale: u32 },
    /// Result exceeded the maximum representable precision.
    PrecisionOverflow { value: String, scale: u8 },
    /// Arithmetic operation overflowed the intermediate range.
    Overflow,
    /// Attempted to divide by zero.
    DivisionByZero,
    /// Text is not plain decimal notation.
    InvalidFormat { text: String },
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalError::ScaleOutOfRange { scale } => {
                write!(f, "decimal scale {scale} outside supported range")
            }
            DecimalError::PrecisionOverflow { value, scale } => {
                write!(
                    f,
                    "decimal value {value} with scale {scale} exceeds maximum precision"
                )
            }
            DecimalError::Overflow => write!(f, "decimal arithmetic overflow"),
            DecimalError::DivisionByZero => write!(f, "decimal division by zero"),
            DecimalError::InvalidFormat { text } => {
                write!(f, "{text:?} is not a decimal number")
            }
        }
    }
}

impl std::error::Error for DecimalError {}

/// Runtime representation of a 38-digit decimal value.
#[derive(Clone, Copy, Debug)]
pub struct Decimal {
    value: i128,
    scale: u8,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal { value: 0, scale: 0 };
    /// `99999999999999999999999999999999999999`
    pub const MAX: Decimal = Decimal {
        value: MAX_RAW,
        scale: 0,
    };
    /// `-99999999999999999999999999999999999999`
    pub const MIN: Decimal = Decimal {
        value: -MAX_RAW,
        scale: 0,
    };

    /// Create a decimal from its raw parts, validating precision bounds.
    pub fn new(value: i128, scale: u8) -> Result<Self, DecimalError> {
        if scale > MAX_DECIMAL_PRECISION {
            return Err(DecimalError::ScaleOutOfRange {
                scale: u32::from(scale),
            });
        }
        if !(-MAX_RAW..=MAX_RAW).contains(&value) {
            return Err(DecimalError::PrecisionOverflow {
                value: value.to_string(),
                scale,
            });
        }
        Ok(Self { value, scale })
    }

    /// Construct a decimal from an integer with zero scale.
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value: value as i128,
            scale: 0,
        }
    }

    /// Return the scale (number of fractional digits).
    #[inline]
    pub fn scale(self) -> u8 {
        self.scale
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Convert the decimal into an `f64` (lossy for high precision inputs).
    pub fn to_f64(self) -> f64 {
        if self.value == 0 {
            return 0.0;
        }
        let denominator = 10_f64.powi(i32::from(self.scale));
        (self.value as f64) / denominator
    }

    /// Round to the nearest integer, ties to even.
    pub fn round_half_even(self) -> i128 {
        if self.scale == 0 {
            return self.value;
        }
        // 10^38 still fits in i128.
        let factor = 10_i128.pow(u32::from(self.scale));
        let quotient = self.value / factor;
        let twice_rem = (self.value % factor).unsigned_abs() * 2;
        let factor = factor.unsigned_abs();
        if twice_rem > factor || (twice_rem == factor && quotient % 2 != 0) {
            quotient + self.value.signum()
        } else {
            quotient
        }
    }

    /// Parse the shortest round-trip rendering of a finite float.
    pub fn from_f64(value: f64) -> Result<Self, DecimalError> {
        if !value.is_finite() {
            return Err(DecimalError::Overflow);
        }
        // `{}` on floats never uses exponent notation.
        format!("{value}").parse()
    }

    /// Same as [`from_f64`](Self::from_f64) but with the `f32`'s own shortest
    /// digits, so `0.1_f32` becomes `0.1`.
    pub fn from_f32(value: f32) -> Result<Self, DecimalError> {
        if !value.is_finite() {
            return Err(DecimalError::Overflow);
        }
        format!("{value}").parse()
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::ZERO
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::from_i64(value)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.value);
        }
        let scale = usize::from(self.scale);
        let digits = self.value.unsigned_abs().to_string();
        if self.value < 0 {
            f.write_str("-")?;
        }
        if digits.len() <= scale {
            f.write_str("0.")?;
            for _ in digits.len()..scale {
                f.write_str("0")?;
            }
            return f.write_str(&digits);
        }
        let split = digits.len() - scale;
        f.write_str(&digits[..split])?;
        f.write_str(".")?;
        f.write_str(&digits[split..])
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DecimalError::InvalidFormat { text: s.to_owned() };
        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(invalid());
        }

        let scale = frac_part.len();
        if scale > usize::from(MAX_DECIMAL_PRECISION) {
            return Err(DecimalError::ScaleOutOfRange {
                scale: u32::try_from(scale).unwrap_or(u32::MAX),
            });
        }

        let combined = format!("{int_part}{frac_part}");
        let combined = combined.trim_start_matches('0');
        let magnitude = if combined.is_empty() {
            0
        } else if combined.len() > usize::from(MAX_DECIMAL_PRECISION) {
            return Err(DecimalError::PrecisionOverflow {
                value: combined.to_owned(),
                scale: scale as u8,
            });
        } else {
            combined.parse::<i128>().map_err(|_| invalid())?
        };
        let value = if negative { -magnitude } else { magnitude };
        Self::new(value, scale as u8)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.scale == other.scale {
            return self.value.cmp(&other.value);
        }

        let max_scale = self.scale.max(other.scale);
        let scale_diff_self = u32::from(max_scale - self.scale);
        let scale_diff_other = u32::from(max_scale - other.scale);

        // Both operands stay below 10^76 after scaling, inside i256.
        let l_scaled = i256::from_i128(self.value).wrapping_mul(pow10(scale_diff_self));
        let r_scaled = i256::from_i128(other.value).wrapping_mul(pow10(scale_diff_other));

        l_scaled.cmp(&r_scaled)
    }
}

fn pow10(exp: u32) -> i256 {
    POW10_BASE.wrapping_pow(exp)
}

fn checked_pow10(exp: u32) -> Result<i256, DecimalError> {
    if exp > u32::from(MAX_DECIMAL_PRECISION) * 2 {
        return Err(DecimalError::ScaleOutOfRange { scale: exp });
    }
    POW10_BASE.checked_pow(exp).ok_or(DecimalError::Overflow)
}

/// Scaled 256-bit decimal used as a widened sum accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WideDecimal {
    raw: i256,
    scale: u8,
}

impl WideDecimal {
    pub const ZERO: WideDecimal = WideDecimal {
        raw: i256::ZERO,
        scale: 0,
    };

    #[inline]
    pub fn scale(self) -> u8 {
        self.scale
    }

    /// Add `value`, aligning both sides to the larger scale first.
    pub fn checked_add(self, value: Decimal) -> Result<Self, DecimalError> {
        let target_scale = self.scale.max(value.scale);
        let lhs = rescale_up(self.raw, self.scale, target_scale)?;
        let rhs = rescale_up(i256::from_i128(value.value), value.scale, target_scale)?;
        let raw = lhs.checked_add(rhs).ok_or(DecimalError::Overflow)?;
        Ok(Self {
            raw,
            scale: target_scale,
        })
    }

    /// Narrow the accumulated total back to a 38-digit [`Decimal`].
    pub fn narrow(self) -> Result<Decimal, DecimalError> {
        let value = self.raw.to_i128().ok_or_else(|| DecimalError::PrecisionOverflow {
            value: self.raw.to_string(),
            scale: self.scale,
        })?;
        Decimal::new(value, self.scale)
    }

    /// Narrow to a [`Decimal`], dropping fractional digits (rounded half away
    /// from zero) until the value fits 38 digits. Fails only when the
    /// integral part alone needs more than 38 digits.
    pub fn narrow_rounded(self) -> Result<Decimal, DecimalError> {
        for scale in (0..=self.scale).rev() {
            let factor = checked_pow10(u32::from(self.scale - scale))?;
            let raw = round_div(self.raw, factor)?;
            if let Some(value) = raw.to_i128().filter(|v| (-MAX_RAW..=MAX_RAW).contains(v)) {
                return Decimal::new(value, scale);
            }
        }
        Err(DecimalError::PrecisionOverflow {
            value: self.raw.to_string(),
            scale: self.scale,
        })
    }

    /// Divide by a positive row count, producing `target_scale` fractional
    /// digits rounded half away from zero.
    pub fn checked_div_count(self, count: u64, target_scale: u8) -> Result<Decimal, DecimalError> {
        if count == 0 {
            return Err(DecimalError::DivisionByZero);
        }
        if target_scale > MAX_DECIMAL_PRECISION {
            return Err(DecimalError::ScaleOutOfRange {
                scale: u32::from(target_scale),
            });
        }
        let count = i256::from_i128(i128::from(count));
        // A single rounding step, whichever way the scale moves.
        let (numerator, denominator) = if target_scale >= self.scale {
            (rescale_up(self.raw, self.scale, target_scale)?, count)
        } else {
            let factor = checked_pow10(u32::from(self.scale - target_scale))?;
            let denominator = count.checked_mul(factor).ok_or(DecimalError::Overflow)?;
            (self.raw, denominator)
        };
        let quotient = round_div(numerator, denominator)?;
        WideDecimal {
            raw: quotient,
            scale: target_scale,
        }
        .narrow()
    }
}

impl From<Decimal> for WideDecimal {
    fn from(value: Decimal) -> Self {
        Self {
            raw: i256::from_i128(value.value),
            scale: value.scale,
        }
    }
}

fn rescale_up(raw: i256, from: u8, to: u8) -> Result<i256, DecimalError> {
    if to == from {
        return Ok(raw);
    }
    let factor = checked_pow10(u32::from(to - from))?;
    raw.checked_mul(factor).ok_or(DecimalError::Overflow)
}

/// Divide rounding half away from zero. `denominator` must be positive.
fn round_div(numerator: i256, denominator: i256) -> Result<i256, DecimalError> {
    let quotient = numerator
        .checked_div(denominator)
        .ok_or(DecimalError::DivisionByZero)?;
    let remainder = numerator
        .checked_rem(denominator)
        .ok_or(DecimalError::DivisionByZero)?;
    if remainder == i256::ZERO {
        return Ok(quotient);
    }
    let double_rem = remainder
        .wrapping_abs()
        .checked_mul(i256::from_i128(2))
        .ok_or(DecimalError::Overflow)?;
    if double_rem >= denominator {
        if numerator < i256::ZERO {
            return quotient.checked_sub(i256::ONE).ok_or(DecimalError::Overflow);
        }
        return quotient.checked_add(i256::ONE).ok_or(DecimalError::Overflow);
    }
    Ok(quotient)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display_preserve_scale() {
        for text in ["0", "2.50", "-0.05", "123.456", "0.00", "-17"] {
            assert_eq!(dec(text).to_string(), text);
        }
        assert_eq!(dec("+1.5").to_string(), "1.5");
        assert_eq!(dec(" 42 ").to_string(), "42");
    }

    #[test]
    fn parse_rejects_garbage() {
        for text in ["", "-", ".", "1.2.3", "1e5", "abc", "1.-5", "--1"] {
            assert!(text.parse::<Decimal>().is_err(), "{text:?} should not parse");
        }
    }

    #[test]
    fn parse_enforces_precision() {
        let max = "9".repeat(38);
        assert_eq!(dec(&max), Decimal::MAX);
        assert_eq!(dec(&format!("-{max}")), Decimal::MIN);
        assert!(matches!(
            "9".repeat(39).parse::<Decimal>(),
            Err(DecimalError::PrecisionOverflow { .. })
        ));
    }

    #[test]
    fn equality_is_numeric() {
        assert_eq!(dec("2.5"), dec("2.500"));
        assert!(dec("2.49") < dec("2.5"));
        assert!(dec("-3") < dec("-2.999"));
        assert_eq!(Decimal::MAX.cmp(&dec("1.5")), Ordering::Greater);
    }

    #[test]
    fn round_half_even_matches_bankers_rounding() {
        assert_eq!(dec("2.5").round_half_even(), 2);
        assert_eq!(dec("3.5").round_half_even(), 4);
        assert_eq!(dec("-2.5").round_half_even(), -2);
        assert_eq!(dec("-2.51").round_half_even(), -3);
        assert_eq!(dec("7.49").round_half_even(), 7);
    }

    #[test]
    fn wide_accumulator_aligns_scales() {
        let total = WideDecimal::ZERO
            .checked_add(dec("1.5"))
            .and_then(|acc| acc.checked_add(dec("2.25")))
            .and_then(|acc| acc.checked_add(dec("-1")))
            .unwrap();
        assert_eq!(total.narrow().unwrap().to_string(), "2.75");
    }

    #[test]
    fn wide_accumulator_defers_overflow_to_narrow() {
        let acc = WideDecimal::from(Decimal::MAX).checked_add(Decimal::MAX).unwrap();
        assert!(matches!(
            acc.narrow(),
            Err(DecimalError::PrecisionOverflow { .. })
        ));
        let back = acc.checked_add(Decimal::MIN).unwrap();
        assert_eq!(back.narrow().unwrap(), Decimal::MAX);
    }

    #[test]
    fn rounded_narrow_drops_fraction_digits_before_failing() {
        let below_max = WideDecimal::from(Decimal::MAX)
            .checked_add(dec("-0.5"))
            .unwrap();
        assert!(below_max.narrow().is_err());
        assert_eq!(below_max.narrow_rounded().unwrap(), Decimal::MAX);

        let fits = WideDecimal::from(dec("1.25")).checked_add(dec("-3")).unwrap();
        assert_eq!(fits.narrow_rounded().unwrap().to_string(), "-1.75");

        let too_big = WideDecimal::from(Decimal::MAX).checked_add(dec("1")).unwrap();
        assert!(matches!(
            too_big.narrow_rounded(),
            Err(DecimalError::PrecisionOverflow { .. })
        ));
    }

    #[test]
    fn divide_by_count_can_shed_scale() {
        let sum = WideDecimal::from(Decimal::MAX).checked_add(dec("0.5")).unwrap();
        assert!(sum.checked_div_count(2, 1).is_err());
        assert_eq!(
            sum.checked_div_count(2, 0).unwrap().to_string(),
            format!("5{}", "0".repeat(37))
        );
        let small = WideDecimal::from(dec("0.125"));
        assert_eq!(small.checked_div_count(1, 2).unwrap().to_string(), "0.13");
    }

    #[test]
    fn divide_by_count_rounds_half_away_from_zero() {
        let sum = WideDecimal::from(dec("21.03"));
        assert_eq!(sum.checked_div_count(2, 2).unwrap().to_string(), "10.52");
        let neg = WideDecimal::from(dec("-21.03"));
        assert_eq!(neg.checked_div_count(2, 2).unwrap().to_string(), "-10.52");
        let five = WideDecimal::from(dec("5.0"));
        assert_eq!(five.checked_div_count(2, 6).unwrap().to_string(), "2.500000");
        assert!(five.checked_div_count(0, 6).is_err());
    }

    #[test]
    fn from_f64_uses_shortest_digits() {
        assert_eq!(Decimal::from_f64(0.1).unwrap().to_string(), "0.1");
        assert_eq!(Decimal::from_f64(-2.5).unwrap().to_string(), "-2.5");
        assert!(Decimal::from_f64(f64::NAN).is_err());
        assert!(Decimal::from_f64(1e300).is_err());
        assert_eq!(Decimal::from_f32(0.1).unwrap().to_string(), "0.1");
        assert_eq!(Decimal::from_f32(-3.75).unwrap().to_string(), "-3.75");
        assert!(Decimal::from_f32(f32::INFINITY).is_err());
    }
}
