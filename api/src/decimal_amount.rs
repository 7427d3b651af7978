//! Provides an exact decimal number for coin amounts, fiat amounts and prices.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

use num_bigint::BigInt;
use num_bigint::Sign;
use num_traits::Signed;
use num_traits::Zero;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// An error that can occur when parsing a string into a `DecimalAmount`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseDecimalError {
    /// The string is not a plain decimal number (e.g., "abc", "1.2.3", "1e5").
    #[error("invalid decimal amount format")]
    InvalidFormat,
}

/// How to drop digits when reducing the scale of a `DecimalAmount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Truncate toward zero.
    Down,
    /// Round to nearest, ties away from zero.
    HalfUp,
}

/// A signed decimal number stored as `mantissa * 10^-scale`.
///
/// Amounts travel through the wallet as decimal strings. This type gives them
/// exact arithmetic so that no value ever passes through a float.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DecimalAmount {
    mantissa: BigInt,
    scale: u32,
}

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u8).pow(exp)
}

impl DecimalAmount {
    pub fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
            scale: 0,
        }
    }

    /// Creates an amount from an integer count of `10^-scale` units.
    ///
    /// # Example
    /// ```
    /// use api::decimal_amount::DecimalAmount;
    ///
    /// // 12345 cents represents 123.45
    /// let amount = DecimalAmount::new_from_minor(12345, 2);
    /// assert_eq!(amount.to_string(), "123.45");
    /// ```
    pub fn new_from_minor(minor: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            mantissa: minor.into(),
            scale,
        }
    }

    /// Converts a float quote (as returned by rate APIs) through its shortest
    /// round-trip text. Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        format!("{}", value).parse().ok()
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.mantissa.is_positive()
    }

    /// Reduces the amount to at most `decimals` fractional digits.
    pub fn round(&self, decimals: u32, rounding: Rounding) -> Self {
        if decimals >= self.scale {
            return self.clone();
        }
        let divisor = pow10(self.scale - decimals);
        Self {
            mantissa: divide_rounded(&self.mantissa, &divisor, rounding),
            scale: decimals,
        }
    }

    /// Divides by `rhs`, keeping `decimals` fractional digits.
    ///
    /// Returns `None` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self, decimals: u32, rounding: Rounding) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        // (a / 10^sa) / (b / 10^sb) * 10^d == a * 10^(sb + d) / (b * 10^sa)
        let numerator = &self.mantissa * pow10(rhs.scale + decimals);
        let denominator = &rhs.mantissa * pow10(self.scale);
        Some(Self {
            mantissa: divide_rounded(&numerator, &denominator, rounding),
            scale: decimals,
        })
    }

    /// Returns the same value with trailing fractional zeros stripped.
    pub fn normalized(&self) -> Self {
        let ten = BigInt::from(10u8);
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        if mantissa.is_zero() {
            return Self::zero();
        }
        while scale > 0 && (&mantissa % &ten).is_zero() {
            mantissa /= &ten;
            scale -= 1;
        }
        Self { mantissa, scale }
    }

    /// Brings both operands to a common scale.
    fn aligned(&self, other: &Self) -> (BigInt, BigInt) {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => (self.mantissa.clone(), other.mantissa.clone()),
            Ordering::Less => (
                &self.mantissa * pow10(other.scale - self.scale),
                other.mantissa.clone(),
            ),
            Ordering::Greater => (
                self.mantissa.clone(),
                &other.mantissa * pow10(self.scale - other.scale),
            ),
        }
    }
}

/// Integer division of `n` by `d` with the requested rounding.
fn divide_rounded(n: &BigInt, d: &BigInt, rounding: Rounding) -> BigInt {
    let quotient = n / d;
    let remainder = n % d;
    if rounding == Rounding::Down || remainder.is_zero() {
        return quotient;
    }
    if remainder.abs() * 2u8 >= d.abs() {
        let negative = (n.sign() == Sign::Minus) != (d.sign() == Sign::Minus);
        if negative {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

impl Default for DecimalAmount {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for DecimalAmount {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (is_negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let mut parts = s.split('.');
        let major_str = parts.next().unwrap_or("");
        let minor_str = parts.next().unwrap_or("");

        if parts.next().is_some() || (major_str.is_empty() && minor_str.is_empty()) {
            return Err(ParseDecimalError::InvalidFormat);
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(major_str) || !all_digits(minor_str) {
            return Err(ParseDecimalError::InvalidFormat);
        }

        let digits = format!("{}{}", major_str, minor_str);
        let mut mantissa =
            BigInt::parse_bytes(digits.as_bytes(), 10).ok_or(ParseDecimalError::InvalidFormat)?;
        if is_negative {
            mantissa = -mantissa;
        }

        Ok(Self {
            mantissa,
            scale: minor_str.len() as u32,
        })
    }
}

impl TryFrom<String> for DecimalAmount {
    type Error = ParseDecimalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DecimalAmount> for String {
    fn from(value: DecimalAmount) -> Self {
        value.to_string()
    }
}

/// Formats the shortest exact representation, e.g. "10", "0.5", "-1.25".
impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.normalized();
        let digits = n.mantissa.abs().to_string();
        let sign = if n.mantissa.is_negative() { "-" } else { "" };

        if n.scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }

        let scale = n.scale as usize;
        let padded = format!("{:0>width$}", digits, width = scale + 1);
        let (major, minor) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, major, minor)
    }
}

impl PartialEq for DecimalAmount {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = self.aligned(other);
        a == b
    }
}

impl Eq for DecimalAmount {}

impl PartialOrd for DecimalAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DecimalAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.aligned(other);
        a.cmp(&b)
    }
}

impl Mul for &DecimalAmount {
    type Output = DecimalAmount;

    fn mul(self, rhs: Self) -> Self::Output {
        DecimalAmount {
            mantissa: &self.mantissa * &rhs.mantissa,
            scale: self.scale + rhs.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> DecimalAmount {
        s.parse().unwrap()
    }

    #[test]
    fn parses_partial_input_forms() {
        assert_eq!(dec("12."), dec("12"));
        assert_eq!(dec(".5"), dec("0.5"));
        assert_eq!(dec(" 7 "), dec("7"));
        assert_eq!(dec("-3.10").to_string(), "-3.1");
    }

    #[test]
    fn rejects_non_decimal_text() {
        for bad in ["", ".", "1.2.3", "abc", "1e5", "+1", "--1", "1,5"] {
            assert_eq!(
                bad.parse::<DecimalAmount>(),
                Err(ParseDecimalError::InvalidFormat),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn displays_shortest_form() {
        assert_eq!(dec("10.000").to_string(), "10");
        assert_eq!(dec("0.000").to_string(), "0");
        assert_eq!(dec("0.0500").to_string(), "0.05");
        assert_eq!(DecimalAmount::new_from_minor(5, 9).to_string(), "0.000000005");
    }

    #[test]
    fn equality_is_numeric() {
        assert_eq!(dec("1.50"), dec("1.5"));
        assert!(dec("2") > dec("1.999"));
        assert!(dec("-1") < dec("0"));
    }

    #[test]
    fn multiplies_exactly() {
        assert_eq!((&dec("2") * &dec("5.00")).to_string(), "10");
        assert_eq!((&dec("0.1") * &dec("0.2")).to_string(), "0.02");
    }

    #[test]
    fn rounds_half_up_and_down() {
        assert_eq!(dec("1.005").round(2, Rounding::HalfUp).to_string(), "1.01");
        assert_eq!(dec("1.005").round(2, Rounding::Down).to_string(), "1");
        assert_eq!(dec("-1.005").round(2, Rounding::HalfUp).to_string(), "-1.01");
        assert_eq!(dec("1.5").round(4, Rounding::Down).to_string(), "1.5");
    }

    #[test]
    fn divides_to_requested_decimals() {
        let q = dec("10").checked_div(&dec("3"), 9, Rounding::Down).unwrap();
        assert_eq!(q.to_string(), "3.333333333");
        let q = dec("2").checked_div(&dec("3"), 2, Rounding::HalfUp).unwrap();
        assert_eq!(q.to_string(), "0.67");
        let q = dec("-2").checked_div(&dec("3"), 2, Rounding::HalfUp).unwrap();
        assert_eq!(q.to_string(), "-0.67");
        assert_eq!(dec("1").checked_div(&dec("0.00"), 2, Rounding::Down), None);
    }

    #[test]
    fn converts_float_quotes() {
        assert_eq!(DecimalAmount::from_f64(5.25).unwrap(), dec("5.25"));
        assert_eq!(DecimalAmount::from_f64(0.0000001).unwrap(), dec("0.0000001"));
        assert!(DecimalAmount::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&dec("1.50")).unwrap();
        assert_eq!(json, "\"1.5\"");
        let back: DecimalAmount = serde_json::from_str("\"0.25\"").unwrap();
        assert_eq!(back, dec("0.25"));
    }
}
