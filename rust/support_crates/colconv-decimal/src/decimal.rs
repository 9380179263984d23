use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Neg;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero, pow};

/// An exact decimal number: `unscaled × 10^(−scale)`.
///
/// Equality, ordering and hashing are by numeric value, so `1.50` (unscaled `150`,
/// scale `2`) equals `1.5` (unscaled `15`, scale `1`). Formatting keeps the scale:
/// `1.50` prints with both fractional digits.
#[derive(Clone)]
pub struct Decimal {
    unscaled: BigInt,
    scale: i32,
}

/// Error type for string parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDecimalError {
    input: String,
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid decimal literal '{}'", self.input)
    }
}

impl std::error::Error for ParseDecimalError {}

// Constructors
impl Decimal {
    /// Creates a decimal from its unscaled integer and scale.
    ///
    /// # Examples
    /// ```rust
    /// # use colconv_decimal::Decimal;
    /// let d = Decimal::new(131073, 2);
    /// assert_eq!(d.to_string(), "1310.73");
    /// ```
    pub fn new(unscaled: impl Into<BigInt>, scale: i32) -> Decimal {
        Decimal {
            unscaled: unscaled.into(),
            scale,
        }
    }

    /// Decodes a big-endian two's-complement integer of any length as the unscaled
    /// value. The sign comes from the high bit of the first byte.
    ///
    /// Returns `None` for an empty buffer.
    ///
    /// # Examples
    /// ```rust
    /// # use colconv_decimal::Decimal;
    /// let d = Decimal::from_signed_bytes_be(&[0xff, 0xfe], 1).unwrap();
    /// assert_eq!(d.to_string(), "-0.2");
    /// assert!(Decimal::from_signed_bytes_be(&[], 1).is_none());
    /// ```
    pub fn from_signed_bytes_be(bytes: &[u8], scale: i32) -> Option<Decimal> {
        if bytes.is_empty() {
            return None;
        }
        Some(Decimal::new(BigInt::from_signed_bytes_be(bytes), scale))
    }

    pub fn zero() -> Decimal {
        Decimal::new(BigInt::zero(), 0)
    }
}

impl Decimal {
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// Number of fractional digits. Negative scales multiply by a power of ten.
    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn into_parts(self) -> (BigInt, i32) {
        (self.unscaled, self.scale)
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    /// Re-expresses the value with a different scale. Increasing the scale is
    /// always exact; decreasing it succeeds only if the dropped digits are zero.
    pub fn with_scale(&self, scale: i32) -> Option<Decimal> {
        match scale.cmp(&self.scale) {
            Ordering::Equal => Some(self.clone()),
            Ordering::Greater => {
                let factor = power_of_ten(scale.abs_diff(self.scale));
                Some(Decimal::new(&self.unscaled * factor, scale))
            }
            Ordering::Less => {
                let factor = power_of_ten(self.scale.abs_diff(scale));
                let (quotient, remainder) = (&self.unscaled / &factor, &self.unscaled % &factor);
                remainder
                    .is_zero()
                    .then(|| Decimal::new(quotient, scale))
            }
        }
    }

    /// Multiplies the value by `10^exponent` without touching the unscaled integer.
    pub fn scaleb(&self, exponent: i32) -> Decimal {
        Decimal::new(self.unscaled.clone(), self.scale - exponent)
    }

    /// Strips trailing zeros from the unscaled value (zero normalizes to scale `0`).
    pub fn normalize(&self) -> Decimal {
        if self.unscaled.is_zero() {
            return Decimal::zero();
        }
        let ten = BigInt::from(10);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        while (&unscaled % &ten).is_zero() {
            unscaled /= &ten;
            scale -= 1;
        }
        Decimal::new(unscaled, scale)
    }

    fn aligned_with(&self, other: &Decimal) -> (BigInt, BigInt) {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => (self.unscaled.clone(), other.unscaled.clone()),
            Ordering::Less => {
                let factor = power_of_ten(other.scale.abs_diff(self.scale));
                (&self.unscaled * factor, other.unscaled.clone())
            }
            Ordering::Greater => {
                let factor = power_of_ten(self.scale.abs_diff(other.scale));
                (self.unscaled.clone(), &other.unscaled * factor)
            }
        }
    }
}

fn power_of_ten(exponent: u32) -> BigInt {
    pow(BigInt::from(10), exponent as usize)
}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::zero()
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Decimal) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Decimal) -> Ordering {
        if self.unscaled.sign() != other.unscaled.sign() {
            return self.unscaled.sign().cmp(&other.unscaled.sign());
        }
        let (lhs, rhs) = self.aligned_with(other);
        lhs.cmp(&rhs)
    }
}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let reduced = self.normalize();
        reduced.unscaled.hash(state);
        reduced.scale.hash(state);
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.unscaled, self.scale)
    }
}

impl From<i32> for Decimal {
    fn from(val: i32) -> Decimal {
        Decimal::new(val, 0)
    }
}

impl From<i64> for Decimal {
    fn from(val: i64) -> Decimal {
        Decimal::new(val, 0)
    }
}

impl From<u64> for Decimal {
    fn from(val: u64) -> Decimal {
        Decimal::new(val, 0)
    }
}

impl From<i128> for Decimal {
    fn from(val: i128) -> Decimal {
        Decimal::new(val, 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(val: BigInt) -> Decimal {
        Decimal::new(val, 0)
    }
}

/// Formats the value in plain (non-exponential) notation, keeping exactly
/// `scale` fractional digits when the scale is positive.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_str_radix(10);
        let mut out = String::with_capacity(digits.len() + 3);
        if self.unscaled.sign() == Sign::Minus {
            out.push('-');
        }
        if self.scale <= 0 {
            out.push_str(&digits);
            if !self.unscaled.is_zero() {
                out.extend(std::iter::repeat_n('0', self.scale.unsigned_abs() as usize));
            }
        } else {
            let scale = self.scale as usize;
            if digits.len() > scale {
                let (int_part, frac_part) = digits.split_at(digits.len() - scale);
                out.push_str(int_part);
                out.push('.');
                out.push_str(frac_part);
            } else {
                out.push_str("0.");
                out.extend(std::iter::repeat_n('0', scale - digits.len()));
                out.push_str(&digits);
            }
        }
        f.pad(&out)
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Parses plain or exponential notation: `-12.50`, `+3`, `.5`, `1.2E+3`.
/// The scale of the result is the number of fractional digits minus the exponent.
impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Decimal, ParseDecimalError> {
        let err = || ParseDecimalError {
            input: s.to_string(),
        };
        let trimmed = s.trim();

        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            Some(_) => (false, trimmed),
            None => return Err(err()),
        };

        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(pos) => {
                let exponent = body[pos + 1..].parse::<i32>().map_err(|_| err())?;
                (&body[..pos], exponent)
            }
            None => (body, 0),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part)
        {
            return Err(err());
        }

        let digits = format!("{int_part}{frac_part}");
        let magnitude = BigInt::from_str(&digits).map_err(|_| err())?;
        let frac_len = i32::try_from(frac_part.len()).map_err(|_| err())?;
        let scale = frac_len.checked_sub(exponent).ok_or_else(err)?;
        let unscaled = if negative { -magnitude } else { magnitude };
        Ok(Decimal::new(unscaled, scale))
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::de::Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_str(DecimalVisitor)
    }
}

#[cfg(feature = "serde")]
struct DecimalVisitor;

#[cfg(feature = "serde")]
impl serde::de::Visitor<'_> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a decimal string")
    }

    fn visit_str<E>(self, s: &str) -> Result<Decimal, E>
    where
        E: serde::de::Error,
    {
        use serde::de::Unexpected;
        Decimal::from_str(s).map_err(|_| E::invalid_value(Unexpected::Str(s), &self))
    }
}
