//! Arbitrary-precision signed integer value type
//!
//! [`BigNumber`] owns a `num_bigint::BigInt` and never exposes it publicly, so
//! callers only deal with an owned value. Hex text follows the byte-aligned,
//! uppercase convention of OpenSSL's `BN_bn2hex`: `1` renders as `"01"`,
//! zero as `"0"`, negative values with a leading `-`.
//!
//! Addition is provided through the `Add` / `AddAssign` operators for owned
//! and borrowed operands.
//!
//! # Examples
//! ```
//! use bnwrap_core::BigNumber;
//!
//! let a = BigNumber::from_hex_string("1A").unwrap();
//! let b = BigNumber::from_hex_string("01").unwrap();
//! assert_eq!((a + b).to_hex_string(), "1B");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// Arbitrary-precision, sign-aware integer
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigNumber {
    inner: BigInt,
}

impl BigNumber {
    /// The additive identity
    pub fn create_zero() -> Self {
        Self {
            inner: BigInt::zero(),
        }
    }

    /// Create from a machine integer, negative values included
    pub fn from_integer(value: i64) -> Self {
        Self {
            inner: BigInt::from(value),
        }
    }

    /// Parse hexadecimal text with an optional leading `-`
    ///
    /// Digits are case-insensitive and leading zeros are accepted. No `0x`
    /// prefix, whitespace, `+` sign or digit separators are allowed. Error
    /// positions are byte offsets into `text`.
    pub fn from_hex_string(text: &str) -> Result<Self, ParseError> {
        if text.is_empty() {
            return Err(ParseError::Empty);
        }

        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => (Sign::Minus, rest),
            None => (Sign::Plus, text),
        };
        if digits.is_empty() {
            return Err(ParseError::MissingDigits);
        }

        let offset = text.len() - digits.len();
        let mut nibbles = Vec::with_capacity(digits.len());
        for (index, ch) in digits.char_indices() {
            let position = offset + index;
            match ch.to_digit(16) {
                Some(value) => nibbles.push(value as u8),
                None if ch == '-' || ch == '+' => {
                    return Err(ParseError::MisplacedSign { position })
                }
                None => return Err(ParseError::InvalidDigit { ch, position }),
            }
        }

        // Every nibble is < 16, so this only fails on an empty slice.
        let magnitude = BigUint::from_radix_be(&nibbles, 16).ok_or(ParseError::MissingDigits)?;

        // from_biguint normalizes "-0" to zero
        Ok(Self {
            inner: BigInt::from_biguint(sign, magnitude),
        })
    }

    /// Canonical uppercase hex text, padded to whole bytes
    pub fn to_hex_string(&self) -> String {
        if self.inner.is_zero() {
            return "0".to_string();
        }

        let mut digits = self.inner.magnitude().to_str_radix(16);
        digits.make_ascii_uppercase();

        let mut out = String::with_capacity(digits.len() + 2);
        if self.is_negative() {
            out.push('-');
        }
        if digits.len() % 2 == 1 {
            out.push('0');
        }
        out.push_str(&digits);
        out
    }

    /// Decimal text with a leading `-` for negative values
    pub fn to_dec_string(&self) -> String {
        self.inner.to_str_radix(10)
    }

    /// Create a non-negative value from big-endian magnitude bytes
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self {
            inner: BigInt::from_bytes_be(Sign::Plus, bytes),
        }
    }

    /// Big-endian magnitude bytes without leading zeros
    ///
    /// The sign is dropped and zero encodes as an empty vector.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        if self.inner.is_zero() {
            return Vec::new();
        }
        self.inner.magnitude().to_bytes_be()
    }

    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.inner.sign() == Sign::Minus
    }

    /// Number of significant bits in the magnitude
    pub fn num_bits(&self) -> u64 {
        self.inner.bits()
    }

    pub(crate) fn as_inner(&self) -> &BigInt {
        &self.inner
    }
}

impl fmt::Debug for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigNumber({})", self.to_hex_string())
    }
}

impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl FromStr for BigNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_string(s)
    }
}

impl From<i64> for BigNumber {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<u64> for BigNumber {
    fn from(value: u64) -> Self {
        Self {
            inner: BigInt::from(value),
        }
    }
}

impl Add for BigNumber {
    type Output = BigNumber;

    fn add(mut self, rhs: BigNumber) -> BigNumber {
        self.inner += rhs.inner;
        self
    }
}

impl Add<&BigNumber> for BigNumber {
    type Output = BigNumber;

    fn add(mut self, rhs: &BigNumber) -> BigNumber {
        self.inner += &rhs.inner;
        self
    }
}

impl Add<BigNumber> for &BigNumber {
    type Output = BigNumber;

    fn add(self, rhs: BigNumber) -> BigNumber {
        rhs + self
    }
}

impl Add<&BigNumber> for &BigNumber {
    type Output = BigNumber;

    fn add(self, rhs: &BigNumber) -> BigNumber {
        BigNumber {
            inner: &self.inner + &rhs.inner,
        }
    }
}

impl AddAssign for BigNumber {
    fn add_assign(&mut self, rhs: BigNumber) {
        self.inner += rhs.inner;
    }
}

impl AddAssign<&BigNumber> for BigNumber {
    fn add_assign(&mut self, rhs: &BigNumber) {
        self.inner += &rhs.inner;
    }
}

impl Sum for BigNumber {
    fn sum<I: Iterator<Item = BigNumber>>(iter: I) -> Self {
        iter.fold(BigNumber::create_zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a BigNumber> for BigNumber {
    fn sum<I: Iterator<Item = &'a BigNumber>>(iter: I) -> Self {
        iter.fold(BigNumber::create_zero(), |acc, x| acc + x)
    }
}

impl Serialize for BigNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for BigNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex_string(&s).map_err(serde::de::Error::custom)
    }
}
