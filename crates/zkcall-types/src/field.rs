use std::fmt;
use std::str::FromStr;

use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Width of an encoded field element on the verifier's ABI.
pub const FIELD_ELEMENT_BITS: u64 = 256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("field element is {bits} bits wide, does not fit in 256")]
    Overflow { bits: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFieldError {
    #[error("empty field element")]
    Empty,

    #[error("invalid base-{radix} digits in {input:?}")]
    InvalidDigits { input: String, radix: u32 },
}

/// Non-negative integer of unbounded precision.
///
/// Every representation the prover side hands us (decimal strings, hex,
/// raw bytes, arkworks field elements) is normalized into this type on
/// ingestion. Whether the value fits the 32-byte ABI word is only checked
/// when it is encoded.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldElement(BigUint);

impl FieldElement {
    pub fn zero() -> Self {
        Self(BigUint::default())
    }

    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    pub fn from_decimal(s: &str) -> Result<Self, ParseFieldError> {
        parse_radix(s.trim(), 10)
    }

    /// Accepts both `0x`-prefixed and raw hex.
    pub fn from_hex(s: &str) -> Result<Self, ParseFieldError> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        parse_radix(digits, 16)
    }

    pub fn from_prime_field<F: PrimeField>(f: &F) -> Self {
        Self::from_bytes_be(&f.into_bigint().to_bytes_be())
    }

    /// Canonical field element, or `None` if the value is not below the
    /// field modulus.
    pub fn to_prime_field<F: PrimeField>(&self) -> Option<F> {
        let modulus = BigUint::from_bytes_le(&F::MODULUS.to_bytes_le());
        if self.0 >= modulus {
            return None;
        }
        Some(F::from_be_bytes_mod_order(&self.0.to_bytes_be()))
    }

    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// Minimal big-endian bytes; zero is a single `0x00`.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    pub fn to_decimal(&self) -> String {
        self.0.to_str_radix(10)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_biguint(self) -> BigUint {
        self.0
    }
}

fn parse_radix(digits: &str, radix: u32) -> Result<FieldElement, ParseFieldError> {
    if digits.is_empty() {
        return Err(ParseFieldError::Empty);
    }
    // parse_bytes tolerates '_' separators; the prover never emits them
    if digits.contains('_') {
        return Err(ParseFieldError::InvalidDigits {
            input: digits.to_string(),
            radix,
        });
    }
    BigUint::parse_bytes(digits.as_bytes(), radix)
        .map(FieldElement)
        .ok_or_else(|| ParseFieldError::InvalidDigits {
            input: digits.to_string(),
            radix,
        })
}

impl From<u64> for FieldElement {
    fn from(v: u64) -> Self {
        Self(BigUint::from(v))
    }
}

impl From<BigUint> for FieldElement {
    fn from(v: BigUint) -> Self {
        Self(v)
    }
}

impl FromStr for FieldElement {
    type Err = ParseFieldError;

    /// `0x`-prefixed input is read as hex, anything else as decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.starts_with("0x") || t.starts_with("0X") {
            Self::from_hex(t)
        } else {
            Self::from_decimal(t)
        }
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal())
    }
}

struct FieldElementVisitor;

impl<'de> Visitor<'de> for FieldElementVisitor {
    type Value = FieldElement;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a decimal/0x-hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(FieldElement::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(FieldElement::from)
            .map_err(|_| E::custom(format!("negative field element {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<FieldElement>().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldElementVisitor)
    }
}
