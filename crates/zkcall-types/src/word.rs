use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::field::FieldElement;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseWordError {
    #[error("expected 64 hex digits, got {0}")]
    Length(usize),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// One 256-bit big-endian ABI word.
///
/// Displays as `0x` followed by exactly 64 lowercase hex digits.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word([u8; 32]);

impl Word {
    pub const BYTES: usize = 32;
    pub const ZERO: Word = Word([0u8; 32]);

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// `None` unless `bytes` is exactly 32 long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(bytes).ok().map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_field_element(&self) -> FieldElement {
        FieldElement::from_bytes_be(&self.0)
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 64 {
            return Err(ParseWordError::Length(digits.len()));
        }
        let mut out = [0u8; 32];
        hex::decode_to_slice(digits, &mut out)?;
        Ok(Self(out))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self.to_hex())
    }
}

impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<Word>().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_66_chars() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x2a;
        let w = Word::from_bytes(bytes);
        let hex = w.to_hex();
        assert_eq!(hex.len(), 66);
        assert!(hex.ends_with("2a"));
        assert_eq!(w.to_field_element(), FieldElement::from(42u64));
    }

    #[test]
    fn parse_requires_full_width() {
        assert_eq!("0x01".parse::<Word>(), Err(ParseWordError::Length(2)));
        let full = format!("0x{}", "ab".repeat(32));
        let w: Word = full.parse().unwrap();
        assert_eq!(w.to_hex(), full);
        // raw digits without prefix are fine too
        assert_eq!("ab".repeat(32).parse::<Word>().unwrap(), w);
    }

    #[test]
    fn from_slice_checks_length() {
        assert!(Word::from_slice(&[0u8; 31]).is_none());
        assert_eq!(Word::from_slice(&[0u8; 32]), Some(Word::ZERO));
    }

    #[test]
    fn serde_as_hex_string() {
        let json = serde_json::to_string(&Word::ZERO).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "0".repeat(64)));
        let back: Word = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Word::ZERO);
    }
}
