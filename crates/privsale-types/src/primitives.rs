//! Chain-level primitives: addresses, 256-bit amounts, 32-byte words and
//! signature bytes.
//!
//! Every value is parsed once at the JSON boundary. After that, comparisons
//! are on the decoded bytes, so hex casing never leaks into order logic.

use std::fmt;
use std::str::FromStr;

use primitive_types::{H160, H256, U256};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{PrivateListingError, Result};

fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode up to `N` bytes of hex into a left-padded big-endian array.
fn decode_padded<const N: usize>(digits: &str) -> Option<[u8; N]> {
    if digits.len() > N * 2 {
        return None;
    }
    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    let bytes = hex::decode(padded).ok()?;
    let mut out = [0u8; N];
    out[N - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account or contract address.
///
/// Parsing accepts any hex casing (checksummed or not), so two addresses
/// that differ only in case compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct Address(pub H160);

impl Address {
    /// The zero address, used as the token of native-currency items.
    pub const ZERO: Self = Self(H160([0u8; 20]));

    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(H160(bytes))
    }

    /// Parse a `0x`-prefixed or bare 40-digit hex address.
    pub fn parse(s: &str) -> Result<Self> {
        let digits = strip_0x(s.trim());
        if digits.len() != 40 {
            return Err(PrivateListingError::InvalidAddress(s.to_string()));
        }
        let bytes = decode_padded::<20>(digits)
            .ok_or_else(|| PrivateListingError::InvalidAddress(s.to_string()))?;
        Ok(Self::from_bytes(bytes))
    }

    /// The single address comparison used for recipient routing.
    #[must_use]
    pub fn same_as(&self, other: &Address) -> bool {
        self.0 == other.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        self.0.as_fixed_bytes()
    }
}

impl FromStr for Address {
    type Err = PrivateListingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// Unsigned 256-bit token amount, identifier, or timestamp.
///
/// Serialized as a decimal string. Deserializes from a decimal string, a
/// `0x` hex string, or a JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct Amount(pub U256);

impl Amount {
    pub const ZERO: Self = Self(U256([0; 4]));
    pub const MAX: Self = Self(U256([u64::MAX; 4]));

    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(U256::from(value))
    }

    /// Parse a decimal or `0x`-prefixed hex string.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = || PrivateListingError::InvalidAmount(s.to_string());
        if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
            let digits = strip_0x(trimmed);
            if digits.is_empty() {
                return Err(invalid());
            }
            let bytes = decode_padded::<32>(digits).ok_or_else(invalid)?;
            return Ok(Self(U256::from_big_endian(&bytes)));
        }
        if trimmed.is_empty() {
            return Err(invalid());
        }
        U256::from_dec_str(trimmed).map(Self).map_err(|_| invalid())
    }

    /// Exact addition; `None` when the sum does not fit in 256 bits.
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Self)
    }

    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl FromStr for Amount {
    type Err = PrivateListingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string, 0x hex string, or unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Amount, E> {
        Ok(Amount::new(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Amount, E> {
        u64::try_from(v)
            .map(Amount::new)
            .map_err(|_| E::custom(format!("negative amount {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Amount, E> {
        Amount::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

// ---------------------------------------------------------------------------
// Word
// ---------------------------------------------------------------------------

/// Opaque 32-byte value: salts, zone hashes, conduit keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct Word(pub H256);

impl Word {
    pub const ZERO: Self = Self(H256([0u8; 32]));

    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(H256(bytes))
    }

    /// Word holding `value` in its low-order bytes.
    #[must_use]
    pub fn from_low_u64(value: u64) -> Self {
        Self(H256::from_low_u64_be(value))
    }

    /// Parse 1 to 64 hex digits, left-padding shorter values.
    pub fn parse(s: &str) -> Result<Self> {
        let digits = strip_0x(s.trim());
        if digits.is_empty() {
            return Err(PrivateListingError::InvalidHex(s.to_string()));
        }
        decode_padded::<32>(digits)
            .map(Self::from_bytes)
            .ok_or_else(|| PrivateListingError::InvalidHex(s.to_string()))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_fixed_bytes()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// Raw order signature bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(pub Vec<u8>);

impl Signature {
    pub fn parse(s: &str) -> Result<Self> {
        let digits = strip_0x(s.trim());
        hex::decode(digits)
            .map(Self)
            .map_err(|_| PrivateListingError::InvalidHex(s.to_string()))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

/// Serde adapter for `Option<Signature>`: `"0x"`, `""`, `null` and a missing
/// field all mean unsigned, and `None` is written back as `"0x"`.
pub mod optional_signature {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::Signature;

    pub fn serialize<S: Serializer>(
        value: &Option<Signature>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(sig) => serializer.collect_str(sig),
            None => serializer.serialize_str("0x"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Signature>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("" | "0x" | "0X") => Ok(None),
            Some(s) => Signature::parse(s).map(Some).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01";

    #[test]
    fn address_case_insensitive() {
        let a = Address::parse(MIXED).unwrap();
        let b = Address::parse(&MIXED.to_lowercase()).unwrap();
        let c = Address::parse(&MIXED[2..].to_uppercase()).unwrap();
        assert!(a.same_as(&b));
        assert!(a.same_as(&c));
        assert_eq!(a.to_string(), MIXED.to_lowercase());
    }

    #[test]
    fn address_rejects_wrong_length() {
        assert!(matches!(
            Address::parse("0x1234"),
            Err(PrivateListingError::InvalidAddress(_))
        ));
        assert!(Address::parse("0xzz00000000000000000000000000000000000000").is_err());
    }

    #[test]
    fn amount_parses_decimal_and_hex() {
        assert_eq!(Amount::parse("1000").unwrap(), Amount::new(1000));
        assert_eq!(Amount::parse("0x3e8").unwrap(), Amount::new(1000));
        assert!(Amount::parse("1.5").is_err());
        assert!(Amount::parse("-1").is_err());
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("0x").is_err());
    }

    #[test]
    fn amount_beyond_u128() {
        let s = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let max = Amount::parse(s).unwrap();
        assert_eq!(max, Amount::MAX);
        assert_eq!(max.to_string(), s);
        assert!(max.checked_add(Amount::new(1)).is_none());
    }

    #[test]
    fn amount_json_forms() {
        let from_str: Amount = serde_json::from_str("\"10000000000000000000\"").unwrap();
        let from_num: Amount = serde_json::from_str("42").unwrap();
        assert_eq!(from_num, Amount::new(42));
        assert_eq!(
            serde_json::to_string(&from_str).unwrap(),
            "\"10000000000000000000\""
        );
        assert!(serde_json::from_str::<Amount>("-5").is_err());
    }

    #[test]
    fn word_left_pads() {
        let w = Word::parse("0x01").unwrap();
        assert_eq!(w, Word::from_low_u64(1));
        assert_eq!(w.to_string().len(), 66);
        assert!(Word::parse(&format!("0x{}", "1".repeat(65))).is_err());
    }

    #[test]
    fn word_rejects_empty_digits() {
        assert!(Word::parse("").is_err());
        assert!(Word::parse("0x").is_err());
        assert!(serde_json::from_str::<Word>("\"0x\"").is_err());
    }

    #[test]
    fn empty_signature_is_none() {
        #[derive(Deserialize, Serialize)]
        struct Wrapper {
            #[serde(default, with = "optional_signature")]
            sig: Option<Signature>,
        }
        let w: Wrapper = serde_json::from_str(r#"{"sig":"0x"}"#).unwrap();
        assert!(w.sig.is_none());
        let w: Wrapper = serde_json::from_str("{}").unwrap();
        assert!(w.sig.is_none());
        assert_eq!(serde_json::to_string(&w).unwrap(), r#"{"sig":"0x"}"#);
        let w: Wrapper = serde_json::from_str(r#"{"sig":"0xdead"}"#).unwrap();
        assert_eq!(w.sig, Some(Signature(vec![0xde, 0xad])));
    }
}
