//! Allocation destinations.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A 32-byte destination identifier.
///
/// External destinations are 20-byte addresses left-padded with zeros;
/// channel destinations use the full word. Hex input is accepted in any
/// letter case and compared in canonical byte form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Destination(B256);

impl Destination {
    pub const ZERO: Self = Self(B256::ZERO);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(B256::new(bytes))
    }

    pub fn from_word(word: B256) -> Self {
        Self(word)
    }

    /// Left-pad an address into a destination.
    pub fn from_address(address: Address) -> Self {
        Self(address.into_word())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0 .0
    }

    /// The address this destination pads, if its top 12 bytes are zero.
    pub fn as_address(&self) -> Option<Address> {
        if self.0[..12].iter().all(|b| *b == 0) {
            Some(Address::from_word(self.0))
        } else {
            None
        }
    }

    /// Parse a `0x` hex string holding either a 20-byte address or a
    /// 32-byte word.
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
        match bytes.len() {
            20 => Ok(Self::from_address(Address::from_slice(&bytes))),
            32 => Ok(Self(B256::from_slice(&bytes))),
            actual => Err(TypesError::InvalidLength {
                expected: "20 or 32 bytes",
                actual,
            }),
        }
    }
}

impl From<Address> for Destination {
    fn from(address: Address) -> Self {
        Self::from_address(address)
    }
}

impl From<B256> for Destination {
    fn from(word: B256) -> Self {
        Self(word)
    }
}

impl FromStr for Destination {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Destination({})", hex::encode(&self.0[12..16]))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Destination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Destination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A_ADDRESS: &str = "0x96f7123E3A80C9813eF50213ADEd0e4511CB820f";

    #[test]
    fn address_is_left_padded() {
        let destination = Destination::parse(A_ADDRESS).unwrap();
        assert_eq!(&destination.as_bytes()[..12], &[0u8; 12]);
        assert_eq!(
            destination.to_string(),
            "0x00000000000000000000000096f7123e3a80c9813ef50213aded0e4511cb820f"
        );
    }

    #[test]
    fn comparison_ignores_letter_case() {
        let mixed = Destination::parse(A_ADDRESS).unwrap();
        let lower = Destination::parse(&A_ADDRESS.to_lowercase()).unwrap();
        let padded = Destination::parse(&mixed.to_string().to_uppercase().replacen("0X", "0x", 1))
            .unwrap();
        assert_eq!(mixed, lower);
        assert_eq!(mixed, padded);
    }

    #[test]
    fn as_address_only_for_padded_words() {
        let destination = Destination::parse(A_ADDRESS).unwrap();
        let address = destination.as_address().unwrap();
        assert_eq!(Destination::from_address(address), destination);

        let channel = Destination::new([0xab; 32]);
        assert!(channel.as_address().is_none());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            Destination::parse("0x1234"),
            Err(TypesError::InvalidLength { actual: 2, .. })
        ));
        assert!(matches!(
            Destination::parse("0xzz"),
            Err(TypesError::InvalidHex(_))
        ));
    }
}
