//! Allocations: who is owed how much of one asset.

use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::destination::Destination;
use crate::error::TypesError;

/// How an allocation is to be paid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum AllocationType {
    /// Paid directly to the destination.
    #[default]
    Simple = 0,
    /// Paid to a helper contract named by the destination.
    WithdrawHelper = 1,
    /// Backs destinations of another channel; only released via a claim.
    Guarantee = 2,
}

impl AllocationType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_guarantee(self) -> bool {
        self == Self::Guarantee
    }
}

impl From<AllocationType> for u8 {
    fn from(kind: AllocationType) -> Self {
        kind.as_u8()
    }
}

impl TryFrom<u8> for AllocationType {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Simple),
            1 => Ok(Self::WithdrawHelper),
            2 => Ok(Self::Guarantee),
            other => Err(TypesError::UnknownAllocationType(other)),
        }
    }
}

/// A single entry in an outcome's allocation table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub destination: Destination,
    pub amount: Amount,
    pub allocation_type: AllocationType,
    /// Opaque to the settlement algorithms, except for guarantees where it
    /// encodes the ordered destination list.
    pub metadata: Bytes,
}

impl Allocation {
    pub fn new(
        destination: Destination,
        amount: Amount,
        allocation_type: AllocationType,
        metadata: Bytes,
    ) -> Self {
        Self {
            destination,
            amount,
            allocation_type,
            metadata,
        }
    }

    /// A `Simple` allocation with empty metadata.
    pub fn simple(destination: Destination, amount: Amount) -> Self {
        Self::new(destination, amount, AllocationType::Simple, Bytes::new())
    }

    /// A `Guarantee` allocation whose metadata is an encoded destination list.
    pub fn guarantee(destination: Destination, amount: Amount, metadata: Bytes) -> Self {
        Self::new(destination, amount, AllocationType::Guarantee, metadata)
    }

    pub fn is_guarantee(&self) -> bool {
        self.allocation_type.is_guarantee()
    }

    /// Copy of this allocation carrying a different amount.
    pub fn with_amount(&self, amount: Amount) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_type_roundtrips_through_u8() {
        for kind in [
            AllocationType::Simple,
            AllocationType::WithdrawHelper,
            AllocationType::Guarantee,
        ] {
            assert_eq!(AllocationType::try_from(kind.as_u8()).unwrap(), kind);
        }
        assert!(matches!(
            AllocationType::try_from(3),
            Err(TypesError::UnknownAllocationType(3))
        ));
    }

    #[test]
    fn json_shape_matches_field_names() {
        let allocation = Allocation::simple(Destination::new([1; 32]), Amount::from(5u64));
        let json = serde_json::to_value(&allocation).unwrap();
        assert_eq!(json["amount"], "0x05");
        assert_eq!(json["allocationType"], 0);
        assert_eq!(json["metadata"], "0x");

        let back: Allocation = serde_json::from_value(json).unwrap();
        assert_eq!(back, allocation);
    }

    #[test]
    fn with_amount_leaves_original_untouched() {
        let original = Allocation::simple(Destination::new([2; 32]), Amount::from(5u64));
        let updated = original.with_amount(Amount::ZERO);
        assert_eq!(original.amount, Amount::from(5u64));
        assert_eq!(updated.amount, Amount::ZERO);
        assert_eq!(updated.destination, original.destination);
    }
}
