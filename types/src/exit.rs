//! Outcomes and exits.

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

use crate::allocation::Allocation;
use crate::amount::Amount;

/// All claims against one asset, in priority order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleAssetExit {
    /// Token contract address; the zero address denotes the native asset.
    pub asset: Address,
    /// Describes the asset's token type (e.g. an ERC-1155 token id).
    pub metadata: Bytes,
    pub allocations: Vec<Allocation>,
}

impl SingleAssetExit {
    pub fn new(asset: Address, metadata: Bytes, allocations: Vec<Allocation>) -> Self {
        Self {
            asset,
            metadata,
            allocations,
        }
    }

    /// Same asset and metadata, different allocations.
    pub fn with_allocations(&self, allocations: Vec<Allocation>) -> Self {
        Self {
            asset: self.asset,
            metadata: self.metadata.clone(),
            allocations,
        }
    }

    /// Sum of every allocation amount for this asset.
    pub fn total(&self) -> Amount {
        self.allocations.iter().map(|a| a.amount).sum()
    }
}

/// One entry per asset; the position is the asset index and lines up with
/// the holdings vector.
pub type Exit = Vec<SingleAssetExit>;

/// Sum of every allocation amount across all assets.
///
/// Only meaningful when all assets share a unit; used by conservation checks.
pub fn exit_total(exit: &[SingleAssetExit]) -> Amount {
    exit.iter().map(SingleAssetExit::total).sum()
}
