//! Releasing a guarantor channel's funds through one of its guarantees.
//!
//! A guarantee names, in its metadata, the destinations it pays and the
//! order it pays them in. Claiming walks that list, finds each destination
//! in the target channel's outcome and pays it from the pool the guarantee
//! can release.

use exit_format_codec::decode_guarantee_data;
use exit_format_types::{Allocation, Amount, Destination, ExitRequest, ExitSelector, SingleAssetExit};
use serde::{Deserialize, Serialize};

use crate::transfer::check_asset_counts;
use crate::SettlementError;

/// What the indices of a claim's exit request refer to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimIndexing {
    /// Positions in the target channel's allocation table, as for transfers.
    #[default]
    TargetAllocation,
    /// Positions in the guarantee's destination list.
    GuaranteeDestination,
}

/// Result of paying a target table through a guarantee's destinations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuaranteeDistribution {
    /// Same length and order as the target table.
    pub new_allocations: Vec<Allocation>,
    /// One entry per paid destination, in guarantee order.
    pub exit_allocations: Vec<Allocation>,
    pub total_payout: Amount,
}

/// Everything a claim produces. The inputs are never modified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimOutcome {
    pub updated_guarantee_outcome: Vec<SingleAssetExit>,
    pub updated_holdings: Vec<Amount>,
    pub updated_target_outcome: Vec<SingleAssetExit>,
    pub exit: Vec<SingleAssetExit>,
}

/// Distribute `pool` over `target_allocations` in the order `destinations`
/// lists them.
///
/// For each destination the first target entry with the same destination
/// is considered; it can afford `min(current amount, pool)` and that much
/// always leaves the pool. Only selected entries are reduced and paid.
/// Destinations missing from the target table are skipped. Once the pool is
/// empty, or every requested index has been paid, no further destinations
/// are visited.
pub fn compute_new_allocations_with_guarantee(
    pool: Amount,
    target_allocations: &[Allocation],
    destinations: &[Destination],
    selector: &ExitSelector,
    indexing: ClaimIndexing,
) -> GuaranteeDistribution {
    let mut new_allocations = target_allocations.to_vec();
    let mut exit_allocations = Vec::new();
    let mut total_payout = Amount::ZERO;
    let mut pool = pool;
    let mut cursor = selector.cursor();

    for (destination_index, destination) in destinations.iter().enumerate() {
        if pool.is_zero() || cursor.is_exhausted() {
            break;
        }
        let Some(target_index) = new_allocations
            .iter()
            .position(|a| a.destination == *destination)
        else {
            tracing::trace!(%destination, "destination not in target outcome");
            continue;
        };

        let current = &new_allocations[target_index];
        let affords = current.amount.min(pool);
        let requested_index = match indexing {
            ClaimIndexing::TargetAllocation => target_index,
            ClaimIndexing::GuaranteeDestination => destination_index,
        };

        if cursor.selects(requested_index) {
            exit_allocations.push(current.with_amount(affords));
            let remaining = current.amount.saturating_sub(affords);
            new_allocations[target_index].amount = remaining;
            total_payout = total_payout + affords;
            cursor.advance();
            tracing::trace!(target_index, %destination, paid = %affords, "destination paid");
        }

        pool = pool.saturating_sub(affords);
    }

    GuaranteeDistribution {
        new_allocations,
        exit_allocations,
        total_payout,
    }
}

/// Claim against the guarantee at `target_index` of every asset, with
/// request indices referring to target allocation positions.
pub fn claim(
    guarantees: &[SingleAssetExit],
    holdings: &[Amount],
    target_index: usize,
    target_outcome: &[SingleAssetExit],
    request: &ExitRequest,
) -> Result<ClaimOutcome, SettlementError> {
    claim_with_indexing(
        guarantees,
        holdings,
        target_index,
        target_outcome,
        request,
        ClaimIndexing::default(),
    )
}

/// [`claim`] with an explicit request-indexing convention.
///
/// Per asset, the guarantee's pool is what the guarantor holds after every
/// earlier allocation in its table has been set aside, capped by the
/// guarantee's own amount. An asset whose pool would be zero is skipped: its
/// outcomes and holdings are returned unchanged and its exit entry is empty.
pub fn claim_with_indexing(
    guarantees: &[SingleAssetExit],
    holdings: &[Amount],
    target_index: usize,
    target_outcome: &[SingleAssetExit],
    request: &ExitRequest,
    indexing: ClaimIndexing,
) -> Result<ClaimOutcome, SettlementError> {
    check_asset_counts(target_outcome.len(), holdings.len(), request)?;
    if guarantees.len() != holdings.len() {
        return Err(SettlementError::LengthMismatch {
            what: "guarantee outcome",
            expected: holdings.len(),
            actual: guarantees.len(),
        });
    }

    let mut updated_guarantee_outcome = guarantees.to_vec();
    let mut updated_holdings = holdings.to_vec();
    let mut updated_target_outcome = Vec::with_capacity(target_outcome.len());
    let mut exit = Vec::with_capacity(target_outcome.len());

    for (asset_index, (guarantor, target)) in guarantees.iter().zip(target_outcome).enumerate() {
        let guarantee = guarantor.allocations.get(target_index).ok_or(
            SettlementError::TargetIndexOutOfRange {
                asset_index,
                index: target_index,
                len: guarantor.allocations.len(),
            },
        )?;
        if !guarantee.is_guarantee() {
            return Err(SettlementError::NotAGuarantee {
                asset_index,
                index: target_index,
            });
        }

        let reserved: Amount = guarantor.allocations[..target_index]
            .iter()
            .map(|a| a.amount)
            .sum();
        let available = holdings[asset_index].saturating_sub(reserved);
        if available.is_zero() {
            tracing::debug!(asset_index, %reserved, "guarantee unfunded, asset skipped");
            updated_target_outcome.push(target.clone());
            exit.push(target.with_allocations(Vec::new()));
            continue;
        }

        let pool = available.min(guarantee.amount);
        let destinations = decode_guarantee_data(&guarantee.metadata)
            .map_err(|source| SettlementError::DecodeFailure { asset_index, source })?;

        let distribution = compute_new_allocations_with_guarantee(
            pool,
            &target.allocations,
            &destinations,
            request.selector(asset_index),
            indexing,
        );

        tracing::debug!(
            asset_index,
            asset = %target.asset,
            %pool,
            destinations = destinations.len(),
            paid = %distribution.total_payout,
            "guarantee claimed"
        );

        updated_guarantee_outcome[asset_index].allocations[target_index].amount =
            guarantee.amount.saturating_sub(distribution.total_payout);
        updated_holdings[asset_index] =
            holdings[asset_index].saturating_sub(distribution.total_payout);
        updated_target_outcome.push(target.with_allocations(distribution.new_allocations));
        exit.push(target.with_allocations(distribution.exit_allocations));
    }

    Ok(ClaimOutcome {
        updated_guarantee_outcome,
        updated_holdings,
        updated_target_outcome,
        exit,
    })
}
