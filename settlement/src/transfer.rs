//! Direct payouts from a channel's own outcome.

use exit_format_types::{Amount, ExitRequest, SingleAssetExit};
use serde::{Deserialize, Serialize};

use crate::distribution::{compute_new_allocations, payouts_to_exit_allocations};
use crate::SettlementError;

/// Everything a transfer produces. The inputs are never modified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutcome {
    pub updated_outcome: Vec<SingleAssetExit>,
    pub updated_holdings: Vec<Amount>,
    pub exit: Vec<SingleAssetExit>,
}

/// Pay out the requested allocations of `outcome` from `holdings`.
///
/// Each asset runs through [`compute_new_allocations`] with its holdings as
/// the pool. The exit gets one entry per asset, even when nothing is paid.
pub fn transfer(
    outcome: &[SingleAssetExit],
    holdings: &[Amount],
    request: &ExitRequest,
) -> Result<TransferOutcome, SettlementError> {
    check_asset_counts(outcome.len(), holdings.len(), request)?;

    let mut updated_outcome = Vec::with_capacity(outcome.len());
    let mut updated_holdings = Vec::with_capacity(holdings.len());
    let mut exit = Vec::with_capacity(outcome.len());

    for (asset_index, (single_asset, held)) in outcome.iter().zip(holdings).enumerate() {
        let selector = request.selector(asset_index);
        let distribution = compute_new_allocations(*held, &single_asset.allocations, selector)
            .inspect_err(|e| {
                tracing::debug!(asset_index, error = %e, "transfer rejected");
            })?;

        tracing::debug!(
            asset_index,
            asset = %single_asset.asset,
            holdings = %held,
            paid = %distribution.total_payout,
            "asset transferred"
        );

        let exit_allocations =
            payouts_to_exit_allocations(&single_asset.allocations, &distribution.payouts, selector);

        updated_holdings.push(held.saturating_sub(distribution.total_payout));
        updated_outcome.push(single_asset.with_allocations(distribution.new_allocations));
        exit.push(single_asset.with_allocations(exit_allocations));
    }

    Ok(TransferOutcome {
        updated_outcome,
        updated_holdings,
        exit,
    })
}

/// The outcome and holdings must agree on the number of assets, and a
/// non-empty request must name one selector per asset.
pub(crate) fn check_asset_counts(
    assets: usize,
    holdings: usize,
    request: &ExitRequest,
) -> Result<(), SettlementError> {
    if holdings != assets {
        return Err(SettlementError::LengthMismatch {
            what: "holdings",
            expected: assets,
            actual: holdings,
        });
    }
    if !request.is_all_assets() && request.len() != assets {
        return Err(SettlementError::LengthMismatch {
            what: "exit request",
            expected: assets,
            actual: request.len(),
        });
    }
    Ok(())
}
