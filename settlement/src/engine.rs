//! Configured entry point for settlement calls.

use exit_format_types::{Amount, ExitRequest, SingleAssetExit};

use crate::claim::{claim_with_indexing, ClaimOutcome};
use crate::config::SettlementConfig;
use crate::transfer::{transfer, TransferOutcome};
use crate::SettlementError;

/// Runs transfers and claims under one [`SettlementConfig`].
///
/// Holds no state between calls. Callers sequencing several claims thread
/// each result into the next call themselves.
#[derive(Clone, Debug, Default)]
pub struct SettlementEngine {
    config: SettlementConfig,
}

impl SettlementEngine {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    pub fn transfer(
        &self,
        outcome: &[SingleAssetExit],
        holdings: &[Amount],
        request: &ExitRequest,
    ) -> Result<TransferOutcome, SettlementError> {
        let _span = tracing::debug_span!("transfer", assets = outcome.len()).entered();
        transfer(outcome, holdings, request)
    }

    pub fn claim(
        &self,
        guarantees: &[SingleAssetExit],
        holdings: &[Amount],
        target_index: usize,
        target_outcome: &[SingleAssetExit],
        request: &ExitRequest,
    ) -> Result<ClaimOutcome, SettlementError> {
        let _span = tracing::debug_span!(
            "claim",
            assets = guarantees.len(),
            target_index,
            indexing = ?self.config.claim_indexing
        )
        .entered();
        claim_with_indexing(
            guarantees,
            holdings,
            target_index,
            target_outcome,
            request,
            self.config.claim_indexing,
        )
    }
}
