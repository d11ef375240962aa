//! Settlement engine for exit-format outcomes.
//!
//! Given an outcome (per-asset allocation tables) and the funds held
//! against it, compute the residual outcome, the residual holdings and the
//! exit to pay out:
//!
//! - [`transfer`] pays a channel's own allocations directly, earlier
//!   entries first.
//! - [`claim`] releases a guarantor's funds through one of its guarantees
//!   into a target channel's allocations, in the guarantee's destination
//!   order.
//!
//! Every call is a pure function of its inputs. Whatever leaves the
//! holdings appears in the exit, and no allocation amount ever grows.

pub mod claim;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod invariants;
pub mod transfer;

pub use claim::{
    claim, claim_with_indexing, compute_new_allocations_with_guarantee, ClaimIndexing,
    ClaimOutcome, GuaranteeDistribution,
};
pub use config::SettlementConfig;
pub use distribution::{compute_new_allocations, payouts_to_exit_allocations, Distribution};
pub use engine::SettlementEngine;
pub use error::SettlementError;
pub use transfer::{transfer, TransferOutcome};
