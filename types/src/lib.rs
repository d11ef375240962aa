//! Fundamental types for exit-format settlement.
//!
//! This crate defines the values every other crate in the workspace passes
//! around: amounts, destinations, allocations, per-asset exits, and exit
//! requests.

pub mod allocation;
pub mod amount;
pub mod destination;
pub mod error;
pub mod exit;
pub mod selector;

pub use allocation::{Allocation, AllocationType};
pub use amount::Amount;
pub use destination::Destination;
pub use error::TypesError;
pub use exit::{exit_total, Exit, SingleAssetExit};
pub use selector::{ExitRequest, ExitSelector, SelectionCursor};

pub use alloy_primitives::{Address, Bytes, B256, U256};
