//! Settlement errors.
//!
//! Every variant aborts the whole call; callers never see a partially
//! updated outcome.

use exit_format_codec::CodecError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("{what} has {actual} assets, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("allocation {index} of asset {asset_index} is not a guarantee")]
    NotAGuarantee { asset_index: usize, index: usize },

    #[error("allocation {index} is a guarantee and can only be paid out by a claim")]
    CannotTransferGuarantee { index: usize },

    #[error("target index {index} out of range for asset {asset_index} with {len} allocations")]
    TargetIndexOutOfRange {
        asset_index: usize,
        index: usize,
        len: usize,
    },

    #[error("guarantee metadata for asset {asset_index} could not be decoded: {source}")]
    DecodeFailure {
        asset_index: usize,
        #[source]
        source: CodecError,
    },

    #[error("config error: {0}")]
    Config(String),
}
