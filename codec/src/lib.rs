//! Byte encodings for the exit format.
//!
//! Everything here follows the Solidity ABI so that outcomes computed
//! off-chain encode to the exact bytes the on-chain settlement layer
//! produces and consumes.

pub mod abi;
pub mod error;
pub mod exit;
pub mod guarantee;
pub mod metadata;

pub use error::CodecError;
pub use exit::{
    decode_allocation, decode_allocations, decode_exit, encode_allocation, encode_allocations,
    encode_exit,
};
pub use guarantee::{decode_guarantee_data, encode_guarantee_data};
pub use metadata::{
    decode_tag_list, decode_token_id_metadata, decode_typed_exit_metadata,
    encode_erc1155_exit_metadata, encode_tag_list, encode_token_id_metadata,
    encode_typed_exit_metadata, ExitMetadataType, TypedExitMetadata,
};
