//! Guarantee metadata: the ordered list of destinations a guarantee may pay.
//!
//! Encoded as ABI `bytes32[]`. An empty list is a valid guarantee that pays
//! nobody; empty or malformed bytes are a decode error, never an empty list.

use alloy_primitives::{Bytes, B256};
use exit_format_types::Destination;

use crate::abi::{self, ParamType, Token};
use crate::CodecError;

fn destination_list_type() -> ParamType {
    ParamType::Array(Box::new(ParamType::Word))
}

pub fn encode_guarantee_data(destinations: &[Destination]) -> Bytes {
    let words = destinations
        .iter()
        .map(|d| Token::Word(*d.as_bytes()))
        .collect();
    Bytes::from(abi::encode(&[Token::Array(words)]))
}

pub fn decode_guarantee_data(data: &[u8]) -> Result<Vec<Destination>, CodecError> {
    abi::decode_single(&destination_list_type(), data)?
        .into_array()?
        .into_iter()
        .map(|token| Ok(Destination::from_word(B256::new(token.into_word()?))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{usize_word, WORD};

    #[test]
    fn roundtrip_preserves_order() {
        let destinations = vec![
            Destination::new([3; 32]),
            Destination::new([1; 32]),
            Destination::new([2; 32]),
        ];
        let encoded = encode_guarantee_data(&destinations);
        assert_eq!(encoded.len(), 5 * WORD);
        assert_eq!(decode_guarantee_data(&encoded).unwrap(), destinations);
    }

    #[test]
    fn empty_list_is_not_empty_bytes() {
        let encoded = encode_guarantee_data(&[]);
        assert_eq!(&encoded[..], &[usize_word(WORD), usize_word(0)].concat()[..]);
        assert!(decode_guarantee_data(&encoded).unwrap().is_empty());
        assert!(decode_guarantee_data(&[]).is_err());
    }

    #[test]
    fn truncated_list_is_rejected() {
        let encoded = encode_guarantee_data(&[Destination::new([9; 32]); 2]);
        assert!(matches!(
            decode_guarantee_data(&encoded[..encoded.len() - 1]),
            Err(CodecError::Truncated { .. })
        ));
    }
}
