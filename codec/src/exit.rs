//! ABI codec for allocations and exits.
//!
//! ```text
//! Allocation      = tuple(bytes32 destination, uint256 amount, uint8 allocationType, bytes metadata)
//! SingleAssetExit = tuple(address asset, bytes metadata, Allocation[] allocations)
//! Exit            = SingleAssetExit[]
//! ```

use alloy_primitives::{Address, Bytes, B256};
use exit_format_types::{Allocation, AllocationType, Amount, Destination, SingleAssetExit};

use crate::abi::{self, u8_word, word_to_u8, ParamType, Token, WORD};
use crate::CodecError;

fn allocation_type() -> ParamType {
    ParamType::Tuple(vec![
        ParamType::Word,
        ParamType::Word,
        ParamType::Word,
        ParamType::Bytes,
    ])
}

fn single_asset_exit_type() -> ParamType {
    ParamType::Tuple(vec![
        ParamType::Word,
        ParamType::Bytes,
        ParamType::Array(Box::new(allocation_type())),
    ])
}

// ── Tokens ─────────────────────────────────────────────────────────────

fn allocation_token(allocation: &Allocation) -> Token {
    Token::Tuple(vec![
        Token::Word(*allocation.destination.as_bytes()),
        Token::Word(allocation.amount.to_be_bytes()),
        Token::Word(u8_word(allocation.allocation_type.as_u8())),
        Token::Bytes(allocation.metadata.to_vec()),
    ])
}

fn allocation_from_token(token: Token) -> Result<Allocation, CodecError> {
    let [destination, amount, allocation_type, metadata] = four(token.into_tuple()?)?;
    let allocation_type = AllocationType::try_from(word_to_u8(&allocation_type.into_word()?)?)?;
    Ok(Allocation {
        destination: Destination::from_word(B256::new(destination.into_word()?)),
        amount: Amount::from_be_bytes(amount.into_word()?),
        allocation_type,
        metadata: Bytes::from(metadata.into_bytes()?),
    })
}

fn single_asset_exit_token(exit: &SingleAssetExit) -> Token {
    Token::Tuple(vec![
        Token::Word(address_word(exit.asset)),
        Token::Bytes(exit.metadata.to_vec()),
        Token::Array(exit.allocations.iter().map(allocation_token).collect()),
    ])
}

fn single_asset_exit_from_token(token: Token) -> Result<SingleAssetExit, CodecError> {
    let mut fields = token.into_tuple()?.into_iter();
    let (Some(asset), Some(metadata), Some(allocations), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(CodecError::UnexpectedToken("3-field exit tuple"));
    };
    Ok(SingleAssetExit {
        asset: word_to_address(&asset.into_word()?)?,
        metadata: Bytes::from(metadata.into_bytes()?),
        allocations: allocations
            .into_array()?
            .into_iter()
            .map(allocation_from_token)
            .collect::<Result<_, _>>()?,
    })
}

fn four(fields: Vec<Token>) -> Result<[Token; 4], CodecError> {
    fields
        .try_into()
        .map_err(|_| CodecError::UnexpectedToken("4-field allocation tuple"))
}

fn address_word(address: Address) -> [u8; WORD] {
    address.into_word().0
}

/// An `address` word; the top 12 bytes must be zero.
fn word_to_address(word: &[u8; WORD]) -> Result<Address, CodecError> {
    if word[..12].iter().any(|b| *b != 0) {
        return Err(CodecError::NonCanonical("address"));
    }
    Ok(Address::from_slice(&word[12..]))
}

// ── Public codec ───────────────────────────────────────────────────────

/// `abi.encode(allocation)`.
pub fn encode_allocation(allocation: &Allocation) -> Vec<u8> {
    abi::encode(&[allocation_token(allocation)])
}

pub fn decode_allocation(data: &[u8]) -> Result<Allocation, CodecError> {
    allocation_from_token(abi::decode_single(&allocation_type(), data)?)
}

/// `abi.encode(allocations)` for an `Allocation[]`.
pub fn encode_allocations(allocations: &[Allocation]) -> Vec<u8> {
    abi::encode(&[Token::Array(
        allocations.iter().map(allocation_token).collect(),
    )])
}

pub fn decode_allocations(data: &[u8]) -> Result<Vec<Allocation>, CodecError> {
    abi::decode_single(&ParamType::Array(Box::new(allocation_type())), data)?
        .into_array()?
        .into_iter()
        .map(allocation_from_token)
        .collect()
}

/// `abi.encode(exit)` for a `SingleAssetExit[]`.
pub fn encode_exit(exit: &[SingleAssetExit]) -> Vec<u8> {
    abi::encode(&[Token::Array(
        exit.iter().map(single_asset_exit_token).collect(),
    )])
}

pub fn decode_exit(data: &[u8]) -> Result<Vec<SingleAssetExit>, CodecError> {
    abi::decode_single(&ParamType::Array(Box::new(single_asset_exit_type())), data)?
        .into_array()?
        .into_iter()
        .map(single_asset_exit_from_token)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::usize_word;

    fn dest(n: u8) -> Destination {
        Destination::new([n; 32])
    }

    fn sample_exit() -> Vec<SingleAssetExit> {
        vec![
            SingleAssetExit::new(
                Address::ZERO,
                Bytes::new(),
                vec![
                    Allocation::simple(dest(1), Amount::from(5u64)),
                    Allocation::new(
                        dest(2),
                        Amount::MAX,
                        AllocationType::WithdrawHelper,
                        Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]),
                    ),
                ],
            ),
            SingleAssetExit::new(Address::repeat_byte(0x42), Bytes::from(vec![7; 33]), vec![]),
        ]
    }

    #[test]
    fn allocation_layout_matches_abi() {
        let allocation = Allocation::simple(dest(0xaa), Amount::from(5u64));
        let encoded = encode_allocation(&allocation);
        let expected = [
            usize_word(0x20).to_vec(),
            vec![0xaa; 32],
            Amount::from(5u64).to_be_bytes().to_vec(),
            u8_word(0).to_vec(),
            usize_word(0x80).to_vec(),
            usize_word(0).to_vec(),
        ]
        .concat();
        assert_eq!(encoded, expected);
    }

    #[test]
    fn allocation_roundtrip() {
        let allocation = Allocation::guarantee(dest(9), Amount::from(10u64), Bytes::from(vec![1; 70]));
        let decoded = decode_allocation(&encode_allocation(&allocation)).unwrap();
        assert_eq!(decoded, allocation);
    }

    #[test]
    fn allocations_roundtrip() {
        let allocations = sample_exit().remove(0).allocations;
        let decoded = decode_allocations(&encode_allocations(&allocations)).unwrap();
        assert_eq!(decoded, allocations);
    }

    #[test]
    fn exit_roundtrip() {
        let exit = sample_exit();
        let encoded = encode_exit(&exit);
        let decoded = decode_exit(&encoded).unwrap();
        assert_eq!(decoded, exit);
        assert_eq!(encode_exit(&decoded), encoded);
    }

    #[test]
    fn empty_exit_is_two_words() {
        let encoded = encode_exit(&[]);
        assert_eq!(encoded, [usize_word(0x20), usize_word(0)].concat());
        assert!(decode_exit(&encoded).unwrap().is_empty());
    }

    #[test]
    fn unknown_allocation_type_is_rejected() {
        let mut encoded = encode_allocation(&Allocation::simple(dest(1), Amount::ZERO));
        // allocationType is the third tuple field, after the leading offset word.
        encoded[4 * WORD - 1] = 3;
        assert_eq!(
            decode_allocation(&encoded).unwrap_err(),
            CodecError::UnknownAllocationType(3)
        );
    }

    #[test]
    fn dirty_address_word_is_rejected() {
        let mut encoded = encode_exit(&sample_exit());
        // Outer offset, array length, two element offsets, then the asset word.
        let asset_word_start = 4 * WORD;
        encoded[asset_word_start] = 1;
        assert_eq!(
            decode_exit(&encoded).unwrap_err(),
            CodecError::NonCanonical("address")
        );
    }

    #[test]
    fn garbage_never_panics() {
        for len in 0..200 {
            let data: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
            let _ = decode_exit(&data);
            let _ = decode_allocation(&data);
        }
    }
}
