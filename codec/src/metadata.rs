//! Metadata annexed to exits and allocations.
//!
//! None of this is interpreted by the settlement algorithms; it travels with
//! the exit so the asset-transfer layer knows what kind of token it is
//! moving.

use alloy_primitives::{Bytes, U256};

use crate::abi::{self, u8_word, word_to_u8, ParamType, Token};
use crate::CodecError;

/// Token standard an exit's asset follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExitMetadataType {
    Erc20 = 0,
    Erc1155 = 1,
}

impl TryFrom<u8> for ExitMetadataType {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Erc20),
            1 => Ok(Self::Erc1155),
            other => Err(CodecError::UnknownMetadataType(other)),
        }
    }
}

/// Decoded form of [`encode_typed_exit_metadata`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypedExitMetadata {
    pub kind: ExitMetadataType,
    pub token_id: U256,
}

fn token_id_type() -> ParamType {
    ParamType::Tuple(vec![ParamType::Word])
}

fn token_id_token(token_id: U256) -> Token {
    Token::Tuple(vec![Token::Word(token_id.to_be_bytes::<32>())])
}

fn token_id_from_token(token: Token) -> Result<U256, CodecError> {
    let word = token
        .into_tuple()?
        .into_iter()
        .next()
        .ok_or(CodecError::UnexpectedToken("token id"))?
        .into_word()?;
    Ok(U256::from_be_bytes(word))
}

/// `abi.encode((tokenId))`.
pub fn encode_token_id_metadata(token_id: U256) -> Bytes {
    Bytes::from(abi::encode(&[token_id_token(token_id)]))
}

pub fn decode_token_id_metadata(data: &[u8]) -> Result<U256, CodecError> {
    token_id_from_token(abi::decode_single(&token_id_type(), data)?)
}

/// `abi.encode(uint8 kind, (tokenId))`.
pub fn encode_typed_exit_metadata(kind: ExitMetadataType, token_id: U256) -> Bytes {
    Bytes::from(abi::encode(&[
        Token::Word(u8_word(kind as u8)),
        token_id_token(token_id),
    ]))
}

pub fn encode_erc1155_exit_metadata(token_id: U256) -> Bytes {
    encode_typed_exit_metadata(ExitMetadataType::Erc1155, token_id)
}

pub fn decode_typed_exit_metadata(data: &[u8]) -> Result<TypedExitMetadata, CodecError> {
    let mut tokens = abi::decode(&[ParamType::Word, token_id_type()], data)?.into_iter();
    let (Some(kind), Some(token_id)) = (tokens.next(), tokens.next()) else {
        return Err(CodecError::UnexpectedToken("typed exit metadata"));
    };
    Ok(TypedExitMetadata {
        kind: ExitMetadataType::try_from(word_to_u8(&kind.into_word()?)?)?,
        token_id: token_id_from_token(token_id)?,
    })
}

/// `abi.encode(string[] tags)`.
pub fn encode_tag_list<S: AsRef<str>>(tags: &[S]) -> Bytes {
    let strings = tags
        .iter()
        .map(|tag| Token::String(tag.as_ref().to_owned()))
        .collect();
    Bytes::from(abi::encode(&[Token::Array(strings)]))
}

pub fn decode_tag_list(data: &[u8]) -> Result<Vec<String>, CodecError> {
    abi::decode_single(&ParamType::Array(Box::new(ParamType::String)), data)?
        .into_array()?
        .into_iter()
        .map(Token::into_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::WORD;

    #[test]
    fn token_id_metadata_is_one_word() {
        let encoded = encode_token_id_metadata(U256::from(42u64));
        assert_eq!(encoded.len(), WORD);
        assert_eq!(encoded[WORD - 1], 42);
        assert_eq!(decode_token_id_metadata(&encoded).unwrap(), U256::from(42u64));
    }

    #[test]
    fn erc1155_metadata_carries_kind_and_id() {
        let encoded = encode_erc1155_exit_metadata(U256::from(7u64));
        assert_eq!(encoded.len(), 2 * WORD);
        assert_eq!(encoded[WORD - 1], 1);
        assert_eq!(
            decode_typed_exit_metadata(&encoded).unwrap(),
            TypedExitMetadata {
                kind: ExitMetadataType::Erc1155,
                token_id: U256::from(7u64),
            }
        );
    }

    #[test]
    fn unknown_metadata_kind_is_rejected() {
        let mut encoded = encode_erc1155_exit_metadata(U256::ZERO).to_vec();
        encoded[WORD - 1] = 9;
        assert_eq!(
            decode_typed_exit_metadata(&encoded).unwrap_err(),
            CodecError::UnknownMetadataType(9)
        );
    }

    #[test]
    fn tag_list_roundtrip() {
        let tags = ["first-claim", "", "a tag longer than thirty-two bytes, for padding"];
        let encoded = encode_tag_list(&tags);
        assert_eq!(decode_tag_list(&encoded).unwrap(), tags);
    }

    #[test]
    fn tag_list_rejects_invalid_utf8() {
        let mut encoded = encode_tag_list(&["ab"]).to_vec();
        let last_data_word = encoded.len() - WORD;
        encoded[last_data_word] = 0xff;
        assert_eq!(decode_tag_list(&encoded).unwrap_err(), CodecError::InvalidUtf8);
    }
}
