//! Solidity ABI head/tail encoding.
//!
//! Only the shapes the exit format needs are supported: 32-byte words
//! (`bytes32`, `uint256`, `uint8`, `address`), `bytes`, `string`, dynamic
//! arrays, and tuples. Static values are laid out inline in the head;
//! dynamic values get a head slot holding the offset of their tail,
//! measured from the start of the enclosing sequence.

use crate::CodecError;

/// Size of one ABI word.
pub const WORD: usize = 32;

/// Largest input [`decode`] will look at.
pub const MAX_DECODE_SIZE: usize = 16 * 1024 * 1024; // 16 MiB

/// A decoded (or to-be-encoded) ABI value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Word([u8; WORD]),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<Token>),
    Tuple(Vec<Token>),
}

/// The schema [`decode`] reads against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamType {
    Word,
    Bytes,
    String,
    Array(Box<ParamType>),
    Tuple(Vec<ParamType>),
}

impl ParamType {
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Word => false,
            Self::Bytes | Self::String | Self::Array(_) => true,
            Self::Tuple(members) => members.iter().any(Self::is_dynamic),
        }
    }

    /// Bytes this type occupies in the head of its enclosing sequence.
    pub fn head_size(&self) -> usize {
        match self {
            Self::Tuple(members) if !self.is_dynamic() => {
                members.iter().map(Self::head_size).sum()
            }
            _ => WORD,
        }
    }
}

impl Token {
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Word(_) => false,
            Self::Bytes(_) | Self::String(_) | Self::Array(_) => true,
            Self::Tuple(items) => items.iter().any(Self::is_dynamic),
        }
    }

    fn head_size(&self) -> usize {
        match self {
            Self::Tuple(items) if !self.is_dynamic() => items.iter().map(Self::head_size).sum(),
            _ => WORD,
        }
    }

    pub fn into_word(self) -> Result<[u8; WORD], CodecError> {
        match self {
            Self::Word(word) => Ok(word),
            _ => Err(CodecError::UnexpectedToken("word")),
        }
    }

    pub fn into_bytes(self) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            _ => Err(CodecError::UnexpectedToken("bytes")),
        }
    }

    pub fn into_string(self) -> Result<String, CodecError> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(CodecError::UnexpectedToken("string")),
        }
    }

    pub fn into_array(self) -> Result<Vec<Token>, CodecError> {
        match self {
            Self::Array(items) => Ok(items),
            _ => Err(CodecError::UnexpectedToken("array")),
        }
    }

    pub fn into_tuple(self) -> Result<Vec<Token>, CodecError> {
        match self {
            Self::Tuple(items) => Ok(items),
            _ => Err(CodecError::UnexpectedToken("tuple")),
        }
    }
}

// ── Encoding ───────────────────────────────────────────────────────────

/// Encode a parameter list, as `abi.encode(...)` does.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len: usize = tokens.iter().map(Token::head_size).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            encode_into(token, &mut tail);
        } else {
            encode_into(token, &mut head);
        }
    }
    head.extend_from_slice(&tail);
    head
}

fn encode_into(token: &Token, out: &mut Vec<u8>) {
    match token {
        Token::Word(word) => out.extend_from_slice(word),
        Token::Bytes(bytes) => encode_packed(bytes, out),
        Token::String(s) => encode_packed(s.as_bytes(), out),
        Token::Array(items) => {
            out.extend_from_slice(&usize_word(items.len()));
            out.extend_from_slice(&encode(items));
        }
        Token::Tuple(items) => out.extend_from_slice(&encode(items)),
    }
}

/// Length word followed by the data right-padded to a word boundary.
fn encode_packed(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&usize_word(bytes.len()));
    out.extend_from_slice(bytes);
    let padding = (WORD - bytes.len() % WORD) % WORD;
    out.resize(out.len() + padding, 0);
}

// ── Decoding ───────────────────────────────────────────────────────────

/// Decode a parameter list against `types`.
///
/// Returns exactly one token per type. In a well-formed encoding every
/// word, byte string, string and array owns at least one distinct word of
/// input, and byte contents never overlap. Decoding stops with
/// [`CodecError::Amplified`] once more values than `data.len() / WORD`, or
/// more content bytes than `data.len()`, have been produced, so offsets
/// that alias one shared tail cannot expand the output.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, CodecError> {
    if data.len() > MAX_DECODE_SIZE {
        return Err(CodecError::TooLarge {
            size: data.len(),
            max: MAX_DECODE_SIZE,
        });
    }
    let mut decoder = Decoder {
        data,
        values_left: data.len() / WORD,
        bytes_left: data.len(),
    };
    decoder.sequence(types.iter(), 0)
}

/// Decode a single parameter, for the common one-type case.
pub fn decode_single(ty: &ParamType, data: &[u8]) -> Result<Token, CodecError> {
    decode(std::slice::from_ref(ty), data)?
        .into_iter()
        .next()
        .ok_or(CodecError::UnexpectedToken("single value"))
}

struct Decoder<'a> {
    data: &'a [u8],
    values_left: usize,
    bytes_left: usize,
}

impl<'a> Decoder<'a> {
    fn charge_value(&mut self) -> Result<(), CodecError> {
        self.values_left = self.values_left.checked_sub(1).ok_or(CodecError::Amplified)?;
        Ok(())
    }

    fn packed(&mut self, at: usize) -> Result<&'a [u8], CodecError> {
        let bytes = read_packed(self.data, at)?;
        self.bytes_left = self
            .bytes_left
            .checked_sub(bytes.len())
            .ok_or(CodecError::Amplified)?;
        Ok(bytes)
    }

    fn sequence<'t>(
        &mut self,
        types: impl Iterator<Item = &'t ParamType>,
        base: usize,
    ) -> Result<Vec<Token>, CodecError> {
        let mut tokens = Vec::new();
        let mut head = base;
        for ty in types {
            if ty.is_dynamic() {
                let offset = read_usize(self.data, head)?;
                let at = base.checked_add(offset).ok_or(CodecError::LengthOverflow)?;
                if at >= self.data.len() {
                    return Err(CodecError::OffsetOutOfRange {
                        offset: at,
                        len: self.data.len(),
                    });
                }
                tokens.push(self.value(ty, at)?);
                head += WORD;
            } else {
                tokens.push(self.value(ty, head)?);
                head += ty.head_size();
            }
        }
        Ok(tokens)
    }

    fn value(&mut self, ty: &ParamType, at: usize) -> Result<Token, CodecError> {
        if !matches!(ty, ParamType::Tuple(_)) {
            self.charge_value()?;
        }
        match ty {
            ParamType::Word => read_word(self.data, at).map(Token::Word),
            ParamType::Bytes => self.packed(at).map(|bytes| Token::Bytes(bytes.to_vec())),
            ParamType::String => {
                let bytes = self.packed(at)?;
                String::from_utf8(bytes.to_vec())
                    .map(Token::String)
                    .map_err(|_| CodecError::InvalidUtf8)
            }
            ParamType::Array(inner) => {
                let len = read_usize(self.data, at)?;
                let body = at + WORD;
                // Each element occupies at least its head slot.
                let needed = len
                    .checked_mul(inner.head_size())
                    .ok_or(CodecError::LengthOverflow)?;
                ensure(self.data, body, needed)?;
                self.sequence(std::iter::repeat(inner.as_ref()).take(len), body)
                    .map(Token::Array)
            }
            ParamType::Tuple(members) => self.sequence(members.iter(), at).map(Token::Tuple),
        }
    }
}

fn ensure(data: &[u8], offset: usize, needed: usize) -> Result<(), CodecError> {
    let end = offset.checked_add(needed).ok_or(CodecError::LengthOverflow)?;
    if end > data.len() {
        return Err(CodecError::Truncated {
            offset,
            needed,
            available: data.len().saturating_sub(offset),
        });
    }
    Ok(())
}

fn read_word(data: &[u8], at: usize) -> Result<[u8; WORD], CodecError> {
    ensure(data, at, WORD)?;
    let mut word = [0u8; WORD];
    word.copy_from_slice(&data[at..at + WORD]);
    Ok(word)
}

fn read_usize(data: &[u8], at: usize) -> Result<usize, CodecError> {
    let word = read_word(data, at)?;
    word_to_usize(&word)
}

fn read_packed(data: &[u8], at: usize) -> Result<&[u8], CodecError> {
    let len = read_usize(data, at)?;
    let start = at + WORD;
    ensure(data, start, len)?;
    Ok(&data[start..start + len])
}

// ── Word helpers ───────────────────────────────────────────────────────

pub fn usize_word(value: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

pub fn word_to_usize(word: &[u8; WORD]) -> Result<usize, CodecError> {
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(CodecError::LengthOverflow);
    }
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(tail)).map_err(|_| CodecError::LengthOverflow)
}

pub fn u8_word(value: u8) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 1] = value;
    word
}

/// A `uint8` word; anything above 255 is rejected.
pub fn word_to_u8(word: &[u8; WORD]) -> Result<u8, CodecError> {
    if word[..WORD - 1].iter().any(|b| *b != 0) {
        return Err(CodecError::NonCanonical("uint8"));
    }
    Ok(word[WORD - 1])
}
