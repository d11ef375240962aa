use thiserror::Error;

use exit_format_types::TypesError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("input too large: {size} > {max}")]
    TooLarge { size: usize, max: usize },

    #[error("truncated input: need {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("offset {offset} points outside {len}-byte input")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("input expands beyond its own size through shared offsets")]
    Amplified,

    #[error("length or offset does not fit in memory")]
    LengthOverflow,

    #[error("non-canonical {0} word")]
    NonCanonical(&'static str),

    #[error("unknown allocation type {0}")]
    UnknownAllocationType(u8),

    #[error("unknown exit metadata type {0}")]
    UnknownMetadataType(u8),

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("expected {0} token")]
    UnexpectedToken(&'static str),
}

impl From<TypesError> for CodecError {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::UnknownAllocationType(value) => Self::UnknownAllocationType(value),
            _ => Self::UnexpectedToken("well-formed value"),
        }
    }
}
