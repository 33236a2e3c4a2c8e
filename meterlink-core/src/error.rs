use thiserror::Error;

/// Error type for frame and payload decoding.
///
/// None of these conditions is fatal to the stream parser: the session layer
/// converts every variant into "wait for more data", "resynchronize" or
/// "drop this frame's record".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEnd(usize),

    #[error("unknown A-XDR tag 0x{0:02X}")]
    UnknownTag(u8),

    #[error("unsupported A-XDR tag 0x{0:02X}")]
    UnsupportedTag(u8),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
