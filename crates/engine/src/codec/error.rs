use thiserror::Error;

/// Why a buffer could not be decoded into a packet.
///
/// Every variant carries the cursor offset at which decoding stopped so the
/// diagnostic can point at the offending byte.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of buffer at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("varint at offset {offset} is longer than {max_bytes} bytes")]
    VarIntTooLong { offset: usize, max_bytes: usize },

    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("field `{field}` out of range at offset {offset}: {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        offset: usize,
    },

    #[error("unknown packet id 0x{0:02x}")]
    UnknownPacketId(u32),
}

pub type DecodeResult<T> = Result<T, DecodeError>;
