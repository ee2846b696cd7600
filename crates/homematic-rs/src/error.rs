use core::array::TryFromSliceError;
use core::fmt;
use std::string::FromUtf8Error;

/// Errors raised while decoding binary RPC payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcError {
    /// The provided buffer ended before the value was complete.
    BufferTooShort,
    /// The packet does not start with the `Bin` signature.
    InvalidHeader,
    /// A value carried a type id that is not known.
    UnknownType(u32),
    /// A string or struct key was not valid UTF-8.
    InvalidUtf8,
    /// A multi-byte value could not be parsed from a slice.
    SliceConversion,
    /// Arrays or structs were nested deeper than the decoder accepts.
    NestingTooDeep,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooShort => write!(f, "Buffer is too short for the encoded value"),
            Self::InvalidHeader => write!(f, "Packet does not start with a binary RPC header"),
            Self::UnknownType(v) => write!(f, "Unknown binary RPC type id: {v:#06x}"),
            Self::InvalidUtf8 => write!(f, "String payload is not valid UTF-8"),
            Self::SliceConversion => write!(f, "Failed to convert slice to a fixed-size array"),
            Self::NestingTooDeep => write!(f, "Arrays or structs are nested too deeply"),
        }
    }
}

impl std::error::Error for RpcError {}

// --- From Implementations for Error Conversion ---

impl From<TryFromSliceError> for RpcError {
    fn from(_: TryFromSliceError) -> Self {
        RpcError::SliceConversion
    }
}

impl From<FromUtf8Error> for RpcError {
    fn from(_: FromUtf8Error) -> Self {
        RpcError::InvalidUtf8
    }
}
