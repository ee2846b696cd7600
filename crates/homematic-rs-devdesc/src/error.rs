// crates/homematic-rs-devdesc/src/error.rs

use core::fmt;
use core::num::{ParseFloatError, ParseIntError};
use hex::FromHexError;
use homematic_rs::RpcError;

/// Errors that can occur while building parameter definitions or parsing
/// their configuration values.
///
/// Packet conversion itself never fails; these errors only surface from
/// construction and from the explicit parsing helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum DevDescError {
    /// An error from the binary RPC codec.
    Rpc(RpcError),

    /// A hex string contained invalid characters or had an odd length.
    HexParsing(FromHexError),

    /// A configuration value was not a valid number.
    InvalidNumber { value: String },

    /// A configuration attribute had an invalid format.
    InvalidAttributeFormat { attribute: &'static str },

    /// A scaling role has no range and the logical type provides none.
    MissingScaleInfo { parameter: String, role: u64 },

    /// A scaling role has an empty value range (min == max).
    InvalidScaleInfo { parameter: String, role: u64 },

    /// A parameter was built without a logical type.
    MissingLogical { parameter: String },

    /// A parameter was built without a physical encoding.
    MissingPhysical { parameter: String },
}

impl From<RpcError> for DevDescError {
    fn from(e: RpcError) -> Self {
        DevDescError::Rpc(e)
    }
}

impl From<FromHexError> for DevDescError {
    fn from(e: FromHexError) -> Self {
        DevDescError::HexParsing(e)
    }
}

/// Converts `ParseIntError` (e.g. from a decimal places attribute) into a user-friendly error.
impl From<ParseIntError> for DevDescError {
    fn from(e: ParseIntError) -> Self {
        DevDescError::InvalidNumber {
            value: e.to_string(),
        }
    }
}

impl From<ParseFloatError> for DevDescError {
    fn from(e: ParseFloatError) -> Self {
        DevDescError::InvalidNumber {
            value: e.to_string(),
        }
    }
}

impl fmt::Display for DevDescError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevDescError::Rpc(e) => write!(f, "Binary RPC error: {}", e),
            DevDescError::HexParsing(e) => write!(f, "Hex parsing error: {}", e),
            DevDescError::InvalidNumber { value } => write!(f, "Invalid number: {}", value),
            DevDescError::InvalidAttributeFormat { attribute } => {
                write!(f, "Invalid format for attribute: {}", attribute)
            }
            DevDescError::MissingScaleInfo { parameter, role } => write!(
                f,
                "Parameter {} role {} scales but neither the role nor the logical type define a range",
                parameter, role
            ),
            DevDescError::InvalidScaleInfo { parameter, role } => write!(
                f,
                "Parameter {} role {} has an empty value range",
                parameter, role
            ),
            DevDescError::MissingLogical { parameter } => {
                write!(f, "Parameter {} has no logical type", parameter)
            }
            DevDescError::MissingPhysical { parameter } => {
                write!(f, "Parameter {} has no physical encoding", parameter)
            }
        }
    }
}

impl std::error::Error for DevDescError {}
