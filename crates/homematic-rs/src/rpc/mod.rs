//! Binary RPC encoding of [`Variable`](crate::Variable) trees.
//!
//! Frame layout:
//!
//! ```text
//! "Bin" | type (0x01 response, 0xFF error) | u32 BE payload length | value
//! ```
//!
//! Every value starts with a big-endian u32 type id followed by its payload.

mod decoder;
mod encoder;

pub use decoder::BinaryDecoder;
pub use encoder::BinaryEncoder;

/// Signature at the start of every binary RPC packet.
pub(crate) const SIGNATURE: &[u8; 3] = b"Bin";
/// Packet type byte of a regular response.
pub(crate) const TYPE_RESPONSE: u8 = 0x01;
/// Packet type byte of an error response.
pub(crate) const TYPE_ERROR: u8 = 0xFF;
/// Size of signature, type byte and payload length.
pub(crate) const HEADER_SIZE: usize = 8;
/// Fixed-point scale of the float mantissa (2^30).
pub(crate) const MANTISSA_SCALE: f64 = 1_073_741_824.0;
