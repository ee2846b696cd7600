// crates/homematic-rs/src/rpc/decoder.rs

use super::{HEADER_SIZE, MANTISSA_SCALE, SIGNATURE, TYPE_ERROR};
use crate::error::RpcError;
use crate::variable::{Variable, VariableType};
use log::trace;

/// Arrays and structs nested deeper than this are rejected.
const MAX_DEPTH: usize = 100;

/// Parses binary RPC packets back into `Variable` trees.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryDecoder;

impl BinaryDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes a complete response packet.
    ///
    /// # Errors
    /// Returns an `RpcError` if the header is missing, the buffer is
    /// truncated, or the payload contains an unknown type id.
    pub fn decode_response(&self, packet: &[u8]) -> Result<Variable, RpcError> {
        if packet.len() < HEADER_SIZE {
            return Err(RpcError::BufferTooShort);
        }
        if &packet[0..3] != SIGNATURE {
            return Err(RpcError::InvalidHeader);
        }
        let is_error = packet[3] == TYPE_ERROR;
        let payload_len = u32::from_be_bytes(packet[4..HEADER_SIZE].try_into()?) as usize;
        let payload = packet
            .get(HEADER_SIZE..HEADER_SIZE + payload_len)
            .ok_or(RpcError::BufferTooShort)?;
        trace!("Decoding binary RPC response with {} payload bytes", payload_len);

        if payload.is_empty() {
            return Ok(Variable::void());
        }
        let mut reader = Reader { data: payload, pos: 0 };
        let mut value = reader.read_variable(0)?;
        value.error_struct = is_error;
        Ok(value)
    }

    /// Decodes a single value without packet header.
    pub fn decode_variable(&self, data: &[u8]) -> Result<Variable, RpcError> {
        let mut reader = Reader { data, pos: 0 };
        reader.read_variable(0)
    }
}

/// Cursor over a payload slice.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], RpcError> {
        let end = self.pos.checked_add(len).ok_or(RpcError::BufferTooShort)?;
        let slice = self.data.get(self.pos..end).ok_or(RpcError::BufferTooShort)?;
        self.pos = end;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32, RpcError> {
        Ok(u32::from_be_bytes(self.take(4)?.try_into()?))
    }

    fn read_i32(&mut self) -> Result<i32, RpcError> {
        Ok(i32::from_be_bytes(self.take(4)?.try_into()?))
    }

    fn read_i64(&mut self) -> Result<i64, RpcError> {
        Ok(i64::from_be_bytes(self.take(8)?.try_into()?))
    }

    fn read_bytes(&mut self) -> Result<&'a [u8], RpcError> {
        let len = self.read_u32()? as usize;
        self.take(len)
    }

    fn read_string(&mut self) -> Result<String, RpcError> {
        Ok(String::from_utf8(self.read_bytes()?.to_vec())?)
    }

    fn read_variable(&mut self, depth: usize) -> Result<Variable, RpcError> {
        if depth > MAX_DEPTH {
            return Err(RpcError::NestingTooDeep);
        }
        let type_id = self.read_u32()?;
        let kind = VariableType::from_rpc_type_id(type_id).ok_or(RpcError::UnknownType(type_id))?;
        let mut value = Variable::new(kind);
        match kind {
            VariableType::Void => {}
            VariableType::Integer => value.integer_value = self.read_i32()?,
            VariableType::Integer64 => value.integer_value64 = self.read_i64()?,
            VariableType::Boolean => value.boolean_value = self.take(1)?[0] != 0,
            VariableType::Float => {
                let mantissa = self.read_i32()?;
                let exponent = self.read_i32()?;
                let raw = (f64::from(mantissa) / MANTISSA_SCALE) * 2f64.powi(exponent);
                value.float_value = (raw * 1_000_000.0).round() / 1_000_000.0;
            }
            VariableType::String | VariableType::Base64 => value.string_value = self.read_string()?,
            VariableType::Binary => value.binary_value = self.read_bytes()?.to_vec(),
            VariableType::Array => {
                let count = self.read_u32()? as usize;
                // Every element needs at least its 4-byte type id.
                value.array_value = Vec::with_capacity(count.min(self.data.len() / 4));
                for _ in 0..count {
                    value.array_value.push(self.read_variable(depth + 1)?);
                }
            }
            VariableType::Struct => {
                let count = self.read_u32()? as usize;
                for _ in 0..count {
                    let key = self.read_string()?;
                    let element = self.read_variable(depth + 1)?;
                    value.struct_value.insert(key, element);
                }
            }
        }
        Ok(value)
    }
}
