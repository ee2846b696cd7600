// crates/homematic-rs/src/rpc/encoder.rs

use super::{HEADER_SIZE, MANTISSA_SCALE, SIGNATURE, TYPE_ERROR, TYPE_RESPONSE};
use crate::variable::{Variable, VariableType};

/// Serializes `Variable` trees into binary RPC packets.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryEncoder;

impl BinaryEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encodes `value` as a complete response packet, header included.
    pub fn encode_response(&self, value: &Variable) -> Vec<u8> {
        let mut packet = Vec::with_capacity(HEADER_SIZE + 16);
        packet.extend_from_slice(SIGNATURE);
        packet.push(if value.error_struct {
            TYPE_ERROR
        } else {
            TYPE_RESPONSE
        });
        // Length placeholder, patched once the payload is written.
        packet.extend_from_slice(&[0; 4]);
        self.encode_variable(&mut packet, value);
        let payload_len = (packet.len() - HEADER_SIZE) as u32;
        packet[4..HEADER_SIZE].copy_from_slice(&payload_len.to_be_bytes());
        packet
    }

    /// Appends the type id and payload of `value` to `buf`.
    pub fn encode_variable(&self, buf: &mut Vec<u8>, value: &Variable) {
        buf.extend_from_slice(&value.kind.rpc_type_id().to_be_bytes());
        match value.kind {
            VariableType::Void => {}
            VariableType::Integer => buf.extend_from_slice(&value.integer_value.to_be_bytes()),
            VariableType::Integer64 => {
                buf.extend_from_slice(&value.integer_value64.to_be_bytes())
            }
            VariableType::Boolean => buf.push(u8::from(value.boolean_value)),
            VariableType::Float => encode_float(buf, value.float_value),
            VariableType::String | VariableType::Base64 => {
                encode_bytes(buf, value.string_value.as_bytes())
            }
            VariableType::Binary => encode_bytes(buf, &value.binary_value),
            VariableType::Array => {
                buf.extend_from_slice(&(value.array_value.len() as u32).to_be_bytes());
                for element in &value.array_value {
                    self.encode_variable(buf, element);
                }
            }
            VariableType::Struct => {
                buf.extend_from_slice(&(value.struct_value.len() as u32).to_be_bytes());
                for (key, element) in &value.struct_value {
                    encode_bytes(buf, key.as_bytes());
                    self.encode_variable(buf, element);
                }
            }
        }
    }
}

fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    buf.extend_from_slice(bytes);
}

/// Writes `value` as mantissa/exponent pair, mantissa normalized to [0.5, 1).
fn encode_float(buf: &mut Vec<u8>, value: f64) {
    let (mantissa, exponent) = if value.is_finite() && value != 0.0 {
        let mut temp = value.abs();
        let mut exponent: i32 = 0;
        if temp < 0.5 {
            while temp < 0.5 {
                temp *= 2.0;
                exponent -= 1;
            }
        } else {
            while temp >= 1.0 {
                temp /= 2.0;
                exponent += 1;
            }
        }
        if value < 0.0 {
            temp = -temp;
        }
        ((temp * MANTISSA_SCALE).round() as i32, exponent)
    } else {
        (0, 0)
    };
    buf.extend_from_slice(&mantissa.to_be_bytes());
    buf.extend_from_slice(&exponent.to_be_bytes());
}
