// crates/homematic-rs-devdesc/src/cast/tiny_float.rs

use super::{CastContext, PacketCast, read_i32};
use crate::logging::dd_debug;
use homematic_rs::Variable;
use serde::{Deserialize, Serialize};

/// An integer stored as `mantissa << exponent`, both packed into one field.
///
/// Start positions and sizes are in bits, counted from the least
/// significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntegerTinyFloat {
    pub mantissa_start: u32,
    pub mantissa_size: u32,
    pub exponent_start: u32,
    pub exponent_size: u32,
}

impl Default for IntegerTinyFloat {
    fn default() -> Self {
        Self {
            mantissa_start: 5,
            mantissa_size: 11,
            exponent_start: 0,
            exponent_size: 5,
        }
    }
}

fn field_mask(size: u32) -> u64 {
    if size >= 32 {
        u64::from(u32::MAX)
    } else {
        (1u64 << size) - 1
    }
}

impl IntegerTinyFloat {
    pub fn new(
        mantissa_start: u32,
        mantissa_size: u32,
        exponent_start: u32,
        exponent_size: u32,
    ) -> Self {
        Self {
            mantissa_start,
            mantissa_size,
            exponent_start,
            exponent_size,
        }
    }

    /// Unpacks a raw field into its integer value.
    pub fn decode(&self, raw: u32) -> i64 {
        let raw = u64::from(raw);
        let mantissa = (raw >> self.mantissa_start.min(63)) & field_mask(self.mantissa_size);
        let exponent = (raw >> self.exponent_start.min(63)) & field_mask(self.exponent_size);
        // Exponents past 31 cannot describe a 32 bit value.
        (mantissa << exponent.min(31)) as i64
    }

    /// Packs `value` by shifting the mantissa right until it fits. Values
    /// too large for the exponent field saturate at the largest encoding.
    pub fn encode(&self, value: i64) -> u32 {
        let max_mantissa = field_mask(self.mantissa_size);
        let max_exponent = field_mask(self.exponent_size);
        let mut mantissa = value.max(0) as u64;
        let mut exponent = 0u64;
        while mantissa > max_mantissa {
            mantissa >>= 1;
            exponent += 1;
        }
        if exponent > max_exponent {
            mantissa = max_mantissa;
            exponent = max_exponent;
        }
        let raw = (mantissa << self.mantissa_start.min(63))
            | (exponent << self.exponent_start.min(63));
        raw as u32
    }
}

impl PacketCast for IntegerTinyFloat {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let raw = read_i32(value) as u32;
        let decoded = self.decode(raw);
        value.set_integer(super::saturate_i32(decoded));
    }

    fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        let logical = read_i32(value);
        if logical < 0 {
            dd_debug!(ctx, "integerTinyFloat: negative value {} encoded as 0", logical);
        }
        value.set_integer(self.encode(i64::from(logical)) as i32);
    }
}
