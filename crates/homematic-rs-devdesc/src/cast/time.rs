// crates/homematic-rs-devdesc/src/cast/time.rs

use super::{CastContext, PacketCast, read_f64, read_i32};
use crate::error::DevDescError;
use crate::logging::{dd_debug, dd_warn};
use homematic_rs::Variable;
use serde::{Deserialize, Serialize};

/// Factors of the fixed 3+5 bit time encoding, indexed by the top 3 bits.
const FIXED_FACTORS: [f64; 8] = [0.1, 1.0, 5.0, 10.0, 60.0, 300.0, 600.0, 3600.0];

/// Upper bounds (exclusive) for picking a fixed factor on encode. Values
/// past the last bound use the last factor.
const FIXED_THRESHOLDS: [f64; 7] = [3.1, 31.0, 155.0, 310.0, 1860.0, 9300.0, 18600.0];

const FIXED_MAGNITUDE_BITS: u32 = 5;

/// A duration in seconds packed as factor index and magnitude.
///
/// With `factors` set the magnitude takes the low `value_size` bits
/// (byte.bit) and the index the bits above. Without `factors` the fixed
/// 3 bit index / 5 bit magnitude layout is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecimalConfigTime {
    pub factors: Vec<f64>,
    pub value_size: f64,
}

impl Default for DecimalConfigTime {
    fn default() -> Self {
        Self {
            factors: Vec::new(),
            value_size: 0.5,
        }
    }
}

impl DecimalConfigTime {
    pub fn with_factors(factors: Vec<f64>, value_size: f64) -> Self {
        Self {
            factors,
            value_size,
        }
    }

    /// Parses a comma separated `factors` attribute such as `"0.1,1,60"`.
    pub fn parse_factors(list: &str) -> Result<Vec<f64>, DevDescError> {
        list.split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|f| f.parse::<f64>().map_err(DevDescError::from))
            .collect()
    }

    fn magnitude_bits(&self) -> u32 {
        if self.value_size <= 0.0 {
            return 0;
        }
        let bytes = self.value_size.floor() as u32;
        let bits = ((self.value_size * 10.0).round() as u32) % 10;
        (bytes * 8 + bits).min(31)
    }
}

impl PacketCast for DecimalConfigTime {
    fn from_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        if value.is_void() {
            value.set_float(0.0);
            return;
        }
        let raw = read_i32(value) as u32;
        let seconds = if self.factors.is_empty() {
            let index = ((raw >> FIXED_MAGNITUDE_BITS) & 0x07) as usize;
            let magnitude = raw & 0x1F;
            f64::from(magnitude) * FIXED_FACTORS[index]
        } else {
            let bits = self.magnitude_bits();
            let index = (raw >> bits) as usize;
            let magnitude = raw & ((1u32 << bits) - 1);
            match self.factors.get(index) {
                Some(factor) => f64::from(magnitude) * factor,
                None => {
                    dd_warn!(ctx, "decimalConfigTime: factor index {} is out of range", index);
                    0.0
                }
            }
        };
        value.set_float(seconds);
    }

    fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        let seconds = read_f64(value).max(0.0);
        let raw = if self.factors.is_empty() {
            let index = FIXED_THRESHOLDS
                .iter()
                .position(|limit| seconds < *limit)
                .unwrap_or(FIXED_FACTORS.len() - 1);
            let magnitude = (seconds / FIXED_FACTORS[index]).round().min(31.0) as u32;
            ((index as u32) << FIXED_MAGNITUDE_BITS) | magnitude
        } else {
            let bits = self.magnitude_bits();
            let max_magnitude = f64::from((1u32 << bits) - 1);
            let fitting = self
                .factors
                .iter()
                .enumerate()
                .find(|(_, factor)| **factor > 0.0 && (seconds / **factor).round() <= max_magnitude);
            match fitting {
                Some((index, factor)) => {
                    ((index as u32) << bits) | (seconds / factor).round() as u32
                }
                None => {
                    dd_debug!(ctx, "decimalConfigTime: {} s does not fit, clamping", seconds);
                    let index = self.factors.len().saturating_sub(1) as u32;
                    (index << bits) | max_magnitude as u32
                }
            }
        };
        value.set_integer(raw as i32);
    }
}

/// `H:MM:SS` text on the parameter, seconds on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeStringSeconds;

impl PacketCast for TimeStringSeconds {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let total = read_i32(value).max(0);
        let text = format!(
            "{}:{:02}:{:02}",
            total / 3600,
            (total % 3600) / 60,
            total % 60
        );
        value.set_string(text);
    }

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        // Parts are read right to left: seconds, minutes, hours.
        let seconds = value
            .string_value
            .rsplit(':')
            .take(3)
            .zip([1, 60, 3600])
            .map(|(part, unit)| homematic_rs::math::get_number(part).saturating_mul(unit))
            .fold(0i32, i32::saturating_add);
        value.set_integer(seconds);
    }
}
