// crates/homematic-rs-devdesc/src/cast/scale.rs

//! Arithmetic casts: scaling, offsets and rounding.

use super::{CastContext, PacketCast, read_f64, read_i32, round_i32, saturate_i32};
use crate::error::DevDescError;
use crate::logging::{dd_debug, dd_warn};
use homematic_rs::{Variable, VariableType};
use serde::{Deserialize, Serialize};

// --- DecimalIntegerScale ---

/// `float = int / factor - offset` on decode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimalIntegerScale {
    pub factor: f64,
    pub offset: f64,
}

impl Default for DecimalIntegerScale {
    fn default() -> Self {
        Self {
            factor: 1.0,
            offset: 0.0,
        }
    }
}

impl DecimalIntegerScale {
    /// A factor of 0 is replaced by 1.
    pub fn new(factor: f64, offset: f64) -> Self {
        if factor == 0.0 {
            dd_warn!("decimalIntegerScale: factor 0 is not allowed, using 1");
            return Self { factor: 1.0, offset };
        }
        Self { factor, offset }
    }

    fn factor(&self, ctx: &CastContext<'_>) -> f64 {
        if self.factor == 0.0 {
            dd_warn!(ctx, "decimalIntegerScale: factor is 0, using 1");
            return 1.0;
        }
        self.factor
    }
}

impl PacketCast for DecimalIntegerScale {
    fn from_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        let factor = self.factor(ctx);
        let raw = f64::from(read_i32(value));
        value.set_float(raw / factor - self.offset);
    }

    fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        let factor = self.factor(ctx);
        let logical = read_f64(value);
        value.set_integer(round_i32((logical + self.offset) * factor));
    }
}

// --- IntegerIntegerScale ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleOperation {
    #[default]
    None,
    Division,
    Multiplication,
}

/// Integer to integer scaling. `Division` divides on the way to the
/// device, `Multiplication` multiplies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegerIntegerScale {
    pub operation: ScaleOperation,
    pub factor: f64,
    pub offset: i32,
}

impl Default for IntegerIntegerScale {
    fn default() -> Self {
        Self {
            operation: ScaleOperation::None,
            factor: 10.0,
            offset: 0,
        }
    }
}

impl IntegerIntegerScale {
    pub fn new(operation: ScaleOperation, factor: f64, offset: i32) -> Self {
        Self {
            operation,
            factor,
            offset,
        }
    }

    fn factor(&self, ctx: &CastContext<'_>) -> f64 {
        if self.factor == 0.0 {
            dd_warn!(ctx, "integerIntegerScale: factor is 0, using 1");
            return 1.0;
        }
        self.factor
    }
}

impl PacketCast for IntegerIntegerScale {
    fn from_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        let raw = read_i32(value);
        let scaled = match self.operation {
            ScaleOperation::None => {
                value.set_integer(raw);
                return;
            }
            ScaleOperation::Division => f64::from(raw) * self.factor(ctx),
            ScaleOperation::Multiplication => f64::from(raw) / self.factor(ctx),
        };
        value.set_integer(saturate_i32(
            i64::from(round_i32(scaled)) - i64::from(self.offset),
        ));
    }

    fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        let raw = read_i32(value);
        let logical = f64::from(raw) + f64::from(self.offset);
        let scaled = match self.operation {
            ScaleOperation::None => {
                value.set_integer(raw);
                return;
            }
            ScaleOperation::Division => logical / self.factor(ctx),
            ScaleOperation::Multiplication => logical * self.factor(ctx),
        };
        value.set_integer(round_i32(scaled));
    }
}

// --- IntegerOffset / DecimalOffset ---

/// Adds or subtracts a constant. With `direction_to_packet` the configured
/// operation runs on encode and its inverse on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntegerOffset {
    pub offset: i32,
    pub add_offset: bool,
    pub direction_to_packet: bool,
}

impl Default for IntegerOffset {
    fn default() -> Self {
        Self {
            offset: 0,
            add_offset: false,
            direction_to_packet: true,
        }
    }
}

impl IntegerOffset {
    pub fn new(offset: i32, add_offset: bool) -> Self {
        Self {
            offset,
            add_offset,
            ..Self::default()
        }
    }

    fn apply(&self, value: i32, add: bool) -> i32 {
        if add {
            value.saturating_add(self.offset)
        } else {
            value.saturating_sub(self.offset)
        }
    }
}

impl PacketCast for IntegerOffset {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let add = self.add_offset != self.direction_to_packet;
        let result = self.apply(read_i32(value), add);
        value.set_integer(result);
    }

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let add = self.add_offset == self.direction_to_packet;
        let result = self.apply(read_i32(value), add);
        value.set_integer(result);
    }
}

/// [`IntegerOffset`] over floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecimalOffset {
    pub offset: f64,
    pub add_offset: bool,
    pub direction_to_packet: bool,
}

impl Default for DecimalOffset {
    fn default() -> Self {
        Self {
            offset: 0.0,
            add_offset: false,
            direction_to_packet: true,
        }
    }
}

impl DecimalOffset {
    pub fn new(offset: f64, add_offset: bool) -> Self {
        Self {
            offset,
            add_offset,
            ..Self::default()
        }
    }

    fn apply(&self, value: f64, add: bool) -> f64 {
        if add { value + self.offset } else { value - self.offset }
    }
}

impl PacketCast for DecimalOffset {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let add = self.add_offset != self.direction_to_packet;
        let result = self.apply(read_f64(value), add);
        value.set_float(result);
    }

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let add = self.add_offset == self.direction_to_packet;
        let result = self.apply(read_f64(value), add);
        value.set_float(result);
    }
}

// --- Round ---

/// Rounds floats to `decimal_places` digits, or to the nearest 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Round {
    pub decimal_places: i32,
    pub round_to_point5: bool,
}

impl Default for Round {
    fn default() -> Self {
        Self {
            decimal_places: 1,
            round_to_point5: false,
        }
    }
}

impl Round {
    /// Builds the cast from a `decimalPlaces` attribute. `"0.5"` selects
    /// rounding to the nearest half; anything unparsable keeps the default.
    pub fn new(decimal_places: &str) -> Self {
        Self::parse(decimal_places).unwrap_or_else(|e| {
            dd_warn!("round: {}, using default decimal places", e);
            Self::default()
        })
    }

    /// Strict variant of [`Round::new`].
    pub fn parse(decimal_places: &str) -> Result<Self, DevDescError> {
        let decimal_places = decimal_places.trim();
        if decimal_places == "0.5" {
            return Ok(Self {
                round_to_point5: true,
                ..Self::default()
            });
        }
        Ok(Self {
            decimal_places: decimal_places.parse()?,
            round_to_point5: false,
        })
    }

    fn apply(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        if value.kind != VariableType::Float {
            return;
        }
        let before = value.float_value;
        let rounded = if self.round_to_point5 {
            (before * 2.0).round() / 2.0
        } else {
            let factor = 10f64.powi(self.decimal_places);
            (before * factor).round() / factor
        };
        if rounded != before {
            dd_debug!(ctx, "round: {} -> {}", before, rounded);
        }
        value.float_value = rounded;
    }
}

impl PacketCast for Round {
    fn from_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        self.apply(ctx, value);
    }

    fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        self.apply(ctx, value);
    }
}
