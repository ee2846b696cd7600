// crates/homematic-rs-devdesc/src/cast/marker.rs

//! Casts that carry configuration but leave the value (mostly) alone.

use super::{CastContext, PacketCast};
use crate::logging::dd_trace;
use homematic_rs::Variable;
use serde::{Deserialize, Serialize};

/// Diagnostic cast. Decoding passes through, encoding always sends
/// `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlindTest {
    pub value: i32,
}

impl BlindTest {
    pub fn new(value: i32) -> Self {
        Self { value }
    }
}

impl PacketCast for BlindTest {
    fn from_packet(&self, _ctx: &CastContext<'_>, _value: &mut Variable) {}

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        value.set_integer(self.value);
    }
}

/// Names a sibling parameter and its on/off levels. Conversion does not
/// use them; both directions pass the value through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggle {
    pub parameter: String,
    pub on: i32,
    pub off: i32,
}

impl Toggle {
    pub fn new(parameter: impl Into<String>, on: i32, off: i32) -> Self {
        Self {
            parameter: parameter.into(),
            on,
            off,
        }
    }
}

impl PacketCast for Toggle {
    fn from_packet(&self, ctx: &CastContext<'_>, _value: &mut Variable) {
        dd_trace!(ctx, "toggle: pass through (toggles {})", self.parameter);
    }

    fn to_packet(&self, ctx: &CastContext<'_>, _value: &mut Variable) {
        dd_trace!(ctx, "toggle: pass through (toggles {})", self.parameter);
    }
}

/// A type tag for casts handled outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Generic {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Generic {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl PacketCast for Generic {
    fn from_packet(&self, _ctx: &CastContext<'_>, _value: &mut Variable) {}

    fn to_packet(&self, _ctx: &CastContext<'_>, _value: &mut Variable) {}
}
