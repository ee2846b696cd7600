// crates/homematic-rs-devdesc/src/cast/mod.rs

//! Casts: small bidirectional transforms between the physical and the
//! logical representation of a value.
//!
//! A parameter applies its casts in list order when decoding and in reverse
//! list order when encoding. Every cast mutates the working [`Variable`] in
//! place and may retag it; later casts and the boundary logic of the
//! parameter read whatever tag the previous step left behind.
//!
//! Casts never fail. Bad configuration falls back to a safe default and
//! unmatched lookups leave the value as it is, both with a log line.

mod mapping;
mod marker;
mod record;
mod scale;
mod text;
mod time;
mod tiny_float;

pub use mapping::{
    BooleanInteger, BooleanString, IntegerIntegerMap, Invert, MapDirection, OptionInteger,
    OptionString,
};
pub use marker::{BlindTest, Generic, Toggle};
pub use record::{CcrtdnParty, Cfm, RpcBinary};
pub use scale::{
    DecimalIntegerScale, DecimalOffset, IntegerIntegerScale, IntegerOffset, Round, ScaleOperation,
};
pub use text::{HexStringByteArray, StringJsonArrayDecimal, StringReplace, StringUnsignedInteger};
pub use time::{DecimalConfigTime, TimeStringSeconds};
pub use tiny_float::IntegerTinyFloat;

use crate::logging::LogMetadata;
use crate::logical::Logical;
use homematic_rs::{Variable, VariableType};
use serde::{Deserialize, Serialize};

/// Read-only view of the parameter a cast runs for.
///
/// Casts such as [`OptionString`] and [`Invert`] need sibling configuration
/// of their parameter. The parameter lends it for the duration of one call
/// instead of the cast holding a reference to its owner.
#[derive(Debug, Clone, Copy)]
pub struct CastContext<'a> {
    pub parameter_id: &'a str,
    pub logical: &'a Logical,
}

impl LogMetadata for CastContext<'_> {
    fn meta(&self) -> String {
        format!("parameter={}", self.parameter_id)
    }
}

/// Behavior shared by every cast.
pub trait PacketCast {
    /// Converts from the physical toward the logical representation.
    fn from_packet(&self, ctx: &CastContext<'_>, value: &mut Variable);

    /// Converts from the logical toward the physical representation.
    fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable);

    /// True if the cast works on the raw packet bytes instead of the
    /// decoded integer.
    fn needs_binary_packet_data(&self) -> bool {
        false
    }
}

/// One configured cast of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cast {
    DecimalIntegerScale(DecimalIntegerScale),
    IntegerIntegerScale(IntegerIntegerScale),
    IntegerOffset(IntegerOffset),
    DecimalOffset(DecimalOffset),
    IntegerIntegerMap(IntegerIntegerMap),
    BooleanInteger(BooleanInteger),
    BooleanString(BooleanString),
    DecimalConfigTime(DecimalConfigTime),
    IntegerTinyFloat(IntegerTinyFloat),
    StringUnsignedInteger(StringUnsignedInteger),
    BlindTest(BlindTest),
    OptionString(OptionString),
    OptionInteger(OptionInteger),
    StringJsonArrayDecimal(StringJsonArrayDecimal),
    RpcBinary(RpcBinary),
    Toggle(Toggle),
    CcrtdnParty(CcrtdnParty),
    Cfm(Cfm),
    StringReplace(StringReplace),
    HexStringByteArray(HexStringByteArray),
    TimeStringSeconds(TimeStringSeconds),
    Invert(Invert),
    Round(Round),
    Generic(Generic),
}

impl Cast {
    fn inner(&self) -> &dyn PacketCast {
        match self {
            Cast::DecimalIntegerScale(c) => c,
            Cast::IntegerIntegerScale(c) => c,
            Cast::IntegerOffset(c) => c,
            Cast::DecimalOffset(c) => c,
            Cast::IntegerIntegerMap(c) => c,
            Cast::BooleanInteger(c) => c,
            Cast::BooleanString(c) => c,
            Cast::DecimalConfigTime(c) => c,
            Cast::IntegerTinyFloat(c) => c,
            Cast::StringUnsignedInteger(c) => c,
            Cast::BlindTest(c) => c,
            Cast::OptionString(c) => c,
            Cast::OptionInteger(c) => c,
            Cast::StringJsonArrayDecimal(c) => c,
            Cast::RpcBinary(c) => c,
            Cast::Toggle(c) => c,
            Cast::CcrtdnParty(c) => c,
            Cast::Cfm(c) => c,
            Cast::StringReplace(c) => c,
            Cast::HexStringByteArray(c) => c,
            Cast::TimeStringSeconds(c) => c,
            Cast::Invert(c) => c,
            Cast::Round(c) => c,
            Cast::Generic(c) => c,
        }
    }

    pub fn from_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        self.inner().from_packet(ctx, value);
    }

    pub fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        self.inner().to_packet(ctx, value);
    }

    pub fn needs_binary_packet_data(&self) -> bool {
        self.inner().needs_binary_packet_data()
    }
}

// Lets callers write `Cast::from(Round::new("1"))` or `.cast(Round::new("1"))`.
macro_rules! impl_from_cast {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Cast {
                fn from(cast: $variant) -> Self {
                    Cast::$variant(cast)
                }
            }
        )+
    };
}

impl_from_cast!(
    DecimalIntegerScale,
    IntegerIntegerScale,
    IntegerOffset,
    DecimalOffset,
    IntegerIntegerMap,
    BooleanInteger,
    BooleanString,
    DecimalConfigTime,
    IntegerTinyFloat,
    StringUnsignedInteger,
    BlindTest,
    OptionString,
    OptionInteger,
    StringJsonArrayDecimal,
    RpcBinary,
    Toggle,
    CcrtdnParty,
    Cfm,
    StringReplace,
    HexStringByteArray,
    TimeStringSeconds,
    Invert,
    Round,
    Generic,
);

// --- Helpers shared by the cast implementations ---

/// Reads the working value as an integer, whatever its current tag.
pub(crate) fn read_i32(value: &Variable) -> i32 {
    match value.kind {
        VariableType::Integer => value.integer_value,
        _ => saturate_i32(value.numeric_i64()),
    }
}

/// Reads the working value as a float, whatever its current tag.
pub(crate) fn read_f64(value: &Variable) -> f64 {
    match value.kind {
        VariableType::Float => value.float_value,
        VariableType::String | VariableType::Base64 => {
            homematic_rs::math::get_double(&value.string_value)
        }
        _ => value.numeric_i64() as f64,
    }
}

/// Reads the working value as a boolean. Strings count as true when they
/// read `true` or a non-zero number.
pub(crate) fn read_bool(value: &Variable) -> bool {
    match value.kind {
        VariableType::Boolean => value.boolean_value,
        VariableType::String => {
            let text = value.string_value.trim();
            text.eq_ignore_ascii_case("true") || value.numeric_i64() != 0
        }
        _ => value.numeric_i64() != 0,
    }
}

pub(crate) fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Rounds half away from zero into the `i32` range.
pub(crate) fn round_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round() as i32
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::CastContext;
    use crate::logical::{Logical, LogicalInteger};

    pub(crate) fn integer_logical() -> Logical {
        Logical::Integer(LogicalInteger::default())
    }

    pub(crate) fn ctx(logical: &Logical) -> CastContext<'_> {
        CastContext {
            parameter_id: "TEST",
            logical,
        }
    }
}
