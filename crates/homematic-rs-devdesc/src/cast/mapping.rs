// crates/homematic-rs-devdesc/src/cast/mapping.rs

//! Lookup casts: integer tables, enumeration ids, booleans and inversion.

use super::{CastContext, PacketCast, read_bool, read_f64, read_i32, saturate_i32};
use crate::logging::{dd_debug, dd_warn};
use crate::logical::Logical;
use crate::role::{reflect, reflect_i64};
use homematic_rs::{Variable, VariableType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which conversion direction an [`IntegerIntegerMap`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapDirection {
    FromDevice,
    ToDevice,
    #[default]
    Both,
}

/// Device value <-> parameter value table. Unmapped values pass through.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntegerIntegerMap {
    pub direction: MapDirection,
    /// Device value -> parameter value.
    pub value_mapping_device: BTreeMap<i32, i32>,
    /// Parameter value -> device value.
    pub value_mapping_parameter: BTreeMap<i32, i32>,
}

impl IntegerIntegerMap {
    pub fn new(direction: MapDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Registers a pair in both tables.
    pub fn with_mapping(mut self, device: i32, parameter: i32) -> Self {
        self.value_mapping_device.insert(device, parameter);
        self.value_mapping_parameter.insert(parameter, device);
        self
    }
}

impl PacketCast for IntegerIntegerMap {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let raw = read_i32(value);
        let mapped = match self.direction {
            MapDirection::FromDevice | MapDirection::Both => {
                self.value_mapping_device.get(&raw).copied().unwrap_or(raw)
            }
            MapDirection::ToDevice => raw,
        };
        value.set_integer(mapped);
    }

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let logical = read_i32(value);
        let mapped = match self.direction {
            MapDirection::ToDevice | MapDirection::Both => self
                .value_mapping_parameter
                .get(&logical)
                .copied()
                .unwrap_or(logical),
            MapDirection::FromDevice => logical,
        };
        value.set_integer(mapped);
    }
}

/// Like [`IntegerIntegerMap`] but always applies both tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionInteger {
    pub value_mapping_device: BTreeMap<i32, i32>,
    pub value_mapping_parameter: BTreeMap<i32, i32>,
}

impl OptionInteger {
    pub fn with_mapping(mut self, device: i32, parameter: i32) -> Self {
        self.value_mapping_device.insert(device, parameter);
        self.value_mapping_parameter.insert(parameter, device);
        self
    }
}

impl PacketCast for OptionInteger {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let raw = read_i32(value);
        value.set_integer(self.value_mapping_device.get(&raw).copied().unwrap_or(raw));
    }

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let logical = read_i32(value);
        value.set_integer(
            self.value_mapping_parameter
                .get(&logical)
                .copied()
                .unwrap_or(logical),
        );
    }
}

/// Enumeration index on the parameter, the option's string id on the
/// device. Lookups use the owning parameter's enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionString;

impl PacketCast for OptionString {
    fn from_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        let Logical::Enumeration(logical) = ctx.logical else {
            dd_warn!(ctx, "optionString: logical type is not an enumeration");
            return;
        };
        let id = value.string_value.trim_end_matches('\0').trim();
        let index = logical.index_of(id).unwrap_or_else(|| {
            dd_warn!(ctx, "optionString: unknown option \"{}\"", id);
            0
        });
        value.set_integer(index);
    }

    fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        let Logical::Enumeration(logical) = ctx.logical else {
            dd_warn!(ctx, "optionString: logical type is not an enumeration");
            return;
        };
        let index = read_i32(value);
        let id = match logical.id_of(index) {
            Some(id) => id,
            None => {
                dd_warn!(ctx, "optionString: no option with index {}", index);
                logical.id_of(0).unwrap_or_default()
            }
        };
        value.set_string(id);
    }
}

// --- Booleans ---

/// Integer -> boolean, either by explicit true/false values or by threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BooleanInteger {
    pub true_value: i32,
    pub false_value: i32,
    pub invert: bool,
    pub threshold: i32,
}

impl Default for BooleanInteger {
    fn default() -> Self {
        Self {
            true_value: 0,
            false_value: 0,
            invert: false,
            threshold: 1,
        }
    }
}

impl BooleanInteger {
    pub fn with_threshold(threshold: i32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn with_values(true_value: i32, false_value: i32) -> Self {
        Self {
            true_value,
            false_value,
            ..Self::default()
        }
    }

    fn has_explicit_values(&self) -> bool {
        self.true_value != 0 || self.false_value != 0
    }
}

impl PacketCast for BooleanInteger {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let raw = read_i32(value);
        let state = if !self.has_explicit_values() {
            raw >= self.threshold
        } else if raw == self.true_value {
            true
        } else if raw == self.false_value {
            false
        } else {
            raw >= self.threshold
        };
        value.set_boolean(state != self.invert);
    }

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let state = read_bool(value) != self.invert;
        let raw = match (self.has_explicit_values(), state) {
            (true, true) => self.true_value,
            (true, false) => self.false_value,
            (false, state) => i32::from(state),
        };
        value.set_integer(raw);
    }
}

/// String -> boolean by exact match against `true_value`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BooleanString {
    pub true_value: String,
    pub false_value: String,
    pub invert: bool,
}

impl BooleanString {
    pub fn new(true_value: impl Into<String>, false_value: impl Into<String>) -> Self {
        Self {
            true_value: true_value.into(),
            false_value: false_value.into(),
            invert: false,
        }
    }
}

impl PacketCast for BooleanString {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let state = value.string_value == self.true_value;
        value.set_boolean(state != self.invert);
    }

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let state = read_bool(value) != self.invert;
        let text = if state {
            &self.true_value
        } else {
            &self.false_value
        };
        value.set_string(text.clone());
    }
}

// --- Invert ---

/// Flips booleans and reflects numbers inside the logical range of the
/// owning parameter. Self-inverse, so both directions are the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Invert;

impl Invert {
    fn apply(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        match ctx.logical {
            Logical::Boolean(_) => {
                let state = read_bool(value);
                value.set_boolean(!state);
            }
            Logical::Integer(l) => {
                let reflected = reflect_i64(
                    i64::from(read_i32(value)),
                    i64::from(l.minimum_value),
                    i64::from(l.maximum_value),
                );
                value.set_integer(saturate_i32(reflected));
            }
            Logical::Integer64(l) => {
                let raw = match value.kind {
                    VariableType::Integer64 => value.integer_value64,
                    _ => value.numeric_i64(),
                };
                value.set_integer64(reflect_i64(raw, l.minimum_value, l.maximum_value));
            }
            Logical::Decimal(l) => {
                let reflected = reflect(read_f64(value), l.minimum_value, l.maximum_value);
                value.set_float(reflected);
            }
            other => {
                dd_debug!(ctx, "invert: nothing to invert for {:?}", other.kind());
            }
        }
    }
}

impl PacketCast for Invert {
    fn from_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        self.apply(ctx, value);
    }

    fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        self.apply(ctx, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::test_support::{ctx, integer_logical};
    use crate::logical::{
        EnumerationValue, LogicalBoolean, LogicalDecimal, LogicalEnumeration, LogicalInteger,
    };

    fn options() -> Logical {
        Logical::Enumeration(LogicalEnumeration::new(vec![
            EnumerationValue::new("OFF", 0),
            EnumerationValue::new("ON", 1),
            EnumerationValue::new("AUTO", 2),
        ]))
    }

    #[test]
    fn test_integer_map_passes_unmapped_values() {
        let logical = integer_logical();
        let cast = IntegerIntegerMap::new(MapDirection::Both)
            .with_mapping(0xC8, 1)
            .with_mapping(0x00, 0);
        let mut value = Variable::from(0xC8);
        cast.from_packet(&ctx(&logical), &mut value);
        assert_eq!(value.integer_value, 1);
        cast.to_packet(&ctx(&logical), &mut value);
        assert_eq!(value.integer_value, 0xC8);

        let mut value = Variable::from(42);
        cast.from_packet(&ctx(&logical), &mut value);
        assert_eq!(value.integer_value, 42);
    }

    #[test]
    fn test_integer_map_direction_gate() {
        let logical = integer_logical();
        let cast = IntegerIntegerMap::new(MapDirection::ToDevice).with_mapping(10, 1);
        let mut value = Variable::from(10);
        cast.from_packet(&ctx(&logical), &mut value);
        assert_eq!(value.integer_value, 10);
        let mut value = Variable::from(1);
        cast.to_packet(&ctx(&logical), &mut value);
        assert_eq!(value.integer_value, 10);
    }

    #[test]
    fn test_option_integer() {
        let logical = integer_logical();
        let cast = OptionInteger::default().with_mapping(3, 30);
        let mut value = Variable::from(3);
        cast.from_packet(&ctx(&logical), &mut value);
        assert_eq!(value.integer_value, 30);
        cast.to_packet(&ctx(&logical), &mut value);
        assert_eq!(value.integer_value, 3);
    }

    #[test]
    fn test_option_string_lookup_and_fallback() {
        let logical = options();
        let mut value = Variable::from("AUTO");
        OptionString.from_packet(&ctx(&logical), &mut value);
        assert_eq!(value.kind, VariableType::Integer);
        assert_eq!(value.integer_value, 2);

        OptionString.to_packet(&ctx(&logical), &mut value);
        assert_eq!(value.kind, VariableType::String);
        assert_eq!(value.string_value, "AUTO");

        // Fixed-size string fields arrive zero padded.
        let mut value = Variable::from("ON\0\0");
        OptionString.from_packet(&ctx(&logical), &mut value);
        assert_eq!(value.integer_value, 1);

        let mut value = Variable::from("BOOST");
        OptionString.from_packet(&ctx(&logical), &mut value);
        assert_eq!(value.integer_value, 0);

        let mut value = Variable::from(9);
        OptionString.to_packet(&ctx(&logical), &mut value);
        assert_eq!(value.string_value, "OFF");
    }

    #[test]
    fn test_option_string_without_enumeration_is_noop() {
        let logical = integer_logical();
        let mut value = Variable::from(1);
        OptionString.from_packet(&ctx(&logical), &mut value);
        assert_eq!(value, Variable::from(1));
    }

    #[test]
    fn test_boolean_integer_threshold() {
        let logical = integer_logical();
        let cast = BooleanInteger::with_threshold(5);
        for (raw, expected) in [(4, false), (5, true), (6, true)] {
            let mut value = Variable::from(raw);
            cast.from_packet(&ctx(&logical), &mut value);
            assert_eq!(value.kind, VariableType::Boolean);
            assert_eq!(value.boolean_value, expected, "raw value {}", raw);
        }
    }

    #[test]
    fn test_boolean_integer_explicit_values_and_invert() {
        let logical = integer_logical();
        let cast = BooleanInteger {
            invert: true,
            ..BooleanInteger::with_values(200, 100)
        };
        let mut value = Variable::from(200);
        cast.from_packet(&ctx(&logical), &mut value);
        assert!(!value.boolean_value);

        let mut value = Variable::from(true);
        cast.to_packet(&ctx(&logical), &mut value);
        assert_eq!(value.integer_value, 100);

        let mut value = Variable::from(false);
        BooleanInteger::default().to_packet(&ctx(&logical), &mut value);
        assert_eq!(value.integer_value, 0);
    }

    #[test]
    fn test_boolean_string() {
        let logical = integer_logical();
        let cast = BooleanString::new("on", "off");
        let mut value = Variable::from("on");
        cast.from_packet(&ctx(&logical), &mut value);
        assert!(value.boolean_value);
        value.set_boolean(false);
        cast.to_packet(&ctx(&logical), &mut value);
        assert_eq!(value.string_value, "off");
    }

    #[test]
    fn test_invert_per_logical_type() {
        let boolean = Logical::Boolean(LogicalBoolean::default());
        let mut value = Variable::from(true);
        Invert.from_packet(&ctx(&boolean), &mut value);
        assert!(!value.boolean_value);

        let integer = Logical::Integer(LogicalInteger::new(0, 100));
        let mut value = Variable::from(30);
        Invert.from_packet(&ctx(&integer), &mut value);
        assert_eq!(value.integer_value, 70);
        Invert.to_packet(&ctx(&integer), &mut value);
        assert_eq!(value.integer_value, 30);

        let decimal = Logical::Decimal(LogicalDecimal::new(0.0, 1.0));
        let mut value = Variable::from(0.25);
        Invert.from_packet(&ctx(&decimal), &mut value);
        assert_eq!(value.float_value, 0.75);
    }
}
