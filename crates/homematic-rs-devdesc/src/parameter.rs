// crates/homematic-rs-devdesc/src/parameter.rs

//! The conversion engine: one parameter of a device description and the
//! two entry points between packet bytes and RPC values.
//!
//! Decoding runs `bytes -> integer -> casts (in order) -> range/role`,
//! encoding runs `range/role -> casts (reversed) -> integer -> bytes`.
//! Both directions are total: anomalies are logged and a best-effort
//! result is returned.

use crate::cast::{Cast, CastContext, read_bool, read_f64};
use crate::error::DevDescError;
use crate::group::ParameterGroup;
use crate::logging::{LogMetadata, dd_debug, dd_error, dd_trace, dd_warn};
use crate::logical::{Logical, LogicalDecimal, LogicalInteger, LogicalInteger64};
use crate::physical::{Endianess, Physical, PhysicalType};
use crate::role::{Role, RoleDirection, reflect, reflect_i64};
use homematic_rs::math::{get_double, get_number, get_number64, is_number};
use homematic_rs::{Variable, VariableType};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::{Arc, Weak};

/// Received signal strength is reported as a positive magnitude.
const RSSI_DEVICE: &str = "RSSI_DEVICE";

/// UI and access flags of a parameter. They do not affect conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterFlags {
    pub visible: bool,
    pub internal: bool,
    pub service: bool,
    pub sticky: bool,
    pub transmitted: bool,
    pub password: bool,
    pub mandatory: bool,
}

impl Default for ParameterFlags {
    fn default() -> Self {
        Self {
            visible: true,
            internal: false,
            service: false,
            sticky: false,
            transmitted: false,
            password: false,
            mandatory: false,
        }
    }
}

/// A fully configured parameter. Immutable once built, so it can be shared
/// between threads; every conversion works on its own scratch value.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub id: String,
    pub readable: bool,
    pub writeable: bool,
    pub is_signed: bool,
    /// True if signedness was configured explicitly.
    pub is_signed_set: bool,
    pub unit: String,
    pub control: String,
    pub flags: ParameterFlags,
    pub logical: Logical,
    pub physical: Physical,
    pub casts: Vec<Cast>,
    pub roles: BTreeMap<u64, Role>,
    pub(crate) parent: Weak<ParameterGroup>,
}

impl LogMetadata for Parameter {
    fn meta(&self) -> String {
        format!("parameter={}", self.id)
    }
}

impl Parameter {
    pub fn builder(id: impl Into<String>) -> ParameterBuilder {
        ParameterBuilder::new(id)
    }

    /// The group this parameter belongs to, if it is still alive.
    pub fn parent(&self) -> Option<Arc<ParameterGroup>> {
        self.parent.upgrade()
    }

    pub fn role(&self, id: u64) -> Option<&Role> {
        self.roles.get(&id)
    }

    pub fn cast_context(&self) -> CastContext<'_> {
        CastContext {
            parameter_id: &self.id,
            logical: &self.logical,
        }
    }

    // --- Decoding ---

    /// Decodes the bytes of this parameter's field into an RPC value.
    ///
    /// `is_event` is the value of action parameters: an action "happened"
    /// when the packet that carried it was an event.
    pub fn convert_from_packet(&self, data: &[u8], role: &Role, is_event: bool) -> Variable {
        let data: Cow<'_, [u8]> = match self.physical.endianess {
            Endianess::Little => Cow::Owned(self.reverse_data(data)),
            Endianess::Big => Cow::Borrowed(data),
        };
        dd_trace!(self, "decoding {:02X?}", data);

        if self.casts.is_empty() {
            if let Some(value) = self.decode_without_casts(&data, role, is_event) {
                return value;
            }
        }

        let mut value = if self.physical.kind == PhysicalType::String {
            Variable::from(String::from_utf8_lossy(&data).into_owned())
        } else if data.len() <= 4 {
            Variable::from(self.sign_extend(decode_integer(&data), data.len()))
        } else {
            Variable::from(data.to_vec())
        };

        let ctx = self.cast_context();
        for cast in &self.casts {
            if cast.needs_binary_packet_data() {
                value.binary_value = data.to_vec();
            }
            cast.from_packet(&ctx, &mut value);
        }

        self.enforce_after_decode(&mut value, role);
        value
    }

    fn decode_without_casts(
        &self,
        data: &[u8],
        role: &Role,
        is_event: bool,
    ) -> Option<Variable> {
        let role_applies = role.direction != RoleDirection::Output;
        match &self.logical {
            Logical::Enumeration(l) => {
                let mut v = decode_integer(data);
                if role_applies && role.invert {
                    v = reflect_i32(v, l.minimum_value, l.maximum_value);
                }
                if role_applies {
                    v = scale_integer(role.scale_to_logical(f64::from(v)), v);
                }
                Some(Variable::from(v))
            }
            Logical::Boolean(_) => {
                let state = decode_integer(data) != 0;
                Some(Variable::from(state != (role_applies && role.invert)))
            }
            Logical::String(_) => {
                let text = match data.first() {
                    Some(first) if *first != 0 => {
                        let end = if data.last() == Some(&0) {
                            data.len() - 1
                        } else {
                            data.len()
                        };
                        String::from_utf8_lossy(&data[..end]).into_owned()
                    }
                    _ => String::new(),
                };
                Some(Variable::from(text))
            }
            Logical::Action(_) => Some(Variable::from(is_event)),
            Logical::Integer(_) if self.id == RSSI_DEVICE => {
                Some(Variable::from(decode_integer(data).wrapping_neg()))
            }
            _ => None,
        }
    }

    /// Applies two's complement to fields narrower than 32 bits.
    fn sign_extend(&self, raw: i32, len: usize) -> i32 {
        let bits = self.physical.total_bits();
        if !self.is_signed || len != self.physical.byte_len() || bits == 0 || bits >= 32 {
            return raw;
        }
        let raw = i64::from(raw as u32);
        if raw & (1i64 << (bits - 1)) != 0 {
            (raw - (1i64 << bits)) as i32
        } else {
            raw as i32
        }
    }

    fn enforce_after_decode(&self, value: &mut Variable, role: &Role) {
        let role_applies = role.direction != RoleDirection::Output;
        match &self.logical {
            Logical::Enumeration(l) => {
                if value.kind != VariableType::Integer {
                    return;
                }
                let (min, max) = (l.minimum_value, l.maximum_value);
                let mut v = self.clamp_logged(value.integer_value, min, max);
                if role_applies && role.invert {
                    v = reflect_i32(v, l.minimum_value, l.maximum_value);
                }
                if role_applies {
                    v = scale_integer(role.scale_to_logical(f64::from(v)), v);
                }
                value.set_integer(v);
            }
            Logical::Decimal(l) => {
                if value.kind == VariableType::Integer {
                    let promoted = f64::from(value.integer_value);
                    value.set_float(promoted);
                }
                if value.kind == VariableType::Float {
                    let v = self.decimal_from(l, value.float_value, role, role_applies);
                    value.set_float(v);
                }
            }
            Logical::Integer(l) => {
                if value.kind == VariableType::Integer {
                    let v = self.integer_from(l, value.integer_value, role, role_applies);
                    value.set_integer(v);
                }
            }
            Logical::Integer64(l) => {
                if value.kind == VariableType::Integer {
                    let promoted = i64::from(value.integer_value);
                    value.set_integer64(promoted);
                }
                if value.kind == VariableType::Integer64 {
                    let v = self.integer64_from(l, value.integer_value64, role, role_applies);
                    value.set_integer64(v);
                }
            }
            Logical::Boolean(_) => {
                if value.kind == VariableType::Integer {
                    let state = value.integer_value != 0;
                    value.set_boolean(state);
                }
                if value.kind == VariableType::Boolean && role_applies && role.invert {
                    value.boolean_value = !value.boolean_value;
                }
            }
            _ => {}
        }
    }

    fn decimal_from(
        &self,
        l: &LogicalDecimal,
        mut v: f64,
        role: &Role,
        role_applies: bool,
    ) -> f64 {
        if l.is_special_value(v) {
            return v;
        }
        if !(l.default_value_exists && v == l.default_value) {
            v = self.clamp_logged(v, l.minimum_value, l.maximum_value);
        }
        if !role_applies {
            return v;
        }
        if role.invert {
            v = reflect(v, l.minimum_value, l.maximum_value);
        }
        role.scale_to_logical(v).unwrap_or(v)
    }

    fn integer_from(
        &self,
        l: &LogicalInteger,
        mut v: i32,
        role: &Role,
        role_applies: bool,
    ) -> i32 {
        if l.is_special_value(v) {
            return v;
        }
        if !(l.default_value_exists && v == l.default_value) {
            v = self.clamp_logged(v, l.minimum_value, l.maximum_value);
        }
        if !role_applies {
            return v;
        }
        if role.invert {
            v = invert_integer(i64::from(v), i64::from(l.minimum_value), i64::from(l.maximum_value))
                as i32;
        }
        scale_integer(role.scale_to_logical(f64::from(v)), v)
    }

    fn integer64_from(
        &self,
        l: &LogicalInteger64,
        mut v: i64,
        role: &Role,
        role_applies: bool,
    ) -> i64 {
        if l.is_special_value(v) {
            return v;
        }
        if !(l.default_value_exists && v == l.default_value) {
            v = self.clamp_logged(v, l.minimum_value, l.maximum_value);
        }
        if !role_applies {
            return v;
        }
        if role.invert {
            v = invert_integer(v, l.minimum_value, l.maximum_value);
        }
        match role.scale_to_logical(v as f64) {
            Some(scaled) if scaled.is_finite() => scaled.round() as i64,
            _ => v,
        }
    }

    // --- Encoding ---

    /// Encodes an RPC value into the bytes of this parameter's field.
    ///
    /// The result is not yet placed at its bit position; see
    /// [`Parameter::adjust_bit_position`].
    pub fn convert_to_packet(&self, value: &Variable, role: &Role) -> Vec<u8> {
        let mut value = value.clone();

        if self.casts.is_empty() {
            match &self.logical {
                Logical::Action(_) => {
                    let state = read_bool(&value);
                    value.set_integer(i32::from(state));
                    return self.serialize(&value);
                }
                Logical::String(_) => {
                    let mut bytes = value.string_value.into_bytes();
                    let declared = self.physical.byte_len();
                    if self.physical.size_defined && bytes.len() < declared {
                        // Overwrite leftovers of a longer previous value.
                        bytes.resize(declared, 0);
                    }
                    return bytes;
                }
                _ => {}
            }
        }

        self.enforce_before_encode(&mut value, role);

        let ctx = self.cast_context();
        for cast in self.casts.iter().rev() {
            cast.to_packet(&ctx, &mut value);
        }

        let bytes = self.serialize(&value);
        dd_trace!(self, "encoded {:02X?}", bytes);
        bytes
    }

    /// Parses `text` according to the logical type and encodes it.
    pub fn convert_to_packet_from_str(&self, text: &str, role: &Role) -> Vec<u8> {
        let text = text.trim();
        let value = match &self.logical {
            Logical::Integer(_) => Variable::from(get_number(text)),
            Logical::Integer64(_) => Variable::from(get_number64(text)),
            Logical::Decimal(_) => Variable::from(get_double(text)),
            Logical::Boolean(_) | Logical::Action(_) => {
                Variable::from(text.eq_ignore_ascii_case("true") || get_number(text) != 0)
            }
            Logical::Enumeration(l) => match l.index_of(text) {
                Some(index) => Variable::from(index),
                None if is_number(text) => Variable::from(get_number(text)),
                None => {
                    dd_warn!(self, "unknown enumeration value \"{}\"", text);
                    Variable::from(l.minimum_value)
                }
            },
            Logical::String(_) | Logical::Array(_) | Logical::Struct(_) => Variable::from(text),
        };
        self.convert_to_packet(&value, role)
    }

    fn enforce_before_encode(&self, value: &mut Variable, role: &Role) {
        let role_applies = role.direction != RoleDirection::Input;
        match &self.logical {
            Logical::Enumeration(l) => {
                let mut v = match value.kind {
                    VariableType::String => l
                        .index_of(&value.string_value)
                        .unwrap_or_else(|| get_number(&value.string_value)),
                    _ => populated_i64(value) as i32,
                };
                if role_applies {
                    v = scale_integer(role.scale_to_physical(f64::from(v)), v);
                    if role.invert {
                        v = reflect_i32(v, l.minimum_value, l.maximum_value);
                    }
                }
                v = self.clamp_logged(v, l.minimum_value, l.maximum_value);
                value.set_integer(v);
            }
            Logical::Decimal(l) => {
                let mut v = populated_f64(value);
                if !l.is_special_value(v) {
                    if role_applies {
                        v = role.scale_to_physical(v).unwrap_or(v);
                        if role.invert {
                            v = reflect(v, l.minimum_value, l.maximum_value);
                        }
                    }
                    if !(l.default_value_exists && v == l.default_value) {
                        v = self.clamp_logged(v, l.minimum_value, l.maximum_value);
                    }
                }
                value.set_float(v);
            }
            Logical::Integer(l) => {
                let mut v = match value.kind {
                    VariableType::String => l
                        .special_values_string_map
                        .get(value.string_value.trim())
                        .copied()
                        .unwrap_or_else(|| get_number(&value.string_value)),
                    _ => crate::cast::saturate_i32(populated_i64(value)),
                };
                if !l.is_special_value(v) {
                    let (min, max) = (l.minimum_value, l.maximum_value);
                    if role_applies {
                        v = scale_integer(role.scale_to_physical(f64::from(v)), v);
                        if role.invert {
                            v = invert_integer(i64::from(v), i64::from(min), i64::from(max)) as i32;
                        }
                    }
                    if !(l.default_value_exists && v == l.default_value) {
                        v = self.clamp_logged(v, min, max);
                    }
                }
                value.set_integer(v);
            }
            Logical::Integer64(l) => {
                let mut v = populated_i64(value);
                if !l.is_special_value(v) {
                    if role_applies {
                        if let Some(scaled) = role.scale_to_physical(v as f64) {
                            v = scaled.round() as i64;
                        }
                        if role.invert {
                            v = invert_integer(v, l.minimum_value, l.maximum_value);
                        }
                    }
                    if !(l.default_value_exists && v == l.default_value) {
                        v = self.clamp_logged(v, l.minimum_value, l.maximum_value);
                    }
                }
                value.set_integer64(v);
            }
            Logical::Boolean(_) | Logical::Action(_) => {
                let state = read_bool(value) != (role_applies && role.invert);
                value.set_boolean(state);
            }
            Logical::String(_) => {
                if value.kind != VariableType::String && value.kind != VariableType::Binary {
                    let text = match value.kind {
                        VariableType::Float => value.float_value.to_string(),
                        _ => value.numeric_i64().to_string(),
                    };
                    value.set_string(text);
                }
            }
            Logical::Array(_) | Logical::Struct(_) => {}
        }
    }

    /// Turns the working value into field bytes.
    fn serialize(&self, value: &Variable) -> Vec<u8> {
        if value.kind == VariableType::Binary {
            return value.binary_value.clone();
        }
        if self.physical.kind == PhysicalType::String {
            return match value.kind {
                VariableType::String | VariableType::Base64 => {
                    value.string_value.as_bytes().to_vec()
                }
                VariableType::Float => value.float_value.to_string().into_bytes(),
                _ => value.numeric_i64().to_string().into_bytes(),
            };
        }

        let raw = value.numeric_i64();
        let mut bytes = if self.physical.size_defined {
            let len = self.physical.byte_len().clamp(1, 4);
            let bits = match self.physical.total_bits() {
                0 => len as u32 * 8,
                bits => bits.min(32),
            };
            let mask = if bits >= 32 { u32::MAX } else { (1u32 << bits) - 1 };
            let masked = raw as u32 & mask;
            if i64::from(masked) != raw {
                dd_debug!(self, "value {} masked to {} bits", raw, bits);
            }
            masked.to_be_bytes()[4 - len..].to_vec()
        } else {
            let len = match raw {
                0..=0xFF => 1,
                0x100..=0xFFFF => 2,
                0x1_0000..=0xFF_FFFF => 3,
                _ => 4,
            };
            (raw as u32).to_be_bytes()[4 - len..].to_vec()
        };
        if self.physical.endianess == Endianess::Little {
            bytes.reverse();
        }
        bytes
    }

    // --- Byte helpers ---

    /// Shifts a sub-byte field to its bit offset and pads the buffer to the
    /// declared field size, so it can be OR-ed into a shared packet byte.
    pub fn adjust_bit_position(&self, data: &mut Vec<u8>) {
        if data.is_empty()
            || data.len() > 4
            || matches!(self.logical, Logical::String(_))
            || self.physical.kind == PhysicalType::String
        {
            return;
        }
        let bit_index = self.physical.bit_index();
        if bit_index > 0 || self.physical.size < 1.0 {
            if self.physical.byte_len() > 1 {
                dd_error!(
                    self,
                    "partial byte index {} is not possible with a size of {}",
                    self.physical.index,
                    self.physical.size
                );
                return;
            }
            let value = decode_integer(data) as u32;
            *data = vec![((value << bit_index) & 0xFF) as u8];
        }
        let declared = self.physical.byte_len();
        if declared > data.len() {
            let mut padded = vec![0u8; declared - data.len()];
            padded.append(data);
            *data = padded;
        }
    }

    /// Reverses `data` for little-endian fields. The result holds at least
    /// the declared field size; missing high-order bytes are zero.
    pub fn reverse_data(&self, data: &[u8]) -> Vec<u8> {
        let len = self.physical.byte_len().max(1);
        let mut reversed: Vec<u8> = data.iter().rev().copied().collect();
        if reversed.len() < len {
            let mut padded = vec![0u8; len - reversed.len()];
            padded.append(&mut reversed);
            reversed = padded;
        }
        reversed
    }

    fn clamp_logged<T: PartialOrd + Copy + Display>(&self, v: T, min: T, max: T) -> T {
        if v < min {
            dd_debug!(self, "value {} below minimum, clamped to {}", v, min);
            min
        } else if v > max {
            dd_debug!(self, "value {} above maximum, clamped to {}", v, max);
            max
        } else {
            v
        }
    }
}

/// Big-endian decode of up to four bytes, zero-extended.
fn decode_integer(data: &[u8]) -> i32 {
    let start = data.len().saturating_sub(4);
    data[start..]
        .iter()
        .fold(0u32, |acc, b| (acc << 8) | u32::from(*b)) as i32
}

fn reflect_i32(v: i32, min: i32, max: i32) -> i32 {
    crate::cast::saturate_i32(reflect_i64(i64::from(v), i64::from(min), i64::from(max)))
}

/// Boolean-like ranges (`[0, 1]`, or `[0, 2]` with 2 meaning unknown) swap
/// 0 and 1; everything else is reflected.
fn invert_integer(v: i64, min: i64, max: i64) -> i64 {
    if min == 0 && max <= 2 {
        match v {
            0 => 1,
            1 => 0,
            other => other,
        }
    } else {
        reflect_i64(v, min, max)
    }
}

fn scale_integer(scaled: Option<f64>, fallback: i32) -> i32 {
    match scaled {
        Some(s) if s.is_finite() => crate::cast::round_i32(s),
        _ => fallback,
    }
}

/// Reads a number from whichever payload the caller filled in. The payload
/// selected by the tag wins unless it is zero.
fn populated_f64(value: &Variable) -> f64 {
    let primary = read_f64(value);
    if primary != 0.0 {
        primary
    } else if value.float_value != 0.0 {
        value.float_value
    } else if value.integer_value != 0 {
        f64::from(value.integer_value)
    } else if value.integer_value64 != 0 {
        value.integer_value64 as f64
    } else {
        get_double(&value.string_value)
    }
}

/// Integer counterpart of [`populated_f64`].
fn populated_i64(value: &Variable) -> i64 {
    let primary = value.numeric_i64();
    if primary != 0 {
        primary
    } else if value.integer_value != 0 {
        i64::from(value.integer_value)
    } else if value.integer_value64 != 0 {
        value.integer_value64
    } else if value.float_value.is_finite() && value.float_value != 0.0 {
        value.float_value.round() as i64
    } else {
        get_number64(&value.string_value)
    }
}

// --- Builder ---

/// Programmatic construction of a [`Parameter`].
#[derive(Debug, Clone)]
pub struct ParameterBuilder {
    id: String,
    readable: bool,
    writeable: bool,
    is_signed: Option<bool>,
    unit: String,
    control: String,
    flags: ParameterFlags,
    logical: Option<Logical>,
    physical: Option<Physical>,
    casts: Vec<Cast>,
    roles: BTreeMap<u64, Role>,
}

impl ParameterBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            readable: true,
            writeable: true,
            is_signed: None,
            unit: String::new(),
            control: String::new(),
            flags: ParameterFlags::default(),
            logical: None,
            physical: None,
            casts: Vec::new(),
            roles: BTreeMap::new(),
        }
    }

    pub fn logical(mut self, logical: Logical) -> Self {
        self.logical = Some(logical);
        self
    }

    pub fn physical(mut self, physical: Physical) -> Self {
        self.physical = Some(physical);
        self
    }

    /// Appends a cast. Decoding applies casts in the order they are added.
    pub fn cast(mut self, cast: impl Into<Cast>) -> Self {
        self.casts.push(cast.into());
        self
    }

    pub fn casts(mut self, casts: impl IntoIterator<Item = Cast>) -> Self {
        self.casts.extend(casts);
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.roles.insert(role.id, role);
        self
    }

    pub fn signed(mut self, is_signed: bool) -> Self {
        self.is_signed = Some(is_signed);
        self
    }

    pub fn readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    pub fn writeable(mut self, writeable: bool) -> Self {
        self.writeable = writeable;
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn control(mut self, control: impl Into<String>) -> Self {
        self.control = control.into();
        self
    }

    pub fn flags(mut self, flags: ParameterFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Validates the definition and resolves role scale ranges.
    ///
    /// # Errors
    /// `MissingLogical`/`MissingPhysical` if either part was not set, and
    /// `MissingScaleInfo`/`InvalidScaleInfo` for scaling roles without a
    /// usable range.
    pub fn build(self) -> Result<Parameter, DevDescError> {
        let logical = self.logical.ok_or_else(|| DevDescError::MissingLogical {
            parameter: self.id.clone(),
        })?;
        let physical = self.physical.ok_or_else(|| DevDescError::MissingPhysical {
            parameter: self.id.clone(),
        })?;
        let mut roles = self.roles;
        for role in roles.values_mut() {
            role.resolve_scale_info(&self.id, &logical)?;
        }
        if matches!(logical, Logical::Enumeration(ref l) if l.values.is_empty()) {
            dd_warn!("[parameter={}] enumeration has no values", self.id);
        }
        Ok(Parameter {
            id: self.id,
            readable: self.readable,
            writeable: self.writeable,
            is_signed: self.is_signed.unwrap_or(false),
            is_signed_set: self.is_signed.is_some(),
            unit: self.unit,
            control: self.control,
            flags: self.flags,
            logical,
            physical,
            casts: self.casts,
            roles,
            parent: Weak::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::{DecimalIntegerScale, IntegerIntegerMap, MapDirection};
    use crate::logical::{
        EnumerationValue, LogicalAction, LogicalBoolean, LogicalEnumeration, LogicalString,
    };
    use crate::role::ScaleRange;

    fn integer(physical: Physical) -> Parameter {
        Parameter::builder("VALUE")
            .logical(Logical::Integer(LogicalInteger::default()))
            .physical(physical)
            .build()
            .unwrap()
    }

    #[test]
    fn test_endianness() {
        let role = Role::default();
        let big = integer(Physical::integer(0.0, 2.0));
        assert_eq!(big.convert_to_packet(&Variable::from(0x0102), &role), vec![0x01, 0x02]);
        assert_eq!(big.convert_from_packet(&[0x01, 0x02], &role, false).integer_value, 0x0102);

        let little = integer(Physical::integer(0.0, 2.0).with_endianess(Endianess::Little));
        assert_eq!(little.convert_to_packet(&Variable::from(0x0102), &role), vec![0x02, 0x01]);
        assert_eq!(little.convert_from_packet(&[0x02, 0x01], &role, false).integer_value, 0x0102);
    }

    #[test]
    fn test_sign_extension() {
        let role = Role::default();
        let signed = Parameter::builder("TEMPERATURE_OFFSET")
            .logical(Logical::Integer(LogicalInteger::default()))
            .physical(Physical::integer(0.0, 1.0))
            .signed(true)
            .build()
            .unwrap();
        assert!(signed.is_signed_set);
        for (byte, expected) in [(0xFF, -1), (0x7F, 127), (0x80, -128)] {
            let value = signed.convert_from_packet(&[byte], &role, false);
            assert_eq!(value.integer_value, expected, "byte {:#04X}", byte);
        }

        let unsigned = integer(Physical::integer(0.0, 1.0));
        assert!(!unsigned.is_signed_set);
        assert_eq!(unsigned.convert_from_packet(&[0xFF], &role, false).integer_value, 255);
    }

    #[test]
    fn test_sign_extension_of_bit_field() {
        let signed = Parameter::builder("OFFSET")
            .logical(Logical::Integer(LogicalInteger::default()))
            .physical(Physical::integer(0.0, 0.4))
            .signed(true)
            .build()
            .unwrap();
        let value = signed.convert_from_packet(&[0x0F], &Role::default(), false);
        assert_eq!(value.integer_value, -1);
    }

    #[test]
    fn test_fast_paths() {
        let role = Role::default();
        let boolean = Parameter::builder("STATE")
            .logical(Logical::Boolean(LogicalBoolean::default()))
            .physical(Physical::integer(0.0, 1.0))
            .build()
            .unwrap();
        assert!(boolean.convert_from_packet(&[0xC8], &role, false).boolean_value);
        let inverted = Role::new(1).with_invert(true);
        assert!(!boolean.convert_from_packet(&[0xC8], &inverted, false).boolean_value);

        let action = Parameter::builder("PRESS_SHORT")
            .logical(Logical::Action(LogicalAction::default()))
            .physical(Physical::integer(0.0, 1.0))
            .build()
            .unwrap();
        assert!(action.convert_from_packet(&[], &role, true).boolean_value);
        assert!(!action.convert_from_packet(&[1], &role, false).boolean_value);
        assert_eq!(action.convert_to_packet(&Variable::from(true), &role), vec![1]);

        let rssi = integer(Physical::integer(0.0, 1.0));
        let rssi = Parameter {
            id: RSSI_DEVICE.into(),
            ..rssi
        };
        assert_eq!(rssi.convert_from_packet(&[65], &role, false).integer_value, -65);
    }

    #[test]
    fn test_string_fast_paths() {
        let role = Role::default();
        let name = Parameter::builder("NAME")
            .logical(Logical::String(LogicalString::default()))
            .physical(Physical::string(0.0, 8.0))
            .build()
            .unwrap();
        assert_eq!(name.convert_from_packet(b"Hall\0", &role, false).string_value, "Hall");
        assert_eq!(name.convert_from_packet(b"\0abc", &role, false).string_value, "");
        assert_eq!(
            name.convert_to_packet(&Variable::from("Hall"), &role),
            vec![b'H', b'a', b'l', b'l', 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_clamping_respects_defaults_and_special_values() {
        let role = Role::default();
        let mut logical = LogicalInteger::new(0, 100);
        logical.add_special_value("NOT_USED", 255);
        logical.default_value_exists = true;
        logical.default_value = 200;
        let parameter = Parameter::builder("LEVEL")
            .logical(Logical::Integer(logical))
            .physical(Physical::integer(0.0, 1.0))
            .cast(IntegerIntegerMap::new(MapDirection::Both))
            .build()
            .unwrap();
        let decode = |byte: u8| parameter.convert_from_packet(&[byte], &role, false).integer_value;
        assert_eq!(decode(50), 50);
        assert_eq!(decode(150), 100);
        assert_eq!(decode(255), 255);
        assert_eq!(decode(200), 200);
        assert_eq!(parameter.convert_to_packet(&Variable::from(-5), &role), vec![0]);
    }

    #[test]
    fn test_integer_invert_parity_and_reflection() {
        let parity = Parameter::builder("STATE")
            .logical(Logical::Integer(LogicalInteger::new(0, 2)))
            .physical(Physical::integer(0.0, 1.0))
            .build()
            .unwrap();
        let role = Role::new(1).with_invert(true);
        assert_eq!(parity.convert_from_packet(&[0], &role, false).integer_value, 1);
        assert_eq!(parity.convert_from_packet(&[1], &role, false).integer_value, 0);
        assert_eq!(parity.convert_from_packet(&[2], &role, false).integer_value, 2);

        let level = Parameter::builder("LEVEL")
            .logical(Logical::Integer(LogicalInteger::new(0, 200)))
            .physical(Physical::integer(0.0, 1.0))
            .build()
            .unwrap();
        assert_eq!(level.convert_from_packet(&[50], &role, false).integer_value, 150);
        assert_eq!(level.convert_to_packet(&Variable::from(150), &role), vec![50]);
    }

    #[test]
    fn test_role_scaling() {
        let parameter = Parameter::builder("LEVEL")
            .logical(Logical::Integer(LogicalInteger::new(0, 200)))
            .physical(Physical::integer(0.0, 1.0))
            .role(Role::new(3).with_scale(None, Some(ScaleRange::new(0.0, 100.0))))
            .build()
            .unwrap();
        let role = *parameter.role(3).unwrap();
        assert_eq!(parameter.convert_from_packet(&[200], &role, false).integer_value, 100);
        assert_eq!(parameter.convert_from_packet(&[101], &role, false).integer_value, 51);
        assert_eq!(parameter.convert_to_packet(&Variable::from(50), &role), vec![100]);
    }

    #[test]
    fn test_output_role_is_not_applied_when_decoding() {
        let parameter = Parameter::builder("LEVEL")
            .logical(Logical::Integer(LogicalInteger::new(0, 200)))
            .physical(Physical::integer(0.0, 1.0))
            .build()
            .unwrap();
        let role = Role::new(4)
            .with_invert(true)
            .with_direction(RoleDirection::Output);
        assert_eq!(parameter.convert_from_packet(&[50], &role, false).integer_value, 50);
        assert_eq!(parameter.convert_to_packet(&Variable::from(50), &role), vec![150]);
    }

    #[test]
    fn test_enumeration_accepts_ids_when_encoding() {
        let parameter = Parameter::builder("MODE")
            .logical(Logical::Enumeration(LogicalEnumeration::new(vec![
                EnumerationValue::new("AUTO", 0),
                EnumerationValue::new("MANUAL", 1),
            ])))
            .physical(Physical::integer(0.0, 1.0))
            .build()
            .unwrap();
        let role = Role::default();
        assert_eq!(parameter.convert_to_packet(&Variable::from("MANUAL"), &role), vec![1]);
        assert_eq!(parameter.convert_to_packet_from_str("MANUAL", &role), vec![1]);
        assert_eq!(parameter.convert_to_packet_from_str("0", &role), vec![0]);
    }

    #[test]
    fn test_mask_and_minimal_encoding() {
        let role = Role::default();
        let nibble = integer(Physical::integer(0.0, 0.4));
        assert_eq!(nibble.convert_to_packet(&Variable::from(0x1F), &role), vec![0x0F]);

        let minimal = integer(Physical {
            kind: PhysicalType::Integer,
            ..Physical::default()
        });
        assert_eq!(minimal.convert_to_packet(&Variable::from(0x12), &role), vec![0x12]);
        assert_eq!(minimal.convert_to_packet(&Variable::from(0x1234), &role), vec![0x12, 0x34]);
        assert_eq!(minimal.convert_to_packet(&Variable::from(-1), &role).len(), 4);
    }

    #[test]
    fn test_adjust_bit_position() {
        let flag = integer(Physical::integer(2.3, 0.1));
        let mut data = vec![1];
        flag.adjust_bit_position(&mut data);
        assert_eq!(data, vec![0x08]);

        let word = integer(Physical::integer(0.0, 3.0));
        let mut data = vec![0x12, 0x34];
        word.adjust_bit_position(&mut data);
        assert_eq!(data, vec![0x00, 0x12, 0x34]);

        // A sub-byte offset cannot be combined with a multi-byte field.
        let invalid = integer(Physical::integer(0.4, 2.0));
        let mut data = vec![0x01, 0x02];
        invalid.adjust_bit_position(&mut data);
        assert_eq!(data, vec![0x01, 0x02]);
    }

    #[test]
    fn test_reverse_data_pads_high_order_bytes() {
        let parameter = integer(Physical::integer(0.0, 3.0).with_endianess(Endianess::Little));
        assert_eq!(parameter.reverse_data(&[0x02, 0x01]), vec![0x00, 0x01, 0x02]);
        assert_eq!(parameter.reverse_data(&[0x03, 0x02, 0x01]), vec![0x01, 0x02, 0x03]);
        assert_eq!(
            parameter
                .convert_from_packet(&[0x02, 0x01], &Role::default(), false)
                .integer_value,
            0x0102
        );
    }

    #[test]
    fn test_decimal_scale_round_trip() {
        let parameter = Parameter::builder("SET_TEMPERATURE")
            .logical(Logical::Decimal(LogicalDecimal::new(4.5, 30.5)))
            .physical(Physical::integer(0.0, 2.0))
            .cast(DecimalIntegerScale::new(10.0, 0.0))
            .build()
            .unwrap();
        let role = Role::default();
        let value = parameter.convert_from_packet(&[0x00, 0xD7], &role, false);
        assert_eq!(value.kind, VariableType::Float);
        assert_eq!(value.float_value, 21.5);
        assert_eq!(parameter.convert_to_packet(&value, &role), vec![0x00, 0xD7]);
        // Integers are accepted for decimal parameters.
        assert_eq!(parameter.convert_to_packet(&Variable::from(20), &role), vec![0x00, 0xC8]);
    }

    #[test]
    fn test_builder_requires_logical_and_physical() {
        assert_eq!(
            Parameter::builder("X").physical(Physical::default()).build().unwrap_err(),
            DevDescError::MissingLogical {
                parameter: "X".into()
            }
        );
        assert_eq!(
            Parameter::builder("X")
                .logical(Logical::Boolean(LogicalBoolean::default()))
                .build()
                .unwrap_err(),
            DevDescError::MissingPhysical {
                parameter: "X".into()
            }
        );
    }
}
