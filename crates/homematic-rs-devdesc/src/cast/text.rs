// crates/homematic-rs-devdesc/src/cast/text.rs

//! Casts that convert between text and numbers, byte arrays or lists.

use super::{CastContext, PacketCast, read_f64, read_i32};
use crate::error::DevDescError;
use crate::logging::dd_warn;
use homematic_rs::{Variable, VariableType};
use serde::{Deserialize, Serialize};

/// Integer on the device, its unsigned decimal text on the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StringUnsignedInteger;

impl PacketCast for StringUnsignedInteger {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let raw = read_i32(value) as u32;
        value.set_string(raw.to_string());
    }

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let raw = homematic_rs::math::get_unsigned_number(&value.string_value);
        value.set_integer(raw);
    }
}

/// `;` separated decimals on the device, an array of floats on the
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StringJsonArrayDecimal;

impl PacketCast for StringJsonArrayDecimal {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let items = value
            .string_value
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| Variable::from(homematic_rs::math::get_double(part)))
            .collect();
        value.kind = VariableType::Array;
        value.array_value = items;
    }

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let joined = value
            .array_value
            .iter()
            .map(|item| read_f64(item).to_string())
            .collect::<Vec<_>>()
            .join(";");
        value.set_string(joined);
    }
}

// --- StringReplace ---

/// Replaces `search` with `replace` on decode and the reverse on encode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StringReplace {
    pub search: String,
    pub replace: String,
}

impl StringReplace {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }

    /// Builds the cast from URL encoded attribute values, as found in
    /// device description files (`%20`, `+` for space).
    pub fn from_url_encoded(search: &str, replace: &str) -> Result<Self, DevDescError> {
        Ok(Self {
            search: url_decode(search, "search")?,
            replace: url_decode(replace, "replace")?,
        })
    }
}

fn url_decode(input: &str, attribute: &'static str) -> Result<String, DevDescError> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escape = bytes
                    .get(i + 1..i + 3)
                    .ok_or(DevDescError::InvalidAttributeFormat { attribute })?;
                decoded.extend(hex::decode(escape)?);
                i += 3;
            }
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            b => {
                decoded.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(decoded).map_err(|_| DevDescError::InvalidAttributeFormat { attribute })
}

impl PacketCast for StringReplace {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        if self.search.is_empty() {
            return;
        }
        let replaced = value.string_value.replace(&self.search, &self.replace);
        value.set_string(replaced);
    }

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        if self.replace.is_empty() {
            return;
        }
        let replaced = value.string_value.replace(&self.replace, &self.search);
        value.set_string(replaced);
    }
}

// --- HexStringByteArray ---

/// Raw packet bytes on the device, an uppercase hex string on the
/// parameter. Encoding accepts `AB01FF` as well as `AB,1,0xFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HexStringByteArray;

impl HexStringByteArray {
    /// Normalizes either input form to an even length hex string.
    pub fn normalize(input: &str) -> String {
        if input.contains(',') {
            return input.split(',').map(normalize_byte).collect();
        }
        let digits = strip_hex_prefix(input.trim());
        if digits.len() % 2 == 1 {
            format!("0{}", digits)
        } else {
            digits.to_string()
        }
    }

    /// Parses either input form into bytes.
    pub fn parse(input: &str) -> Result<Vec<u8>, DevDescError> {
        Ok(hex::decode(Self::normalize(input))?)
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// One comma separated entry as exactly two hex digits.
fn normalize_byte(entry: &str) -> String {
    let digits: Vec<char> = strip_hex_prefix(entry.trim()).chars().collect();
    match digits.len() {
        0 => String::new(),
        1 => format!("0{}", digits[0]),
        n => digits[n - 2..].iter().collect(),
    }
}

impl PacketCast for HexStringByteArray {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let text = hex::encode_upper(&value.binary_value);
        value.set_string(text);
    }

    fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        let bytes = Self::parse(&value.string_value).unwrap_or_else(|e| {
            dd_warn!(
                ctx,
                "hexStringByteArray: \"{}\" is not valid hex: {}",
                value.string_value,
                e
            );
            Vec::new()
        });
        value.set_binary(bytes);
    }

    fn needs_binary_packet_data(&self) -> bool {
        true
    }
}
