// crates/homematic-rs-devdesc/src/cast/record.rs

//! Casts that pack structured values into raw byte records.

use super::{CastContext, IntegerTinyFloat, PacketCast};
use crate::error::DevDescError;
use crate::logging::{dd_debug, dd_warn};
use homematic_rs::math::{get_double, get_number};
use homematic_rs::{BinaryDecoder, BinaryEncoder, Variable};
use serde::{Deserialize, Serialize};

/// Carries a whole RPC value through a byte field using the binary RPC
/// framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RpcBinary;

impl RpcBinary {
    /// Decodes a field holding a binary RPC response.
    pub fn decode(bytes: &[u8]) -> Result<Variable, DevDescError> {
        Ok(BinaryDecoder::new().decode_response(bytes)?)
    }
}

impl PacketCast for RpcBinary {
    fn from_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        match Self::decode(&value.binary_value) {
            Ok(decoded) => *value = decoded,
            Err(e) => {
                dd_warn!(
                    ctx,
                    "rpcBinary: could not decode {} bytes: {}",
                    value.binary_value.len(),
                    e
                );
                *value = Variable::void();
            }
        }
    }

    fn to_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        let packet = BinaryEncoder::new().encode_response(value);
        *value = Variable::from(packet);
    }

    fn needs_binary_packet_data(&self) -> bool {
        true
    }
}

// --- CcrtdnParty ---

const PARTY_RECORD_LEN: usize = 8;
const PARTY_FIELDS: usize = 9;

/// Party mode schedule of a thermostat: write-only.
///
/// Encodes `temperature,start,day,month,year,end,day,month,year` where
/// start and end are minutes since midnight and years count from 2000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CcrtdnParty;

impl CcrtdnParty {
    /// Packs the comma separated schedule. `None` if fields are missing.
    pub fn pack(input: &str) -> Option<[u8; PARTY_RECORD_LEN]> {
        let fields: Vec<&str> = input.split(',').map(str::trim).collect();
        if fields.len() < PARTY_FIELDS {
            return None;
        }
        let field = |i: usize| get_number(fields[i]);
        let temperature = (get_double(fields[0]) * 2.0).round() as i32;
        Some([
            (temperature & 0x3F) as u8,
            (field(1) / 30) as u8,
            (field(2) & 0x1F) as u8,
            (field(4) & 0x7F) as u8,
            (field(5) / 30) as u8,
            (field(6) & 0x1F) as u8,
            (field(8) & 0x7F) as u8,
            (((field(3) & 0x0F) << 4) | (field(7) & 0x0F)) as u8,
        ])
    }
}

impl PacketCast for CcrtdnParty {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        value.set_string(String::new());
    }

    fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        match Self::pack(&value.string_value) {
            Some(record) => value.set_binary(record.to_vec()),
            None => dd_warn!(
                ctx,
                "ccrtdnParty: expected {} comma separated fields in \"{}\"",
                PARTY_FIELDS,
                value.string_value
            ),
        }
    }

    fn needs_binary_packet_data(&self) -> bool {
        true
    }
}

// --- Cfm ---

const CFM_RECORD_LEN: usize = 14;
const CFM_MAX_SEQUENCE: usize = 10;

/// Sound/LED sequence of a chime: write-only.
///
/// Encodes `volume,repetitions,max_time,entry,...` where `max_time` is in
/// seconds and up to ten sequence entries follow. An empty string or `0`
/// switches the output off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cfm;

impl Cfm {
    pub fn pack(input: &str) -> [u8; CFM_RECORD_LEN] {
        let mut record = [0u8; CFM_RECORD_LEN];
        let input = input.trim();
        if input.is_empty() || input == "0" {
            return record;
        }
        let fields: Vec<&str> = input.split(',').map(str::trim).collect();
        let byte = |i: usize| fields.get(i).map_or(0, |f| get_number(f).clamp(0, 255) as u8);

        record[0] = byte(0);
        record[1] = byte(1);
        let tenths = fields
            .get(2)
            .map_or(0, |f| (get_double(f) * 10.0).round() as i64);
        let max_time = IntegerTinyFloat::default().encode(tenths) as u16;
        record[2..4].copy_from_slice(&max_time.to_be_bytes());
        for (slot, i) in record[4..].iter_mut().zip(3..3 + CFM_MAX_SEQUENCE) {
            *slot = byte(i);
        }
        record
    }
}

impl PacketCast for Cfm {
    fn from_packet(&self, _ctx: &CastContext<'_>, value: &mut Variable) {
        value.set_string(String::new());
    }

    fn to_packet(&self, ctx: &CastContext<'_>, value: &mut Variable) {
        let record = Self::pack(&value.string_value);
        dd_debug!(ctx, "cfm: packed \"{}\" into {:02X?}", value.string_value, record);
        value.set_binary(record.to_vec());
    }

    fn needs_binary_packet_data(&self) -> bool {
        true
    }
}
