// src/lib.rs

#![doc = "Converts HomeMatic device-description parameters between wire bytes and RPC values."]
#![doc = ""]
#![doc = "A `Parameter` combines a logical type (meaning and range), a physical"]
#![doc = "encoding (byte/bit placement, endianness) and an ordered chain of casts."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `Parameter::convert_from_packet`: decoding wire bytes into a `Variable`."]
#![doc = "- `Parameter::convert_to_packet`: encoding a `Variable` into wire bytes."]
#![doc = "- `Parameter::adjust_bit_position`: placing sub-byte fields inside a packet byte."]
#![doc = "- `ParameterDefinition`: loading definitions through serde."]

// --- Crate Modules ---

pub mod cast;
mod definition;
mod error;
mod group;
mod logging;
pub mod logical;
mod parameter;
pub mod physical;
mod role;

// --- Public API Re-exports ---

pub use cast::{Cast, CastContext, PacketCast};
pub use definition::ParameterDefinition;
pub use error::DevDescError;
pub use group::{ParameterGroup, ParameterGroupType};
pub use logging::LogMetadata;
pub use logical::{Logical, LogicalType};
pub use parameter::{Parameter, ParameterBuilder, ParameterFlags};
pub use physical::{Endianess, OperationType, Physical, PhysicalType};
pub use role::{Role, RoleDirection, RoleScaleInfo, ScaleRange};

// Re-exported so callers need only one crate for the value type.
pub use homematic_rs::{Variable, VariableType};
