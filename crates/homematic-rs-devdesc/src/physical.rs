// crates/homematic-rs-devdesc/src/physical.rs

//! Physical encodings: where and how a value sits in a binary packet or
//! memory image.
//!
//! `index` and `size` use the byte.bit fixed-point convention: the integer
//! part counts bytes and the first decimal digit counts bits, so `1.2` is
//! byte 1, bit 2 and a size of `0.1` is a single bit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhysicalType {
    #[default]
    None,
    Integer,
    Boolean,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationType {
    #[default]
    Command,
    CentralCommand,
    Internal,
    Config,
    ConfigString,
    Store,
    Memory,
}

/// Byte order of multi-byte fields. Little-endian fields are byte-reversed
/// around the standard big-endian codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Endianess {
    #[default]
    Big,
    Little,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemoryIndexOperation {
    #[default]
    None,
    Addition,
    Subtraction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Physical {
    #[serde(rename = "type")]
    pub kind: PhysicalType,
    pub group_id: String,
    pub operation_type: OperationType,
    pub endianess: Endianess,
    /// Byte.bit position of the field.
    pub index: f64,
    /// Byte.bit length of the field.
    pub size: f64,
    /// True if `size` was given explicitly by the description.
    pub size_defined: bool,
    pub bit_size: i32,
    pub mask: i32,
    pub list: i32,
    /// EEPROM address for config and memory parameters.
    pub address: u32,
    pub memory_index: u32,
    pub memory_index_operation: MemoryIndexOperation,
    pub memory_channel_step: u32,
    pub start_index: u32,
    pub end_index: u32,
}

impl Default for Physical {
    fn default() -> Self {
        Self {
            kind: PhysicalType::None,
            group_id: String::new(),
            operation_type: OperationType::Command,
            endianess: Endianess::Big,
            index: 0.0,
            size: 1.0,
            size_defined: false,
            bit_size: -1,
            mask: -1,
            list: -1,
            address: 0,
            memory_index: 0,
            memory_index_operation: MemoryIndexOperation::None,
            memory_channel_step: 0,
            start_index: 0,
            end_index: 0,
        }
    }
}

impl Physical {
    /// An integer field at `index` with an explicit `size`.
    pub fn integer(index: f64, size: f64) -> Self {
        Self {
            kind: PhysicalType::Integer,
            index,
            size,
            size_defined: true,
            ..Self::default()
        }
    }

    pub fn boolean(index: f64, size: f64) -> Self {
        Self {
            kind: PhysicalType::Boolean,
            index,
            size,
            size_defined: true,
            ..Self::default()
        }
    }

    pub fn string(index: f64, size: f64) -> Self {
        Self {
            kind: PhysicalType::String,
            index,
            size,
            size_defined: true,
            ..Self::default()
        }
    }

    pub fn with_endianess(mut self, endianess: Endianess) -> Self {
        self.endianess = endianess;
        self
    }

    pub fn with_operation_type(mut self, operation_type: OperationType) -> Self {
        self.operation_type = operation_type;
        self
    }

    // --- byte.bit helpers ---

    /// Whole bytes of `size`.
    pub fn byte_size(&self) -> usize {
        if self.size <= 0.0 {
            return 0;
        }
        self.size.floor() as usize
    }

    /// Bits beyond the whole bytes of `size` (first decimal digit).
    pub fn bit_size_remainder(&self) -> u32 {
        if self.size <= 0.0 {
            return 0;
        }
        ((self.size * 10.0).round() as u64 % 10) as u32
    }

    /// Number of bytes the field touches.
    pub fn byte_len(&self) -> usize {
        self.byte_size() + usize::from(self.bit_size_remainder() > 0)
    }

    /// Width of the field in bits.
    pub fn total_bits(&self) -> u32 {
        self.byte_size() as u32 * 8 + self.bit_size_remainder()
    }

    /// Byte offset of the field.
    pub fn byte_index(&self) -> usize {
        if self.index <= 0.0 {
            return 0;
        }
        self.index.floor() as usize
    }

    /// Bit offset inside the byte at [`Physical::byte_index`].
    pub fn bit_index(&self) -> u32 {
        if self.index <= 0.0 {
            return 0;
        }
        let fraction = self.index - self.index.floor();
        ((fraction * 10.0).round() as u64 % 10) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_bit_size_helpers() {
        let one_bit = Physical::integer(0.0, 0.1);
        assert_eq!(one_bit.byte_size(), 0);
        assert_eq!(one_bit.bit_size_remainder(), 1);
        assert_eq!(one_bit.byte_len(), 1);
        assert_eq!(one_bit.total_bits(), 1);

        let twelve_bits = Physical::integer(0.0, 1.4);
        assert_eq!(twelve_bits.byte_size(), 1);
        assert_eq!(twelve_bits.bit_size_remainder(), 4);
        assert_eq!(twelve_bits.byte_len(), 2);
        assert_eq!(twelve_bits.total_bits(), 12);

        let word = Physical::integer(0.0, 2.0);
        assert_eq!(word.byte_len(), 2);
        assert_eq!(word.total_bits(), 16);
    }

    #[test]
    fn test_index_helpers() {
        let field = Physical::integer(1.2, 0.3);
        assert_eq!(field.byte_index(), 1);
        assert_eq!(field.bit_index(), 2);

        let aligned = Physical::integer(9.0, 1.0);
        assert_eq!(aligned.byte_index(), 9);
        assert_eq!(aligned.bit_index(), 0);

        // 0.7 is not exactly representable; the helper must still see bit 7.
        let high_bit = Physical::integer(0.7, 0.1);
        assert_eq!(high_bit.bit_index(), 7);
    }

    #[test]
    fn test_negative_size_reads_as_empty() {
        let field = Physical {
            size: -1.0,
            ..Physical::default()
        };
        assert_eq!(field.byte_len(), 0);
        assert_eq!(field.total_bits(), 0);
    }

    #[test]
    fn test_defaults() {
        let physical = Physical::default();
        assert_eq!(physical.size, 1.0);
        assert!(!physical.size_defined);
        assert_eq!(physical.endianess, Endianess::Big);
        assert_eq!(physical.kind, PhysicalType::None);
    }
}
