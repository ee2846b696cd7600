// crates/homematic-rs/src/variable.rs

//! The generic RPC value container.
//!
//! A `Variable` is a tagged value whose tag can be reassigned at any time.
//! Conversion pipelines thread one mutable `Variable` through a chain of
//! transforms, and each step may read one payload field and write another
//! (e.g. integer in, float out) before retagging it. All payload fields are
//! therefore always present; only the one selected by `kind` is meaningful.

use std::collections::BTreeMap;

/// The type tag of a [`Variable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableType {
    #[default]
    Void,
    Integer,
    Integer64,
    Float,
    Boolean,
    String,
    Base64,
    Binary,
    Array,
    Struct,
}

impl VariableType {
    /// Returns the binary RPC type id for this tag.
    pub const fn rpc_type_id(self) -> u32 {
        match self {
            VariableType::Void => 0x00,
            VariableType::Integer => 0x01,
            VariableType::Boolean => 0x02,
            VariableType::String => 0x03,
            VariableType::Float => 0x04,
            VariableType::Base64 => 0x11,
            VariableType::Binary => 0xD0,
            VariableType::Integer64 => 0xD1,
            VariableType::Array => 0x100,
            VariableType::Struct => 0x101,
        }
    }

    /// Maps a binary RPC type id back to its tag.
    pub const fn from_rpc_type_id(id: u32) -> Option<Self> {
        match id {
            0x00 => Some(VariableType::Void),
            0x01 => Some(VariableType::Integer),
            0x02 => Some(VariableType::Boolean),
            0x03 => Some(VariableType::String),
            0x04 => Some(VariableType::Float),
            0x11 => Some(VariableType::Base64),
            0xD0 => Some(VariableType::Binary),
            0xD1 => Some(VariableType::Integer64),
            0x100 => Some(VariableType::Array),
            0x101 => Some(VariableType::Struct),
            _ => None,
        }
    }
}

/// Mutable tagged RPC value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Variable {
    pub kind: VariableType,
    /// Set on values that describe an RPC fault.
    pub error_struct: bool,
    pub boolean_value: bool,
    pub integer_value: i32,
    pub integer_value64: i64,
    pub float_value: f64,
    pub string_value: String,
    pub binary_value: Vec<u8>,
    pub array_value: Vec<Variable>,
    pub struct_value: BTreeMap<String, Variable>,
}

impl Variable {
    /// Creates an empty value with the given tag and zeroed payload.
    pub fn new(kind: VariableType) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn void() -> Self {
        Self::default()
    }

    pub fn is_void(&self) -> bool {
        self.kind == VariableType::Void
    }

    /// Sets the 32-bit integer payload and retags the value.
    pub fn set_integer(&mut self, value: i32) {
        self.kind = VariableType::Integer;
        self.integer_value = value;
    }

    pub fn set_integer64(&mut self, value: i64) {
        self.kind = VariableType::Integer64;
        self.integer_value64 = value;
    }

    pub fn set_float(&mut self, value: f64) {
        self.kind = VariableType::Float;
        self.float_value = value;
    }

    pub fn set_boolean(&mut self, value: bool) {
        self.kind = VariableType::Boolean;
        self.boolean_value = value;
    }

    pub fn set_string(&mut self, value: impl Into<String>) {
        self.kind = VariableType::String;
        self.string_value = value.into();
    }

    pub fn set_binary(&mut self, value: Vec<u8>) {
        self.kind = VariableType::Binary;
        self.binary_value = value;
    }

    /// Returns the payload selected by the tag as an `i64`, converting where
    /// a numeric reading exists. Strings are parsed, other tags read as 0.
    pub fn numeric_i64(&self) -> i64 {
        match self.kind {
            VariableType::Integer => i64::from(self.integer_value),
            VariableType::Integer64 => self.integer_value64,
            VariableType::Float => self.float_value.round() as i64,
            VariableType::Boolean => i64::from(self.boolean_value),
            VariableType::String | VariableType::Base64 => {
                crate::math::get_number64(&self.string_value)
            }
            _ => 0,
        }
    }
}

// --- Constructors from native values ---

impl From<bool> for Variable {
    fn from(value: bool) -> Self {
        let mut v = Variable::new(VariableType::Boolean);
        v.boolean_value = value;
        v
    }
}

impl From<i32> for Variable {
    fn from(value: i32) -> Self {
        let mut v = Variable::new(VariableType::Integer);
        v.integer_value = value;
        v
    }
}

impl From<i64> for Variable {
    fn from(value: i64) -> Self {
        let mut v = Variable::new(VariableType::Integer64);
        v.integer_value64 = value;
        v
    }
}

impl From<f64> for Variable {
    fn from(value: f64) -> Self {
        let mut v = Variable::new(VariableType::Float);
        v.float_value = value;
        v
    }
}

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Variable::from(String::from(value))
    }
}

impl From<String> for Variable {
    fn from(value: String) -> Self {
        let mut v = Variable::new(VariableType::String);
        v.string_value = value;
        v
    }
}

impl From<Vec<u8>> for Variable {
    fn from(value: Vec<u8>) -> Self {
        let mut v = Variable::new(VariableType::Binary);
        v.binary_value = value;
        v
    }
}

impl From<Vec<Variable>> for Variable {
    fn from(value: Vec<Variable>) -> Self {
        let mut v = Variable::new(VariableType::Array);
        v.array_value = value;
        v
    }
}

impl From<BTreeMap<String, Variable>> for Variable {
    fn from(value: BTreeMap<String, Variable>) -> Self {
        let mut v = Variable::new(VariableType::Struct);
        v.struct_value = value;
        v
    }
}
