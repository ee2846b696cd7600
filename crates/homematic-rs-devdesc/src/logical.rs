// crates/homematic-rs-devdesc/src/logical.rs

//! Logical types: the meaning and legal range of a parameter value,
//! independent of how it is encoded on the wire.
//!
//! Logical definitions are built once when a device description is loaded
//! and are read-only afterwards.

use homematic_rs::{Variable, VariableType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type tag of a [`Logical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalType {
    Integer,
    Integer64,
    Decimal,
    Boolean,
    String,
    Enumeration,
    Action,
    Array,
    Struct,
}

/// The logical type of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Logical {
    Integer(LogicalInteger),
    Integer64(LogicalInteger64),
    Decimal(LogicalDecimal),
    Boolean(LogicalBoolean),
    String(LogicalString),
    Enumeration(LogicalEnumeration),
    Action(LogicalAction),
    Array(LogicalArray),
    Struct(LogicalStruct),
}

impl Logical {
    pub fn kind(&self) -> LogicalType {
        match self {
            Logical::Integer(_) => LogicalType::Integer,
            Logical::Integer64(_) => LogicalType::Integer64,
            Logical::Decimal(_) => LogicalType::Decimal,
            Logical::Boolean(_) => LogicalType::Boolean,
            Logical::String(_) => LogicalType::String,
            Logical::Enumeration(_) => LogicalType::Enumeration,
            Logical::Action(_) => LogicalType::Action,
            Logical::Array(_) => LogicalType::Array,
            Logical::Struct(_) => LogicalType::Struct,
        }
    }

    pub fn default_value_exists(&self) -> bool {
        match self {
            Logical::Integer(l) => l.default_value_exists,
            Logical::Integer64(l) => l.default_value_exists,
            Logical::Decimal(l) => l.default_value_exists,
            Logical::Boolean(l) => l.default_value_exists,
            Logical::String(l) => l.default_value_exists,
            Logical::Enumeration(l) => l.default_value_exists,
            Logical::Action(l) => l.default_value_exists,
            Logical::Array(l) => l.default_value_exists,
            Logical::Struct(l) => l.default_value_exists,
        }
    }

    pub fn set_to_value_on_pairing_exists(&self) -> bool {
        match self {
            Logical::Integer(l) => l.set_to_value_on_pairing_exists,
            Logical::Integer64(l) => l.set_to_value_on_pairing_exists,
            Logical::Decimal(l) => l.set_to_value_on_pairing_exists,
            Logical::Boolean(l) => l.set_to_value_on_pairing_exists,
            Logical::String(l) => l.set_to_value_on_pairing_exists,
            Logical::Enumeration(l) => l.set_to_value_on_pairing_exists,
            Logical::Action(l) => l.set_to_value_on_pairing_exists,
            Logical::Array(l) => l.set_to_value_on_pairing_exists,
            Logical::Struct(l) => l.set_to_value_on_pairing_exists,
        }
    }

    /// Returns the configured default, or the zero value of the type if no
    /// default is configured.
    pub fn default_value(&self) -> Variable {
        let exists = self.default_value_exists();
        match self {
            Logical::Integer(l) => Variable::from(if exists { l.default_value } else { 0 }),
            Logical::Integer64(l) => Variable::from(if exists { l.default_value } else { 0i64 }),
            Logical::Decimal(l) => Variable::from(if exists { l.default_value } else { 0.0 }),
            Logical::Boolean(l) => Variable::from(exists && l.default_value),
            Logical::Action(l) => Variable::from(exists && l.default_value),
            Logical::String(l) => {
                Variable::from(if exists { l.default_value.clone() } else { String::new() })
            }
            Logical::Enumeration(l) => Variable::from(if exists { l.default_value } else { 0 }),
            Logical::Array(_) => Variable::new(VariableType::Array),
            Logical::Struct(_) => Variable::new(VariableType::Struct),
        }
    }

    /// Returns the value to write right after pairing. Same shape as
    /// [`Logical::default_value`].
    pub fn set_to_value_on_pairing(&self) -> Variable {
        let exists = self.set_to_value_on_pairing_exists();
        match self {
            Logical::Integer(l) => {
                Variable::from(if exists { l.set_to_value_on_pairing } else { 0 })
            }
            Logical::Integer64(l) => {
                Variable::from(if exists { l.set_to_value_on_pairing } else { 0i64 })
            }
            Logical::Decimal(l) => {
                Variable::from(if exists { l.set_to_value_on_pairing } else { 0.0 })
            }
            Logical::Boolean(l) => Variable::from(exists && l.set_to_value_on_pairing),
            Logical::Action(l) => Variable::from(exists && l.set_to_value_on_pairing),
            Logical::String(l) => Variable::from(if exists {
                l.set_to_value_on_pairing.clone()
            } else {
                String::new()
            }),
            Logical::Enumeration(l) => {
                Variable::from(if exists { l.set_to_value_on_pairing } else { 0 })
            }
            Logical::Array(_) => Variable::new(VariableType::Array),
            Logical::Struct(_) => Variable::new(VariableType::Struct),
        }
    }

    /// Returns `(min, max)` for types that have a numeric range.
    pub fn numeric_range(&self) -> Option<(f64, f64)> {
        match self {
            Logical::Integer(l) => Some((f64::from(l.minimum_value), f64::from(l.maximum_value))),
            Logical::Integer64(l) => Some((l.minimum_value as f64, l.maximum_value as f64)),
            Logical::Decimal(l) => Some((l.minimum_value, l.maximum_value)),
            Logical::Enumeration(l) => {
                Some((f64::from(l.minimum_value), f64::from(l.maximum_value)))
            }
            _ => None,
        }
    }
}

// --- Integer ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogicalInteger {
    pub minimum_value: i32,
    pub maximum_value: i32,
    pub default_value_exists: bool,
    pub default_value: i32,
    pub set_to_value_on_pairing_exists: bool,
    pub set_to_value_on_pairing: i32,
    /// Special value name -> value.
    pub special_values_string_map: BTreeMap<String, i32>,
    /// Special value -> name. Kept in sync by [`LogicalInteger::add_special_value`].
    pub special_values_integer_map: BTreeMap<i32, String>,
}

impl Default for LogicalInteger {
    fn default() -> Self {
        Self {
            minimum_value: i32::MIN,
            maximum_value: i32::MAX,
            default_value_exists: false,
            default_value: 0,
            set_to_value_on_pairing_exists: false,
            set_to_value_on_pairing: 0,
            special_values_string_map: BTreeMap::new(),
            special_values_integer_map: BTreeMap::new(),
        }
    }
}

impl LogicalInteger {
    pub fn new(minimum_value: i32, maximum_value: i32) -> Self {
        Self {
            minimum_value,
            maximum_value,
            ..Self::default()
        }
    }

    pub fn add_special_value(&mut self, name: impl Into<String>, value: i32) {
        let name = name.into();
        self.special_values_integer_map.insert(value, name.clone());
        self.special_values_string_map.insert(name, value);
    }

    pub fn is_special_value(&self, value: i32) -> bool {
        self.special_values_integer_map.contains_key(&value)
            || self.special_values_string_map.values().any(|v| *v == value)
    }
}

// --- Integer64 ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogicalInteger64 {
    pub minimum_value: i64,
    pub maximum_value: i64,
    pub default_value_exists: bool,
    pub default_value: i64,
    pub set_to_value_on_pairing_exists: bool,
    pub set_to_value_on_pairing: i64,
    pub special_values_string_map: BTreeMap<String, i64>,
    pub special_values_integer_map: BTreeMap<i64, String>,
}

impl Default for LogicalInteger64 {
    fn default() -> Self {
        Self {
            minimum_value: i64::MIN,
            maximum_value: i64::MAX,
            default_value_exists: false,
            default_value: 0,
            set_to_value_on_pairing_exists: false,
            set_to_value_on_pairing: 0,
            special_values_string_map: BTreeMap::new(),
            special_values_integer_map: BTreeMap::new(),
        }
    }
}

impl LogicalInteger64 {
    pub fn new(minimum_value: i64, maximum_value: i64) -> Self {
        Self {
            minimum_value,
            maximum_value,
            ..Self::default()
        }
    }

    pub fn add_special_value(&mut self, name: impl Into<String>, value: i64) {
        let name = name.into();
        self.special_values_integer_map.insert(value, name.clone());
        self.special_values_string_map.insert(name, value);
    }

    pub fn is_special_value(&self, value: i64) -> bool {
        self.special_values_integer_map.contains_key(&value)
            || self.special_values_string_map.values().any(|v| *v == value)
    }
}

// --- Decimal ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogicalDecimal {
    pub minimum_value: f64,
    pub maximum_value: f64,
    pub default_value_exists: bool,
    pub default_value: f64,
    pub set_to_value_on_pairing_exists: bool,
    pub set_to_value_on_pairing: f64,
    /// Special value name -> value. Floats are not `Ord`, so membership is
    /// tested by equality over the values.
    pub special_values_string_map: BTreeMap<String, f64>,
}

impl Default for LogicalDecimal {
    fn default() -> Self {
        Self {
            minimum_value: f64::MIN,
            maximum_value: f64::MAX,
            default_value_exists: false,
            default_value: 0.0,
            set_to_value_on_pairing_exists: false,
            set_to_value_on_pairing: 0.0,
            special_values_string_map: BTreeMap::new(),
        }
    }
}

impl LogicalDecimal {
    pub fn new(minimum_value: f64, maximum_value: f64) -> Self {
        Self {
            minimum_value,
            maximum_value,
            ..Self::default()
        }
    }

    pub fn add_special_value(&mut self, name: impl Into<String>, value: f64) {
        self.special_values_string_map.insert(name.into(), value);
    }

    pub fn is_special_value(&self, value: f64) -> bool {
        self.special_values_string_map.values().any(|v| *v == value)
    }
}

// --- Enumeration ---

/// One named option of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerationValue {
    pub id: String,
    pub index: i32,
}

impl EnumerationValue {
    pub fn new(id: impl Into<String>, index: i32) -> Self {
        Self {
            id: id.into(),
            index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogicalEnumeration {
    pub minimum_value: i32,
    pub maximum_value: i32,
    pub default_value_exists: bool,
    pub default_value: i32,
    pub set_to_value_on_pairing_exists: bool,
    pub set_to_value_on_pairing: i32,
    pub values: Vec<EnumerationValue>,
}

impl LogicalEnumeration {
    /// Creates an enumeration whose bounds are the smallest and largest index.
    pub fn new(values: Vec<EnumerationValue>) -> Self {
        let minimum_value = values.iter().map(|v| v.index).min().unwrap_or(0);
        let maximum_value = values.iter().map(|v| v.index).max().unwrap_or(0);
        Self {
            minimum_value,
            maximum_value,
            values,
            ..Self::default()
        }
    }

    pub fn index_of(&self, id: &str) -> Option<i32> {
        self.values.iter().find(|v| v.id == id).map(|v| v.index)
    }

    pub fn id_of(&self, index: i32) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.index == index)
            .map(|v| v.id.as_str())
    }
}

// --- Simple types ---

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogicalBoolean {
    pub default_value_exists: bool,
    pub default_value: bool,
    pub set_to_value_on_pairing_exists: bool,
    pub set_to_value_on_pairing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogicalAction {
    pub default_value_exists: bool,
    pub default_value: bool,
    pub set_to_value_on_pairing_exists: bool,
    pub set_to_value_on_pairing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogicalString {
    pub default_value_exists: bool,
    pub default_value: String,
    pub set_to_value_on_pairing_exists: bool,
    pub set_to_value_on_pairing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogicalArray {
    pub default_value_exists: bool,
    pub set_to_value_on_pairing_exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogicalStruct {
    pub default_value_exists: bool,
    pub set_to_value_on_pairing_exists: bool,
}
