// crates/homematic-rs-devdesc/src/role.rs

//! Roles select how a decoded number maps to its meaning in one usage
//! context (invert and/or linear scaling), independent of the cast chain.

use crate::error::DevDescError;
use crate::logical::Logical;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoleDirection {
    #[default]
    Both,
    Input,
    Output,
}

/// A closed numeric interval used by role scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl ScaleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn is_empty(&self) -> bool {
        self.max == self.min
    }
}

/// `value_range` is the range of the decoded value, `scale_range` the range
/// it is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoleScaleInfo {
    pub value_range: Option<ScaleRange>,
    pub scale_range: Option<ScaleRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Role {
    pub id: u64,
    pub direction: RoleDirection,
    pub invert: bool,
    pub scale: bool,
    pub scale_info: RoleScaleInfo,
}

impl Role {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: RoleDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Enables scaling. `None` ranges are filled in from the logical type
    /// when the owning parameter is built.
    pub fn with_scale(
        mut self,
        value_range: Option<ScaleRange>,
        scale_range: Option<ScaleRange>,
    ) -> Self {
        self.scale = true;
        self.scale_info = RoleScaleInfo {
            value_range,
            scale_range,
        };
        self
    }

    /// Fills missing scale ranges from the logical min/max and rejects
    /// ranges that cannot be scaled.
    pub(crate) fn resolve_scale_info(
        &mut self,
        parameter: &str,
        logical: &Logical,
    ) -> Result<(), DevDescError> {
        if !self.scale {
            return Ok(());
        }
        let logical_range = logical
            .numeric_range()
            .map(|(min, max)| ScaleRange::new(min, max));
        let info = &mut self.scale_info;
        if info.value_range.is_none() {
            info.value_range = logical_range;
        }
        if info.scale_range.is_none() {
            info.scale_range = logical_range;
        }
        match (info.value_range, info.scale_range) {
            (Some(value_range), Some(_)) if value_range.is_empty() => {
                Err(DevDescError::InvalidScaleInfo {
                    parameter: parameter.into(),
                    role: self.id,
                })
            }
            (Some(_), Some(_)) => Ok(()),
            _ => Err(DevDescError::MissingScaleInfo {
                parameter: parameter.into(),
                role: self.id,
            }),
        }
    }

    /// Maps a decoded value onto the scale range. `None` if this role does
    /// not scale or its ranges are unusable.
    pub fn scale_to_logical(&self, value: f64) -> Option<f64> {
        let (value_range, scale_range) = self.ranges()?;
        Some(scale_linear(value, value_range, scale_range))
    }

    /// Inverse of [`Role::scale_to_logical`].
    pub fn scale_to_physical(&self, value: f64) -> Option<f64> {
        let (value_range, scale_range) = self.ranges()?;
        Some(scale_linear(value, scale_range, value_range))
    }

    fn ranges(&self) -> Option<(ScaleRange, ScaleRange)> {
        if !self.scale {
            return None;
        }
        match (self.scale_info.value_range, self.scale_info.scale_range) {
            (Some(v), Some(s)) if !v.is_empty() && !s.is_empty() => Some((v, s)),
            _ => None,
        }
    }
}

/// Linear map of `value` from `from` onto `to`.
pub fn scale_linear(value: f64, from: ScaleRange, to: ScaleRange) -> f64 {
    (value - from.min) * (to.max - to.min) / (from.max - from.min) + to.min
}

/// Reflects `value` inside `[min, max]`. Self-inverse.
pub fn reflect(value: f64, min: f64, max: f64) -> f64 {
    max - (value - min)
}

/// Integer variant of [`reflect`], saturating at the `i64` bounds.
pub fn reflect_i64(value: i64, min: i64, max: i64) -> i64 {
    max.saturating_sub(value.saturating_sub(min))
}
