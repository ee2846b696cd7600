// crates/homematic-rs-devdesc/src/definition.rs

//! Serde shape of a parameter, for loading definitions from any serde
//! format.

use crate::cast::Cast;
use crate::error::DevDescError;
use crate::logical::Logical;
use crate::parameter::{Parameter, ParameterFlags};
use crate::physical::Physical;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// A parameter as written in a definition file.
///
/// Convert with `Parameter::try_from`, which runs the same validation as
/// [`crate::ParameterBuilder::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterDefinition {
    pub id: String,
    pub readable: bool,
    pub writeable: bool,
    /// `None` leaves signedness unset (unsigned).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed: Option<bool>,
    pub unit: String,
    pub control: String,
    pub flags: ParameterFlags,
    pub logical: Option<Logical>,
    pub physical: Option<Physical>,
    /// Applied in order when decoding.
    pub casts: Vec<Cast>,
    pub roles: Vec<Role>,
}

impl Default for ParameterDefinition {
    fn default() -> Self {
        Self {
            id: String::new(),
            readable: true,
            writeable: true,
            signed: None,
            unit: String::new(),
            control: String::new(),
            flags: ParameterFlags::default(),
            logical: None,
            physical: None,
            casts: Vec::new(),
            roles: Vec::new(),
        }
    }
}

impl TryFrom<ParameterDefinition> for Parameter {
    type Error = DevDescError;

    fn try_from(definition: ParameterDefinition) -> Result<Self, Self::Error> {
        let mut builder = Parameter::builder(definition.id)
            .readable(definition.readable)
            .writeable(definition.writeable)
            .unit(definition.unit)
            .control(definition.control)
            .flags(definition.flags)
            .casts(definition.casts);
        if let Some(logical) = definition.logical {
            builder = builder.logical(logical);
        }
        if let Some(physical) = definition.physical {
            builder = builder.physical(physical);
        }
        if let Some(signed) = definition.signed {
            builder = builder.signed(signed);
        }
        for role in definition.roles {
            builder = builder.role(role);
        }
        builder.build()
    }
}

impl From<&Parameter> for ParameterDefinition {
    fn from(parameter: &Parameter) -> Self {
        Self {
            id: parameter.id.clone(),
            readable: parameter.readable,
            writeable: parameter.writeable,
            signed: parameter.is_signed_set.then_some(parameter.is_signed),
            unit: parameter.unit.clone(),
            control: parameter.control.clone(),
            flags: parameter.flags,
            logical: Some(parameter.logical.clone()),
            physical: Some(parameter.physical.clone()),
            casts: parameter.casts.clone(),
            roles: parameter.roles.values().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::DecimalIntegerScale;
    use crate::logical::LogicalDecimal;

    #[test]
    fn test_definition_round_trip_through_parameter() {
        let parameter = Parameter::builder("SET_TEMPERATURE")
            .logical(Logical::Decimal(LogicalDecimal::new(4.5, 30.5)))
            .physical(Physical::integer(0.0, 2.0))
            .cast(DecimalIntegerScale::new(10.0, 0.0))
            .unit("°C")
            .build()
            .unwrap();
        let definition = ParameterDefinition::from(&parameter);
        assert_eq!(definition.signed, None);
        assert_eq!(definition.unit, "°C");

        let rebuilt = Parameter::try_from(definition.clone()).unwrap();
        assert_eq!(ParameterDefinition::from(&rebuilt), definition);
    }

    #[test]
    fn test_missing_parts_are_rejected() {
        let definition = ParameterDefinition {
            id: "EMPTY".into(),
            ..ParameterDefinition::default()
        };
        assert_eq!(
            Parameter::try_from(definition).unwrap_err(),
            DevDescError::MissingLogical {
                parameter: "EMPTY".into()
            }
        );
    }
}
