// crates/homematic-rs-devdesc/src/group.rs

use crate::parameter::Parameter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The kind of paramset a group describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterGroupType {
    /// Device configuration stored in EEPROM (MASTER paramset).
    #[default]
    Config,
    /// Runtime values (VALUES paramset).
    Variables,
    /// Per-peer link configuration (LINK paramset).
    Link,
}

/// A set of parameters that belong together.
///
/// Parameters only hold a weak reference back to their group, so dropping
/// the last `Arc` of a group frees it even while parameters are still
/// referenced elsewhere.
#[derive(Debug)]
pub struct ParameterGroup {
    pub id: String,
    pub kind: ParameterGroupType,
    parameters: BTreeMap<String, Arc<Parameter>>,
}

impl ParameterGroup {
    /// Creates the group and points every parameter's parent at it.
    /// Parameters with the same id replace earlier ones.
    pub fn new(
        id: impl Into<String>,
        kind: ParameterGroupType,
        parameters: impl IntoIterator<Item = Parameter>,
    ) -> Arc<Self> {
        let id = id.into();
        Arc::new_cyclic(|group| {
            let parameters = parameters
                .into_iter()
                .map(|mut parameter| {
                    parameter.parent = group.clone();
                    (parameter.id.clone(), Arc::new(parameter))
                })
                .collect();
            Self {
                id,
                kind,
                parameters,
            }
        })
    }

    pub fn get_parameter(&self, id: &str) -> Option<&Arc<Parameter>> {
        self.parameters.get(id)
    }

    /// Parameters in id order.
    pub fn parameters(&self) -> impl Iterator<Item = &Arc<Parameter>> {
        self.parameters.values()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
