//! The component spec and its document envelope.
//!
//! A [`ComponentSpec`] is a reusable template: its containers and workload
//! settings may reference declared parameters, and it is instantiated once
//! per set of parameter values.

use std::collections::BTreeMap;

use schematic_common::constants::{API_VERSION, KIND};
use serde::{Deserialize, Serialize};

use crate::container::Container;
use crate::parameter::{Parameter, Parameterized, WorkloadSetting};
use crate::wire::nullable;

/// Desired state of a component schematic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentSpec {
    /// Declared parameters, unique by name.
    #[serde(deserialize_with = "nullable")]
    pub parameters: Vec<Parameter>,
    /// Workload type understood by the orchestrator.
    pub workload_type: String,
    /// Operating system the containers need.
    pub os_type: String,
    /// CPU architecture the containers need.
    pub arch: String,
    /// Containers, at least one, unique by name.
    #[serde(deserialize_with = "nullable")]
    pub containers: Vec<Container>,
    /// Settings for the workload type.
    #[serde(deserialize_with = "nullable")]
    pub workload_settings: Vec<WorkloadSetting>,
}

impl ComponentSpec {
    /// Looks up a declared parameter by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Names of all parameters referenced by `fromParam` fields, in
    /// document order, duplicates included.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        let containers = self.containers.iter().flat_map(|c| {
            c.env
                .iter()
                .filter_map(Parameterized::reference)
                .chain(c.config.iter().filter_map(Parameterized::reference))
        });
        let settings = self
            .workload_settings
            .iter()
            .filter_map(Parameterized::reference);
        containers.chain(settings).collect()
    }

    /// Returns whether any `fromParam` reference is left.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        self.references().is_empty()
    }
}

/// Object metadata of a schematic document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectMeta {
    /// Object name.
    pub name: String,
    /// Namespace, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Labels.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Annotations.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    /// Remaining metadata (`uid`, `resourceVersion`, `generation`,
    /// `creationTimestamp`, ...), carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Observed state of a schematic. Carries no fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentStatus {}

/// A component schematic document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentSchematic {
    /// API group and version.
    pub api_version: String,
    /// Object kind.
    pub kind: String,
    /// Object metadata.
    pub metadata: ObjectMeta,
    /// The component template.
    pub spec: ComponentSpec,
    /// Observed state.
    pub status: ComponentStatus,
}

impl Default for ComponentSchematic {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_owned(),
            kind: KIND.to_owned(),
            metadata: ObjectMeta::default(),
            spec: ComponentSpec::default(),
            status: ComponentStatus::default(),
        }
    }
}

impl ComponentSchematic {
    /// Wraps a spec in a document with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>, spec: ComponentSpec) -> Self {
        Self {
            metadata: ObjectMeta {
                name: name.into(),
                ..ObjectMeta::default()
            },
            spec,
            ..Self::default()
        }
    }
}
