//! Containers and their environment, configuration files, and ports.

use serde::{Deserialize, Serialize};

use crate::parameter::{ParameterType, Parameterized};
use crate::probe::HealthProbe;
use crate::resources::Resources;
use crate::wire::nullable;

/// A container that makes up part of a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Container {
    /// Container name, unique within the spec.
    pub name: String,
    /// Image reference.
    pub image: String,
    /// Resource requirements.
    pub resources: Resources,
    /// Entrypoint override.
    #[serde(deserialize_with = "nullable")]
    pub cmd: Vec<String>,
    /// Arguments passed to the entrypoint.
    #[serde(deserialize_with = "nullable")]
    pub args: Vec<String>,
    /// Environment variables.
    #[serde(deserialize_with = "nullable")]
    pub env: Vec<Env>,
    /// Files written into the container filesystem.
    #[serde(deserialize_with = "nullable")]
    pub config: Vec<ConfigFile>,
    /// Exposed ports.
    #[serde(deserialize_with = "nullable")]
    pub ports: Vec<Port>,
    /// Probe deciding whether the container must be restarted.
    pub liveness_probe: HealthProbe,
    /// Probe deciding whether the container receives traffic.
    pub readiness_probe: HealthProbe,
    /// Name of the secret used to pull the image.
    pub image_pull_secret: String,
}

impl Container {
    /// Creates a container with a name and image and nothing else set.
    #[must_use]
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            ..Self::default()
        }
    }
}

/// An environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Env {
    /// Variable name.
    pub name: String,
    /// Literal value. Used only when `from_param` is empty.
    pub value: String,
    /// Name of the parameter that supplies the value.
    pub from_param: String,
}

impl Env {
    /// An environment variable with a literal value.
    #[must_use]
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            from_param: String::new(),
        }
    }

    /// An environment variable bound to a parameter.
    #[must_use]
    pub fn parameterized(name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            from_param: parameter.into(),
        }
    }
}

impl Parameterized for Env {
    fn reference(&self) -> Option<&str> {
        (!self.from_param.is_empty()).then_some(self.from_param.as_str())
    }

    fn expected_type(&self) -> ParameterType {
        ParameterType::String
    }

    fn bind(&mut self, rendered: String) {
        self.value = rendered;
        self.from_param.clear();
    }
}

/// A file written into the container at start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigFile {
    /// Absolute path of the file inside the container.
    pub path: String,
    /// Literal contents. Used only when `from_param` is empty.
    pub value: String,
    /// Name of the parameter that supplies the contents.
    pub from_param: String,
}

impl Parameterized for ConfigFile {
    fn reference(&self) -> Option<&str> {
        (!self.from_param.is_empty()).then_some(self.from_param.as_str())
    }

    fn expected_type(&self) -> ParameterType {
        ParameterType::String
    }

    fn bind(&mut self, rendered: String) {
        self.value = rendered;
        self.from_param.clear();
    }
}

/// Transport protocol of a port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortProtocol {
    /// TCP, assumed when the document omits `protocol` or leaves it empty.
    #[default]
    #[serde(alias = "")]
    Tcp,
    /// UDP.
    Udp,
}

/// A port exposed by a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Port {
    /// Port name, unique within the container when set.
    pub name: String,
    /// Port number. Kept as the wire's signed integer so out-of-range
    /// values survive deserialization and can be reported.
    #[serde(rename = "port")]
    pub container_port: i32,
    /// Transport protocol.
    pub protocol: PortProtocol,
}

impl Port {
    /// A TCP port.
    #[must_use]
    pub fn tcp(name: impl Into<String>, container_port: i32) -> Self {
        Self {
            name: name.into(),
            container_port,
            protocol: PortProtocol::Tcp,
        }
    }
}
