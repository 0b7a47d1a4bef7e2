//! # schematic-model
//!
//! The type model of a component schematic.
//!
//! Every struct serializes with the camelCase field names of the external
//! wire format, and every field falls back to its zero value when absent,
//! so documents written by other producers load unchanged.
//!
//! - **Parameter**: declared inputs, workload settings, typed values.
//! - **Container**: containers, environment, config files, ports.
//! - **Resources**: cpu, memory, gpu, volumes, extended resources.
//! - **Probe**: health probes and their handler sum type.
//! - **Component**: the spec and its document envelope.

pub mod component;
pub mod container;
pub mod parameter;
pub mod probe;
pub mod resources;

mod wire;

pub use component::{ComponentSchematic, ComponentSpec, ComponentStatus, ObjectMeta};
pub use container::{ConfigFile, Container, Env, Port, PortProtocol};
pub use parameter::{ParamValue, Parameter, ParameterType, Parameterized, WorkloadSetting};
pub use probe::{Exec, HealthProbe, HttpGet, HttpHeader, ProbeAction, TcpSocket};
pub use resources::{
    AccessMode, Cpu, Disk, ExtendedResource, Gpu, Memory, Resources, SharingPolicy, Volume,
};
