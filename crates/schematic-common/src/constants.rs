//! Workspace-wide constants.

/// API group and version written into every schematic document.
pub const API_VERSION: &str = "core.oam.dev/v1alpha1";

/// Object kind of a component schematic document.
pub const KIND: &str = "ComponentSchematic";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "schematic";

/// Lowest valid port number.
pub const MIN_PORT: i32 = 1;

/// Highest valid port number.
pub const MAX_PORT: i32 = 65_535;

/// Unit in which `memory.required` is expressed.
pub const MEMORY_UNIT: &str = "MB";

/// Probe period applied by `HealthProbe::from_action`.
pub const DEFAULT_PROBE_PERIOD_SECONDS: i32 = 10;

/// Probe timeout applied by `HealthProbe::from_action`.
pub const DEFAULT_PROBE_TIMEOUT_SECONDS: i32 = 1;

/// Success threshold applied by `HealthProbe::from_action`.
pub const DEFAULT_PROBE_SUCCESS_THRESHOLD: i32 = 1;

/// Failure threshold applied by `HealthProbe::from_action`.
pub const DEFAULT_PROBE_FAILURE_THRESHOLD: i32 = 3;

/// File extension that selects the JSON codec; anything else is read as YAML.
pub const JSON_EXTENSION: &str = "json";
