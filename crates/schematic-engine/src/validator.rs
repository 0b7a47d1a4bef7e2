//! Structural validation of a component spec.
//!
//! Every check runs independently and every violation is collected, so a
//! caller gets the complete list in one pass. Data problems are never
//! returned as `Err`.

use std::collections::HashSet;
use std::fmt;

use schematic_common::constants::{MAX_PORT, MEMORY_UNIT, MIN_PORT};
use schematic_model::{
    AccessMode, ComponentSpec, Container, HealthProbe, Resources, SharingPolicy,
};
use thiserror::Error;

/// The rule a [`ValidationError`] violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The spec has no containers.
    NoContainers,
    /// A container has an empty name.
    EmptyContainerName,
    /// Two containers share a name.
    DuplicateContainerName,
    /// A container has an empty image.
    EmptyImage,
    /// A probe does not populate exactly one handler.
    InvalidHealthProbe,
    /// A probe timing field is out of range.
    InvalidProbeTiming,
    /// The CPU requirement is negative or not finite.
    InvalidCpu,
    /// The GPU requirement is negative or not finite.
    InvalidGpu,
    /// The memory requirement is not a positive integer.
    InvalidMemory,
    /// A mount path is empty or relative.
    InvalidMountPath,
    /// Two volumes of a container share a mount path.
    DuplicateMountPath,
    /// Two volumes of a container share a non-empty name.
    DuplicateVolumeName,
    /// A volume has no access mode.
    InvalidAccessMode,
    /// A volume has no sharing policy.
    InvalidSharingPolicy,
    /// A port number is outside `1..=65535`.
    InvalidPort,
    /// Two ports of a container share a name.
    DuplicatePortName,
    /// Two declared parameters share a name.
    DuplicateParameterName,
    /// A workload setting has no name or a default that does not parse.
    InvalidWorkloadSetting,
    /// Two workload settings share a name.
    DuplicateWorkloadSetting,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single structural violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message} [{rule}]")]
pub struct ValidationError {
    /// Path of the offending field, e.g. `containers[0].ports[1].port`.
    pub path: String,
    /// The violated rule.
    pub rule: Rule,
    /// Human-readable description.
    pub message: String,
}

/// Collects violations in check order.
#[derive(Default)]
struct Report {
    errors: Vec<ValidationError>,
}

impl Report {
    fn push(&mut self, path: impl Into<String>, rule: Rule, message: impl Into<String>) {
        self.errors.push(ValidationError {
            path: path.into(),
            rule,
            message: message.into(),
        });
    }
}

/// Validates a spec and returns every violation found.
///
/// An empty vector means the spec is structurally valid.
pub fn validate(spec: &ComponentSpec) -> Vec<ValidationError> {
    tracing::info!(containers = spec.containers.len(), "validating component spec");
    let mut report = Report::default();

    check_parameters(&mut report, spec);
    check_workload_settings(&mut report, spec);
    check_container_names(&mut report, spec);
    for (c, container) in spec.containers.iter().enumerate() {
        let path = format!("containers[{c}]");
        check_resources(&mut report, &path, &container.resources);
        check_volumes(&mut report, &path, &container.resources);
        check_ports(&mut report, &path, container);
        check_probe(&mut report, &format!("{path}.livenessProbe"), &container.liveness_probe);
        check_probe(&mut report, &format!("{path}.readinessProbe"), &container.readiness_probe);
    }

    if !report.errors.is_empty() {
        tracing::warn!(violations = report.errors.len(), "component spec is invalid");
    }
    report.errors
}

fn check_parameters(report: &mut Report, spec: &ComponentSpec) {
    let mut seen = HashSet::new();
    for (i, param) in spec.parameters.iter().enumerate() {
        if !seen.insert(param.name.as_str()) {
            report.push(
                format!("parameters[{i}].name"),
                Rule::DuplicateParameterName,
                format!("duplicate parameter name: \"{}\"", param.name),
            );
        }
    }
}

fn check_workload_settings(report: &mut Report, spec: &ComponentSpec) {
    let mut seen = HashSet::new();
    for (i, setting) in spec.workload_settings.iter().enumerate() {
        let path = format!("workloadSettings[{i}]");
        if setting.name.is_empty() {
            report.push(
                format!("{path}.name"),
                Rule::InvalidWorkloadSetting,
                "workload setting has an empty name",
            );
        } else if !seen.insert(setting.name.as_str()) {
            report.push(
                format!("{path}.name"),
                Rule::DuplicateWorkloadSetting,
                format!("duplicate workload setting: \"{}\"", setting.name),
            );
        }
        if !setting.default.is_empty() && setting.parameter_type.parse(&setting.default).is_none()
        {
            report.push(
                format!("{path}.default"),
                Rule::InvalidWorkloadSetting,
                format!(
                    "value {:?} is not a valid {}",
                    setting.default, setting.parameter_type
                ),
            );
        }
    }
}

fn check_container_names(report: &mut Report, spec: &ComponentSpec) {
    if spec.containers.is_empty() {
        report.push("containers", Rule::NoContainers, "at least one container is required");
    }
    let mut seen = HashSet::new();
    for (c, container) in spec.containers.iter().enumerate() {
        if container.name.is_empty() {
            report.push(
                format!("containers[{c}].name"),
                Rule::EmptyContainerName,
                "container name must not be empty",
            );
        } else if !seen.insert(container.name.as_str()) {
            report.push(
                format!("containers[{c}].name"),
                Rule::DuplicateContainerName,
                format!("duplicate container name: \"{}\"", container.name),
            );
        }
        if container.image.is_empty() {
            report.push(
                format!("containers[{c}].image"),
                Rule::EmptyImage,
                "container image must not be empty",
            );
        }
    }
}

fn check_resources(report: &mut Report, path: &str, resources: &Resources) {
    let cpu = resources.cpu.required;
    if !cpu.is_finite() || cpu < 0.0 {
        report.push(
            format!("{path}.resources.cpu.required"),
            Rule::InvalidCpu,
            format!("cpu requirement {cpu} must be a non-negative number"),
        );
    }
    let gpu = resources.gpu.required;
    if !gpu.is_finite() || gpu < 0.0 {
        report.push(
            format!("{path}.resources.gpu.required"),
            Rule::InvalidGpu,
            format!("gpu requirement {gpu} must be a non-negative number"),
        );
    }
    let memory = &resources.memory;
    if !memory.required.is_empty() && memory.megabytes().is_none() {
        report.push(
            format!("{path}.resources.memory.required"),
            Rule::InvalidMemory,
            format!(
                "memory requirement {:?} must be a positive integer ({MEMORY_UNIT})",
                memory.required
            ),
        );
    }
}

fn check_volumes(report: &mut Report, path: &str, resources: &Resources) {
    let mut names = HashSet::new();
    let mut mounts = HashSet::new();
    for (v, volume) in resources.volumes.iter().enumerate() {
        let path = format!("{path}.resources.volumes[{v}]");
        if !volume.name.is_empty() && !names.insert(volume.name.as_str()) {
            report.push(
                format!("{path}.name"),
                Rule::DuplicateVolumeName,
                format!("duplicate volume name: \"{}\"", volume.name),
            );
        }
        if !volume.mount_path.starts_with('/') {
            report.push(
                format!("{path}.mountPath"),
                Rule::InvalidMountPath,
                format!("mount path {:?} must be absolute", volume.mount_path),
            );
        } else if !mounts.insert(volume.mount_path.as_str()) {
            report.push(
                format!("{path}.mountPath"),
                Rule::DuplicateMountPath,
                format!("duplicate mount path: \"{}\"", volume.mount_path),
            );
        }
        if volume.access_mode == AccessMode::Unspecified {
            report.push(
                format!("{path}.accessMode"),
                Rule::InvalidAccessMode,
                "access mode must be RW or RO",
            );
        }
        if volume.sharing_policy == SharingPolicy::Unspecified {
            report.push(
                format!("{path}.sharingPolicy"),
                Rule::InvalidSharingPolicy,
                "sharing policy must be Shared or Exclusive",
            );
        }
    }
}

fn check_ports(report: &mut Report, path: &str, container: &Container) {
    let mut names = HashSet::new();
    for (p, port) in container.ports.iter().enumerate() {
        check_port_number(report, &format!("{path}.ports[{p}].port"), port.container_port);
        if !port.name.is_empty() && !names.insert(port.name.as_str()) {
            report.push(
                format!("{path}.ports[{p}].name"),
                Rule::DuplicatePortName,
                format!("duplicate port name: \"{}\"", port.name),
            );
        }
    }
}

fn check_port_number(report: &mut Report, path: &str, port: i32) {
    if !(MIN_PORT..=MAX_PORT).contains(&port) {
        report.push(
            path,
            Rule::InvalidPort,
            format!("port {port} is outside {MIN_PORT}..={MAX_PORT}"),
        );
    }
}

fn check_probe(report: &mut Report, path: &str, probe: &HealthProbe) {
    if probe.is_unset() {
        return;
    }

    let handlers = probe.populated_handlers();
    match handlers.as_slice() {
        [] => report.push(
            path,
            Rule::InvalidHealthProbe,
            "probe sets none of exec, httpGet, tcpSocket",
        ),
        [_] => {}
        many => report.push(
            path,
            Rule::InvalidHealthProbe,
            format!(
                "probe sets {}; exactly one of exec, httpGet, tcpSocket is allowed",
                many.join(" and ")
            ),
        ),
    }

    if !probe.http_get.path.is_empty() {
        check_port_number(report, &format!("{path}.httpGet.port"), probe.http_get.port);
    }
    if probe.tcp_socket.port != 0 {
        check_port_number(report, &format!("{path}.tcpSocket.port"), probe.tcp_socket.port);
    }

    let timings = [
        ("initialDelaySeconds", probe.initial_delay_seconds, 0),
        ("timeoutSeconds", probe.timeout_seconds, 0),
        ("periodSeconds", probe.period_seconds, 1),
        ("successThreshold", probe.success_threshold, 1),
        ("failureThreshold", probe.failure_threshold, 1),
    ];
    for (field, value, min) in timings {
        if value < min {
            report.push(
                format!("{path}.{field}"),
                Rule::InvalidProbeTiming,
                format!("{field} is {value}, must be at least {min}"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use schematic_model::{
        Exec, HttpGet, Parameter, ParameterType, Port, ProbeAction, TcpSocket, Volume,
        WorkloadSetting,
    };

    use super::*;

    fn valid_container(name: &str) -> Container {
        let mut container = Container::new(name, format!("registry/{name}:1"));
        container.resources.cpu.required = 0.5;
        container.resources.memory.required = "128".into();
        container.ports = vec![Port::tcp("http", 8080)];
        container.liveness_probe = HealthProbe::from_action(ProbeAction::HttpGet(HttpGet {
            path: "/healthz".into(),
            port: 8080,
            http_headers: vec![],
        }));
        container.resources.volumes = vec![volume("data", "/data")];
        container
    }

    fn volume(name: &str, mount_path: &str) -> Volume {
        Volume {
            name: name.into(),
            mount_path: mount_path.into(),
            access_mode: AccessMode::ReadWrite,
            sharing_policy: SharingPolicy::Exclusive,
            ..Volume::default()
        }
    }

    fn spec(containers: Vec<Container>) -> ComponentSpec {
        ComponentSpec {
            containers,
            ..ComponentSpec::default()
        }
    }

    fn rules(errors: &[ValidationError]) -> Vec<Rule> {
        errors.iter().map(|e| e.rule).collect()
    }

    #[test]
    fn valid_spec_has_no_violations() {
        let errors = validate(&spec(vec![valid_container("api"), valid_container("db")]));
        assert!(errors.is_empty(), "got: {errors:?}");
    }

    #[test]
    fn empty_spec_needs_a_container() {
        assert_eq!(rules(&validate(&spec(vec![]))), vec![Rule::NoContainers]);
    }

    #[test]
    fn container_name_and_image_rules() {
        let mut unnamed = valid_container("x");
        unnamed.name.clear();
        let mut imageless = valid_container("api");
        imageless.image.clear();
        let errors = validate(&spec(vec![valid_container("api"), imageless, unnamed]));
        assert_eq!(
            rules(&errors),
            vec![
                Rule::DuplicateContainerName,
                Rule::EmptyImage,
                Rule::EmptyContainerName
            ]
        );
        assert_eq!(errors[0].path, "containers[1].name");
    }

    #[test]
    fn port_range() {
        let mut container = valid_container("api");
        container.ports = vec![Port::tcp("big", 70_000), Port::tcp("ok", 8080)];
        let errors = validate(&spec(vec![container]));
        assert_eq!(rules(&errors), vec![Rule::InvalidPort]);
        assert_eq!(errors[0].path, "containers[0].ports[0].port");

        let mut zero = valid_container("api");
        zero.ports = vec![Port::tcp("zero", 0)];
        assert_eq!(rules(&validate(&spec(vec![zero]))), vec![Rule::InvalidPort]);
    }

    #[test]
    fn duplicate_port_names_but_unnamed_ports_are_fine() {
        let mut container = valid_container("api");
        container.ports = vec![
            Port::tcp("http", 80),
            Port::tcp("http", 81),
            Port::tcp("", 82),
            Port::tcp("", 83),
        ];
        assert_eq!(
            rules(&validate(&spec(vec![container]))),
            vec![Rule::DuplicatePortName]
        );
    }

    #[test]
    fn probe_with_two_handlers_reports_once_and_continues() {
        let mut container = valid_container("api");
        container.readiness_probe = HealthProbe {
            http_get: HttpGet {
                path: "/ready".into(),
                port: 8080,
                ..HttpGet::default()
            },
            tcp_socket: TcpSocket { port: 8080 },
            period_seconds: 5,
            success_threshold: 1,
            failure_threshold: 3,
            ..HealthProbe::default()
        };
        container.image.clear();

        let errors = validate(&spec(vec![container]));
        let probe_errors: Vec<&ValidationError> = errors
            .iter()
            .filter(|e| e.rule == Rule::InvalidHealthProbe)
            .collect();
        assert_eq!(probe_errors.len(), 1);
        assert_eq!(probe_errors[0].path, "containers[0].readinessProbe");
        assert!(errors.iter().any(|e| e.rule == Rule::EmptyImage));
    }

    #[test]
    fn unset_probe_is_skipped() {
        let mut container = valid_container("api");
        container.liveness_probe = HealthProbe::default();
        assert!(validate(&spec(vec![container])).is_empty());
    }

    #[test]
    fn probe_without_handler_is_invalid() {
        let mut container = valid_container("api");
        container.liveness_probe = HealthProbe {
            period_seconds: 10,
            success_threshold: 1,
            failure_threshold: 3,
            ..HealthProbe::default()
        };
        assert_eq!(
            rules(&validate(&spec(vec![container]))),
            vec![Rule::InvalidHealthProbe]
        );
    }

    #[test]
    fn probe_timings() {
        let mut container = valid_container("api");
        container.liveness_probe = HealthProbe {
            exec: Exec {
                command: vec!["true".into()],
            },
            initial_delay_seconds: -1,
            ..HealthProbe::default()
        };
        let errors = validate(&spec(vec![container]));
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "containers[0].livenessProbe.initialDelaySeconds",
                "containers[0].livenessProbe.periodSeconds",
                "containers[0].livenessProbe.successThreshold",
                "containers[0].livenessProbe.failureThreshold",
            ]
        );
        assert!(errors.iter().all(|e| e.rule == Rule::InvalidProbeTiming));
    }

    #[test]
    fn probe_ports_are_range_checked() {
        let mut container = valid_container("api");
        container.liveness_probe =
            HealthProbe::from_action(ProbeAction::TcpSocket(TcpSocket { port: 99_999 }));
        let errors = validate(&spec(vec![container]));
        assert_eq!(rules(&errors), vec![Rule::InvalidPort]);
        assert_eq!(errors[0].path, "containers[0].livenessProbe.tcpSocket.port");
    }

    #[test]
    fn resource_rules() {
        let mut container = valid_container("api");
        container.resources.cpu.required = -1.0;
        container.resources.gpu.required = f64::NAN;
        container.resources.memory.required = "0".into();
        assert_eq!(
            rules(&validate(&spec(vec![container]))),
            vec![Rule::InvalidCpu, Rule::InvalidGpu, Rule::InvalidMemory]
        );
    }

    #[test]
    fn unspecified_memory_is_accepted() {
        let mut container = valid_container("api");
        container.resources.memory.required.clear();
        assert!(validate(&spec(vec![container])).is_empty());
    }

    #[test]
    fn volume_rules() {
        let mut container = valid_container("api");
        container.resources.volumes = vec![
            volume("data", "/data"),
            volume("data", "/data"),
            volume("logs", "var/log"),
            volume("cache", ""),
            Volume {
                name: "tmp".into(),
                mount_path: "/tmp".into(),
                ..Volume::default()
            },
        ];
        assert_eq!(
            rules(&validate(&spec(vec![container]))),
            vec![
                Rule::DuplicateVolumeName,
                Rule::DuplicateMountPath,
                Rule::InvalidMountPath,
                Rule::InvalidMountPath,
                Rule::InvalidAccessMode,
                Rule::InvalidSharingPolicy,
            ]
        );
    }

    #[test]
    fn unnamed_volumes_are_not_duplicates() {
        let mut container = valid_container("api");
        container.resources.volumes = vec![volume("", "/a"), volume("", "/b")];
        assert!(validate(&spec(vec![container])).is_empty());
    }

    #[test]
    fn parameter_and_setting_rules() {
        let mut component = spec(vec![valid_container("api")]);
        component.parameters = vec![
            Parameter::optional("p", ParameterType::String, ""),
            Parameter::optional("p", ParameterType::String, ""),
        ];
        component.workload_settings = vec![
            WorkloadSetting {
                name: "replicas".into(),
                parameter_type: ParameterType::Number,
                default: "three".into(),
                ..WorkloadSetting::default()
            },
            WorkloadSetting {
                name: "replicas".into(),
                ..WorkloadSetting::default()
            },
            WorkloadSetting::default(),
        ];
        assert_eq!(
            rules(&validate(&component)),
            vec![
                Rule::DuplicateParameterName,
                Rule::InvalidWorkloadSetting,
                Rule::DuplicateWorkloadSetting,
                Rule::InvalidWorkloadSetting,
            ]
        );
    }

    #[test]
    fn error_display_includes_path_and_rule() {
        let errors = validate(&spec(vec![]));
        assert_eq!(
            errors[0].to_string(),
            "containers: at least one container is required [NoContainers]"
        );
    }
}
