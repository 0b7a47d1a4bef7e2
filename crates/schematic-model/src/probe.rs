//! Health probes.
//!
//! On the wire a probe carries its three handlers side by side and at most
//! one of them may be populated. [`ProbeAction`] is the Rust view of that
//! rule: [`HealthProbe::from_action`] builds a probe that is valid by
//! construction, and [`HealthProbe::action`] recovers the handler from a
//! deserialized probe when exactly one is populated.

use schematic_common::constants::{
    DEFAULT_PROBE_FAILURE_THRESHOLD, DEFAULT_PROBE_PERIOD_SECONDS,
    DEFAULT_PROBE_SUCCESS_THRESHOLD, DEFAULT_PROBE_TIMEOUT_SECONDS,
};
use serde::{Deserialize, Serialize};

use crate::wire::nullable;

/// Runs a command inside the container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exec {
    /// Command line. Populated when non-empty.
    #[serde(deserialize_with = "nullable")]
    pub command: Vec<String>,
}

/// A header sent with an HTTP probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpHeader {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

/// Issues an HTTP GET against the container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpGet {
    /// Request path. Populated when non-empty.
    pub path: String,
    /// Target port.
    pub port: i32,
    /// Extra request headers.
    #[serde(deserialize_with = "nullable")]
    pub http_headers: Vec<HttpHeader>,
}

/// Opens a TCP connection to the container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TcpSocket {
    /// Target port. Populated when non-zero.
    pub port: i32,
}

/// The handler of a probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeAction {
    /// Run a command.
    Exec(Exec),
    /// Issue an HTTP GET.
    HttpGet(HttpGet),
    /// Open a TCP connection.
    TcpSocket(TcpSocket),
}

/// A container health probe in its wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthProbe {
    /// Command handler.
    pub exec: Exec,
    /// HTTP handler.
    pub http_get: HttpGet,
    /// TCP handler.
    pub tcp_socket: TcpSocket,
    /// Seconds before the first probe.
    pub initial_delay_seconds: i32,
    /// Seconds between probes.
    pub period_seconds: i32,
    /// Seconds before a probe times out.
    pub timeout_seconds: i32,
    /// Consecutive successes needed to pass.
    pub success_threshold: i32,
    /// Consecutive failures needed to fail.
    pub failure_threshold: i32,
}

impl HealthProbe {
    /// Builds a probe from a single handler with default timings.
    #[must_use]
    pub fn from_action(action: ProbeAction) -> Self {
        let mut probe = Self {
            period_seconds: DEFAULT_PROBE_PERIOD_SECONDS,
            timeout_seconds: DEFAULT_PROBE_TIMEOUT_SECONDS,
            success_threshold: DEFAULT_PROBE_SUCCESS_THRESHOLD,
            failure_threshold: DEFAULT_PROBE_FAILURE_THRESHOLD,
            ..Self::default()
        };
        match action {
            ProbeAction::Exec(exec) => probe.exec = exec,
            ProbeAction::HttpGet(http_get) => probe.http_get = http_get,
            ProbeAction::TcpSocket(tcp_socket) => probe.tcp_socket = tcp_socket,
        }
        probe
    }

    /// Returns whether the probe is the zero value, i.e. not configured.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Wire names of the populated handlers, in declaration order.
    #[must_use]
    pub fn populated_handlers(&self) -> Vec<&'static str> {
        let mut handlers = Vec::new();
        if !self.exec.command.is_empty() {
            handlers.push("exec");
        }
        if !self.http_get.path.is_empty() {
            handlers.push("httpGet");
        }
        if self.tcp_socket.port != 0 {
            handlers.push("tcpSocket");
        }
        handlers
    }

    /// Returns the handler when exactly one is populated.
    #[must_use]
    pub fn action(&self) -> Option<ProbeAction> {
        match self.populated_handlers().as_slice() {
            ["exec"] => Some(ProbeAction::Exec(self.exec.clone())),
            ["httpGet"] => Some(ProbeAction::HttpGet(self.http_get.clone())),
            ["tcpSocket"] => Some(ProbeAction::TcpSocket(self.tcp_socket.clone())),
            _ => None,
        }
    }
}
