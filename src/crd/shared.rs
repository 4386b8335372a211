//! Types shared by more than one config entry kind.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Mesh gateway modes accepted by the control plane. Empty means "inherit".
pub const MESH_GATEWAY_MODES: &[&str] = &["", "local", "remote", "none"];

/// Protocols an exposed path may use.
pub const EXPOSE_PATH_PROTOCOLS: &[&str] = &["", "http", "http2"];

/// Controls the default mesh gateway configuration for a service.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeshGateway {
    /// Mode is the mode that should be used for the upstream connection.
    /// One of `local`, `remote` or `none`.
    #[serde(default)]
    pub mode: String,
}

/// Paths to expose through the Envoy proxy without requiring mTLS.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Expose {
    /// Expose all HTTP and gRPC checks registered with the agent.
    #[serde(default)]
    pub checks: bool,

    /// Individual paths to expose.
    #[serde(default)]
    pub paths: Vec<ExposePath>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExposePath {
    /// Port for the listener where the path will be exposed.
    #[serde(default)]
    pub listener_port: i32,

    /// HTTP path to expose. Must start with `/`.
    #[serde(default)]
    pub path: String,

    /// Port where the local service is listening for the path.
    #[serde(default)]
    pub local_path_port: i32,

    /// Protocol of the listener, `http` or `http2`.
    #[serde(default)]
    pub protocol: String,
}

impl MeshGateway {
    /// Returns a description of the problem if the mode is not recognized.
    pub fn validate(&self, field: &str) -> Option<String> {
        if MESH_GATEWAY_MODES.contains(&self.mode.as_str()) {
            return None;
        }
        Some(format!(
            "{}.mode must be one of \"local\", \"remote\" or \"none\" (got {:?})",
            field, self.mode
        ))
    }
}

impl Expose {
    /// Returns a description of the first invalid exposed path, if any.
    pub fn validate(&self, field: &str) -> Option<String> {
        for (i, path) in self.paths.iter().enumerate() {
            if !path.path.starts_with('/') {
                return Some(format!(
                    "{}.paths[{}].path must begin with \"/\" (got {:?})",
                    field, i, path.path
                ));
            }
            if !EXPOSE_PATH_PROTOCOLS.contains(&path.protocol.as_str()) {
                return Some(format!(
                    "{}.paths[{}].protocol must be \"http\" or \"http2\" (got {:?})",
                    field, i, path.protocol
                ));
            }
        }
        None
    }
}
