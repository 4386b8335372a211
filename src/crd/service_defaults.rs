//! ServiceDefaults Custom Resource Definition.
//!
//! Sets the default configuration of a single service: protocol, mesh
//! gateway mode, exposed paths and upstream connection settings.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Expose, MeshGateway};

/// Protocols a service may declare. Empty means the proxy default (tcp).
pub const SERVICE_PROTOCOLS: &[&str] = &["", "tcp", "http", "http2", "grpc"];

/// ServiceDefaults is the Schema for the servicedefaults API.
///
/// Example:
/// ```yaml
/// apiVersion: consul.hashicorp.com/v1alpha1
/// kind: ServiceDefaults
/// metadata:
///   name: web
/// spec:
///   protocol: http
///   meshGateway:
///     mode: local
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "consul.hashicorp.com",
    version = "v1alpha1",
    kind = "ServiceDefaults",
    plural = "servicedefaults",
    shortname = "service-defaults",
    namespaced,
    printcolumn = r#"{"name":"Protocol", "type":"string", "jsonPath":".spec.protocol"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefaultsSpec {
    /// Protocol sets the protocol of the service. This is used by Connect
    /// proxies for things like observability features and to unlock usage
    /// of the service-splitter and service-router config entries.
    #[serde(default)]
    pub protocol: String,

    /// Controls the default mesh gateway configuration for this service.
    #[serde(default)]
    pub mesh_gateway: MeshGateway,

    /// Configuration for exposing paths through the proxy.
    #[serde(default)]
    pub expose: Expose,

    /// Overrides the SNI used by proxies dialing this service.
    #[serde(default, rename = "externalSNI")]
    pub external_sni: String,

    /// Default and per-upstream connection settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_config: Option<Upstreams>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Upstreams {
    /// Settings applied to every upstream unless overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Upstream>,

    /// Per-upstream settings, matched by upstream name and namespace.
    #[serde(default)]
    pub overrides: Vec<Upstream>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Upstream {
    /// Name of the upstream service. Required for overrides.
    #[serde(default)]
    pub name: String,

    /// Mesh namespace of the upstream. Requires enterprise namespaces.
    #[serde(default)]
    pub namespace: String,

    /// Protocol used to talk to the upstream.
    #[serde(default)]
    pub protocol: String,

    /// Connect timeout in milliseconds.
    #[serde(default)]
    pub connect_timeout_ms: i32,
}

impl ServiceDefaultsSpec {
    /// Returns a description of the first self-consistency problem, if any.
    pub fn validate(&self) -> Option<String> {
        if !SERVICE_PROTOCOLS.contains(&self.protocol.as_str()) {
            return Some(format!(
                "spec.protocol must be one of \"tcp\", \"http\", \"http2\" or \"grpc\" (got {:?})",
                self.protocol
            ));
        }
        if let Some(msg) = self.mesh_gateway.validate("spec.meshGateway") {
            return Some(msg);
        }
        if let Some(msg) = self.expose.validate("spec.expose") {
            return Some(msg);
        }
        if let Some(upstreams) = &self.upstream_config {
            for (i, upstream) in upstreams.overrides.iter().enumerate() {
                if upstream.name.is_empty() {
                    return Some(format!(
                        "spec.upstreamConfig.overrides[{}].name is required",
                        i
                    ));
                }
            }
        }
        None
    }

    /// Paths of fields that require enterprise namespaces.
    pub fn namespace_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if let Some(upstreams) = &self.upstream_config {
            if upstreams
                .defaults
                .as_ref()
                .is_some_and(|d| !d.namespace.is_empty())
            {
                fields.push("spec.upstreamConfig.defaults.namespace".to_string());
            }
            for (i, upstream) in upstreams.overrides.iter().enumerate() {
                if !upstream.namespace.is_empty() {
                    fields.push(format!("spec.upstreamConfig.overrides[{}].namespace", i));
                }
            }
        }
        fields
    }
}
