//! ProxyDefaults Custom Resource Definition.
//!
//! Global defaults for every sidecar proxy in the mesh. There is exactly one
//! ProxyDefaults entry and it must be named `global`.

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Expose, MeshGateway};

/// The only name a ProxyDefaults entry may have.
pub const PROXY_DEFAULTS_NAME: &str = "global";

/// ProxyDefaults is the Schema for the proxydefaults API.
///
/// Example:
/// ```yaml
/// apiVersion: consul.hashicorp.com/v1alpha1
/// kind: ProxyDefaults
/// metadata:
///   name: global
/// spec:
///   meshGateway:
///     mode: local
///   config:
///     protocol: http
///     local_connect_timeout_ms: 1000
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "consul.hashicorp.com",
    version = "v1alpha1",
    kind = "ProxyDefaults",
    plural = "proxydefaults",
    shortname = "proxy-defaults",
    namespaced,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ProxyDefaultsSpec {
    /// Arbitrary proxy configuration passed through to the proxy.
    /// Values are opaque JSON of any type.
    #[serde(default)]
    #[schemars(schema_with = "opaque_object")]
    pub config: BTreeMap<String, Value>,

    /// Controls the default mesh gateway configuration for all proxies.
    #[serde(default)]
    pub mesh_gateway: MeshGateway,

    /// Configuration for exposing paths through every proxy.
    #[serde(default)]
    pub expose: Expose,
}

/// Object schema whose contents the API server keeps as-is.
fn opaque_object(_: &mut SchemaGenerator) -> Schema {
    let mut schema = SchemaObject {
        instance_type: Some(InstanceType::Object.into()),
        ..Default::default()
    };
    schema
        .extensions
        .insert("x-kubernetes-preserve-unknown-fields".to_string(), Value::Bool(true));
    Schema::Object(schema)
}

impl ProxyDefaultsSpec {
    /// Returns a description of the first self-consistency problem, if any.
    pub fn validate(&self, name: &str) -> Option<String> {
        if name != PROXY_DEFAULTS_NAME {
            return Some(format!(
                "ProxyDefaults resource name must be {:?} (got {:?})",
                PROXY_DEFAULTS_NAME, name
            ));
        }
        if let Some(msg) = self.mesh_gateway.validate("spec.meshGateway") {
            return Some(msg);
        }
        self.expose.validate("spec.expose")
    }
}
