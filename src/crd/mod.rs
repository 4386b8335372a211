//! Custom Resource Definitions (CRDs) for config entries.
//!
//! - `ServiceDefaults`: Default configuration for a single service
//! - `ServiceResolver`: Subsets, failover and redirects for a service
//! - `ProxyDefaults`: Mesh-wide proxy defaults (singleton named `global`)

mod proxy_defaults;
mod service_defaults;
mod service_resolver;
mod shared;

pub use proxy_defaults::*;
pub use service_defaults::*;
pub use service_resolver::*;
pub use shared::*;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::CustomResourceExt;

/// API group shared by every config entry CRD.
pub const GROUP: &str = "consul.hashicorp.com";

/// Definitions of every config entry CRD, for `--crd` output.
pub fn all_crds() -> Vec<CustomResourceDefinition> {
    vec![
        ServiceDefaults::crd(),
        ServiceResolver::crd(),
        ProxyDefaults::crd(),
    ]
}
