//! ServiceResolver Custom Resource Definition.
//!
//! Controls which instances of a service satisfy discovery requests:
//! named subsets, a default subset, failover targets, or a redirect to a
//! different service entirely.

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Failover key matching every subset.
pub const FAILOVER_WILDCARD: &str = "*";

/// ServiceResolver is the Schema for the serviceresolvers API.
///
/// Example:
/// ```yaml
/// apiVersion: consul.hashicorp.com/v1alpha1
/// kind: ServiceResolver
/// metadata:
///   name: web
/// spec:
///   defaultSubset: v1
///   subsets:
///     v1:
///       filter: "Service.Meta.version == v1"
///     v2:
///       filter: "Service.Meta.version == v2"
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "consul.hashicorp.com",
    version = "v1alpha1",
    kind = "ServiceResolver",
    plural = "serviceresolvers",
    shortname = "service-resolver",
    namespaced,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResolverSpec {
    /// Subset to use when no explicit subset is requested. If empty the
    /// unnamed subset is used.
    #[serde(default)]
    pub default_subset: String,

    /// Named subsets of this service, keyed by subset name.
    #[serde(default)]
    pub subsets: BTreeMap<String, ServiceResolverSubset>,

    /// When configured, all attempts to resolve this service are redirected
    /// to the given target. A redirecting resolver may not also define
    /// subsets or failover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<ServiceResolverRedirect>,

    /// Failover policies keyed by subset name, or `*` for all subsets.
    #[serde(default)]
    pub failover: BTreeMap<String, ServiceResolverFailover>,

    /// Timeout for establishing new network connections to this service.
    #[serde(default)]
    pub connect_timeout: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResolverSubset {
    /// Filter expression selecting the instances in this subset.
    #[serde(default)]
    pub filter: String,

    /// Only include instances with all health checks passing.
    #[serde(default)]
    pub only_passing: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResolverRedirect {
    /// Service to resolve instead of the current service.
    #[serde(default)]
    pub service: String,

    /// Named subset of the redirect service.
    #[serde(default)]
    pub service_subset: String,

    /// Mesh namespace of the redirect service. Requires enterprise namespaces.
    #[serde(default)]
    pub namespace: String,

    /// Datacenter to resolve the service from.
    #[serde(default)]
    pub datacenter: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResolverFailover {
    /// Service to resolve instead of the default as the failover group.
    #[serde(default)]
    pub service: String,

    /// Named subset of the failover service.
    #[serde(default)]
    pub service_subset: String,

    /// Mesh namespace of the failover service. Requires enterprise namespaces.
    #[serde(default)]
    pub namespace: String,

    /// Ordered list of datacenters to try during failover.
    #[serde(default)]
    pub datacenters: Vec<String>,
}

impl ServiceResolverRedirect {
    fn is_empty(&self) -> bool {
        self.service.is_empty()
            && self.service_subset.is_empty()
            && self.namespace.is_empty()
            && self.datacenter.is_empty()
    }
}

impl ServiceResolverSpec {
    /// Returns a description of the first self-consistency problem, if any.
    pub fn validate(&self) -> Option<String> {
        if let Some(redirect) = &self.redirect {
            if redirect.is_empty() {
                return Some(
                    "spec.redirect must set at least one of service, serviceSubset, namespace or datacenter"
                        .to_string(),
                );
            }
            if !self.subsets.is_empty() || !self.default_subset.is_empty() {
                return Some(
                    "spec.redirect cannot be combined with spec.subsets or spec.defaultSubset"
                        .to_string(),
                );
            }
            if !self.failover.is_empty() {
                return Some("spec.redirect cannot be combined with spec.failover".to_string());
            }
        }

        if !self.default_subset.is_empty() && !self.subsets.contains_key(&self.default_subset) {
            return Some(format!(
                "spec.defaultSubset {:?} is not a defined subset",
                self.default_subset
            ));
        }

        for subset in self.failover.keys() {
            if subset != FAILOVER_WILDCARD && !self.subsets.contains_key(subset) {
                return Some(format!(
                    "spec.failover[{:?}] does not name a defined subset or \"*\"",
                    subset
                ));
            }
        }

        None
    }

    /// Paths of fields that require enterprise namespaces.
    pub fn namespace_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if self
            .redirect
            .as_ref()
            .is_some_and(|r| !r.namespace.is_empty())
        {
            fields.push("spec.redirect.namespace".to_string());
        }
        for (subset, failover) in &self.failover {
            if !failover.namespace.is_empty() {
                fields.push(format!("spec.failover[{:?}].namespace", subset));
            }
        }
        fields
    }
}
