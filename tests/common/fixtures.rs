//! Test fixtures and builder patterns for admission reviews.

#![allow(dead_code)]

use config_entry_webhook::crd::{ProxyDefaultsSpec, ServiceDefaultsSpec, ServiceResolverSpec};
use config_entry_webhook::webhooks::{ConfigEntry, ExistingEntry};
use serde_json::{Value, json};

/// Builder for creating AdmissionReview request bodies.
///
/// # Example
/// ```
/// let body = ReviewBuilder::service_defaults("web")
///     .namespace("staging")
///     .spec(json!({"protocol": "http"}))
///     .to_bytes();
/// ```
#[derive(Clone, Debug)]
pub struct ReviewBuilder {
    kind: String,
    object_kind: Option<String>,
    name: String,
    namespace: String,
    operation: String,
    uid: Option<String>,
    spec: Value,
}

impl ReviewBuilder {
    /// Create a new builder for a resource of `kind` named `name`.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            object_kind: None,
            name: name.into(),
            namespace: "default".to_string(),
            operation: "CREATE".to_string(),
            uid: None,
            spec: json!({}),
        }
    }

    pub fn service_defaults(name: impl Into<String>) -> Self {
        Self::new("ServiceDefaults", name)
    }

    pub fn service_resolver(name: impl Into<String>) -> Self {
        Self::new("ServiceResolver", name)
    }

    pub fn proxy_defaults(name: impl Into<String>) -> Self {
        Self::new("ProxyDefaults", name)
    }

    /// Set the Kubernetes namespace of the request and object.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the admission operation (CREATE, UPDATE, DELETE, CONNECT).
    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = operation.into();
        self
    }

    /// Mark the request as an UPDATE of the object with `uid`.
    pub fn update(mut self, uid: impl Into<String>) -> Self {
        self.operation = "UPDATE".to_string();
        self.uid = Some(uid.into());
        self
    }

    /// Set the object's `kind` independently of the declared request kind.
    pub fn object_kind(mut self, kind: impl Into<String>) -> Self {
        self.object_kind = Some(kind.into());
        self
    }

    /// Set the object's spec.
    pub fn spec(mut self, spec: Value) -> Self {
        self.spec = spec;
        self
    }

    /// Build the AdmissionReview as JSON.
    pub fn build(self) -> Value {
        let mut metadata = json!({"name": self.name, "namespace": self.namespace});
        if let Some(uid) = &self.uid {
            metadata["uid"] = json!(uid);
        }
        let resource = format!("{}s", self.kind.to_lowercase());
        json!({
            "apiVersion": "admission.k8s.io/v1",
            "kind": "AdmissionReview",
            "request": {
                "uid": format!("req-{}-{}", self.namespace, self.name),
                "kind": {"group": "consul.hashicorp.com", "version": "v1alpha1", "kind": self.kind},
                "resource": {"group": "consul.hashicorp.com", "version": "v1alpha1", "resource": resource},
                "name": self.name,
                "namespace": self.namespace,
                "operation": self.operation,
                "userInfo": {"username": "kubernetes-admin"},
                "object": {
                    "apiVersion": "consul.hashicorp.com/v1alpha1",
                    "kind": self.object_kind.unwrap_or(self.kind),
                    "metadata": metadata,
                    "spec": self.spec
                },
                "dryRun": false
            }
        })
    }

    /// Build the AdmissionReview as a request body.
    #[allow(clippy::unwrap_used)]
    pub fn to_bytes(self) -> Vec<u8> {
        serde_json::to_vec(&self.build()).unwrap()
    }
}

/// Persisted entry of any kind.
pub fn existing(name: &str, namespace: &str, entry: ConfigEntry) -> ExistingEntry {
    ExistingEntry {
        name: name.to_string(),
        source_namespace: namespace.to_string(),
        uid: Some(format!("uid-{}-{}", namespace, name)),
        entry,
    }
}

/// Persisted ServiceDefaults with an empty spec.
pub fn existing_service_defaults(name: &str, namespace: &str) -> ExistingEntry {
    existing(
        name,
        namespace,
        ConfigEntry::ServiceDefaults(ServiceDefaultsSpec::default()),
    )
}

/// Persisted ServiceResolver with the given spec.
pub fn existing_service_resolver(
    name: &str,
    namespace: &str,
    spec: ServiceResolverSpec,
) -> ExistingEntry {
    existing(name, namespace, ConfigEntry::ServiceResolver(spec))
}

/// Persisted ProxyDefaults.
pub fn existing_proxy_defaults(namespace: &str) -> ExistingEntry {
    existing(
        "global",
        namespace,
        ConfigEntry::ProxyDefaults(ProxyDefaultsSpec::default()),
    )
}
