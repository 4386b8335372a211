//! Namespace resolution for config entries.
//!
//! Maps the Kubernetes namespace a config entry was created in to the mesh
//! namespace it lands in. With enterprise namespaces disabled the Kubernetes
//! namespace is used as-is. With mirroring enabled each Kubernetes namespace
//! maps to `prefix + namespace`, e.g. prefix `k8s-` maps `staging` to
//! `k8s-staging`. Otherwise every entry lands in a single fixed destination
//! namespace.

/// Namespace mirroring policy, fixed at process start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespacePolicy {
    /// Whether the mesh control plane supports namespaces (enterprise).
    pub enable_namespaces: bool,
    /// Mirror each Kubernetes namespace into a mesh namespace of the same name.
    pub enable_mirroring: bool,
    /// Prefix prepended to mirrored namespace names.
    pub mirroring_prefix: String,
    /// Mesh namespace every entry maps to when mirroring is disabled.
    pub destination_namespace: String,
}

impl NamespacePolicy {
    /// Policy with enterprise namespaces disabled.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Policy mirroring Kubernetes namespaces under `prefix`.
    pub fn mirroring(prefix: impl Into<String>) -> Self {
        Self {
            enable_namespaces: true,
            enable_mirroring: true,
            mirroring_prefix: prefix.into(),
            destination_namespace: String::new(),
        }
    }

    /// Policy mapping every Kubernetes namespace to `destination`.
    pub fn fixed(destination: impl Into<String>) -> Self {
        Self {
            enable_namespaces: true,
            enable_mirroring: false,
            mirroring_prefix: String::new(),
            destination_namespace: destination.into(),
        }
    }

    /// Resolve the mesh namespace for a Kubernetes namespace.
    pub fn resolve(&self, source_namespace: &str) -> String {
        resolve(source_namespace, self)
    }
}

/// Resolve the mesh namespace a config entry from `source_namespace` lands in.
pub fn resolve(source_namespace: &str, policy: &NamespacePolicy) -> String {
    if !policy.enable_namespaces {
        return source_namespace.to_string();
    }
    if policy.enable_mirroring {
        return format!("{}{}", policy.mirroring_prefix, source_namespace);
    }
    policy.destination_namespace.clone()
}
