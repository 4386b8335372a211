//! Config entry kinds and the uniform views the validator works on.
//!
//! Each supported kind is a variant of [`ConfigEntry`] carrying its typed
//! spec. The candidate under review and the already-persisted entries share
//! that representation so policies can compare them directly.

use std::fmt;
use std::str::FromStr;

use crate::crd::{ProxyDefaultsSpec, ServiceDefaultsSpec, ServiceResolverRedirect, ServiceResolverSpec};
use crate::namespace::NamespacePolicy;

/// Config entry kinds handled by the webhook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigEntryKind {
    ServiceDefaults,
    ServiceResolver,
    ProxyDefaults,
}

impl ConfigEntryKind {
    /// Every supported kind.
    pub const ALL: [ConfigEntryKind; 3] = [
        ConfigEntryKind::ServiceDefaults,
        ConfigEntryKind::ServiceResolver,
        ConfigEntryKind::ProxyDefaults,
    ];

    /// Kubernetes kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigEntryKind::ServiceDefaults => "ServiceDefaults",
            ConfigEntryKind::ServiceResolver => "ServiceResolver",
            ConfigEntryKind::ProxyDefaults => "ProxyDefaults",
        }
    }
}

impl fmt::Display for ConfigEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigEntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigEntryKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A config entry's typed payload, tagged by kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigEntry {
    ServiceDefaults(ServiceDefaultsSpec),
    ServiceResolver(ServiceResolverSpec),
    ProxyDefaults(ProxyDefaultsSpec),
}

impl ConfigEntry {
    pub fn kind(&self) -> ConfigEntryKind {
        match self {
            ConfigEntry::ServiceDefaults(_) => ConfigEntryKind::ServiceDefaults,
            ConfigEntry::ServiceResolver(_) => ConfigEntryKind::ServiceResolver,
            ConfigEntry::ProxyDefaults(_) => ConfigEntryKind::ProxyDefaults,
        }
    }

    /// Kind-specific self-consistency check.
    pub fn validate(&self, name: &str) -> Option<String> {
        match self {
            ConfigEntry::ServiceDefaults(spec) => spec.validate(),
            ConfigEntry::ServiceResolver(spec) => spec.validate(),
            ConfigEntry::ProxyDefaults(spec) => spec.validate(name),
        }
    }

    /// Fields set on this entry that only make sense with enterprise namespaces.
    pub fn namespace_fields(&self) -> Vec<String> {
        match self {
            ConfigEntry::ServiceDefaults(spec) => spec.namespace_fields(),
            ConfigEntry::ServiceResolver(spec) => spec.namespace_fields(),
            ConfigEntry::ProxyDefaults(_) => Vec::new(),
        }
    }

    /// Redirect configured on a ServiceResolver.
    pub fn redirect(&self) -> Option<&ServiceResolverRedirect> {
        match self {
            ConfigEntry::ServiceResolver(spec) => spec.redirect.as_ref(),
            _ => None,
        }
    }
}

/// The decoded resource under review.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigEntryCandidate {
    /// metadata.name
    pub name: String,
    /// Kubernetes namespace the request originated from
    pub source_namespace: String,
    /// metadata.uid, present on updates
    pub uid: Option<String>,
    pub entry: ConfigEntry,
}

impl ConfigEntryCandidate {
    pub fn kind(&self) -> ConfigEntryKind {
        self.entry.kind()
    }
}

/// Read-only projection of a persisted config entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ExistingEntry {
    pub name: String,
    /// Kubernetes namespace the resource lives in
    pub source_namespace: String,
    pub uid: Option<String>,
    pub entry: ConfigEntry,
}

impl ExistingEntry {
    pub fn kind(&self) -> ConfigEntryKind {
        self.entry.kind()
    }

    /// Mesh namespace this entry lands in under `policy`.
    pub fn resolved_namespace(&self, policy: &NamespacePolicy) -> String {
        policy.resolve(&self.source_namespace)
    }

    /// Whether this entry is the persisted version of `candidate`.
    pub fn is_prior_version_of(&self, candidate: &ConfigEntryCandidate) -> bool {
        if self.kind() != candidate.kind()
            || self.name != candidate.name
            || self.source_namespace != candidate.source_namespace
        {
            return false;
        }
        match (&self.uid, &candidate.uid) {
            (Some(existing), Some(incoming)) => existing == incoming,
            _ => true,
        }
    }
}
