//! Listing of already-persisted config entries.
//!
//! The validator never talks to the API server directly; it receives the
//! entries of the candidate's kind from a [`ConfigEntryLister`]. Listing is
//! read-only and is not retried here: a failure is returned to the handler,
//! which denies the request.

use std::fmt::Debug;

use async_trait::async_trait;
use kube::api::ListParams;
use kube::{Api, Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::entry::{ConfigEntry, ConfigEntryKind, ExistingEntry};
use super::error::ListError;
use crate::crd::{ProxyDefaults, ServiceDefaults, ServiceResolver};

/// Source of the config entries already accepted by the cluster.
#[async_trait]
pub trait ConfigEntryLister: Send + Sync {
    /// All persisted entries of `kind`, in any order.
    async fn list(&self, kind: ConfigEntryKind) -> Result<Vec<ExistingEntry>, ListError>;
}

/// Lists config entry custom resources across all namespaces.
#[derive(Clone)]
pub struct KubeLister {
    client: Client,
}

impl KubeLister {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn list_resources<K>(
        &self,
        kind: ConfigEntryKind,
        into_entry: fn(K) -> ConfigEntry,
    ) -> Result<Vec<ExistingEntry>, ListError>
    where
        K: Resource + Clone + DeserializeOwned + Debug,
        K::DynamicType: Default,
    {
        let api: Api<K> = Api::all(self.client.clone());
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|source| ListError::Kube { kind, source })?;

        debug!(kind = %kind, count = list.items.len(), "Listed existing config entries");

        Ok(list
            .items
            .into_iter()
            .map(|resource| {
                let name = resource.name_any();
                let source_namespace = resource.namespace().unwrap_or_default();
                let uid = resource.uid();
                ExistingEntry {
                    name,
                    source_namespace,
                    uid,
                    entry: into_entry(resource),
                }
            })
            .collect())
    }
}

#[async_trait]
impl ConfigEntryLister for KubeLister {
    async fn list(&self, kind: ConfigEntryKind) -> Result<Vec<ExistingEntry>, ListError> {
        match kind {
            ConfigEntryKind::ServiceDefaults => {
                self.list_resources(kind, |r: ServiceDefaults| {
                    ConfigEntry::ServiceDefaults(r.spec)
                })
                .await
            }
            ConfigEntryKind::ServiceResolver => {
                self.list_resources(kind, |r: ServiceResolver| {
                    ConfigEntry::ServiceResolver(r.spec)
                })
                .await
            }
            ConfigEntryKind::ProxyDefaults => {
                self.list_resources(kind, |r: ProxyDefaults| ConfigEntry::ProxyDefaults(r.spec))
                    .await
            }
        }
    }
}

/// In-memory lister over a fixed set of entries.
#[derive(Clone, Debug, Default)]
pub struct StaticLister {
    entries: Vec<ExistingEntry>,
}

impl StaticLister {
    pub fn new(entries: Vec<ExistingEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl ConfigEntryLister for StaticLister {
    async fn list(&self, kind: ConfigEntryKind) -> Result<Vec<ExistingEntry>, ListError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.kind() == kind)
            .cloned()
            .collect())
    }
}
