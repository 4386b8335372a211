//! Error types for the admission webhook.
//!
//! Every request-path error ends in a deny response; none of these are
//! retried inside the webhook.

use thiserror::Error;

use super::entry::ConfigEntryKind;

/// The admission payload could not be turned into a config entry candidate.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Body is not a well-formed AdmissionReview
    #[error("invalid AdmissionReview: {0}")]
    MalformedReview(#[source] serde_json::Error),

    /// AdmissionReview without a request
    #[error("invalid AdmissionReview: {0}")]
    MissingRequest(String),

    /// Declared kind is not a config entry kind
    #[error("unsupported resource kind {0:?}")]
    UnsupportedKind(String),

    /// CREATE/UPDATE request without an object
    #[error("admission request has no object")]
    MissingObject,

    /// Object kind disagrees with the declared kind
    #[error("object kind {found:?} does not match requested kind {expected}")]
    KindMismatch {
        expected: ConfigEntryKind,
        found: String,
    },

    /// Object does not match the kind's schema
    #[error("failed to decode {kind}: {source}")]
    InvalidObject {
        kind: ConfigEntryKind,
        #[source]
        source: serde_json::Error,
    },

    /// Object has no metadata.name
    #[error("{0} resource has no name")]
    MissingName(ConfigEntryKind),

    /// Neither the object nor the request carries a namespace
    #[error("{0} resource has no namespace")]
    MissingNamespace(ConfigEntryKind),
}

impl DecodeError {
    /// Stable reason code reported in the admission response.
    pub fn reason(&self) -> &'static str {
        match self {
            DecodeError::UnsupportedKind(_) => "UnsupportedKind",
            _ => "DecodeFailed",
        }
    }
}

/// Existing config entries could not be listed.
#[derive(Error, Debug)]
pub enum ListError {
    /// Kubernetes API error while listing
    #[error("failed to list {kind} resources: {source}")]
    Kube {
        kind: ConfigEntryKind,
        #[source]
        source: kube::Error,
    },

    /// Lister backend unavailable
    #[error("{kind} lister unavailable: {message}")]
    Unavailable {
        kind: ConfigEntryKind,
        message: String,
    },
}

impl ListError {
    /// Kind whose listing failed.
    pub fn kind(&self) -> ConfigEntryKind {
        match self {
            ListError::Kube { kind, .. } | ListError::Unavailable { kind, .. } => *kind,
        }
    }
}

/// Errors that can occur when running the webhook server
#[derive(Error, Debug)]
pub enum WebhookError {
    /// TLS configuration error
    #[error("TLS configuration error: {0}")]
    TlsConfig(#[source] std::io::Error),

    /// Server error
    #[error("Webhook server error: {0}")]
    Server(#[source] std::io::Error),
}
