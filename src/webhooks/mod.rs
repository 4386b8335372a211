//! Webhook module for validating config entry admission requests.
//!
//! - `decode`: AdmissionReview body to a typed candidate
//! - `lister`: persisted config entries of the candidate's kind
//! - `policies`: ordered validation policies producing a verdict
//! - `respond`: verdict to AdmissionResponse
//! - `server`: axum handler tying the pipeline together

pub mod decode;
pub mod entry;
pub mod error;
pub mod lister;
pub mod policies;
pub mod respond;
mod server;

pub use entry::{ConfigEntry, ConfigEntryCandidate, ConfigEntryKind, ExistingEntry};
pub use error::{DecodeError, ListError, WebhookError};
pub use lister::{ConfigEntryLister, KubeLister, StaticLister};
pub use policies::{ValidationContext, Verdict};
pub use server::{WEBHOOK_PATHS, WebhookState, create_webhook_router, run_webhook_server};

// Re-export kube-rs admission types for contract testing
pub use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
