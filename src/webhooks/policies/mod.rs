//! Validation policies for config entry admission.
//!
//! Policies run in a fixed order and stop at the first denial:
//! 1. Schema: the candidate is internally consistent (400)
//! 2. Namespaces: enterprise-only fields need namespaces enabled (422)
//! 3. Uniqueness: one entry per kind, name and mesh namespace (422)
//! 4. References: cross-entry invariants such as redirect loops (422)

pub mod namespaces;
pub mod references;
pub mod schema;
pub mod uniqueness;

use kube::core::admission::Operation;

use super::entry::{ConfigEntryCandidate, ExistingEntry};
use crate::namespace::NamespacePolicy;

/// Reason codes reported in `status.reason` of denied responses.
pub mod reasons {
    pub const DECODE_FAILED: &str = "DecodeFailed";
    pub const UNSUPPORTED_KIND: &str = "UnsupportedKind";
    pub const LIST_FAILED: &str = "ListFailed";
    pub const INVALID_CONFIG_ENTRY: &str = "InvalidConfigEntry";
    pub const NAMESPACES_NOT_ENABLED: &str = "NamespacesNotEnabled";
    pub const DUPLICATE_CONFIG_ENTRY: &str = "DuplicateConfigEntry";
    pub const REDIRECT_LOOP: &str = "RedirectLoop";
}

/// Outcome of validating one admission request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the request is admitted
    pub allowed: bool,
    /// Reason code for denial (if not allowed)
    pub reason: Option<String>,
    /// Detailed message (if not allowed)
    pub message: Option<String>,
    /// HTTP status reported in the admission response
    pub status: u16,
}

impl Verdict {
    /// Create an allowed verdict
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
            message: None,
            status: 200,
        }
    }

    /// Create a denied verdict
    pub fn denied(status: u16, reason: &str, message: &str) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.to_string()),
            message: Some(message.to_string()),
            status,
        }
    }

    /// Malformed or self-inconsistent input.
    pub fn invalid(reason: &str, message: &str) -> Self {
        Self::denied(400, reason, message)
    }

    /// Well-formed input rejected by a business rule.
    pub fn rejected(reason: &str, message: &str) -> Self {
        Self::denied(422, reason, message)
    }

    /// Existing state could not be read.
    pub fn unavailable(reason: &str, message: &str) -> Self {
        Self::denied(503, reason, message)
    }
}

/// Context for validation
pub struct ValidationContext<'a> {
    /// The decoded resource being validated
    pub candidate: &'a ConfigEntryCandidate,
    /// Persisted entries of the candidate's kind
    pub existing: &'a [ExistingEntry],
    /// Mesh namespace the candidate resolves to
    pub namespace: &'a str,
    /// Namespace mirroring policy
    pub policy: &'a NamespacePolicy,
    /// Admission operation
    pub operation: &'a Operation,
}

impl ValidationContext<'_> {
    /// Check if this is an UPDATE operation
    pub fn is_update(&self) -> bool {
        *self.operation == Operation::Update
    }
}

/// Run all validation policies
pub fn validate_all(ctx: &ValidationContext<'_>) -> Verdict {
    let policies: [fn(&ValidationContext<'_>) -> Verdict; 4] = [
        schema::validate,
        namespaces::validate,
        uniqueness::validate,
        references::validate,
    ];

    for policy in policies {
        let verdict = policy(ctx);
        if !verdict.allowed {
            return verdict;
        }
    }

    Verdict::allowed()
}
