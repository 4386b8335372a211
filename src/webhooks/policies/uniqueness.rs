//! Uniqueness policy.
//!
//! Validates:
//! - No other entry of the same kind and name resolves to the same mesh
//!   namespace. With a fixed destination namespace every Kubernetes
//!   namespace maps to the same mesh namespace, so names must be unique
//!   across the whole cluster.
//! - On UPDATE the candidate's own persisted version is not a conflict.
//!
//! This is an admission-time check only. Two concurrent creates can both
//! pass before either is persisted.

use super::{ValidationContext, Verdict, reasons};

/// Validate that the candidate does not collide with an existing entry
pub fn validate(ctx: &ValidationContext<'_>) -> Verdict {
    let candidate = ctx.candidate;
    let kind = candidate.kind();

    let conflict = ctx.existing.iter().find(|entry| {
        entry.kind() == kind
            && entry.name == candidate.name
            && entry.resolved_namespace(ctx.policy) == ctx.namespace
            && !(ctx.is_update() && entry.is_prior_version_of(candidate))
    });

    match conflict {
        Some(entry) => Verdict::rejected(
            reasons::DUPLICATE_CONFIG_ENTRY,
            &format!(
                "{} resource with name {:?} is already defined in namespace {:?}: all {} resources resolving to namespace {:?} must have unique names",
                kind, candidate.name, entry.source_namespace, kind, ctx.namespace
            ),
        ),
        None => Verdict::allowed(),
    }
}
