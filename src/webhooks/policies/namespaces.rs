//! Enterprise namespace feature gate.
//!
//! Fields that point at another mesh namespace (upstream overrides,
//! resolver redirects and failover) are only meaningful when the mesh
//! control plane supports namespaces.

use super::{ValidationContext, Verdict, reasons};

/// Deny namespace-scoped fields when namespaces are not enabled
pub fn validate(ctx: &ValidationContext<'_>) -> Verdict {
    if ctx.policy.enable_namespaces {
        return Verdict::allowed();
    }

    let fields = ctx.candidate.entry.namespace_fields();
    if fields.is_empty() {
        return Verdict::allowed();
    }

    Verdict::rejected(
        reasons::NAMESPACES_NOT_ENABLED,
        &format!(
            "{} {:?} sets {} but Consul Enterprise namespaces are not enabled",
            ctx.candidate.kind(),
            ctx.candidate.name,
            fields.join(", ")
        ),
    )
}
