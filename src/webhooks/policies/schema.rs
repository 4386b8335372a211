//! Schema self-consistency policy.
//!
//! Validates:
//! - The resource name is a valid service name (DNS-1123 label)
//! - Kind-specific field constraints (protocols, gateway modes, subsets)

use std::sync::LazyLock;

use regex::Regex;

use super::{ValidationContext, Verdict, reasons};

/// Maximum length of a config entry name.
pub const MAX_NAME_LENGTH: usize = 63;

static SERVICE_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").ok());

fn is_valid_name(name: &str) -> bool {
    name.len() <= MAX_NAME_LENGTH && SERVICE_NAME.as_ref().is_some_and(|re| re.is_match(name))
}

/// Validate the candidate on its own, without looking at existing entries
pub fn validate(ctx: &ValidationContext<'_>) -> Verdict {
    let candidate = ctx.candidate;

    if !is_valid_name(&candidate.name) {
        return Verdict::invalid(
            reasons::INVALID_CONFIG_ENTRY,
            &format!(
                "{} name {:?} must consist of lowercase alphanumerics or '-', start and end with an alphanumeric, and be at most {} characters",
                candidate.kind(),
                candidate.name,
                MAX_NAME_LENGTH
            ),
        );
    }

    if let Some(problem) = candidate.entry.validate(&candidate.name) {
        return Verdict::invalid(
            reasons::INVALID_CONFIG_ENTRY,
            &format!("{} {:?} is invalid: {}", candidate.kind(), candidate.name, problem),
        );
    }

    Verdict::allowed()
}
