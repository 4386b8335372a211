//! Cross-resource reference policy.
//!
//! ServiceResolver redirects are followed through the existing resolvers
//! (with the candidate standing in for its own persisted version). A chain
//! that comes back to a service it already passed through is a loop and
//! would make the service unresolvable.
//!
//! Redirects to another datacenter leave this cluster's view and end the
//! chain. A redirect that only picks a subset of the same service is not an
//! edge.

use std::collections::{HashMap, HashSet};

use super::{ValidationContext, Verdict, reasons};
use crate::webhooks::entry::ConfigEntry;

/// (mesh namespace, service name)
type Node = (String, String);

fn redirect_target(namespace: &str, name: &str, entry: &ConfigEntry) -> Option<Node> {
    let redirect = entry.redirect()?;
    if !redirect.datacenter.is_empty() {
        return None;
    }
    let service = if redirect.service.is_empty() {
        name
    } else {
        redirect.service.as_str()
    };
    let target_namespace = if redirect.namespace.is_empty() {
        namespace
    } else {
        redirect.namespace.as_str()
    };
    if target_namespace == namespace && service == name {
        return None;
    }
    Some((target_namespace.to_string(), service.to_string()))
}

fn format_path(path: &[Node]) -> String {
    path.iter()
        .map(|(namespace, name)| format!("{}/{}", namespace, name))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Validate that the candidate's redirect does not close a loop
pub fn validate(ctx: &ValidationContext<'_>) -> Verdict {
    let candidate = ctx.candidate;
    let Some(first) = redirect_target(ctx.namespace, &candidate.name, &candidate.entry) else {
        return Verdict::allowed();
    };

    let mut edges: HashMap<Node, Node> = HashMap::new();
    for entry in ctx.existing {
        let namespace = entry.resolved_namespace(ctx.policy);
        if namespace == ctx.namespace && entry.name == candidate.name {
            continue;
        }
        if let Some(target) = redirect_target(&namespace, &entry.name, &entry.entry) {
            edges.insert((namespace, entry.name.clone()), target);
        }
    }

    let start: Node = (ctx.namespace.to_string(), candidate.name.clone());
    let mut seen: HashSet<Node> = HashSet::from([start.clone()]);
    let mut path = vec![start];
    let mut next = first;

    loop {
        path.push(next.clone());
        if !seen.insert(next.clone()) {
            return Verdict::rejected(
                reasons::REDIRECT_LOOP,
                &format!(
                    "{} {:?} creates a redirect loop: {}",
                    candidate.kind(),
                    candidate.name,
                    format_path(&path)
                ),
            );
        }
        match edges.get(&next) {
            Some(target) => next = target.clone(),
            None => return Verdict::allowed(),
        }
    }
}
