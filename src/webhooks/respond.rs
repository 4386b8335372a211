//! Rendering of verdicts into admission responses.

use kube::Resource;
use kube::core::admission::{AdmissionRequest, AdmissionResponse};

use super::policies::Verdict;

/// Render `verdict` as the response to `request`.
///
/// Denials carry the verdict's status code, reason and message unchanged.
pub fn respond<T: Resource>(request: &AdmissionRequest<T>, verdict: &Verdict) -> AdmissionResponse {
    let response = AdmissionResponse::from(request);
    if verdict.allowed {
        return response;
    }

    let mut response = response.deny(verdict.message.clone().unwrap_or_default());
    response.result.code = verdict.status;
    if let Some(reason) = &verdict.reason {
        response.result.reason = reason.clone();
    }
    response
}
