//! Admission payload decoding.
//!
//! Turns the raw request body into an `AdmissionRequest` and the embedded
//! object into a typed [`ConfigEntryCandidate`]. Decoding is all-or-nothing:
//! a candidate is only built once every field has been extracted.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::DynamicObject;
use kube::core::admission::{AdmissionRequest, AdmissionReview};
use serde_json::Value;

use super::entry::{ConfigEntry, ConfigEntryCandidate, ConfigEntryKind};
use super::error::DecodeError;
use crate::crd::{ProxyDefaults, ServiceDefaults, ServiceResolver};

/// Parse a request body into an admission request.
pub fn decode_review(body: &[u8]) -> Result<AdmissionRequest<DynamicObject>, DecodeError> {
    let review: AdmissionReview<DynamicObject> =
        serde_json::from_slice(body).map_err(DecodeError::MalformedReview)?;
    let request: Result<AdmissionRequest<DynamicObject>, _> = review.try_into();
    request.map_err(|e| DecodeError::MissingRequest(e.to_string()))
}

/// Decode the object carried by an admission request into a candidate.
pub fn decode_candidate(
    request: &AdmissionRequest<DynamicObject>,
) -> Result<ConfigEntryCandidate, DecodeError> {
    let kind: ConfigEntryKind = request
        .kind
        .kind
        .parse()
        .map_err(DecodeError::UnsupportedKind)?;

    let object = request.object.as_ref().ok_or(DecodeError::MissingObject)?;
    if let Some(types) = &object.types {
        if !types.kind.is_empty() && types.kind != kind.as_str() {
            return Err(DecodeError::KindMismatch {
                expected: kind,
                found: types.kind.clone(),
            });
        }
    }

    let value =
        serde_json::to_value(object).map_err(|source| DecodeError::InvalidObject { kind, source })?;
    let (metadata, entry) = decode_entry(kind, value)?;

    let name = non_empty(metadata.name)
        .or_else(|| non_empty(Some(request.name.clone())))
        .ok_or(DecodeError::MissingName(kind))?;
    let source_namespace = non_empty(metadata.namespace)
        .or_else(|| non_empty(request.namespace.clone()))
        .ok_or(DecodeError::MissingNamespace(kind))?;

    Ok(ConfigEntryCandidate {
        name,
        source_namespace,
        uid: non_empty(metadata.uid),
        entry,
    })
}

/// Deserialize `value` as the typed resource for `kind`.
fn decode_entry(kind: ConfigEntryKind, value: Value) -> Result<(ObjectMeta, ConfigEntry), DecodeError> {
    let invalid = |source| DecodeError::InvalidObject { kind, source };
    let decoded = match kind {
        ConfigEntryKind::ServiceDefaults => {
            let resource: ServiceDefaults = serde_json::from_value(value).map_err(invalid)?;
            (resource.metadata, ConfigEntry::ServiceDefaults(resource.spec))
        }
        ConfigEntryKind::ServiceResolver => {
            let resource: ServiceResolver = serde_json::from_value(value).map_err(invalid)?;
            (resource.metadata, ConfigEntry::ServiceResolver(resource.spec))
        }
        ConfigEntryKind::ProxyDefaults => {
            let resource: ProxyDefaults = serde_json::from_value(value).map_err(invalid)?;
            (resource.metadata, ConfigEntry::ProxyDefaults(resource.spec))
        }
    };
    Ok(decoded)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
