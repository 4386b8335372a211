//! Malformed payloads and unavailable listers.
//!
//! Every failure here must end in a deny; nothing is admitted by default.

use axum::http::StatusCode;
use config_entry_webhook::NamespacePolicy;
use config_entry_webhook::health::HealthState;
use config_entry_webhook::webhooks::{StaticLister, WebhookState};
use serde_json::json;
use std::sync::Arc;

use crate::common::fixtures::ReviewBuilder;
use crate::{CountingLister, FailingLister, code, message, reason, response};

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let state = WebhookState::new(NamespacePolicy::disabled(), StaticLister::default());

    let (status, review) = state.review(b"{\"apiVersion\":").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response(&review)["allowed"], json!(false));
}

#[tokio::test]
async fn test_review_without_request_is_bad_request() {
    let state = WebhookState::new(NamespacePolicy::disabled(), StaticLister::default());
    let body = serde_json::to_vec(&json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview"
    }))
    .unwrap();

    let (status, review) = state.review(&body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response(&review)["allowed"], json!(false));
}

#[tokio::test]
async fn test_unsupported_kind_denied() {
    let lister = CountingLister::new(vec![]);
    let state = WebhookState::new(NamespacePolicy::disabled(), lister);
    let body = ReviewBuilder::new("IngressGateway", "edge").to_bytes();

    let (status, review) = state.review(&body).await;

    assert_eq!(status, StatusCode::OK);
    let rsp = response(&review);
    assert_eq!(rsp["allowed"], json!(false));
    assert_eq!(reason(&rsp), "UnsupportedKind");
    assert_eq!(code(&rsp), 400);
    assert_eq!(state.lister.calls(), 0);
}

#[tokio::test]
async fn test_kind_mismatch_denied() {
    let state = WebhookState::new(NamespacePolicy::disabled(), StaticLister::default());
    let body = ReviewBuilder::service_defaults("web")
        .object_kind("ServiceResolver")
        .to_bytes();

    let (_, review) = state.review(&body).await;

    let rsp = response(&review);
    assert_eq!(rsp["allowed"], json!(false));
    assert_eq!(reason(&rsp), "DecodeFailed");
}

#[tokio::test]
async fn test_wrongly_typed_field_denied() {
    let lister = CountingLister::new(vec![]);
    let state = WebhookState::new(NamespacePolicy::disabled(), lister);
    let body = ReviewBuilder::service_defaults("web")
        .spec(json!({"protocol": 42}))
        .to_bytes();

    let (_, review) = state.review(&body).await;

    let rsp = response(&review);
    assert_eq!(rsp["allowed"], json!(false));
    assert_eq!(reason(&rsp), "DecodeFailed");
    assert_eq!(code(&rsp), 400);
    assert_eq!(state.lister.calls(), 0);
}

#[tokio::test]
async fn test_list_failure_fails_closed() {
    let state = WebhookState::new(NamespacePolicy::mirroring("k8s-"), FailingLister);
    let body = ReviewBuilder::service_defaults("web")
        .namespace("staging")
        .to_bytes();

    let (status, review) = state.review(&body).await;

    assert_eq!(status, StatusCode::OK);
    let rsp = response(&review);
    assert_eq!(rsp["allowed"], json!(false));
    assert_eq!(reason(&rsp), "ListFailed");
    assert_eq!(code(&rsp), 503);
    assert!(message(&rsp).contains("ServiceDefaults"));
    assert!(!message(&rsp).contains("10.96.0.1"));
}

#[tokio::test]
async fn test_list_failure_recorded_in_metrics() {
    let health = Arc::new(HealthState::new());
    let state =
        WebhookState::new(NamespacePolicy::disabled(), FailingLister).with_health(health.clone());
    let body = ReviewBuilder::service_resolver("web").to_bytes();

    state.review(&body).await;

    let encoded = health.metrics.encode();
    assert!(encoded.contains("kind=\"ServiceResolver\",outcome=\"errored\""));
    assert!(encoded.contains("configentry_list_errors_total"));
}

#[tokio::test]
async fn test_delete_allowed_even_when_lister_fails() {
    let state = WebhookState::new(NamespacePolicy::disabled(), FailingLister);
    let body = ReviewBuilder::service_defaults("web")
        .operation("DELETE")
        .to_bytes();

    let (_, review) = state.review(&body).await;

    assert_eq!(response(&review)["allowed"], json!(true));
}

#[tokio::test]
async fn test_unsupported_kinds_share_one_metric_label() {
    let health = Arc::new(HealthState::new());
    let state = WebhookState::new(NamespacePolicy::disabled(), StaticLister::default())
        .with_health(health.clone());

    for kind in ["IngressGateway", "TerminatingGateway", "Mesh"] {
        state
            .review(&ReviewBuilder::new(kind, "edge").to_bytes())
            .await;
    }

    let encoded = health.metrics.encode();
    assert!(encoded.contains("kind=\"unknown\",outcome=\"denied\"} 3"));
    assert!(!encoded.contains("IngressGateway"));
    assert!(!encoded.contains("TerminatingGateway"));
}
