//! Admission webhook server.
//!
//! Provides HTTP endpoints for the config entry ValidatingWebhookConfiguration.
//! Each request runs the same pipeline:
//! decode → resolve namespace → list existing entries → validate → respond.
//!
//! Decode and list failures deny immediately. A failed listing always denies
//! (fail-closed) since uniqueness cannot be checked against unknown state.

use std::sync::Arc;
use std::time::Instant;

use axum::{Json, Router, body::Bytes, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use kube::core::DynamicObject;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use tracing::{debug, error, info, warn};

use super::decode::{decode_candidate, decode_review};
use super::entry::ConfigEntryKind;
use super::error::WebhookError;
use super::lister::ConfigEntryLister;
use super::policies::{ValidationContext, Verdict, reasons, validate_all};
use super::respond::respond;
use crate::health::{HealthState, Outcome};
use crate::namespace::NamespacePolicy;

/// Webhook paths, one per config entry kind.
pub const WEBHOOK_PATHS: [&str; 3] = [
    "/validate-v1alpha1-servicedefaults",
    "/validate-v1alpha1-serviceresolver",
    "/validate-v1alpha1-proxydefaults",
];

/// Metric label recorded for requests of an unsupported kind.
pub const UNKNOWN_KIND: &str = "unknown";

/// Shared state for webhook handlers
pub struct WebhookState<L> {
    /// Namespace mirroring policy
    pub policy: NamespacePolicy,
    /// Source of persisted config entries
    pub lister: L,
    /// Health state for recording metrics
    pub health: Option<Arc<HealthState>>,
}

impl<L: ConfigEntryLister> WebhookState<L> {
    pub fn new(policy: NamespacePolicy, lister: L) -> Self {
        Self {
            policy,
            lister,
            health: None,
        }
    }

    /// Record metrics into `health`.
    pub fn with_health(mut self, health: Arc<HealthState>) -> Self {
        self.health = Some(health);
        self
    }

    /// Answer a raw AdmissionReview body.
    ///
    /// A body that is not an AdmissionReview gets a 400 and an `invalid`
    /// review; everything else gets a 200 carrying the decision.
    pub async fn review(&self, body: &[u8]) -> (StatusCode, AdmissionReview<DynamicObject>) {
        let request = match decode_review(body) {
            Ok(request) => request,
            Err(e) => {
                error!(error = %e, "Failed to extract admission request");
                return (
                    StatusCode::BAD_REQUEST,
                    AdmissionResponse::invalid(e.to_string()).into_review(),
                );
            }
        };

        (StatusCode::OK, self.admit(&request).await.into_review())
    }

    /// Decide an admission request and render the response.
    pub async fn admit(&self, request: &AdmissionRequest<DynamicObject>) -> AdmissionResponse {
        let started = Instant::now();
        let (verdict, outcome) = self.decide(request).await;

        if let Some(health) = &self.health {
            health.metrics.record_admission(
                kind_label(&request.kind.kind),
                outcome,
                started.elapsed().as_secs_f64(),
            );
        }

        respond(request, &verdict)
    }

    async fn decide(&self, request: &AdmissionRequest<DynamicObject>) -> (Verdict, Outcome) {
        let uid = &request.uid;
        debug!(
            uid = %uid,
            operation = ?request.operation,
            kind = %request.kind.kind,
            namespace = ?request.namespace,
            name = %request.name,
            "Processing admission request"
        );

        // The webhook is registered for CREATE and UPDATE only
        if !matches!(request.operation, Operation::Create | Operation::Update) {
            info!(uid = %uid, operation = ?request.operation, "Admission request allowed (not validated)");
            return (Verdict::allowed(), Outcome::Allowed);
        }

        let candidate = match decode_candidate(request) {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!(uid = %uid, reason = e.reason(), error = %e, "Admission request denied");
                return (Verdict::invalid(e.reason(), &e.to_string()), Outcome::Denied);
            }
        };
        let kind = candidate.kind();

        let namespace = self.policy.resolve(&candidate.source_namespace);

        let existing = match self.lister.list(kind).await {
            Ok(existing) => existing,
            Err(e) => {
                error!(uid = %uid, kind = %kind, name = %candidate.name, error = %e, "Failed to list existing config entries");
                if let Some(health) = &self.health {
                    health.metrics.record_list_error(kind.as_str());
                }
                return (
                    Verdict::unavailable(
                        reasons::LIST_FAILED,
                        &format!(
                            "unable to check existing {} resources; try again later",
                            e.kind()
                        ),
                    ),
                    Outcome::Errored,
                );
            }
        };

        let ctx = ValidationContext {
            candidate: &candidate,
            existing: &existing,
            namespace: &namespace,
            policy: &self.policy,
            operation: &request.operation,
        };
        let verdict = validate_all(&ctx);

        if verdict.allowed {
            info!(
                uid = %uid,
                kind = %kind,
                name = %candidate.name,
                namespace = %namespace,
                "Admission request allowed"
            );
            (verdict, Outcome::Allowed)
        } else {
            warn!(
                uid = %uid,
                kind = %kind,
                name = %candidate.name,
                namespace = %namespace,
                reason = verdict.reason.as_deref().unwrap_or_default(),
                message = verdict.message.as_deref().unwrap_or_default(),
                "Admission request denied"
            );
            (verdict, Outcome::Denied)
        }
    }
}

/// Metric label for a requested kind. Unsupported kinds share one label.
fn kind_label(kind: &str) -> &'static str {
    kind.parse::<ConfigEntryKind>()
        .map(|kind| kind.as_str())
        .unwrap_or(UNKNOWN_KIND)
}

/// Create the webhook router
pub fn create_webhook_router<L>(state: Arc<WebhookState<L>>) -> Router
where
    L: ConfigEntryLister + 'static,
{
    WEBHOOK_PATHS
        .into_iter()
        .fold(Router::new(), |router, path| {
            router.route(path, post(validate_config_entry::<L>))
        })
        .with_state(state)
}

/// Validate a config entry admission webhook handler
async fn validate_config_entry<L>(
    State(state): State<Arc<WebhookState<L>>>,
    body: Bytes,
) -> impl IntoResponse
where
    L: ConfigEntryLister + 'static,
{
    let (status, review) = state.review(&body).await;
    (status, Json(review))
}

/// Run the webhook server with TLS
///
/// Binds to 0.0.0.0 on `port` and serves the config entry endpoints.
/// TLS certificates are loaded from the paths specified (PEM format).
/// The health state, if any, is marked ready once the listener is bound.
pub async fn run_webhook_server<L>(
    state: Arc<WebhookState<L>>,
    port: u16,
    cert_path: &str,
    key_path: &str,
) -> Result<(), WebhookError>
where
    L: ConfigEntryLister + 'static,
{
    use axum_server::Handle;
    use axum_server::tls_rustls::RustlsConfig;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let config = RustlsConfig::from_pem_file(PathBuf::from(cert_path), PathBuf::from(key_path))
        .await
        .map_err(WebhookError::TlsConfig)?;

    let handle = Handle::new();
    if let Some(health) = state.health.clone() {
        let handle = handle.clone();
        tokio::spawn(async move {
            if let Some(addr) = handle.listening().await {
                info!(%addr, "Webhook server accepting connections");
                health.set_ready(true).await;
            }
        });
    }

    let app = create_webhook_router(state.clone());
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, "Webhook server listening with TLS");

    let served = axum_server::bind_rustls(addr, config)
        .handle(handle)
        .serve(app.into_make_service())
        .await;

    if let Some(health) = &state.health {
        health.set_ready(false).await;
    }
    served.map_err(WebhookError::Server)
}
