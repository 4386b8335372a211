//! config-entry-webhook library crate
//!
//! Validating admission webhook for service-mesh config entry custom
//! resources. Exports the CRD definitions, the namespace resolver, the
//! admission pipeline and the health/metrics server.

pub mod config;
pub mod crd;
pub mod health;
pub mod namespace;
pub mod webhooks;

pub use config::{Config, HEALTH_PORT, WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH, WEBHOOK_PORT};
pub use health::HealthState;
pub use namespace::{NamespacePolicy, resolve};
pub use webhooks::{KubeLister, WebhookError, WebhookState, run_webhook_server};
