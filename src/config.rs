//! Process configuration.
//!
//! Every setting can be given as a flag or through the environment. The
//! namespace settings are read once at startup and never change while the
//! process runs.

use clap::Parser;

use crate::namespace::NamespacePolicy;

/// Default path to webhook TLS certificate
pub const WEBHOOK_CERT_PATH: &str = "/etc/webhook/certs/tls.crt";
/// Default path to webhook TLS private key
pub const WEBHOOK_KEY_PATH: &str = "/etc/webhook/certs/tls.key";
/// Default webhook server port
pub const WEBHOOK_PORT: u16 = 9443;
/// Default health server port
pub const HEALTH_PORT: u16 = 8080;

/// config-entry-webhook - validating admission webhook for config entries
#[derive(Parser, Debug, Clone)]
#[command(name = "config-entry-webhook", version, about, long_about = None)]
pub struct Config {
    /// Print the config entry CRD manifests and exit
    #[arg(long)]
    pub crd: bool,

    /// The mesh control plane runs Consul Enterprise with namespace support
    #[arg(long, env = "ENABLE_NAMESPACES")]
    pub enable_namespaces: bool,

    /// Map each Kubernetes namespace to a mesh namespace of the same name
    #[arg(long = "enable-ns-mirroring", env = "ENABLE_NS_MIRRORING")]
    pub enable_mirroring: bool,

    /// Mesh namespace config entries land in when mirroring is disabled
    #[arg(long, env = "DESTINATION_NAMESPACE", default_value = "default")]
    pub destination_namespace: String,

    /// Prefix added to mirrored mesh namespace names
    #[arg(long, env = "MIRRORING_PREFIX", default_value = "")]
    pub mirroring_prefix: String,

    /// Port the webhook server listens on
    #[arg(long, env = "WEBHOOK_PORT", default_value_t = WEBHOOK_PORT)]
    pub webhook_port: u16,

    /// Port the health and metrics server listens on
    #[arg(long, env = "HEALTH_PORT", default_value_t = HEALTH_PORT)]
    pub health_port: u16,

    /// Path to the webhook TLS certificate (PEM)
    #[arg(long, env = "WEBHOOK_TLS_CERT", default_value = WEBHOOK_CERT_PATH)]
    pub tls_cert: String,

    /// Path to the webhook TLS private key (PEM)
    #[arg(long, env = "WEBHOOK_TLS_KEY", default_value = WEBHOOK_KEY_PATH)]
    pub tls_key: String,
}

impl Config {
    /// Namespace policy described by this configuration.
    pub fn namespace_policy(&self) -> NamespacePolicy {
        NamespacePolicy {
            enable_namespaces: self.enable_namespaces,
            enable_mirroring: self.enable_mirroring,
            mirroring_prefix: self.mirroring_prefix.clone(),
            destination_namespace: self.destination_namespace.clone(),
        }
    }
}
