// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::string_slice
)]

//! Unit tests for config-entry-webhook.
//!
//! These tests run without a Kubernetes cluster and test individual
//! components in isolation through the public API.

mod crd_tests {
    use config_entry_webhook::crd::{
        Expose, ExposePath, MeshGateway, ProxyDefaultsSpec, ServiceDefaults, ServiceDefaultsSpec,
        ServiceResolverSpec, all_crds,
    };
    use kube::CustomResourceExt;

    #[test]
    fn test_crd_yaml_renders() {
        for crd in all_crds() {
            let yaml = serde_yaml::to_string(&crd).unwrap();
            assert!(yaml.contains("group: consul.hashicorp.com"));
            assert!(yaml.contains("v1alpha1"));
        }
    }

    #[test]
    fn test_service_defaults_crd_kind() {
        let crd = ServiceDefaults::crd();
        assert_eq!(crd.spec.names.kind, "ServiceDefaults");
        assert_eq!(crd.spec.names.plural, "servicedefaults");
    }

    #[test]
    fn test_service_defaults_spec_from_camel_case() {
        let spec: ServiceDefaultsSpec = serde_json::from_value(serde_json::json!({
            "protocol": "grpc",
            "meshGateway": {"mode": "local"},
            "externalSNI": "web.example.com",
            "expose": {"checks": true, "paths": [{"path": "/health", "listenerPort": 21500}]}
        }))
        .unwrap();
        assert_eq!(spec.protocol, "grpc");
        assert_eq!(spec.mesh_gateway.mode, "local");
        assert_eq!(spec.external_sni, "web.example.com");
        assert!(spec.expose.checks);
        assert_eq!(spec.expose.paths[0].listener_port, 21500);
        assert_eq!(spec.validate(), None);
    }

    #[test]
    fn test_mesh_gateway_mode_rejected() {
        let spec = ProxyDefaultsSpec {
            mesh_gateway: MeshGateway {
                mode: "sideways".to_string(),
            },
            ..Default::default()
        };
        let problem = spec.validate("global").unwrap();
        assert!(problem.contains("spec.meshGateway.mode"));
    }

    #[test]
    fn test_expose_path_must_be_absolute() {
        let spec = ServiceDefaultsSpec {
            expose: Expose {
                checks: false,
                paths: vec![ExposePath {
                    path: "health".to_string(),
                    ..Default::default()
                }],
            },
            ..Default::default()
        };
        let problem = spec.validate().unwrap();
        assert!(problem.contains("spec.expose.paths[0].path"));
    }

    #[test]
    fn test_resolver_default_subset_must_exist() {
        let spec = ServiceResolverSpec {
            default_subset: "v1".to_string(),
            ..Default::default()
        };
        assert!(spec.validate().unwrap().contains("v1"));
    }
}

mod entry_tests {
    use config_entry_webhook::crd::ServiceDefaultsSpec;
    use config_entry_webhook::webhooks::{ConfigEntry, ConfigEntryCandidate, ConfigEntryKind};

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ConfigEntryKind::ALL {
            assert_eq!(kind.as_str().parse::<ConfigEntryKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert_eq!(
            "servicedefaults".parse::<ConfigEntryKind>(),
            Err("servicedefaults".to_string())
        );
        assert!("IngressGateway".parse::<ConfigEntryKind>().is_err());
    }

    #[test]
    fn test_candidate_kind_follows_entry() {
        let candidate = ConfigEntryCandidate {
            name: "web".to_string(),
            source_namespace: "default".to_string(),
            uid: None,
            entry: ConfigEntry::ServiceDefaults(ServiceDefaultsSpec::default()),
        };
        assert_eq!(candidate.kind(), ConfigEntryKind::ServiceDefaults);
        assert!(candidate.entry.redirect().is_none());
        assert!(candidate.entry.namespace_fields().is_empty());
    }
}

mod verdict_tests {
    use config_entry_webhook::webhooks::Verdict;
    use config_entry_webhook::webhooks::policies::reasons;

    #[test]
    fn test_denied_carries_reason_and_message() {
        let verdict = Verdict::rejected(reasons::DUPLICATE_CONFIG_ENTRY, "taken");
        assert!(!verdict.allowed);
        assert_eq!(verdict.status, 422);
        assert_eq!(verdict.reason.as_deref(), Some("DuplicateConfigEntry"));
        assert_eq!(verdict.message.as_deref(), Some("taken"));
    }

    #[test]
    fn test_allowed_has_no_reason() {
        let verdict = Verdict::allowed();
        assert!(verdict.allowed);
        assert_eq!(verdict.reason, None);
        assert_eq!(verdict.message, None);
    }
}

mod decode_error_tests {
    use config_entry_webhook::webhooks::{ConfigEntryKind, DecodeError};

    #[test]
    fn test_reason_codes() {
        assert_eq!(
            DecodeError::UnsupportedKind("Foo".to_string()).reason(),
            "UnsupportedKind"
        );
        assert_eq!(DecodeError::MissingObject.reason(), "DecodeFailed");
        assert_eq!(
            DecodeError::MissingName(ConfigEntryKind::ProxyDefaults).reason(),
            "DecodeFailed"
        );
    }

    #[test]
    fn test_messages_name_the_kind() {
        let err = DecodeError::KindMismatch {
            expected: ConfigEntryKind::ServiceDefaults,
            found: "ServiceResolver".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("ServiceDefaults"));
        assert!(message.contains("ServiceResolver"));
    }
}

mod config_tests {
    use clap::Parser;
    use config_entry_webhook::{Config, NamespacePolicy, WEBHOOK_PORT};

    #[test]
    fn test_mirroring_flags() {
        let config = Config::try_parse_from([
            "config-entry-webhook",
            "--enable-namespaces",
            "--enable-ns-mirroring",
            "--mirroring-prefix",
            "k8s-",
        ])
        .unwrap();
        let policy = config.namespace_policy();
        assert!(policy.enable_mirroring);
        assert_eq!(policy.resolve("staging"), "k8s-staging");
        assert_eq!(config.webhook_port, WEBHOOK_PORT);
    }

    #[test]
    fn test_fixed_destination_flags() {
        let config = Config::try_parse_from([
            "config-entry-webhook",
            "--enable-namespaces",
            "--destination-namespace",
            "mesh",
        ])
        .unwrap();
        let policy = config.namespace_policy();
        assert_eq!(policy, NamespacePolicy::fixed("mesh"));
        assert_eq!(policy.resolve("staging"), "mesh");
    }
}

mod health_tests {
    use config_entry_webhook::health::{HealthState, Outcome};

    #[tokio::test]
    async fn test_readiness_toggles() {
        let state = HealthState::new();
        assert!(!state.is_ready().await);
        state.set_ready(true).await;
        assert!(state.is_ready().await);
    }

    #[test]
    fn test_admission_counter_labels() {
        let state = HealthState::new();
        state
            .metrics
            .record_admission("ProxyDefaults", Outcome::Denied, 0.002);
        let encoded = state.metrics.encode();
        assert!(encoded.contains("kind=\"ProxyDefaults\",outcome=\"denied\""));
    }
}
