//! Tests for the provider registry

use super::*;
use crate::catalog::ModelCatalog;

fn mock(kind: ProviderKind) -> Arc<dyn ChatProvider> {
    let mut provider = MockChatProvider::new();
    provider.expect_kind().return_const(kind);
    provider.expect_name().return_const(kind.as_str().to_string());
    Arc::new(provider)
}

#[test]
fn test_register_and_get() {
    let mut registry = ProviderRegistry::new();
    assert!(registry.is_empty());

    registry.register(mock(ProviderKind::Google));
    registry.register(mock(ProviderKind::DeepSeek));

    assert_eq!(registry.len(), 2);
    assert!(registry.contains(ProviderKind::DeepSeek));
    assert!(registry.get(ProviderKind::Anthropic).is_none());
    assert_eq!(
        registry.kinds(),
        vec![ProviderKind::DeepSeek, ProviderKind::Google]
    );
}

#[test]
fn test_register_replaces_same_kind() {
    let mut registry = ProviderRegistry::new();
    registry.register(mock(ProviderKind::Anthropic));
    registry.register(mock(ProviderKind::Anthropic));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_build_covers_catalog_providers() {
    let catalog = ModelCatalog::builtin();
    let registry = ProviderRegistry::build(&catalog, |kind| Ok(mock(kind))).unwrap();

    assert_eq!(registry.kinds(), catalog.providers());
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_build_reports_every_missing_key() {
    let catalog = ModelCatalog::builtin();
    let err = ProviderRegistry::build(&catalog, |kind| match kind {
        ProviderKind::Anthropic => Ok(mock(kind)),
        other => Err(Error::NotConfigured(format!(
            "{}_API_KEY not set",
            other.as_str().to_uppercase()
        ))),
    })
    .unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, Error::NotConfigured(_)));
    assert!(message.contains("DEEPSEEK_API_KEY"));
    assert!(message.contains("GOOGLE_API_KEY"));
    assert!(!message.contains("ANTHROPIC"));
}

#[test]
fn test_build_propagates_other_errors() {
    let catalog = ModelCatalog::builtin();
    let err = ProviderRegistry::build(&catalog, |_| Err(Error::Network("tls".to_string())))
        .unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

#[test]
fn test_debug_lists_kinds() {
    let mut registry = ProviderRegistry::new();
    registry.register(mock(ProviderKind::DeepSeek));
    assert!(format!("{registry:?}").contains("DeepSeek"));
}
