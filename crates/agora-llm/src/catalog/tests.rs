//! Tests for catalog module

use super::*;
use std::collections::HashMap;

fn descriptor(id: &str, provider: ProviderKind, premium: bool) -> ModelDescriptor {
    let mut model = ModelCatalog::builtin().lookup(DEEPSEEK_CHAT).unwrap().as_ref().clone();
    model.id = id.to_string();
    model.provider = provider;
    model.premium = premium;
    model
}

fn access(entry: &[&str], mid: &[&str], top: &[&str]) -> HashMap<Plan, Vec<String>> {
    let owned = |ids: &[&str]| ids.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
    HashMap::from([
        (Plan::Entry, owned(entry)),
        (Plan::Mid, owned(mid)),
        (Plan::Top, owned(top)),
    ])
}

#[test]
fn test_builtin_catalog_is_valid() {
    let catalog = ModelCatalog::builtin();
    assert!(catalog.validate().is_ok());
    assert_eq!(catalog.len(), 5);
    assert!(!catalog.is_empty());
}

#[test]
fn test_lookup() {
    let catalog = ModelCatalog::builtin();

    let model = catalog.lookup("deepseek-chat").unwrap();
    assert_eq!(model.provider, ProviderKind::DeepSeek);
    assert_eq!(model.api_model(), "deepseek-chat");

    let claude = catalog.lookup(CLAUDE_SONNET_4).unwrap();
    assert_eq!(claude.api_model(), "claude-sonnet-4-20250514");

    let err = catalog.lookup("gpt-7").unwrap_err();
    assert!(matches!(err, Error::NotFound(ref id) if id == "gpt-7"));
}

#[test]
fn test_plan_sets_are_strictly_nested() {
    let catalog = ModelCatalog::builtin();
    let ids = |plan| {
        catalog
            .allowed_models(plan)
            .iter()
            .map(|m| m.id.clone())
            .collect::<std::collections::BTreeSet<_>>()
    };

    let entry = ids(Plan::Entry);
    let mid = ids(Plan::Mid);
    let top = ids(Plan::Top);

    assert!(entry.is_subset(&mid) && entry.len() < mid.len());
    assert!(mid.is_subset(&top) && mid.len() < top.len());
}

#[test]
fn test_premium_only_in_top() {
    let catalog = ModelCatalog::builtin();
    for model in catalog.models().iter().filter(|m| m.premium) {
        assert!(!catalog.is_allowed(Plan::Entry, &model.id));
        assert!(!catalog.is_allowed(Plan::Mid, &model.id));
        assert!(catalog.is_allowed(Plan::Top, &model.id));
        assert_eq!(catalog.minimum_plan(&model.id), Some(Plan::Top));
    }
    assert_eq!(catalog.minimum_plan(DEEPSEEK_CHAT), Some(Plan::Entry));
    assert_eq!(catalog.minimum_plan("unknown"), None);
}

#[test]
fn test_entry_plan_is_economy_only() {
    let catalog = ModelCatalog::builtin();
    assert!(catalog
        .allowed_models(Plan::Entry)
        .iter()
        .all(|m| m.provider == ProviderKind::DeepSeek));
}

#[test]
fn test_providers() {
    let catalog = ModelCatalog::builtin();
    assert_eq!(
        catalog.providers(),
        vec![
            ProviderKind::DeepSeek,
            ProviderKind::Anthropic,
            ProviderKind::Google
        ]
    );
}

#[test]
fn test_new_rejects_duplicate_ids() {
    let models = vec![
        descriptor("a", ProviderKind::DeepSeek, false),
        descriptor("a", ProviderKind::Anthropic, false),
    ];
    let err = ModelCatalog::new(models, access(&["a"], &["a"], &["a"])).unwrap_err();
    assert!(err.to_string().contains("duplicate model id: a"));
}

#[test]
fn test_new_rejects_unknown_plan_reference() {
    let models = vec![descriptor("a", ProviderKind::DeepSeek, false)];
    let err = ModelCatalog::new(models, access(&["a"], &["a", "b"], &["a", "b", "c"]))
        .unwrap_err();
    assert!(err.to_string().contains("unknown model b"));
}

#[test]
fn test_new_rejects_non_strict_nesting() {
    let models = vec![
        descriptor("a", ProviderKind::DeepSeek, false),
        descriptor("b", ProviderKind::Anthropic, false),
    ];
    let err = ModelCatalog::new(models, access(&["a"], &["a"], &["a", "b"])).unwrap_err();
    assert!(matches!(err, Error::InvalidCatalog(_)));
    assert!(err.to_string().contains("strict subset"));
}

#[test]
fn test_new_rejects_premium_below_top() {
    let models = vec![
        descriptor("a", ProviderKind::DeepSeek, false),
        descriptor("b", ProviderKind::Google, true),
        descriptor("c", ProviderKind::Anthropic, false),
    ];
    let err = ModelCatalog::new(models, access(&["a"], &["a", "b"], &["a", "b", "c"]))
        .unwrap_err();
    assert!(err.to_string().contains("premium model b"));
}

#[test]
fn test_new_accepts_valid_catalog() {
    let models = vec![
        descriptor("a", ProviderKind::DeepSeek, false),
        descriptor("b", ProviderKind::Anthropic, false),
        descriptor("c", ProviderKind::Google, true),
    ];
    let catalog = ModelCatalog::new(models, access(&["a"], &["a", "b"], &["a", "b", "c"])).unwrap();
    assert_eq!(catalog.allowed_models(Plan::Mid).len(), 2);
    assert!(catalog.contains("c"));
}

#[test]
fn test_plan_from_name() {
    assert_eq!(Plan::from_name("free"), Some(Plan::Entry));
    assert_eq!(Plan::from_name(" Pro "), Some(Plan::Mid));
    assert_eq!(Plan::from_name("PREMIUM"), Some(Plan::Top));
    assert_eq!(Plan::from_name("gold"), None);
    assert!(Plan::Entry < Plan::Mid && Plan::Mid < Plan::Top);
}

#[test]
fn test_multimodality_serde() {
    assert_eq!(serde_json::to_string(&Multimodality::None).unwrap(), "false");
    assert_eq!(serde_json::to_string(&Multimodality::Supported).unwrap(), "true");
    assert_eq!(serde_json::to_string(&Multimodality::Native).unwrap(), "\"native\"");

    let parsed: Multimodality = serde_json::from_str("\"native\"").unwrap();
    assert_eq!(parsed, Multimodality::Native);
    assert!(serde_json::from_str::<Multimodality>("\"partial\"").is_err());
}

#[test]
fn test_descriptor_json_round_trip_keeps_tiers() {
    let catalog = ModelCatalog::builtin();
    let pro = catalog.lookup(GEMINI_25_PRO).unwrap();
    let json = serde_json::to_value(pro.as_ref()).unwrap();
    assert_eq!(json["provider"], "google");
    assert_eq!(json["pricing"]["tiered"]["threshold"], 200_000);
    assert_eq!(json["capabilities"]["multimodal"], "native");
}
