//! End-to-end routing over the built-in catalog.
//!
//! Checks the plan-level guarantees callers rely on: entry requests stay on
//! the economy provider, higher plans never see fewer models, and the same
//! request always lands on the same model.

use std::sync::Arc;

use agora_llm::catalog::{CLAUDE_SONNET_4, DEEPSEEK_CHAT, GEMINI_25_PRO};
use agora_llm::{
    estimate_cost, Message, ModelCatalog, ModelRouter, Plan, ProviderKind, RouteReason,
    RoutingRequest, RoutingRules,
};

fn router() -> ModelRouter {
    ModelRouter::new(Arc::new(ModelCatalog::builtin()), RoutingRules::default()).unwrap()
}

fn sample_messages() -> Vec<&'static str> {
    vec![
        "hola",
        "¿Qué hora es? ¿Y mañana?",
        "Analizá este video de mi producto",
        "Necesito refactorizar este código y optimizar el algoritmo, ¿podés ayudarme con la arquitectura?",
        "Quiero analizar, comparar, evaluar y optimizar mi plan paso a paso",
        "Te mando un pdf con el contrato",
        "Escribí una función que ordene una lista",
    ]
}

#[test]
fn entry_plan_stays_on_economy_provider() {
    let router = router();
    for message in sample_messages() {
        for agent in ["", "legal", "financiero", "soporte"] {
            let request = RoutingRequest::new(message)
                .with_plan_name("free")
                .with_agent_type(agent)
                .with_history(vec![Message::user("antes"); 12]);
            let model = router.route(&request);
            assert_eq!(model.provider, ProviderKind::DeepSeek, "{message} / {agent}");
        }
    }
}

#[test]
fn routed_model_is_always_allowed_for_the_plan() {
    let router = router();
    let catalog = router.catalog();
    for plan in Plan::ALL {
        for message in sample_messages() {
            let model = router.route(&RoutingRequest::new(message).with_plan(plan));
            assert!(catalog.is_allowed(plan, &model.id), "{plan} -> {}", model.id);
        }
    }
}

#[test]
fn higher_plans_see_more_models() {
    let catalog = ModelCatalog::builtin();
    let entry = catalog.allowed_models(Plan::Entry).len();
    let mid = catalog.allowed_models(Plan::Mid).len();
    let top = catalog.allowed_models(Plan::Top).len();
    assert!(entry < mid && mid < top);
}

#[test]
fn premium_model_only_on_top() {
    let router = router();
    for plan in [Plan::Entry, Plan::Mid] {
        for message in sample_messages() {
            let model = router.route(&RoutingRequest::new(message).with_plan(plan));
            assert!(!model.premium, "{plan} got {}", model.id);
        }
    }
}

#[test]
fn pro_plan_refactoring_scenario() {
    let decision = router().decide(
        &RoutingRequest::new(
            "Necesito refactorizar este código y optimizar el algoritmo, ¿podés ayudarme con la arquitectura?",
        )
        .with_plan_name("pro"),
    );
    assert_eq!(decision.model.id, CLAUDE_SONNET_4);
    assert_eq!(decision.reason, RouteReason::PremiumReasoning);
}

#[test]
fn premium_plan_video_scenario() {
    let model = router().route(
        &RoutingRequest::new("Analizá este video de mi producto").with_plan_name("premium"),
    );
    assert_eq!(model.id, GEMINI_25_PRO);
}

#[test]
fn greeting_on_free_plan_is_cheap() {
    let model = router().route(&RoutingRequest::new("hola").with_plan_name("free"));
    assert_eq!(model.id, DEEPSEEK_CHAT);

    let estimate = estimate_cost(&model, 1_000, 500, false);
    assert!(estimate.total_cost < 0.001);
}

#[test]
fn routing_request_from_json() {
    let request: RoutingRequest = serde_json::from_value(serde_json::json!({
        "message": "hola",
        "plan": "premium",
        "agent_type": "legal"
    }))
    .unwrap();

    let model = router().route(&request);
    assert_eq!(model.id, CLAUDE_SONNET_4);
}
