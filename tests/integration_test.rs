//! End-to-end tests for the `agora` binary
//!
//! Every command runs against the built-in catalog and the embedded
//! configuration, from a scratch directory with credentials blanked out. The
//! chat test stands up a local DeepSeek stand-in, so no test touches the
//! network.

use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::Output;
use tokio::process::Command;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Provider variables the binary reads; empty counts as unset
const PROVIDER_VARS: [&str; 7] = [
    "DEEPSEEK_API_KEY",
    "ANTHROPIC_API_KEY",
    "GEMINI_API_KEY",
    "GOOGLE_API_KEY",
    "DEEPSEEK_BASE_URL",
    "ANTHROPIC_BASE_URL",
    "GEMINI_BASE_URL",
];

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("agora-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// The binary, run outside the workspace so no `.env` or `config/` is picked up
///
/// Provider variables are set to empty strings rather than removed: dotenvy
/// never overrides a variable that is already present.
fn agora() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_agora"));
    cmd.current_dir(scratch_dir("cwd"))
        .env("RUST_LOG", "off")
        .env_remove("AGORA_ENV");
    for var in PROVIDER_VARS {
        cmd.env(var, "");
    }
    cmd
}

async fn run(args: &[&str]) -> Output {
    agora().args(args).output().await.unwrap()
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// ============================================================================
// models
// ============================================================================

#[tokio::test]
async fn test_models_lists_catalog() {
    let models = stdout_json(&run(&["models", "--json"]).await);
    let ids: Vec<&str> = models
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();

    assert_eq!(ids.len(), 5);
    assert!(ids.contains(&"claude-4-sonnet"));
    assert!(ids.contains(&"gemini-2.5-pro"));
}

#[tokio::test]
async fn test_models_for_free_plan() {
    let models = stdout_json(&run(&["models", "--plan", "free", "--json"]).await);
    let providers: Vec<&str> = models
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["provider"].as_str().unwrap())
        .collect();

    assert!(!providers.is_empty());
    assert!(providers.iter().all(|p| *p == "deepseek"));
}

#[tokio::test]
async fn test_models_unknown_plan_fails() {
    let output = run(&["models", "--plan", "gold"]).await;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("gold"));
}

// ============================================================================
// route
// ============================================================================

#[tokio::test]
async fn test_route_greeting_on_free_plan() {
    let decision = stdout_json(&run(&["route", "hola", "--plan", "free", "--json"]).await);

    assert_eq!(decision["model"], "deepseek-chat");
    assert_eq!(decision["provider"], "deepseek");
    assert_eq!(decision["reason"], "entry_economy");
    assert_eq!(decision["analysis"]["needs_multimodal"], false);
    assert!(decision["estimate"]["total_cost"].as_f64().unwrap() < 0.01);
}

#[tokio::test]
async fn test_route_refactor_on_pro_plan() {
    let message = "Necesito refactorizar este código y optimizar el algoritmo, \
                   ¿podés ayudarme con la arquitectura?";
    let decision = stdout_json(&run(&["route", message, "--plan", "pro", "--json"]).await);

    assert_eq!(decision["model"], "claude-4-sonnet");
    assert_eq!(decision["reason"], "premium_reasoning");
    assert!(decision["analysis"]["complexity_score"].as_u64().unwrap() > 80);
}

#[tokio::test]
async fn test_route_video_on_premium_plan() {
    let decision = stdout_json(
        &run(&[
            "route",
            "Analizá este video de mi producto",
            "--plan",
            "premium",
            "--json",
        ])
        .await,
    );

    assert_eq!(decision["model"], "gemini-2.5-pro");
    assert_eq!(decision["reason"], "multimodal");
}

#[tokio::test]
async fn test_route_forced_model() {
    let decision = stdout_json(
        &run(&["route", "hola", "--force", "gemini-2.5-flash", "--json"]).await,
    );

    assert_eq!(decision["model"], "gemini-2.5-flash");
    assert_eq!(decision["reason"], "forced");
}

#[tokio::test]
async fn test_route_reads_history_file() {
    let dir = scratch_dir("history");
    let file = dir.join("history.json");
    let history = json!([
        {"role": "user", "content": "a".repeat(400)},
        {"role": "assistant", "content": "ok"}
    ]);
    std::fs::write(&file, history.to_string()).unwrap();

    let decision = stdout_json(
        &run(&[
            "route",
            "hola",
            "--history",
            file.to_str().unwrap(),
            "--json",
        ])
        .await,
    );

    assert_eq!(decision["analysis"]["history_length"], 2);
    assert_eq!(decision["analysis"]["context_length"], 100);
    let _ = std::fs::remove_dir_all(&dir);
}

// ============================================================================
// cost
// ============================================================================

#[tokio::test]
async fn test_cost_flat_rates() {
    let estimate = stdout_json(
        &run(&[
            "cost",
            "claude-4-sonnet",
            "--input",
            "1000000",
            "--output",
            "1000000",
            "--json",
        ])
        .await,
    );

    assert!((estimate["total_cost"].as_f64().unwrap() - 18.0).abs() < 1e-9);
    assert_eq!(estimate["model"], "Claude Sonnet 4");
    assert_eq!(estimate["tiered"], false);
}

#[tokio::test]
async fn test_cost_long_context_tier() {
    let estimate = stdout_json(
        &run(&[
            "cost",
            "gemini-2.5-pro",
            "--input",
            "300000",
            "--output",
            "0",
            "--json",
        ])
        .await,
    );

    assert_eq!(estimate["tiered"], true);
    assert!((estimate["input_cost"].as_f64().unwrap() - 0.75).abs() < 1e-9);
}

#[tokio::test]
async fn test_cost_unknown_model_fails() {
    let output = run(&["cost", "gpt-9", "--input", "10"]).await;
    assert!(!output.status.success());
}

// ============================================================================
// chat
// ============================================================================

#[tokio::test]
async fn test_chat_against_local_deepseek() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-local"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "deepseek-chat",
            "choices": [{
                "message": {"role": "assistant", "content": "¡Hola!"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = agora()
        .args(["chat", "hola", "--plan", "free", "--json"])
        .env("DEEPSEEK_API_KEY", "sk-local")
        .env("DEEPSEEK_BASE_URL", server.uri())
        .env("ANTHROPIC_API_KEY", "sk-ant-unused")
        .env("GEMINI_API_KEY", "gm-unused")
        .output()
        .await
        .unwrap();
    let reply = stdout_json(&output);

    assert_eq!(reply["chat"]["reason"], "entry_economy");
    assert_eq!(reply["chat"]["result"]["message"], "¡Hola!");
    assert_eq!(reply["chat"]["result"]["model"], "deepseek-chat");
    assert_eq!(reply["chat"]["result"]["usage"]["total_tokens"], 15);
    assert_eq!(reply["cost"]["tokens"]["input"], 12);
}

#[tokio::test]
async fn test_chat_without_credentials_fails() {
    let output = run(&["chat", "hola"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DEEPSEEK_API_KEY"));
    assert!(stderr.contains("ANTHROPIC_API_KEY"));
}

#[tokio::test]
async fn test_dotenv_cannot_supply_blanked_credentials() {
    let dir = scratch_dir("dotenv");
    std::fs::write(
        dir.join(".env"),
        "DEEPSEEK_API_KEY=sk-fromdotenv\nDEEPSEEK_BASE_URL=http://127.0.0.1:9\n",
    )
    .unwrap();

    let output = agora()
        .current_dir(&dir)
        .args(["chat", "hola"])
        .output()
        .await
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DEEPSEEK_API_KEY"));
    let _ = std::fs::remove_dir_all(&dir);
}
