//! `agora chat` - route a message and send it to the selected model

use super::{build_router, RequestArgs};
use crate::app::{build_registry, load_config, Agora};
use agora_llm::{estimate_usage, Dispatcher};
use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Args, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub request: RequestArgs,
    /// System prompt
    #[arg(long)]
    pub system: Option<String>,
    /// Maximum output tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ChatArgs) -> Result<()> {
    let config = load_config()?;
    let router = build_router(&config)?;
    let registry =
        build_registry(router.catalog(), &config.llm).context("Provider setup failed")?;
    let agora = Agora::new(router, Dispatcher::new(registry), config.llm.clone());
    let request = args.request.to_request()?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling request");
            on_interrupt.cancel();
        }
    });

    let routed = agora
        .chat(
            &request,
            args.system.as_deref(),
            args.max_tokens,
            args.temperature,
            cancel,
        )
        .await
        .context("Chat failed")?;

    let cost = estimate_usage(&routed.result.model_config, &routed.result.usage);

    if args.json {
        let out = json!({ "chat": routed, "cost": cost });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let result = &routed.result;
    println!("{}", result.message);
    println!();
    println!(
        "[{} via {} | {} ms | {} in / {} out tokens | ${:.6}]",
        result.model,
        routed.reason,
        result.duration_ms,
        result.usage.prompt_tokens,
        result.usage.completion_tokens,
        cost.total_cost
    );
    Ok(())
}
