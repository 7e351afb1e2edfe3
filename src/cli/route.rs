//! `agora route` - show the routing decision for a message

use super::{build_router, RequestArgs};
use crate::app::load_config;
use agora_llm::cost::CostEstimate;
use anyhow::Result;
use clap::Args;
use serde_json::json;

#[derive(Args, Debug)]
pub struct RouteArgs {
    #[command(flatten)]
    pub request: RequestArgs,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RouteArgs) -> Result<()> {
    let config = load_config()?;
    let router = build_router(&config)?;
    let request = args.request.to_request()?;

    let decision = router.decide(&request);
    let analysis = decision
        .analysis
        .clone()
        .unwrap_or_else(|| router.analyze(&request));

    // Rough prompt size: history estimate plus the new message
    let input_tokens = (analysis.context_length + analysis.message_length / 4) as u64;
    let estimate = CostEstimate::for_input(&decision.model, input_tokens);

    if args.json {
        let out = json!({
            "model": decision.model.id,
            "provider": decision.model.provider,
            "reason": decision.reason,
            "analysis": analysis,
            "estimate": estimate,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let model = &decision.model;
    println!("Model:       {} ({}, {})", model.name, model.id, model.provider);
    println!("Reason:      {}", decision.reason);
    println!("Complexity:  {}/100", analysis.complexity_score);
    println!(
        "Multimodal:  {}",
        if analysis.needs_multimodal { "yes" } else { "no" }
    );
    println!("Context:     ~{} tokens", analysis.context_length);
    println!(
        "Est. cost:   ${:.6} ({} input, {} output tokens)",
        estimate.total_cost, estimate.tokens.input, estimate.tokens.output
    );
    Ok(())
}
