//! `agora cost` - estimate the cost of a request

use agora_llm::cost::{estimate_cost, DEFAULT_OUTPUT_TOKENS};
use agora_llm::ModelCatalog;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct CostArgs {
    /// Catalog model id
    pub model: String,
    /// Input tokens
    #[arg(long)]
    pub input: u64,
    /// Output tokens
    #[arg(long, default_value_t = DEFAULT_OUTPUT_TOKENS)]
    pub output: u64,
    /// Bill input at the cached rate
    #[arg(long)]
    pub cache: bool,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CostArgs) -> Result<()> {
    let catalog = ModelCatalog::builtin();
    let model = catalog
        .lookup(&args.model)
        .with_context(|| format!("Unknown model '{}'", args.model))?;

    let estimate = estimate_cost(&model, args.input, args.output, args.cache);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
        return Ok(());
    }

    println!("{}", estimate.model);
    println!(
        "  input:  {:>10} tokens  ${:.6}",
        estimate.tokens.input, estimate.input_cost
    );
    println!(
        "  output: {:>10} tokens  ${:.6}",
        estimate.tokens.output, estimate.output_cost
    );
    println!("  total:                     ${:.6}", estimate.total_cost);
    if estimate.tiered {
        println!("  (long-context rates applied)");
    }
    Ok(())
}
