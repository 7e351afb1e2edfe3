//! `agora models` - list the model catalog

use agora_llm::{ModelCatalog, ModelDescriptor, Plan};
use anyhow::{bail, Result};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Only models available to this plan
    #[arg(long)]
    pub plan: Option<String>,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ModelsArgs) -> Result<()> {
    let catalog = ModelCatalog::builtin();

    let models: Vec<Arc<ModelDescriptor>> = match args.plan.as_deref() {
        Some(name) => match Plan::from_name(name) {
            Some(plan) => catalog.allowed_models(plan),
            None => bail!("Unknown plan '{name}'"),
        },
        None => catalog.models().to_vec(),
    };

    if args.json {
        let list: Vec<&ModelDescriptor> = models.iter().map(AsRef::as_ref).collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    println!(
        "{:<20} {:<10} {:<6} {:>8} {:>8} {:>8} {:>9}  multimodal",
        "id", "provider", "plan", "in $/M", "out $/M", "cache", "context"
    );
    for model in &models {
        let plan = catalog
            .minimum_plan(&model.id)
            .map_or("-", |p| p.as_str());
        let cache = model
            .pricing
            .cache
            .map_or_else(|| "-".to_string(), |c| format!("{c:.3}"));
        println!(
            "{:<20} {:<10} {:<6} {:>8.3} {:>8.3} {:>8} {:>9}  {:?}",
            model.id,
            model.provider.as_str(),
            plan,
            model.pricing.input,
            model.pricing.output,
            cache,
            model.capabilities.context_window,
            model.capabilities.multimodal,
        );
        if let Some(tier) = &model.pricing.tiered {
            println!(
                "{:<20} above {} input tokens: {:.3} / {:.3}",
                "", tier.threshold, tier.input_large, tier.output_large
            );
        }
    }
    Ok(())
}
