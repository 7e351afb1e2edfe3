//! `agora doctor` - configuration and credential diagnostics

use super::build_router;
use crate::app::{build_registry, credential_status, load_config};
use agora_llm::{ChatRequest, Dispatcher, Message, ModelDescriptor, ProviderKind};
use anyhow::{bail, Result};
use clap::Args;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound for a ping round-trip
const PING_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Send a tiny request to each provider (incurs a small cost)
    #[arg(long)]
    pub ping: bool,
}

pub async fn run(args: DoctorArgs) -> Result<()> {
    println!("🏥 Agora Doctor\n");

    print!("Checking configuration... ");
    let config = match load_config() {
        Ok(config) => {
            println!("✅ Loaded");
            config
        }
        Err(e) => {
            println!("❌ {e:#}");
            bail!("Configuration could not be loaded");
        }
    };

    print!("Checking catalog and routing rules... ");
    let router = match build_router(&config) {
        Ok(router) => {
            println!("✅ {} models", router.catalog().len());
            router
        }
        Err(e) => {
            println!("❌ {e:#}");
            bail!("Catalog or routing rules are invalid");
        }
    };

    let mut all_ok = true;
    println!("Checking provider credentials...");
    for status in credential_status(router.catalog()) {
        if status.configured {
            println!("  ✅ {:<10} {}", status.provider.as_str(), status.detail);
        } else {
            println!("  ❌ {:<10} {}", status.provider.as_str(), status.detail);
            all_ok = false;
        }
    }

    if args.ping && all_ok {
        let registry = build_registry(router.catalog(), &config.llm)?;
        let dispatcher = Dispatcher::new(registry);

        // Cheapest model of each provider
        let mut probes: BTreeMap<ProviderKind, Arc<ModelDescriptor>> = BTreeMap::new();
        for model in router.catalog().models() {
            let entry = probes.entry(model.provider).or_insert_with(|| Arc::clone(model));
            if model.pricing.input < entry.pricing.input {
                *entry = Arc::clone(model);
            }
        }

        println!("Pinging providers...");
        for (provider, model) in probes {
            let request = ChatRequest::new(model.api_model())
                .with_message(Message::user("ping"))
                .with_max_tokens(16);
            match dispatcher
                .call_with_timeout(&model, request, PING_TIMEOUT)
                .await
            {
                Ok(result) => println!(
                    "  ✅ {:<10} {} answered in {} ms",
                    provider.as_str(), model.id, result.duration_ms
                ),
                Err(e) => {
                    println!("  ❌ {:<10} {}", provider.as_str(), e);
                    all_ok = false;
                }
            }
        }
    }

    println!();
    if all_ok {
        println!("✅ All checks passed! Ready to route.");
        Ok(())
    } else {
        println!("⚠️  Some checks failed. Please fix the issues above.");
        bail!("doctor found problems")
    }
}
