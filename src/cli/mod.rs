//! CLI module for Agora
//!
//! Provides commands:
//! - `route`: Show which model a message would be routed to
//! - `chat`: Route a message and send it to the selected model
//! - `cost`: Estimate the cost of a request
//! - `models`: List the model catalog
//! - `doctor`: Configuration and credential diagnostics

use crate::app::AppConfig;
use agora_llm::{Message, ModelCatalog, ModelRouter, RoutingRequest};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

pub mod chat;
pub mod cost;
pub mod doctor;
pub mod models;
pub mod route;

/// Agora CLI
#[derive(Parser, Debug)]
#[command(name = "agora")]
#[command(about = "Model routing and dispatch for the Agora agent catalog")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which model a message would be routed to
    Route(route::RouteArgs),
    /// Route a message and send it to the selected model
    Chat(chat::ChatArgs),
    /// Estimate the cost of a request
    Cost(cost::CostArgs),
    /// List the model catalog
    Models(models::ModelsArgs),
    /// Check configuration and provider credentials
    Doctor(doctor::DoctorArgs),
}

/// Routing inputs shared by `route` and `chat`
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// The user message
    pub message: String,
    /// Plan name (free, basic, pro, premium, enterprise, ...)
    #[arg(long, default_value = "free")]
    pub plan: String,
    /// Agent category (e.g. legal, financiero)
    #[arg(long, default_value = "")]
    pub agent: String,
    /// Force a catalog model id
    #[arg(long = "force")]
    pub force_model: Option<String>,
    /// JSON file with prior turns: [{"role": "user", "content": "..."}]
    #[arg(long)]
    pub history: Option<PathBuf>,
}

impl RequestArgs {
    pub fn to_request(&self) -> Result<RoutingRequest> {
        let mut request = RoutingRequest::new(self.message.as_str())
            .with_plan_name(&self.plan)
            .with_agent_type(self.agent.as_str());
        if let Some(model) = &self.force_model {
            request = request.with_force_model(model.as_str());
        }
        if let Some(path) = &self.history {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read history file {}", path.display()))?;
            let history: Vec<Message> = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid history file {}", path.display()))?;
            request = request.with_history(history);
        }
        Ok(request)
    }
}

/// Build the router from the built-in catalog and the configured rules
pub fn build_router(config: &AppConfig) -> Result<ModelRouter> {
    let catalog = ModelCatalog::builtin();
    catalog.validate().context("Built-in catalog is invalid")?;
    ModelRouter::new(Arc::new(catalog), config.routing.clone())
        .context("Routing rules do not match the catalog")
}

/// Run the CLI command
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Route(args)) => route::run(args),
        Some(Commands::Chat(args)) => chat::run(args).await,
        Some(Commands::Cost(args)) => cost::run(args),
        Some(Commands::Models(args)) => models::run(args),
        Some(Commands::Doctor(args)) => doctor::run(args).await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_llm::Plan;

    #[test]
    fn test_cli_parses_route() {
        let cli = Cli::try_parse_from([
            "agora", "route", "hola", "--plan", "pro", "--agent", "legal",
        ])
        .unwrap();
        let Some(Commands::Route(args)) = cli.command else {
            panic!("expected route");
        };
        let request = args.request.to_request().unwrap();
        assert_eq!(request.plan, Some(Plan::Mid));
        assert_eq!(request.agent_type, "legal");
        assert!(request.force_model.is_none());
    }

    #[test]
    fn test_unknown_plan_name_is_kept_as_none() {
        let cli = Cli::try_parse_from(["agora", "route", "hola", "--plan", "gold"]).unwrap();
        let Some(Commands::Route(args)) = cli.command else {
            panic!("expected route");
        };
        assert_eq!(args.request.to_request().unwrap().plan, None);
    }

    #[test]
    fn test_build_router_with_defaults() {
        let router = build_router(&AppConfig::default()).unwrap();
        assert_eq!(router.catalog().len(), 5);
    }

    #[test]
    fn test_build_router_rejects_bad_target() {
        let mut config = AppConfig::default();
        config.routing.targets.economy = "gpt-9".to_string();
        assert!(build_router(&config).is_err());
    }
}
