//! Application wiring
//!
//! Loads configuration, builds the catalog, router and provider registry,
//! and exposes them through the [`Agora`] facade the CLI commands use.

mod agora;
pub mod config;
mod loader;
mod providers;

pub use agora::Agora;
pub use config::AppConfig;
pub use loader::load_config;
pub use providers::{build_registry, credential_status};
