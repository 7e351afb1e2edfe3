//! Google Gemini provider
//!
//! Talks to the Generative Language API (`generateContent`). Gemini takes no
//! system role in `contents`, so the system prompt is sent as an opening
//! user turn followed by a short model acknowledgement.
//!
//! # Module Structure
//!
//! - `config` - credentials, base URL and timeout
//! - `types` - wire types
//! - `convert` - request/response conversion
//! - `provider` - the [`GeminiProvider`] adapter

mod config;
mod convert;
mod provider;
mod types;


pub use config::{GeminiConfig, DEFAULT_BASE_URL, SYSTEM_ACKNOWLEDGEMENT};
pub use provider::GeminiProvider;
