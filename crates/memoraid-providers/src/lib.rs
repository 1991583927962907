//! memoraid-providers — Generative-AI provider integrations.
//!
//! Implements the `QuestionModel` trait for the Gemini API, plus a mock
//! provider for testing the quiz service without real API calls.

pub mod config;
pub mod gemini;
pub mod mock;

pub use config::{create_provider, load_config, MemoraidConfig, ProviderConfig};
pub use memoraid_core::error::ProviderError;
