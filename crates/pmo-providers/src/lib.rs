//! Provider client implementations for PMO360.
//!
//! This crate provides concrete implementations of the `ProviderClient`
//! trait, one per LLM vendor.
//!
//! # Supported Providers
//!
//! - **Mock**: Testing and development
//! - **OpenAI**: Chat completion API (API key required)
//! - **Gemini**: Google's generateContent API (API key required)
//! - **Anthropic**: Messages API (API key required)
//! - **Mistral**: Chat completion API (API key required)
//! - **Cohere**: Generate API (API key required)

pub mod anthropic;
pub mod cohere;
pub mod factory;
pub mod gemini;
pub mod mistral;
pub mod mock;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use cohere::CohereClient;
pub use factory::{ClientFactory, ProviderConfig};
pub use gemini::GeminiClient;
pub use mistral::MistralClient;
pub use mock::MockClient;
pub use openai::OpenAiClient;
