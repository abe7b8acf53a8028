//! Site Reporter LLM
//!
//! Provides the generative provider abstraction used by the analysis stage:
//! - Gemini (REST `generateContent` with schema-constrained JSON output)
//!
//! Also includes the HTTP client factory shared by provider implementations.

pub mod gemini;
pub mod http_client;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use provider::GenerativeProvider;
pub use types::*;
