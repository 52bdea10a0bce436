//! Gemini integration for the assistant features
//!
//! `GeminiClient` talks to the `generateContent` REST endpoint and implements
//! the core `AiGateway` port. Structured operations (daily report, task
//! priorities, knowledge card) request `application/json` output with a
//! response schema; the returned text may still arrive wrapped in a
//! Markdown code fence and is unwrapped before parsing.
//!
//! Transport retries live in [`crate::http::HttpClient`]. Status codes are
//! mapped here: 401/403 become `Authentication`, 429 becomes `RateLimit`,
//! anything else non-2xx becomes `Api`.
//!
//! ```no_run
//! use healthprod_infra::http::HttpClient;
//! use healthprod_infra::integrations::gemini::GeminiClient;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(std::env::var("GEMINI_API_KEY")?, HttpClient::new()?);
//! let card = client.knowledge_card().await?;
//! println!("{}: {}", card.title, card.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
mod prompts;
pub mod types;

pub use client::{strip_json_fence, GeminiClient};
pub use types::GeminiError;
