//! # StudyGen
//!
//! An AI-provider generation gateway for study content. One canonical
//! request ("produce study content of a given kind from this source
//! material") is translated into provider-specific wire calls across five
//! mutually incompatible AI HTTP APIs, failures are classified into a
//! uniform taxonomy, and the generated free text is normalized into
//! structured study artifacts: quiz questions, flashcards, and formatted
//! notes.
//!
//! ## Architecture Overview
//!
//! - **[`provider`]**: per-provider adapters translating the canonical
//!   request to each provider's wire schema and back
//! - **[`dispatch`]**: one bounded HTTP exchange per call, no retries
//! - **[`classify`]**: pure classifier mapping status/body/headers into a
//!   normalized error taxonomy with user-facing messages and retry hints
//! - **[`content`]**: best-effort normalization of generated text into quiz,
//!   flashcard, and notes structures, with raw-text fallback
//! - **[`gateway`]**: the facade wiring the pieces together
//!
//! The gateway is stateless and re-entrant: no mutable state is shared
//! across invocations, so concurrent callers need no coordination. It never
//! retries; rate-limit recovery guided by
//! [`classify::ErrorClassification::retry_after_seconds`] is the caller's
//! job.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use studygen::{
//!     ContentKind, Gateway, GatewayConfig, GenerationRequest, GenerationResult, Provider,
//!     content, prompts,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = Gateway::new(GatewayConfig::default());
//!
//!     let prompt = prompts::build_prompt(ContentKind::Quiz, None, "…source text…", false);
//!     let request = GenerationRequest::new(Provider::OpenAi, "gpt-4o-mini", "sk-…", prompt);
//!
//!     match gateway.generate(&request).await? {
//!         GenerationResult::Success { text } => {
//!             let quiz = content::normalize(ContentKind::Quiz, &text);
//!             println!("{quiz:?}");
//!         }
//!         GenerationResult::Failure { classification } => {
//!             eprintln!("{}", classification.message);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

/// Error classification: the normalized failure taxonomy.
pub mod classify;

/// Gateway configuration: endpoints, default models, timeouts.
pub mod config;

/// Content normalizer: quiz/flashcard parsing and notes formatting.
pub mod content;

/// Single-attempt HTTP dispatch.
pub mod dispatch;

/// Local error type for non-API failures.
pub mod error;

/// The gateway facade.
pub mod gateway;

/// Prompt templates and the prompt builder.
pub mod prompts;

/// Per-provider wire adapters.
pub mod provider;

/// Canonical request and result types.
pub mod types;

pub use classify::{ErrorClassification, ErrorKind, RequestErrorKind, classify};
pub use config::{GatewayConfig, ProviderEndpoints};
pub use content::{
    Flashcard, NormalizedContent, ParseOutcome, QuizOption, QuizQuestion, format_notes, normalize,
    parse_flashcards, parse_quiz,
};
pub use dispatch::{Dispatcher, RawResponse, WireCall};
pub use error::GatewayError;
pub use gateway::Gateway;
pub use provider::{ProviderAdapter, adapter_for};
pub use types::{ContentKind, GenerationRequest, GenerationResult, InlineImage, Provider};
