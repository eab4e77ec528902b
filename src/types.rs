//! Canonical request and result types shared across the gateway.
//!
//! A [`GenerationRequest`] is the single logical input: which provider and
//! model to call, the prompt, and optionally an inline image for multimodal
//! documents. The gateway answers with a [`GenerationResult`] that is either
//! the generated text or a normalized [`ErrorClassification`].

use crate::classify::ErrorClassification;
use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default token budget for generation calls.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Default sampling temperature for generation calls.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// The closed set of supported AI providers.
///
/// `OpenAi`, `XaiGrok` and `OpenRouter` share one wire schema and are served
/// by a single adapter; `Anthropic` and `GoogleGemini` each have their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "google-gemini")]
    GoogleGemini,
    #[serde(rename = "xai-grok")]
    XaiGrok,
    #[serde(rename = "openrouter")]
    OpenRouter,
}

impl Provider {
    /// All supported providers, in canonical order.
    pub const ALL: [Provider; 5] = [
        Provider::OpenAi,
        Provider::Anthropic,
        Provider::GoogleGemini,
        Provider::XaiGrok,
        Provider::OpenRouter,
    ];

    /// Canonical string identifier, as used in stored project settings.
    pub fn id(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::GoogleGemini => "google-gemini",
            Provider::XaiGrok => "xai-grok",
            Provider::OpenRouter => "openrouter",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| GatewayError::UnknownProvider(s.to_string()))
    }
}

/// The kind of study content to generate.
///
/// Selects both the default prompt template and the normalizer path applied
/// to the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Summary,
    Notes,
    Quiz,
    Flashcards,
}

impl ContentKind {
    /// Canonical string identifier.
    pub fn id(&self) -> &'static str {
        match self {
            ContentKind::Summary => "summary",
            ContentKind::Notes => "notes",
            ContentKind::Quiz => "quiz",
            ContentKind::Flashcards => "flashcards",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ContentKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(ContentKind::Summary),
            "notes" => Ok(ContentKind::Notes),
            "quiz" => Ok(ContentKind::Quiz),
            "flashcards" => Ok(ContentKind::Flashcards),
            other => Err(GatewayError::UnknownContentKind(other.to_string())),
        }
    }
}

/// An image sent alongside the prompt for multimodal documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Raw image bytes; adapters base64-encode as each wire format requires.
    pub data: Vec<u8>,
    /// MIME type of the image, e.g. `image/jpeg` or `image/png`.
    pub mime: String,
}

impl InlineImage {
    pub fn new(data: impl Into<Vec<u8>>, mime: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime: mime.into(),
        }
    }
}

/// One logical generation request, immutable once built.
///
/// Generation parameters are fixed at construction
/// ([`DEFAULT_MAX_TOKENS`] / [`DEFAULT_TEMPERATURE`]).
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
    pub prompt: String,
    pub image: Option<InlineImage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(
        provider: Provider,
        model: impl Into<String>,
        api_key: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            api_key: api_key.into(),
            prompt: prompt.into(),
            image: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Attach an inline image, turning this into a multimodal request.
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// Outcome of one generation call: exactly one of generated text or a
/// normalized failure, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Success { text: String },
    Failure { classification: ErrorClassification },
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }

    /// The generated text, if this is a success.
    pub fn text(&self) -> Option<&str> {
        match self {
            GenerationResult::Success { text } => Some(text),
            GenerationResult::Failure { .. } => None,
        }
    }

    /// The failure classification, if this is a failure.
    pub fn classification(&self) -> Option<&ErrorClassification> {
        match self {
            GenerationResult::Success { .. } => None,
            GenerationResult::Failure { classification } => Some(classification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_ids_round_trip() {
        for provider in Provider::ALL {
            let parsed: Provider = provider.id().parse().unwrap();
            assert_eq!(parsed, provider);
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!("mistral".parse::<Provider>().is_err());
    }

    #[test]
    fn content_kind_ids_round_trip() {
        for kind in [
            ContentKind::Summary,
            ContentKind::Notes,
            ContentKind::Quiz,
            ContentKind::Flashcards,
        ] {
            let parsed: ContentKind = kind.id().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn request_defaults_are_fixed() {
        let request = GenerationRequest::new(Provider::OpenAi, "gpt-4o-mini", "key", "prompt");
        assert_eq!(request.max_tokens, 4096);
        assert_eq!(request.temperature, 0.7);
        assert!(request.image.is_none());
    }
}
