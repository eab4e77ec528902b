//! Per-provider translation between the canonical request and each
//! provider's wire schema.
//!
//! Adapters are pure: they build [`WireCall`]s and interpret response
//! bodies, but never perform I/O themselves. The three concrete adapters
//! cover the five supported providers: [`OpenAiCompatibleAdapter`] serves
//! OpenAI, xAI Grok, and OpenRouter, which share one schema.

pub mod anthropic;
pub mod gemini;
pub mod openai;

pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiCompatibleAdapter;

use crate::config::GatewayConfig;
use crate::dispatch::WireCall;
use crate::error::GatewayError;
use crate::types::{GenerationRequest, Provider};
use serde_json::Value;
use url::Url;

/// Capability set every provider adapter implements.
pub trait ProviderAdapter: Send + Sync {
    /// Translate the canonical request into this provider's wire request.
    fn build_request(
        &self,
        request: &GenerationRequest,
        config: &GatewayConfig,
    ) -> Result<WireCall, GatewayError>;

    /// Extract the generated text from a success response body.
    ///
    /// `None` means the response carried no extractable text. That is an
    /// empty-result condition to report upstream, not an API error, and must
    /// not be coerced to an empty string.
    fn extract_text(&self, body: &Value) -> Option<String>;

    /// Extract the provider's own error message from an error response body.
    ///
    /// All supported providers put it at `error.message`; a bare string
    /// `error` field is accepted as a fallback.
    fn extract_error_message(&self, body: &Value) -> Option<String> {
        body.pointer("/error/message")
            .and_then(Value::as_str)
            .or_else(|| body.get("error").and_then(Value::as_str))
            .map(str::to_string)
    }

    /// Wire call for the provider's model-listing endpoint, or `None` where
    /// the provider has no such endpoint (Anthropic).
    fn models_call(
        &self,
        api_key: &str,
        config: &GatewayConfig,
    ) -> Result<Option<WireCall>, GatewayError>;

    /// Extract and filter model identifiers from a listing response body.
    fn parse_models(&self, body: &Value) -> Vec<String>;

    /// Static model list used when no listing endpoint exists or the
    /// listing call fails. Empty for providers without one.
    fn fallback_models(&self) -> Vec<String> {
        Vec::new()
    }
}

static OPENAI: OpenAiCompatibleAdapter = OpenAiCompatibleAdapter::new(Provider::OpenAi);
static XAI_GROK: OpenAiCompatibleAdapter = OpenAiCompatibleAdapter::new(Provider::XaiGrok);
static OPENROUTER: OpenAiCompatibleAdapter = OpenAiCompatibleAdapter::new(Provider::OpenRouter);
static ANTHROPIC: AnthropicAdapter = AnthropicAdapter;
static GEMINI: GeminiAdapter = GeminiAdapter;

/// The adapter serving a provider. Adding a provider means adding an enum
/// variant and an arm here; call sites stay untouched.
pub fn adapter_for(provider: Provider) -> &'static dyn ProviderAdapter {
    match provider {
        Provider::OpenAi => &OPENAI,
        Provider::XaiGrok => &XAI_GROK,
        Provider::OpenRouter => &OPENROUTER,
        Provider::Anthropic => &ANTHROPIC,
        Provider::GoogleGemini => &GEMINI,
    }
}

pub(crate) fn parse_endpoint(url: &str) -> Result<Url, GatewayError> {
    Url::parse(url).map_err(|source| GatewayError::InvalidEndpoint {
        url: url.to_string(),
        source,
    })
}
