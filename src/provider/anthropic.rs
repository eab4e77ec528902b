//! Adapter for the Anthropic messages API.

use crate::config::GatewayConfig;
use crate::dispatch::WireCall;
use crate::error::GatewayError;
use crate::provider::{ProviderAdapter, parse_endpoint};
use crate::types::{GenerationRequest, Provider};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

/// API version header Anthropic requires on every call.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic has no public model-listing endpoint; this list stands in.
const KNOWN_MODELS: [&str; 5] = [
    "claude-3-5-sonnet-20241022",
    "claude-3-5-haiku-20241022",
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
];

#[derive(Debug, Clone, Copy)]
pub struct AnthropicAdapter;

impl ProviderAdapter for AnthropicAdapter {
    fn build_request(
        &self,
        request: &GenerationRequest,
        config: &GatewayConfig,
    ) -> Result<WireCall, GatewayError> {
        let url = parse_endpoint(config.generate_endpoint(Provider::Anthropic))?;

        // Content is always the list form: an optional typed image block,
        // then the prompt text.
        let mut content = Vec::new();
        if let Some(image) = &request.image {
            content.push(json!({
                "type": "image",
                "source": {
                    "type": "base64",
                    "media_type": image.mime,
                    "data": BASE64.encode(&image.data),
                },
            }));
        }
        content.push(json!({"type": "text", "text": request.prompt}));

        let body = json!({
            "model": request.model,
            "max_tokens": request.max_tokens,
            "messages": [{"role": "user", "content": content}],
        });

        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("x-api-key".to_string(), request.api_key.clone()),
            ("anthropic-version".to_string(), ANTHROPIC_VERSION.to_string()),
        ];

        WireCall::post_json(url, headers, &body)
    }

    fn extract_text(&self, body: &Value) -> Option<String> {
        body.pointer("/content/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn models_call(
        &self,
        _api_key: &str,
        _config: &GatewayConfig,
    ) -> Result<Option<WireCall>, GatewayError> {
        Ok(None)
    }

    fn parse_models(&self, _body: &Value) -> Vec<String> {
        Vec::new()
    }

    fn fallback_models(&self) -> Vec<String> {
        KNOWN_MODELS.iter().map(|m| m.to_string()).collect()
    }
}
