//! Adapter for the Google Gemini generateContent API.
//!
//! Gemini is the odd one out twice over: the model name is part of the URL
//! path, and authentication travels as a `key` query parameter instead of a
//! header. Both are provider-mandated.

use crate::config::GatewayConfig;
use crate::dispatch::WireCall;
use crate::error::GatewayError;
use crate::provider::{ProviderAdapter, parse_endpoint};
use crate::types::{GenerationRequest, Provider};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy)]
pub struct GeminiAdapter;

impl ProviderAdapter for GeminiAdapter {
    fn build_request(
        &self,
        request: &GenerationRequest,
        config: &GatewayConfig,
    ) -> Result<WireCall, GatewayError> {
        let base = config.generate_endpoint(Provider::GoogleGemini);
        let mut url = parse_endpoint(&format!("{base}{}:generateContent", request.model))?;
        url.query_pairs_mut().append_pair("key", &request.api_key);

        let mut parts = Vec::new();
        if let Some(image) = &request.image {
            parts.push(json!({
                "inline_data": {
                    "mime_type": image.mime,
                    "data": BASE64.encode(&image.data),
                },
            }));
        }
        parts.push(json!({"text": request.prompt}));

        let body = json!({
            "contents": [{"parts": parts}],
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_tokens,
            },
        });

        let headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        WireCall::post_json(url, headers, &body)
    }

    fn extract_text(&self, body: &Value) -> Option<String> {
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn models_call(
        &self,
        api_key: &str,
        config: &GatewayConfig,
    ) -> Result<Option<WireCall>, GatewayError> {
        let Some(endpoint) = config.models_endpoint(Provider::GoogleGemini) else {
            return Ok(None);
        };
        let mut url = parse_endpoint(endpoint)?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(Some(WireCall::get(url, Vec::new())))
    }

    fn parse_models(&self, body: &Value) -> Vec<String> {
        let Some(entries) = body.get("models").and_then(Value::as_array) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| {
                let name = entry.get("name")?.as_str()?;
                let name = name.strip_prefix("models/").unwrap_or(name);
                if !name.contains("gemini") {
                    return None;
                }
                let supports_generate = entry
                    .get("supportedGenerationMethods")?
                    .as_array()?
                    .iter()
                    .any(|method| method.as_str() == Some("generateContent"));
                supports_generate.then(|| name.to_string())
            })
            .collect()
    }
}
