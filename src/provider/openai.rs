//! Adapter for the OpenAI-compatible chat-completions schema, shared by
//! OpenAI, xAI Grok, and OpenRouter.

use crate::config::GatewayConfig;
use crate::dispatch::WireCall;
use crate::error::GatewayError;
use crate::prompts::SYSTEM_PROMPT;
use crate::provider::{ProviderAdapter, parse_endpoint};
use crate::types::{GenerationRequest, Provider};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

/// How many non-free "popular" models OpenRouter listings are capped at.
const OPENROUTER_PAID_MODEL_CAP: usize = 20;

/// One adapter instance per provider in the family; the provider determines
/// the endpoint and the listing filter, the wire schema is identical.
#[derive(Debug, Clone, Copy)]
pub struct OpenAiCompatibleAdapter {
    provider: Provider,
}

impl OpenAiCompatibleAdapter {
    pub const fn new(provider: Provider) -> Self {
        Self { provider }
    }
}

impl ProviderAdapter for OpenAiCompatibleAdapter {
    fn build_request(
        &self,
        request: &GenerationRequest,
        config: &GatewayConfig,
    ) -> Result<WireCall, GatewayError> {
        let url = parse_endpoint(config.generate_endpoint(self.provider))?;

        // With an image the user turn becomes a multi-part content list; the
        // prompt text always rides along, never replaced by the image.
        let user_content = match &request.image {
            Some(image) => json!([
                {
                    "type": "image_url",
                    "image_url": {
                        "url": format!("data:{};base64,{}", image.mime, BASE64.encode(&image.data)),
                    },
                },
                {"type": "text", "text": request.prompt},
            ]),
            None => json!(request.prompt),
        };

        let body = json!({
            "model": request.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user_content},
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", request.api_key),
            ),
        ];
        // OpenRouter mandates two identification headers.
        if self.provider == Provider::OpenRouter {
            headers.push(("HTTP-Referer".to_string(), "http://localhost".to_string()));
            headers.push(("X-Title".to_string(), "StudyGen".to_string()));
        }

        WireCall::post_json(url, headers, &body)
    }

    fn extract_text(&self, body: &Value) -> Option<String> {
        body.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn models_call(
        &self,
        api_key: &str,
        config: &GatewayConfig,
    ) -> Result<Option<WireCall>, GatewayError> {
        let Some(endpoint) = config.models_endpoint(self.provider) else {
            return Ok(None);
        };
        let url = parse_endpoint(endpoint)?;
        let headers = vec![("Authorization".to_string(), format!("Bearer {api_key}"))];
        Ok(Some(WireCall::get(url, headers)))
    }

    fn parse_models(&self, body: &Value) -> Vec<String> {
        let entries = match body.get("data").and_then(Value::as_array) {
            Some(entries) => entries,
            None => return Vec::new(),
        };

        match self.provider {
            Provider::OpenAi => {
                // Chat models only, newest first.
                let mut models: Vec<String> = entries
                    .iter()
                    .filter_map(|entry| entry.get("id").and_then(Value::as_str))
                    .filter(|id| id.contains("gpt") || id.contains("o1"))
                    .map(str::to_string)
                    .collect();
                models.sort();
                models.reverse();
                models
            }
            Provider::OpenRouter => {
                // Free models first, then a capped set of popular paid ones.
                let mut free = Vec::new();
                let mut paid = Vec::new();
                for entry in entries {
                    let Some(id) = entry.get("id").and_then(Value::as_str) else {
                        continue;
                    };
                    if is_free_openrouter_model(entry, id) {
                        free.push(id.to_string());
                    } else if ["gpt-4", "claude", "gemini", "llama", "mistral"]
                        .iter()
                        .any(|popular| id.contains(popular))
                    {
                        paid.push(id.to_string());
                    }
                }
                paid.truncate(OPENROUTER_PAID_MODEL_CAP);
                free.extend(paid);
                free
            }
            _ => entries
                .iter()
                .filter_map(|entry| entry.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect(),
        }
    }

    fn fallback_models(&self) -> Vec<String> {
        // xAI's listing endpoint is flaky enough that the original shipped a
        // static fallback; the other family members report the error instead.
        if self.provider == Provider::XaiGrok {
            vec![
                "grok-2".to_string(),
                "grok-2-mini".to_string(),
                "grok-beta".to_string(),
            ]
        } else {
            Vec::new()
        }
    }
}

fn is_free_openrouter_model(entry: &Value, id: &str) -> bool {
    if id.contains(":free") {
        return true;
    }
    let zero_price = |field: &str| {
        entry
            .pointer(&format!("/pricing/{field}"))
            .and_then(price_as_f64)
            .is_some_and(|price| price == 0.0)
    };
    zero_price("prompt") && zero_price("completion")
}

/// OpenRouter reports prices as strings, but tolerate plain numbers too.
fn price_as_f64(value: &Value) -> Option<f64> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .or_else(|| value.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InlineImage;

    fn body_json(call: &WireCall) -> Value {
        serde_json::from_slice(call.body.as_deref().unwrap()).unwrap()
    }

    fn request_for(provider: Provider) -> GenerationRequest {
        GenerationRequest::new(provider, "gpt-4o-mini", "sk-test", "What is mitosis?")
    }

    #[test]
    fn prompt_is_embedded_verbatim() {
        let config = GatewayConfig::default();
        for provider in [Provider::OpenAi, Provider::XaiGrok, Provider::OpenRouter] {
            let adapter = OpenAiCompatibleAdapter::new(provider);
            let call = adapter.build_request(&request_for(provider), &config).unwrap();
            let raw = String::from_utf8(call.body.clone().unwrap()).unwrap();
            assert!(raw.contains("What is mitosis?"));
        }
    }

    #[test]
    fn text_request_shape() {
        let adapter = OpenAiCompatibleAdapter::new(Provider::OpenAi);
        let call = adapter
            .build_request(&request_for(Provider::OpenAi), &GatewayConfig::default())
            .unwrap();

        assert_eq!(call.url.as_str(), "https://api.openai.com/v1/chat/completions");
        let body = body_json(&call);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["content"], "What is mitosis?");
        assert_eq!(body["max_tokens"], 4096);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn bearer_auth_header() {
        let adapter = OpenAiCompatibleAdapter::new(Provider::OpenAi);
        let call = adapter
            .build_request(&request_for(Provider::OpenAi), &GatewayConfig::default())
            .unwrap();
        assert!(call
            .headers
            .iter()
            .any(|(name, value)| name == "Authorization" && value == "Bearer sk-test"));
    }

    #[test]
    fn openrouter_adds_identification_headers() {
        let adapter = OpenAiCompatibleAdapter::new(Provider::OpenRouter);
        let call = adapter
            .build_request(&request_for(Provider::OpenRouter), &GatewayConfig::default())
            .unwrap();
        assert!(call.headers.iter().any(|(name, _)| name == "HTTP-Referer"));
        assert!(call.headers.iter().any(|(name, _)| name == "X-Title"));

        let adapter = OpenAiCompatibleAdapter::new(Provider::OpenAi);
        let call = adapter
            .build_request(&request_for(Provider::OpenAi), &GatewayConfig::default())
            .unwrap();
        assert!(!call.headers.iter().any(|(name, _)| name == "HTTP-Referer"));
    }

    #[test]
    fn image_becomes_data_uri_part_with_text_alongside() {
        let request = request_for(Provider::OpenAi)
            .with_image(InlineImage::new(vec![0xFF, 0xD8, 0xFF], "image/jpeg"));
        let adapter = OpenAiCompatibleAdapter::new(Provider::OpenAi);
        let call = adapter
            .build_request(&request, &GatewayConfig::default())
            .unwrap();

        let body = body_json(&call);
        let content = body["messages"][1]["content"].as_array().unwrap();
        assert_eq!(content.len(), 2);
        assert_eq!(content[0]["type"], "image_url");
        let uri = content[0]["image_url"]["url"].as_str().unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert_eq!(content[1]["type"], "text");
        assert_eq!(content[1]["text"], "What is mitosis?");
    }

    #[test]
    fn extract_text_follows_first_choice() {
        let adapter = OpenAiCompatibleAdapter::new(Provider::OpenAi);
        let body = serde_json::json!({
            "id": "chatcmpl-123",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Generated text"}}
            ],
        });
        assert_eq!(adapter.extract_text(&body), Some("Generated text".to_string()));
        assert_eq!(adapter.extract_text(&serde_json::json!({"choices": []})), None);
    }

    #[test]
    fn openai_listing_filters_and_orders_chat_models() {
        let adapter = OpenAiCompatibleAdapter::new(Provider::OpenAi);
        let body = serde_json::json!({"data": [
            {"id": "gpt-4o"},
            {"id": "whisper-1"},
            {"id": "gpt-4o-mini"},
            {"id": "o1-preview"},
            {"id": "dall-e-3"},
        ]});
        let models = adapter.parse_models(&body);
        assert_eq!(models, vec!["o1-preview", "gpt-4o-mini", "gpt-4o"]);
    }

    #[test]
    fn openrouter_listing_puts_free_models_first() {
        let adapter = OpenAiCompatibleAdapter::new(Provider::OpenRouter);
        let body = serde_json::json!({"data": [
            {"id": "anthropic/claude-3.5-sonnet", "pricing": {"prompt": "0.000003", "completion": "0.000015"}},
            {"id": "meta-llama/llama-3-8b:free"},
            {"id": "some/obscure-model", "pricing": {"prompt": "0.01", "completion": "0.01"}},
            {"id": "mistralai/mistral-7b", "pricing": {"prompt": "0", "completion": "0"}},
        ]});
        let models = adapter.parse_models(&body);
        assert_eq!(
            models,
            vec![
                "meta-llama/llama-3-8b:free",
                "mistralai/mistral-7b",
                "anthropic/claude-3.5-sonnet",
            ]
        );
    }

    #[test]
    fn grok_listing_takes_all_ids_and_has_static_fallback() {
        let adapter = OpenAiCompatibleAdapter::new(Provider::XaiGrok);
        let body = serde_json::json!({"data": [{"id": "grok-2"}, {"id": "grok-beta"}]});
        assert_eq!(adapter.parse_models(&body), vec!["grok-2", "grok-beta"]);
        assert_eq!(
            adapter.fallback_models(),
            vec!["grok-2", "grok-2-mini", "grok-beta"]
        );
        assert!(OpenAiCompatibleAdapter::new(Provider::OpenAi)
            .fallback_models()
            .is_empty());
    }
}
