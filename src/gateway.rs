//! The gateway facade: one stable contract over five incompatible provider
//! APIs.
//!
//! Control flow for a generation: adapter builds the wire call, the
//! dispatcher executes it once, then either the adapter extracts the
//! generated text (success path) or the classifier normalizes the failure.
//! The gateway holds no mutable state across requests and is safe to share
//! between concurrent callers.

use crate::classify::{ErrorClassification, classify};
use crate::config::GatewayConfig;
use crate::dispatch::{Dispatcher, RawResponse};
use crate::error::GatewayError;
use crate::provider::adapter_for;
use crate::types::{GenerationRequest, GenerationResult, Provider};
use serde_json::Value;
use tracing::{debug, warn};

/// Stateless AI-provider generation gateway.
#[derive(Debug, Clone, Default)]
pub struct Gateway {
    config: GatewayConfig,
    dispatcher: Dispatcher,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            dispatcher: Dispatcher::new(),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Execute one generation request.
    ///
    /// API failures come back as [`GenerationResult::Failure`] with a
    /// normalized classification; the `Err` arm is reserved for local
    /// problems such as a malformed endpoint override. Nothing is retried;
    /// rate-limit recovery belongs to the caller.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GatewayError> {
        let adapter = adapter_for(request.provider);
        let call = adapter.build_request(request, &self.config)?;

        debug!(provider = %request.provider, model = %request.model, "dispatching generation");
        let response = self
            .dispatcher
            .dispatch(&call, self.config.generate_timeout)
            .await;

        let (status, header_text, body) = match response {
            RawResponse::Network { error } => {
                warn!(provider = %request.provider, error = %error, "generation failed at transport level");
                return Ok(GenerationResult::Failure {
                    classification: ErrorClassification::network(error),
                });
            }
            RawResponse::Http {
                status,
                header_text,
                body,
            } => (status, header_text, body),
        };

        let parsed: Option<Value> = serde_json::from_slice(&body).ok();

        if status >= 400 {
            let provider_message = parsed
                .as_ref()
                .and_then(|body| adapter.extract_error_message(body));
            let classification = classify(status, provider_message.as_deref(), &header_text);
            warn!(
                provider = %request.provider,
                status,
                kind = ?classification.kind,
                "generation failed"
            );
            return Ok(GenerationResult::Failure { classification });
        }

        match parsed.as_ref().and_then(|body| adapter.extract_text(body)) {
            Some(text) => Ok(GenerationResult::Success { text }),
            None => {
                warn!(provider = %request.provider, status, "response had no extractable text");
                Ok(GenerationResult::Failure {
                    classification: ErrorClassification::empty_response(status),
                })
            }
        }
    }

    /// List the models available for a provider under the given API key.
    ///
    /// Providers without a listing endpoint (Anthropic) answer from a static
    /// list without a network call; xAI Grok falls back to its static list
    /// when the listing call fails.
    pub async fn list_models(
        &self,
        provider: Provider,
        api_key: &str,
    ) -> Result<Vec<String>, GatewayError> {
        let adapter = adapter_for(provider);
        let Some(call) = adapter.models_call(api_key, &self.config)? else {
            return Ok(adapter.fallback_models());
        };

        debug!(provider = %provider, "fetching model list");
        let response = self.dispatcher.dispatch(&call, self.config.list_timeout).await;

        let classification = match response {
            // Listing accepts exactly 200; anything else is a failure.
            RawResponse::Http { status, body, .. } if status == 200 => {
                let parsed: Option<Value> = serde_json::from_slice(&body).ok();
                return Ok(parsed
                    .as_ref()
                    .map(|body| adapter.parse_models(body))
                    .unwrap_or_default());
            }
            RawResponse::Http {
                status,
                header_text,
                body,
            } => {
                let parsed: Option<Value> = serde_json::from_slice(&body).ok();
                let provider_message = parsed
                    .as_ref()
                    .and_then(|body| adapter.extract_error_message(body));
                classify(status, provider_message.as_deref(), &header_text)
            }
            RawResponse::Network { error } => ErrorClassification::network(error),
        };

        let fallback = adapter.fallback_models();
        if fallback.is_empty() {
            warn!(provider = %provider, kind = ?classification.kind, "model listing failed");
            Err(GatewayError::Api(classification))
        } else {
            warn!(provider = %provider, "model listing failed, using static fallback");
            Ok(fallback)
        }
    }
}
