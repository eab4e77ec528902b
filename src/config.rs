//! Immutable gateway configuration: provider endpoints, default models, and
//! the two timeout classes.
//!
//! The defaults point at the public provider APIs. Tests and self-hosted
//! deployments can override individual endpoints before handing the config
//! to [`Gateway::new`](crate::gateway::Gateway::new); after that the
//! configuration is never mutated.

use crate::types::Provider;
use std::collections::HashMap;
use std::time::Duration;

/// Endpoints for one provider.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    /// Generation (chat/messages/generateContent) endpoint. For Gemini this
    /// is a base URL the model name is appended to.
    pub generate: String,
    /// Model-listing endpoint, where the provider has one.
    pub models: Option<String>,
}

/// Configuration passed into the gateway at construction.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    endpoints: HashMap<Provider, ProviderEndpoints>,
    default_models: HashMap<Provider, String>,
    /// Bound for lightweight model-listing calls.
    pub list_timeout: Duration,
    /// Bound for generation calls.
    pub generate_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let endpoints = HashMap::from([
            (
                Provider::OpenAi,
                ProviderEndpoints {
                    generate: "https://api.openai.com/v1/chat/completions".to_string(),
                    models: Some("https://api.openai.com/v1/models".to_string()),
                },
            ),
            (
                Provider::Anthropic,
                ProviderEndpoints {
                    generate: "https://api.anthropic.com/v1/messages".to_string(),
                    models: None,
                },
            ),
            (
                Provider::GoogleGemini,
                ProviderEndpoints {
                    generate: "https://generativelanguage.googleapis.com/v1beta/models/"
                        .to_string(),
                    models: Some(
                        "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
                    ),
                },
            ),
            (
                Provider::XaiGrok,
                ProviderEndpoints {
                    generate: "https://api.x.ai/v1/chat/completions".to_string(),
                    models: Some("https://api.x.ai/v1/models".to_string()),
                },
            ),
            (
                Provider::OpenRouter,
                ProviderEndpoints {
                    generate: "https://openrouter.ai/api/v1/chat/completions".to_string(),
                    models: Some("https://openrouter.ai/api/v1/models".to_string()),
                },
            ),
        ]);

        let default_models = HashMap::from([
            (Provider::OpenAi, "gpt-4o-mini".to_string()),
            (Provider::Anthropic, "claude-3-5-sonnet-20241022".to_string()),
            (Provider::GoogleGemini, "gemini-1.5-flash".to_string()),
            (Provider::XaiGrok, "grok-beta".to_string()),
            (Provider::OpenRouter, "openai/gpt-4o-mini".to_string()),
        ]);

        Self {
            endpoints,
            default_models,
            list_timeout: Duration::from_secs(15),
            generate_timeout: Duration::from_secs(120),
        }
    }
}

impl GatewayConfig {
    /// Generation endpoint for a provider.
    pub fn generate_endpoint(&self, provider: Provider) -> &str {
        &self.endpoints[&provider].generate
    }

    /// Model-listing endpoint for a provider, if it has one.
    pub fn models_endpoint(&self, provider: Provider) -> Option<&str> {
        self.endpoints[&provider].models.as_deref()
    }

    /// Default model for a provider.
    pub fn default_model(&self, provider: Provider) -> &str {
        &self.default_models[&provider]
    }

    /// Override the endpoints for one provider.
    pub fn with_endpoints(mut self, provider: Provider, endpoints: ProviderEndpoints) -> Self {
        self.endpoints.insert(provider, endpoints);
        self
    }

    /// Override the generation endpoint for one provider, keeping its
    /// listing endpoint.
    pub fn with_generate_endpoint(mut self, provider: Provider, url: impl Into<String>) -> Self {
        if let Some(entry) = self.endpoints.get_mut(&provider) {
            entry.generate = url.into();
        }
        self
    }

    /// Override the model-listing endpoint for one provider.
    pub fn with_models_endpoint(mut self, provider: Provider, url: impl Into<String>) -> Self {
        if let Some(entry) = self.endpoints.get_mut(&provider) {
            entry.models = Some(url.into());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_provider_has_endpoint_and_default_model() {
        let config = GatewayConfig::default();
        for provider in Provider::ALL {
            assert!(!config.generate_endpoint(provider).is_empty());
            assert!(!config.default_model(provider).is_empty());
        }
    }

    #[test]
    fn anthropic_has_no_listing_endpoint() {
        let config = GatewayConfig::default();
        assert!(config.models_endpoint(Provider::Anthropic).is_none());
        assert!(config.models_endpoint(Provider::OpenAi).is_some());
    }

    #[test]
    fn timeout_classes() {
        let config = GatewayConfig::default();
        assert!(config.list_timeout < config.generate_timeout);
        assert_eq!(config.generate_timeout, Duration::from_secs(120));
    }

    #[test]
    fn endpoint_override() {
        let config = GatewayConfig::default()
            .with_generate_endpoint(Provider::OpenAi, "http://localhost:8080/v1/chat");
        assert_eq!(
            config.generate_endpoint(Provider::OpenAi),
            "http://localhost:8080/v1/chat"
        );
        // Listing endpoint untouched by the generate override.
        assert!(config.models_endpoint(Provider::OpenAi).is_some());
    }
}
