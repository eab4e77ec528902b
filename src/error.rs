//! Local error type for failures that happen before or outside an API call.
//!
//! Failures reported by the provider APIs themselves are not errors in this
//! sense; they are normalized into
//! [`ErrorClassification`](crate::classify::ErrorClassification) values and
//! carried inside [`GenerationResult`](crate::types::GenerationResult).

use crate::classify::ErrorClassification;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid endpoint URL '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("unknown AI provider '{0}'")]
    UnknownProvider(String),

    #[error("unknown content type '{0}'")]
    UnknownContentKind(String),

    /// An API call failed with a classified provider error. Used by calls
    /// such as model listing that have no dedicated result type.
    #[error("{}", .0.message)]
    Api(ErrorClassification),
}
