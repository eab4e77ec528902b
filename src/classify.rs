//! Error classifier: maps HTTP status, provider error text, and response
//! headers into a normalized taxonomy with user-facing messages.
//!
//! [`classify`] is a pure function: deterministic for identical inputs, no
//! I/O, no hidden state. Nothing here retries anything; rate-limit recovery
//! is the caller's responsibility, guided by
//! [`ErrorClassification::retry_after_seconds`].

use regex::Regex;
use std::sync::LazyLock;

/// Seconds to suggest waiting when a 429 carries no `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

static RETRY_AFTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)retry-after:\s*(\d+)").expect("retry-after pattern is valid")
});

/// Normalized failure categories, surfaced verbatim to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport-level failure: DNS, TLS, connection reset, timeout.
    Network,
    /// HTTP 429; carries a retry-after hint.
    RateLimited,
    /// HTTP 401/403: invalid, expired, or under-privileged API key.
    Auth,
    /// HTTP 404: the requested model does not exist or is not accessible.
    ModelNotFound,
    /// HTTP 400, subtyped by what the provider complained about.
    Request(RequestErrorKind),
    /// HTTP 5xx; provider detail intentionally suppressed.
    Server,
    /// Anything else.
    Unknown,
}

/// What a 400 response complained about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    /// The source document exceeded the model's context window.
    ContentTooLarge,
    /// The content tripped the provider's safety filters.
    SafetyFiltered,
    Other,
}

/// A classified API failure with a user-facing message.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorClassification {
    pub kind: ErrorKind,
    pub message: String,
    /// HTTP status of the failed exchange; absent for network failures.
    pub status: Option<u16>,
    /// Server-suggested wait before retrying; only set for rate limits.
    pub retry_after_seconds: Option<u64>,
}

impl ErrorClassification {
    /// Classification for a transport-level failure.
    pub fn network(error: impl std::fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Network,
            message: format!("Network error: {error}"),
            status: None,
            retry_after_seconds: None,
        }
    }

    /// Classification for a well-formed HTTP success that contained no
    /// extractable text. Distinct from an API error: the provider accepted
    /// the request but returned nothing usable.
    pub fn empty_response(status: u16) -> Self {
        Self {
            kind: ErrorKind::Unknown,
            message: "AI returned empty response".to_string(),
            status: Some(status),
            retry_after_seconds: None,
        }
    }
}

/// Extract a `Retry-After: <seconds>` value from raw header text,
/// case-insensitively.
fn retry_after_seconds(raw_headers: &str) -> Option<u64> {
    RETRY_AFTER_RE
        .captures(raw_headers)
        .and_then(|caps| caps[1].parse().ok())
}

/// Classify a failed HTTP exchange.
///
/// `provider_message` is the error message already extracted from the
/// provider's response body (see
/// [`ProviderAdapter::extract_error_message`](crate::provider::ProviderAdapter::extract_error_message));
/// `raw_headers` is the raw response header text.
pub fn classify(
    status: u16,
    provider_message: Option<&str>,
    raw_headers: &str,
) -> ErrorClassification {
    let retry_after = retry_after_seconds(raw_headers);

    if status == 429 {
        let wait = retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        let message = match provider_message {
            Some(msg) if msg.contains("quota") => {
                "API quota exceeded. You may need to upgrade your plan or wait until your quota resets."
                    .to_string()
            }
            _ => format!("Rate limit exceeded. Please wait {wait} seconds before trying again."),
        };
        return ErrorClassification {
            kind: ErrorKind::RateLimited,
            message,
            status: Some(status),
            retry_after_seconds: Some(wait),
        };
    }

    if status == 401 || status == 403 {
        let message = match provider_message {
            Some(msg) if msg.contains("incorrect") => {
                "Incorrect API key. Please verify your API key is correct."
            }
            Some(msg) if msg.contains("permission") => {
                "API key lacks permission for this model. Try a different model."
            }
            _ => "Invalid or expired API key. Please check your API key in project settings.",
        };
        return ErrorClassification {
            kind: ErrorKind::Auth,
            message: message.to_string(),
            status: Some(status),
            retry_after_seconds: None,
        };
    }

    if status == 404 {
        return ErrorClassification {
            kind: ErrorKind::ModelNotFound,
            message: "Model not found. The selected model may not be available for your account."
                .to_string(),
            status: Some(status),
            retry_after_seconds: None,
        };
    }

    if status == 400 {
        let (kind, message) = match provider_message {
            Some(msg) => {
                let lowered = msg.to_lowercase();
                if lowered.contains("context") || lowered.contains("token") {
                    (
                        RequestErrorKind::ContentTooLarge,
                        "Document is too large. Try uploading a smaller document.".to_string(),
                    )
                } else if lowered.contains("safety") || lowered.contains("blocked") {
                    (
                        RequestErrorKind::SafetyFiltered,
                        "Content was blocked by safety filters. Try different document content."
                            .to_string(),
                    )
                } else {
                    (RequestErrorKind::Other, msg.to_string())
                }
            }
            None => (
                RequestErrorKind::Other,
                "Bad request. The content may have triggered safety filters.".to_string(),
            ),
        };
        return ErrorClassification {
            kind: ErrorKind::Request(kind),
            message,
            status: Some(status),
            retry_after_seconds: None,
        };
    }

    if status >= 500 {
        return ErrorClassification {
            kind: ErrorKind::Server,
            message: "AI service is temporarily unavailable. Please try again in a few minutes."
                .to_string(),
            status: Some(status),
            retry_after_seconds: None,
        };
    }

    ErrorClassification {
        kind: ErrorKind::Unknown,
        message: provider_message
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unknown API error (HTTP {status})")),
        status: Some(status),
        retry_after_seconds: None,
    }
}
