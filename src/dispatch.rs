//! Single-attempt HTTP dispatch with a bounded timeout.
//!
//! The dispatcher knows nothing about providers: it executes one
//! [`WireCall`] and reports the raw outcome. Transport-level failures (DNS,
//! TLS, connection reset, timeout) become [`RawResponse::Network`]; every
//! completed HTTP exchange, 4xx and 5xx included, is a
//! [`RawResponse::Http`] for the error classifier to interpret. There is no
//! retry loop here and none should be added; retry policy belongs to
//! callers.

use crate::error::GatewayError;
use reqwest::Method;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// A provider-specific HTTP request, produced by an adapter and consumed
/// only by the dispatcher.
#[derive(Debug, Clone)]
pub struct WireCall {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body, for POST calls.
    pub body: Option<Vec<u8>>,
}

impl WireCall {
    /// A GET call with the given headers.
    pub fn get(url: Url, headers: Vec<(String, String)>) -> Self {
        Self {
            method: Method::GET,
            url,
            headers,
            body: None,
        }
    }

    /// A POST call with a JSON-serialized body.
    pub fn post_json<T: Serialize>(
        url: Url,
        headers: Vec<(String, String)>,
        body: &T,
    ) -> Result<Self, GatewayError> {
        Ok(Self {
            method: Method::POST,
            url,
            headers,
            body: Some(serde_json::to_vec(body)?),
        })
    }
}

/// Raw outcome of one dispatch: exactly one of a well-formed HTTP exchange
/// or a network-level failure.
#[derive(Debug, Clone)]
pub enum RawResponse {
    Http {
        status: u16,
        /// Response headers as raw `name: value` lines.
        header_text: String,
        body: Vec<u8>,
    },
    Network {
        error: String,
    },
}

/// Executes wire calls. Holds only a connection pool; no per-request state.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    client: reqwest::Client,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Perform one HTTP exchange, bounded by `timeout`. Never retries.
    pub async fn dispatch(&self, call: &WireCall, timeout: Duration) -> RawResponse {
        let mut request = self
            .client
            .request(call.method.clone(), call.url.clone())
            .timeout(timeout);

        for (name, value) in &call.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &call.body {
            request = request.body(body.clone());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %call.url, error = %err, "transport failure");
                return RawResponse::Network {
                    error: err.to_string(),
                };
            }
        };

        let status = response.status().as_u16();
        let header_text = header_lines(response.headers());

        match response.bytes().await {
            Ok(body) => {
                debug!(url = %call.url, status, bytes = body.len(), "exchange complete");
                RawResponse::Http {
                    status,
                    header_text,
                    body: body.to_vec(),
                }
            }
            Err(err) => {
                warn!(url = %call.url, status, error = %err, "failed reading response body");
                RawResponse::Network {
                    error: err.to_string(),
                }
            }
        }
    }
}

fn header_lines(headers: &reqwest::header::HeaderMap) -> String {
    let mut text = String::new();
    for (name, value) in headers {
        text.push_str(name.as_str());
        text.push_str(": ");
        text.push_str(&String::from_utf8_lossy(value.as_bytes()));
        text.push_str("\r\n");
    }
    text
}
