//! Request gateway.
//!
//! Single chokepoint for outbound calls: builds headers, serializes the
//! body, issues the request, and classifies every outcome into exactly one
//! of success, HTTP error, or network error. No failure escapes this
//! boundary as a panic or raw transport error, which is the contract every
//! caller depends on.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

/// Default message when the transport fails before any response.
pub const ERROR_NETWORK: &str = "Erro de conexão. Verifique sua internet.";
/// Default message when an error body carries no usable text.
pub const ERROR_SERVER: &str = "Erro no servidor. Tente novamente mais tarde.";

/// Uniform result of one API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    /// 2xx with a parsed JSON body.
    Success { status: u16, data: Value },
    /// Non-2xx with a parsed JSON body.
    HttpError { status: u16, message: String },
    /// The call never completed; no status is available.
    NetworkError { message: String },
}

impl ApiOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success { .. })
    }

    /// HTTP status, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiOutcome::Success { status, .. } | ApiOutcome::HttpError { status, .. } => {
                Some(*status)
            }
            ApiOutcome::NetworkError { .. } => None,
        }
    }
}

/// Gateway bound to one API base URL.
pub struct RequestGateway {
    base_url: String,
    client: reqwest::Client,
}

impl RequestGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// POST a JSON body, attaching the bearer token when one is supplied.
    pub async fn post(&self, endpoint: &str, token: Option<&str>, body: &Value) -> ApiOutcome {
        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, endpoint))
            .header(CONTENT_TYPE, "application/json")
            .json(body);

        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(_) => {
                return ApiOutcome::NetworkError {
                    message: ERROR_NETWORK.into(),
                }
            }
        };

        let status = response.status().as_u16();
        let body: Value = match response.json().await {
            Ok(value) => value,
            // A response we cannot read is treated like one that never
            // arrived: no status is reported.
            Err(_) => {
                return ApiOutcome::NetworkError {
                    message: ERROR_NETWORK.into(),
                }
            }
        };

        classify_response(status, body)
    }
}

/// Classify a completed exchange. Pure function over (status, parsed body)
/// so it can be tested without any transport.
pub fn classify_response(status: u16, body: Value) -> ApiOutcome {
    if (200..300).contains(&status) {
        ApiOutcome::Success { status, data: body }
    } else {
        ApiOutcome::HttpError {
            status,
            message: error_message(&body),
        }
    }
}

fn error_message(body: &Value) -> String {
    for key in ["message", "error", "msg"] {
        if let Some(text) = body.get(key).and_then(Value::as_str) {
            return text.to_string();
        }
    }
    ERROR_SERVER.to_string()
}
