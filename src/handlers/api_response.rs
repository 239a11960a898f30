//! Request and response envelopes in the API Gateway proxy shape.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::error;

/// An inbound HTTP-style request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl ApiRequest {
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Returns a query parameter, if present.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|q| q.get(name))
            .map(String::as_str)
    }
}

/// An outbound status-coded response with a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl ToString) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// JSON-encodes `body` into a response with the given status.
pub fn api_response<B: Serialize + ?Sized>(status_code: u16, body: &B) -> ApiResponse {
    let (status_code, body) = match serde_json::to_string(body) {
        Ok(body) => (status_code, body),
        Err(e) => {
            error!(error = %e, "Response body does not encode");
            (500, r#"{"error":"internal error"}"#.to_string())
        }
    };
    ApiResponse {
        status_code,
        headers: HashMap::from([("Content-Type".to_string(), "application/json".to_string())]),
        body,
    }
}
