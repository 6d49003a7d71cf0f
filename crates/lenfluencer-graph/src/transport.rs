//! Pluggable GraphQL transport.
//!
//! The clients are written against [`GraphTransport`] so tests can
//! script responses without a network; [`HttpTransport`] is the real
//! reqwest-backed implementation.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::{GraphError, Result};

/// Executes a GraphQL document against one endpoint and returns the
/// `data` object of the response.
#[async_trait]
pub trait GraphTransport: Send + Sync {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value>;
}

#[derive(Serialize)]
struct GraphRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// reqwest-backed transport posting to a fixed endpoint URL.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl GraphTransport for HttpTransport {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        let body = GraphRequest { query, variables };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;

        // GraphQL reports failures in-band alongside a 200 status.
        if let Some(errors) = payload.get("errors").and_then(Value::as_array) {
            let message = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");
            tracing::warn!(endpoint = %self.endpoint, %message, "GraphQL query failed");
            return Err(GraphError::Service(message));
        }

        payload
            .get("data")
            .cloned()
            .ok_or_else(|| GraphError::Decode("response has no data field".into()))
    }
}
