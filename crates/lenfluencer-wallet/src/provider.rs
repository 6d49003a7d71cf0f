//! The wallet provider abstraction.
//!
//! A browser shell injects its wallet behind [`EthereumProvider`]; the
//! session and forwarder code only ever see the trait. [`HttpProvider`]
//! is a plain JSON-RPC-over-HTTP implementation for non-browser
//! embeddings and for exercising the call paths end to end.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

/// A rejected provider request. `code` carries the wallet convention's
/// numeric error code when one was given (4902 marks an unknown chain).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (code {code:?})")]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// The JSON-RPC-like request surface a browser wallet exposes
/// (`eth_requestAccounts`, `wallet_switchEthereumChain`, ...).
#[async_trait]
pub trait EthereumProvider: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

/// JSON-RPC 2.0 over HTTP against a fixed RPC endpoint.
///
/// Cannot prompt a user, so account-access and chain-management methods
/// only make sense against nodes that accept them (local dev nodes);
/// read and send paths behave like any other provider.
pub struct HttpProvider {
    http: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl HttpProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl EthereumProvider for HttpProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::new(None, e.to_string()))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::new(None, e.to_string()))?;

        if let Some(error) = payload.get("error") {
            return Err(ProviderError::new(
                error.get("code").and_then(Value::as_i64),
                error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown provider error")
                    .to_string(),
            ));
        }

        Ok(payload.get("result").cloned().unwrap_or(Value::Null))
    }
}
