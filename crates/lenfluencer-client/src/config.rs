//! Client configuration loaded from environment variables.
//!
//! All settings default to the fixed production endpoints so an
//! embedding shell can start with zero configuration.

use std::time::Duration;

use lenfluencer_shared::constants::{LENS_API_URL, STREAM_SUBGRAPH_URL, SUPER_TOKEN_ADDRESS};
use lenfluencer_shared::Address;
use lenfluencer_wallet::SessionConfig;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Profile API endpoint.
    /// Env: `LENS_API_URL`
    pub lens_api_url: String,

    /// Stream subgraph endpoint.
    /// Env: `STREAM_SUBGRAPH_URL`
    pub stream_subgraph_url: String,

    /// Super token streamed by every sponsorship.
    /// Env: `SUPER_TOKEN_ADDRESS`
    pub super_token: Address,

    /// Wallet session parameters: target chain, forwarder contract,
    /// and receipt polling.
    /// Env: `CFA_FORWARDER_ADDRESS`, `RECEIPT_POLL_MS`, `RECEIPT_POLL_ATTEMPTS`
    pub session: SessionConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            lens_api_url: LENS_API_URL.to_string(),
            stream_subgraph_url: STREAM_SUBGRAPH_URL.to_string(),
            super_token: SUPER_TOKEN_ADDRESS
                .parse()
                .expect("super token constant is a valid address"),
            session: SessionConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults on anything missing or invalid.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("LENS_API_URL") {
            config.lens_api_url = url;
        }

        if let Ok(url) = std::env::var("STREAM_SUBGRAPH_URL") {
            config.stream_subgraph_url = url;
        }

        if let Ok(addr) = std::env::var("SUPER_TOKEN_ADDRESS") {
            match addr.parse() {
                Ok(parsed) => config.super_token = parsed,
                Err(e) => {
                    tracing::warn!(value = %addr, error = %e, "Invalid SUPER_TOKEN_ADDRESS, using default");
                }
            }
        }

        if let Ok(addr) = std::env::var("CFA_FORWARDER_ADDRESS") {
            match addr.parse() {
                Ok(parsed) => config.session.forwarder_address = parsed,
                Err(e) => {
                    tracing::warn!(value = %addr, error = %e, "Invalid CFA_FORWARDER_ADDRESS, using default");
                }
            }
        }

        if let Ok(ms) = std::env::var("RECEIPT_POLL_MS") {
            if let Ok(n) = ms.parse::<u64>() {
                config.session.receipt_poll_interval = Duration::from_millis(n);
            } else {
                tracing::warn!(value = %ms, "Invalid RECEIPT_POLL_MS, using default");
            }
        }

        if let Ok(attempts) = std::env::var("RECEIPT_POLL_ATTEMPTS") {
            if let Ok(n) = attempts.parse::<u32>() {
                config.session.receipt_poll_attempts = n;
            } else {
                tracing::warn!(value = %attempts, "Invalid RECEIPT_POLL_ATTEMPTS, using default");
            }
        }

        config
    }
}
