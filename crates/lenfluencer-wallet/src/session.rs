//! Wallet connection and network alignment.
//!
//! Connecting walks a small state machine:
//!
//! ```text
//! Disconnected -> Connecting -> (NetworkMismatch ->) Connected
//!                           \-> Error
//! ```
//!
//! `NetworkMismatch` is transient: the session asks the wallet to switch
//! to the target chain, registers the chain first if the wallet does not
//! know it (error code 4902), and retries the switch. Both steps are
//! best-effort; their failure becomes a warning on the connected
//! session, never a hard connect failure.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::{info, warn};

use lenfluencer_shared::constants::{CFA_FORWARDER_ADDRESS, UNKNOWN_CHAIN_ERROR_CODE};
use lenfluencer_shared::Address;

use crate::error::{Result, WalletError};
use crate::forwarder::Forwarder;
use crate::network::{parse_chain_id, ChainDescriptor};
use crate::provider::EthereumProvider;

/// Connection lifecycle states. `Connected` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    NetworkMismatch,
    Connected,
    Error,
}

/// Fixed parameters of a wallet session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub chain: ChainDescriptor,
    pub forwarder_address: Address,
    pub receipt_poll_interval: Duration,
    pub receipt_poll_attempts: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chain: ChainDescriptor::target(),
            forwarder_address: CFA_FORWARDER_ADDRESS
                .parse()
                .expect("forwarder constant is a valid address"),
            receipt_poll_interval: Duration::from_secs(2),
            receipt_poll_attempts: 120,
        }
    }
}

/// An ephemeral wallet session: the connected account, a possible
/// network warning, and the signer-bound forwarder handle. Created on
/// explicit user action, dropped on page teardown; nothing persists.
#[derive(Clone)]
pub struct WalletSession {
    account: Address,
    state: SessionState,
    warning: Option<String>,
    forwarder: Forwarder,
}

impl WalletSession {
    /// Connect to the injected wallet and align it with the target
    /// network.
    ///
    /// `provider` is `None` when no wallet is injected, which fails with
    /// [`WalletError::NoProvider`]. An empty account list is treated the
    /// same way. Network switch/add failures do not fail the connect;
    /// they are reported through [`WalletSession::warning`].
    pub async fn connect(
        provider: Option<Arc<dyn EthereumProvider>>,
        config: SessionConfig,
    ) -> Result<Self> {
        let provider = provider.ok_or(WalletError::NoProvider)?;

        info!("Connecting wallet");
        let accounts = provider.request("eth_requestAccounts", json!([])).await?;

        let account: Address = accounts
            .as_array()
            .and_then(|a| a.first())
            .and_then(Value::as_str)
            .ok_or(WalletError::NoProvider)?
            .parse()?;

        let warning = match ensure_chain(provider.as_ref(), &config.chain).await {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Could not align wallet network, continuing");
                Some(e.to_string())
            }
        };

        info!(account = %account, "Wallet connected");

        let forwarder = Forwarder::new(
            provider,
            config.forwarder_address,
            account.clone(),
            config.receipt_poll_interval,
            config.receipt_poll_attempts,
        );

        Ok(Self {
            account,
            state: SessionState::Connected,
            warning,
            forwarder,
        })
    }

    /// The connected account, lowercase-normalized.
    pub fn account(&self) -> &Address {
        &self.account
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// A non-fatal network warning raised during connect, if any.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// The signer-bound flow-management contract handle.
    pub fn forwarder(&self) -> &Forwarder {
        &self.forwarder
    }
}

/// Check the wallet's active chain and move it to `chain` if needed.
///
/// Any failure comes back as [`WalletError::NetworkSwitchFailed`]; the
/// caller decides that it is non-fatal.
async fn ensure_chain(provider: &dyn EthereumProvider, chain: &ChainDescriptor) -> Result<()> {
    let current = provider
        .request("eth_chainId", json!([]))
        .await
        .map_err(|e| WalletError::NetworkSwitchFailed(e.to_string()))?;

    let current_id = current.as_str().and_then(parse_chain_id);
    if current_id == Some(chain.id()) {
        return Ok(());
    }

    info!(
        current = ?current_id,
        target = chain.id(),
        "Wallet is on the wrong network, requesting switch"
    );

    match switch_chain(provider, chain).await {
        Ok(()) => Ok(()),
        Err(e) if e.code == Some(UNKNOWN_CHAIN_ERROR_CODE) => {
            // The wallet does not know the chain yet; register it with
            // the fixed descriptor and retry the switch.
            info!(chain = %chain.chain_name, "Registering network with wallet");
            provider
                .request("wallet_addEthereumChain", json!([chain]))
                .await
                .map_err(|e| WalletError::NetworkSwitchFailed(e.to_string()))?;

            switch_chain(provider, chain)
                .await
                .map_err(|e| WalletError::NetworkSwitchFailed(e.to_string()))
        }
        Err(e) => Err(WalletError::NetworkSwitchFailed(e.to_string())),
    }
}

async fn switch_chain(
    provider: &dyn EthereumProvider,
    chain: &ChainDescriptor,
) -> std::result::Result<(), crate::provider::ProviderError> {
    provider
        .request(
            "wallet_switchEthereumChain",
            json!([{ "chainId": chain.chain_id }]),
        )
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider replaying a script of responses and recording every
    /// method it was asked for.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<std::result::Result<Value, ProviderError>>>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl ScriptedProvider {
        fn new(
            responses: Vec<std::result::Result<Value, ProviderError>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn methods(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
        }
    }

    #[async_trait]
    impl EthereumProvider for ScriptedProvider {
        async fn request(&self, method: &str, params: Value) -> std::result::Result<Value, ProviderError> {
            self.calls.lock().unwrap().push((method.to_string(), params));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::new(None, "script exhausted")))
        }
    }

    const ACCOUNT: &str = "0xAbCd111111111111111111111111111111111111";

    fn config() -> SessionConfig {
        SessionConfig {
            receipt_poll_interval: Duration::from_millis(1),
            ..SessionConfig::default()
        }
    }

    #[tokio::test]
    async fn test_connect_without_provider_fails() {
        match WalletSession::connect(None, config()).await {
            Err(WalletError::NoProvider) => {}
            other => panic!("expected NoProvider, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_connect_on_target_chain() {
        let provider = ScriptedProvider::new(vec![
            Ok(json!([ACCOUNT])),
            Ok(json!("0x13881")),
        ]);

        let session = WalletSession::connect(Some(provider.clone()), config())
            .await
            .unwrap();

        assert_eq!(session.account().as_str(), ACCOUNT.to_lowercase());
        assert_eq!(session.state(), SessionState::Connected);
        assert!(session.warning().is_none());
        assert_eq!(provider.methods(), vec!["eth_requestAccounts", "eth_chainId"]);
    }

    #[tokio::test]
    async fn test_connect_switches_networks() {
        let provider = ScriptedProvider::new(vec![
            Ok(json!([ACCOUNT])),
            Ok(json!("0x1")),
            Ok(Value::Null), // switch succeeds
        ]);

        let session = WalletSession::connect(Some(provider.clone()), config())
            .await
            .unwrap();

        assert!(session.warning().is_none());
        assert_eq!(
            provider.methods(),
            vec!["eth_requestAccounts", "eth_chainId", "wallet_switchEthereumChain"]
        );
    }

    #[tokio::test]
    async fn test_unknown_chain_is_added_then_switch_retried() {
        let provider = ScriptedProvider::new(vec![
            Ok(json!([ACCOUNT])),
            Ok(json!("0x1")),
            Err(ProviderError::new(Some(UNKNOWN_CHAIN_ERROR_CODE), "unknown chain")),
            Ok(Value::Null), // addEthereumChain
            Ok(Value::Null), // retried switch
        ]);

        let session = WalletSession::connect(Some(provider.clone()), config())
            .await
            .unwrap();

        assert!(session.warning().is_none());
        assert_eq!(
            provider.methods(),
            vec![
                "eth_requestAccounts",
                "eth_chainId",
                "wallet_switchEthereumChain",
                "wallet_addEthereumChain",
                "wallet_switchEthereumChain",
            ]
        );

        // The add request carries the full fixed descriptor.
        let calls = provider.calls.lock().unwrap();
        let add_params = &calls[3].1;
        assert_eq!(add_params[0]["chainId"], "0x13881");
        assert_eq!(add_params[0]["nativeCurrency"]["symbol"], "MATIC");
    }

    #[tokio::test]
    async fn test_switch_failure_is_nonfatal_warning() {
        let provider = ScriptedProvider::new(vec![
            Ok(json!([ACCOUNT])),
            Ok(json!("0x1")),
            Err(ProviderError::new(Some(4001), "user rejected")),
        ]);

        let session = WalletSession::connect(Some(provider), config())
            .await
            .unwrap();

        assert_eq!(session.state(), SessionState::Connected);
        assert!(session.warning().unwrap().contains("user rejected"));
    }

    #[tokio::test]
    async fn test_empty_account_list_is_no_provider() {
        let provider = ScriptedProvider::new(vec![Ok(json!([]))]);

        assert!(matches!(
            WalletSession::connect(Some(provider), config()).await,
            Err(WalletError::NoProvider)
        ));
    }
}
