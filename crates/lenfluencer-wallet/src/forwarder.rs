//! Signer-bound handle to the flow forwarder contract.
//!
//! The forwarder exposes exactly three state-mutating operations:
//! create-flow, update-flow, and delete-flow. Each call ABI-encodes its
//! arguments, submits an `eth_sendTransaction` through the session's
//! provider, and blocks the operation (not the caller's runtime) until
//! the receipt lands. There is no cancellation: an abandoned wait is
//! simply dropped with its task.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::aliases::I96;
use alloy_primitives::Bytes;
use alloy_sol_types::{sol, SolCall};
use serde_json::{json, Value};
use tracing::{debug, info};

use lenfluencer_shared::Address;

use crate::error::{Result, WalletError};
use crate::provider::EthereumProvider;

sol! {
    function createFlow(address token, address sender, address receiver, int96 flowrate, bytes userData) external returns (bool);
    function updateFlow(address token, address sender, address receiver, int96 flowrate, bytes userData) external returns (bool);
    function deleteFlow(address token, address sender, address receiver, bytes userData) external returns (bool);
}

/// Forwarder contract bound to one provider, contract address, and
/// sending account.
#[derive(Clone)]
pub struct Forwarder {
    provider: Arc<dyn EthereumProvider>,
    address: Address,
    account: Address,
    poll_interval: Duration,
    poll_attempts: u32,
}

impl Forwarder {
    pub fn new(
        provider: Arc<dyn EthereumProvider>,
        address: Address,
        account: Address,
        poll_interval: Duration,
        poll_attempts: u32,
    ) -> Self {
        Self {
            provider,
            address,
            account,
            poll_interval,
            poll_attempts,
        }
    }

    /// The forwarder contract address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Open a stream of `token` from the bound account to `receiver` at
    /// the given wire flow rate. Returns the transaction hash after
    /// confirmation.
    pub async fn create_flow(
        &self,
        token: &Address,
        receiver: &Address,
        flow_rate_wire: &str,
    ) -> Result<String> {
        let call = createFlowCall {
            token: token.to_alloy(),
            sender: self.account.to_alloy(),
            receiver: receiver.to_alloy(),
            flowrate: parse_rate(flow_rate_wire)?,
            userData: Bytes::new(),
        };
        info!(receiver = %receiver, rate = flow_rate_wire, "Creating flow");
        self.send_and_confirm(call.abi_encode()).await
    }

    /// Change the flow rate of an existing stream.
    pub async fn update_flow(
        &self,
        token: &Address,
        receiver: &Address,
        flow_rate_wire: &str,
    ) -> Result<String> {
        let call = updateFlowCall {
            token: token.to_alloy(),
            sender: self.account.to_alloy(),
            receiver: receiver.to_alloy(),
            flowrate: parse_rate(flow_rate_wire)?,
            userData: Bytes::new(),
        };
        info!(receiver = %receiver, rate = flow_rate_wire, "Updating flow");
        self.send_and_confirm(call.abi_encode()).await
    }

    /// Terminate the stream toward `receiver`.
    pub async fn delete_flow(&self, token: &Address, receiver: &Address) -> Result<String> {
        let call = deleteFlowCall {
            token: token.to_alloy(),
            sender: self.account.to_alloy(),
            receiver: receiver.to_alloy(),
            userData: Bytes::new(),
        };
        info!(receiver = %receiver, "Deleting flow");
        self.send_and_confirm(call.abi_encode()).await
    }

    /// Submit calldata to the forwarder and await the receipt.
    async fn send_and_confirm(&self, calldata: Vec<u8>) -> Result<String> {
        let params = json!([{
            "from": self.account.as_str(),
            "to": self.address.as_str(),
            "data": format!("0x{}", hex::encode(&calldata)),
        }]);

        let result = self
            .provider
            .request("eth_sendTransaction", params)
            .await
            .map_err(|e| WalletError::TransactionFailed {
                reason: "transaction rejected".into(),
                source: Some(e),
            })?;

        let tx_hash = result
            .as_str()
            .ok_or_else(|| WalletError::TransactionFailed {
                reason: "provider returned no transaction hash".into(),
                source: None,
            })?
            .to_string();

        debug!(tx = %tx_hash, "Transaction submitted, awaiting receipt");
        self.wait_for_receipt(&tx_hash).await?;
        info!(tx = %tx_hash, "Transaction confirmed");
        Ok(tx_hash)
    }

    /// Poll for the transaction receipt until it lands or the attempt
    /// budget runs out.
    async fn wait_for_receipt(&self, tx_hash: &str) -> Result<()> {
        for attempt in 0..self.poll_attempts {
            let receipt = self
                .provider
                .request("eth_getTransactionReceipt", json!([tx_hash]))
                .await
                .map_err(|e| WalletError::TransactionFailed {
                    reason: "receipt query failed".into(),
                    source: Some(e),
                })?;

            if !receipt.is_null() {
                let status = receipt.get("status").and_then(Value::as_str).unwrap_or("0x0");
                if status == "0x1" {
                    return Ok(());
                }
                return Err(WalletError::TransactionFailed {
                    reason: format!("transaction reverted (status {status})"),
                    source: None,
                });
            }

            debug!(tx = %tx_hash, attempt, "Receipt not yet available");
            tokio::time::sleep(self.poll_interval).await;
        }

        Err(WalletError::TransactionFailed {
            reason: "confirmation timed out".into(),
            source: None,
        })
    }
}

/// Parse a wire rate into the contract's signed 96-bit type.
fn parse_rate(wire: &str) -> Result<I96> {
    wire.trim()
        .parse::<I96>()
        .map_err(|_| WalletError::RateOutOfRange(wire.to_string()))
}
