use thiserror::Error;

use lenfluencer_shared::AddressError;

use crate::provider::ProviderError;

/// Errors produced by the wallet layer.
#[derive(Error, Debug)]
pub enum WalletError {
    /// No injected wallet provider is available, or the provider handed
    /// back no usable account.
    #[error("No wallet provider available")]
    NoProvider,

    /// The provider rejected a request outright.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Switching or registering the target network failed. Non-fatal:
    /// connect surfaces this as a warning and continues on whatever
    /// network is active.
    #[error("Network switch failed: {0}")]
    NetworkSwitchFailed(String),

    /// Signature rejection, contract revert, or confirmation failure.
    #[error("Transaction failed: {reason}")]
    TransactionFailed {
        reason: String,
        #[source]
        source: Option<ProviderError>,
    },

    /// A malformed address reached the wallet layer.
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// A flow rate that does not fit the contract's signed 96-bit range.
    #[error("Flow rate out of range: {0}")]
    RateOutOfRange(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WalletError>;
