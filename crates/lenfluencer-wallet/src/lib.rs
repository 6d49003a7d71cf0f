//! Wallet session management and the forwarder contract handle.
//!
//! Everything that touches the user's wallet lives here: requesting
//! account access, keeping the wallet on the expected network (switching
//! or registering it when absent), and sending the three flow-management
//! transactions through the fixed forwarder contract.

pub mod error;
pub mod forwarder;
pub mod network;
pub mod provider;
pub mod session;

pub use error::{Result, WalletError};
pub use forwarder::Forwarder;
pub use network::{ChainDescriptor, NativeCurrency};
pub use provider::{EthereumProvider, HttpProvider, ProviderError};
pub use session::{SessionConfig, SessionState, WalletSession};
