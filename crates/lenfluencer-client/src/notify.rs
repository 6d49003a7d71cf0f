//! User-facing notifications (toasts).
//!
//! Every failure ends here as a message; nothing is retried and nothing
//! crashes the page. The shell renders whatever notice an operation
//! produced and stays interactive.

use serde::Serialize;

use lenfluencer_graph::GraphError;
use lenfluencer_wallet::WalletError;

use crate::sponsor::SponsorError;

/// A message for the user, tagged with its severity.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice::Warning(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    /// Notice for a failed lookup or listing.
    pub fn from_graph_error(e: &GraphError) -> Self {
        match e {
            GraphError::NotFound => Notice::error("No profile found for that handle"),
            _ => Notice::error("Something went wrong. Is the service running?"),
        }
    }

    /// Notice for a failed wallet operation. Network alignment issues
    /// are warnings; everything else is an error.
    pub fn from_wallet_error(e: &WalletError) -> Self {
        match e {
            WalletError::NoProvider => {
                Notice::error("No wallet found. Install a browser wallet to sponsor.")
            }
            WalletError::NetworkSwitchFailed(msg) => {
                Notice::warning(format!("Could not switch network: {msg}"))
            }
            other => Notice::error(other.to_string()),
        }
    }

    /// Notice for a failed sponsorship operation.
    pub fn from_sponsor_error(e: &SponsorError) -> Self {
        match e {
            SponsorError::InvalidRate(msg) => Notice::error(format!("Invalid rate: {msg}")),
            SponsorError::Wallet(inner) => Self::from_wallet_error(inner),
        }
    }
}
