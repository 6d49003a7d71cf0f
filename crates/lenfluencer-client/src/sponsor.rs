//! The sponsorship orchestrator.
//!
//! Validates user intent, converts the monthly rate to the wire form,
//! and drives the matching forwarder call through the wallet session.
//! Each operation blocks on transaction confirmation before reporting.
//!
//! The orchestrator does not re-check that the session account is the
//! stream's sender: the controls are gated by the presentation layer
//! and the chain is the actual authority. See `Stream::is_managed_by`
//! for the gating helper.

use thiserror::Error;
use tracing::info;

use lenfluencer_shared::flowrate::per_second_wire;
use lenfluencer_shared::Address;
use lenfluencer_wallet::{WalletError, WalletSession};

/// Errors produced by sponsorship operations.
#[derive(Error, Debug)]
pub enum SponsorError {
    /// The monthly rate was empty, zero, or not a positive decimal.
    /// Raised before any network call.
    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    /// The underlying wallet or transaction failure.
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SponsorError>;

/// Sponsorship operations bound to the fixed super token.
#[derive(Debug, Clone)]
pub struct Sponsorships {
    token: Address,
}

impl Sponsorships {
    pub fn new(token: Address) -> Self {
        Self { token }
    }

    /// The super token every new sponsorship streams.
    pub fn token(&self) -> &Address {
        &self.token
    }

    /// Open a stream toward `receiver` at `monthly_tokens` per month.
    /// Returns the confirmed transaction hash.
    pub async fn create(
        &self,
        session: &WalletSession,
        receiver: &Address,
        monthly_tokens: &str,
    ) -> Result<String> {
        let wire = validated_wire_rate(monthly_tokens)?;

        info!(receiver = %receiver, monthly = monthly_tokens, "Creating sponsorship");
        let tx = session
            .forwarder()
            .create_flow(&self.token, receiver, &wire)
            .await?;
        Ok(tx)
    }

    /// Change an existing stream of `token` toward `receiver` to a new
    /// monthly rate. The token comes from the stream record, not from
    /// the fixed default, so older streams keep their own token.
    pub async fn update(
        &self,
        session: &WalletSession,
        token: &Address,
        receiver: &Address,
        monthly_tokens: &str,
    ) -> Result<String> {
        let wire = validated_wire_rate(monthly_tokens)?;

        info!(receiver = %receiver, monthly = monthly_tokens, "Updating sponsorship");
        let tx = session
            .forwarder()
            .update_flow(token, receiver, &wire)
            .await?;
        Ok(tx)
    }

    /// Terminate the stream of `token` toward `receiver`.
    pub async fn delete(
        &self,
        session: &WalletSession,
        token: &Address,
        receiver: &Address,
    ) -> Result<String> {
        info!(receiver = %receiver, "Deleting sponsorship");
        let tx = session.forwarder().delete_flow(token, receiver).await?;
        Ok(tx)
    }
}

/// Validate a monthly rate and convert it to the wire form.
///
/// Rejects empty input, non-numerals, and anything whose wire rate
/// floors to zero (a zero-rate flow cannot be created).
fn validated_wire_rate(monthly_tokens: &str) -> Result<String> {
    let trimmed = monthly_tokens.trim();
    if trimmed.is_empty() {
        return Err(SponsorError::InvalidRate("no amount entered".into()));
    }

    let wire = per_second_wire(trimmed).map_err(|e| SponsorError::InvalidRate(e.to_string()))?;

    if wire == "0" {
        return Err(SponsorError::InvalidRate(format!(
            "{trimmed} tokens per month streams at a zero rate"
        )));
    }

    Ok(wire)
}
