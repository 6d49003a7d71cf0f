use thiserror::Error;

/// Errors from parsing or validating a monthly token amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateError {
    /// The input is not a valid decimal numeral (or has more fractional
    /// digits than the token's smallest unit can represent).
    #[error("Not a valid token amount: {0}")]
    InvalidAmount(String),

    /// Streamed amounts must be positive.
    #[error("Token amount must not be negative")]
    Negative,
}

/// Errors from parsing an account or contract address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address must start with 0x: {0}")]
    MissingPrefix(String),

    #[error("Address must be 40 hex characters: {0}")]
    BadLength(String),

    #[error("Address contains a non-hex character: {0}")]
    BadCharacter(String),
}
