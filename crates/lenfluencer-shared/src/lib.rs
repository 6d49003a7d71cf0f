//! Shared domain types and pure helpers for the Lenfluencer client.
//!
//! Everything here is side-effect free: addresses, profiles, streams,
//! flow-rate unit conversion, and media URL resolution. The network
//! crates (`lenfluencer-graph`, `lenfluencer-wallet`) build on these.

pub mod constants;
pub mod error;
pub mod flowrate;
pub mod media;
pub mod types;

pub use error::{AddressError, RateError};
pub use flowrate::FlowRate;
pub use types::{Address, MediaRef, MediaUrl, Profile, ProfileStats, Stream};
