//! Core domain types: addresses, profiles, and payment streams.
//!
//! Profiles and streams are read-only projections of the external
//! services; the client never mutates them directly, it only requests
//! changes through signed transactions and re-queries.

use serde::{Deserialize, Serialize};

use crate::error::AddressError;
use crate::flowrate::FlowRate;

/// An EVM account or contract address, lowercase-normalized.
///
/// The stream ledger treats addresses case-insensitively by convention,
/// so every address is lowercased on construction and equality is on
/// the normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// The normalized `0x`-prefixed lowercase hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to the alloy fixed-bytes address for ABI encoding.
    pub fn to_alloy(&self) -> alloy_primitives::Address {
        // Validated at construction, so this cannot fail.
        self.0.parse().unwrap_or(alloy_primitives::Address::ZERO)
    }

    /// Abbreviated `0x1234…abcd` form for display.
    pub fn short(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex_part = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| AddressError::MissingPrefix(s.to_string()))?;

        if hex_part.len() != 40 {
            return Err(AddressError::BadLength(s.to_string()));
        }
        if !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressError::BadCharacter(s.to_string()));
        }

        Ok(Self(format!("0x{}", hex_part.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A profile's cover or avatar image reference.
///
/// The profile API returns one of two shapes for picture fields: an NFT
/// image carrying a direct URI, or a media set whose "original" entry
/// carries the URL. Decoded untagged, resolved through [`MediaRef::url`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MediaRef {
    NftImage { uri: String },
    MediaSet { original: MediaUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaUrl {
    pub url: String,
}

impl MediaRef {
    /// The image URL, whichever variant carries it.
    pub fn url(&self) -> &str {
        match self {
            MediaRef::NftImage { uri } => uri,
            MediaRef::MediaSet { original } => &original.url,
        }
    }
}

/// Aggregate profile statistics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_followers: u64,
    pub total_following: u64,
    pub total_posts: u64,
}

/// A social-graph profile, fetched on demand and never cached beyond
/// the current session.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: Option<String>,
    pub handle: String,
    pub bio: Option<String>,
    /// Account that owns the profile; the receiver of sponsorships.
    pub owned_by: Address,
    pub cover_picture: Option<MediaRef>,
    pub picture: Option<MediaRef>,
    pub stats: ProfileStats,
}

/// A continuous payment stream from `sender` to `receiver`.
///
/// Uniquely keyed by (token, sender, receiver) at the protocol level;
/// the ledger assigns its own `id` on top.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Stream {
    pub id: String,
    pub sender: Address,
    pub receiver: Address,
    pub token: Address,
    pub current_flow_rate: FlowRate,
    /// Unix seconds of stream creation.
    pub created_at: i64,
    /// Unix seconds of the last flow-rate update.
    pub updated_at: i64,
}

impl Stream {
    /// A stream whose rate has dropped to zero is terminated.
    pub fn is_terminated(&self) -> bool {
        self.current_flow_rate.is_zero()
    }

    /// Whether `account` is the sender and may update or delete this
    /// stream. Used by presentation layers to gate the controls; the
    /// chain itself is the actual authority.
    pub fn is_managed_by(&self, account: &Address) -> bool {
        &self.sender == account
    }
}
