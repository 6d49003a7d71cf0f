//! Media URL resolution for profile avatars and covers.
//!
//! Profiles reference images through decentralized-storage URIs (ipfs,
//! arweave, raw content hashes) or through the Lens media snapshot CDN.
//! These helpers rewrite all of them to fetchable gateway URLs and fall
//! back to a deterministic stamp.fyi identicon when a profile carries
//! no picture at all.

use crate::constants::{ARWEAVE_GATEWAY, IPFS_GATEWAY, LENS_MEDIA_SNAPSHOT_URL, STAMP_FYI_URL};
use crate::types::{Address, Profile};

/// Rewrite a decentralized-storage URI to a gateway URL.
///
/// Handles `ipfs://`, `ipfs://ipfs/`, `https://ipfs.io/ipfs/`, `ar://`,
/// and a bare IPFS CIDv0 (`Qm` + 44 base58 chars). Anything else passes
/// through unchanged; empty input stays empty.
pub fn sanitize_dstorage_url(uri: &str) -> String {
    if uri.is_empty() {
        return String::new();
    }

    if is_bare_ipfs_hash(uri) {
        return format!("{IPFS_GATEWAY}{uri}");
    }

    uri.replace("https://ipfs.io/ipfs/", IPFS_GATEWAY)
        .replace("ipfs://ipfs/", IPFS_GATEWAY)
        .replace("ipfs://", IPFS_GATEWAY)
        .replace("ar://", ARWEAVE_GATEWAY)
}

/// A CIDv0: "Qm" followed by 44 base58 characters.
fn is_bare_ipfs_hash(s: &str) -> bool {
    s.len() == 46
        && s.starts_with("Qm")
        && s[2..]
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() && !matches!(b, b'0' | b'O' | b'I' | b'l'))
}

/// Insert an ImageKit named transform into a media-snapshot URL.
///
/// URLs outside the snapshot CDN are returned unchanged, as are calls
/// with no transform.
pub fn image_kit(url: &str, transform: Option<&str>) -> String {
    if url.is_empty() {
        return String::new();
    }

    if let Some(name) = transform {
        if url.contains(LENS_MEDIA_SNAPSHOT_URL) {
            if let Some(path) = url.rsplit('/').next() {
                return format!("{LENS_MEDIA_SNAPSHOT_URL}/{name}/{path}");
            }
        }
    }

    url.to_string()
}

/// Deterministic identicon URL for an account address.
pub fn stamp_fyi_url(address: &Address) -> String {
    format!("{STAMP_FYI_URL}/eth:{address}?s=300")
}

/// Resolve a profile's avatar URL: picture if present, otherwise the
/// owner's stamp.fyi identicon.
pub fn avatar_url(profile: &Profile, transform: &str) -> String {
    match &profile.picture {
        Some(media) => image_kit(&sanitize_dstorage_url(media.url()), Some(transform)),
        None => stamp_fyi_url(&profile.owned_by),
    }
}
