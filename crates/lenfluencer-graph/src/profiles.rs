//! Profile lookup against the Lens GraphQL API.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use lenfluencer_shared::constants::HANDLE_SUFFIX;
use lenfluencer_shared::{Address, MediaRef, Profile, ProfileStats};

use crate::error::{GraphError, Result};
use crate::transport::GraphTransport;

/// Query for a profile by handle, including media references and stats.
const PROFILES_QUERY: &str = r#"
query profiles($request: ProfileQueryRequest!) {
  profiles(request: $request) {
    items {
      id
      name
      handle
      bio
      ownedBy
      coverPicture {
        ... on NftImage {
          uri
        }
        ... on MediaSet {
          original {
            url
          }
        }
      }
      picture {
        ... on NftImage {
          uri
        }
        ... on MediaSet {
          original {
            url
          }
        }
      }
      stats {
        totalFollowers
        totalFollowing
        totalPosts
      }
    }
  }
}
"#;

/// Append the handle domain suffix if the input does not carry it yet.
pub fn normalize_handle(handle: &str) -> String {
    let trimmed = handle.trim();
    if trimmed.ends_with(HANDLE_SUFFIX) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{HANDLE_SUFFIX}")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileItem {
    id: String,
    name: Option<String>,
    handle: String,
    bio: Option<String>,
    owned_by: Address,
    #[serde(default)]
    cover_picture: Option<MediaRef>,
    #[serde(default)]
    picture: Option<MediaRef>,
    #[serde(default)]
    stats: ProfileStats,
}

impl From<ProfileItem> for Profile {
    fn from(item: ProfileItem) -> Self {
        Profile {
            id: item.id,
            name: item.name,
            handle: item.handle,
            bio: item.bio,
            owned_by: item.owned_by,
            cover_picture: item.cover_picture,
            picture: item.picture,
            stats: item.stats,
        }
    }
}

/// Client for the profile-query API. No retries, no caching: every call
/// re-fetches.
pub struct ProfileClient {
    transport: Arc<dyn GraphTransport>,
}

impl ProfileClient {
    pub fn new(transport: Arc<dyn GraphTransport>) -> Self {
        Self { transport }
    }

    /// Look up a single profile by handle.
    ///
    /// The handle is suffix-normalized first (`alice` queries
    /// `alice.lens`). An empty result set is [`GraphError::NotFound`].
    pub async fn fetch_profile(&self, handle: &str) -> Result<Profile> {
        let normalized = normalize_handle(handle);
        debug!(handle = %normalized, "Fetching profile");

        let variables = json!({
            "request": {
                "limit": 1,
                "handles": [normalized],
            }
        });

        let data = self.transport.execute(PROFILES_QUERY, variables).await?;
        decode_first_profile(data)
    }
}

/// Decode `data.profiles.items[0]`, mapping an empty list to NotFound.
fn decode_first_profile(data: Value) -> Result<Profile> {
    let items = data
        .pointer("/profiles/items")
        .and_then(Value::as_array)
        .ok_or_else(|| GraphError::Decode("missing profiles.items".into()))?;

    let first = items.first().ok_or(GraphError::NotFound)?;

    let item: ProfileItem = serde_json::from_value(first.clone())
        .map_err(|e| GraphError::Decode(e.to_string()))?;

    Ok(item.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Transport that records the variables it was called with and
    /// replays a canned response.
    struct CannedTransport {
        response: Value,
        seen_variables: Mutex<Vec<Value>>,
    }

    impl CannedTransport {
        fn new(response: Value) -> Arc<Self> {
            Arc::new(Self {
                response,
                seen_variables: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GraphTransport for CannedTransport {
        async fn execute(&self, _query: &str, variables: Value) -> Result<Value> {
            self.seen_variables.lock().unwrap().push(variables);
            Ok(self.response.clone())
        }
    }

    fn stani_item() -> Value {
        json!({
            "id": "0x05",
            "name": "Stani Kulechov",
            "handle": "stani.lens",
            "bio": "Building",
            "ownedBy": "0x7241DDDec3A6aF367882eAF9651b87E1C7549Dff",
            "coverPicture": { "original": { "url": "https://cdn/cover.jpg" } },
            "picture": { "uri": "ipfs://bafyavatar" },
            "stats": { "totalFollowers": 91821, "totalFollowing": 243, "totalPosts": 197 }
        })
    }

    #[test]
    fn test_normalize_handle_appends_suffix_once() {
        assert_eq!(normalize_handle("alice"), "alice.lens");
        assert_eq!(normalize_handle("alice.lens"), "alice.lens");
        assert_eq!(normalize_handle("  alice "), "alice.lens");
    }

    #[tokio::test]
    async fn test_fetch_profile_queries_normalized_handle() {
        let transport = CannedTransport::new(json!({ "profiles": { "items": [stani_item()] } }));
        let client = ProfileClient::new(transport.clone());

        let profile = client.fetch_profile("stani").await.unwrap();

        let seen = transport.seen_variables.lock().unwrap();
        assert_eq!(seen[0]["request"]["handles"][0], "stani.lens");
        assert_eq!(profile.handle, "stani.lens");
        // Owner address is lowercase-normalized on decode.
        assert_eq!(
            profile.owned_by.as_str(),
            "0x7241dddec3a6af367882eaf9651b87e1c7549dff"
        );
        assert_eq!(profile.stats.total_followers, 91821);
        assert_eq!(profile.picture.as_ref().unwrap().url(), "ipfs://bafyavatar");
        assert_eq!(
            profile.cover_picture.as_ref().unwrap().url(),
            "https://cdn/cover.jpg"
        );
    }

    #[tokio::test]
    async fn test_fetch_profile_empty_items_is_not_found() {
        let transport = CannedTransport::new(json!({ "profiles": { "items": [] } }));
        let client = ProfileClient::new(transport);

        match client.fetch_profile("nobody").await {
            Err(GraphError::NotFound) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_profile_bad_shape_is_decode_error() {
        let transport = CannedTransport::new(json!({ "profiles": {} }));
        let client = ProfileClient::new(transport);

        assert!(matches!(
            client.fetch_profile("x").await,
            Err(GraphError::Decode(_))
        ));
    }
}
