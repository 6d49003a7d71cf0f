//! Profile lookup and stream-table refresh.
//!
//! Each operation takes the current [`AppState`] and returns a new
//! snapshot. Nothing here sequences overlapping calls; a shell that
//! fires two lookups applies whichever snapshot resolves last.

use std::sync::Arc;

use tracing::warn;

use lenfluencer_graph::{
    GraphError, HttpTransport, ProfileClient, StreamClient, StreamFilter,
};
use lenfluencer_shared::Address;

use crate::config::ClientConfig;
use crate::state::AppState;

/// The two read services behind the page.
pub struct Services {
    pub profiles: ProfileClient,
    pub streams: StreamClient,
}

impl Services {
    /// Build reqwest-backed clients for the configured endpoints.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            profiles: ProfileClient::new(Arc::new(HttpTransport::new(&config.lens_api_url))),
            streams: StreamClient::new(Arc::new(HttpTransport::new(&config.stream_subgraph_url))),
        }
    }
}

/// Look up a profile by handle and load its incoming streams.
///
/// A failed profile lookup surfaces as an error (the page shows the
/// not-found or service toast). A failed stream listing degrades to an
/// empty table on an otherwise successful lookup.
pub async fn lookup(
    services: &Services,
    token: &Address,
    state: &AppState,
    handle: &str,
) -> Result<AppState, GraphError> {
    let profile = services.profiles.fetch_profile(handle).await?;

    let next = AppState {
        profile: Some(profile),
        ..state.clone()
    };

    match refresh_streams(services, token, &next).await {
        Ok(refreshed) => Ok(refreshed),
        Err(e) => {
            warn!(error = %e, "Stream listing failed, showing empty table");
            Ok(AppState {
                streams: Vec::new(),
                ..next
            })
        }
    }
}

/// Re-query the stream table for the current profile.
///
/// With `show_all_senders` set the listing covers every sender;
/// otherwise it is restricted to the connected account (no session
/// means an empty restricted table would be meaningless, so the
/// unrestricted listing is used then too).
pub async fn refresh_streams(
    services: &Services,
    token: &Address,
    state: &AppState,
) -> Result<AppState, GraphError> {
    let Some(profile) = &state.profile else {
        return Ok(state.clone());
    };

    let mut filter = StreamFilter::active(token.clone(), profile.owned_by.clone());
    if !state.show_all_senders {
        if let Some(session) = &state.session {
            filter = filter.from_sender(session.account().clone());
        }
    }

    let streams = services.streams.list_streams(&filter).await?;
    Ok(AppState {
        streams,
        ..state.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lenfluencer_graph::GraphTransport;
    use serde_json::{json, Value};
    use std::sync::Mutex;

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
        async fn execute(
            &self,
            _query: &str,
            variables: Value,
        ) -> lenfluencer_graph::Result<Value> {
            self.seen_variables.lock().unwrap().push(variables);
            Ok(self.response.clone())
        }
    }

    fn token() -> Address {
        "0x42bb40bf79730451b11f6de1cba222f17b87afd7".parse().unwrap()
    }

    #[tokio::test]
    async fn test_lookup_queries_streams_with_lowercased_owner() {
        // Owner comes back from the profile API in checksum case; the
        // stream subgraph must be queried with the lowercase form.
        let profile_transport = CannedTransport::new(json!({
            "profiles": { "items": [{
                "id": "0x01",
                "name": "Alice",
                "handle": "alice.lens",
                "bio": null,
                "ownedBy": "0xABCdef0123456789ABCdef0123456789ABCdef01",
                "stats": { "totalFollowers": 1, "totalFollowing": 2, "totalPosts": 3 }
            }] }
        }));
        let stream_transport = CannedTransport::new(json!({ "streams": [] }));

        let services = Services {
            profiles: ProfileClient::new(profile_transport.clone()),
            streams: StreamClient::new(stream_transport.clone()),
        };

        let state = lookup(&services, &token(), &AppState::new(), "alice")
            .await
            .unwrap();

        // Lookup used the suffixed handle.
        let profile_vars = profile_transport.seen_variables.lock().unwrap();
        assert_eq!(profile_vars[0]["request"]["handles"][0], "alice.lens");

        // Stream query used the lowercased owner and the active filter.
        let stream_vars = stream_transport.seen_variables.lock().unwrap();
        assert_eq!(
            stream_vars[0]["where"]["receiver"],
            "0xabcdef0123456789abcdef0123456789abcdef01"
        );
        assert_eq!(stream_vars[0]["where"]["currentFlowRate_gt"], "0");
        assert!(stream_vars[0]["where"].get("sender").is_none());

        assert_eq!(state.profile.unwrap().handle, "alice.lens");
        assert!(state.streams.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_survives_stream_service_failure() {
        struct FailingTransport;

        #[async_trait]
        impl GraphTransport for FailingTransport {
            async fn execute(
                &self,
                _query: &str,
                _variables: Value,
            ) -> lenfluencer_graph::Result<Value> {
                Err(GraphError::Service("subgraph down".into()))
            }
        }

        let profile_transport = CannedTransport::new(json!({
            "profiles": { "items": [{
                "id": "0x01",
                "name": null,
                "handle": "alice.lens",
                "bio": null,
                "ownedBy": "0xabcdef0123456789abcdef0123456789abcdef01",
                "stats": { "totalFollowers": 0, "totalFollowing": 0, "totalPosts": 0 }
            }] }
        }));

        let services = Services {
            profiles: ProfileClient::new(profile_transport),
            streams: StreamClient::new(Arc::new(FailingTransport)),
        };

        let state = lookup(&services, &token(), &AppState::new(), "alice")
            .await
            .unwrap();

        assert!(state.profile.is_some());
        assert!(state.streams.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_not_found_propagates() {
        let profile_transport = CannedTransport::new(json!({ "profiles": { "items": [] } }));
        let stream_transport = CannedTransport::new(json!({ "streams": [] }));

        let services = Services {
            profiles: ProfileClient::new(profile_transport),
            streams: StreamClient::new(stream_transport),
        };

        assert!(matches!(
            lookup(&services, &token(), &AppState::new(), "nobody").await,
            Err(GraphError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_refresh_without_profile_is_identity() {
        let stream_transport = CannedTransport::new(json!({ "streams": [] }));
        let services = Services {
            profiles: ProfileClient::new(CannedTransport::new(Value::Null)),
            streams: StreamClient::new(stream_transport.clone()),
        };

        let state = refresh_streams(&services, &token(), &AppState::new())
            .await
            .unwrap();

        assert!(state.profile.is_none());
        assert!(stream_transport.seen_variables.lock().unwrap().is_empty());
    }
}
