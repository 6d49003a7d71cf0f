//! Application state shared with the presentation layer.
//!
//! [`AppState`] is an explicit immutable snapshot: operations take the
//! current snapshot and return a new one rather than mutating ambient
//! globals. Overlapping in-flight operations are allowed; whichever
//! snapshot the shell applies last wins.

use lenfluencer_shared::{Profile, Stream};
use lenfluencer_wallet::WalletSession;

/// One snapshot of everything the page shows.
#[derive(Clone)]
pub struct AppState {
    /// The profile found by the last successful lookup.
    pub profile: Option<Profile>,

    /// Streams toward the profile owner, newest first.
    pub streams: Vec<Stream>,

    /// The connected wallet session, if the user has connected.
    /// Dropped with the page; never persisted.
    pub session: Option<WalletSession>,

    /// Whether the stream table shows all senders or only the
    /// connected account's own sponsorships.
    pub show_all_senders: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            profile: None,
            streams: Vec::new(),
            session: None,
            show_all_senders: true,
        }
    }

    pub fn with_session(self, session: WalletSession) -> Self {
        Self {
            session: Some(session),
            ..self
        }
    }

    pub fn with_show_all_senders(self, show_all: bool) -> Self {
        Self {
            show_all_senders: show_all,
            ..self
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
