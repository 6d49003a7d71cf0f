//! Application layer of the Lenfluencer client.
//!
//! Ties the query clients and the wallet session together behind the
//! sponsorship operations a UI shell invokes: look up a profile, list
//! its incoming streams, and create/update/delete a sponsorship. The
//! shell owns rendering; this crate owns state snapshots and
//! orchestration.

pub mod config;
pub mod notify;
pub mod refresh;
pub mod sponsor;
pub mod state;

pub use config::ClientConfig;
pub use notify::Notice;
pub use refresh::{lookup, refresh_streams, Services};
pub use sponsor::{SponsorError, Sponsorships};
pub use state::AppState;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise structured logging for an embedding shell.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("lenfluencer_client=debug,lenfluencer_graph=debug,lenfluencer_wallet=debug,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
