//! GraphQL clients for the two external read services: the Lens profile
//! API and the Superfluid stream subgraph.
//!
//! Both are thin, retry-free wrappers: every call re-fetches, failures
//! surface to the caller as a [`GraphError`] and are never escalated.

pub mod error;
pub mod profiles;
pub mod streams;
pub mod transport;

pub use error::{GraphError, Result};
pub use profiles::ProfileClient;
pub use streams::{StreamClient, StreamFilter};
pub use transport::{GraphTransport, HttpTransport};
