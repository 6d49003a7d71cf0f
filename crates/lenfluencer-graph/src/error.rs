use thiserror::Error;

/// Errors produced by the query layer.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The lookup returned no match.
    #[error("Not found")]
    NotFound,

    /// The endpoint answered but reported a GraphQL-level error.
    #[error("Service error: {0}")]
    Service(String),

    /// Transport failure reaching the endpoint.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
