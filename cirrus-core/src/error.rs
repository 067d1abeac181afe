//! Error taxonomy for graph construction
//!
//! Three failure classes exist: the supernet CIDR is unusable, a required
//! input is missing, or the availability-zone lookup failed. The builder
//! performs no local recovery; every error aborts the current build and is
//! surfaced to the caller unchanged.

use thiserror::Error;

/// A CIDR block that cannot be used as requested
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidNetworkError {
    /// Input is not parseable as an IPv4 CIDR block
    #[error("'{0}' is not a valid CIDR block")]
    Malformed(String),

    /// Prefix length outside 0..=32
    #[error("prefix length /{0} must be between 0 and 32")]
    PrefixLength(u8),

    /// Address bits set below the network mask (strict parsing)
    #[error("'{0}' has host bits set")]
    HostBits(String),

    /// The supernet cannot supply the requested number of /24 blocks
    #[error("{supernet} holds {available} /24 subnets but {requested} were requested")]
    InsufficientSpace {
        supernet: String,
        available: usize,
        requested: usize,
    },
}

/// Opaque failure from an availability-zone lookup
///
/// The core never inspects this beyond displaying it; whatever the resolver
/// reports (network error, credentials, unknown region) passes through to
/// the builder's caller unchanged.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResolverError {
    pub message: String,
    #[source]
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ResolverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

/// Error returned by [`GraphBuilder::build`](crate::builder::GraphBuilder::build)
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    InvalidNetwork(#[from] InvalidNetworkError),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("availability zone lookup failed: {0}")]
    Resolver(#[from] ResolverError),
}
