//! ZoneResolver - Trait abstracting the availability-zone lookup
//!
//! Resolving a region to its availability zones is the one external call the
//! builder makes. It is injected as a capability so that template generation
//! works against a test double or a fixed zone list without network access.

use std::future::Future;
use std::pin::Pin;

use crate::error::ResolverError;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Region to availability-zone lookup
///
/// The builder depends only on the count and stable ordering of the result,
/// never on the zone names themselves. Implementations must not be relied on
/// to retry or cache; a failure is passed through to the builder's caller
/// unchanged.
pub trait ZoneResolver: Send + Sync {
    /// Ordered availability-zone names for `region`
    fn resolve(&self, region: &str) -> BoxFuture<'_, Result<Vec<String>, ResolverError>>;
}

/// ZoneResolver implementation for Box<dyn ZoneResolver>
/// This enables dynamic dispatch for resolvers
impl ZoneResolver for Box<dyn ZoneResolver> {
    fn resolve(&self, region: &str) -> BoxFuture<'_, Result<Vec<String>, ResolverError>> {
        (**self).resolve(region)
    }
}

/// Resolver returning a fixed zone list, for offline use and tests
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    zones: Vec<String>,
}

impl StaticResolver {
    pub fn new(zones: Vec<String>) -> Self {
        Self { zones }
    }

    /// Synthesizes `count` zone names suffixed a, b, c, ... off the region
    pub fn with_zone_count(region: &str, count: usize) -> Self {
        let zones = (0..count)
            .map(|i| format!("{}{}", region, (b'a' + (i % 26) as u8) as char))
            .collect();
        Self { zones }
    }
}

impl ZoneResolver for StaticResolver {
    fn resolve(&self, _region: &str) -> BoxFuture<'_, Result<Vec<String>, ResolverError>> {
        let zones = self.zones.clone();
        Box::pin(async move { Ok(zones) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_resolver_returns_its_zones() {
        let resolver = StaticResolver::new(vec!["us-east-1a".to_string()]);
        let zones = resolver.resolve("us-east-1").await.unwrap();
        assert_eq!(zones, ["us-east-1a"]);
    }

    #[tokio::test]
    async fn with_zone_count_synthesizes_names() {
        let resolver = StaticResolver::with_zone_count("us-east-1", 3);
        let zones = resolver.resolve("us-east-1").await.unwrap();
        assert_eq!(zones, ["us-east-1a", "us-east-1b", "us-east-1c"]);
    }

    #[tokio::test]
    async fn boxed_resolver_dispatches() {
        let resolver: Box<dyn ZoneResolver> = Box::new(StaticResolver::with_zone_count("eu-west-1", 2));
        let zones = resolver.resolve("eu-west-1").await.unwrap();
        assert_eq!(zones.len(), 2);
    }
}
