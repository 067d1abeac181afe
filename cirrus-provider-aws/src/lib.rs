//! Cirrus AWS Provider
//!
//! Live availability-zone lookup backed by the EC2 API.

use aws_config::Region;
use aws_sdk_ec2::Client as Ec2Client;
use cirrus_core::error::ResolverError;
use cirrus_core::resolver::{BoxFuture, ZoneResolver};
use log::debug;

/// ZoneResolver backed by EC2 `DescribeAvailabilityZones`
///
/// A fresh client is configured for the requested region on every call. The
/// resolver holds no state, performs no retries and caches nothing; any SDK
/// failure (credentials, network, unknown region) surfaces as a
/// [`ResolverError`] to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ec2ZoneResolver;

impl Ec2ZoneResolver {
    pub fn new() -> Self {
        Self
    }

    async fn describe_zones(region: String) -> Result<Vec<String>, ResolverError> {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .load()
            .await;
        let client = Ec2Client::new(&config);

        let result = client
            .describe_availability_zones()
            .send()
            .await
            .map_err(|e| {
                ResolverError::new(format!(
                    "failed to describe availability zones in {region}: {e:?}"
                ))
            })?;

        let zones: Vec<String> = result
            .availability_zones()
            .iter()
            .filter_map(|zone| zone.zone_name().map(String::from))
            .collect();
        debug!("{region}: {} availability zones", zones.len());
        Ok(zones)
    }
}

impl ZoneResolver for Ec2ZoneResolver {
    fn resolve(&self, region: &str) -> BoxFuture<'_, Result<Vec<String>, ResolverError>> {
        let region = region.to_string();
        Box::pin(Self::describe_zones(region))
    }
}
