//! GraphBuilder - assembles the base-VPC resource graph
//!
//! Construction order is the dependency order: every record is appended
//! strictly after each record it references, so consumers materializing the
//! graph front to back resolve every reference. Each build is independent;
//! identical inputs (including an identical zone resolution) produce an
//! identical graph.

use std::str::FromStr;

use log::debug;

use crate::error::BuildError;
use crate::network::NetworkBlock;
use crate::resolver::ZoneResolver;
use crate::resource::{
    DefaultRouteRecord, GatewayAttachmentRecord, InstanceTenancy, InternetGatewayRecord,
    LogicalId, ResourceGraph, ResourceRecord, RouteTableRecord, SubnetAssociationRecord,
    SubnetRecord, VpcRecord,
};

// Fixed logical identifiers; templates generated from different versions
// stay compatible as long as these never change.
const VPC: &str = "BaseVpc";
const ROUTE_TABLE: &str = "RouteTable";
const INTERNET_GATEWAY: &str = "InternetGateway";
const GATEWAY_ATTACHMENT: &str = "VpcGatewayAttachment";
const DEFAULT_ROUTE: &str = "DefaultRoute";

fn subnet_id(index: usize) -> LogicalId {
    LogicalId::new(format!("Subnet{index}"))
}

fn association_id(index: usize) -> LogicalId {
    LogicalId::new(format!("SubnetAssociation{index}"))
}

/// Inputs for one graph build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Application short name, used verbatim in generated Name tags
    pub app_name: String,
    /// AWS region name, e.g. "us-east-1"
    pub region: String,
    /// Supernet CIDR the subnets are carved from, e.g. "10.1.0.0/16"
    pub cidr_block: String,
    /// Assign public IPs to instances launched in the subnets
    pub map_public_ip_on_launch: bool,
}

impl BuildConfig {
    pub fn new(
        app_name: impl Into<String>,
        region: impl Into<String>,
        cidr_block: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            region: region.into(),
            cidr_block: cidr_block.into(),
            map_public_ip_on_launch: false,
        }
    }

    pub fn with_map_public_ip(mut self, enabled: bool) -> Self {
        self.map_public_ip_on_launch = enabled;
        self
    }
}

/// Builds base-VPC resource graphs against an injected zone resolver
pub struct GraphBuilder<'a> {
    resolver: &'a dyn ZoneResolver,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(resolver: &'a dyn ZoneResolver) -> Self {
        Self { resolver }
    }

    /// Builds the full graph: one VPC, one route table, one subnet plus one
    /// association per availability zone, an internet gateway, its
    /// attachment, and the default route.
    ///
    /// There is no partial success: either the whole graph is returned or
    /// the first error aborts the build.
    pub async fn build(&self, config: &BuildConfig) -> Result<ResourceGraph, BuildError> {
        if config.app_name.is_empty() {
            return Err(BuildError::Configuration(
                "app_name must not be empty".to_string(),
            ));
        }
        let supernet = NetworkBlock::from_str(&config.cidr_block)?;

        let zones = self.resolver.resolve(&config.region).await?;
        debug!(
            "resolved {} availability zones in {}",
            zones.len(),
            config.region
        );
        let subnet_blocks = supernet.partition(zones.len())?;

        let mut graph = ResourceGraph::new();

        let vpc = self.vpc(config, supernet);
        let vpc_id = vpc.logical_id.clone();
        graph.push(ResourceRecord::Vpc(vpc));

        let route_table = self.route_table(config, vpc_id.clone());
        let route_table_id = route_table.logical_id.clone();
        graph.push(ResourceRecord::RouteTable(route_table));

        // One subnet per zone, each followed directly by its association so
        // the tag index always matches the subnet's position.
        for (idx, block) in subnet_blocks.into_iter().enumerate() {
            let index = idx + 1;
            let subnet = self.subnet(config, index, block, vpc_id.clone());
            let subnet_logical_id = subnet.logical_id.clone();
            graph.push(ResourceRecord::Subnet(subnet));
            graph.push(ResourceRecord::SubnetAssociation(SubnetAssociationRecord {
                logical_id: association_id(index),
                subnet: subnet_logical_id,
                route_table: route_table_id.clone(),
            }));
        }

        let gateway = self.internet_gateway(config);
        let gateway_id = gateway.logical_id.clone();
        graph.push(ResourceRecord::InternetGateway(gateway));

        let attachment_id = LogicalId::new(GATEWAY_ATTACHMENT);
        graph.push(ResourceRecord::GatewayAttachment(GatewayAttachmentRecord {
            logical_id: attachment_id.clone(),
            vpc: vpc_id,
            gateway: gateway_id.clone(),
        }));

        // The route must not take effect before the gateway is attached.
        graph.push(ResourceRecord::DefaultRoute(DefaultRouteRecord {
            logical_id: LogicalId::new(DEFAULT_ROUTE),
            destination: NetworkBlock::any(),
            gateway: gateway_id,
            route_table: route_table_id,
            depends_on: attachment_id,
        }));

        debug!("built resource graph: {}", graph.summary());
        Ok(graph)
    }

    fn vpc(&self, config: &BuildConfig, cidr_block: NetworkBlock) -> VpcRecord {
        VpcRecord {
            logical_id: LogicalId::new(VPC),
            cidr_block,
            enable_dns_support: true,
            enable_dns_hostnames: true,
            instance_tenancy: InstanceTenancy::Default,
            name_tag: format!("{}-vpc", config.app_name),
        }
    }

    fn route_table(&self, config: &BuildConfig, vpc: LogicalId) -> RouteTableRecord {
        RouteTableRecord {
            logical_id: LogicalId::new(ROUTE_TABLE),
            vpc,
            name_tag: format!("{}-rt-1", config.app_name),
        }
    }

    fn subnet(
        &self,
        config: &BuildConfig,
        index: usize,
        cidr_block: NetworkBlock,
        vpc: LogicalId,
    ) -> SubnetRecord {
        SubnetRecord {
            logical_id: subnet_id(index),
            cidr_block,
            vpc,
            map_public_ip_on_launch: config.map_public_ip_on_launch,
            name_tag: format!("{}-sbnt-{}", config.app_name, index),
        }
    }

    fn internet_gateway(&self, config: &BuildConfig) -> InternetGatewayRecord {
        InternetGatewayRecord {
            logical_id: LogicalId::new(INTERNET_GATEWAY),
            name_tag: format!("{}-igw", config.app_name),
        }
    }
}
