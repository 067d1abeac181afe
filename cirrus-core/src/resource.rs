//! Resource records - the immutable value records making up a resource graph
//!
//! Each record carries a stable logical identifier, unique within one graph,
//! that other records reference Ref-style. Records are never mutated or
//! removed once appended; the graph is built once and handed off whole.

use std::fmt;

use crate::network::NetworkBlock;

/// Stable logical name of a resource within one graph
///
/// Independent of any runtime-assigned identifier; this is the name the
/// serialized template uses for `Ref` and `DependsOn` wiring.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalId(String);

impl LogicalId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// VPC instance tenancy mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstanceTenancy {
    #[default]
    Default,
    Dedicated,
    Host,
}

impl InstanceTenancy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dedicated => "dedicated",
            Self::Host => "host",
        }
    }
}

/// The VPC itself; exactly one per graph, created first
#[derive(Debug, Clone, PartialEq)]
pub struct VpcRecord {
    pub logical_id: LogicalId,
    pub cidr_block: NetworkBlock,
    pub enable_dns_support: bool,
    pub enable_dns_hostnames: bool,
    pub instance_tenancy: InstanceTenancy,
    pub name_tag: String,
}

/// The single public route table
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTableRecord {
    pub logical_id: LogicalId,
    pub vpc: LogicalId,
    pub name_tag: String,
}

/// One subnet per availability zone
#[derive(Debug, Clone, PartialEq)]
pub struct SubnetRecord {
    pub logical_id: LogicalId,
    pub cidr_block: NetworkBlock,
    pub vpc: LogicalId,
    pub map_public_ip_on_launch: bool,
    pub name_tag: String,
}

/// Joins one subnet to the route table
#[derive(Debug, Clone, PartialEq)]
pub struct SubnetAssociationRecord {
    pub logical_id: LogicalId,
    pub subnet: LogicalId,
    pub route_table: LogicalId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InternetGatewayRecord {
    pub logical_id: LogicalId,
    pub name_tag: String,
}

/// Attaches the internet gateway to the VPC
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayAttachmentRecord {
    pub logical_id: LogicalId,
    pub vpc: LogicalId,
    pub gateway: LogicalId,
}

/// Routes 0.0.0.0/0 through the internet gateway
///
/// Carries an explicit ordering dependency on the gateway attachment: a
/// consumer must not materialize the route before the attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultRouteRecord {
    pub logical_id: LogicalId,
    pub destination: NetworkBlock,
    pub gateway: LogicalId,
    pub route_table: LogicalId,
    pub depends_on: LogicalId,
}

/// Tagged union of every record kind in a graph
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceRecord {
    Vpc(VpcRecord),
    RouteTable(RouteTableRecord),
    Subnet(SubnetRecord),
    SubnetAssociation(SubnetAssociationRecord),
    InternetGateway(InternetGatewayRecord),
    GatewayAttachment(GatewayAttachmentRecord),
    DefaultRoute(DefaultRouteRecord),
}

impl ResourceRecord {
    pub fn logical_id(&self) -> &LogicalId {
        match self {
            Self::Vpc(r) => &r.logical_id,
            Self::RouteTable(r) => &r.logical_id,
            Self::Subnet(r) => &r.logical_id,
            Self::SubnetAssociation(r) => &r.logical_id,
            Self::InternetGateway(r) => &r.logical_id,
            Self::GatewayAttachment(r) => &r.logical_id,
            Self::DefaultRoute(r) => &r.logical_id,
        }
    }

    /// All logical ids this record points at, ordering dependencies included
    pub fn references(&self) -> Vec<&LogicalId> {
        match self {
            Self::Vpc(_) | Self::InternetGateway(_) => vec![],
            Self::RouteTable(r) => vec![&r.vpc],
            Self::Subnet(r) => vec![&r.vpc],
            Self::SubnetAssociation(r) => vec![&r.subnet, &r.route_table],
            Self::GatewayAttachment(r) => vec![&r.vpc, &r.gateway],
            Self::DefaultRoute(r) => vec![&r.gateway, &r.route_table, &r.depends_on],
        }
    }
}

/// Ordered, append-only collection of resource records
///
/// The append order is the materialization order: every record appears
/// strictly after each record it references, so a consumer processing the
/// graph front to back never sees a dangling reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceGraph {
    records: Vec<ResourceRecord>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ResourceRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Generate a per-kind count summary for display
    pub fn summary(&self) -> GraphSummary {
        let mut summary = GraphSummary::default();
        for record in &self.records {
            match record {
                ResourceRecord::Vpc(_) => summary.vpcs += 1,
                ResourceRecord::RouteTable(_) => summary.route_tables += 1,
                ResourceRecord::Subnet(_) => summary.subnets += 1,
                ResourceRecord::SubnetAssociation(_) => summary.associations += 1,
                ResourceRecord::InternetGateway(_) => summary.gateways += 1,
                ResourceRecord::GatewayAttachment(_) => summary.attachments += 1,
                ResourceRecord::DefaultRoute(_) => summary.routes += 1,
            }
        }
        summary
    }

    /// True if every reference points at an earlier record
    ///
    /// Holds by construction for builder output; exposed so consumers and
    /// tests can assert it on graphs from other sources.
    pub fn is_well_ordered(&self) -> bool {
        let mut seen: Vec<&LogicalId> = Vec::with_capacity(self.records.len());
        for record in &self.records {
            if !record
                .references()
                .iter()
                .all(|reference| seen.contains(reference))
            {
                return false;
            }
            seen.push(record.logical_id());
        }
        true
    }
}

impl IntoIterator for ResourceGraph {
    type Item = ResourceRecord;
    type IntoIter = std::vec::IntoIter<ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct GraphSummary {
    pub vpcs: usize,
    pub route_tables: usize,
    pub subnets: usize,
    pub associations: usize,
    pub gateways: usize,
    pub attachments: usize,
    pub routes: usize,
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vpc, {} route table, {} subnets, {} associations, {} gateway, {} attachment, {} route",
            self.vpcs,
            self.route_tables,
            self.subnets,
            self.associations,
            self.gateways,
            self.attachments,
            self.routes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vpc() -> ResourceRecord {
        ResourceRecord::Vpc(VpcRecord {
            logical_id: LogicalId::new("BaseVpc"),
            cidr_block: "10.0.0.0/16".parse().unwrap(),
            enable_dns_support: true,
            enable_dns_hostnames: true,
            instance_tenancy: InstanceTenancy::Default,
            name_tag: "app-vpc".to_string(),
        })
    }

    fn route_table() -> ResourceRecord {
        ResourceRecord::RouteTable(RouteTableRecord {
            logical_id: LogicalId::new("RouteTable"),
            vpc: LogicalId::new("BaseVpc"),
            name_tag: "app-rt-1".to_string(),
        })
    }

    #[test]
    fn empty_graph() {
        let graph = ResourceGraph::new();
        assert!(graph.is_empty());
        assert!(graph.is_well_ordered());
        assert_eq!(graph.summary(), GraphSummary::default());
    }

    #[test]
    fn references_include_ordering_dependency() {
        let route = ResourceRecord::DefaultRoute(DefaultRouteRecord {
            logical_id: LogicalId::new("DefaultRoute"),
            destination: NetworkBlock::any(),
            gateway: LogicalId::new("InternetGateway"),
            route_table: LogicalId::new("RouteTable"),
            depends_on: LogicalId::new("VpcGatewayAttachment"),
        });
        let refs: Vec<&str> = route.references().iter().map(|id| id.as_str()).collect();
        assert_eq!(refs, ["InternetGateway", "RouteTable", "VpcGatewayAttachment"]);
    }

    #[test]
    fn well_ordered_graph() {
        let mut graph = ResourceGraph::new();
        graph.push(vpc());
        graph.push(route_table());
        assert!(graph.is_well_ordered());
    }

    #[test]
    fn reference_before_referent_is_rejected() {
        let mut graph = ResourceGraph::new();
        graph.push(route_table());
        graph.push(vpc());
        assert!(!graph.is_well_ordered());
    }

    #[test]
    fn summary_counts_by_kind() {
        let mut graph = ResourceGraph::new();
        graph.push(vpc());
        graph.push(route_table());
        let summary = graph.summary();
        assert_eq!(summary.vpcs, 1);
        assert_eq!(summary.route_tables, 1);
        assert_eq!(summary.subnets, 0);
    }
}
