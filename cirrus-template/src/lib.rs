//! Cirrus Template
//!
//! CloudFormation serialization for resource graphs. Each record kind maps to
//! one CloudFormation resource type; references to other records render as
//! `{"Ref": "<logical id>"}` against the referent's logical name, and
//! ordering dependencies render as `DependsOn`. The property names here are
//! wire format: existing CloudFormation tooling consumes the output as-is.

use cirrus_core::resource::{LogicalId, ResourceGraph, ResourceRecord};
use serde_json::{Map, Value, json};

/// CloudFormation template format version
pub const FORMAT_VERSION: &str = "2010-09-09";

/// A CloudFormation template wrapping one rendered resource graph
#[derive(Debug, Clone, Default)]
pub struct Template {
    description: Option<String>,
    resources: Map<String, Value>,
}

impl Template {
    pub fn from_graph(graph: &ResourceGraph) -> Self {
        let mut resources = Map::new();
        for record in graph.records() {
            let (name, body) = render_record(record);
            resources.insert(name, body);
        }
        Self {
            description: None,
            resources,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// The full template document as a JSON value
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        root.insert(
            "AWSTemplateFormatVersion".to_string(),
            Value::String(FORMAT_VERSION.to_string()),
        );
        if let Some(ref description) = self.description {
            root.insert("Description".to_string(), Value::String(description.clone()));
        }
        root.insert("Resources".to_string(), Value::Object(self.resources.clone()));
        Value::Object(root)
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_value())
    }
}

fn reference(id: &LogicalId) -> Value {
    json!({ "Ref": id.as_str() })
}

fn name_tags(name: &str) -> Value {
    json!([{ "Key": "Name", "Value": name }])
}

/// Renders one record into its (logical name, resource body) template entry
fn render_record(record: &ResourceRecord) -> (String, Value) {
    match record {
        ResourceRecord::Vpc(r) => (
            r.logical_id.to_string(),
            json!({
                "Type": "AWS::EC2::VPC",
                "Properties": {
                    "CidrBlock": r.cidr_block.to_string(),
                    "EnableDnsSupport": r.enable_dns_support,
                    "EnableDnsHostnames": r.enable_dns_hostnames,
                    "InstanceTenancy": r.instance_tenancy.as_str(),
                    "Tags": name_tags(&r.name_tag),
                }
            }),
        ),
        ResourceRecord::RouteTable(r) => (
            r.logical_id.to_string(),
            json!({
                "Type": "AWS::EC2::RouteTable",
                "Properties": {
                    "VpcId": reference(&r.vpc),
                    "Tags": name_tags(&r.name_tag),
                }
            }),
        ),
        ResourceRecord::Subnet(r) => (
            r.logical_id.to_string(),
            json!({
                "Type": "AWS::EC2::Subnet",
                "Properties": {
                    "CidrBlock": r.cidr_block.to_string(),
                    "MapPublicIpOnLaunch": r.map_public_ip_on_launch,
                    "VpcId": reference(&r.vpc),
                    "Tags": name_tags(&r.name_tag),
                }
            }),
        ),
        ResourceRecord::SubnetAssociation(r) => (
            r.logical_id.to_string(),
            json!({
                "Type": "AWS::EC2::SubnetRouteTableAssociation",
                "Properties": {
                    "SubnetId": reference(&r.subnet),
                    "RouteTableId": reference(&r.route_table),
                }
            }),
        ),
        ResourceRecord::InternetGateway(r) => (
            r.logical_id.to_string(),
            json!({
                "Type": "AWS::EC2::InternetGateway",
                "Properties": {
                    "Tags": name_tags(&r.name_tag),
                }
            }),
        ),
        ResourceRecord::GatewayAttachment(r) => (
            r.logical_id.to_string(),
            json!({
                "Type": "AWS::EC2::VPCGatewayAttachment",
                "Properties": {
                    "VpcId": reference(&r.vpc),
                    "InternetGatewayId": reference(&r.gateway),
                }
            }),
        ),
        ResourceRecord::DefaultRoute(r) => (
            r.logical_id.to_string(),
            json!({
                "Type": "AWS::EC2::Route",
                "DependsOn": r.depends_on.as_str(),
                "Properties": {
                    "DestinationCidrBlock": r.destination.to_string(),
                    "GatewayId": reference(&r.gateway),
                    "RouteTableId": reference(&r.route_table),
                }
            }),
        ),
    }
}
