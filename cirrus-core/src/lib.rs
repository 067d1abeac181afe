//! Cirrus Core
//!
//! Core library for a declarative base-VPC generator: given an application
//! name, an AWS region and a supernet CIDR, it produces an ordered resource
//! graph (VPC, route table, one subnet per availability zone, subnet
//! associations, internet gateway, gateway attachment, default route) that
//! downstream tooling serializes into a CloudFormation template.

pub mod builder;
pub mod error;
pub mod network;
pub mod resolver;
pub mod resource;

// Re-export main types for convenience
pub use builder::{BuildConfig, GraphBuilder};
pub use error::{BuildError, InvalidNetworkError, ResolverError};
pub use network::NetworkBlock;
pub use resolver::{BoxFuture, StaticResolver, ZoneResolver};
pub use resource::{ResourceGraph, ResourceRecord};
