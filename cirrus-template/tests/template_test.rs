//! End-to-end template generation against a fixed zone list

use cirrus_core::builder::{BuildConfig, GraphBuilder};
use cirrus_core::resolver::StaticResolver;
use cirrus_template::Template;
use serde_json::Value;

async fn render(config: &BuildConfig, zones: usize) -> Value {
    let resolver = StaticResolver::with_zone_count(&config.region, zones);
    let graph = GraphBuilder::new(&resolver).build(config).await.unwrap();
    Template::from_graph(&graph).to_value()
}

#[tokio::test]
async fn three_zone_template_wires_every_resource() {
    let config = BuildConfig::new("my-app", "us-east-1", "10.1.0.0/16");
    let value = render(&config, 3).await;

    let resources = value["Resources"].as_object().unwrap();
    // 5 singletons + 3 subnets + 3 associations
    assert_eq!(resources.len(), 11);

    assert_eq!(resources["BaseVpc"]["Type"], "AWS::EC2::VPC");
    assert_eq!(resources["BaseVpc"]["Properties"]["CidrBlock"], "10.1.0.0/16");
    assert_eq!(
        resources["BaseVpc"]["Properties"]["Tags"][0]["Value"],
        "my-app-vpc"
    );

    assert_eq!(resources["RouteTable"]["Type"], "AWS::EC2::RouteTable");
    assert_eq!(
        resources["RouteTable"]["Properties"]["VpcId"]["Ref"],
        "BaseVpc"
    );
    assert_eq!(
        resources["RouteTable"]["Properties"]["Tags"][0]["Value"],
        "my-app-rt-1"
    );

    for (i, cidr) in [(1, "10.1.0.0/24"), (2, "10.1.1.0/24"), (3, "10.1.2.0/24")] {
        let subnet = &resources[&format!("Subnet{i}")];
        assert_eq!(subnet["Type"], "AWS::EC2::Subnet");
        assert_eq!(subnet["Properties"]["CidrBlock"], cidr);
        assert_eq!(subnet["Properties"]["VpcId"]["Ref"], "BaseVpc");
        assert_eq!(subnet["Properties"]["MapPublicIpOnLaunch"], false);
        assert_eq!(
            subnet["Properties"]["Tags"][0]["Value"],
            format!("my-app-sbnt-{i}")
        );

        let association = &resources[&format!("SubnetAssociation{i}")];
        assert_eq!(association["Type"], "AWS::EC2::SubnetRouteTableAssociation");
        assert_eq!(
            association["Properties"]["SubnetId"]["Ref"],
            format!("Subnet{i}")
        );
        assert_eq!(association["Properties"]["RouteTableId"]["Ref"], "RouteTable");
    }

    assert_eq!(
        resources["InternetGateway"]["Type"],
        "AWS::EC2::InternetGateway"
    );
    assert_eq!(
        resources["InternetGateway"]["Properties"]["Tags"][0]["Value"],
        "my-app-igw"
    );

    let attachment = &resources["VpcGatewayAttachment"];
    assert_eq!(attachment["Type"], "AWS::EC2::VPCGatewayAttachment");
    assert_eq!(attachment["Properties"]["VpcId"]["Ref"], "BaseVpc");
    assert_eq!(
        attachment["Properties"]["InternetGatewayId"]["Ref"],
        "InternetGateway"
    );

    let route = &resources["DefaultRoute"];
    assert_eq!(route["Type"], "AWS::EC2::Route");
    assert_eq!(route["DependsOn"], "VpcGatewayAttachment");
    assert_eq!(route["Properties"]["DestinationCidrBlock"], "0.0.0.0/0");
    assert_eq!(route["Properties"]["GatewayId"]["Ref"], "InternetGateway");
}

#[tokio::test]
async fn zero_zone_template_keeps_the_singletons() {
    let config = BuildConfig::new("x", "us-east-1", "10.1.0.0/16");
    let value = render(&config, 0).await;

    let resources = value["Resources"].as_object().unwrap();
    assert_eq!(resources.len(), 5);
    for name in [
        "BaseVpc",
        "RouteTable",
        "InternetGateway",
        "VpcGatewayAttachment",
        "DefaultRoute",
    ] {
        assert!(resources.contains_key(name), "missing {name}");
    }
}

#[tokio::test]
async fn public_ip_flag_reaches_the_template() {
    let config =
        BuildConfig::new("my-app", "us-east-1", "10.1.0.0/16").with_map_public_ip(true);
    let value = render(&config, 1).await;
    assert_eq!(
        value["Resources"]["Subnet1"]["Properties"]["MapPublicIpOnLaunch"],
        true
    );
}

#[tokio::test]
async fn json_output_parses_back() {
    let config = BuildConfig::new("my-app", "us-east-1", "10.1.0.0/16");
    let resolver = StaticResolver::with_zone_count("us-east-1", 2);
    let graph = GraphBuilder::new(&resolver).build(&config).await.unwrap();
    let json = Template::from_graph(&graph)
        .with_description("base VPC for my-app")
        .to_json()
        .unwrap();

    let parsed: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["AWSTemplateFormatVersion"], "2010-09-09");
    assert_eq!(parsed["Description"], "base VPC for my-app");
}
