use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use cirrus_core::builder::{BuildConfig, GraphBuilder};
use cirrus_core::resolver::{StaticResolver, ZoneResolver};
use cirrus_provider_aws::Ec2ZoneResolver;
use cirrus_template::Template;

#[derive(Parser)]
#[command(name = "cirrus")]
#[command(about = "Generate CloudFormation templates for a base VPC", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a base-VPC CloudFormation template
    Generate {
        /// Application short name used in generated Name tags
        #[arg(long)]
        app_name: String,

        /// AWS region, e.g. us-east-1
        #[arg(long)]
        region: String,

        /// Supernet CIDR the /24 subnets are carved from, e.g. 10.1.0.0/16
        #[arg(long)]
        cidr: String,

        /// Assign public IPs to instances launched in the subnets
        #[arg(long)]
        map_public_ip: bool,

        /// Use a fixed zone count instead of querying EC2
        #[arg(long)]
        zones: Option<usize>,

        /// Template description
        #[arg(long)]
        description: Option<String>,

        /// Write the template to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the availability zones of a region
    Zones {
        /// AWS region, e.g. us-east-1
        region: String,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            app_name,
            region,
            cidr,
            map_public_ip,
            zones,
            description,
            output,
        } => {
            let config = BuildConfig::new(app_name, region, cidr).with_map_public_ip(map_public_ip);
            run_generate(&config, zones, description, output).await
        }
        Commands::Zones { region } => run_zones(&region).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_generate(
    config: &BuildConfig,
    zones: Option<usize>,
    description: Option<String>,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let resolver: Box<dyn ZoneResolver> = match zones {
        Some(count) => Box::new(StaticResolver::with_zone_count(&config.region, count)),
        None => Box::new(Ec2ZoneResolver::new()),
    };

    let graph = GraphBuilder::new(&resolver)
        .build(config)
        .await
        .map_err(|e| e.to_string())?;

    let mut template = Template::from_graph(&graph);
    if let Some(description) = description {
        template = template.with_description(description);
    }
    let json = template
        .to_json()
        .map_err(|e| format!("failed to serialize template: {e}"))?;

    match output {
        Some(path) => {
            fs::write(&path, json + "\n")
                .map_err(|e| format!("failed to write {}: {}", path.display(), e))?;
            println!(
                "{} {} ({})",
                "✓".green(),
                path.display(),
                graph.summary()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

async fn run_zones(region: &str) -> Result<(), String> {
    let resolver = Ec2ZoneResolver::new();
    let zones = resolver.resolve(region).await.map_err(|e| e.to_string())?;

    if zones.is_empty() {
        println!("{}", format!("No availability zones in {region}.").yellow());
        return Ok(());
    }
    for zone in zones {
        println!("{zone}");
    }
    Ok(())
}
