//! Command-line interface for mongo-fog
//!
//! # Usage Examples
//!
//! ```bash
//! # Fog the collections described in fog.yaml
//! mongo-fog --fog fog.yaml
//!
//! # Against a remote server, reproducibly
//! MONGODB_CONNECTION_STRING=mongodb://user:pass@db:27017 mongo-fog --fog fog.yaml --seed 7
//!
//! # Inspect
//! mongo-fog --list
//! mongo-fog --list-generators
//! mongo-fog --sample safe_email
//! ```
//!
//! ## Fog Config Format
//! ```yaml
//! transform:
//!   mydb:
//!     users:
//!       email: safe_email
//!       address:
//!         city: city
//!         zip: delete
//!     sessions: delete
//! filters:
//!   mydb:
//!     users: { active: true }
//! ```

use anyhow::Context;
use clap::Parser;
use mongo_fog::{
    list_databases, load_config, run_fog, sample_value, FogArgs, FogOptions, GeneratorRegistry,
    MongoStore,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mongo-fog")]
#[command(about = "Replace or remove MongoDB field values with synthetic data")]
#[command(long_about = None)]
struct Cli {
    /// Fog config file to apply
    #[arg(long, value_name = "PATH")]
    fog: Option<PathBuf>,

    /// List MongoDB databases
    #[arg(long)]
    list: bool,

    /// Print one value from the named generator
    #[arg(long, value_name = "GENERATOR")]
    sample: Option<String>,

    /// List available generator names
    #[arg(long)]
    list_generators: bool,

    #[command(flatten)]
    opts: FogArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let registry = Arc::new(GeneratorRegistry::with_builtins());

    if let Some(path) = cli.fog {
        tracing::info!("Using fog config: {}", path.display());
        // Parse before connecting so a bad config never touches the store
        let config = load_config(&path)?;
        let store = connect(&cli.opts).await?;
        run_fog(&store, registry, &config, FogOptions::from(&cli.opts)).await?;
    } else if let Some(name) = cli.sample {
        println!("{}", sample_value(&registry, &name, cli.opts.seed)?);
    } else if cli.list_generators {
        for name in registry.names() {
            println!("{name}");
        }
    } else if cli.list {
        let store = connect(&cli.opts).await?;
        for name in list_databases(&store).await? {
            println!("{name}");
        }
    } else {
        println!("No action specified");
    }

    Ok(())
}

async fn connect(opts: &FogArgs) -> anyhow::Result<MongoStore> {
    MongoStore::connect(&opts.mongodb_uri)
        .await
        .context("Failed to connect to MongoDB")
}
