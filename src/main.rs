//! StringLens - text analysis with natural-language filtering
//!
//! Runs the HTTP API, or analyzes values and parses queries from the
//! command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use stringlens::{analyze, api, config::StringLensConfig, QueryParser};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stringlens")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Text analysis service with natural-language filtering")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "STRINGLENS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the derived properties of a value
    Analyze {
        /// Text to analyze
        value: String,
    },

    /// Print the filters derived from a natural-language query
    Parse {
        /// Free-text query
        query: String,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("stringlens={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match cli.config {
        Some(config_path) => StringLensConfig::load(&config_path)?,
        None => StringLensConfig::load_default()?,
    };

    match cli.command {
        Commands::Serve { host, port } => {
            run_server(config, host, port).await?;
        }
        Commands::Analyze { value } => {
            println!("{}", serde_json::to_string_pretty(&analyze(&value))?);
        }
        Commands::Parse { query } => {
            let parser = QueryParser::new()?;
            println!("{}", serde_json::to_string_pretty(&parser.parse(&query)?)?);
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

async fn run_server(
    mut config: StringLensConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting StringLens API");
    api::serve(&config.server).await
}

fn show_config(config: Option<&StringLensConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
