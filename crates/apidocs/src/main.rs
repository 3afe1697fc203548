//! apidocs CLI - merges OpenAPI fragments and builds static Redoc documentation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "apidocs")]
#[command(about = "Merges OpenAPI fragments and builds static Redoc documentation")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to apidocs.toml config file
    #[arg(short, long, default_value = "apidocs.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a config file and fragment skeleton in the current directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Merge path fragments into the root OpenAPI document
    Merge,

    /// Resolve external references with the bundler
    Bundle,

    /// Generate favicons and the web app manifest
    Favicons,

    /// Build the static documentation site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge, bundle, generate favicons and build
    All {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    if let Commands::Init { yes } = cli.command {
        return commands::init::run(&cli.config, yes);
    }

    let config = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init { .. } => {}
        Commands::Merge => {
            commands::merge::run(&config)?;
        }
        Commands::Bundle => {
            commands::bundle::run(&config)?;
        }
        Commands::Favicons => {
            commands::favicons::run(&config.favicons)?;
        }
        Commands::Build { output } => {
            commands::build::run(&config, output)?;
        }
        Commands::All { output } => {
            commands::all::run(&config, output)?;
        }
    }

    Ok(())
}
