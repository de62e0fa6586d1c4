//! proxyforge CLI tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod writer;

#[derive(Parser)]
#[command(name = "proxyforge")]
#[command(about = "Build API proxy bundles from KDL configuration", long_about = None)]
struct Cli {
    /// Log every decoded entity
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode, validate and write a proxy bundle
    Build {
        /// Configuration files, merged in the order given
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Directory the bundle is written under
        #[arg(long, env = "PROXYFORGE_BUILD_PATH", default_value = "./build")]
        build_path: PathBuf,
        /// Directory of static resource files copied into the bundle
        #[arg(long, env = "PROXYFORGE_RESOURCES_PATH", default_value = "./resources")]
        resources_path: PathBuf,
    },
    /// Decode and validate configuration without writing anything
    Validate {
        /// Configuration files, merged in the order given
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build {
            inputs,
            build_path,
            resources_path,
        } => {
            commands::build::run(&inputs, &build_path, &resources_path)?;
        }
        Commands::Validate { inputs } => {
            commands::validate::run(&inputs)?;
        }
    }

    Ok(())
}
