//! CLI entry point for spook

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spook")]
#[command(version)]
#[command(about = "A small static site generator built on Tera themes", long_about = None)]
struct Cli {
    /// Site root (defaults to current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the site into the output directory
    #[command(alias = "g", alias = "generate")]
    Build {
        /// Output directory (defaults to <root>/public)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minify the generated HTML
        #[arg(short, long)]
        minify: bool,
    },

    /// Delete the output directory
    Clean {
        /// Output directory (defaults to <root>/public)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List site content
    List {
        /// Type of content to list (post, page, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "spook=debug,info"
    } else {
        "spook=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Build { output, minify } => {
            let mut spook = spook::Spook::new(&base_dir)?;
            if let Some(output) = output {
                spook = spook.with_output_dir(output);
            }
            if minify {
                spook.config.minify = true;
            }

            tracing::info!("Building site in {:?}", spook.output_dir);
            spook.build()?;
            println!("Generated successfully!");
        }

        Commands::Clean { output } => {
            let mut spook = spook::Spook::new(&base_dir)?;
            if let Some(output) = output {
                spook = spook.with_output_dir(output);
            }

            tracing::info!("Cleaning output folder...");
            spook.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let spook = spook::Spook::new(&base_dir)?;
            spook::commands::list::run(&spook, &r#type)?;
        }
    }

    Ok(())
}
