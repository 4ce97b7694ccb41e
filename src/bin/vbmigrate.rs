//! CLI for the viewbinding migration tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use viewbinding_migrator::prelude::*;
use viewbinding_migrator::report;

#[derive(Parser)]
#[command(name = "vbmigrate")]
#[command(author, version, about = "Migrates Android Kotlin sources to ViewBinding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite setContentView/findViewById/synthetics to ViewBinding
    Migrate {
        /// Kotlin file or project root to migrate
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Preview changes without applying
        #[arg(long)]
        dry_run: bool,
    },

    /// List legacy setContentView call sites in Java sources
    Scan {
        /// Java file or project root to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show supported languages
    Languages,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { path, dry_run } => cmd_migrate(path, dry_run),
        Commands::Scan { path, format } => cmd_scan(path, format),
        Commands::Languages => cmd_languages(),
    }
}

fn cmd_migrate(path: PathBuf, dry_run: bool) -> Result<()> {
    let notifier = Notifier::new();

    let mut migration = Migration::at(&path);
    if dry_run {
        migration = migration.dry_run();
    }

    let result = migration.run(&notifier).context("Migration failed")?;

    if dry_run {
        println!("{}", result.colorized_diff());
        println!("\n{}", result.summary);
    } else {
        println!("Migrated {} file(s)", result.files_modified());
    }

    if !result.unresolved.is_empty() {
        println!("Skipped {} file(s) with unresolvable layouts", result.unresolved.len());
    }

    Ok(())
}

fn cmd_scan(path: PathBuf, format: OutputFormat) -> Result<()> {
    let listing = report::scan_project(&path).context("Scan failed")?;

    match format {
        OutputFormat::Json => println!("{}", listing.to_json()?),
        OutputFormat::Text => {
            if listing.is_empty() {
                println!("No legacy setContentView call sites found");
            } else {
                print!("{listing}");
                println!("{} call site(s)", listing.sites.len());
            }
        }
    }

    Ok(())
}

fn cmd_languages() -> Result<()> {
    let registry = LanguageRegistry::new();
    println!("Supported languages:");
    for lang in registry.all() {
        println!(
            "  {} (extensions: {})",
            lang.name(),
            lang.extensions().join(", ")
        );
    }
    Ok(())
}
