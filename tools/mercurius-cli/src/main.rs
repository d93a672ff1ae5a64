//! Mercurius CLI - browse and manage the furniture catalog.
//!
//! Commands:
//! - `mercurius init` - Write a default mercurius.toml
//! - `mercurius catalog` - List products with filters and sorting
//! - `mercurius show` - Product detail with related items
//! - `mercurius stats` - Dashboard counts and category totals
//! - `mercurius product` - Add, edit, sell, delete or import products (admin)
//! - `mercurius slugs` - Slug maintenance (admin)
//! - `mercurius admin` - Admin account and password tools

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AdminArgs, CatalogArgs, InitArgs, ProductArgs, ShowArgs, SlugsArgs};

/// Mercurius CLI - Browse and manage the furniture catalog
#[derive(Parser)]
#[command(name = "mercurius")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default mercurius.toml
    Init(InitArgs),

    /// List the catalog
    Catalog(CatalogArgs),

    /// Show one product by slug
    Show(ShowArgs),

    /// Inventory numbers and category totals
    Stats,

    /// Manage products (admin sign-in required)
    Product(ProductArgs),

    /// Slug maintenance (admin sign-in required)
    Slugs(SlugsArgs),

    /// Admin account and password tools
    Admin(AdminArgs),
}

fn setup_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args, &ctx),
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Show(args) => commands::catalog::show(args, &ctx),
        Commands::Stats => commands::stats::run(&ctx),
        Commands::Product(args) => commands::product::run(args, &ctx),
        Commands::Slugs(args) => commands::slugs::run(args, &ctx),
        Commands::Admin(args) => commands::admin::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
