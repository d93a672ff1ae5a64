//! CLI command implementations.

pub mod admin;
pub mod catalog;
pub mod init;
pub mod product;
pub mod slugs;
pub mod stats;

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing mercurius.toml.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show this category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sort order: newest, oldest, price-asc, price-desc, name-asc, name-desc.
    #[arg(short, long, default_value = "newest")]
    pub sort: String,

    /// Hide products that were already sold.
    #[arg(long)]
    pub hide_sold: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product slug.
    pub slug: String,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

/// Product fields shared by `add` and `edit`.
#[derive(Args, Default)]
pub struct ProductFields {
    /// Discount percentage (0-100, 0 clears it).
    #[arg(short, long)]
    pub discount: Option<f64>,

    /// Description text.
    #[arg(long)]
    pub description: Option<String>,

    /// Image URL (repeatable; the first one is the cover).
    #[arg(short, long = "image")]
    pub images: Vec<String>,

    /// Condition notes.
    #[arg(long)]
    pub condition: Option<String>,

    /// Dimensions.
    #[arg(long)]
    pub dimensions: Option<String>,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Create a product.
    Add {
        /// Product name.
        name: String,

        /// Base price.
        #[arg(short, long)]
        price: f64,

        /// Category.
        #[arg(short, long)]
        category: String,

        /// Mark as already sold.
        #[arg(long)]
        sold: bool,

        #[command(flatten)]
        fields: ProductFields,
    },
    /// Change some fields of a product.
    Edit {
        /// Product id or slug.
        product: String,

        /// New name (the slug follows).
        #[arg(short, long)]
        name: Option<String>,

        /// New base price.
        #[arg(short, long)]
        price: Option<f64>,

        /// New category.
        #[arg(short, long)]
        category: Option<String>,

        #[command(flatten)]
        fields: ProductFields,

        /// Remove the condition notes.
        #[arg(long, conflicts_with = "condition")]
        clear_condition: bool,

        /// Remove the dimensions.
        #[arg(long, conflicts_with = "dimensions")]
        clear_dimensions: bool,
    },
    /// Mark a product as sold.
    Sold {
        /// Product id or slug.
        product: String,

        /// Put the product back on sale instead.
        #[arg(long)]
        undo: bool,
    },
    /// Add products from a JSON array of product inputs.
    Import {
        /// JSON file with the products to add.
        file: PathBuf,

        /// Delete every existing product first.
        #[arg(long)]
        replace: bool,

        /// Skip confirmation when replacing.
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a product.
    Delete {
        /// Product id or slug.
        product: String,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the slugs command.
#[derive(Args)]
pub struct SlugsArgs {
    #[command(subcommand)]
    pub command: SlugsCommand,
}

#[derive(Subcommand)]
pub enum SlugsCommand {
    /// Give every product without a slug a unique one.
    Backfill,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Create the admin account if it does not exist.
    Setup,
    /// Change a user's password.
    Passwd {
        /// Username (default: the configured admin).
        username: Option<String>,
    },
    /// Print the argon2 hash of a password.
    Hash {
        /// Password to hash (prompted when omitted).
        password: Option<String>,
    },
    /// Check a password against a stored hash.
    Verify {
        /// Stored PHC hash.
        hash: String,

        /// Password to check (prompted when omitted).
        password: Option<String>,
    },
}
