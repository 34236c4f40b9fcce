//! CLI argument parsing for venuecatalog

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vc")]
#[command(author, version, about = "Inspect theme park venue catalogs", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Catalog file (overrides config; built-in catalog when unset)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all venues
    Venues,

    /// List attractions of a venue
    List {
        /// Venue id
        #[arg(required = true)]
        venue: String,

        /// Only food-service locations
        #[arg(long, conflicts_with = "rides")]
        food: bool,

        /// Only rides and shows
        #[arg(long)]
        rides: bool,
    },

    /// Show one attraction in detail
    Show {
        /// Venue id
        #[arg(required = true)]
        venue: String,

        /// Attraction name or alias
        #[arg(required = true)]
        name: String,
    },

    /// Validate a catalog file
    Check {
        /// Catalog file to validate
        #[arg(required = true)]
        path: PathBuf,
    },
}
