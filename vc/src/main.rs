use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;

use venuecatalog::Catalog;
use venuecatalog::cli::{Cli, Command};
use venuecatalog::config::Config;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("venuecatalog starting");

    let catalog_path = cli.catalog.or(config.catalog_path);

    match cli.command {
        Command::Venues => {
            let catalog = Catalog::load_or_builtin(catalog_path.as_deref())?;
            for venue in catalog.venues() {
                println!(
                    "{} {} ({} attractions, {}-{})",
                    venue.id.cyan(),
                    venue.name,
                    venue.attractions.len(),
                    venue.opens.format("%H:%M"),
                    venue.closes.format("%H:%M")
                );
            }
        }
        Command::List { venue, food, rides } => {
            let catalog = Catalog::load_or_builtin(catalog_path.as_deref())?;
            let venue = catalog
                .venue(&venue)
                .ok_or_else(|| eyre!("Unknown venue: {}", venue))?;
            for attraction in &venue.attractions {
                if (food && !attraction.is_food_service()) || (rides && attraction.is_food_service()) {
                    continue;
                }
                println!(
                    "{} {} {}",
                    attraction.name.yellow(),
                    attraction.category.dimmed(),
                    attraction.zone
                );
            }
        }
        Command::Show { venue, name } => {
            let catalog = Catalog::load_or_builtin(catalog_path.as_deref())?;
            let venue = catalog
                .venue(&venue)
                .ok_or_else(|| eyre!("Unknown venue: {}", venue))?;
            let attraction = venue
                .resolve(&name)
                .ok_or_else(|| eyre!("Unknown attraction in {}: {}", venue.id, name))?;
            println!("{}", attraction.name.cyan());
            println!("  Category: {}", attraction.category);
            println!("  Zone:     {}", attraction.zone);
            println!("  Indoor:   {}", if attraction.indoor { "yes" } else { "no" });
            println!("  Duration: {} min", attraction.duration_minutes);
            println!("  Capacity: {} / hour", attraction.capacity);
            println!("  Score:    {:.1}", attraction.score);
            if !attraction.aliases.is_empty() {
                println!("  Aliases:  {}", attraction.aliases.join(", "));
            }
        }
        Command::Check { path } => {
            let catalog = Catalog::load(&path).with_context(|| format!("Invalid catalog {}", path.display()))?;
            println!(
                "{} {} venues, {} attractions",
                "✓".green(),
                catalog.venues().len(),
                catalog.len()
            );
        }
    }

    Ok(())
}
