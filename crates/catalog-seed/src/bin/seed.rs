//! Seeds the reference catalog into the configured database.
//!
//! Run with:
//! ```
//! cargo run -p catalog-seed --bin seed
//! ```
//!
//! `--dry-run` seeds an in-memory store instead of PostgreSQL. `--json`
//! prints the final report to stdout.

use catalog_seed::prelude::*;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "seed")]
#[command(about = "Seed the reference catalog into the configured database", long_about = None)]
#[command(version)]
struct Args {
    /// Seed an in-memory store instead of PostgreSQL
    #[arg(long)]
    dry_run: bool,

    /// Print the seed report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env()?;
    let runner = SeedRunner::new(config.clone(), TracingLogger);

    let report = if args.dry_run {
        tracing::info!("Dry run: seeding in-memory store");
        let mut store = InMemoryStore::new();
        runner.seed(&mut store).await?
    } else {
        // Lazy so an unreachable database surfaces inside the retry loop.
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy(&config.database_url)?;

        tracing::info!("Seeding catalog database");
        let mut store = PgCatalogStore::new(Database::new(pool));
        runner.seed(&mut store).await?
    };

    // Summary output
    tracing::info!("Seed completed in {} attempt(s)", report.attempts);
    tracing::info!("  Brands: {}", report.inserted.brands);
    tracing::info!("  Types: {}", report.inserted.types);
    tracing::info!("  Items: {}", report.inserted.items);
    for collection in &report.skipped {
        tracing::info!("  Skipped {} (already populated)", collection);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
