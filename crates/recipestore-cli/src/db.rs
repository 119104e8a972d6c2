//! Database maintenance command handlers.

use std::path::PathBuf;

use clap::Subcommand;
use recipestore_core::AppConfig;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check that the database answers
    Ping,
    /// Load recipes and shops from a catalog YAML file
    Seed {
        /// Catalog file (defaults to `RECIPESTORE_CATALOG_PATH`)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

pub(crate) async fn run(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    command: DbCommands,
) -> anyhow::Result<()> {
    match command {
        DbCommands::Migrate => {
            let applied = recipestore_db::run_migrations(pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Ping => {
            recipestore_db::health_check(pool).await?;
            println!("database ok");
        }
        DbCommands::Seed { file } => {
            let path = file.unwrap_or_else(|| config.catalog_path.clone());
            run_db_seed(pool, &path).await?;
        }
    }
    Ok(())
}

/// Validate a catalog file and upsert its contents.
///
/// Migrations are applied first so a fresh database can be seeded directly.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation, or if
/// any database write fails. Nothing is written on a validation failure.
async fn run_db_seed(pool: &sqlx::PgPool, path: &std::path::Path) -> anyhow::Result<()> {
    let catalog = recipestore_core::load_catalog(path)?;
    recipestore_db::run_migrations(pool).await?;

    let summary = recipestore_db::seed_catalog(pool, &catalog).await?;
    println!(
        "seeded {} recipe(s) and {} shop(s) from {}",
        summary.recipes,
        summary.shops,
        path.display()
    );
    Ok(())
}
