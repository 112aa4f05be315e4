/*!
 * CLI tool to load the sample bookstore inventory
 *
 * The query runner expects the books collection to exist before it starts;
 * this fills an empty collection (or replaces it with `--drop`).
 *
 * Usage: cargo run --bin seed_books -- [--drop]
 */

use anyhow::Result;
use clap::{Arg, Command};
use tracing::{error, info};

use bookstore_queries::{config::Config, db::Database, errors::QueryResult, seed};

#[tokio::main]
async fn main() -> Result<()> {
    bookstore_queries::init_tracing();

    let matches = Command::new("seed_books")
        .about("Load the sample books into the bookstore collection")
        .arg(
            Arg::new("drop")
                .help("Drop the collection before loading")
                .long("drop")
                .short('d')
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let drop_existing = matches.get_flag("drop");

    let config = Config::from_env()?;
    info!(
        "🌱 Seeding {}.{} at {}",
        config.database_name, config.collection_name, config.mongodb_uri
    );

    let db = Database::new(&config).await?;

    let result: QueryResult<usize> = async {
        db.connect().await?;
        seed::seed_books(&db, drop_existing).await
    }
    .await;

    db.close().await;

    match result {
        Ok(inserted) => {
            info!("📚 Seed complete, {} books inserted", inserted);
            Ok(())
        }
        Err(e) => {
            error!("❌ Failed to seed books: {}", e);
            Err(e.into())
        }
    }
}
