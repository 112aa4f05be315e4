use tracing::error;

use bookstore_queries::{config::Config, db::Database, runner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bookstore_queries::init_tracing();

    let config = Config::from_env()?;

    let db = match Database::new(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("❌ Error: {}", e);
            return Ok(());
        }
    };

    // Failures are logged inside `execute`; the process exits normally either way.
    let _ = runner::execute(&db, std::io::stdout().lock()).await;

    Ok(())
}
