use mongodb::{
    bson::doc,
    options::ClientOptions,
    Client, Collection,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::{QueryResult, StoreResultExt};
use crate::models::Book;

pub mod books;

/// Handle to the bookstore database.
///
/// Clones share one driver client. [`Database::close`] shuts that client down
/// at most once, no matter how many clones call it.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database: mongodb::Database,
    books: Collection<Book>,
    closed: Arc<AtomicBool>,
}

impl Database {
    pub async fn new(config: &Config) -> QueryResult<Self> {
        let options = ClientOptions::parse(&config.mongodb_uri)
            .await
            .during("connect")?;
        let client = Client::with_options(options).during("connect")?;
        let database = client.database(&config.database_name);
        let books = database.collection::<Book>(&config.collection_name);

        Ok(Self {
            client,
            database,
            books,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The driver connects lazily; this forces the handshake so an unreachable
    /// server fails here rather than on the first query.
    pub async fn connect(&self) -> QueryResult<()> {
        self.ping().await?;
        info!("✅ Connected to MongoDB");
        Ok(())
    }

    pub async fn ping(&self) -> QueryResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .during("ping")?;
        Ok(())
    }

    pub fn books(&self) -> &Collection<Book> {
        &self.books
    }

    pub fn database(&self) -> &mongodb::Database {
        &self.database
    }

    pub fn collection_name(&self) -> &str {
        self.books.name()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Shuts the client down. Calls after the first are no-ops.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            warn!("Database connection already closed");
            return;
        }
        self.client.clone().shutdown().await;
        info!("🔒 Connection closed");
    }
}
