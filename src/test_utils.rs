//! Test utilities for running the bookstore queries against a real MongoDB
//!
//! All contexts share one MongoDB container; each context gets its own
//! database so tests can mutate data without seeing each other's writes.

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::db::Database;
use crate::errors::{QueryResult, StoreResultExt};
use crate::seed;

/// Shared MongoDB container, started by the first context that needs it
static SHARED_MONGO: Mutex<Option<SharedMongo>> = Mutex::const_new(None);

struct SharedMongo {
    container: Arc<ContainerAsync<Mongo>>,
    mongodb_uri: String,
}

impl SharedMongo {
    async fn start() -> Result<SharedMongo, Box<dyn std::error::Error + Send + Sync>> {
        let container = Mongo::default()
            .with_tag("7.0")
            .start()
            .await
            .map_err(|e| format!("Failed to start shared mongo container: {}", e))?;

        let port = container
            .get_host_port_ipv4(27017)
            .await
            .map_err(|e| format!("Failed to get mongo port: {}", e))?;

        Ok(SharedMongo {
            container: Arc::new(container),
            mongodb_uri: format!("mongodb://127.0.0.1:{}/?directConnection=true", port),
        })
    }
}

pub struct TestContext {
    pub db: Database,
    pub config: Config,
    pub container: Arc<ContainerAsync<Mongo>>,
}

impl TestContext {
    /// Connects to a fresh, empty database on the shared container
    pub async fn new() -> Self {
        let (container, mongodb_uri) = {
            let mut guard = SHARED_MONGO.lock().await;
            if guard.is_none() {
                let started = SharedMongo::start()
                    .await
                    .expect("Failed to start shared mongo container");
                *guard = Some(started);
            }
            let shared = guard.as_ref().expect("shared mongo was just initialised");
            (Arc::clone(&shared.container), shared.mongodb_uri.clone())
        };

        let config = Config {
            mongodb_uri,
            ..Config::default()
        }
        .with_database_name(format!("bookstore_test_{}", ObjectId::new().to_hex()));

        let db = Database::new(&config)
            .await
            .expect("Failed to create database handle");

        // The container reports ready before it accepts every connection
        let mut retries = 0;
        const MAX_RETRIES: u32 = 30;
        while let Err(e) = db.ping().await {
            retries += 1;
            if retries >= MAX_RETRIES {
                panic!("Failed to reach test mongo after {} retries: {}", MAX_RETRIES, e);
            }
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        }

        Self {
            db,
            config,
            container,
        }
    }

    /// A context whose collection already holds the sample books
    pub async fn seeded() -> Self {
        let ctx = Self::new().await;
        seed::seed_books(&ctx.db, false)
            .await
            .expect("Failed to seed sample books");
        ctx
    }

    /// A second handle on the same database, independent of `self.db`'s lifecycle
    pub async fn fresh_handle(&self) -> Database {
        Database::new(&self.config)
            .await
            .expect("Failed to create database handle")
    }

    /// Drops the test database and closes every handle this context opened.
    pub async fn cleanup_and_close(&self) -> QueryResult<()> {
        let admin = Database::new(&self.config).await?;
        let dropped = admin
            .database()
            .drop()
            .await
            .during("drop test database");
        admin.close().await;

        if !self.db.is_closed() {
            self.db.close().await;
        }
        dropped
    }
}
