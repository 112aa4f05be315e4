use mongodb::{bson::Document, IndexModel};

use super::helpers::{author_year_index_keys, explain_find_command, title_filter, title_index_keys};
use crate::db::Database;
use crate::errors::{QueryResult, StoreResultExt};

impl Database {
    async fn create_books_index(&self, operation: &'static str, keys: Document) -> QueryResult<String> {
        let model = IndexModel::builder().keys(keys).build();
        let result = self.books().create_index(model).await.during(operation)?;
        Ok(result.index_name)
    }

    /// Single-field ascending index on `title`
    pub async fn create_title_index(&self) -> QueryResult<String> {
        self.create_books_index("create title index", title_index_keys())
            .await
    }

    /// Compound index: `author` ascending, `published_year` descending
    pub async fn create_author_year_index(&self) -> QueryResult<String> {
        self.create_books_index("create author/year index", author_year_index_keys())
            .await
    }

    /// Raw `executionStats` explain output for a lookup by title.
    pub async fn explain_title_lookup(&self, title: &str) -> QueryResult<Document> {
        let command = explain_find_command(self.collection_name(), title_filter(title));
        self.database()
            .run_command(command)
            .await
            .during("explain title lookup")
    }
}
