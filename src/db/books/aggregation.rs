use futures::TryStreamExt;
use mongodb::bson::{self, Document};
use serde::de::DeserializeOwned;

use super::helpers::{
    average_price_by_genre_pipeline, books_by_decade_pipeline, top_authors_pipeline,
};
use crate::db::Database;
use crate::errors::{QueryResult, StoreResultExt};
use crate::models::{AuthorBookCount, DecadeCount, GenreAveragePrice};

impl Database {
    async fn aggregate_books<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        pipeline: Vec<Document>,
    ) -> QueryResult<Vec<T>> {
        let cursor = self.books().aggregate(pipeline).await.during(operation)?;
        let rows: Vec<Document> = cursor.try_collect().await.during(operation)?;

        rows.into_iter()
            .map(|row| bson::from_document(row).map_err(Into::into))
            .collect()
    }

    pub async fn average_price_by_genre(&self) -> QueryResult<Vec<GenreAveragePrice>> {
        self.aggregate_books("average price by genre", average_price_by_genre_pipeline())
            .await
    }

    /// Authors ranked by number of books, highest first
    pub async fn top_authors(&self, limit: i64) -> QueryResult<Vec<AuthorBookCount>> {
        self.aggregate_books("top authors", top_authors_pipeline(limit))
            .await
    }

    pub async fn count_books_by_decade(&self) -> QueryResult<Vec<DecadeCount>> {
        self.aggregate_books("count by decade", books_by_decade_pipeline())
            .await
    }
}
