use futures::TryStreamExt;
use mongodb::bson::{doc, Document};

use super::helpers::{
    author_filter, genre_filter, published_after_filter, set_price_update, title_filter,
};
use crate::db::Database;
use crate::errors::{QueryResult, StoreResultExt};
use crate::models::{Book, WriteSummary};

impl Database {
    /// Runs a plain find and drains the cursor
    pub(crate) async fn find_books(&self, operation: &'static str, filter: Document) -> QueryResult<Vec<Book>> {
        let cursor = self.books().find(filter).await.during(operation)?;
        cursor.try_collect().await.during(operation)
    }

    pub async fn find_books_by_genre(&self, genre: &str) -> QueryResult<Vec<Book>> {
        self.find_books("find by genre", genre_filter(genre)).await
    }

    pub async fn find_books_published_after(&self, year: i32) -> QueryResult<Vec<Book>> {
        self.find_books("find by published year", published_after_filter(year)).await
    }

    pub async fn find_books_by_author(&self, author: &str) -> QueryResult<Vec<Book>> {
        self.find_books("find by author", author_filter(author)).await
    }

    /// First book with the given title. Titles are not unique, so which one is
    /// returned when several match is up to the store.
    pub async fn find_book_by_title(&self, title: &str) -> QueryResult<Option<Book>> {
        self.books()
            .find_one(title_filter(title))
            .await
            .during("find by title")
    }

    pub async fn update_price_by_title(&self, title: &str, price: f64) -> QueryResult<WriteSummary> {
        let result = self
            .books()
            .update_one(title_filter(title), set_price_update(price))
            .await
            .during("update price")?;

        Ok(WriteSummary {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    /// Deletes at most one book with the given title and returns how many were removed.
    pub async fn delete_book_by_title(&self, title: &str) -> QueryResult<u64> {
        let result = self
            .books()
            .delete_one(title_filter(title))
            .await
            .during("delete by title")?;
        Ok(result.deleted_count)
    }

    pub async fn count_books(&self) -> QueryResult<u64> {
        self.books()
            .count_documents(doc! {})
            .await
            .during("count documents")
    }

    pub async fn insert_books(&self, books: &[Book]) -> QueryResult<usize> {
        if books.is_empty() {
            return Ok(0);
        }
        let result = self
            .books()
            .insert_many(books)
            .await
            .during("insert books")?;
        Ok(result.inserted_ids.len())
    }

    pub async fn drop_books(&self) -> QueryResult<()> {
        self.books().drop().await.during("drop collection")
    }
}
