use futures::TryStreamExt;
use mongodb::bson::doc;

use super::helpers::{
    in_stock_published_after_filter, page_offset, price_sort, summary_projection, SortOrder,
};
use crate::db::Database;
use crate::errors::{QueryResult, StoreResultExt};
use crate::models::{Book, BookSummary};

impl Database {
    pub async fn find_in_stock_published_after(&self, year: i32) -> QueryResult<Vec<Book>> {
        self.find_books("find in stock by year", in_stock_published_after_filter(year))
            .await
    }

    /// Every book reduced to title, author and price
    pub async fn find_book_summaries(&self) -> QueryResult<Vec<BookSummary>> {
        let cursor = self
            .books()
            .clone_with_type::<BookSummary>()
            .find(doc! {})
            .projection(summary_projection())
            .await
            .during("find with projection")?;
        cursor.try_collect().await.during("find with projection")
    }

    pub async fn find_books_sorted_by_price(&self, order: SortOrder) -> QueryResult<Vec<Book>> {
        let cursor = self
            .books()
            .find(doc! {})
            .sort(price_sort(order))
            .await
            .during("find sorted by price")?;
        cursor.try_collect().await.during("find sorted by price")
    }

    /// One page of books in the store's natural order. Pages are 1-based.
    pub async fn find_books_page(&self, page: u64, page_size: u64) -> QueryResult<Vec<Book>> {
        let cursor = self
            .books()
            .find(doc! {})
            .skip(page_offset(page, page_size))
            .limit(page_size as i64)
            .await
            .during("find page")?;
        cursor.try_collect().await.during("find page")
    }
}
