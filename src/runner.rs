//! The fixed sequence of bookstore queries.
//!
//! Every step reads its inputs from the constants below and writes its result
//! to the report; nothing one step returns is fed into another.

use std::io::Write;
use tracing::{debug, error, info};

use crate::db::{books::SortOrder, Database};
use crate::errors::QueryResult;
use crate::models::ExplainSummary;
use crate::report::Reporter;

pub const GENRE: &str = "Fiction";
pub const PUBLISHED_AFTER: i32 = 1950;
pub const AUTHOR: &str = "George Orwell";
pub const UPDATE_TITLE: &str = "1984";
pub const UPDATED_PRICE: f64 = 12.99;
pub const DELETE_TITLE: &str = "Animal Farm";
pub const IN_STOCK_PUBLISHED_AFTER: i32 = 2010;
pub const PAGE_SIZE: u64 = 5;
pub const TOP_AUTHOR_LIMIT: i64 = 1;
pub const EXPLAIN_TITLE: &str = "The Hobbit";

/// Connects, runs every query and always closes the connection.
///
/// A failure stops the sequence and is logged; the update and delete that
/// already ran are not undone. The error is returned for callers that want to
/// inspect it, but the binary does not act on it.
pub async fn execute<W: Write>(db: &Database, out: W) -> QueryResult<()> {
    let mut reporter = Reporter::new(out);

    let result: QueryResult<()> = async {
        db.connect().await?;
        run_queries(db, &mut reporter).await
    }
    .await;

    if let Err(e) = &result {
        error!("❌ Error: {}", e);
    }

    if let Err(e) = reporter.flush() {
        error!("Failed to flush output: {}", e);
    }
    db.close().await;

    result
}

pub async fn run_queries<W: Write>(db: &Database, report: &mut Reporter<W>) -> QueryResult<()> {
    info!("Running bookstore queries against '{}'", db.collection_name());

    // Basic CRUD
    debug!("Step: filtered reads");
    report.records(
        &format!("📚 Books in {} genre:", GENRE),
        &db.find_books_by_genre(GENRE).await?,
    )?;
    report.records(
        &format!("📚 Books published after {}:", PUBLISHED_AFTER),
        &db.find_books_published_after(PUBLISHED_AFTER).await?,
    )?;
    report.records(
        &format!("📚 Books by {}:", AUTHOR),
        &db.find_books_by_author(AUTHOR).await?,
    )?;

    debug!("Step: update price");
    report.heading(&format!("💲 Updating price of \"{}\"...", UPDATE_TITLE))?;
    let write = db.update_price_by_title(UPDATE_TITLE, UPDATED_PRICE).await?;
    report.line(&format!("Matched: {}, modified: {}", write.matched, write.modified))?;
    report.value("Updated:", &db.find_book_by_title(UPDATE_TITLE).await?)?;

    debug!("Step: delete by title");
    report.heading(&format!("🗑️ Deleting \"{}\"...", DELETE_TITLE))?;
    let deleted = db.delete_book_by_title(DELETE_TITLE).await?;
    report.line(&format!("Deleted: {}", deleted))?;
    report.value("Remaining count:", &db.count_books().await?)?;

    // Advanced queries
    debug!("Step: compound filter, projection, sorting, pagination");
    report.records(
        &format!("📚 In-stock books after {}:", IN_STOCK_PUBLISHED_AFTER),
        &db.find_in_stock_published_after(IN_STOCK_PUBLISHED_AFTER).await?,
    )?;
    report.records(
        "🔎 Projection (title, author, price):",
        &db.find_book_summaries().await?,
    )?;
    report.records(
        "⬆️ Books sorted by price (asc):",
        &db.find_books_sorted_by_price(SortOrder::Ascending).await?,
    )?;
    report.records(
        "⬇️ Books sorted by price (desc):",
        &db.find_books_sorted_by_price(SortOrder::Descending).await?,
    )?;
    report.records(
        &format!("📑 Page 1 ({} books):", PAGE_SIZE),
        &db.find_books_page(1, PAGE_SIZE).await?,
    )?;
    report.records(
        &format!("📑 Page 2 (next {} books):", PAGE_SIZE),
        &db.find_books_page(2, PAGE_SIZE).await?,
    )?;

    // Aggregation
    debug!("Step: aggregations");
    report.records("📊 Average price by genre:", &db.average_price_by_genre().await?)?;
    report.records(
        "👑 Author with most books:",
        &db.top_authors(TOP_AUTHOR_LIMIT).await?,
    )?;
    report.records("📊 Books grouped by decade:", &db.count_books_by_decade().await?)?;

    // Indexing
    debug!("Step: indexes");
    report.heading("⚡ Creating indexes...")?;
    let title_index = db.create_title_index().await?;
    report.line(&format!("Created index: {}", title_index))?;
    let author_year_index = db.create_author_year_index().await?;
    report.line(&format!("Created index: {}", author_year_index))?;

    debug!("Step: explain");
    report.heading(&format!(
        "🔍 Index performance (find by title \"{}\"):",
        EXPLAIN_TITLE
    ))?;
    let explain = db.explain_title_lookup(EXPLAIN_TITLE).await?;
    report.document(&explain)?;

    let summary = ExplainSummary::from_explain(&explain);
    report.value("Plan summary:", &summary)?;
    info!(
        "Title lookup plan: {} (index scan: {})",
        summary.stages.join(" -> "),
        summary.uses_index()
    );

    info!("✅ All bookstore queries completed");
    Ok(())
}
