#[cfg(test)]
mod tests {
    use anyhow::Result;
    use bookstore_queries::config::Config;
    use bookstore_queries::db::Database;
    use bookstore_queries::runner::{self, DELETE_TITLE, UPDATED_PRICE, UPDATE_TITLE};
    use bookstore_queries::seed::sample_books;
    use bookstore_queries::test_utils::TestContext;
    use mongodb::{
        bson::{doc, Document},
        options::IndexOptions,
        IndexModel,
    };

    #[tokio::test]
    async fn test_full_run_reports_every_step_and_closes() {
        let ctx = TestContext::seeded().await;

        let result: Result<()> = async {
            let mut out = Vec::new();
            runner::execute(&ctx.db, &mut out).await?;
            assert!(ctx.db.is_closed());

            let output = String::from_utf8(out)?;
            for heading in [
                "📚 Books in Fiction genre:",
                "📚 Books published after 1950:",
                "📚 Books by George Orwell:",
                "💲 Updating price of \"1984\"...",
                "🗑️ Deleting \"Animal Farm\"...",
                "📚 In-stock books after 2010:",
                "🔎 Projection (title, author, price):",
                "⬆️ Books sorted by price (asc):",
                "⬇️ Books sorted by price (desc):",
                "📑 Page 1 (5 books):",
                "📑 Page 2 (next 5 books):",
                "📊 Average price by genre:",
                "👑 Author with most books:",
                "📊 Books grouped by decade:",
                "⚡ Creating indexes...",
                "🔍 Index performance (find by title \"The Hobbit\"):",
            ] {
                assert!(output.contains(heading), "missing heading {heading}");
            }
            assert!(output.contains(&format!("Remaining count: {}", sample_books().len() - 1)));
            assert!(output.contains("Created index: title_1"));
            assert!(output.contains("Created index: author_1_published_year_-1"));

            let explain_heading = output
                .find("🔍 Index performance")
                .expect("explain heading");
            let plan_summary = output.find("Plan summary:").expect("plan summary");
            assert!(explain_heading < plan_summary);

            // Writes persist after the runner's handle is gone
            let check = ctx.fresh_handle().await;
            let updated = check.find_book_by_title(UPDATE_TITLE).await?.expect("updated book");
            assert_eq!(updated.price, Some(UPDATED_PRICE));
            assert!(check.find_book_by_title(DELETE_TITLE).await?.is_none());
            check.close().await;

            Ok(())
        }.await;

        if let Err(e) = ctx.cleanup_and_close().await {
            eprintln!("Warning: Test cleanup failed: {}", e);
        }

        result.unwrap();
    }

    #[tokio::test]
    async fn test_failed_step_aborts_run_but_still_closes() {
        let ctx = TestContext::seeded().await;

        let result: Result<()> = async {
            // Same keys under another name makes the runner's title index creation fail
            let conflicting = IndexModel::builder()
                .keys(doc! { "title": 1 })
                .options(IndexOptions::builder().name("title_lookup".to_string()).build())
                .build();
            ctx.db.books().create_index(conflicting).await?;

            let mut out = Vec::new();
            let err = runner::execute(&ctx.db, &mut out)
                .await
                .expect_err("index creation should conflict");

            assert_eq!(err.operation(), Some("create title index"));
            assert!(ctx.db.is_closed());

            let output = String::from_utf8(out)?;
            assert!(output.contains("⚡ Creating indexes..."));
            assert!(!output.contains("Created index:"));
            assert!(!output.contains("Index performance"));

            // Earlier writes are not rolled back, later steps never ran
            let check = ctx.fresh_handle().await;
            let updated = check.find_book_by_title(UPDATE_TITLE).await?.expect("updated book");
            assert_eq!(updated.price, Some(UPDATED_PRICE));
            assert_eq!(check.count_books().await? as usize, sample_books().len() - 1);
            let names = check.books().list_index_names().await?;
            assert!(!names.contains(&"author_1_published_year_-1".to_string()));
            check.close().await;

            Ok(())
        }.await;

        if let Err(e) = ctx.cleanup_and_close().await {
            eprintln!("Warning: Test cleanup failed: {}", e);
        }

        result.unwrap();
    }

    #[tokio::test]
    async fn test_irregular_documents_do_not_abort_run() {
        let ctx = TestContext::seeded().await;

        let result: Result<()> = async {
            let raw = ctx
                .db
                .database()
                .collection::<Document>(&ctx.config.collection_name);
            raw.insert_many([
                doc! { "title": "Dune", "author": "Frank Herbert", "published_year": 1965.0, "price": 9 },
                doc! { "title": "Untitled Draft", "genre": "Fiction" },
                doc! { "title": "Ledger", "price": "n/a", "in_stock": "maybe" },
            ])
            .await?;

            let mut out = Vec::new();
            runner::execute(&ctx.db, &mut out).await?;
            assert!(ctx.db.is_closed());

            let output = String::from_utf8(out)?;
            assert!(output.contains("\"title\": \"Dune\""));
            assert!(output.contains("Plan summary:"));
            assert!(output.contains(&format!("Remaining count: {}", sample_books().len() + 2)));

            Ok(())
        }.await;

        if let Err(e) = ctx.cleanup_and_close().await {
            eprintln!("Warning: Test cleanup failed: {}", e);
        }

        result.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_server_still_releases_connection() {
        let config = Config {
            mongodb_uri: "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=500".to_string(),
            ..Config::default()
        };
        let db = Database::new(&config).await.unwrap();

        let mut out = Vec::new();
        let err = runner::execute(&db, &mut out).await.unwrap_err();

        assert_eq!(err.operation(), Some("ping"));
        assert!(db.is_closed());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let config = Config {
            mongodb_uri: "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=500".to_string(),
            ..Config::default()
        };
        let db = Database::new(&config).await.unwrap();
        let clone = db.clone();

        db.close().await;
        clone.close().await;

        assert!(db.is_closed());
        assert!(clone.is_closed());
    }
}
