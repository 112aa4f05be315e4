use tracing::info;

use crate::db::Database;
use crate::errors::QueryResult;
use crate::models::Book;

/// The sample bookstore inventory the query runner expects to find.
pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new("To Kill a Mockingbird", "Harper Lee", "Fiction", 1960, 12.99, true)
            .with_details(336, "J. B. Lippincott & Co."),
        Book::new("1984", "George Orwell", "Dystopian", 1949, 10.99, true)
            .with_details(328, "Secker & Warburg"),
        Book::new("The Great Gatsby", "F. Scott Fitzgerald", "Fiction", 1925, 9.99, true)
            .with_details(180, "Charles Scribner's Sons"),
        Book::new("Brave New World", "Aldous Huxley", "Dystopian", 1932, 11.50, false)
            .with_details(311, "Chatto & Windus"),
        Book::new("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937, 14.99, true)
            .with_details(310, "George Allen & Unwin"),
        Book::new("The Catcher in the Rye", "J.D. Salinger", "Fiction", 1951, 8.99, true)
            .with_details(224, "Little, Brown and Company"),
        Book::new("Pride and Prejudice", "Jane Austen", "Romance", 1813, 7.99, true)
            .with_details(432, "T. Egerton, Whitehall"),
        Book::new("The Lord of the Rings", "J.R.R. Tolkien", "Fantasy", 1954, 19.99, true)
            .with_details(1178, "Allen & Unwin"),
        Book::new("Animal Farm", "George Orwell", "Political Satire", 1945, 8.50, false)
            .with_details(112, "Secker & Warburg"),
        Book::new("The Alchemist", "Paulo Coelho", "Fiction", 1988, 10.99, true)
            .with_details(197, "HarperOne"),
        Book::new("Moby Dick", "Herman Melville", "Adventure", 1851, 12.50, false)
            .with_details(635, "Harper & Brothers"),
        Book::new("Wuthering Heights", "Emily Brontë", "Gothic Fiction", 1847, 9.99, true)
            .with_details(416, "Thomas Cautley Newby"),
    ]
}

/// Loads [`sample_books`] into an empty collection and returns how many were inserted.
///
/// A collection that already holds documents is left alone unless
/// `drop_existing` is set, in which case it is dropped and reloaded.
pub async fn seed_books(db: &Database, drop_existing: bool) -> QueryResult<usize> {
    if drop_existing {
        info!("🗑️ Dropping existing '{}' collection", db.collection_name());
        db.drop_books().await?;
    }

    let existing = db.count_books().await?;
    if existing > 0 {
        info!("✅ Collection already holds {} books, skipping seed", existing);
        return Ok(0);
    }

    let inserted = db.insert_books(&sample_books()).await?;
    info!("✅ Inserted {} books", inserted);
    Ok(inserted)
}
