use mongodb::bson::{doc, Document};

/// Direction of a sort on a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn direction(self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

pub fn genre_filter(genre: &str) -> Document {
    doc! { "genre": genre }
}

pub fn author_filter(author: &str) -> Document {
    doc! { "author": author }
}

pub fn title_filter(title: &str) -> Document {
    doc! { "title": title }
}

pub fn published_after_filter(year: i32) -> Document {
    doc! { "published_year": { "$gt": year } }
}

pub fn in_stock_published_after_filter(year: i32) -> Document {
    doc! {
        "in_stock": true,
        "published_year": { "$gt": year },
    }
}

pub fn set_price_update(price: f64) -> Document {
    doc! { "$set": { "price": price } }
}

pub fn summary_projection() -> Document {
    doc! { "title": 1, "author": 1, "price": 1, "_id": 0 }
}

pub fn price_sort(order: SortOrder) -> Document {
    doc! { "price": order.direction() }
}

/// Number of documents to skip for a 1-based page. Page 0 is treated as page 1.
pub fn page_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(page_size)
}

pub fn average_price_by_genre_pipeline() -> Vec<Document> {
    vec![doc! {
        "$group": { "_id": "$genre", "avgPrice": { "$avg": "$price" } }
    }]
}

pub fn top_authors_pipeline(limit: i64) -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$author", "bookCount": { "$sum": 1 } } },
        doc! { "$sort": { "bookCount": -1 } },
        doc! { "$limit": limit },
    ]
}

pub fn books_by_decade_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$project": {
                "decade": {
                    "$multiply": [
                        { "$floor": { "$divide": ["$published_year", 10] } },
                        10
                    ]
                }
            }
        },
        doc! { "$group": { "_id": "$decade", "count": { "$sum": 1 } } },
        doc! { "$sort": { "_id": 1 } },
    ]
}

pub fn title_index_keys() -> Document {
    doc! { "title": 1 }
}

pub fn author_year_index_keys() -> Document {
    doc! { "author": 1, "published_year": -1 }
}

pub fn explain_find_command(collection: &str, filter: Document) -> Document {
    doc! {
        "explain": { "find": collection, "filter": filter },
        "verbosity": "executionStats",
    }
}
