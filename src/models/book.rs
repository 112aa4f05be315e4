use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Deserializer, Serialize};

/// A book as stored in the `books` collection.
///
/// Documents are schema-less on the store side, so every attribute decodes
/// leniently: a missing or oddly typed value becomes empty instead of failing
/// the whole cursor. Fields this type does not name are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none", default, deserialize_with = "lenient_i32")]
    pub published_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default, deserialize_with = "lenient_bool")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default, deserialize_with = "lenient_i32")]
    pub pages: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default, deserialize_with = "lenient_opt_string")]
    pub publisher: Option<String>,
}

impl Book {
    pub fn new(
        title: &str,
        author: &str,
        genre: &str,
        published_year: i32,
        price: f64,
        in_stock: bool,
    ) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            published_year: Some(published_year),
            price: Some(price),
            in_stock: Some(in_stock),
            pages: None,
            publisher: None,
        }
    }

    pub fn with_details(mut self, pages: i32, publisher: &str) -> Self {
        self.pages = Some(pages);
        self.publisher = Some(publisher.to_string());
        self
    }
}

/// Projection of a book onto `title`, `author` and `price`, without `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none", default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::String(s)) => Some(s),
        _ => None,
    })
}

/// Integral numbers of any BSON width; doubles only when they have no fraction.
fn lenient_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::Int32(n)) => Some(n),
        Some(Bson::Int64(n)) => i32::try_from(n).ok(),
        Some(Bson::Double(n)) if n.fract() == 0.0 && n.abs() <= f64::from(i32::MAX) => Some(n as i32),
        _ => None,
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::Double(n)) => Some(n),
        Some(Bson::Int32(n)) => Some(f64::from(n)),
        Some(Bson::Int64(n)) => Some(n as f64),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::Boolean(b)) => Some(b),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_book_without_id_omits_id_field() {
        let book = Book::new("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937, 14.99, true);
        let document = bson::to_document(&book).unwrap();
        assert!(!document.contains_key("_id"));
        assert!(!document.contains_key("pages"));
        assert_eq!(document.get_str("title").unwrap(), "The Hobbit");
        assert_eq!(document.get_i32("published_year").unwrap(), 1937);
    }

    #[test]
    fn test_book_decode_ignores_unknown_fields() {
        let id = ObjectId::new();
        let document = doc! {
            "_id": id,
            "title": "1984",
            "author": "George Orwell",
            "genre": "Dystopian",
            "published_year": 1949,
            "price": 10.99,
            "in_stock": true,
            "isbn": "978-0451524935",
        };

        let book: Book = bson::from_document(document).unwrap();
        assert_eq!(book.id, Some(id));
        assert_eq!(book.title, "1984");
        assert_eq!(book.publisher, None);
    }

    #[test]
    fn test_irregular_book_document_still_decodes() {
        let document = doc! {
            "title": "Dune",
            "author": "Frank Herbert",
            "published_year": 1965.0,
            "price": 10_i32,
            "pages": "unknown",
        };

        let book: Book = bson::from_document(document).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.genre, "");
        assert_eq!(book.published_year, Some(1965));
        assert_eq!(book.price, Some(10.0));
        assert_eq!(book.in_stock, None);
        assert_eq!(book.pages, None);
    }

    #[test]
    fn test_fractional_year_is_dropped_not_rejected() {
        let book: Book = bson::from_document(doc! {
            "title": "Odd Year",
            "published_year": 1965.5,
            "in_stock": "yes",
        })
        .unwrap();
        assert_eq!(book.published_year, None);
        assert_eq!(book.in_stock, None);
    }

    #[test]
    fn test_summary_without_price_decodes() {
        let summary: BookSummary = bson::from_document(doc! { "title": "Dune" }).unwrap();
        assert_eq!(summary.title, "Dune");
        assert_eq!(summary.author, "");
        assert_eq!(summary.price, None);
    }
}
