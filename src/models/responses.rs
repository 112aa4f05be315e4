use serde::{Deserialize, Serialize};

/// One row of the average-price-by-genre aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreAveragePrice {
    #[serde(rename = "_id")]
    pub genre: Option<String>,
    /// `None` when no document in the group carries a numeric price
    #[serde(rename = "avgPrice")]
    pub avg_price: Option<f64>,
}

/// One row of the books-per-author aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorBookCount {
    #[serde(rename = "_id")]
    pub author: Option<String>,
    #[serde(rename = "bookCount")]
    pub book_count: i64,
}

/// One row of the books-per-decade aggregation.
///
/// The store computes the decade with floating point arithmetic, so it comes
/// back as a double.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeCount {
    #[serde(rename = "_id")]
    pub decade: Option<f64>,
    pub count: i64,
}

impl DecadeCount {
    pub fn decade_start(&self) -> Option<i32> {
        self.decade.map(|d| d as i32)
    }
}

/// Outcome of a single-document write, as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteSummary {
    pub matched: u64,
    pub modified: u64,
}
