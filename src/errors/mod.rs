use thiserror::Error;

/// The one failure class for a bookstore run.
///
/// Connection failures, query failures and write conflicts all surface through
/// [`QueryError::Store`]; the outer handler treats every variant the same way.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("{operation} failed: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("Failed to decode store result: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    #[error("Failed to write results: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to render results: {0}")]
    Render(#[from] serde_json::Error),
}

impl QueryError {
    pub fn store(operation: &'static str, source: mongodb::error::Error) -> Self {
        QueryError::Store { operation, source }
    }

    /// Name of the store operation that failed, if the failure came from the store.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            QueryError::Store { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Attaches the failing operation's name to a driver result.
pub trait StoreResultExt<T> {
    fn during(self, operation: &'static str) -> QueryResult<T>;
}

impl<T> StoreResultExt<T> for mongodb::error::Result<T> {
    fn during(self, operation: &'static str) -> QueryResult<T> {
        self.map_err(|e| QueryError::store(operation, e))
    }
}
