// Re-export all model types for ease of use

pub mod book;
pub mod explain;
pub mod responses;

// Re-export commonly used types
pub use book::*;
pub use explain::*;
pub use responses::*;
