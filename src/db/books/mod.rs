pub mod aggregation;
pub mod crud;
pub mod helpers;
pub mod indexes;
pub mod search;

pub use helpers::SortOrder;
