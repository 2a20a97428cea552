pub mod bm25;
pub mod query;

pub use bm25::*;
pub use query::*;
