pub mod fitness;
pub mod genetic;
pub mod types;

pub use fitness::*;
pub use genetic::*;
pub use types::*;
