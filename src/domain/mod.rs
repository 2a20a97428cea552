pub mod log;
pub mod state;
pub mod types;

pub use log::*;
pub use state::*;
pub use types::*;
