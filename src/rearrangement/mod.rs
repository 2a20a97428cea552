pub mod cost;
pub mod grasp;
pub mod neighbourhood;
pub mod plan;
pub mod tabu;

pub use cost::*;
pub use grasp::*;
pub use neighbourhood::*;
pub use plan::*;
pub use tabu::*;
