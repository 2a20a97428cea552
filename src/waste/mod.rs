pub mod knapsack;
pub mod priority;

pub use knapsack::*;
pub use priority::*;
