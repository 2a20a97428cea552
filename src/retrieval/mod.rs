pub mod astar;
pub mod planner;
pub mod rtree;

pub use astar::*;
pub use planner::*;
pub use rtree::*;
