//! Stowage planning core for a fleet of 3D cargo containers.
//!
//! The crate keeps an in-memory [`CargoSystem`] of items and containers and
//! offers five planners over it: guillotine-seeded genetic placement, GRASP +
//! tabu rearrangement, R-tree + A* retrieval paths, BM25 catalog search with
//! a spatial radius, and a knapsack waste selector. Every planner takes an
//! explicit seed so runs are reproducible.

// Module declarations
pub mod config;
pub mod domain;
pub mod packing;
pub mod placement;
pub mod rearrangement;
pub mod retrieval;
pub mod search;
pub mod utils;
pub mod waste;

// Re-export the library surface
pub use domain::state::{CargoSystem, ContainerStatus};
pub use domain::types::{Container, Dimensions, Item, Placement, Position};
pub use placement::genetic::plan_placement;
pub use rearrangement::plan::plan_rearrangement;
pub use retrieval::planner::plan_retrieval;
pub use search::query::search;
pub use waste::knapsack::{select_waste, ReturnCapacity};
