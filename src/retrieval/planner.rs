use std::collections::HashSet;

use tracing::debug;

use crate::config::constant::RTREE_MAX_ENTRIES;
use crate::domain::state::CargoSystem;
use crate::domain::types::Position;
use crate::retrieval::astar::{shortest_path, Cell};
use crate::retrieval::rtree::{Aabb, RTree};

/// Plan the crew path from the container door at the origin to an item's
/// corner, navigating around the other stowed items. Missing item, container
/// or stowed position gives an empty path, as does an unreachable goal.
pub fn plan_retrieval(item_id: &str, state: &CargoSystem) -> Vec<Position> {
    let Some(item) = state.items.get(item_id) else {
        return vec![];
    };
    let Some(container) = item
        .container_id
        .as_ref()
        .and_then(|id| state.containers.get(id))
    else {
        return vec![];
    };
    let Some(position) = &item.position else {
        return vec![];
    };

    // Index the neighbours spatially; the container-wide query enumerates
    // the obstacle set and leaves room for narrower corridor queries later.
    let mut index = RTree::new(RTREE_MAX_ENTRIES);
    for other_id in &container.items {
        if other_id == item_id {
            continue;
        }
        let Some(other) = state.items.get(other_id) else {
            continue;
        };
        if let Some(other_position) = &other.position {
            index.insert(&other.id, Aabb::from_corner(other_position, &other.dimensions));
        }
    }

    let container_bounds = Aabb::new(
        0.0,
        0.0,
        0.0,
        container.dimensions.width,
        container.dimensions.height,
        container.dimensions.depth,
    );
    let obstacles: HashSet<Cell> = index
        .query(&container_bounds)
        .iter()
        .filter_map(|id| state.items.get(id))
        .filter_map(|other| other.position.as_ref())
        .map(floor_cell)
        .collect();

    let goal = floor_cell(position);
    let grid = (
        container.dimensions.width.floor() as i64,
        container.dimensions.height.floor() as i64,
        container.dimensions.depth.floor() as i64,
    );
    debug!(
        "Retrieval for {}: goal {:?}, {} obstacle cell(s) in grid {:?}",
        item_id,
        goal,
        obstacles.len(),
        grid
    );

    shortest_path((0, 0, 0), goal, &obstacles, grid)
}

fn floor_cell(position: &Position) -> Cell {
    (
        position.x.floor() as i64,
        position.y.floor() as i64,
        position.z.floor() as i64,
    )
}
