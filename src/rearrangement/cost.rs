use crate::config::constant::MOVE_COST;
use crate::domain::state::CargoSystem;
use crate::domain::types::{Container, Item, Placement};

/// Cost of a proposed configuration: a flat charge per move plus a zone
/// alignment term per assignment. Lower is better; good placements of
/// high-priority items push the total down.
pub fn solution_cost(solution: &[Placement], state: &CargoSystem, new_items: &[Item]) -> f64 {
    let mut cost = solution.len() as f64 * MOVE_COST;

    for placement in solution {
        let Some(item) = lookup_item(&placement.item_id, state, new_items) else {
            continue;
        };
        let Some(container) = state.containers.get(&placement.container_id) else {
            continue;
        };
        cost += zone_term(item, container);
    }

    cost
}

/// Reward matching an item's preferred zone, charge for parking it
/// elsewhere; both scaled by priority.
pub fn zone_term(item: &Item, container: &Container) -> f64 {
    if item.preferred_zone == container.zone {
        -(item.priority as f64) * 5.0
    } else {
        (5.0 - item.priority as f64) * 3.0
    }
}

/// Resolve an id against the state first, then the incoming batch.
pub fn lookup_item<'a>(
    item_id: &str,
    state: &'a CargoSystem,
    new_items: &'a [Item],
) -> Option<&'a Item> {
    state
        .items
        .get(item_id)
        .or_else(|| new_items.iter().find(|item| item.id == item_id))
}
