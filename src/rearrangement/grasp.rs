use std::cmp::Reverse;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::domain::state::CargoSystem;
use crate::domain::types::{Container, Item, Placement};
use crate::rearrangement::cost::zone_term;
use crate::utils::random_corner;

/// Greedy randomized construction: walk the merged item list in priority
/// order and stow each item in a container drawn from the cheapest slice of
/// its restricted candidate list. Items fitting no container are skipped.
pub fn construct(
    state: &CargoSystem,
    new_items: &[Item],
    alpha: f64,
    rng: &mut ChaCha8Rng,
) -> Vec<Placement> {
    let mut items: Vec<&Item> = state.items.values().chain(new_items.iter()).collect();
    // Map order is arbitrary; the id tiebreak keeps seeded runs reproducible.
    items.sort_by(|a, b| Reverse(a.priority).cmp(&Reverse(b.priority)).then(a.id.cmp(&b.id)));

    let mut containers: Vec<&Container> = state.containers.values().collect();
    containers.sort_by(|a, b| {
        state
            .available_volume(b)
            .total_cmp(&state.available_volume(a))
            .then(a.id.cmp(&b.id))
    });

    let mut solution = vec![];
    for item in items {
        let mut rcl: Vec<(&Container, f64)> = vec![];
        for container in &containers {
            if !container.fits(&item.dimensions) {
                continue;
            }
            let volume_ratio = item.dimensions.volume() / container.dimensions.volume();
            let local_cost = zone_term(item, container) + (1.0 - volume_ratio) * 10.0;
            rcl.push((container, local_cost));
        }
        if rcl.is_empty() {
            debug!("No container can hold item {}", item.id);
            continue;
        }

        rcl.sort_by(|a, b| a.1.total_cmp(&b.1));
        let cutoff = ((rcl.len() as f64 * alpha).ceil() as usize).max(1);
        let (container, _) = rcl[rng.gen_range(0..cutoff)];

        solution.push(Placement {
            item_id: item.id.clone(),
            container_id: container.id.clone(),
            position: random_corner(&container.dimensions, &item.dimensions, rng),
        });
    }

    solution
}
