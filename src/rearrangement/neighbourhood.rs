use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::config::constant::RANDOM_CORNERS_PER_ITEM;
use crate::domain::state::CargoSystem;
use crate::domain::types::{Container, Item, Placement};
use crate::rearrangement::cost::{lookup_item, solution_cost};
use crate::utils::random_corner;

/// Generate and score the neighbourhood of a configuration, cheapest first.
///
/// Three operators: reassign an item to another container at its current
/// corner, jump an item to a few random corners of its container, and swap
/// the berths of two assignments.
pub fn find_neighbours(
    current: &[Placement],
    state: &CargoSystem,
    new_items: &[Item],
    rng: &mut ChaCha8Rng,
) -> Vec<(f64, Vec<Placement>)> {
    let mut containers: Vec<&Container> = state.containers.values().collect();
    containers.sort_by(|a, b| a.id.cmp(&b.id));

    let mut neighbours: Vec<Vec<Placement>> = vec![];

    for (index, placement) in current.iter().enumerate() {
        for container in &containers {
            if container.id == placement.container_id {
                continue;
            }
            let mut neighbour = current.to_vec();
            neighbour[index].container_id = container.id.clone();
            neighbours.push(neighbour);
        }
    }

    for (index, placement) in current.iter().enumerate() {
        let Some(container) = state.containers.get(&placement.container_id) else {
            continue;
        };
        let Some(item) = lookup_item(&placement.item_id, state, new_items) else {
            continue;
        };
        for _ in 0..RANDOM_CORNERS_PER_ITEM {
            let mut neighbour = current.to_vec();
            neighbour[index].position =
                random_corner(&container.dimensions, &item.dimensions, rng);
            neighbours.push(neighbour);
        }
    }

    for i in 0..current.len() {
        for j in (i + 1)..current.len() {
            let mut neighbour = current.to_vec();
            let berth_i = (neighbour[i].container_id.clone(), neighbour[i].position);
            neighbour[i].container_id = neighbour[j].container_id.clone();
            neighbour[i].position = neighbour[j].position;
            neighbour[j].container_id = berth_i.0;
            neighbour[j].position = berth_i.1;
            neighbours.push(neighbour);
        }
    }

    let mut scored: Vec<(f64, Vec<Placement>)> = neighbours
        .into_par_iter()
        .map(|neighbour| (solution_cost(&neighbour, state, new_items), neighbour))
        .collect();
    scored.par_sort_by(|a, b| a.0.total_cmp(&b.0));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Dimensions, Position};
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;

    #[test]
    fn operator_counts_match_the_neighbourhood_shape() {
        let mut state = CargoSystem::with_current_date(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        );
        for (id, zone) in [("cnt-a", "A"), ("cnt-b", "B"), ("cnt-c", "C")] {
            state.add_container(Container::new(
                id,
                zone,
                Dimensions::new(10.0, 10.0, 10.0),
                Position::new(0.0, 0.0, 0.0),
            ));
        }
        let batch: Vec<Item> = (0..3)
            .map(|i| {
                Item::new(
                    &format!("itm-{i}"),
                    "Spare Part",
                    Dimensions::new(2.0, 2.0, 2.0),
                    3,
                    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
                    5,
                    "A",
                    1.0,
                )
            })
            .collect();
        let current: Vec<Placement> = batch
            .iter()
            .map(|item| Placement {
                item_id: item.id.clone(),
                container_id: "cnt-a".into(),
                position: Position::new(0.0, 0.0, 0.0),
            })
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let neighbours = find_neighbours(&current, &state, &batch, &mut rng);

        // 3 items x 2 other containers + 3 items x 3 corners + 3 swaps
        assert_eq!(neighbours.len(), 6 + 9 + 3);
        for pair in neighbours.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
        }
    }
}
