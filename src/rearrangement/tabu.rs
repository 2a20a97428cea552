use std::collections::VecDeque;

use itertools::Itertools;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::domain::state::CargoSystem;
use crate::domain::types::{Item, Placement};
use crate::rearrangement::cost::solution_cost;
use crate::rearrangement::neighbourhood::find_neighbours;

/// Recency signature of a whole configuration. Tabu on full solution state
/// gives recency-based diversification without move bookkeeping.
pub fn signature(solution: &[Placement]) -> String {
    solution
        .iter()
        .map(|p| {
            format!(
                "{}@{}:{},{},{}",
                p.item_id, p.container_id, p.position.x, p.position.y, p.position.z
            )
        })
        .join("|")
}

/// Push the latest signature and trim the list back to its tenure.
pub fn push_tabu(tabu_list: &mut VecDeque<String>, signature: String, tenure: usize) {
    tabu_list.push_front(signature);
    while tabu_list.len() > tenure {
        tabu_list.pop_back();
    }
}

/// Improve a configuration by steepest-descent over the neighbourhood with a
/// recency tabu list. A tabu neighbour is only admissible when strictly
/// better than the incumbent best (aspiration).
pub fn tabu_search(
    initial: Vec<Placement>,
    state: &CargoSystem,
    new_items: &[Item],
    max_iterations: usize,
    tenure: usize,
    rng: &mut ChaCha8Rng,
) -> (Vec<Placement>, f64) {
    let mut best_cost = solution_cost(&initial, state, new_items);
    let mut current = initial.clone();
    let mut best = initial;
    let mut tabu_list: VecDeque<String> = VecDeque::new();

    for iteration in 0..max_iterations {
        let neighbours = find_neighbours(&current, state, new_items, rng);
        let chosen = neighbours.into_iter().find(|(cost, neighbour)| {
            *cost < best_cost || !tabu_list.contains(&signature(neighbour))
        });

        let Some((cost, neighbour)) = chosen else {
            debug!("No admissible neighbour at iteration {}", iteration);
            break;
        };

        current = neighbour;
        if cost < best_cost {
            best = current.clone();
            best_cost = cost;
            debug!("New best at iteration {}: cost = {:.2}", iteration, cost);
        }
        push_tabu(&mut tabu_list, signature(&current), tenure);
    }

    (best, best_cost)
}
