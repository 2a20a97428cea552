use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::constant::{GRASP_ALPHA, TABU_MAX_ITERATIONS, TABU_TENURE};
use crate::domain::state::CargoSystem;
use crate::domain::types::{Item, Placement};
use crate::rearrangement::cost::solution_cost;
use crate::rearrangement::grasp::construct;
use crate::rearrangement::tabu::tabu_search;

/// Propose the next stowage configuration for the existing inventory plus an
/// incoming batch: GRASP builds a start, tabu search refines it.
pub fn plan_rearrangement(state: &CargoSystem, new_items: &[Item], seed: u64) -> Vec<Placement> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let initial = construct(state, new_items, GRASP_ALPHA, &mut rng);
    debug!(
        "GRASP construction: {} moves, cost {:.2}",
        initial.len(),
        solution_cost(&initial, state, new_items)
    );

    let (best, best_cost) = tabu_search(
        initial,
        state,
        new_items,
        TABU_MAX_ITERATIONS,
        TABU_TENURE,
        &mut rng,
    );
    info!(
        "Rearrangement planned: {} moves, cost {:.2}",
        best.len(),
        best_cost
    );
    best
}
