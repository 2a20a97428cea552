use std::cmp::Reverse;

use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::constant::{
    CORNER_MARGIN, GENERATIONS, MUTATION_RATE, POPULATION_SIZE, TOURNAMENT_SIZE,
};
use crate::domain::types::{Container, Item, Placement, Position};
use crate::packing::guillotine::GuillotineBin;
use crate::placement::fitness::evaluate;
use crate::placement::types::{Gene, PlacementSolution};
use crate::utils::random_coord;

/// Plan stowage for a batch of items across the fleet. Items are considered
/// in priority order (descending); the result is the fittest assignment found
/// within the generation budget and may still be infeasible. Callers
/// validate before applying.
pub fn plan_placement(containers: &[Container], items: &[Item], seed: u64) -> Vec<Placement> {
    if containers.is_empty() || items.is_empty() {
        return vec![];
    }

    let mut sorted_items = items.to_vec();
    sorted_items.sort_by_key(|item| Reverse(item.priority));

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let best = evolve(
        containers,
        &sorted_items,
        POPULATION_SIZE,
        GENERATIONS,
        &mut rng,
    );
    info!(
        "Placement planned for {} items, fitness {:.2}",
        sorted_items.len(),
        best.fitness
    );

    best.genes
        .iter()
        .zip(&sorted_items)
        .map(|(gene, item)| Placement {
            item_id: item.id.clone(),
            container_id: containers[gene.container].id.clone(),
            position: Position::new(gene.x, gene.y, gene.z),
        })
        .collect()
}

/// Run the genetic search: half the population seeded by guillotine packing,
/// half random, then tournament selection with 1-elitism, one-point
/// crossover and per-gene mutation.
pub fn evolve(
    containers: &[Container],
    items: &[Item],
    population_size: usize,
    generations: usize,
    rng: &mut ChaCha8Rng,
) -> PlacementSolution {
    let mut population: Vec<Vec<Gene>> = Vec::with_capacity(population_size);
    for _ in 0..population_size / 2 {
        population.push(seed_guillotine(containers, items, rng));
    }
    while population.len() < population_size {
        population.push(seed_random(containers, items.len(), rng));
    }

    let mut best_seen = f64::NEG_INFINITY;
    for generation in 0..generations {
        let fitnesses = evaluate_population(&population, containers, items);
        let elite = fittest_index(&fitnesses);
        if fitnesses[elite] > best_seen {
            best_seen = fitnesses[elite];
            debug!(
                "New best at generation {}: fitness = {:.2}",
                generation, best_seen
            );
        }

        let mut next_population = Vec::with_capacity(population_size);
        next_population.push(population[elite].clone());
        while next_population.len() < population_size {
            let parent1 = tournament(&fitnesses, rng);
            let parent2 = tournament(&fitnesses, rng);
            let mut child = crossover(&population[parent1], &population[parent2], rng);
            mutate(&mut child, containers, rng);
            next_population.push(child);
        }
        population = next_population;
    }

    let fitnesses = evaluate_population(&population, containers, items);
    let best = fittest_index(&fitnesses);
    let fitness = fitnesses[best];
    PlacementSolution {
        genes: population.swap_remove(best),
        fitness,
    }
}

fn evaluate_population(
    population: &[Vec<Gene>],
    containers: &[Container],
    items: &[Item],
) -> Vec<f64> {
    population
        .par_iter()
        .map(|genes| evaluate(genes, containers, items))
        .collect()
}

fn fittest_index(fitnesses: &[f64]) -> usize {
    fitnesses
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(index, _)| index)
        .expect("population is never empty")
}

/// Pick the fittest of `TOURNAMENT_SIZE` distinct random individuals.
fn tournament(fitnesses: &[f64], rng: &mut ChaCha8Rng) -> usize {
    (0..fitnesses.len())
        .choose_multiple(rng, TOURNAMENT_SIZE.min(fitnesses.len()))
        .into_iter()
        .max_by(|a, b| fitnesses[*a].total_cmp(&fitnesses[*b]))
        .expect("tournament pool is never empty")
}

fn crossover(parent1: &[Gene], parent2: &[Gene], rng: &mut ChaCha8Rng) -> Vec<Gene> {
    if parent1.len() < 2 {
        return parent1.to_vec();
    }
    let cut = rng.gen_range(1..parent1.len());
    parent1[..cut]
        .iter()
        .chain(parent2[cut..].iter())
        .copied()
        .collect()
}

fn mutate(genes: &mut [Gene], containers: &[Container], rng: &mut ChaCha8Rng) {
    for gene in genes.iter_mut() {
        if rng.gen::<f64>() < MUTATION_RATE {
            let container = rng.gen_range(0..containers.len());
            let dims = &containers[container].dimensions;
            *gene = Gene {
                container,
                x: random_coord(dims.width - CORNER_MARGIN, rng),
                y: random_coord(dims.height - CORNER_MARGIN, rng),
                z: random_coord(dims.depth - CORNER_MARGIN, rng),
            };
        }
    }
}

/// Shuffled walk over the items: each one goes to the first container whose
/// guillotine bin (replaying this walk's earlier same-container choices)
/// accepts it, falling back to a random corner of the first container.
fn seed_guillotine(containers: &[Container], items: &[Item], rng: &mut ChaCha8Rng) -> Vec<Gene> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.shuffle(rng);

    let mut genes: Vec<Option<Gene>> = vec![None; items.len()];
    for &item_index in &order {
        let item = &items[item_index];
        let mut placed = false;

        for (container_index, container) in containers.iter().enumerate() {
            let mut bin = GuillotineBin::new(
                container.dimensions.width,
                container.dimensions.height,
                container.dimensions.depth,
            );
            for (other_index, slot) in genes.iter().enumerate() {
                if let Some(gene) = slot {
                    if gene.container == container_index {
                        let other = &items[other_index].dimensions;
                        bin.insert(other.width, other.height, other.depth);
                    }
                }
            }

            if let Some(pos) = bin.insert(
                item.dimensions.width,
                item.dimensions.height,
                item.dimensions.depth,
            ) {
                genes[item_index] = Some(Gene {
                    container: container_index,
                    x: pos.x,
                    y: pos.y,
                    z: pos.z,
                });
                placed = true;
                break;
            }
        }

        if !placed {
            let dims = &containers[0].dimensions;
            genes[item_index] = Some(Gene {
                container: 0,
                x: random_coord(dims.width - item.dimensions.width, rng),
                y: random_coord(dims.height - item.dimensions.height, rng),
                z: random_coord(dims.depth - item.dimensions.depth, rng),
            });
        }
    }

    genes
        .into_iter()
        .map(|slot| slot.expect("every item receives a gene"))
        .collect()
}

fn seed_random(containers: &[Container], item_count: usize, rng: &mut ChaCha8Rng) -> Vec<Gene> {
    (0..item_count)
        .map(|_| {
            let container = rng.gen_range(0..containers.len());
            let dims = &containers[container].dimensions;
            Gene {
                container,
                x: random_coord(dims.width - CORNER_MARGIN, rng),
                y: random_coord(dims.height - CORNER_MARGIN, rng),
                z: random_coord(dims.depth - CORNER_MARGIN, rng),
            }
        })
        .collect()
}
