use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::constant::KNAPSACK_SCALE;
use crate::domain::types::Item;
use crate::waste::priority::disposal_priority;

/// Return-vehicle capacity. Unspecified axes default to unlimited.
#[derive(Debug, Clone, Copy)]
pub struct ReturnCapacity {
    pub max_weight: f64,
    pub max_volume: f64,
}

impl Default for ReturnCapacity {
    fn default() -> Self {
        ReturnCapacity {
            max_weight: f64::INFINITY,
            max_volume: f64::INFINITY,
        }
    }
}

type Memo = HashMap<(usize, i64, i64), (f64, Vec<usize>)>;

/// Pick the waste manifest maximizing total disposal priority under the
/// vehicle's weight and volume limits. Everything is returned unchanged when
/// it already fits; otherwise a discretized 0/1 knapsack chooses, with a
/// greedy pass restoring feasibility when rounding overshoots.
pub fn select_waste(
    items: &[Item],
    capacity: &ReturnCapacity,
    current_date: &DateTime<Utc>,
) -> Vec<Item> {
    let total_weight: f64 = items.iter().map(|item| item.weight).sum();
    let total_volume: f64 = items.iter().map(|item| item.dimensions.volume()).sum();
    if total_weight <= capacity.max_weight && total_volume <= capacity.max_volume {
        return items.to_vec();
    }

    let priorities: Vec<f64> = items
        .iter()
        .map(|item| disposal_priority(item, current_date))
        .collect();
    let scaled_weights = scale_axis(
        items.iter().map(|item| item.weight),
        capacity.max_weight,
        items.len(),
    );
    let scaled_volumes = scale_axis(
        items.iter().map(|item| item.dimensions.volume()),
        capacity.max_volume,
        items.len(),
    );

    let budget = KNAPSACK_SCALE as i64;
    let mut memo: Memo = HashMap::new();
    let (_, chosen) = best_subset(
        0,
        budget,
        budget,
        &scaled_weights,
        &scaled_volumes,
        &priorities,
        &mut memo,
    );
    let mut selected: Vec<Item> = chosen.iter().map(|&index| items[index].clone()).collect();

    let selected_weight: f64 = selected.iter().map(|item| item.weight).sum();
    let selected_volume: f64 = selected.iter().map(|item| item.dimensions.volume()).sum();
    if selected_weight > capacity.max_weight || selected_volume > capacity.max_volume {
        debug!("Discretized selection overshoots capacity, using greedy fallback");
        selected = greedy_fallback(items, &priorities, capacity);
    }

    info!(
        "Waste manifest holds {} of {} item(s)",
        selected.len(),
        items.len()
    );
    selected
}

// Map one axis onto the [1, 100] integer scale; an unlimited axis costs
// nothing.
fn scale_axis(values: impl Iterator<Item = f64>, max: f64, len: usize) -> Vec<i64> {
    if !max.is_finite() {
        return vec![0; len];
    }
    let scale = if max > 0.0 { KNAPSACK_SCALE / max } else { 1.0 };
    values
        .map(|value| ((value * scale).floor() as i64).max(1))
        .collect()
}

fn best_subset(
    index: usize,
    remaining_weight: i64,
    remaining_volume: i64,
    weights: &[i64],
    volumes: &[i64],
    priorities: &[f64],
    memo: &mut Memo,
) -> (f64, Vec<usize>) {
    if index == weights.len() {
        return (0.0, vec![]);
    }
    let key = (index, remaining_weight, remaining_volume);
    if let Some(hit) = memo.get(&key) {
        return hit.clone();
    }

    let mut best = best_subset(
        index + 1,
        remaining_weight,
        remaining_volume,
        weights,
        volumes,
        priorities,
        memo,
    );

    if weights[index] <= remaining_weight && volumes[index] <= remaining_volume {
        let (sub_value, mut sub_set) = best_subset(
            index + 1,
            remaining_weight - weights[index],
            remaining_volume - volumes[index],
            weights,
            volumes,
            priorities,
            memo,
        );
        let take_value = priorities[index] + sub_value;
        if take_value > best.0 {
            sub_set.insert(0, index);
            best = (take_value, sub_set);
        }
    }

    memo.insert(key, best.clone());
    best
}

fn greedy_fallback(items: &[Item], priorities: &[f64], capacity: &ReturnCapacity) -> Vec<Item> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|a, b| priorities[*b].total_cmp(&priorities[*a]));

    let mut selected = vec![];
    let mut weight = 0.0;
    let mut volume = 0.0;
    for index in order {
        let item = &items[index];
        if weight + item.weight <= capacity.max_weight
            && volume + item.dimensions.volume() <= capacity.max_volume
        {
            selected.push(item.clone());
            weight += item.weight;
            volume += item.dimensions.volume();
        }
    }
    selected
}
