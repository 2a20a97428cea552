use tracing::debug;

use crate::domain::state::CargoSystem;
use crate::domain::types::{Item, Position};
use crate::search::bm25::{bm25_scores, item_document, tokenize_query};

/// Keep only items stowed within `radius` of `location`. Items without a
/// stored position never pass. A non-positive radius disables the filter.
pub fn spatial_filter(items: Vec<Item>, location: &Position, radius: f64) -> Vec<Item> {
    if radius <= 0.0 {
        return items;
    }
    items
        .into_iter()
        .filter(|item| {
            item.position
                .map_or(false, |position| location.distance_to(&position) <= radius)
        })
        .collect()
}

/// Rank the catalog by BM25 over name/id/zone tokens, optionally constrained
/// to an exact priority and a spatial radius. An empty query with no filters
/// returns the whole catalog.
pub fn search(
    query: &str,
    state: &CargoSystem,
    location: Option<Position>,
    radius: Option<f64>,
    priority: Option<u32>,
) -> Vec<Item> {
    let query_terms = tokenize_query(query);
    let spatial = location.zip(radius);

    if query_terms.is_empty() && spatial.is_none() && priority.is_none() {
        return state.items.values().cloned().collect();
    }

    let mut candidates: Vec<Item> = state
        .items
        .values()
        .filter(|item| priority.map_or(true, |p| item.priority == p))
        .cloned()
        .collect();

    if query_terms.is_empty() {
        return match spatial {
            Some((loc, rad)) => spatial_filter(candidates, &loc, rad),
            None => candidates,
        };
    }

    let documents: Vec<(String, Vec<String>)> = candidates
        .iter()
        .map(|item| (item.id.clone(), item_document(item)))
        .collect();
    let scores = bm25_scores(&query_terms, &documents);
    debug!(
        "Scored {} candidate(s) for query {:?}",
        documents.len(),
        query
    );

    candidates.retain(|item| scores.get(&item.id).copied().unwrap_or(0.0) > 0.0);
    candidates.sort_by(|a, b| scores[&b.id].total_cmp(&scores[&a.id]).then(a.id.cmp(&b.id)));

    match spatial {
        Some((loc, rad)) => spatial_filter(candidates, &loc, rad),
        None => candidates,
    }
}
