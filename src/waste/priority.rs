use chrono::{DateTime, Utc};

use crate::domain::types::Item;

/// How urgently an item should leave the habitat. Deeper expiry overruns,
/// heavier usage and lower stowage priority all push it up the manifest.
pub fn disposal_priority(item: &Item, current_date: &DateTime<Utc>) -> f64 {
    let days_until_expiry = (item.expiry_date - *current_date).num_days();
    let expiry_term = (-days_until_expiry).max(0) as f64 * 5.0;
    let usage_term = item.usage_count as f64 / item.usage_limit.max(1) as f64 * 10.0;
    let priority_term = (6.0 - item.priority as f64) * 20.0;

    expiry_term + usage_term + priority_term
}
