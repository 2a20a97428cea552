use crate::config::constant::EXPIRY_GROUP_WINDOW_DAYS;
use crate::domain::types::{Container, Item};
use crate::placement::types::Gene;

/// Returned when any item pokes outside its container (or the container
/// index is out of range). Solutions at or below this are invalid.
pub const FIT_PENALTY: f64 = -1000.0;
/// Returned when two items in the same container overlap.
pub const OVERLAP_PENALTY: f64 = -2000.0;

/// Score a candidate assignment. Rewards packed volume, priority items in
/// their preferred zone, co-located similar expiry dates, and short reach
/// from the door at the origin.
pub fn evaluate(genes: &[Gene], containers: &[Container], items: &[Item]) -> f64 {
    let mut space_utilization = 0.0;
    let mut priority_score = 0.0;
    let mut expiry_score = 0.0;
    let mut access_score = 0.0;

    for (index, gene) in genes.iter().enumerate() {
        let Some(container) = containers.get(gene.container) else {
            return FIT_PENALTY;
        };
        let item = &items[index];

        if gene.x + item.dimensions.width > container.dimensions.width
            || gene.y + item.dimensions.height > container.dimensions.height
            || gene.z + item.dimensions.depth > container.dimensions.depth
        {
            return FIT_PENALTY;
        }

        if item.preferred_zone == container.zone {
            priority_score += item.priority as f64 * 10.0;
        }

        let distance = (gene.x + gene.y + gene.z).sqrt();
        access_score += item.priority as f64 / (distance + 1.0);

        for (other_index, other_gene) in genes.iter().enumerate() {
            if other_index == index || other_gene.container != gene.container {
                continue;
            }
            let other = &items[other_index];

            if overlaps(gene, item, other_gene, other) {
                return OVERLAP_PENALTY;
            }

            let gap_days = (item.expiry_date - other.expiry_date).num_days().abs();
            if gap_days < EXPIRY_GROUP_WINDOW_DAYS {
                expiry_score += 5.0;
            }
        }

        space_utilization += item.dimensions.volume() / container.dimensions.volume();
    }

    space_utilization * 100.0 + priority_score * 50.0 + expiry_score * 20.0 + access_score * 30.0
}

// Strict inequality on all three axes; touching faces do not overlap.
fn overlaps(a: &Gene, a_item: &Item, b: &Gene, b_item: &Item) -> bool {
    a.x < b.x + b_item.dimensions.width
        && a.x + a_item.dimensions.width > b.x
        && a.y < b.y + b_item.dimensions.height
        && a.y + a_item.dimensions.height > b.y
        && a.z < b.z + b_item.dimensions.depth
        && a.z + a_item.dimensions.depth > b.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Dimensions, Position};
    use chrono::{Duration, TimeZone, Utc};

    fn item(id: &str, side: f64, priority: u32, zone: &str, expiry_offset_days: i64) -> Item {
        Item::new(
            id,
            id,
            Dimensions::new(side, side, side),
            priority,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::days(expiry_offset_days),
            5,
            zone,
            1.0,
        )
    }

    fn container(id: &str, zone: &str, side: f64) -> Container {
        Container::new(
            id,
            zone,
            Dimensions::new(side, side, side),
            Position::new(0.0, 0.0, 0.0),
        )
    }

    fn gene(container: usize, x: f64, y: f64, z: f64) -> Gene {
        Gene { container, x, y, z }
    }

    #[test]
    fn out_of_bounds_is_fit_penalty() {
        let containers = vec![container("cnt-1", "A", 10.0)];
        let items = vec![item("itm-1", 4.0, 3, "A", 0)];

        assert_eq!(
            evaluate(&[gene(0, 8.0, 0.0, 0.0)], &containers, &items),
            FIT_PENALTY
        );
        assert_eq!(
            evaluate(&[gene(1, 0.0, 0.0, 0.0)], &containers, &items),
            FIT_PENALTY
        );
    }

    #[test]
    fn overlap_is_overlap_penalty() {
        let containers = vec![container("cnt-1", "A", 10.0)];
        let items = vec![item("itm-1", 4.0, 3, "A", 0), item("itm-2", 4.0, 3, "A", 0)];

        let genes = [gene(0, 0.0, 0.0, 0.0), gene(0, 2.0, 2.0, 2.0)];
        assert_eq!(evaluate(&genes, &containers, &items), OVERLAP_PENALTY);

        // Touching faces are fine.
        let genes = [gene(0, 0.0, 0.0, 0.0), gene(0, 4.0, 0.0, 0.0)];
        assert!(evaluate(&genes, &containers, &items) > 0.0);
    }

    #[test]
    fn preferred_zone_dominates_the_score() {
        let containers = vec![container("cnt-a", "A", 10.0), container("cnt-b", "B", 10.0)];
        let items = vec![item("itm-1", 4.0, 5, "A", 0)];

        let in_zone = evaluate(&[gene(0, 0.0, 0.0, 0.0)], &containers, &items);
        let out_of_zone = evaluate(&[gene(1, 0.0, 0.0, 0.0)], &containers, &items);
        assert!(in_zone > out_of_zone + 2000.0);
    }

    #[test]
    fn access_score_decays_with_distance_from_door() {
        let containers = vec![container("cnt-1", "A", 10.0)];
        let items = vec![item("itm-1", 2.0, 4, "B", 0)];

        let near = evaluate(&[gene(0, 0.0, 0.0, 0.0)], &containers, &items);
        let far = evaluate(&[gene(0, 8.0, 8.0, 8.0)], &containers, &items);
        assert!(near > far);
    }

    #[test]
    fn close_expiry_dates_grouped_in_one_container_score_higher() {
        let containers = vec![container("cnt-1", "A", 10.0), container("cnt-2", "A", 10.0)];
        let items = vec![item("itm-1", 2.0, 1, "B", 0), item("itm-2", 2.0, 1, "B", 10)];

        let together = evaluate(
            &[gene(0, 0.0, 0.0, 0.0), gene(0, 4.0, 0.0, 0.0)],
            &containers,
            &items,
        );
        let apart = evaluate(
            &[gene(0, 0.0, 0.0, 0.0), gene(1, 4.0, 0.0, 0.0)],
            &containers,
            &items,
        );
        // Both ordered pairs contribute, at weight 20.
        assert_eq!(together - apart, 2.0 * 5.0 * 20.0);
    }
}
