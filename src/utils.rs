use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::domain::types::{Dimensions, Position};

/// Integer coordinate in [0, limit], clamped so degenerate ranges still
/// sample 0.
pub fn random_coord(limit: f64, rng: &mut ChaCha8Rng) -> f64 {
    let hi = limit.floor().max(0.0) as i64;
    rng.gen_range(0..=hi) as f64
}

/// Uniform corner inside the valid corner box of a container for an item of
/// the given dimensions.
pub fn random_corner(container: &Dimensions, item: &Dimensions, rng: &mut ChaCha8Rng) -> Position {
    Position::new(
        random_coord(container.width - item.width, rng),
        random_coord(container.height - item.height, rng),
        random_coord(container.depth - item.depth, rng),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn random_coord_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let value = random_coord(7.9, &mut rng);
            assert!((0.0..=7.0).contains(&value));
            assert_eq!(value.fract(), 0.0);
        }
        assert_eq!(random_coord(-3.0, &mut rng), 0.0);
    }

    #[test]
    fn random_corner_keeps_item_inside() {
        let container = Dimensions::new(10.0, 8.0, 6.0);
        let item = Dimensions::new(4.0, 4.0, 4.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..50 {
            let corner = random_corner(&container, &item, &mut rng);
            assert!(corner.x + item.width <= container.width);
            assert!(corner.y + item.height <= container.height);
            assert!(corner.z + item.depth <= container.depth);
        }
    }
}
