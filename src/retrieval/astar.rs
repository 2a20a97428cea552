use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::domain::types::Position;

/// Integer grid cell (x, y, z).
pub type Cell = (i64, i64, i64);

const MOVES: [Cell; 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

pub fn manhattan(a: &Cell, b: &Cell) -> i64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs() + (a.2 - b.2).abs()
}

/// A* over a 6-connected unit grid. Obstacle cells cannot be entered. The
/// returned path includes both endpoints; unreachable goals give an empty
/// path. Equal f-scores resolve in heap insertion order.
pub fn shortest_path(
    start: Cell,
    goal: Cell,
    obstacles: &HashSet<Cell>,
    grid: Cell,
) -> Vec<Position> {
    let (width, height, depth) = grid;
    let in_bounds =
        |c: &Cell| (0..width).contains(&c.0) && (0..height).contains(&c.1) && (0..depth).contains(&c.2);
    if !in_bounds(&start) || !in_bounds(&goal) {
        return vec![];
    }

    let mut open: BinaryHeap<Reverse<(i64, u64, Cell)>> = BinaryHeap::new();
    let mut sequence: u64 = 0;
    let mut g_score: HashMap<Cell, i64> = HashMap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut closed: HashSet<Cell> = HashSet::new();

    g_score.insert(start, 0);
    open.push(Reverse((manhattan(&start, &goal), sequence, start)));

    while let Some(Reverse((_, _, current))) = open.pop() {
        if current == goal {
            return reconstruct(&came_from, current);
        }
        if !closed.insert(current) {
            continue;
        }

        for (dx, dy, dz) in MOVES {
            let neighbour = (current.0 + dx, current.1 + dy, current.2 + dz);
            if !in_bounds(&neighbour)
                || obstacles.contains(&neighbour)
                || closed.contains(&neighbour)
            {
                continue;
            }

            let tentative = g_score[&current] + 1;
            if g_score.get(&neighbour).map_or(true, |g| tentative < *g) {
                came_from.insert(neighbour, current);
                g_score.insert(neighbour, tentative);
                sequence += 1;
                open.push(Reverse((
                    tentative + manhattan(&neighbour, &goal),
                    sequence,
                    neighbour,
                )));
            }
        }
    }

    vec![]
}

fn reconstruct(came_from: &HashMap<Cell, Cell>, mut current: Cell) -> Vec<Position> {
    let mut cells = vec![current];
    while let Some(previous) = came_from.get(&current) {
        current = *previous;
        cells.push(current);
    }
    cells.reverse();
    cells
        .into_iter()
        .map(|(x, y, z)| Position::new(x as f64, y as f64, z as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(path: &[Position]) -> Vec<Cell> {
        path.iter()
            .map(|p| (p.x as i64, p.y as i64, p.z as i64))
            .collect()
    }

    #[test]
    fn path_has_manhattan_length_and_avoids_obstacles() {
        let obstacles: HashSet<Cell> = [(2, 2, 2)].into();
        let path = shortest_path((0, 0, 0), (4, 4, 4), &obstacles, (5, 5, 5));

        assert_eq!(path.len(), 13);
        let cells = cells(&path);
        assert_eq!(cells[0], (0, 0, 0));
        assert_eq!(*cells.last().unwrap(), (4, 4, 4));
        for step in cells.windows(2) {
            assert_eq!(manhattan(&step[0], &step[1]), 1);
        }
        assert!(!cells.contains(&(2, 2, 2)));
    }

    #[test]
    fn start_equals_goal_gives_single_cell_path() {
        let path = shortest_path((0, 0, 0), (0, 0, 0), &HashSet::new(), (3, 3, 3));
        assert_eq!(cells(&path), vec![(0, 0, 0)]);
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        // Seal the goal corner of a flat 3x3x1 grid.
        let obstacles: HashSet<Cell> = [(1, 2, 0), (2, 1, 0)].into();
        let path = shortest_path((0, 0, 0), (2, 2, 0), &obstacles, (3, 3, 1));
        assert!(path.is_empty());
    }

    #[test]
    fn out_of_grid_endpoints_give_empty_path() {
        assert!(shortest_path((0, 0, 0), (5, 0, 0), &HashSet::new(), (5, 5, 5)).is_empty());
        assert!(shortest_path((-1, 0, 0), (1, 0, 0), &HashSet::new(), (5, 5, 5)).is_empty());
    }

    #[test]
    fn detour_around_a_wall_is_shortest() {
        // Wall across x=1 except at y=2 on a 3x3x1 grid.
        let obstacles: HashSet<Cell> = [(1, 0, 0), (1, 1, 0)].into();
        let path = shortest_path((0, 0, 0), (2, 0, 0), &obstacles, (3, 3, 1));
        let cells = cells(&path);
        assert_eq!(cells.len(), 7); // up to y=2, across, back down
        assert!(cells.contains(&(1, 2, 0)));
    }
}
