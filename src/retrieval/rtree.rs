use crate::domain::types::{Dimensions, Position};

/// 3D axis-aligned bounding box. Intersection is inclusive on all faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl Aabb {
    pub const ZERO: Aabb = Aabb {
        min_x: 0.0,
        min_y: 0.0,
        min_z: 0.0,
        max_x: 0.0,
        max_y: 0.0,
        max_z: 0.0,
    };

    pub fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Aabb {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    /// Box spanned by an item stowed with its corner at `position`.
    pub fn from_corner(position: &Position, dims: &Dimensions) -> Self {
        Aabb::new(
            position.x,
            position.y,
            position.z,
            position.x + dims.width,
            position.y + dims.height,
            position.z + dims.depth,
        )
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.min_z.min(other.min_z),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
            self.max_z.max(other.max_z),
        )
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
            && self.min_z <= other.max_z
            && self.max_z >= other.min_z
    }

    /// Degenerate boxes have zero volume.
    pub fn volume(&self) -> f64 {
        (self.max_x - self.min_x).max(0.0)
            * (self.max_y - self.min_y).max(0.0)
            * (self.max_z - self.min_z).max(0.0)
    }

    /// Sum of edge lengths, the linear-split seed criterion.
    pub fn margin(&self) -> f64 {
        (self.max_x - self.min_x) + (self.max_y - self.min_y) + (self.max_z - self.min_z)
    }
}

#[derive(Debug)]
enum Node {
    Leaf(Vec<(Aabb, String)>),
    Branch(Vec<(Aabb, Node)>),
}

/// Variable-fanout R-tree over item bounding boxes. Insert-only; the
/// retrieval planner rebuilds it per container walk.
#[derive(Debug)]
pub struct RTree {
    root: Node,
    max_entries: usize,
}

impl RTree {
    pub fn new(max_entries: usize) -> Self {
        RTree {
            root: Node::Leaf(vec![]),
            max_entries,
        }
    }

    pub fn insert(&mut self, item_id: &str, bounds: Aabb) {
        if let Some((first, second)) = insert_rec(&mut self.root, item_id, bounds, self.max_entries)
        {
            // Root split grows the tree by one level.
            self.root = Node::Branch(vec![
                (node_bounds(&first), first),
                (node_bounds(&second), second),
            ]);
        }
    }

    /// Ids of every stored box intersecting the query bounds.
    pub fn query(&self, bounds: &Aabb) -> Vec<String> {
        let mut result = vec![];
        query_rec(&self.root, bounds, &mut result);
        result
    }
}

fn insert_rec(
    node: &mut Node,
    item_id: &str,
    bounds: Aabb,
    max_entries: usize,
) -> Option<(Node, Node)> {
    match node {
        Node::Leaf(entries) => {
            entries.push((bounds, item_id.to_string()));
            if entries.len() > max_entries {
                let (group1, group2) = linear_split(std::mem::take(entries), max_entries);
                Some((Node::Leaf(group1), Node::Leaf(group2)))
            } else {
                None
            }
        }
        Node::Branch(children) => {
            let index = choose_subtree(children, &bounds);
            if let Some((first, second)) =
                insert_rec(&mut children[index].1, item_id, bounds, max_entries)
            {
                children.remove(index);
                children.push((node_bounds(&first), first));
                children.push((node_bounds(&second), second));
            } else {
                children[index].0 = children[index].0.union(&bounds);
            }

            if children.len() > max_entries {
                let (group1, group2) = linear_split(std::mem::take(children), max_entries);
                Some((Node::Branch(group1), Node::Branch(group2)))
            } else {
                None
            }
        }
    }
}

/// Subtree needing the least volume enlargement; ties keep the first.
fn choose_subtree(children: &[(Aabb, Node)], bounds: &Aabb) -> usize {
    let mut best = 0;
    let mut min_enlargement = f64::INFINITY;
    for (index, (child_bounds, _)) in children.iter().enumerate() {
        let enlargement = child_bounds.union(bounds).volume() - child_bounds.volume();
        if enlargement < min_enlargement {
            min_enlargement = enlargement;
            best = index;
        }
    }
    best
}

fn entries_bounds<T>(entries: &[(Aabb, T)]) -> Aabb {
    entries
        .iter()
        .map(|(bounds, _)| *bounds)
        .reduce(|a, b| a.union(&b))
        .unwrap_or(Aabb::ZERO)
}

fn node_bounds(node: &Node) -> Aabb {
    match node {
        Node::Leaf(entries) => entries_bounds(entries),
        Node::Branch(children) => entries_bounds(children),
    }
}

/// Linear split: seed with the pair whose combined box has minimum margin,
/// then distribute greedily into whichever group needs less enlargement.
/// Once a group holds ⌈M/2⌉ entries the rest go to the other group.
fn linear_split<T>(entries: Vec<(Aabb, T)>, max_entries: usize) -> (Vec<(Aabb, T)>, Vec<(Aabb, T)>) {
    let mut seed_a = 0;
    let mut seed_b = 1;
    let mut min_margin = f64::INFINITY;
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let margin = entries[i].0.union(&entries[j].0).margin();
            if margin < min_margin {
                min_margin = margin;
                seed_a = i;
                seed_b = j;
            }
        }
    }

    let mut remaining = entries;
    let second = remaining.remove(seed_b); // seed_b > seed_a, remove it first
    let first = remaining.remove(seed_a);
    let mut group1 = vec![first];
    let mut group2 = vec![second];
    let half = max_entries.div_ceil(2);

    while !remaining.is_empty() {
        if group1.len() >= half {
            group2.append(&mut remaining);
            break;
        }
        if group2.len() >= half {
            group1.append(&mut remaining);
            break;
        }

        let bounds1 = entries_bounds(&group1);
        let bounds2 = entries_bounds(&group2);
        let mut selected = 0;
        let mut to_first = true;
        let mut min_diff = f64::INFINITY;
        for (index, entry) in remaining.iter().enumerate() {
            let enlargement1 = bounds1.union(&entry.0).volume() - bounds1.volume();
            let enlargement2 = bounds2.union(&entry.0).volume() - bounds2.volume();
            let diff = (enlargement1 - enlargement2).abs();
            if diff < min_diff {
                min_diff = diff;
                selected = index;
                to_first = enlargement1 < enlargement2;
            }
        }

        let entry = remaining.remove(selected);
        if to_first {
            group1.push(entry);
        } else {
            group2.push(entry);
        }
    }

    (group1, group2)
}

fn query_rec(node: &Node, bounds: &Aabb, result: &mut Vec<String>) {
    match node {
        Node::Leaf(entries) => {
            for (entry_bounds, item_id) in entries {
                if entry_bounds.intersects(bounds) {
                    result.push(item_id.clone());
                }
            }
        }
        Node::Branch(children) => {
            for (child_bounds, child) in children {
                if child_bounds.intersects(bounds) {
                    query_rec(child, bounds, result);
                }
            }
        }
    }
}
