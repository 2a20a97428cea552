pub mod constant {
    // Genetic placement
    pub const POPULATION_SIZE: usize = 50;
    pub const GENERATIONS: usize = 100;
    pub const MUTATION_RATE: f64 = 0.1;
    pub const TOURNAMENT_SIZE: usize = 3;
    pub const CORNER_MARGIN: f64 = 5.0; // random corners sampled in [0, dim - margin]
    pub const EXPIRY_GROUP_WINDOW_DAYS: i64 = 30;

    // GRASP + tabu rearrangement
    pub const GRASP_ALPHA: f64 = 0.3;
    pub const TABU_MAX_ITERATIONS: usize = 100;
    pub const TABU_TENURE: usize = 10;
    pub const MOVE_COST: f64 = 10.0;
    pub const RANDOM_CORNERS_PER_ITEM: usize = 3;

    // Spatial index
    pub const RTREE_MAX_ENTRIES: usize = 5;

    // Waste knapsack discretization
    pub const KNAPSACK_SCALE: f64 = 100.0;
}
