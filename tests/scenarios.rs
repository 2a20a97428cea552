use chrono::{DateTime, Duration, TimeZone, Utc};

use stowage::{
    plan_placement, plan_rearrangement, plan_retrieval, search, select_waste, CargoSystem,
    Container, Dimensions, Item, Placement, Position, ReturnCapacity,
};

const SEED: u64 = 0; // fix seed for reproducibility

fn start_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
}

fn fleet() -> Vec<Container> {
    vec![
        Container::new(
            "cnt-alpha",
            "A",
            Dimensions::new(20.0, 20.0, 20.0),
            Position::new(0.0, 0.0, 0.0),
        ),
        Container::new(
            "cnt-bravo",
            "B",
            Dimensions::new(15.0, 15.0, 15.0),
            Position::new(40.0, 0.0, 0.0),
        ),
    ]
}

fn batch(start: DateTime<Utc>) -> Vec<Item> {
    vec![
        Item::new(
            "itm-filter",
            "Oxygen Filter",
            Dimensions::new(4.0, 4.0, 4.0),
            5,
            start + Duration::days(120),
            10,
            "A",
            6.0,
        ),
        Item::new(
            "itm-coil",
            "Plasma Coil",
            Dimensions::new(3.0, 3.0, 3.0),
            4,
            start + Duration::days(90),
            6,
            "A",
            4.5,
        ),
        Item::new(
            "itm-rations",
            "Food Rations",
            Dimensions::new(5.0, 5.0, 5.0),
            3,
            start + Duration::days(20),
            8,
            "B",
            9.0,
        ),
    ]
}

fn placement_is_valid(plan: &[Placement], system: &CargoSystem) -> bool {
    for placement in plan {
        let Some(item) = system.items.get(&placement.item_id) else {
            return false;
        };
        let Some(container) = system.containers.get(&placement.container_id) else {
            return false;
        };
        let p = &placement.position;
        if p.x + item.dimensions.width > container.dimensions.width
            || p.y + item.dimensions.height > container.dimensions.height
            || p.z + item.dimensions.depth > container.dimensions.depth
        {
            return false;
        }
    }
    true
}

#[test]
fn placement_plan_applies_to_the_state() {
    let mut system = CargoSystem::with_current_date(start_date());
    for container in fleet() {
        system.add_container(container);
    }
    let items = batch(start_date());
    for item in &items {
        system.add_item(item.clone());
    }

    let containers = fleet();
    let plan = plan_placement(&containers, &items, SEED);
    assert_eq!(plan.len(), items.len());
    assert!(placement_is_valid(&plan, &system), "caller-side validation");

    for placement in &plan {
        assert!(system.place_item(
            &placement.item_id,
            &placement.container_id,
            placement.position,
        ));
    }

    for item in system.items.values() {
        assert!(item.container_id.is_some());
        assert!(item.position.is_some());
    }
    let stowed: usize = system
        .containers
        .values()
        .map(|container| container.items.len())
        .sum();
    assert_eq!(stowed, items.len());
}

#[test]
fn retrieval_path_starts_at_the_door_and_reaches_the_item() {
    let mut system = CargoSystem::with_current_date(start_date());
    for container in fleet() {
        system.add_container(container);
    }
    for item in batch(start_date()) {
        system.add_item(item);
    }
    system.place_item("itm-filter", "cnt-alpha", Position::new(6.0, 0.0, 0.0));
    system.place_item("itm-coil", "cnt-alpha", Position::new(2.0, 0.0, 0.0));

    let path = plan_retrieval("itm-filter", &system);
    assert!(!path.is_empty());
    assert_eq!(path[0], Position::new(0.0, 0.0, 0.0));
    assert_eq!(*path.last().unwrap(), Position::new(6.0, 0.0, 0.0));
    // Unit 6-axis steps only, never through the blocker's cell.
    for step in path.windows(2) {
        let dx = (step[1].x - step[0].x).abs();
        let dy = (step[1].y - step[0].y).abs();
        let dz = (step[1].z - step[0].z).abs();
        assert_eq!(dx + dy + dz, 1.0);
    }
    assert!(!path.contains(&Position::new(2.0, 0.0, 0.0)));

    assert!(plan_retrieval("itm-missing", &system).is_empty());
}

#[test]
fn rearrangement_plan_is_applicable_and_improves_zone_fit() {
    let mut system = CargoSystem::with_current_date(start_date());
    for container in fleet() {
        system.add_container(container);
    }
    // A high-priority zone-A item stranded in the zone-B container.
    let stranded = Item::new(
        "itm-stranded",
        "Medical Kit",
        Dimensions::new(2.0, 2.0, 2.0),
        5,
        start_date() + Duration::days(60),
        10,
        "A",
        2.0,
    );
    system.add_item(stranded);
    system.place_item("itm-stranded", "cnt-bravo", Position::new(0.0, 0.0, 0.0));

    let plan = plan_rearrangement(&system, &[], SEED);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].container_id, "cnt-alpha");

    for placement in &plan {
        assert!(system.place_item(
            &placement.item_id,
            &placement.container_id,
            placement.position,
        ));
    }
    assert_eq!(
        system.items["itm-stranded"].container_id.as_deref(),
        Some("cnt-alpha")
    );
}

#[test]
fn search_ranks_and_filters_the_catalog() {
    let mut system = CargoSystem::with_current_date(start_date());
    for container in fleet() {
        system.add_container(container);
    }
    for item in batch(start_date()) {
        system.add_item(item);
    }

    let hits = search("plasma", &system, None, None, None);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "itm-coil");

    let by_priority = search("", &system, None, None, Some(5));
    assert_eq!(by_priority.len(), 1);
    assert_eq!(by_priority[0].id, "itm-filter");

    system.place_item("itm-coil", "cnt-alpha", Position::new(1.0, 1.0, 1.0));
    let near_door = search(
        "",
        &system,
        Some(Position::new(0.0, 0.0, 0.0)),
        Some(2.0),
        None,
    );
    assert_eq!(near_door.len(), 1);
    assert_eq!(near_door[0].id, "itm-coil");
}

#[test]
fn expiry_usage_and_waste_selection_work_end_to_end() {
    let mut system = CargoSystem::with_current_date(start_date());
    for container in fleet() {
        system.add_container(container);
    }
    for item in batch(start_date()) {
        system.add_item(item);
    }

    // Exhaust the coil's six uses.
    for _ in 0..6 {
        assert!(system.retrieve_item("itm-coil", "astro-1"));
    }
    assert!(!system.retrieve_item("itm-coil", "astro-1"));

    // Push past the rations' 20-day expiry.
    system.simulate_day(25);
    assert!(system
        .logs
        .iter()
        .any(|entry| entry.action == "item_expired" && entry.item_id == "itm-rations"));

    let waste = system.get_waste_items();
    let mut waste_ids: Vec<String> = waste.iter().map(|item| item.id.clone()).collect();
    waste_ids.sort();
    assert_eq!(waste_ids, vec!["itm-coil", "itm-rations"]);

    // Room for only one of the two on the return vehicle.
    let manifest = select_waste(
        &waste,
        &ReturnCapacity {
            max_weight: 10.0,
            max_volume: 200.0,
        },
        &system.current_date,
    );
    assert_eq!(manifest.len(), 1);

    let full_manifest = select_waste(&waste, &ReturnCapacity::default(), &system.current_date);
    assert_eq!(full_manifest.len(), 2);
}
