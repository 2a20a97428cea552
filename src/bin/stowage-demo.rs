use std::error::Error;

use chrono::{Duration, TimeZone, Utc};
use colored::*;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stowage::{
    plan_placement, plan_rearrangement, plan_retrieval, search, select_waste, CargoSystem,
    Container, Dimensions, Item, Position, ReturnCapacity,
};

const SEED: u64 = 64;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialise tracing_subscriber for better logging/debugging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env()) // Reads RUST_LOG
        .with(fmt::layer().pretty())
        .init();

    let start_date = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let mut system = CargoSystem::with_current_date(start_date);

    system.add_container(Container::new(
        "cnt-alpha",
        "A",
        Dimensions::new(20.0, 20.0, 20.0),
        Position::new(0.0, 0.0, 0.0),
    ));
    system.add_container(Container::new(
        "cnt-bravo",
        "B",
        Dimensions::new(15.0, 15.0, 15.0),
        Position::new(40.0, 0.0, 0.0),
    ));

    let batch = vec![
        Item::new(
            "itm-filter",
            "Oxygen Filter",
            Dimensions::new(4.0, 4.0, 4.0),
            5,
            start_date + Duration::days(120),
            10,
            "A",
            6.0,
        ),
        Item::new(
            "itm-coil",
            "Plasma Coil",
            Dimensions::new(3.0, 3.0, 3.0),
            4,
            start_date + Duration::days(90),
            6,
            "A",
            4.5,
        ),
        Item::new(
            "itm-rations",
            "Food Rations",
            Dimensions::new(5.0, 5.0, 5.0),
            3,
            start_date + Duration::days(20),
            8,
            "B",
            9.0,
        ),
        Item::new(
            "itm-samples",
            "Expired Samples",
            Dimensions::new(2.0, 2.0, 2.0),
            1,
            start_date - Duration::days(5),
            1,
            "B",
            3.0,
        ),
    ];
    for item in &batch {
        system.add_item(item.clone());
    }

    info!("Planning placement for {} incoming item(s)", batch.len());
    let containers: Vec<Container> = {
        let mut all: Vec<Container> = system.containers.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    };
    let plan = plan_placement(&containers, &batch, SEED);
    for placement in &plan {
        let applied = system.place_item(
            &placement.item_id,
            &placement.container_id,
            placement.position,
        );
        let line = format!(
            "{} -> {} at ({:.0}, {:.0}, {:.0})",
            placement.item_id,
            placement.container_id,
            placement.position.x,
            placement.position.y,
            placement.position.z
        );
        if applied {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }

    for container_id in ["cnt-alpha", "cnt-bravo"] {
        if let Some(status) = system.container_status(container_id) {
            println!(
                "{}: {} item(s), {:.0} free volume",
                status.id,
                status.items.len(),
                status.available_volume
            );
        }
    }

    let path = plan_retrieval("itm-coil", &system);
    println!("Retrieval path for itm-coil: {} step(s)", path.len());

    let hits = search("plasma", &system, None, None, None);
    println!(
        "Search 'plasma': {:?}",
        hits.iter().map(|item| item.id.as_str()).collect::<Vec<_>>()
    );

    let incoming = vec![Item::new(
        "itm-tank",
        "Water Tank",
        Dimensions::new(6.0, 6.0, 6.0),
        4,
        start_date + Duration::days(200),
        12,
        "B",
        12.0,
    )];
    let shuffle = plan_rearrangement(&system, &incoming, SEED);
    println!("Rearrangement proposal covers {} move(s):", shuffle.len());
    for placement in &shuffle {
        println!(
            "  {} -> {} at ({:.0}, {:.0}, {:.0})",
            placement.item_id,
            placement.container_id,
            placement.position.x,
            placement.position.y,
            placement.position.z
        );
    }

    system.simulate_day(30);
    let waste = system.get_waste_items();
    let manifest = select_waste(
        &waste,
        &ReturnCapacity {
            max_weight: 12.0,
            max_volume: 200.0,
        },
        &system.current_date,
    );
    println!(
        "Waste manifest ({} of {} wasted item(s)):",
        manifest.len(),
        waste.len()
    );
    for item in &manifest {
        println!("  {} ({} kg)", item.id, item.weight);
    }

    info!("Demo complete, {} log entries recorded", system.logs.len());
    Ok(())
}
