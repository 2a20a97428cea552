use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::domain::log::{LogDetail, LogEntry};
use crate::domain::types::{Container, Dimensions, Item, Position};

/// Wire-shaped snapshot of a container, including its derived free volume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStatus {
    pub id: String,
    pub zone: String,
    pub dimensions: Dimensions,
    pub position: Position,
    pub items: Vec<String>,
    pub available_volume: f64,
}

/// In-memory inventory of the whole fleet: every item, every container, the
/// append-only action log and the logical clock. One coordinator owns the
/// state; the planners borrow it read-only.
#[derive(Debug, Default)]
pub struct CargoSystem {
    pub items: HashMap<String, Item>,
    pub containers: HashMap<String, Container>,
    pub logs: Vec<LogEntry>,
    pub current_date: DateTime<Utc>,
}

impl CargoSystem {
    pub fn new() -> Self {
        Self::with_current_date(Utc::now())
    }

    /// Fixed starting date, for reproducible expiry arithmetic in tests.
    pub fn with_current_date(current_date: DateTime<Utc>) -> Self {
        CargoSystem {
            items: HashMap::new(),
            containers: HashMap::new(),
            logs: vec![],
            current_date,
        }
    }

    pub fn add_item(&mut self, item: Item) {
        let item_id = item.id.clone();
        self.items.insert(item_id.clone(), item);
        self.log_action("add_item", &item_id, "system", vec![]);
    }

    pub fn add_container(&mut self, container: Container) {
        let container_id = container.id.clone();
        self.containers.insert(container_id.clone(), container);
        self.log_action("add_container", &container_id, "system", vec![]);
    }

    /// Assign an item to a corner position inside a container. Both records
    /// are updated together; unknown ids leave the state untouched.
    pub fn place_item(&mut self, item_id: &str, container_id: &str, position: Position) -> bool {
        if !self.items.contains_key(item_id) || !self.containers.contains_key(container_id) {
            return false;
        }

        let previous = {
            let item = self.items.get_mut(item_id).expect("checked above");
            let previous = item.container_id.take();
            item.container_id = Some(container_id.to_string());
            item.position = Some(position);
            previous
        };

        // Drop the id from wherever it was stowed before re-appending.
        if let Some(prev_id) = previous {
            if let Some(prev) = self.containers.get_mut(&prev_id) {
                prev.items.retain(|id| id != item_id);
            }
        }
        let container = self.containers.get_mut(container_id).expect("checked above");
        container.items.retain(|id| id != item_id);
        container.items.push(item_id.to_string());

        self.log_action(
            "place_item",
            item_id,
            "system",
            vec![
                ("containerId", LogDetail::Text(container_id.to_string())),
                ("position", LogDetail::Coord(position)),
            ],
        );
        true
    }

    /// Consume one use of an item on behalf of a crew member. Returns false
    /// for unknown ids and for items already at their usage limit.
    pub fn retrieve_item(&mut self, item_id: &str, user_id: &str) -> bool {
        let (used, exhausted) = match self.items.get_mut(item_id) {
            Some(item) => {
                let used = item.use_once();
                (used, item.remaining_uses() == 0)
            }
            None => return false,
        };

        if !used {
            return false;
        }

        if exhausted {
            self.log_action("fully_used", item_id, user_id, vec![]);
        }
        self.log_action("retrieve", item_id, user_id, vec![]);
        true
    }

    /// Advance the logical clock and log an `item_expired` entry for every
    /// item whose expiry falls inside the advanced window. Item records are
    /// never mutated; expiry is derived from the current date.
    pub fn simulate_day(&mut self, days: u32) {
        let previous_date = self.current_date;
        self.current_date += Duration::days(days as i64);
        debug!(
            "Advanced current date by {} day(s) to {}",
            days, self.current_date
        );

        self.log_action(
            "simulate_day",
            "",
            "system",
            vec![("days", LogDetail::Int(days as i64))],
        );

        let mut newly_expired: Vec<String> = self
            .items
            .values()
            .filter(|item| item.is_expired(&self.current_date) && !item.is_expired(&previous_date))
            .map(|item| item.id.clone())
            .collect();
        newly_expired.sort(); // stable log order

        for item_id in newly_expired {
            self.log_action("item_expired", &item_id, "system", vec![]);
        }
    }

    /// Every item that is expired or fully used as of the current date.
    pub fn get_waste_items(&self) -> Vec<Item> {
        self.items
            .values()
            .filter(|item| item.is_wasted(&self.current_date))
            .cloned()
            .collect()
    }

    /// Log entries within the inclusive timestamp window.
    pub fn get_logs(
        &self,
        start: Option<&DateTime<Utc>>,
        end: Option<&DateTime<Utc>>,
    ) -> Vec<&LogEntry> {
        self.logs
            .iter()
            .filter(|entry| start.map_or(true, |s| entry.timestamp >= *s))
            .filter(|entry| end.map_or(true, |e| entry.timestamp <= *e))
            .collect()
    }

    pub fn available_volume(&self, container: &Container) -> f64 {
        let used: f64 = container
            .items
            .iter()
            .filter_map(|id| self.items.get(id))
            .map(|item| item.dimensions.volume())
            .sum();
        container.dimensions.volume() - used
    }

    pub fn container_status(&self, container_id: &str) -> Option<ContainerStatus> {
        let container = self.containers.get(container_id)?;
        Some(ContainerStatus {
            id: container.id.clone(),
            zone: container.zone.clone(),
            dimensions: container.dimensions,
            position: container.position,
            items: container.items.clone(),
            available_volume: self.available_volume(container),
        })
    }

    fn log_action(
        &mut self,
        action: &str,
        item_id: &str,
        user_id: &str,
        details: Vec<(&str, LogDetail)>,
    ) {
        let mut entry = LogEntry::new(action, item_id, user_id, self.next_timestamp());
        for (key, value) in details {
            entry.add_detail(key, value);
        }
        self.logs.push(entry);
    }

    // Wall clock, nudged forward when two mutations land on the same instant
    // so the log stays strictly ordered.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.logs.last() {
            Some(last) if now <= last.timestamp => last.timestamp + Duration::nanoseconds(1),
            _ => now,
        }
    }
}
