use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Corner coordinate in container-local space. The container door sits at the
/// origin; x runs along width, y along height, z along depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Dimensions {
            width,
            depth,
            height,
        }
    }

    pub fn volume(&self) -> f64 {
        self.width * self.depth * self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub dimensions: Dimensions,
    pub priority: u32,
    pub expiry_date: DateTime<Utc>,
    pub usage_limit: u32,
    pub usage_count: u32,
    pub preferred_zone: String,
    pub weight: f64,
    pub container_id: Option<String>,
    pub position: Option<Position>,
}

impl Item {
    pub fn new(
        id: &str,
        name: &str,
        dimensions: Dimensions,
        priority: u32,
        expiry_date: DateTime<Utc>,
        usage_limit: u32,
        preferred_zone: &str,
        weight: f64,
    ) -> Self {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            dimensions,
            priority,
            expiry_date,
            usage_limit,
            usage_count: 0,
            preferred_zone: preferred_zone.to_string(),
            weight,
            container_id: None,
            position: None,
        }
    }

    pub fn is_expired(&self, current_date: &DateTime<Utc>) -> bool {
        *current_date > self.expiry_date
    }

    pub fn is_wasted(&self, current_date: &DateTime<Utc>) -> bool {
        self.is_expired(current_date) || self.usage_count >= self.usage_limit
    }

    pub fn remaining_uses(&self) -> u32 {
        self.usage_limit.saturating_sub(self.usage_count)
    }

    /// Consume one use. Returns false once the limit has been reached;
    /// usage_count never decreases and never exceeds usage_limit.
    pub fn use_once(&mut self) -> bool {
        if self.usage_count < self.usage_limit {
            self.usage_count += 1;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: String,
    pub zone: String,
    pub dimensions: Dimensions,
    /// Location of the container in global fleet space.
    pub position: Position,
    /// Ids of stowed items; the item records themselves live in the state's
    /// item map to avoid cyclic ownership.
    pub items: Vec<String>,
}

impl Container {
    pub fn new(id: &str, zone: &str, dimensions: Dimensions, position: Position) -> Self {
        Container {
            id: id.to_string(),
            zone: zone.to_string(),
            dimensions,
            position,
            items: vec![],
        }
    }

    /// Whether a box of the given dimensions could fit at all, ignoring
    /// already-stowed items.
    pub fn fits(&self, dims: &Dimensions) -> bool {
        dims.width <= self.dimensions.width
            && dims.height <= self.dimensions.height
            && dims.depth <= self.dimensions.depth
    }
}

/// A proposed stowage assignment produced by the placement or rearrangement
/// planners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub item_id: String,
    pub container_id: String,
    pub position: Position,
}
