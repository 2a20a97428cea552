use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::Position;

/// Closed set of value shapes a log entry may carry. Serializes untagged so
/// the wire form reads as plain JSON values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogDetail {
    Int(i64),
    Float(f64),
    Text(String),
    Coord(Position),
    Map(BTreeMap<String, LogDetail>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub action: String,
    pub item_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub details: BTreeMap<String, LogDetail>,
}

impl LogEntry {
    pub fn new(action: &str, item_id: &str, user_id: &str, timestamp: DateTime<Utc>) -> Self {
        LogEntry {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            item_id: item_id.to_string(),
            user_id: user_id.to_string(),
            timestamp,
            details: BTreeMap::new(),
        }
    }

    pub fn add_detail(&mut self, key: &str, value: LogDetail) {
        self.details.insert(key.to_string(), value);
    }
}
