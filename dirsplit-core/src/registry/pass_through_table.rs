use super::PassThroughHeadsignConfig;
use crate::model::HeadsignTable;
use std::collections::BTreeSet;

/// headsign rules for one feed direction of a route that has no reference sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassThroughTable {
    pub route_id: String,
    pub feed_direction_id: u8,
    pub table: HeadsignTable,
    pub direction_headsigns: BTreeSet<String>,
}

impl From<&PassThroughHeadsignConfig> for PassThroughTable {
    fn from(value: &PassThroughHeadsignConfig) -> Self {
        Self {
            route_id: value.route_id.clone(),
            feed_direction_id: value.feed_direction_id,
            table: HeadsignTable::new(None, &value.classes),
            direction_headsigns: value.direction_headsigns.iter().cloned().collect(),
        }
    }
}
