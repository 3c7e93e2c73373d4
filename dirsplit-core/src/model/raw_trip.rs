use serde::{Deserialize, Serialize};

/// a single stop visit of a feed trip, as read from stop_times.txt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawTripStop {
    pub trip_id: String,
    pub stop_id: String,
    pub gtfs_sequence: u32,
}

/// a feed trip with its stop visits ordered by `gtfs_sequence`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RawTrip {
    pub trip_id: String,
    pub route_id: String,
    /// GTFS `direction_id` when the feed provides one
    pub declared_direction: Option<u8>,
    /// cleaned trip_headsign when the feed provides one
    pub headsign: Option<String>,
    pub stops: Vec<RawTripStop>,
}

impl RawTrip {
    /// builds a trip from stop ids in visiting order, numbering them 1, 2, 3...
    pub fn from_stop_ids(trip_id: &str, route_id: &str, stop_ids: &[&str]) -> Self {
        let stops = stop_ids
            .iter()
            .enumerate()
            .map(|(idx, stop_id)| RawTripStop {
                trip_id: trip_id.to_string(),
                stop_id: stop_id.to_string(),
                gtfs_sequence: idx as u32 + 1,
            })
            .collect();
        Self {
            trip_id: trip_id.to_string(),
            route_id: route_id.to_string(),
            declared_direction: None,
            headsign: None,
            stops,
        }
    }

    pub fn with_declared_direction(mut self, direction: Option<u8>) -> Self {
        self.declared_direction = direction;
        self
    }

    pub fn with_headsign(mut self, headsign: Option<&str>) -> Self {
        self.headsign = headsign.map(String::from);
        self
    }

    pub fn stop_ids(&self) -> Vec<String> {
        self.stops.iter().map(|s| s.stop_id.clone()).collect()
    }
}
