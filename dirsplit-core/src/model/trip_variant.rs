use super::ClassifiedStop;
use serde::{Deserialize, Serialize};

/// a direction-consistent trip emitted by the engine. a raw trip produces one variant, or two
/// when it runs through both directions of its route.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TripVariant {
    pub route_id: String,
    pub direction_id: String,
    pub headsign_label: String,
    pub source_trip_id: String,
    /// 0 for the first (or only) leg of the source trip, 1 for the second leg of a split
    pub leg: usize,
    pub stops: Vec<ClassifiedStop>,
}

impl TripVariant {
    pub fn variant_id(&self) -> String {
        format!("{}:{}", self.source_trip_id, self.leg)
    }

    pub fn stop_ids(&self) -> Vec<&str> {
        self.stops.iter().map(|s| s.stop_id()).collect()
    }

    pub fn positions(&self) -> Vec<usize> {
        self.stops.iter().map(|s| s.position()).collect()
    }
}
