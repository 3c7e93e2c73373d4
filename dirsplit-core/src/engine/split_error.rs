use serde::Serialize;

/// why a trip could not be assigned to a direction.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ClassificationFailureReason {
    #[error("has no stops")]
    EmptyTrip,
    #[error("shares no stop with either direction")]
    NoMatchingStops,
    #[error("matches both directions equally ({matched} stops each)")]
    AmbiguousDirection { matched: usize },
    #[error("visits stop '{stop_id}' (sequence {gtfs_sequence}) out of order for direction '{direction_id}'")]
    UnresolvedStopVisit {
        stop_id: String,
        gtfs_sequence: u32,
        direction_id: String,
    },
    #[error("has no direction_id and headsign '{headsign}' selects no direction")]
    UnknownDirectionHeadsign { headsign: String },
}

/// a trip the engine cannot classify. the reference data for the route needs correcting.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("route '{route_id}' trip '{trip_id}' {reason} [stops: {}]", .raw_stops.join(","))]
pub struct ClassificationFailure {
    pub route_id: String,
    pub trip_id: String,
    pub raw_stops: Vec<String>,
    pub reason: ClassificationFailureReason,
}

/// observed headsigns of a route direction that no headsign class covers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("route '{route_id}' direction '{direction_id}' has unexpected headsigns to merge: {}", .labels.join(" | "))]
pub struct MergeFailure {
    pub route_id: String,
    pub direction_id: String,
    pub labels: Vec<String>,
}

/// the feed's direction_id disagrees with the classified direction. the classification wins.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("route '{route_id}' trip '{trip_id}' declares direction_id {declared} but runs in direction '{direction_id}' (direction_id {expected})")]
pub struct DataIntegrityWarning {
    pub route_id: String,
    pub trip_id: String,
    pub declared: u8,
    pub direction_id: String,
    pub expected: u8,
}
