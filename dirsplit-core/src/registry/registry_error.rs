use serde::Serialize;

/// malformed or incomplete reference data. any of these stops a run before a trip is read.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RegistryError {
    #[error("failure reading registry configuration: {0}")]
    ConfigurationFileError(String),
    #[error("route '{0}' is registered more than once")]
    DuplicateRoute(String),
    #[error("route '{route_id}' declares {count} directions, expected exactly 2")]
    DirectionCount { route_id: String, count: usize },
    #[error(
        "route '{registered}' has direction '{direction_id}' declared for route '{declared}'"
    )]
    RouteIdMismatch {
        registered: String,
        declared: String,
        direction_id: String,
    },
    #[error("route '{route_id}' uses direction id '{direction_id}' for both directions")]
    DuplicateDirectionId {
        route_id: String,
        direction_id: String,
    },
    #[error("route '{route_id}' maps both directions to feed direction {feed_direction_id}")]
    DuplicateFeedDirection {
        route_id: String,
        feed_direction_id: u8,
    },
    #[error("route '{route_id}' direction '{direction_id}' has an empty reference sequence")]
    EmptyReferenceSequence {
        route_id: String,
        direction_id: String,
    },
    #[error("route '{route_id}' direction '{direction_id}': stop '{stop_id}' is tagged shared but is missing from the opposite direction")]
    SharedStopNotInOpposite {
        route_id: String,
        direction_id: String,
        stop_id: String,
    },
    #[error("route '{route_id}' direction '{direction_id}': stop '{stop_id}' also serves the opposite direction but is not tagged shared")]
    UntaggedSharedStop {
        route_id: String,
        direction_id: String,
        stop_id: String,
    },
    #[error("route '{route_id}' direction '{direction_id}': stop '{stop_id}' is tagged ambiguous but appears only once")]
    AmbiguousStopNotRepeated {
        route_id: String,
        direction_id: String,
        stop_id: String,
    },
    #[error("route '{route_id}' direction '{direction_id}': stop '{stop_id}' appears {count} times but is not tagged ambiguous")]
    UntaggedRepeatedStop {
        route_id: String,
        direction_id: String,
        stop_id: String,
        count: usize,
    },
    #[error("route '{route_id}' direction '{direction_id}': headsign '{label}' belongs to more than one headsign class")]
    ConflictingHeadsignLabel {
        route_id: String,
        direction_id: String,
        label: String,
    },
    #[error("route '{route_id}' has more than one headsign table for feed direction {feed_direction_id}")]
    DuplicateHeadsignTable {
        route_id: String,
        feed_direction_id: u8,
    },
    #[error("route '{route_id}': headsign '{headsign}' selects more than one feed direction")]
    ConflictingDirectionHeadsign { route_id: String, headsign: String },
}
