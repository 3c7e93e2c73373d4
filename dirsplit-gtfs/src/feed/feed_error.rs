#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("failed to parse gtfs bundle file into `Gtfs` struct: {0}")]
    BundleReadError(#[from] gtfs_structures::Error),
    #[error("trip '{trip_id}' references missing route '{route_id}'")]
    MissingRoute { trip_id: String, route_id: String },
    #[error("unexpected route short name '{0}', cannot derive a route key")]
    RouteKeyError(String),
    #[error("invalid stop id pattern '{pattern}': {message}")]
    InvalidStopIdPattern { pattern: String, message: String },
    #[error("malformed gtfs: {0}")]
    MalformedGtfsError(String),
}
