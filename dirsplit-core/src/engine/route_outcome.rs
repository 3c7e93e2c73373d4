use super::{ClassificationFailure, DataIntegrityWarning, MergeFailure};
use crate::model::TripVariant;
use serde::Serialize;

/// everything the engine produced for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteOutcome {
    pub route_id: String,
    /// false when the route had no reference sequences and was passed through
    pub registered: bool,
    pub trips: usize,
    pub split_trips: usize,
    pub early_order_ties: usize,
    #[serde(skip)]
    pub variants: Vec<TripVariant>,
    pub classification_failures: Vec<ClassificationFailure>,
    pub merge_failures: Vec<MergeFailure>,
    pub warnings: Vec<DataIntegrityWarning>,
}

impl RouteOutcome {
    pub fn new(route_id: &str, registered: bool, trips: usize) -> Self {
        Self {
            route_id: route_id.to_string(),
            registered,
            trips,
            split_trips: 0,
            early_order_ties: 0,
            variants: vec![],
            classification_failures: vec![],
            merge_failures: vec![],
            warnings: vec![],
        }
    }

    /// a route with a merge failure publishes nothing.
    pub fn is_publishable(&self) -> bool {
        self.merge_failures.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.classification_failures.is_empty() || !self.merge_failures.is_empty()
    }
}
