use super::{ClassificationFailure, DataIntegrityWarning, MergeFailure, RouteOutcome};
use crate::model::TripVariant;
use serde::Serialize;
use std::fmt::Display;

/// route outcomes of a run, ordered by route id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<RouteOutcome>,
}

/// aggregate counts and every reported problem of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub routes: usize,
    pub registered_routes: usize,
    pub pass_through_routes: usize,
    pub trips: usize,
    pub split_trips: usize,
    pub variants: usize,
    pub early_order_ties: usize,
    pub unpublished_routes: Vec<String>,
    pub classification_failures: Vec<ClassificationFailure>,
    pub merge_failures: Vec<MergeFailure>,
    pub warnings: Vec<DataIntegrityWarning>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.has_failures())
    }

    /// variants of every route that can be published, in route order.
    pub fn publishable_variants(&self) -> impl Iterator<Item = &TripVariant> {
        self.outcomes
            .iter()
            .filter(|o| o.is_publishable())
            .flat_map(|o| o.variants.iter())
    }

    pub fn classification_failures(&self) -> impl Iterator<Item = &ClassificationFailure> {
        self.outcomes
            .iter()
            .flat_map(|o| o.classification_failures.iter())
    }

    pub fn merge_failures(&self) -> impl Iterator<Item = &MergeFailure> {
        self.outcomes.iter().flat_map(|o| o.merge_failures.iter())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &DataIntegrityWarning> {
        self.outcomes.iter().flat_map(|o| o.warnings.iter())
    }

    pub fn report(&self) -> RunReport {
        let registered_routes = self.outcomes.iter().filter(|o| o.registered).count();
        RunReport {
            routes: self.outcomes.len(),
            registered_routes,
            pass_through_routes: self.outcomes.len() - registered_routes,
            trips: self.outcomes.iter().map(|o| o.trips).sum(),
            split_trips: self.outcomes.iter().map(|o| o.split_trips).sum(),
            variants: self.publishable_variants().count(),
            early_order_ties: self.outcomes.iter().map(|o| o.early_order_ties).sum(),
            unpublished_routes: self
                .outcomes
                .iter()
                .filter(|o| !o.is_publishable())
                .map(|o| o.route_id.clone())
                .collect(),
            classification_failures: self.classification_failures().cloned().collect(),
            merge_failures: self.merge_failures().cloned().collect(),
            warnings: self.warnings().cloned().collect(),
        }
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "routes: {} ({} registered, {} pass-through), trips: {}, split trips: {}, variants: {}, classification failures: {}, merge failures: {}, warnings: {}, early-order ties: {}",
            self.routes,
            self.registered_routes,
            self.pass_through_routes,
            self.trips,
            self.split_trips,
            self.variants,
            self.classification_failures.len(),
            self.merge_failures.len(),
            self.warnings.len(),
            self.early_order_ties
        )
    }
}
