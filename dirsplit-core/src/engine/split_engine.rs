use super::{
    headsign_merger, pass_through, trip_splitter, MergeFailure, RouteOutcome, RunSummary,
    TripSplit,
};
use crate::model::{HeadsignTable, RawTrip, RouteSpec, TripVariant};
use crate::registry::SpecRegistry;
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

/// batch driver: routes run in parallel, trips of a route run in parallel, and headsign
/// merging waits for every trip of its route.
#[derive(Debug, Clone)]
pub struct SplitEngine {
    registry: Arc<SpecRegistry>,
    pass_through: bool,
}

impl SplitEngine {
    pub fn new(registry: Arc<SpecRegistry>) -> Self {
        Self {
            registry,
            pass_through: true,
        }
    }

    /// when disabled, routes missing from the registry are skipped instead of passed through.
    pub fn with_pass_through(mut self, enabled: bool) -> Self {
        self.pass_through = enabled;
        self
    }

    /// runs every route. outcomes are returned in route id order regardless of scheduling.
    pub fn run(&self, trips_by_route: &BTreeMap<String, Vec<RawTrip>>) -> RunSummary {
        let routes: Vec<(&String, &Vec<RawTrip>)> = trips_by_route.iter().collect();
        let mut outcomes: Vec<RouteOutcome> = routes
            .par_iter()
            .filter_map(|(route_id, trips)| self.process_route(route_id, trips))
            .collect();
        outcomes.sort_by(|a, b| a.route_id.cmp(&b.route_id));
        RunSummary { outcomes }
    }

    /// classifies and merges all trips of one route. returns None for an unregistered route
    /// when pass-through is disabled.
    pub fn process_route(&self, route_id: &str, trips: &[RawTrip]) -> Option<RouteOutcome> {
        let outcome = match self.registry.lookup(route_id) {
            Some(spec) => self.process_registered(spec, trips),
            None if self.pass_through => self.process_pass_through(route_id, trips),
            None => {
                log::debug!("skipping route '{route_id}' with no reference sequences");
                return None;
            }
        };
        for failure in outcome.merge_failures.iter() {
            log::error!("{failure}");
        }
        Some(outcome)
    }

    fn process_registered(&self, spec: &RouteSpec, trips: &[RawTrip]) -> RouteOutcome {
        let mut outcome = RouteOutcome::new(&spec.route_id, true, trips.len());
        let results: Vec<_> = trips
            .par_iter()
            .map(|trip| trip_splitter::split_trip(spec, trip))
            .collect();

        for result in results.into_iter() {
            match result {
                Ok(TripSplit {
                    variants,
                    warning,
                    early_order_ties,
                }) => {
                    if variants.len() > 1 {
                        outcome.split_trips += 1;
                    }
                    outcome.early_order_ties += early_order_ties;
                    if let Some(w) = warning {
                        log::warn!("{w}");
                        outcome.warnings.push(w);
                    }
                    outcome.variants.extend(variants);
                }
                Err(failure) => {
                    log::error!("{failure}");
                    outcome.classification_failures.push(failure);
                }
            }
        }

        for direction in spec.directions.iter() {
            let fallback;
            let table = match self
                .registry
                .headsign_table(&spec.route_id, &direction.direction_id)
            {
                Some(t) => t,
                None => {
                    fallback = HeadsignTable::new(
                        Some(&direction.headsign_label),
                        &direction.headsign_classes,
                    );
                    &fallback
                }
            };
            let merged = headsign_merger::merge_headsigns(
                &spec.route_id,
                &direction.direction_id,
                table,
                &mut outcome.variants,
            );
            record_merge(&mut outcome, merged);
        }
        withhold_unpublishable(&mut outcome);
        outcome
    }

    fn process_pass_through(&self, route_id: &str, trips: &[RawTrip]) -> RouteOutcome {
        let mut outcome = RouteOutcome::new(route_id, false, trips.len());
        let results: Vec<_> = trips
            .par_iter()
            .map(|trip| pass_through::pass_through_trip(&self.registry, trip))
            .collect();
        for result in results.into_iter() {
            match result {
                Ok(variant) => outcome.variants.push(variant),
                Err(failure) => {
                    log::error!("{failure}");
                    outcome.classification_failures.push(failure);
                }
            }
        }

        let directions: Vec<String> = outcome
            .variants
            .iter()
            .map(|v| v.direction_id.clone())
            .unique()
            .sorted()
            .collect();
        for direction_id in directions.iter() {
            let table = direction_id
                .parse::<u8>()
                .ok()
                .and_then(|d| self.registry.pass_through_table(route_id, d))
                .map(|t| &t.table);
            let merged = headsign_merger::merge_observed_headsigns(
                route_id,
                direction_id,
                table,
                &mut outcome.variants,
            );
            record_merge(&mut outcome, merged);
        }
        withhold_unpublishable(&mut outcome);
        outcome
    }
}

fn record_merge(outcome: &mut RouteOutcome, merged: Result<usize, MergeFailure>) {
    match merged {
        Ok(n) if n > 0 => log::debug!("route '{}': merged {n} headsigns", outcome.route_id),
        Ok(_) => {}
        Err(failure) => outcome.merge_failures.push(failure),
    }
}

/// a route with a merge failure must not publish a partially merged set of variants.
fn withhold_unpublishable(outcome: &mut RouteOutcome) {
    if !outcome.is_publishable() {
        let withheld: Vec<TripVariant> = std::mem::take(&mut outcome.variants);
        log::warn!(
            "route '{}': withholding {} variants after headsign merge failure",
            outcome.route_id,
            withheld.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DirectionSpec, HeadsignClass, StopRef};

    fn route_spec() -> RouteSpec {
        let east = DirectionSpec::new(
            "1",
            "east",
            "Milton Go",
            0,
            vec![StopRef::plain("X"), StopRef::plain("Y"), StopRef::shared("Z")],
        )
        .with_headsign_classes(vec![HeadsignClass::new(
            "Milton Go",
            &["Milton Fairgrounds"],
        )]);
        let west = DirectionSpec::new(
            "1",
            "west",
            "Derry",
            1,
            vec![StopRef::shared("Z"), StopRef::plain("Y2"), StopRef::plain("X2")],
        );
        RouteSpec::new("1", east, west)
    }

    fn engine() -> SplitEngine {
        let routes = BTreeMap::from([(String::from("1"), route_spec())]);
        let registry = SpecRegistry::new(routes, vec![]).expect("valid registry");
        SplitEngine::new(Arc::new(registry))
    }

    fn trips() -> BTreeMap<String, Vec<RawTrip>> {
        let route_1 = vec![
            RawTrip::from_stop_ids("a", "1", &["X", "Y", "Z"]).with_headsign(Some("Milton Fairgrounds")),
            RawTrip::from_stop_ids("b", "1", &["X", "Y", "Z", "Y2", "X2"]),
            RawTrip::from_stop_ids("c", "1", &["M", "N"]),
            RawTrip::from_stop_ids("d", "1", &["Z", "Y2", "X2"]).with_declared_direction(Some(0)),
        ];
        let route_2 = vec![
            RawTrip::from_stop_ids("e", "2", &["P", "Q"]).with_headsign(Some("High Pt")),
            RawTrip::from_stop_ids("f", "2", &["Q", "P"])
                .with_headsign(Some("Milton Go"))
                .with_declared_direction(Some(1)),
        ];
        BTreeMap::from([(String::from("1"), route_1), (String::from("2"), route_2)])
    }

    #[test]
    fn test_run_collects_variants_and_failures() {
        let summary = engine().run(&trips());
        assert_eq!(summary.outcomes.len(), 2);
        let route_1 = &summary.outcomes[0];
        assert!(route_1.registered);
        assert_eq!(route_1.trips, 4);
        assert_eq!(route_1.split_trips, 1);
        assert_eq!(route_1.variants.len(), 4);
        assert_eq!(route_1.classification_failures.len(), 1);
        assert_eq!(route_1.classification_failures[0].trip_id, "c");
        assert_eq!(route_1.warnings.len(), 1);
        assert_eq!(route_1.warnings[0].trip_id, "d");
        assert!(route_1.is_publishable());
        // alias collapsed into the direction label
        assert_eq!(route_1.variants[0].headsign_label, "Milton Go");

        let route_2 = &summary.outcomes[1];
        assert!(!route_2.registered);
        assert_eq!(route_2.variants.len(), 2);
        assert!(summary.has_failures());

        let report = summary.report();
        assert_eq!(report.routes, 2);
        assert_eq!(report.pass_through_routes, 1);
        assert_eq!(report.variants, 6);
        assert_eq!(report.classification_failures.len(), 1);
    }

    #[test]
    fn test_run_is_idempotent() {
        let engine = engine();
        let first = engine.run(&trips());
        let second = engine.run(&trips());
        assert_eq!(first, second);
    }

    #[test]
    fn test_merge_failure_withholds_route() {
        let trips = BTreeMap::from([(
            String::from("1"),
            vec![
                RawTrip::from_stop_ids("a", "1", &["X", "Y", "Z"]).with_headsign(Some("Unknown Loop")),
                RawTrip::from_stop_ids("b", "1", &["Z", "Y2", "X2"]),
            ],
        )]);
        let summary = engine().run(&trips);
        let outcome = &summary.outcomes[0];
        assert!(!outcome.is_publishable());
        assert!(outcome.variants.is_empty());
        assert_eq!(outcome.merge_failures[0].labels, vec![String::from("Unknown Loop")]);
        assert_eq!(summary.publishable_variants().count(), 0);
        assert_eq!(summary.report().unpublished_routes, vec![String::from("1")]);
    }

    #[test]
    fn test_pass_through_can_be_disabled() {
        let engine = engine().with_pass_through(false);
        let summary = engine.run(&trips());
        assert_eq!(summary.outcomes.len(), 1);
        assert_eq!(summary.outcomes[0].route_id, "1");
    }

    #[test]
    fn test_pass_through_conflicting_headsigns_fail() {
        let trips = BTreeMap::from([(
            String::from("2"),
            vec![
                RawTrip::from_stop_ids("e", "2", &["P", "Q"]).with_headsign(Some("High Pt")),
                RawTrip::from_stop_ids("f", "2", &["P", "Q"]).with_headsign(Some("Milton Go")),
            ],
        )]);
        let summary = engine().run(&trips);
        let outcome = &summary.outcomes[0];
        assert_eq!(outcome.merge_failures.len(), 1);
        assert_eq!(outcome.merge_failures[0].direction_id, "0");
    }
}
