use super::{
    clean_ops::{self, StopIdCleaner},
    route_key::{self, RouteKeyRules},
    service_ops, FeedError, ServiceWindow,
};
use dirsplit_core::model::{RawTrip, RawTripStop};
use gtfs_structures::{DirectionType, Gtfs, StopTime, Trip};
use itertools::Itertools;
use kdam::tqdm;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

/// turns the trips of a GTFS archive into engine input, dropping trips that are not in
/// revenue service or do not run within the service window.
#[derive(Debug, Clone)]
pub struct FeedLoader {
    excluded_headsigns: Vec<String>,
    stop_ids: StopIdCleaner,
    route_keys: Option<RouteKeyRules>,
    window: Option<ServiceWindow>,
}

/// raw trips grouped by route key, with counts of what the loader dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadedFeed {
    pub trips_by_route: BTreeMap<String, Vec<RawTrip>>,
    pub loaded_trips: usize,
    pub not_in_service_trips: usize,
    pub inactive_service_trips: usize,
}

impl FeedLoader {
    /// `route_keys`, when given, keys trips by the route key derived from the route short
    /// name instead of the feed's route_id.
    pub fn new(
        excluded_headsigns: &[String],
        stop_id_patterns: &[String],
        route_keys: Option<RouteKeyRules>,
        window: Option<ServiceWindow>,
    ) -> Result<Self, FeedError> {
        Ok(Self {
            excluded_headsigns: excluded_headsigns.iter().map(|h| h.to_lowercase()).collect(),
            stop_ids: StopIdCleaner::new(stop_id_patterns)?,
            route_keys,
            window,
        })
    }

    pub fn read(&self, bundle_file: &str) -> Result<LoadedFeed, FeedError> {
        let gtfs = Gtfs::new(bundle_file)?;
        self.load(&gtfs)
    }

    pub fn load(&self, gtfs: &Gtfs) -> Result<LoadedFeed, FeedError> {
        let exceptions = service_ops::date_exceptions(gtfs);
        let mut route_keys: HashMap<&str, String> = HashMap::new();
        let mut result = LoadedFeed::default();

        let trip_ids = gtfs.trips.keys().sorted().collect_vec();
        let n_trips = trip_ids.len();
        let trip_iter = tqdm!(trip_ids.into_iter(), desc = "load trips", total = n_trips);
        for trip_id in trip_iter {
            let Some(trip) = gtfs.trips.get(trip_id) else {
                continue;
            };
            if self.is_not_in_service(trip) {
                result.not_in_service_trips += 1;
                continue;
            }
            if let Some(window) = &self.window {
                if !window.is_active(gtfs, &exceptions, &trip.service_id)? {
                    result.inactive_service_trips += 1;
                    continue;
                }
            }

            let route_key = match route_keys.get(trip.route_id.as_str()) {
                Some(key) => key.clone(),
                None => {
                    let key = self.route_key(gtfs, trip)?;
                    route_keys.insert(trip.route_id.as_str(), key.clone());
                    key
                }
            };
            let raw_trip = self.raw_trip(trip, &route_key)?;
            result
                .trips_by_route
                .entry(route_key)
                .or_default()
                .push(raw_trip);
            result.loaded_trips += 1;
        }
        eprintln!();

        log::info!(
            "loaded {} trips on {} routes, excluded {} not in service and {} outside the service window",
            result.loaded_trips,
            result.trips_by_route.len(),
            result.not_in_service_trips,
            result.inactive_service_trips
        );
        Ok(result)
    }

    fn is_not_in_service(&self, trip: &Trip) -> bool {
        match &trip.trip_headsign {
            Some(headsign) => {
                let headsign = headsign.trim().to_lowercase();
                self.excluded_headsigns.contains(&headsign)
            }
            None => false,
        }
    }

    fn route_key(&self, gtfs: &Gtfs, trip: &Trip) -> Result<String, FeedError> {
        let Some(rules) = &self.route_keys else {
            return Ok(trip.route_id.clone());
        };
        let route = gtfs
            .routes
            .get(&trip.route_id)
            .ok_or_else(|| FeedError::MissingRoute {
                trip_id: trip.id.clone(),
                route_id: trip.route_id.clone(),
            })?;
        let short_name: Option<String> = route.short_name.clone().into();
        let key = route_key::derive_route_key(&short_name.unwrap_or_default(), rules)?;
        Ok(key.to_string())
    }

    fn raw_trip(&self, trip: &Trip, route_key: &str) -> Result<RawTrip, FeedError> {
        let ordered = get_ordered_stops(trip);
        if let Some((a, _)) = ordered
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.stop_sequence == b.stop_sequence)
        {
            return Err(FeedError::MalformedGtfsError(format!(
                "trip '{}' repeats stop_sequence {}",
                trip.id, a.stop_sequence
            )));
        }
        let stops = ordered
            .iter()
            .map(|st| RawTripStop {
                trip_id: trip.id.clone(),
                stop_id: self.stop_ids.clean(&st.stop.id),
                gtfs_sequence: u32::from(st.stop_sequence),
            })
            .collect();
        let declared_direction = trip.direction_id.as_ref().map(|d| match d {
            DirectionType::Outbound => 0,
            DirectionType::Inbound => 1,
        });
        Ok(RawTrip {
            trip_id: trip.id.clone(),
            route_id: route_key.to_string(),
            declared_direction,
            headsign: trip.trip_headsign.as_deref().map(clean_ops::clean_headsign),
            stops,
        })
    }
}

/// stop times of a trip in stop_sequence order.
fn get_ordered_stops(trip: &Trip) -> Vec<&StopTime> {
    let stop_queue_order: BinaryHeap<(u32, usize)> = trip
        .stop_times
        .iter()
        .enumerate()
        .map(|(i, st)| (u32::from(st.stop_sequence), i))
        .collect();

    stop_queue_order
        .into_sorted_vec()
        .iter()
        .map(|(_, idx)| &trip.stop_times[*idx])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtfs_structures::Stop;
    use std::sync::Arc;

    fn loader() -> FeedLoader {
        FeedLoader::new(
            &[String::from("Not In Service")],
            &[String::from("(?i)^mi")],
            None,
            None,
        )
        .expect("valid loader")
    }

    fn trip_with_headsign(headsign: Option<&str>) -> Trip {
        Trip {
            id: String::from("t1"),
            route_id: String::from("r1"),
            trip_headsign: headsign.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_not_in_service_matches_case_insensitively() {
        let loader = loader();
        assert!(loader.is_not_in_service(&trip_with_headsign(Some("NOT IN SERVICE"))));
        assert!(loader.is_not_in_service(&trip_with_headsign(Some(" not in service "))));
        assert!(!loader.is_not_in_service(&trip_with_headsign(Some("Milton Go"))));
        assert!(!loader.is_not_in_service(&trip_with_headsign(None)));
    }

    #[test]
    fn test_route_key_defaults_to_route_id() {
        let gtfs = Gtfs::default();
        let key = loader()
            .route_key(&gtfs, &trip_with_headsign(None))
            .expect("route id");
        assert_eq!(key, "r1");
    }

    #[test]
    fn test_derived_route_key_requires_route() {
        let loader = FeedLoader::new(&[], &[], Some(RouteKeyRules::default()), None)
            .expect("valid loader");
        let result = loader.route_key(&Gtfs::default(), &trip_with_headsign(None));
        assert!(matches!(
            result,
            Err(FeedError::MissingRoute { ref route_id, .. }) if route_id == "r1"
        ));
    }

    #[test]
    fn test_trip_without_stop_times() {
        let raw = loader()
            .raw_trip(&trip_with_headsign(Some("TO MILTON GO")), "1")
            .expect("raw trip");
        assert!(raw.stops.is_empty());
        assert_eq!(raw.route_id, "1");
        assert_eq!(raw.headsign.as_deref(), Some("Milton Go"));
        assert_eq!(raw.declared_direction, None);
    }

    fn stop_time(stop_id: &str, stop_sequence: u32) -> StopTime {
        StopTime {
            stop: Arc::new(Stop {
                id: stop_id.to_string(),
                ..Default::default()
            }),
            stop_sequence,
            ..Default::default()
        }
    }

    #[test]
    fn test_stop_times_ordered_by_sequence() {
        let trip = Trip {
            stop_times: vec![
                stop_time("MI2287", 20),
                stop_time("MI2286", 10),
                stop_time("MI2295", 30),
            ],
            direction_id: Some(DirectionType::Inbound),
            ..trip_with_headsign(Some("Milton Go"))
        };
        let raw = loader().raw_trip(&trip, "3").expect("raw trip");
        let stop_ids = raw.stops.iter().map(|s| s.stop_id.as_str()).collect_vec();
        assert_eq!(stop_ids, vec!["2286", "2287", "2295"]);
        let sequences = raw.stops.iter().map(|s| s.gtfs_sequence).collect_vec();
        assert_eq!(sequences, vec![10, 20, 30]);
        assert_eq!(raw.declared_direction, Some(1));
    }

    #[test]
    fn test_repeated_stop_sequence_is_malformed() {
        let trip = Trip {
            stop_times: vec![
                stop_time("MI2286", 1),
                stop_time("MI2287", 2),
                stop_time("MI2295", 2),
            ],
            ..trip_with_headsign(Some("Milton Go"))
        };
        let result = loader().raw_trip(&trip, "3");
        assert!(matches!(result, Err(FeedError::MalformedGtfsError(_))));
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let result = FeedLoader::new(&[], &[String::from("[")], None, None);
        assert!(matches!(result, Err(FeedError::InvalidStopIdPattern { .. })));
    }
}
