use super::{ClassificationFailure, ClassificationFailureReason};
use crate::model::{CanonicalPosition, ClassifiedStop, RawTrip, TripVariant};
use crate::registry::SpecRegistry;

/// a trip of a route without reference sequences becomes one variant in its feed direction,
/// with stops kept in feed order.
///
/// the direction is the trip's direction_id. when that is missing, the route's headsign
/// tables may name the direction for the trip headsign, otherwise direction 0 is used.
pub fn pass_through_trip(
    registry: &SpecRegistry,
    trip: &RawTrip,
) -> Result<TripVariant, ClassificationFailure> {
    let failure = |reason| ClassificationFailure {
        route_id: trip.route_id.clone(),
        trip_id: trip.trip_id.clone(),
        raw_stops: trip.stop_ids(),
        reason,
    };
    if trip.stops.is_empty() {
        return Err(failure(ClassificationFailureReason::EmptyTrip));
    }

    let headsign = trip.headsign.clone().unwrap_or_default();
    let feed_direction = match trip.declared_direction {
        Some(declared) => declared,
        None if registry.infers_direction_from_headsign(&trip.route_id) => registry
            .direction_for_headsign(&trip.route_id, &headsign)
            .ok_or_else(|| {
                failure(ClassificationFailureReason::UnknownDirectionHeadsign {
                    headsign: headsign.clone(),
                })
            })?,
        None => 0,
    };
    let direction_id = feed_direction.to_string();

    let stops = trip
        .stops
        .iter()
        .enumerate()
        .map(|(idx, raw)| ClassifiedStop::new(raw.clone(), &direction_id, CanonicalPosition::exact(idx)))
        .collect();

    Ok(TripVariant {
        route_id: trip.route_id.clone(),
        direction_id,
        headsign_label: headsign,
        source_trip_id: trip.trip_id.clone(),
        leg: 0,
        stops,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadsignClass, HeadsignTable};
    use crate::registry::PassThroughTable;
    use std::collections::BTreeMap;

    fn registry_1a() -> SpecRegistry {
        let tables = vec![
            PassThroughTable {
                route_id: String::from("10001"),
                feed_direction_id: 0,
                table: HeadsignTable::default(),
                direction_headsigns: [String::from("Regional Rd 25 & Britannia")].into(),
            },
            PassThroughTable {
                route_id: String::from("10001"),
                feed_direction_id: 1,
                table: HeadsignTable::new(
                    None,
                    &[HeadsignClass::new("Milton Go", &["R.R. 25 & No. 5 Side Rd"])],
                ),
                direction_headsigns: [String::from("Milton Go")].into(),
            },
        ];
        SpecRegistry::new(BTreeMap::new(), tables).expect("valid registry")
    }

    #[test]
    fn test_declared_direction_is_kept() {
        let registry = SpecRegistry::default();
        let trip = RawTrip::from_stop_ids("t1", "50", &["B", "A", "C"])
            .with_declared_direction(Some(1))
            .with_headsign(Some("St Francis Xavier"));
        let variant = pass_through_trip(&registry, &trip).expect("variant");
        assert_eq!(variant.direction_id, "1");
        assert_eq!(variant.stop_ids(), vec!["B", "A", "C"]);
        assert_eq!(variant.positions(), vec![0, 1, 2]);
        assert_eq!(variant.headsign_label, "St Francis Xavier");
    }

    #[test]
    fn test_missing_direction_defaults_to_zero() {
        let registry = SpecRegistry::default();
        let trip = RawTrip::from_stop_ids("t1", "2", &["A"]);
        let variant = pass_through_trip(&registry, &trip).expect("variant");
        assert_eq!(variant.direction_id, "0");
        assert_eq!(variant.headsign_label, "");
    }

    #[test]
    fn test_direction_from_headsign() {
        let registry = registry_1a();
        let trip = RawTrip::from_stop_ids("t1", "10001", &["A", "B"]).with_headsign(Some("Milton Go"));
        let variant = pass_through_trip(&registry, &trip).expect("variant");
        assert_eq!(variant.direction_id, "1");

        let unknown =
            RawTrip::from_stop_ids("t2", "10001", &["A", "B"]).with_headsign(Some("High Pt"));
        match pass_through_trip(&registry, &unknown) {
            Err(f) => assert_eq!(
                f.reason,
                ClassificationFailureReason::UnknownDirectionHeadsign {
                    headsign: String::from("High Pt")
                }
            ),
            Ok(v) => panic!("expected failure, found {v:?}"),
        }
    }
}
