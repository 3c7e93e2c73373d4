use super::{aligner, early_order, ClassificationFailure, DataIntegrityWarning};
use crate::model::{ClassifiedStop, RawTrip, RouteSpec, TripVariant};

/// the variants produced from one raw trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSplit {
    pub variants: Vec<TripVariant>,
    pub warning: Option<DataIntegrityWarning>,
    /// adjacent stop pairs that the early-order comparator could not order
    pub early_order_ties: usize,
}

impl TripSplit {
    pub fn is_split(&self) -> bool {
        self.variants.len() > 1
    }
}

/// classifies a trip of a registered route into one variant, or two when the trip runs
/// through both directions. stops of each variant are in early order.
pub fn split_trip(route: &RouteSpec, trip: &RawTrip) -> Result<TripSplit, ClassificationFailure> {
    let alignment = aligner::align_trip(route, trip)?;
    let is_split = alignment.is_split();

    let mut early_order_ties = 0;
    let mut variants = Vec::with_capacity(2);
    for (leg_index, leg) in alignment.legs().into_iter().enumerate() {
        let direction = route.direction(leg.direction_index);
        let positions = aligner::canonical_positions(&leg.matches);
        let mut stops: Vec<ClassifiedStop> = trip.stops[leg.start..leg.end()]
            .iter()
            .zip(positions)
            .map(|(raw, position)| ClassifiedStop::new(raw.clone(), &direction.direction_id, position))
            .collect();
        early_order::sort_early(&mut stops);

        let ties = early_order::early_order_ties(&stops);
        for idx in ties.iter() {
            log::warn!(
                "route '{}' trip '{}': stops '{}' and '{}' share an early-order position",
                route.route_id,
                trip.trip_id,
                stops[*idx].stop_id(),
                stops[*idx + 1].stop_id()
            );
        }
        early_order_ties += ties.len();

        // split legs always take their direction's label
        let headsign_label = match (&trip.headsign, is_split) {
            (Some(observed), false) if !observed.is_empty() => observed.clone(),
            _ => direction.headsign_label.clone(),
        };

        variants.push(TripVariant {
            route_id: route.route_id.clone(),
            direction_id: direction.direction_id.clone(),
            headsign_label,
            source_trip_id: trip.trip_id.clone(),
            leg: leg_index,
            stops,
        });
    }

    let primary = route.direction(alignment.primary().direction_index);
    let warning = match trip.declared_direction {
        Some(declared) if declared != primary.feed_direction_id => Some(DataIntegrityWarning {
            route_id: route.route_id.clone(),
            trip_id: trip.trip_id.clone(),
            declared,
            direction_id: primary.direction_id.clone(),
            expected: primary.feed_direction_id,
        }),
        _ => None,
    };

    Ok(TripSplit {
        variants,
        warning,
        early_order_ties,
    })
}
