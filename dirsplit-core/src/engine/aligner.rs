//! monotonic alignment of a trip's stop visits against a route's reference sequences.
//!
//! each direction is matched greedily: walking the raw stops in order, a stop matches the
//! first reference occurrence of its id at or after the reference pointer, and the pointer
//! moves just past it. repeated (ambiguous) stops therefore consume their occurrences in
//! order, and stops the reference does not list are skipped without moving the pointer.
use super::{ClassificationFailure, ClassificationFailureReason};
use crate::model::{CanonicalPosition, DirectionSpec, RawTrip, RawTripStop, RouteSpec, StopRole};

/// matches of a contiguous run of raw stops against one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegAlignment {
    /// 0 or 1, the position of the direction in its RouteSpec
    pub direction_index: usize,
    /// index of the leg's first stop within the raw trip
    pub start: usize,
    /// matched reference index of each raw stop in the leg
    pub matches: Vec<Option<usize>>,
}

impl LegAlignment {
    pub fn match_count(&self) -> usize {
        count_matches(&self.matches)
    }

    /// index one past the leg's last stop within the raw trip
    pub fn end(&self) -> usize {
        self.start + self.matches.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripAlignment {
    Single(LegAlignment),
    /// the trip switches direction at `split_index`; that stop belongs to both legs.
    Split {
        split_index: usize,
        first: LegAlignment,
        second: LegAlignment,
    },
}

impl TripAlignment {
    pub fn legs(&self) -> Vec<&LegAlignment> {
        match self {
            TripAlignment::Single(leg) => vec![leg],
            TripAlignment::Split { first, second, .. } => vec![first, second],
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, TripAlignment::Split { .. })
    }

    pub fn primary(&self) -> &LegAlignment {
        match self {
            TripAlignment::Single(leg) => leg,
            TripAlignment::Split { first, .. } => first,
        }
    }
}

struct SplitCandidate {
    first_direction: usize,
    split_index: usize,
    prefix: Vec<Option<usize>>,
    suffix: Vec<Option<usize>>,
    combined: usize,
}

/// longest order-preserving match of `stops` against a direction's reference sequence.
pub fn align_direction(direction: &DirectionSpec, stops: &[RawTripStop]) -> Vec<Option<usize>> {
    let mut pointer = 0;
    stops
        .iter()
        .map(|stop| {
            let found = direction.position_from(&stop.stop_id, pointer);
            if let Some(idx) = found {
                pointer = idx + 1;
            }
            found
        })
        .collect()
}

pub fn count_matches(matches: &[Option<usize>]) -> usize {
    matches.iter().filter(|m| m.is_some()).count()
}

/// decides the direction (or pair of directions) of a trip.
///
/// a split at a shared stop is preferred when the two legs together match more stops than
/// the best single direction, and each leg matches at least one stop besides the shared one.
/// otherwise the direction with strictly more matches wins.
pub fn align_trip(route: &RouteSpec, trip: &RawTrip) -> Result<TripAlignment, ClassificationFailure> {
    if trip.stops.is_empty() {
        return Err(failure(route, trip, ClassificationFailureReason::EmptyTrip));
    }
    let full = [
        align_direction(route.direction(0), &trip.stops),
        align_direction(route.direction(1), &trip.stops),
    ];
    let counts = [count_matches(&full[0]), count_matches(&full[1])];
    let best_single = counts[0].max(counts[1]);

    let alignment = match find_split(route, &trip.stops, &full) {
        Some(split) if split.combined > best_single => TripAlignment::Split {
            split_index: split.split_index,
            first: LegAlignment {
                direction_index: split.first_direction,
                start: 0,
                matches: split.prefix,
            },
            second: LegAlignment {
                direction_index: 1 - split.first_direction,
                start: split.split_index,
                matches: split.suffix,
            },
        },
        _ if best_single == 0 => {
            return Err(failure(route, trip, ClassificationFailureReason::NoMatchingStops))
        }
        _ if counts[0] == counts[1] => {
            let reason = ClassificationFailureReason::AmbiguousDirection {
                matched: best_single,
            };
            return Err(failure(route, trip, reason));
        }
        _ => {
            let primary = if counts[0] > counts[1] { 0 } else { 1 };
            let [first, second] = full;
            let matches = if primary == 0 { first } else { second };
            TripAlignment::Single(LegAlignment {
                direction_index: primary,
                start: 0,
                matches,
            })
        }
    };

    check_unresolved(route, trip, &alignment)?;
    Ok(alignment)
}

/// best split over both direction orders and every shared stop. ties keep the first
/// candidate found (direction 0 first, then the earliest stop).
fn find_split(
    route: &RouteSpec,
    stops: &[RawTripStop],
    full: &[Vec<Option<usize>>; 2],
) -> Option<SplitCandidate> {
    let mut best: Option<SplitCandidate> = None;
    for first_direction in 0..2 {
        let direction = route.direction(first_direction);
        let opposite = route.opposite(first_direction);
        let mut prefix_count = 0;
        for (split_index, matched) in full[first_direction].iter().enumerate() {
            let Some(reference_index) = matched else {
                continue;
            };
            prefix_count += 1;
            if direction.role_at(*reference_index) != Some(StopRole::Shared) {
                continue;
            }
            let suffix = align_direction(opposite, &stops[split_index..]);
            if suffix.first().copied().flatten().is_none() {
                continue;
            }
            let suffix_count = count_matches(&suffix[1..]);
            if prefix_count < 2 || suffix_count == 0 {
                continue;
            }
            let combined = prefix_count + suffix_count;
            if best.as_ref().map_or(true, |b| combined > b.combined) {
                best = Some(SplitCandidate {
                    first_direction,
                    split_index,
                    prefix: full[first_direction][..=split_index].to_vec(),
                    suffix,
                    combined,
                });
            }
        }
    }
    best
}

/// a stop that its leg's direction lists but could not match was visited out of order.
fn check_unresolved(
    route: &RouteSpec,
    trip: &RawTrip,
    alignment: &TripAlignment,
) -> Result<(), ClassificationFailure> {
    for leg in alignment.legs() {
        let direction = route.direction(leg.direction_index);
        let raw_stops = &trip.stops[leg.start..leg.end()];
        for (stop, matched) in raw_stops.iter().zip(leg.matches.iter()) {
            if matched.is_none() && direction.contains(&stop.stop_id) {
                let reason = ClassificationFailureReason::UnresolvedStopVisit {
                    stop_id: stop.stop_id.clone(),
                    gtfs_sequence: stop.gtfs_sequence,
                    direction_id: direction.direction_id.clone(),
                };
                return Err(failure(route, trip, reason));
            }
        }
    }
    Ok(())
}

/// canonical positions for the stops of one leg. unmatched stops take the index of the
/// nearest preceding matched stop; unmatched stops before the first match are ranked ahead
/// of the first matched stop.
pub fn canonical_positions(matches: &[Option<usize>]) -> Vec<CanonicalPosition> {
    let first_anchor = matches.iter().flatten().next().copied().unwrap_or_default();
    let mut anchor: Option<usize> = None;
    let mut offset = 0;
    let mut leading = 0;
    matches
        .iter()
        .map(|matched| match (matched, anchor) {
            (Some(idx), _) => {
                anchor = Some(*idx);
                offset = 0;
                CanonicalPosition::exact(*idx)
            }
            (None, Some(idx)) => {
                offset += 1;
                CanonicalPosition::after(idx, offset)
            }
            (None, None) => {
                let position = CanonicalPosition::before(first_anchor, leading);
                leading += 1;
                position
            }
        })
        .collect()
}

fn failure(
    route: &RouteSpec,
    trip: &RawTrip,
    reason: ClassificationFailureReason,
) -> ClassificationFailure {
    ClassificationFailure {
        route_id: route.route_id.clone(),
        trip_id: trip.trip_id.clone(),
        raw_stops: trip.stop_ids(),
        reason,
    }
}
