use super::{HeadsignClass, StopRef, StopRole};
use serde::{Deserialize, Serialize};

/// one of the two directions of a route: a display label plus the curated order in which
/// its trips visit stops.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DirectionSpec {
    pub route_id: String,
    pub direction_id: String,
    pub headsign_label: String,
    /// value of the GTFS `direction_id` column expected for trips in this direction
    pub feed_direction_id: u8,
    pub reference_sequence: Vec<StopRef>,
    /// observed headsign labels that collapse into a canonical label for this direction
    pub headsign_classes: Vec<HeadsignClass>,
}

impl DirectionSpec {
    pub fn new(
        route_id: &str,
        direction_id: &str,
        headsign_label: &str,
        feed_direction_id: u8,
        reference_sequence: Vec<StopRef>,
    ) -> Self {
        Self {
            route_id: route_id.to_string(),
            direction_id: direction_id.to_string(),
            headsign_label: headsign_label.to_string(),
            feed_direction_id,
            reference_sequence,
            headsign_classes: vec![],
        }
    }

    pub fn with_headsign_classes(mut self, headsign_classes: Vec<HeadsignClass>) -> Self {
        self.headsign_classes = headsign_classes;
        self
    }

    pub fn len(&self) -> usize {
        self.reference_sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference_sequence.is_empty()
    }

    pub fn contains(&self, stop_id: &str) -> bool {
        self.reference_sequence.iter().any(|r| r.stop_id == stop_id)
    }

    /// number of times a stop id appears in the reference sequence
    pub fn occurrences(&self, stop_id: &str) -> usize {
        self.reference_sequence
            .iter()
            .filter(|r| r.stop_id == stop_id)
            .count()
    }

    /// finds the first reference occurrence of `stop_id` at or after `from`.
    pub fn position_from(&self, stop_id: &str, from: usize) -> Option<usize> {
        self.reference_sequence
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, r)| r.stop_id == stop_id)
            .map(|(idx, _)| idx)
    }

    pub fn role_at(&self, index: usize) -> Option<StopRole> {
        self.reference_sequence.get(index).map(|r| r.role)
    }
}
