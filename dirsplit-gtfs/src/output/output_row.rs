use dirsplit_core::model::{ClassifiedStop, TripVariant};
use serde::{Deserialize, Serialize};

/// one row of trip-variants.csv.gz
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TripVariantRow {
    pub variant_id: String,
    pub route_id: String,
    pub direction_id: String,
    pub headsign: String,
    pub trip_id: String,
    pub leg: usize,
    pub stop_count: usize,
}

/// one row of trip-variant-stops.csv.gz, listed in early order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VariantStopRow {
    pub variant_id: String,
    pub stop_index: usize,
    pub stop_id: String,
    pub gtfs_sequence: u32,
    pub canonical_position: usize,
    pub placement: String,
}

impl From<&TripVariant> for TripVariantRow {
    fn from(variant: &TripVariant) -> Self {
        Self {
            variant_id: variant.variant_id(),
            route_id: variant.route_id.clone(),
            direction_id: variant.direction_id.clone(),
            headsign: variant.headsign_label.clone(),
            trip_id: variant.source_trip_id.clone(),
            leg: variant.leg,
            stop_count: variant.stops.len(),
        }
    }
}

impl VariantStopRow {
    pub fn new(variant_id: &str, stop_index: usize, stop: &ClassifiedStop) -> Self {
        Self {
            variant_id: variant_id.to_string(),
            stop_index,
            stop_id: stop.raw_stop.stop_id.clone(),
            gtfs_sequence: stop.raw_stop.gtfs_sequence,
            canonical_position: stop.canonical_position.index,
            placement: stop.canonical_position.placement.to_string(),
        }
    }

    pub fn rows(variant: &TripVariant) -> Vec<VariantStopRow> {
        let variant_id = variant.variant_id();
        variant
            .stops
            .iter()
            .enumerate()
            .map(|(idx, stop)| VariantStopRow::new(&variant_id, idx, stop))
            .collect()
    }
}
