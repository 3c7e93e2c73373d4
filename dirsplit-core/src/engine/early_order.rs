use crate::model::ClassifiedStop;
use itertools::Itertools;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarlyOrder {
    Earlier,
    Later,
    Equal,
}

impl From<Ordering> for EarlyOrder {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Less => EarlyOrder::Earlier,
            Ordering::Greater => EarlyOrder::Later,
            Ordering::Equal => EarlyOrder::Equal,
        }
    }
}

impl From<EarlyOrder> for Ordering {
    fn from(value: EarlyOrder) -> Self {
        match value {
            EarlyOrder::Earlier => Ordering::Less,
            EarlyOrder::Later => Ordering::Greater,
            EarlyOrder::Equal => Ordering::Equal,
        }
    }
}

/// orders two stop visits of the same route: canonical position first, then the raw
/// stop_sequence. anything beyond that is reported as Equal.
pub fn compare_early(a: &ClassifiedStop, b: &ClassifiedStop) -> EarlyOrder {
    a.canonical_position
        .cmp(&b.canonical_position)
        .then_with(|| a.raw_stop.gtfs_sequence.cmp(&b.raw_stop.gtfs_sequence))
        .into()
}

/// stable sort by [`compare_early`].
pub fn sort_early(stops: &mut [ClassifiedStop]) {
    stops.sort_by(|a, b| compare_early(a, b).into());
}

/// indices `i` where stops `i` and `i + 1` compare Equal.
pub fn early_order_ties(stops: &[ClassifiedStop]) -> Vec<usize> {
    stops
        .iter()
        .tuple_windows()
        .enumerate()
        .filter(|(_, (a, b))| compare_early(a, b) == EarlyOrder::Equal)
        .map(|(idx, _)| idx)
        .collect()
}
