use super::RawTripStop;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// where a stop sits relative to the reference index it was assigned.
///
/// variant order matters: the derived `Ord` places leading stops before the matched
/// reference stop and trailing stops after it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placement {
    /// unmatched stop that precedes the first matched stop of its leg, ranked in trip order
    Before(u32),
    /// the stop matched this reference entry
    Exact,
    /// unmatched stop following a matched stop, counted from 1
    After(u32),
}

/// index into a direction's reference sequence plus a secondary key for stops
/// the reference does not list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalPosition {
    pub index: usize,
    pub placement: Placement,
}

impl CanonicalPosition {
    pub fn exact(index: usize) -> Self {
        Self {
            index,
            placement: Placement::Exact,
        }
    }

    pub fn after(index: usize, offset: u32) -> Self {
        Self {
            index,
            placement: Placement::After(offset),
        }
    }

    pub fn before(index: usize, rank: u32) -> Self {
        Self {
            index,
            placement: Placement::Before(rank),
        }
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Placement::Before(rank) => write!(f, "before:{rank}"),
            Placement::Exact => write!(f, "exact"),
            Placement::After(offset) => write!(f, "after:{offset}"),
        }
    }
}

/// a raw stop visit assigned to a direction and a canonical position.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedStop {
    pub raw_stop: RawTripStop,
    pub direction_id: String,
    pub canonical_position: CanonicalPosition,
}

impl ClassifiedStop {
    pub fn new(
        raw_stop: RawTripStop,
        direction_id: &str,
        canonical_position: CanonicalPosition,
    ) -> Self {
        Self {
            raw_stop,
            direction_id: direction_id.to_string(),
            canonical_position,
        }
    }

    pub fn stop_id(&self) -> &str {
        &self.raw_stop.stop_id
    }

    pub fn position(&self) -> usize {
        self.canonical_position.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_orders_around_reference_stop() {
        let mut positions = vec![
            CanonicalPosition::after(2, 1),
            CanonicalPosition::exact(2),
            CanonicalPosition::before(2, 1),
            CanonicalPosition::exact(1),
            CanonicalPosition::before(2, 0),
            CanonicalPosition::after(2, 2),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![
                CanonicalPosition::exact(1),
                CanonicalPosition::before(2, 0),
                CanonicalPosition::before(2, 1),
                CanonicalPosition::exact(2),
                CanonicalPosition::after(2, 1),
                CanonicalPosition::after(2, 2),
            ]
        );
    }
}
