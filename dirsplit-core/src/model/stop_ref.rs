use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// how a stop id behaves within a direction's reference sequence.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopRole {
    /// identifies a single point along this direction's path
    #[default]
    Plain,
    /// also appears in the other direction of the route. a trip may switch
    /// directions at this stop.
    Shared,
    /// appears more than once within this direction (loops, shared approach segments)
    Ambiguous,
}

impl Display for StopRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StopRole::Plain => "plain",
            StopRole::Shared => "shared",
            StopRole::Ambiguous => "ambiguous",
        };
        write!(f, "{s}")
    }
}

/// one entry of a reference sequence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct StopRef {
    pub stop_id: String,
    #[serde(default)]
    pub role: StopRole,
}

impl StopRef {
    pub fn new(stop_id: &str, role: StopRole) -> Self {
        Self {
            stop_id: stop_id.to_string(),
            role,
        }
    }

    pub fn plain(stop_id: &str) -> Self {
        Self::new(stop_id, StopRole::Plain)
    }

    pub fn shared(stop_id: &str) -> Self {
        Self::new(stop_id, StopRole::Shared)
    }

    pub fn ambiguous(stop_id: &str) -> Self {
        Self::new(stop_id, StopRole::Ambiguous)
    }
}
